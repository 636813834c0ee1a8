/// Food placement: pick a free cell for the next food item.
///
/// Rejection sampling over the full grid, bounded by an attempt budget.
/// The budget never triggers in normal play (a fresh board is ~99.75%
/// free); once the snake covers most of the grid the fallback scans the
/// remaining free cells and picks one uniformly instead of looping.

use rand::Rng;

use super::grid::{Cell, GRID_HEIGHT, GRID_WIDTH};
use super::snake::Snake;

const SAMPLE_BUDGET: u32 = 1_000;

/// Returns a cell not occupied by `snake`, or `None` if the board is full.
pub fn place_food<R: Rng>(rng: &mut R, snake: &Snake) -> Option<Cell> {
    for _ in 0..SAMPLE_BUDGET {
        let cell = Cell {
            x: rng.random_range(0..GRID_WIDTH),
            y: rng.random_range(0..GRID_HEIGHT),
        };
        if !snake.contains(cell) {
            return Some(cell);
        }
    }

    // Dense board: enumerate the free cells and pick one directly.
    let free: Vec<Cell> = (0..GRID_HEIGHT)
        .flat_map(|y| (0..GRID_WIDTH).map(move |x| Cell { x, y }))
        .filter(|c| !snake.contains(*c))
        .collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Direction;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Build a snake occupying every grid cell except those in `holes`.
    fn snake_covering_all_but(holes: &[Cell]) -> Snake {
        let mut cells = (0..GRID_HEIGHT)
            .flat_map(|y| (0..GRID_WIDTH).map(move |x| Cell { x, y }))
            .filter(|c| !holes.contains(c));
        let head = cells.next().expect("grid is not empty");
        let mut snake = Snake::spawn(head, 1, Direction::Right);
        for cell in cells {
            snake.grow_to(cell);
        }
        snake
    }

    #[test]
    fn single_free_cell_is_found_by_the_scan() {
        let mut rng = SmallRng::seed_from_u64(3);
        let free = Cell { x: 11, y: 22 };
        let snake = snake_covering_all_but(&[free]);

        // Whether a lucky sample hits it or the budget runs out and the
        // scan takes over, the only possible result is the free cell.
        assert_eq!(place_food(&mut rng, &snake), Some(free));
    }

    #[test]
    fn full_board_yields_no_food() {
        let mut rng = SmallRng::seed_from_u64(3);
        let snake = snake_covering_all_but(&[]);
        assert_eq!(place_food(&mut rng, &snake), None);
    }

    #[test]
    fn placed_food_avoids_the_snake() {
        let mut rng = SmallRng::seed_from_u64(7);
        // A long snake filling most of its row makes rejection likely.
        let mut snake = Snake::spawn(Cell { x: 20, y: 15 }, 3, Direction::Right);
        for _ in 0..30 {
            snake.grow_to(snake.next_head());
        }
        for _ in 0..200 {
            let food = place_food(&mut rng, &snake).expect("board is far from full");
            assert!(!snake.contains(food));
            assert!(food.x >= 0 && food.x < GRID_WIDTH);
            assert!(food.y >= 0 && food.y < GRID_HEIGHT);
        }
    }
}
