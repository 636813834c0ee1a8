/// The snake body: an ordered sequence of grid cells, head at the front.
///
/// Cells are unique while the snake is alive. Consecutive cells were
/// adjacent (under wraparound) at the moment they were laid down; growth
/// and movement only ever touch the two ends of the deque.

use std::collections::VecDeque;

use super::grid::{Cell, Direction};

pub const START_LENGTH: usize = 3;

pub struct Snake {
    body: VecDeque<Cell>,
    pub direction: Direction,
}

impl Snake {
    /// Spawn a snake of `len` cells with its head at `head`, the body
    /// trailing in the direction opposite to `facing`.
    pub fn spawn(head: Cell, len: usize, facing: Direction) -> Self {
        let mut body = VecDeque::with_capacity(len + 1);
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..len {
            cell = cell.step(facing.opposite());
            body.push_back(cell);
        }
        Snake { body, direction: facing }
    }

    pub fn head(&self) -> Cell {
        // Invariant: the body is never empty while the snake exists.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// The cell the head would move into this tick.
    pub fn next_head(&self) -> Cell {
        self.head().step(self.direction)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Head-first iteration, index 0 = head.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Move into `head` without shedding the tail (feeding tick).
    pub fn grow_to(&mut self, head: Cell) {
        self.body.push_front(head);
    }

    /// Move into `head`, shedding the tail (ordinary tick).
    pub fn advance_to(&mut self, head: Cell) {
        self.body.push_front(head);
        self.body.pop_back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{GRID_HEIGHT, GRID_WIDTH};

    #[test]
    fn spawn_trails_opposite_to_facing() {
        let s = Snake::spawn(Cell { x: 20, y: 15 }, 3, Direction::Right);
        let cells: Vec<Cell> = s.cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell { x: 20, y: 15 },
                Cell { x: 19, y: 15 },
                Cell { x: 18, y: 15 },
            ]
        );
    }

    #[test]
    fn spawn_wraps_near_edges() {
        let s = Snake::spawn(Cell { x: 0, y: 0 }, 3, Direction::Right);
        let cells: Vec<Cell> = s.cells().collect();
        assert_eq!(cells[1], Cell { x: GRID_WIDTH - 1, y: 0 });
        assert_eq!(cells[2], Cell { x: GRID_WIDTH - 2, y: 0 });
        assert!(cells.iter().all(|c| c.y < GRID_HEIGHT));
    }

    #[test]
    fn advance_shifts_body_by_one() {
        let mut s = Snake::spawn(Cell { x: 20, y: 15 }, 3, Direction::Right);
        let next = s.next_head();
        assert_eq!(next, Cell { x: 21, y: 15 });
        s.advance_to(next);
        let cells: Vec<Cell> = s.cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell { x: 21, y: 15 },
                Cell { x: 20, y: 15 },
                Cell { x: 19, y: 15 },
            ]
        );
    }

    #[test]
    fn grow_keeps_tail() {
        let mut s = Snake::spawn(Cell { x: 20, y: 15 }, 3, Direction::Right);
        s.grow_to(s.next_head());
        assert_eq!(s.len(), 4);
        assert!(s.contains(Cell { x: 18, y: 15 }));
    }
}
