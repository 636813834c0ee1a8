/// The step function: advances the game by one tick.
///
/// Processing order:
///   1. Latch the pending direction (reversals were filtered at input time)
///   2. Compute the new head with wraparound
///   3. Self-collision check against the PRE-MOVE body, tail included —
///      a death tick performs no other mutation
///   4. Prepend the new head
///   5. Feeding: score up, emit event, re-place food against the grown body
///   6. Otherwise shed the tail — net length unchanged
///
/// Outside `Phase::Playing` the step is a no-op, which makes "stopping
/// the timer" idempotent: extra invocations after game over do nothing.

use crate::domain::food::place_food;
use super::event::GameEvent;
use super::world::{Phase, WorldState};

pub fn step(world: &mut WorldState) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if let Some(dir) = world.pending_dir.take() {
        world.snake.direction = dir;
    }

    let new_head = world.snake.next_head();

    if world.snake.contains(new_head) {
        world.phase = Phase::GameOver;
        events.push(GameEvent::SnakeDied);
        return events;
    }

    if world.food == Some(new_head) {
        world.snake.grow_to(new_head);
        world.score += 1;
        events.push(GameEvent::FoodEaten { x: new_head.x, y: new_head.y });
        world.food = place_food(&mut world.rng, &world.snake);
    } else {
        world.snake.advance_to(new_head);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{Cell, Direction, GRID_WIDTH};

    fn playing_world() -> WorldState {
        let mut w = WorldState::new();
        w.start_game("Player");
        w
    }

    fn body(w: &WorldState) -> Vec<Cell> {
        w.snake.cells().collect()
    }

    #[test]
    fn plain_move_shifts_the_body() {
        let mut w = playing_world();
        w.food = Some(Cell { x: 0, y: 0 }); // out of the snake's path
        let events = step(&mut w);

        assert!(events.is_empty());
        assert_eq!(
            body(&w),
            vec![
                Cell { x: 21, y: 15 },
                Cell { x: 20, y: 15 },
                Cell { x: 19, y: 15 },
            ]
        );
        assert_eq!(w.score, 3);
        assert_eq!(w.phase, Phase::Playing);
    }

    #[test]
    fn feeding_grows_and_scores() {
        let mut w = playing_world();
        w.food = Some(Cell { x: 21, y: 15 });
        let events = step(&mut w);

        assert_eq!(events, vec![GameEvent::FoodEaten { x: 21, y: 15 }]);
        assert_eq!(
            body(&w),
            vec![
                Cell { x: 21, y: 15 },
                Cell { x: 20, y: 15 },
                Cell { x: 19, y: 15 },
                Cell { x: 18, y: 15 },
            ]
        );
        assert_eq!(w.score, 4);
        let food = w.food.expect("food is re-placed after feeding");
        assert!(!w.snake.contains(food));
    }

    #[test]
    fn self_collision_ends_the_session_without_mutation() {
        let mut w = playing_world();
        // Grow to length 5 in a straight line, then hook back into the body:
        // Right, Up, Left, Down lands on the 4th segment.
        w.food = Some(Cell { x: 21, y: 15 });
        step(&mut w);
        w.food = Some(Cell { x: 22, y: 15 });
        step(&mut w);
        assert_eq!(w.snake.len(), 5);
        w.food = Some(Cell { x: 0, y: 0 }); // park the food out of the way

        w.queue_direction(Direction::Up);
        step(&mut w);
        w.queue_direction(Direction::Left);
        step(&mut w);
        assert_eq!(w.phase, Phase::Playing);

        let before_body = body(&w);
        let before_food = w.food;
        let before_score = w.score;
        w.queue_direction(Direction::Down);
        let events = step(&mut w);

        assert_eq!(events, vec![GameEvent::SnakeDied]);
        assert_eq!(w.phase, Phase::GameOver);
        assert_eq!(body(&w), before_body);
        assert_eq!(w.food, before_food);
        assert_eq!(w.score, before_score);
    }

    #[test]
    fn tail_cell_counts_as_occupied() {
        // Pre-move-body policy: re-entering the cell the tail would vacate
        // this tick still kills. A 2x2 loop with a length-4 snake hits it.
        let mut w = playing_world();
        w.food = Some(Cell { x: 21, y: 15 });
        step(&mut w); // length 4, head (21,15), tail (18,15)
        w.food = Some(Cell { x: 0, y: 0 });

        w.queue_direction(Direction::Up);
        step(&mut w); // head (21,14)
        w.queue_direction(Direction::Left);
        step(&mut w); // head (20,14)
        assert_eq!(w.phase, Phase::Playing);

        // Down into (20,15): still the snake's own cell this tick.
        w.queue_direction(Direction::Down);
        let events = step(&mut w);
        assert_eq!(events, vec![GameEvent::SnakeDied]);
        assert_eq!(w.phase, Phase::GameOver);
    }

    #[test]
    fn pending_direction_is_consumed_by_the_tick() {
        let mut w = playing_world();
        w.food = Some(Cell { x: 0, y: 0 });
        w.queue_direction(Direction::Up);
        step(&mut w);

        assert_eq!(w.snake.direction, Direction::Up);
        assert_eq!(w.pending_dir, None);
        assert_eq!(w.snake.head(), Cell { x: 20, y: 14 });
    }

    #[test]
    fn movement_wraps_at_the_right_edge() {
        let mut w = playing_world();
        w.food = Some(Cell { x: 0, y: 0 });
        for _ in 0..(GRID_WIDTH - 20) {
            step(&mut w);
        }
        // Head stepped off x = GRID_WIDTH-1 and re-entered at x = 0.
        assert_eq!(w.snake.head(), Cell { x: 0, y: 15 });
        assert_eq!(w.phase, Phase::Playing);
    }

    #[test]
    fn missing_food_means_no_feeding() {
        let mut w = playing_world();
        w.food = None;
        let events = step(&mut w);
        assert!(events.is_empty());
        assert_eq!(w.snake.len(), 3);
        assert_eq!(w.score, 3);
    }

    #[test]
    fn step_is_a_no_op_after_game_over() {
        let mut w = playing_world();
        w.phase = Phase::GameOver;
        let before = body(&w);
        assert!(step(&mut w).is_empty());
        assert!(step(&mut w).is_empty());
        assert_eq!(body(&w), before);
    }
}
