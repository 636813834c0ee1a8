/// WorldState: the complete snapshot of a game session.
///
/// Ownership discipline: the simulation step is the single writer of
/// snake/food/score. Input handling only ever writes the pending-direction
/// slot (via `queue_direction`); the renderer is a pure reader.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::domain::food::place_food;
use crate::domain::grid::{Cell, Direction, GRID_HEIGHT, GRID_WIDTH};
use crate::domain::snake::{Snake, START_LENGTH};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Pre-game screen: name entry, waiting for start.
    Title,
    Playing,
    /// Final frame stays visible under the game-over modal.
    GameOver,
}

pub struct WorldState {
    pub snake: Snake,
    pub food: Option<Cell>,
    pub score: u32,

    /// Latched, not-yet-applied directional input. Written by input
    /// handling, taken by the next tick.
    pub pending_dir: Option<Direction>,

    pub phase: Phase,
    pub tick: u64,

    /// Display name shown on the HUD and the game-over modal.
    /// The only state that survives across sessions.
    pub player_name: String,
    /// Title-screen edit buffer for the name field.
    pub name_input: String,

    pub rng: SmallRng,
}

impl WorldState {
    pub fn new() -> Self {
        WorldState {
            snake: Snake::spawn(Self::spawn_cell(), START_LENGTH, Direction::Right),
            food: None,
            score: 0,
            pending_dir: None,
            phase: Phase::Title,
            tick: 0,
            player_name: String::new(),
            name_input: String::new(),
            rng: SmallRng::from_os_rng(),
        }
    }

    fn spawn_cell() -> Cell {
        Cell { x: GRID_WIDTH / 2, y: GRID_HEIGHT / 2 }
    }

    /// Queue a direction change for the next tick.
    ///
    /// A press that exactly reverses the ACTIVE direction is dropped
    /// (instant self-reversal would be indistinguishable from suicide).
    /// Otherwise the latest press before the tick wins.
    pub fn queue_direction(&mut self, dir: Direction) {
        if dir == self.snake.direction.opposite() {
            return;
        }
        self.pending_dir = Some(dir);
    }

    /// Begin a fresh session: new snake, food, and score.
    ///
    /// The name field is trimmed; an empty entry falls back to
    /// `default_name`.
    pub fn start_game(&mut self, default_name: &str) {
        let trimmed = self.name_input.trim();
        self.player_name = if trimmed.is_empty() {
            default_name.to_string()
        } else {
            trimmed.to_string()
        };

        self.snake = Snake::spawn(Self::spawn_cell(), START_LENGTH, Direction::Right);
        self.pending_dir = None;
        self.food = place_food(&mut self.rng, &self.snake);
        self.score = self.snake.len() as u32;
        self.tick = 0;
        self.phase = Phase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_never_reaches_the_pending_slot() {
        let mut w = WorldState::new();
        w.start_game("Player");
        assert_eq!(w.snake.direction, Direction::Right);

        w.queue_direction(Direction::Left);
        assert_eq!(w.pending_dir, None);

        // Non-reversals are accepted; the pending value is not consulted.
        w.queue_direction(Direction::Up);
        w.queue_direction(Direction::Left);
        assert_eq!(w.pending_dir, Some(Direction::Up));
    }

    #[test]
    fn latest_press_before_the_tick_wins() {
        let mut w = WorldState::new();
        w.start_game("Player");
        w.queue_direction(Direction::Up);
        w.queue_direction(Direction::Down);
        assert_eq!(w.pending_dir, Some(Direction::Down));
    }

    #[test]
    fn start_game_builds_a_fresh_session() {
        let mut w = WorldState::new();
        w.name_input = "  Ada  ".to_string();
        w.start_game("Player");

        assert_eq!(w.phase, Phase::Playing);
        assert_eq!(w.player_name, "Ada");
        assert_eq!(w.snake.len(), START_LENGTH);
        assert_eq!(w.score, START_LENGTH as u32);
        assert_eq!(w.pending_dir, None);
        let head = w.snake.head();
        assert_eq!(head, Cell { x: GRID_WIDTH / 2, y: GRID_HEIGHT / 2 });
        let food = w.food.expect("initial food is placed");
        assert!(!w.snake.contains(food));
    }

    #[test]
    fn empty_name_falls_back_to_default() {
        let mut w = WorldState::new();
        w.name_input = "   ".to_string();
        w.start_game("Player");
        assert_eq!(w.player_name, "Player");
    }
}
