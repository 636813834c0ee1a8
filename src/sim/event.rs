/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound feedback.

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    FoodEaten { x: i32, y: i32 },
    SnakeDied,
}
