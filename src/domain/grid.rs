/// The playing field: a fixed-size discrete grid with wraparound topology.
///
/// Moving past any edge re-enters from the opposite edge, so every cell
/// has exactly four neighbors and movement arithmetic is total.

pub const GRID_WIDTH: i32 = 40;
pub const GRID_HEIGHT: i32 = 30;

/// One grid coordinate. `0 ≤ x < GRID_WIDTH`, `0 ≤ y < GRID_HEIGHT`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

/// Wraparound addition: `(coord + delta + bound) % bound`.
/// Valid for any in-range `coord` and any `delta` in `-bound..=bound`.
#[inline]
pub fn wrap(coord: i32, delta: i32, bound: i32) -> i32 {
    (coord + delta + bound) % bound
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this direction. Screen convention: +y is down.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl Cell {
    /// The neighboring cell in the given direction, wrapping at the edges.
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell {
            x: wrap(self.x, dx, GRID_WIDTH),
            y: wrap(self.y, dy, GRID_HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_is_identity_in_range() {
        assert_eq!(wrap(5, 1, GRID_WIDTH), 6);
        assert_eq!(wrap(5, -1, GRID_WIDTH), 4);
    }

    #[test]
    fn wrap_at_all_four_edges() {
        // Right edge → left edge
        assert_eq!(Cell { x: GRID_WIDTH - 1, y: 10 }.step(Direction::Right), Cell { x: 0, y: 10 });
        // Left edge → right edge
        assert_eq!(Cell { x: 0, y: 10 }.step(Direction::Left), Cell { x: GRID_WIDTH - 1, y: 10 });
        // Bottom edge → top edge
        assert_eq!(Cell { x: 7, y: GRID_HEIGHT - 1 }.step(Direction::Down), Cell { x: 7, y: 0 });
        // Top edge → bottom edge
        assert_eq!(Cell { x: 7, y: 0 }.step(Direction::Up), Cell { x: 7, y: GRID_HEIGHT - 1 });
    }

    #[test]
    fn opposites_pair_up() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
