/// Direction of travel along the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the unit delta (dx, dy) for this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Returns true if both directions move along the same axis
    /// (covers both reversals and no-op repeats)
    pub fn same_axis(&self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        (dx != 0 && ox != 0) || (dy != 0 && oy != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_same_axis() {
        assert!(Direction::Up.same_axis(Direction::Down));
        assert!(Direction::Up.same_axis(Direction::Up));
        assert!(Direction::Left.same_axis(Direction::Right));
        assert!(Direction::Right.same_axis(Direction::Right));

        assert!(!Direction::Up.same_axis(Direction::Left));
        assert!(!Direction::Down.same_axis(Direction::Right));
    }
}
