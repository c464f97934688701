use std::fmt;

use crate::position::Square;

/// A piece move from one square to another.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A platform action, taken instead of a piece move.
///
/// Lanes are named by the square directly above them.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlatformAction {
    Place(Square),
    Move { from: Square, to: Square },
    Remove(Square),
}

impl fmt::Display for PlatformAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformAction::Place(lane) => write!(f, "place platform under {}", lane),
            PlatformAction::Move { from, to } => write!(f, "move platform {} -> {}", from, to),
            PlatformAction::Remove(lane) => write!(f, "remove platform under {}", lane),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mv = Move::new(Square::new(3, 1), Square::new(3, 3));
        assert_eq!(mv.to_string(), "(3, 1) -> (3, 3)");
        let action = PlatformAction::Move { from: Square::new(2, 2), to: Square::new(4, 4) };
        assert_eq!(action.to_string(), "move platform (2, 2) -> (4, 4)");
    }
}
