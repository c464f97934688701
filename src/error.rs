//! Rejection reasons and parse errors.
//!
//! Nothing in the rules engine is fatal: an operation whose preconditions do
//! not hold returns a [`Rejection`] and leaves the game untouched.

use thiserror::Error;

use crate::position::{Color, PieceType, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,
    #[error("a promotion choice is pending")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("{0:?} is not a promotion choice")]
    InvalidPromotion(PieceType),
    #[error("move {from} -> {to} is not legal")]
    IllegalMove { from: Square, to: Square },
    #[error("square {0} has no platform lane")]
    NoLane(Square),
    #[error("all platforms are in use")]
    PlatformCapReached,
    #[error("lane {0} is not free for a platform")]
    LaneUnavailable(Square),
    #[error("lane {0} does not hold an active platform")]
    NotActivePlatform(Square),
    #[error("a platform action was already taken since the last move")]
    AlreadyPlatformed,
    #[error("cannot place a platform while in check")]
    InCheck,
    #[error("the platform action would leave the king in check")]
    ExposesKing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("unknown piece '{ch}' at ({row}, {col})")]
    UnknownPiece { row: usize, col: usize, ch: char },
    #[error("{color} has {found} kings, expected exactly one")]
    KingCount { color: Color, found: usize },
    #[error("{0} is in check but it is not their turn")]
    WaitingSideInCheck(Color),
}
