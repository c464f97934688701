//! Move generation lookup tables.
//!
//! Offsets are `(d_row, d_col)` pairs. Steppers (king, knight) use each offset
//! once; sliders (rook, bishop, queen) repeat a direction until blocked.

/// The eight squares adjacent to a king.
pub const KING_STEPS: [(i32, i32); 8] = [
    (1, 1), (-1, 1), (0, 1), (1, 0),
    (1, -1), (-1, -1), (0, -1), (-1, 0),
];

/// The eight knight jumps.
pub const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2), (2, 1), (-1, 2), (-2, 1),
    (1, -2), (2, -1), (-1, -2), (-2, -1),
];

/// Sliding directions along a single axis.
pub const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Sliding directions along the diagonals.
pub const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
