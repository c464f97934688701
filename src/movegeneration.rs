//! Candidate move generation.
//!
//! This module produces the raw, geometric move set of a single piece. It does
//! not look at whether the mover's king ends up attacked; that is the job of
//! [`crate::legality`], which feeds these sets through gravity and the check
//! detector.

use crate::movegen_tables::{BISHOP_DIRS, KING_STEPS, KNIGHT_JUMPS, ROOK_DIRS};
use crate::position::PieceType::*;
use crate::position::*;
use crate::utils::{square_bit, Bitboard};

/// Generates the candidate moves of the piece on `from`.
///
/// The set ignores self-check. A square that is empty, off the board, or
/// holds a piece that does not belong to `mover` yields the empty set.
///
/// # Arguments
///
/// * `board` - The board to generate on
/// * `from` - The square of the moving piece
/// * `mover` - The color whose piece is moving
///
/// # Returns
///
/// * A bitboard of destination squares
pub fn candidate_moves(board: &Board, from: Square, mover: Color) -> Bitboard {
    let piece = match board.get(from) {
        Some(piece) if piece.color == mover => piece,
        _ => return 0,
    };

    match piece.piece_type {
        Pawn => generate_pawn_moves(board, from, mover),
        Knight => generate_step_moves(board, from, mover, &KNIGHT_JUMPS),
        Bishop => generate_slide_moves(board, from, mover, &BISHOP_DIRS),
        Rook => generate_slide_moves(board, from, mover, &ROOK_DIRS),
        Queen => {
            generate_slide_moves(board, from, mover, &ROOK_DIRS)
                | generate_slide_moves(board, from, mover, &BISHOP_DIRS)
        }
        King => generate_step_moves(board, from, mover, &KING_STEPS) | generate_castling_moves(board, from, piece),
    }
}

/// Generates pawn moves.
///
/// This includes:
/// - Single square advances along `col`
/// - Double square advances from the starting column
/// - Diagonal captures, one `row` to either side
/// - En passant captures of a neighbouring pawn that just advanced two squares
fn generate_pawn_moves(board: &Board, from: Square, color: Color) -> Bitboard {
    let dir = color.pawn_direction();
    let opponent = SquareState::Occupied(color.opposite());
    let mut moves = 0;

    let ahead = from.offset(0, dir);
    if board.is_empty(ahead) {
        moves |= square_bit(ahead);
        let two_ahead = from.offset(0, 2 * dir);
        if from.col == color.pawn_col() && board.is_empty(two_ahead) {
            moves |= square_bit(two_ahead);
        }
    }

    for side in [1, -1] {
        let target = from.offset(side, dir);
        if board.state(target) == opponent {
            moves |= square_bit(target);
        }

        let beside = from.offset(side, 0);
        let double_moved_pawn = board
            .get(beside)
            .map_or(false, |p| p.color != color && p.piece_type == Pawn && p.just_double_moved());
        if double_moved_pawn && board.is_empty(target) {
            moves |= square_bit(target);
        }
    }

    moves
}

/// Generates moves for pieces that jump by fixed offsets (knight, king).
///
/// A target is reachable if it is on the board and empty or enemy-occupied.
fn generate_step_moves(board: &Board, from: Square, color: Color, steps: &[(i32, i32)]) -> Bitboard {
    let mut moves = 0;
    for &(d_row, d_col) in steps {
        let target = from.offset(d_row, d_col);
        match board.state(target) {
            SquareState::Empty => moves |= square_bit(target),
            SquareState::Occupied(other) if other != color => moves |= square_bit(target),
            _ => {}
        }
    }
    moves
}

/// Generates moves for sliding pieces.
///
/// Each direction is followed until the edge of the board or the first piece.
/// An enemy piece ends the ray and is included; a friendly piece ends it and
/// is not.
///
/// # Arguments
///
/// * `board` - The board to generate on
/// * `from` - The square of the sliding piece
/// * `color` - The color of the sliding piece
/// * `dirs` - The unit directions to follow
///
/// # Returns
///
/// * A bitboard of reachable squares
fn generate_slide_moves(board: &Board, from: Square, color: Color, dirs: &[(i32, i32)]) -> Bitboard {
    let mut moves = 0;
    for &(d_row, d_col) in dirs {
        let mut target = from.offset(d_row, d_col);
        loop {
            match board.state(target) {
                SquareState::Empty => moves |= square_bit(target),
                SquareState::Occupied(other) if other != color => {
                    moves |= square_bit(target);
                    break;
                }
                _ => break,
            }
            target = target.offset(d_row, d_col);
        }
    }
    moves
}

/// Generates the castling destinations of an unmoved king on its home column.
fn generate_castling_moves(board: &Board, from: Square, king: Piece) -> Bitboard {
    if king.has_moved() || from.col != king.color.home_col() {
        return 0;
    }

    let mut moves = 0;
    for rook_row in [0, 7] {
        if can_castle(board, from, king.color, rook_row) {
            let dir = (rook_row - from.row).signum();
            moves |= square_bit(from.offset(2 * dir, 0));
        }
    }
    moves
}

/// Checks whether the king on `king_square` may castle with the rook on
/// `rook_row` of the same column.
///
/// The rook must be unmoved, at least three rows away, and every square
/// strictly between the two pieces must be empty.
///
/// # Arguments
///
/// * `board` - The board to inspect
/// * `king_square` - The square of the king
/// * `color` - The color of the king
/// * `rook_row` - The edge row (0 or 7) the rook stands on
///
/// # Returns
///
/// * `true` if castling toward that rook is available
pub fn can_castle(board: &Board, king_square: Square, color: Color, rook_row: i32) -> bool {
    let distance = rook_row - king_square.row;
    if distance.abs() < 3 {
        return false;
    }

    let rook_square = Square::new(rook_row, king_square.col);
    match board.get(rook_square) {
        Some(rook) if rook == Piece::new(color, Rook) && !rook.has_moved() => {}
        _ => return false,
    }

    let dir = distance.signum();
    let mut row = king_square.row + dir;
    while row != rook_row {
        if !board.is_empty(Square::new(row, king_square.col)) {
            return false;
        }
        row += dir;
    }
    true
}

/// Returns the rook's `(from, to)` squares when a king move from `from` to
/// `to` is a castling move.
///
/// The rook comes from the edge row the king moved toward and lands next to
/// the king's destination, on the side the king came from.
pub fn castling_rook_squares(from: Square, to: Square) -> Option<(Square, Square)> {
    let d_row = to.row - from.row;
    if from.col != to.col || d_row.abs() != 2 {
        return None;
    }
    let dir = d_row.signum();
    let rook_row = if dir > 0 { 7 } else { 0 };
    Some((Square::new(rook_row, from.col), to.offset(-dir, 0)))
}

/// Returns the square of the pawn captured en passant when the pawn on `from`
/// moves to `to`, if the move is an en passant capture.
pub fn en_passant_victim(board: &Board, from: Square, to: Square) -> Option<Square> {
    let pawn = board.get(from).filter(|p| p.piece_type == Pawn)?;
    if from.row == to.row || from.col == to.col || !board.is_empty(to) {
        return None;
    }
    let victim = Square::new(to.row, from.col);
    board
        .get(victim)
        .filter(|p| p.color != pawn.color && p.piece_type == Pawn && p.just_double_moved())
        .map(|_| victim)
}
