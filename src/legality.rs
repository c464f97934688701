//! Check detection and the self-check filter.
//!
//! [`is_in_check`] works on raw candidate moves only. [`legal_moves`] plays
//! every candidate on a copy of the board, lets gravity settle the copy, and
//! keeps the move when the mover's king is not attacked afterwards.

use crate::gravity::resolve_gravity;
use crate::movegeneration::{candidate_moves, castling_rook_squares, en_passant_victim};
use crate::platforms::Platforms;
use crate::position::*;
use crate::utils::{extract_bits, square_bit, Bitboard};

/// Returns true if the king of `color` is attacked on `board`.
///
/// A board without a king of `color` is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = match board.find_king(color) {
        Some(square) => square_bit(square),
        None => return false,
    };
    let opponent = color.opposite();
    board
        .pieces()
        .filter(|(_, piece)| piece.color == opponent)
        .any(|(square, _)| candidate_moves(board, square, opponent) & king != 0)
}

/// Plays the move `from -> to` on a copy of `board`, without gravity.
///
/// Applies every side effect of the move: the mover's en passant flags are
/// cleared, an en passant victim is removed, a castling rook is relocated,
/// and the moving piece is marked as moved (and as double-moved for a
/// two-square pawn advance). Promotion is left to the caller.
pub fn play_move(board: &Board, from: Square, to: Square) -> Board {
    let mut next = *board;
    let piece = match board.get(from) {
        Some(piece) => piece,
        None => return next,
    };

    next.clear_double_moves(piece.color);

    if let Some(victim) = en_passant_victim(board, from, to) {
        next.take(victim);
    }

    if piece.piece_type == PieceType::King {
        if let Some((rook_from, rook_to)) = castling_rook_squares(from, to) {
            if let Some(mut rook) = next.take(rook_from) {
                rook.flags.insert(PieceFlags::HAS_MOVED);
                next.set(rook_to, Some(rook));
            }
        }
    }

    if let Some(mut moving) = next.take(from) {
        moving.flags.insert(PieceFlags::HAS_MOVED);
        if moving.piece_type == PieceType::Pawn && (to.col - from.col).abs() == 2 {
            moving.flags.insert(PieceFlags::JUST_DOUBLE_MOVED);
        }
        next.set(to, Some(moving));
    }
    next
}

/// Filters the candidate moves of the piece on `from` down to the moves that
/// do not leave `mover`'s king attacked once gravity has settled.
///
/// # Arguments
///
/// * `board` - The current board
/// * `platforms` - The current lanes, used to settle each trial board
/// * `from` - The square of the moving piece
/// * `mover` - The color whose piece is moving
///
/// # Returns
///
/// * A bitboard of legal destination squares
pub fn legal_moves(board: &Board, platforms: &Platforms, from: Square, mover: Color) -> Bitboard {
    let mut legal = 0;
    for index in extract_bits(candidate_moves(board, from, mover)) {
        let to = Square::from_index(index);
        let settled = resolve_gravity(&play_move(board, from, to), platforms);
        if !is_in_check(&settled, mover) {
            legal |= 1 << index;
        }
    }
    legal
}
