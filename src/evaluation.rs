//! End-of-game evaluation.
//!
//! The material rule here is looser than classical chess: a pawn that can
//! still move, or might still fall into a new lane, keeps the game alive.

use std::fmt;

use crate::legality::is_in_check;
use crate::position::{Board, Color, Piece, PieceType, Square};
use crate::utils::Bitboard;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndType {
    Playing,
    /// The player to move has lost.
    Checkmate,
    Stalemate,
    Insufficient,
}

impl EndType {
    pub fn is_over(self) -> bool {
        self != EndType::Playing
    }

    /// Result line shown to the players, given whose turn it is.
    pub fn message(self, to_move: Color) -> Option<String> {
        match self {
            EndType::Playing => None,
            EndType::Checkmate => Some(format!("Checkmate - {} Wins", to_move.opposite())),
            EndType::Stalemate => Some("Draw - Stalemate".to_string()),
            EndType::Insufficient => Some("Draw - Insufficient Material".to_string()),
        }
    }
}

impl fmt::Display for EndType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EndType::Playing => "Playing",
            EndType::Checkmate => "Checkmate",
            EndType::Stalemate => "Stalemate",
            EndType::Insufficient => "Insufficient Material",
        };
        f.write_str(name)
    }
}

/// Evaluates `board` with `to_move` to play.
///
/// # Arguments
///
/// * `board` - The settled board
/// * `to_move` - The player whose turn it is
/// * `legal` - Returns the legal moves of the piece on a square for a color
///
/// # Returns
///
/// * The end state of the position
pub fn evaluate_with<F>(board: &Board, to_move: Color, mut legal: F) -> EndType
where
    F: FnMut(Square, Color) -> Bitboard,
{
    let has_move = board
        .pieces()
        .filter(|(_, piece)| piece.color == to_move)
        .any(|(square, _)| legal(square, to_move) != 0);

    if !has_move {
        if !is_in_check(board, Color::White) && !is_in_check(board, Color::Black) {
            return EndType::Stalemate;
        }
        return EndType::Checkmate;
    }

    let white_knights = board.count_piece(Piece::new(Color::White, PieceType::Knight));
    let black_knights = board.count_piece(Piece::new(Color::Black, PieceType::Knight));
    let heavy = board.count_type(PieceType::Rook) + board.count_type(PieceType::Queen) + board.count_type(PieceType::Bishop);
    if heavy > 0 || white_knights > 2 || black_knights > 2 {
        return EndType::Playing;
    }

    if pawn_has_life(board, &mut legal) {
        return EndType::Playing;
    }

    if white_knights + black_knights == 0 {
        return EndType::Insufficient;
    }

    let white_pawns = board.count_piece(Piece::new(Color::White, PieceType::Pawn));
    let black_pawns = board.count_piece(Piece::new(Color::Black, PieceType::Pawn));
    if white_pawns == 0 && black_pawns == 0 {
        return EndType::Insufficient;
    }

    EndType::Playing
}

/// A pawn has life if it can move, stands on its promotion column, or has
/// not yet reached the floor row.
fn pawn_has_life<F>(board: &Board, legal: &mut F) -> bool
where
    F: FnMut(Square, Color) -> Bitboard,
{
    board
        .pieces()
        .filter(|(_, piece)| piece.piece_type == PieceType::Pawn)
        .any(|(square, pawn)| {
            square.col == pawn.color.promotion_col() || square.row < 7 || legal(square, pawn.color) != 0
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legality::legal_moves;
    use crate::platforms::Platforms;

    fn evaluate(board: &Board, platforms: &Platforms, to_move: Color) -> EndType {
        evaluate_with(board, to_move, |square, color| legal_moves(board, platforms, square, color))
    }

    fn layout(rows: &[&str]) -> Board {
        Board::from_layout(&rows.join("\n")).unwrap()
    }

    #[test]
    fn test_initial_position_is_playing() {
        assert_eq!(evaluate(&Board::new(), &Platforms::new(), Color::White), EndType::Playing);
    }

    #[test]
    fn test_bare_kings_are_insufficient() {
        let mut board = Board::empty();
        board.set(Square::new(4, 0), Some(Piece::new(Color::White, PieceType::King)));
        board.set(Square::new(4, 7), Some(Piece::new(Color::Black, PieceType::King)));
        assert_eq!(evaluate(&board, &Platforms::new(), Color::White), EndType::Insufficient);
    }

    #[test]
    fn test_rook_on_floor_mates_cornered_king() {
        // Every escape square either lies on the rook's row or falls back onto it.
        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "K.......",
            "R......k",
        ]);
        let result = evaluate(&board, &Platforms::new(), Color::Black);
        assert_eq!(result, EndType::Checkmate);
        assert_eq!(result.message(Color::Black).as_deref(), Some("Checkmate - White Wins"));
    }

    #[test]
    fn test_platform_stalemate() {
        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "R.......",
            ".....K.k",
        ]);
        let mut platforms = Platforms::new();
        platforms.set(Square::new(6, 0), 1);
        platforms.set(Square::new(6, 7), 1);
        assert!(!is_in_check(&board, Color::Black));
        assert_eq!(evaluate(&board, &platforms, Color::Black), EndType::Stalemate);
        assert_eq!(EndType::Stalemate.message(Color::Black).as_deref(), Some("Draw - Stalemate"));
    }

    #[test]
    fn test_blocked_pawns_on_floor_are_insufficient() {
        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "K..Pp..k",
        ]);
        assert_eq!(evaluate(&board, &Platforms::new(), Color::White), EndType::Insufficient);
    }

    #[test]
    fn test_knight_with_pawns_plays_on() {
        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "KN.Pp..k",
        ]);
        assert_eq!(evaluate(&board, &Platforms::new(), Color::White), EndType::Playing);
    }

    #[test]
    fn test_lone_knights_are_insufficient_unless_three() {
        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "KN.....k",
        ]);
        assert_eq!(evaluate(&board, &Platforms::new(), Color::White), EndType::Insufficient);

        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "N.N.....",
            "KN.....k",
        ]);
        assert_eq!(evaluate(&board, &Platforms::new(), Color::White), EndType::Playing);
    }

    #[test]
    fn test_raised_pawn_has_life() {
        let board = layout(&[
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "...P....",
            "K..pp..k",
        ]);
        assert_eq!(evaluate(&board, &Platforms::new(), Color::White), EndType::Playing);
    }
}
