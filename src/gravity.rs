//! Gravity resolution.
//!
//! After every committed half-move, unsupported pieces fall toward row 7. A
//! piece is supported by the floor, by the piece below it, or by an active or
//! locked platform on the lane directly under it.

use log::trace;

use crate::platforms::Platforms;
use crate::position::{Board, Square};

/// Settles every piece on `board` and returns the resulting board.
pub fn resolve_gravity(board: &Board, platforms: &Platforms) -> Board {
    resolve_gravity_with(board, platforms, |_| {})
}

/// Settles `board`, reporting the intermediate board after every row step.
///
/// Each pass sweeps the rows bottom-up and lets every unsupported piece drop
/// by one cell; whole stacks shift together because the cell below is always
/// visited first. Pass `k` only pulls from rows `k..=6`, and eight passes are
/// enough for a piece on row 0 to reach the floor.
///
/// # Arguments
///
/// * `board` - The board to settle
/// * `platforms` - The platform lanes
/// * `on_frame` - Called with the board after each row step
///
/// # Returns
///
/// * The settled board
pub fn resolve_gravity_with<F>(board: &Board, platforms: &Platforms, mut on_frame: F) -> Board
where
    F: FnMut(&Board),
{
    let mut board = *board;
    let mut drops = 0;
    for stop in 0..8 {
        for row in ((stop + 1)..8).rev() {
            for col in 0..8 {
                let below = Square::new(row, col);
                let above = below.offset(-1, 0);
                if board.is_empty(below) && !platforms.blocks(above) {
                    if let Some(piece) = board.take(above) {
                        board.set(below, Some(piece));
                        drops += 1;
                    }
                }
            }
            on_frame(&board);
        }
    }
    if drops > 0 {
        trace!("gravity settled after {} single-cell drops", drops);
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::{Platforms, PLATFORM_LOCK};
    use crate::position::{Color, Piece, PieceType};
    use proptest::prelude::*;

    fn layout(rows: &[&str]) -> Board {
        Board::from_layout(&rows.join("\n")).unwrap()
    }

    #[test]
    fn test_initial_board_is_settled() {
        let board = Board::new();
        assert_eq!(resolve_gravity(&board, &Platforms::new()), board);
    }

    #[test]
    fn test_stack_falls_to_floor_in_one_call() {
        let board = layout(&[
            "...q....",
            "...R....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        let settled = resolve_gravity(&board, &Platforms::new());
        assert_eq!(settled.get(Square::new(7, 3)), Some(Piece::new(Color::White, PieceType::Rook)));
        assert_eq!(settled.get(Square::new(6, 3)), Some(Piece::new(Color::Black, PieceType::Queen)));
        assert_eq!(settled.pieces().count(), 2);
    }

    #[test]
    fn test_platform_holds_piece_above_it() {
        let board = layout(&[
            "..N.....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        let mut platforms = Platforms::new();
        platforms.set(Square::new(3, 2), 1);
        let settled = resolve_gravity(&board, &platforms);
        assert_eq!(settled.get(Square::new(3, 2)), Some(Piece::new(Color::White, PieceType::Knight)));

        platforms.set(Square::new(3, 2), PLATFORM_LOCK);
        assert_eq!(resolve_gravity(&board, &platforms), settled);

        // A cooling-down lane does not block.
        platforms.set(Square::new(3, 2), -2);
        let settled = resolve_gravity(&board, &platforms);
        assert_eq!(settled.get(Square::new(7, 2)), Some(Piece::new(Color::White, PieceType::Knight)));
    }

    #[test]
    fn test_frames_end_on_settled_board() {
        let board = layout(&[
            "b.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        let mut frames = Vec::new();
        let settled = resolve_gravity_with(&board, &Platforms::new(), |b| frames.push(*b));
        assert_eq!(frames.len(), 28);
        assert_eq!(frames.last(), Some(&settled));
        let bishop = Some(Piece::new(Color::Black, PieceType::Bishop));
        assert_eq!(frames[0].get(Square::new(0, 0)), bishop);
        assert_eq!(frames[6].get(Square::new(1, 0)), bishop);
        assert_eq!(settled.get(Square::new(7, 0)), bishop);
    }

    fn arb_board() -> impl Strategy<Value = (Board, Platforms)> {
        (
            prop::collection::vec(prop::option::of(0usize..12), 64),
            prop::collection::vec(-4i8..=7, 64),
        )
            .prop_map(|(cells, lanes)| {
                let mut board = Board::empty();
                let mut platforms = Platforms::new();
                for (index, cell) in cells.into_iter().enumerate() {
                    let square = Square::from_index(index);
                    let piece = cell.map(|kind| {
                        let color = if kind < 6 { Color::White } else { Color::Black };
                        Piece::new(color, PieceType::ALL[kind % 6])
                    });
                    board.set(square, piece);
                    platforms.set(square, lanes[index]);
                }
                (board, platforms)
            })
    }

    proptest! {
        #[test]
        fn gravity_is_idempotent((board, platforms) in arb_board()) {
            let once = resolve_gravity(&board, &platforms);
            prop_assert_eq!(resolve_gravity(&once, &platforms), once);
        }

        #[test]
        fn gravity_keeps_piece_counts((board, platforms) in arb_board()) {
            let settled = resolve_gravity(&board, &platforms);
            prop_assert_eq!(settled.pieces().count(), board.pieces().count());
            for col in 0..8 {
                let before = (0..8).filter(|&r| board.get(Square::new(r, col)).is_some()).count();
                let after = (0..8).filter(|&r| settled.get(Square::new(r, col)).is_some()).count();
                prop_assert_eq!(before, after);
            }
        }
    }
}
