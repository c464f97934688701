use crate::platforms::Platforms;
use crate::position::{Board, Color, Piece, Square};
use rand::prelude::*;

/// Random keys for hashing everything a legal-move query depends on.
///
/// Platform counters only matter to move generation through whether they
/// hold a piece up, so a lane contributes its key only while it blocks.
#[derive(Clone, Debug)]
pub struct Zobrist {
    piece_square: [[u64; 64]; 12], // 6 pieces * 2 colors * 64 squares
    has_moved: [u64; 64],
    just_double_moved: [u64; 64],
    platform_blocker: [u64; 64],
    black_to_move: u64,
    query_square: [u64; 64],
}

impl Default for Zobrist {
    fn default() -> Self {
        Self::new()
    }
}

impl Zobrist {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0xDEADBEEF); // Fixed seed for reproducibility
        let mut z = Zobrist {
            piece_square: [[0; 64]; 12],
            has_moved: [0; 64],
            just_double_moved: [0; 64],
            platform_blocker: [0; 64],
            black_to_move: rng.gen(),
            query_square: [0; 64],
        };

        for keys in z.piece_square.iter_mut() {
            for key in keys.iter_mut() {
                *key = rng.gen();
            }
        }
        for square in 0..64 {
            z.has_moved[square] = rng.gen();
            z.just_double_moved[square] = rng.gen();
            z.platform_blocker[square] = rng.gen();
            z.query_square[square] = rng.gen();
        }

        z
    }

    /// Hashes the pieces, their flags and the blocking lanes.
    pub fn hash_position(&self, board: &Board, platforms: &Platforms) -> u64 {
        let mut hash = 0;

        for index in 0..64 {
            let square = Square::from_index(index);
            if let Some(piece) = board.get(square) {
                hash ^= self.piece_square[piece_index(piece)][index];
                if piece.has_moved() {
                    hash ^= self.has_moved[index];
                }
                if piece.just_double_moved() {
                    hash ^= self.just_double_moved[index];
                }
            }
            if platforms.blocks(square) {
                hash ^= self.platform_blocker[index];
            }
        }

        hash
    }

    /// Hashes a legal-move query: the position plus the moving square and color.
    pub fn hash_query(&self, board: &Board, platforms: &Platforms, from: Square, mover: Color) -> u64 {
        let mut hash = self.hash_position(board, platforms);
        if let Some(index) = from.index() {
            hash ^= self.query_square[index];
        }
        if mover == Color::Black {
            hash ^= self.black_to_move;
        }
        hash
    }
}

fn piece_index(piece: Piece) -> usize {
    piece.piece_type.index() * 2 + piece.color.index()
}
