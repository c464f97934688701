use bitflags::bitflags;
use std::fmt;

use crate::error::LayoutError;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black
}
use Color::*;

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            White => Black,
            Black => White,
        }
    }

    pub fn index(self) -> usize {
        match self {
            White => 0,
            Black => 1,
        }
    }

    /// Step along `col` taken by this color's pawns.
    pub fn pawn_direction(self) -> i32 {
        match self {
            White => 1,
            Black => -1,
        }
    }

    /// The `col` holding this color's back pieces at the start of the game.
    pub fn home_col(self) -> i32 {
        match self {
            White => 0,
            Black => 7,
        }
    }

    /// The `col` this color's pawns start on.
    pub fn pawn_col(self) -> i32 {
        match self {
            White => 1,
            Black => 6,
        }
    }

    /// The `col` a pawn of this color promotes on.
    pub fn promotion_col(self) -> i32 {
        match self {
            White => 7,
            Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            White => write!(f, "White"),
            Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
    ];

    /// The pieces a pawn may turn into.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    pub fn index(self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Rook => 1,
            PieceType::Knight => 2,
            PieceType::Bishop => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        }
    }

    /// Parses a piece letter in either case.
    pub fn from_letter(letter: char) -> Option<PieceType> {
        let letter = letter.to_ascii_lowercase();
        PieceType::ALL.into_iter().find(|piece_type| piece_type.letter() == letter)
    }

    fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }
}

bitflags! {
    pub struct PieceFlags: u8 {
        const HAS_MOVED = 1 << 0;
        const JUST_DOUBLE_MOVED = 1 << 1;
    }
}

/// A piece on the board.
///
/// Two pieces compare equal when color and type match; the flags are per-piece
/// bookkeeping and play no part in counting material.
#[derive(Debug, Copy, Clone)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
    pub flags: PieceFlags,
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color && self.piece_type == other.piece_type
    }
}

impl Eq for Piece {}

impl Piece {
    pub fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { color, piece_type, flags: PieceFlags::empty() }
    }

    pub fn has_moved(&self) -> bool {
        self.flags.contains(PieceFlags::HAS_MOVED)
    }

    pub fn just_double_moved(&self) -> bool {
        self.flags.contains(PieceFlags::JUST_DOUBLE_MOVED)
    }

    /// Layout letter: upper case for White, lower case for Black.
    pub fn to_char(&self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            White => letter.to_ascii_uppercase(),
            Black => letter,
        }
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        let piece_type = PieceType::from_letter(ch)?;
        let color = if ch.is_ascii_uppercase() { White } else { Black };
        Some(Piece::new(color, piece_type))
    }
}

/// A board coordinate.
///
/// `row` is the gravity axis (pieces fall toward row 7) and `col` is the axis
/// pawns advance along. Coordinates outside `0..8` are representable and refer
/// to a square that does not exist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    pub const fn new(row: i32, col: i32) -> Square {
        Square { row, col }
    }

    pub fn is_on_board(self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    pub fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some((self.row * 8 + self.col) as usize)
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Square {
        Square::new((index / 8) as i32, (index % 8) as i32)
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Square {
        Square::new(self.row + d_row, self.col + d_col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a coordinate refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareState {
    Invalid,
    Empty,
    Occupied(Color),
}

/// An 8x8 grid of optional pieces, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// The starting position: every row holds one White back piece, a White
    /// pawn, a Black pawn and a Black back piece.
    pub fn new() -> Board {
        use PieceType::*;
        const BACK: [PieceType; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for (row, back) in BACK.iter().enumerate() {
            let row = row as i32;
            board.set(Square::new(row, White.home_col()), Some(Piece::new(White, *back)));
            board.set(Square::new(row, White.pawn_col()), Some(Piece::new(White, Pawn)));
            board.set(Square::new(row, Black.pawn_col()), Some(Piece::new(Black, Pawn)));
            board.set(Square::new(row, Black.home_col()), Some(Piece::new(Black, *back)));
        }
        board
    }

    pub fn empty() -> Board {
        Board { squares: [[None; 8]; 8] }
    }

    /// Reads a board from 8 lines of 8 cells, row 0 first.
    ///
    /// `.` marks an empty cell, `KQRBNP` White pieces and `kqrbnp` Black ones.
    /// Blank lines and surrounding whitespace are ignored. Pieces start with
    /// no flags set.
    pub fn from_layout(layout: &str) -> Result<Board, LayoutError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != 8 {
            return Err(LayoutError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != 8 {
                return Err(LayoutError::RowLength { row, len: cells.len() });
            }
            for (col, ch) in cells.into_iter().enumerate() {
                if ch == '.' {
                    continue;
                }
                let piece = Piece::from_char(ch).ok_or(LayoutError::UnknownPiece { row, col, ch })?;
                board.squares[row][col] = Some(piece);
            }
        }
        Ok(board)
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        if square.is_on_board() {
            self.squares[square.row as usize][square.col as usize]
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, square: Square) -> Option<&mut Piece> {
        if square.is_on_board() {
            self.squares[square.row as usize][square.col as usize].as_mut()
        } else {
            None
        }
    }

    /// Writes a cell. Writes to off-board squares are ignored.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if square.is_on_board() {
            self.squares[square.row as usize][square.col as usize] = piece;
        }
    }

    pub fn take(&mut self, square: Square) -> Option<Piece> {
        if square.is_on_board() {
            self.squares[square.row as usize][square.col as usize].take()
        } else {
            None
        }
    }

    pub fn state(&self, square: Square) -> SquareState {
        if !square.is_on_board() {
            return SquareState::Invalid;
        }
        match self.get(square) {
            None => SquareState::Empty,
            Some(piece) => SquareState::Occupied(piece.color),
        }
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.state(square) == SquareState::Empty
    }

    /// Iterates over every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..64).filter_map(move |index| {
            let square = Square::from_index(index);
            self.get(square).map(|piece| (square, piece))
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceType::King);
        self.pieces()
            .find(|(_, piece)| *piece == king)
            .map(|(square, _)| square)
    }

    /// Number of pieces equal to `piece` (color and type).
    pub fn count_piece(&self, piece: Piece) -> usize {
        self.pieces().filter(|(_, p)| *p == piece).count()
    }

    /// Number of pieces of `piece_type`, either color.
    pub fn count_type(&self, piece_type: PieceType) -> usize {
        self.pieces().filter(|(_, p)| p.piece_type == piece_type).count()
    }

    /// Clears `JUST_DOUBLE_MOVED` on every piece of `color`.
    pub fn clear_double_moves(&mut self, color: Color) {
        for row in self.squares.iter_mut() {
            for piece in row.iter_mut().flatten() {
                if piece.color == color {
                    piece.flags.remove(PieceFlags::JUST_DOUBLE_MOVED);
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.squares.iter() {
            for cell in row.iter() {
                let ch = match cell {
                    Some(piece) => piece.to_char(),
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
