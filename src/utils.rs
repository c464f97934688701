//! Utility functions for square sets.
//!
//! Move sets are reported as bitboards: bit `row * 8 + col` is set when the
//! square `(row, col)` belongs to the set. This module holds the helpers for
//! building, scanning and printing them.

use crate::position::Square;

/// Type alias for a 64-bit integer representing a set of board squares
pub type Bitboard = u64;

/// Returns the bitboard holding only `square`.
///
/// Off-board squares map to the empty set, so they can never end up in a
/// generated move set.
///
/// # Arguments
///
/// * `square` - The square to convert
///
/// # Returns
///
/// * A bitboard with the bit for `square` set, or `0`
pub fn square_bit(square: Square) -> Bitboard {
    match square.index() {
        Some(index) => 1 << index,
        None => 0,
    }
}

/// Returns true if `square` belongs to `bitboard`.
pub fn contains(bitboard: Bitboard, square: Square) -> bool {
    bitboard & square_bit(square) != 0
}

/// Finds the index of the least significant set bit in a bitboard.
///
/// # Arguments
///
/// * `bitboard` - The bitboard to scan
///
/// # Returns
///
/// * The index of the least significant set bit, `0` for an empty board
pub fn bit_scan(bitboard: Bitboard) -> usize {
    match bit_scan_safe(bitboard) {
        Some(index) => index,
        None => 0
    }
}

/// Safe version of bit_scan that returns an Option
pub fn bit_scan_safe(bitboard: Bitboard) -> Option<usize> {
    if bitboard == 0 {
        None
    } else {
        Some(bitboard.trailing_zeros() as usize)
    }
}

/// Extracts all set bits from a bitboard into a vector of square indices.
pub fn extract_bits(mut bitboard: Bitboard) -> Vec<usize> {
    let mut bits = Vec::new();
    while bitboard != 0 {
        let lsb = bit_scan(bitboard);
        bits.push(lsb);
        bitboard &= !(1 << lsb);
    }
    bits
}

/// Extracts all squares of a bitboard, in row-major order.
pub fn extract_squares(bitboard: Bitboard) -> Vec<Square> {
    extract_bits(bitboard)
        .into_iter()
        .map(Square::from_index)
        .collect()
}

/// Renders a bitboard as an 8x8 grid of `x` and `.`, row 0 first.
///
/// Columns run left to right, matching the layout notation used by
/// [`crate::position::Board::from_layout`].
pub fn format_bitboard(bitboard: Bitboard) -> String {
    let mut out = String::with_capacity(72);
    for row in 0..8 {
        for col in 0..8 {
            let bit = (bitboard >> (row * 8 + col)) & 1;
            out.push(if bit == 1 { 'x' } else { '.' });
        }
        out.push('\n');
    }
    out
}
