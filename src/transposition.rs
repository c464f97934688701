//! Memo table for legal-move queries.
//!
//! Legal moves are a pure function of the position, the platform blockers,
//! the queried square and the mover, so results can be cached under the
//! Zobrist hash of that query and reused until the position changes.

use crate::utils::Bitboard;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LegalMoveEntry {
    pub hash: u64,        // Zobrist hash of the query
    pub moves: Bitboard,  // Legal destinations
}

#[derive(Clone, Debug)]
pub struct LegalMoveTable {
    table: Vec<Option<LegalMoveEntry>>,
    size: usize,
    hits: u64,
    misses: u64,
}

impl LegalMoveTable {
    /// Creates a table with room for `entries` results (at least one).
    pub fn new(entries: usize) -> Self {
        let size = entries.max(1);
        LegalMoveTable {
            table: vec![None; size],
            size,
            hits: 0,
            misses: 0,
        }
    }

    /// Stores a result, always replacing whatever shared its slot.
    pub fn store(&mut self, hash: u64, moves: Bitboard) {
        let index = self.get_index(hash);
        self.table[index] = Some(LegalMoveEntry { hash, moves });
    }

    pub fn probe(&mut self, hash: u64) -> Option<Bitboard> {
        let index = self.get_index(hash);
        match self.table[index] {
            Some(entry) if entry.hash == hash => {
                self.hits += 1;
                Some(entry.moves)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.table.fill(None);
        self.hits = 0;
        self.misses = 0;
    }

    /// Returns `(hits, misses)` since creation or the last clear.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn capacity(&self) -> usize {
        self.size
    }

    fn get_index(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_probe() {
        let mut table = LegalMoveTable::new(1024);
        let hash = 123456789;
        table.store(hash, 0x1234);
        assert_eq!(table.probe(hash), Some(0x1234));
        assert_eq!(table.probe(hash + 1), None);
        assert_eq!(table.stats(), (1, 1));
    }

    #[test]
    fn test_colliding_store_replaces() {
        let mut table = LegalMoveTable::new(16);
        table.store(3, 0x1);
        table.store(19, 0x2);
        assert_eq!(table.probe(3), None);
        assert_eq!(table.probe(19), Some(0x2));
    }

    #[test]
    fn test_zero_entries_still_usable() {
        let mut table = LegalMoveTable::new(0);
        assert_eq!(table.capacity(), 1);
        table.store(u64::MAX, 7);
        assert_eq!(table.probe(u64::MAX), Some(7));
    }

    #[test]
    fn test_clear() {
        let mut table = LegalMoveTable::new(8);
        table.store(5, 0xFF);
        table.probe(5);
        table.clear();
        assert_eq!(table.stats(), (0, 0));
        assert_eq!(table.probe(5), None);
    }
}
