//! Repetition bookkeeping.
//!
//! A position is identified by board occupancy, the ids of pawns that may
//! capture en passant, and the four castling flags. The side to move is not
//! part of the key, so the same layout reached with either side to move
//! counts as the same position.

use std::collections::HashMap;

use crate::game_state::chess_types::{CastlingRights, PieceId, NUM_SQUARES};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub occupancy: [u8; NUM_SQUARES],
    pub en_passant_ids: Vec<PieceId>,
    pub castling: CastlingRights,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionTable {
    counts: HashMap<PositionKey, u8>,
}

impl RepetitionTable {
    /// Count one more occurrence and return the new total.
    pub fn record(&mut self, key: PositionKey) -> u8 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Forget one occurrence.
    pub fn unrecord(&mut self, key: &PositionKey) {
        if let Some(count) = self.counts.get_mut(key) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(key);
            }
        }
    }

    pub fn count(&self, key: &PositionKey) -> u8 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(castling: CastlingRights) -> PositionKey {
        PositionKey {
            occupancy: [0; NUM_SQUARES],
            en_passant_ids: Vec::new(),
            castling,
        }
    }

    #[test]
    fn castling_flags_distinguish_positions() {
        let mut table = RepetitionTable::default();
        assert_eq!(table.record(key(CastlingRights::ALL)), 1);
        assert_eq!(table.record(key(CastlingRights::ALL)), 2);
        assert_eq!(table.record(key(CastlingRights::NONE)), 1);

        table.unrecord(&key(CastlingRights::ALL));
        assert_eq!(table.count(&key(CastlingRights::ALL)), 1);
        table.unrecord(&key(CastlingRights::NONE));
        assert_eq!(table.len(), 1);
    }
}
