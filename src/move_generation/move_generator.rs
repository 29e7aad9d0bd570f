//! Result container of legal-move generation.

use std::collections::BTreeMap;

use crate::game_state::chess_types::{PieceId, PieceKind, Square};
use crate::moves::move_descriptions::Move;

/// Legal moves grouped by piece id.
///
/// Iteration follows generation order: ascending piece id, then each piece's
/// scan order. The order carries no notion of move quality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoves {
    by_piece: BTreeMap<PieceId, Vec<Move>>,
}

impl LegalMoves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PieceId, moves: Vec<Move>) {
        self.by_piece.insert(id, moves);
    }

    /// Keep only the listed pieces' moves.
    pub fn retain_pieces(&mut self, mut keep: impl FnMut(PieceId) -> bool) {
        self.by_piece.retain(|id, _| keep(*id));
    }

    pub fn moves_of_mut(&mut self, id: PieceId) -> Option<&mut Vec<Move>> {
        self.by_piece.get_mut(&id)
    }

    /// Apply a filter to every piece's list.
    pub fn retain_moves(&mut self, mut keep: impl FnMut(&Move) -> bool) {
        for moves in self.by_piece.values_mut() {
            moves.retain(|mv| keep(mv));
        }
    }

    pub fn drop_empty(&mut self) {
        self.by_piece.retain(|_, moves| !moves.is_empty());
    }

    pub fn moves_of(&self, id: PieceId) -> &[Move] {
        self.by_piece.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.by_piece.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.by_piece.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_piece.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_piece.values().all(Vec::is_empty)
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.moves_of(mv.piece).contains(mv)
    }

    /// The move matching a coordinate request, if legal.
    pub fn find(&self, from: Square, to: Square, promotion: Option<PieceKind>) -> Option<Move> {
        self.iter().find(|mv| mv.matches(from, to, promotion)).copied()
    }

    /// Moves from `from` to `to` regardless of promotion choice.
    pub fn between(&self, from: Square, to: Square) -> Vec<Move> {
        self.iter()
            .filter(|mv| mv.from == from && mv.to == to)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::LegalMoves;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::move_descriptions::Move;

    #[test]
    fn iteration_follows_piece_id_order() {
        let mut legal = LegalMoves::new();
        legal.insert(14, vec![Move::quiet(14, PieceKind::Pawn, Color::Light, 14, 22)]);
        legal.insert(1, vec![Move::quiet(1, PieceKind::Knight, Color::Light, 1, 16)]);
        legal.insert(6, Vec::new());

        let pieces: Vec<_> = legal.iter().map(|m| m.piece).collect();
        assert_eq!(pieces, vec![1, 14]);
        assert_eq!(legal.len(), 2);

        legal.drop_empty();
        assert_eq!(legal.pieces().collect::<Vec<_>>(), vec![1, 14]);
        assert!(legal.find(1, 16, None).is_some());
        assert!(legal.find(1, 18, None).is_none());
    }
}
