//! Incrementally maintained attack/move-board index.
//!
//! For every square the index holds the annotations every on-board piece
//! contributes to it, for both colors. Each piece also keeps the exact list of
//! `(square, annotation)` pairs it added, its cached pseudo-legal moves, and
//! at most one pin (pinning slider -> pinned piece).
//!
//! Invariant: a piece outside the dirty set has entries equal to a fresh scan
//! of the current board. A scan reads only the squares it annotates, so after
//! a mutation the pieces that may need a new scan are exactly those holding an
//! annotation on a changed square, plus the pieces that moved, were captured
//! or changed kind, plus pawns whose en-passant window may have opened or
//! closed.

use std::collections::BTreeMap;

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{Annotation, PieceScan};
use crate::move_generation::legal_moves_bishop::scan_bishop;
use crate::move_generation::legal_moves_king::scan_king;
use crate::move_generation::legal_moves_knight::scan_knight;
use crate::move_generation::legal_moves_pawn::scan_pawn;
use crate::move_generation::legal_moves_queen::scan_queen;
use crate::move_generation::legal_moves_rook::scan_rook;
use crate::moves::move_descriptions::Move;

/// Scan one piece by kind. Off-board pieces produce an empty scan.
pub fn scan_piece(board: &Board, id: PieceId) -> PieceScan {
    let piece = board.piece(id);
    let mut scan = PieceScan::default();
    if !piece.is_on_board() {
        return scan;
    }

    match piece.kind {
        PieceKind::Pawn => scan_pawn(board, piece, &mut scan),
        PieceKind::Knight => scan_knight(board, piece, &mut scan),
        PieceKind::Bishop => scan_bishop(board, piece, &mut scan),
        PieceKind::Rook => scan_rook(board, piece, &mut scan),
        PieceKind::Queen => scan_queen(board, piece, &mut scan),
        PieceKind::King => scan_king(board, piece, &mut scan),
    }
    scan
}

#[derive(Debug, Clone)]
pub struct AttackIndex {
    move_board: Vec<Vec<Annotation>>,
    entries: Vec<Vec<(Square, Annotation)>>,
    pseudo_moves: Vec<Vec<Move>>,
    pins: BTreeMap<PieceId, PieceId>,
    dirty: [bool; NUM_PIECES],
}

impl Default for AttackIndex {
    fn default() -> Self {
        Self {
            move_board: vec![Vec::new(); NUM_SQUARES],
            entries: vec![Vec::new(); NUM_PIECES],
            pseudo_moves: vec![Vec::new(); NUM_PIECES],
            pins: BTreeMap::new(),
            dirty: [false; NUM_PIECES],
        }
    }
}

impl AttackIndex {
    /// Index built by scanning every piece.
    pub fn build(board: &Board) -> Self {
        let mut index = Self::default();
        index.rebuild(board);
        index
    }

    /// Discard everything and rescan all pieces.
    pub fn rebuild(&mut self, board: &Board) {
        *self = Self::default();
        self.dirty = [true; NUM_PIECES];
        self.refresh(board);
    }

    /// Record that the contents of `changed` squares differ from the last
    /// scan, and that `touched` pieces moved, were captured or promoted.
    pub fn mark_changed(&mut self, board: &Board, changed: &[Square], touched: &[PieceId]) {
        for &square in changed {
            for annotation in &self.move_board[square as usize] {
                self.dirty[annotation.id as usize] = true;
            }
        }
        for &id in touched {
            self.dirty[id as usize] = true;
        }

        // En-passant availability depends on the ply, not only on squares.
        for piece in board.pieces() {
            if piece.kind == PieceKind::Pawn {
                if let Some(square) = piece.square {
                    if rank_of(square) == piece.color.en_passant_rank() {
                        self.dirty[piece.id as usize] = true;
                    }
                }
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.dirty.iter().all(|d| !d)
    }

    /// Rescan every dirty piece, in ascending id order.
    pub fn refresh(&mut self, board: &Board) {
        let mut rescanned = 0usize;
        for idx in 0..NUM_PIECES {
            if !self.dirty[idx] {
                continue;
            }
            self.dirty[idx] = false;
            let id = idx as PieceId;

            self.remove_entries(id);
            let scan = scan_piece(board, id);
            self.insert_scan(id, scan);
            rescanned += 1;
        }
        trace!(rescanned, "attack index refreshed");
    }

    fn remove_entries(&mut self, id: PieceId) {
        let old = std::mem::take(&mut self.entries[id as usize]);
        for (square, annotation) in old {
            let slot = &mut self.move_board[square as usize];
            if let Some(pos) = slot.iter().position(|a| *a == annotation) {
                slot.remove(pos);
            }
        }
        self.pins.remove(&id);
        self.pseudo_moves[id as usize].clear();
    }

    fn insert_scan(&mut self, id: PieceId, scan: PieceScan) {
        for &(square, annotation) in &scan.annotations {
            self.move_board[square as usize].push(annotation);
        }
        self.entries[id as usize] = scan.annotations;
        self.pseudo_moves[id as usize] = scan.moves;
        if let Some(pinned) = scan.pinned {
            self.pins.insert(id, pinned);
        }
    }

    #[inline]
    pub fn annotations_at(&self, square: Square) -> &[Annotation] {
        &self.move_board[square as usize]
    }

    #[inline]
    pub fn entries_of(&self, id: PieceId) -> &[(Square, Annotation)] {
        &self.entries[id as usize]
    }

    #[inline]
    pub fn pseudo_moves(&self, id: PieceId) -> &[Move] {
        &self.pseudo_moves[id as usize]
    }

    /// Pinning slider id -> pinned piece id.
    pub fn pins(&self) -> &BTreeMap<PieceId, PieceId> {
        &self.pins
    }

    /// Slider pinning `pinned`, if any.
    pub fn pinner_of(&self, pinned: PieceId) -> Option<PieceId> {
        self.pins
            .iter()
            .find(|(_, target)| **target == pinned)
            .map(|(pinner, _)| *pinner)
    }

    /// Does any `by` piece control `square` (attack it, or defend an ally
    /// standing on it)?
    pub fn is_controlled_by(&self, board: &Board, square: Square, by: Color) -> bool {
        self.annotations_at(square)
            .iter()
            .any(|a| a.controls() && board.piece(a.id).color == by)
    }

    /// Order-independent view of the whole index, for comparing an
    /// incrementally maintained index with a rebuilt one.
    pub fn snapshot(&self) -> IndexSnapshot {
        let move_board = self
            .move_board
            .iter()
            .map(|slot| {
                let mut sorted = slot.clone();
                sorted.sort_unstable();
                sorted
            })
            .collect();
        IndexSnapshot {
            move_board,
            entries: self.entries.clone(),
            pseudo_moves: self.pseudo_moves.clone(),
            pins: self.pins.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSnapshot {
    pub move_board: Vec<Vec<Annotation>>,
    pub entries: Vec<Vec<(Square, Annotation)>>,
    pub pseudo_moves: Vec<Vec<Move>>,
    pub pins: BTreeMap<PieceId, PieceId>,
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::AttackIndex;
    use crate::game_state::game_state::GameState;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_has_no_pins_and_twenty_pseudo_moves_for_light() {
        let game = GameState::new_game();
        let index = AttackIndex::build(&game.board);
        assert!(index.pins().is_empty());
        let light_moves: usize = (0..16).map(|id| index.pseudo_moves(id).len()).sum();
        assert_eq!(light_moves, 20);
    }

    #[test]
    fn pin_is_recorded_for_the_slider() {
        let game = parse_fen("4r2k/8/8/8/4B3/8/8/4K3 w - - 0 1").expect("fixture FEN should parse");
        let index = AttackIndex::build(&game.board);
        let rook = game.board.id_at(60).expect("rook on e8");
        let bishop = game.board.id_at(28).expect("bishop on e4");
        assert_eq!(index.pins().get(&rook), Some(&bishop));
        assert_eq!(index.pinner_of(bishop), Some(rook));
    }

    #[test]
    fn incremental_index_matches_rebuild_along_random_games() {
        let mut rng = StdRng::seed_from_u64(0x5AB1E);

        for _game in 0..8 {
            let mut game = GameState::new_game();
            for _ply in 0..60 {
                let moves: Vec<_> = game.legal_moves().iter().copied().collect();
                if moves.is_empty() {
                    break;
                }
                let mv = moves[rng.random_range(0..moves.len())];
                game.make_move(mv);

                let rebuilt = AttackIndex::build(&game.board);
                assert_eq!(game.attack_index().snapshot(), rebuilt.snapshot());
            }

            while game.unmake_move().is_some() {
                let rebuilt = AttackIndex::build(&game.board);
                assert_eq!(game.attack_index().snapshot(), rebuilt.snapshot());
            }
        }
    }
}
