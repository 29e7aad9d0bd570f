//! Rules layer of one live game.
//!
//! `GameState` owns the board, the attack index, castling flags, clocks, the
//! repetition table and the undo stack. `make_move` and `unmake_move` are
//! exact inverses; after either one the index is refreshed, the legal moves of
//! the side to move are regenerated, and the game status is reclassified.

use tracing::debug;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castling_rook_id, FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};
use crate::game_state::chess_types::*;
use crate::game_state::game_status::{is_insufficient_material, DrawReason, GameStatus};
use crate::game_state::position_key::{PositionKey, RepetitionTable};
use crate::game_state::undo_state::UndoState;
use crate::move_generation::attack_index::AttackIndex;
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::legal_move_checks::checkers_of;
use crate::move_generation::legal_move_generator::{generate_legal_moves, legal_moves_from_index};
use crate::move_generation::move_generator::LegalMoves;
use crate::moves::move_descriptions::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::parse_coordinate_move;

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    index: AttackIndex,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub in_check: bool,
    pub double_check: bool,
    status: GameStatus,
    legal_moves: LegalMoves,

    repetitions: RepetitionTable,
    undo_stack: Vec<UndoState>,
}

impl GameState {
    /// Standard starting position, Light to move.
    pub fn new_game() -> Self {
        Self::from_setup(Board::starting_position(), Color::Light, CastlingRights::ALL, 0, 1)
    }

    /// Game starting from an arbitrary arrangement. The setup position counts
    /// as the first occurrence for repetition purposes.
    pub fn from_setup(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let index = AttackIndex::build(&board);
        let mut game = Self {
            board,
            index,
            side_to_move,
            castling_rights,
            halfmove_clock,
            fullmove_number,
            in_check: false,
            double_check: false,
            status: GameStatus::ToMove(side_to_move),
            legal_moves: LegalMoves::new(),
            repetitions: RepetitionTable::default(),
            undo_stack: Vec::new(),
        };

        game.regenerate();
        let repeats = game.repetitions.record(game.position_key());
        game.status = game.classify(repeats);
        game
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Apply a move drawn from `legal_moves()`.
    pub fn make_move(&mut self, mv: Move) {
        debug_assert!(self.legal_moves.contains(&mv), "make_move called with a move outside the legal set");

        let prev_castling_rights = self.castling_rights;
        let prev_halfmove_clock = self.halfmove_clock;
        let prev_fullmove_number = self.fullmove_number;

        let board_undo = apply_move(&mut self.board, &mv);
        self.revoke_castling_rights(&mv);

        self.halfmove_clock = if mv.resets_halfmove_clock() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if mv.color == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = mv.color.opposite();

        let (changed, touched) = footprint(&mv);
        self.index.mark_changed(&self.board, &changed, &touched);
        self.regenerate();

        let reached_key = self.position_key();
        let repeats = self.repetitions.record(reached_key.clone());
        self.status = self.classify(repeats);

        self.undo_stack.push(UndoState {
            mv,
            board_undo,
            prev_castling_rights,
            prev_halfmove_clock,
            prev_fullmove_number,
            reached_key,
        });

        debug!(ply = self.board.ply, from = mv.from, to = mv.to, status = ?self.status, "move made");
    }

    /// Undo the most recent move. Returns `None` when the history is empty.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let undo = self.undo_stack.pop()?;
        let mv = undo.mv;

        self.repetitions.unrecord(&undo.reached_key);
        revert_move(&mut self.board, &mv, &undo.board_undo);

        self.castling_rights = undo.prev_castling_rights;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.side_to_move = mv.color;

        let (changed, touched) = footprint(&mv);
        self.index.mark_changed(&self.board, &changed, &touched);
        self.regenerate();

        let repeats = self.repetitions.count(&self.position_key());
        self.status = self.classify(repeats);

        debug!(ply = self.board.ply, from = mv.from, to = mv.to, "move unmade");
        Some(mv)
    }

    /// Legal moves of the side to move.
    #[inline]
    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal_moves
    }

    /// Legal moves of either color in the current position.
    pub fn generate_moves(&self, color: Color) -> LegalMoves {
        if color == self.side_to_move {
            return self.legal_moves.clone();
        }
        legal_moves_from_index(&self.board, &self.index, &self.castling_rights, color)
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    #[inline]
    pub fn attack_index(&self) -> &AttackIndex {
        &self.index
    }

    /// Moves that can still be undone, oldest first.
    pub fn move_history(&self) -> Vec<Move> {
        self.undo_stack.iter().map(|undo| undo.mv).collect()
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Drop the undo stack. The position and its repetition counts stay.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
    }

    /// Occurrences of the current position so far, this one included.
    pub fn repetition_count(&self) -> u8 {
        self.repetitions.count(&self.position_key())
    }

    pub fn repetitions(&self) -> &RepetitionTable {
        &self.repetitions
    }

    /// Look up a legal move by coordinates.
    pub fn find_move(&self, from: Square, to: Square, promotion: Option<PieceKind>) -> ChessResult<Move> {
        self.legal_moves
            .find(from, to, promotion)
            .ok_or(ChessErrors::IllegalMove { from, to, promotion })
    }

    /// Play coordinate moves such as `"e2e4"` or `"e7e8q"`.
    pub fn play_coordinates(&mut self, moves: &[&str]) -> ChessResult<()> {
        for text in moves {
            let (from, to, promotion) = parse_coordinate_move(text)?;
            let mv = self.find_move(from, to, promotion)?;
            self.make_move(mv);
        }
        Ok(())
    }

    /// Rebuild a game from the starting position by replaying `moves`.
    pub fn replay(moves: &[Move]) -> ChessResult<Self> {
        let mut game = Self::new_game();
        for mv in moves {
            if !game.legal_moves.contains(mv) {
                return Err(ChessErrors::IllegalMove {
                    from: mv.from,
                    to: mv.to,
                    promotion: mv.promotion,
                });
            }
            game.make_move(*mv);
        }
        Ok(game)
    }

    fn regenerate(&mut self) {
        self.legal_moves = generate_legal_moves(
            &self.board,
            &mut self.index,
            &self.castling_rights,
            self.side_to_move,
        );
        let checkers = checkers_of(&self.board, self.side_to_move);
        self.in_check = !checkers.is_empty();
        self.double_check = checkers.len() >= 2;
    }

    fn position_key(&self) -> PositionKey {
        let mut en_passant_ids: Vec<PieceId> = self
            .legal_moves
            .iter()
            .filter(|mv| mv.is_en_passant())
            .map(|mv| mv.piece)
            .collect();
        en_passant_ids.dedup();

        PositionKey {
            occupancy: self.board.occupancy_codes(),
            en_passant_ids,
            castling: self.castling_rights,
        }
    }

    fn classify(&self, repeats: u8) -> GameStatus {
        let side = self.side_to_move;
        if self.legal_moves.is_empty() {
            if self.in_check {
                GameStatus::Checkmate {
                    winner: side.opposite(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else if repeats >= REPETITION_LIMIT {
            GameStatus::Draw(DrawReason::Repetition)
        } else if self.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
            GameStatus::Draw(DrawReason::FiftyMove)
        } else if is_insufficient_material(&self.board) {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else if self.in_check {
            GameStatus::Check(side)
        } else {
            GameStatus::ToMove(side)
        }
    }

    /// Rights are lost for good when the king or a castling rook moves, or
    /// when a castling rook is captured.
    fn revoke_castling_rights(&mut self, mv: &Move) {
        if mv.kind == PieceKind::King {
            self.castling_rights.revoke_all(mv.color);
        }
        let captured = mv.capture.map(|c| c.id);
        for color in [Color::Light, Color::Dark] {
            for is_short in [true, false] {
                let rook = castling_rook_id(color, is_short);
                if mv.piece == rook || captured == Some(rook) {
                    self.castling_rights.revoke(color, is_short);
                }
            }
        }
    }
}

/// Squares whose contents a move changes, and the pieces it touches.
fn footprint(mv: &Move) -> (Vec<Square>, Vec<PieceId>) {
    let mut changed = vec![mv.from, mv.to];
    let mut touched = vec![mv.piece];

    if let Some(capture) = mv.capture {
        if capture.square != mv.to {
            changed.push(capture.square);
        }
        touched.push(capture.id);
    }
    if let Some(castle) = mv.castle {
        changed.push(castle.rook_from);
        changed.push(castle.rook_to);
        touched.push(castle.rook);
    }
    (changed, touched)
}
