//! Session-level driver of one game.
//!
//! The controller validates user and AI requests against the legal-move set,
//! applies them to its `GameState`, and reports what happened through a
//! `GameEventSink`. Requests that do not apply to the current phase return an
//! error and leave the session untouched.
//!
//! Once a terminal state is reached the undo history is dropped: further undo
//! returns `NothingToUndo` and further moves return `GameOver`. The full move
//! record is kept for replay and PGN export.

use tracing::{info, warn};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::{Engine, SearchParams};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Square};
use crate::game_state::game_events::{GameEvent, GameEventSink, NullSink};
use crate::game_state::game_state::GameState;
use crate::game_state::game_status::GameStatus;
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::move_to_coordinates;
use crate::utils::pgn::write_pgn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Applied(Move),
    /// The move reaches the last rank; call `resolve_promotion`.
    PromotionChoiceNeeded { square: Square },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPromotion {
    from: Square,
    to: Square,
}

pub struct GameController<S: GameEventSink = NullSink> {
    game: GameState,
    initial: GameState,
    record: Vec<Move>,
    pending_promotion: Option<PendingPromotion>,
    checked_side: Option<Color>,
    engine: Box<dyn Engine>,
    sink: S,
}

impl Default for GameController<NullSink> {
    fn default() -> Self {
        Self::new(NullSink)
    }
}

impl<S: GameEventSink> GameController<S> {
    /// Controller at the standard start, playing AI moves with the default
    /// minimax engine.
    pub fn new(sink: S) -> Self {
        Self::with_engine(sink, Box::new(MinimaxEngine::default()))
    }

    pub fn with_engine(sink: S, engine: Box<dyn Engine>) -> Self {
        let game = GameState::new_game();
        Self {
            initial: game.clone(),
            game,
            record: Vec::new(),
            pending_promotion: None,
            checked_side: None,
            engine,
            sink,
        }
    }

    /// Reset to the standard starting position, Light to move.
    pub fn start_game(&mut self) {
        self.start_game_with(Color::Light);
    }

    /// Reset to the standard starting arrangement with `side_to_move` to play
    /// first.
    pub fn start_game_with(&mut self, side_to_move: Color) {
        let game = if side_to_move == Color::Light {
            GameState::new_game()
        } else {
            GameState::from_setup(Board::starting_position(), side_to_move, CastlingRights::ALL, 0, 1)
        };
        self.reset(game);
    }

    /// Reset to an arbitrary position.
    pub fn start_from_fen(&mut self, fen: &str) -> ChessResult<()> {
        let game = GameState::from_fen(fen)?;
        self.reset(game);
        Ok(())
    }

    fn reset(&mut self, game: GameState) {
        self.checked_side = game.in_check.then_some(game.side_to_move);
        self.initial = game.clone();
        self.game = game;
        self.record.clear();
        self.pending_promotion = None;
        self.engine.new_game();
        info!(fen = %self.game.get_fen(), "game started");
    }

    /// Apply a move requested by the user.
    ///
    /// A pawn move to the last rank without `promotion` does not move
    /// anything yet: it reports `PromotionChoiceNeeded` and blocks other
    /// input until `resolve_promotion` is called.
    pub fn apply_user_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveOutcome> {
        self.ensure_accepting_moves()?;

        if promotion.is_none() {
            let candidates = self.game.legal_moves().between(from, to);
            if !candidates.is_empty() && candidates.iter().all(|mv| mv.promotion.is_some()) {
                self.pending_promotion = Some(PendingPromotion { from, to });
                self.sink.on_event(&GameEvent::PromotionChoiceNeeded { square: to });
                info!(from, to, "promotion choice needed");
                return Ok(MoveOutcome::PromotionChoiceNeeded { square: to });
            }
        }

        let mv = self.game.find_move(from, to, promotion).inspect_err(|err| {
            warn!(%err, "user move rejected");
        })?;
        self.commit(mv);
        Ok(MoveOutcome::Applied(mv))
    }

    /// Complete a pending promotion with the chosen piece.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> ChessResult<Move> {
        let pending = self.pending_promotion.ok_or(ChessErrors::NoPromotionPending)?;
        let mv = self
            .game
            .find_move(pending.from, pending.to, Some(kind))
            .inspect_err(|err| warn!(%err, "promotion choice rejected"))?;

        self.pending_promotion = None;
        self.commit(mv);
        Ok(mv)
    }

    /// Search for and play a move for `color`.
    pub fn request_ai_move(&mut self, color: Color, depth: u8) -> ChessResult<Move> {
        self.ensure_accepting_moves()?;
        if color != self.game.side_to_move {
            warn!(?color, "ai move requested for the side not on move");
            return Err(ChessErrors::WrongSideToMove { requested: color });
        }

        let params = SearchParams {
            depth: Some(depth),
            ..SearchParams::default()
        };
        let output = self.engine.choose_move(&mut self.game, &params)?;
        let mv = output.best_move.ok_or(ChessErrors::NoLegalMoves)?;

        info!(engine = self.engine.name(), mv = %move_to_coordinates(&mv), "ai move chosen");
        self.commit(mv);
        Ok(mv)
    }

    /// Take back the most recent move.
    pub fn undo_last_move(&mut self) -> ChessResult<Move> {
        if let Some(pending) = self.pending_promotion {
            return Err(ChessErrors::PromotionPending { square: pending.to });
        }
        let mv = self.game.unmake_move().ok_or(ChessErrors::NothingToUndo)?;
        self.record.pop();

        self.sink.on_event(&GameEvent::MoveUndone(mv));
        self.report_check_change();
        info!(mv = %move_to_coordinates(&mv), "move undone");
        Ok(mv)
    }

    /// Replace the engine used for AI moves.
    pub fn set_engine(&mut self, engine: Box<dyn Engine>) {
        self.engine = engine;
    }

    pub fn set_engine_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        self.engine.set_option(name, value)
    }

    pub fn state(&self) -> &GameState {
        &self.game
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.game.legal_moves().iter().copied().collect()
    }

    /// Every move played since the game started, oldest first.
    pub fn record(&self) -> &[Move] {
        &self.record
    }

    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }

    pub fn pending_promotion_square(&self) -> Option<Square> {
        self.pending_promotion.map(|p| p.to)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn pgn(&self) -> ChessResult<String> {
        write_pgn(&self.initial, &self.record, self.game.status().result_token())
    }

    fn ensure_accepting_moves(&self) -> ChessResult<()> {
        if let Some(pending) = self.pending_promotion {
            warn!(square = pending.to, "input refused while promotion is pending");
            return Err(ChessErrors::PromotionPending { square: pending.to });
        }
        if self.game.is_terminal() {
            return Err(ChessErrors::GameOver(self.game.status()));
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move) {
        self.game.make_move(mv);
        self.record.push(mv);
        self.sink.on_event(&GameEvent::MoveApplied(mv));
        self.report_check_change();

        let status = self.game.status();
        let terminal_event = match status {
            GameStatus::Checkmate { winner } => Some(GameEvent::Checkmate { winner }),
            GameStatus::Stalemate => Some(GameEvent::Stalemate),
            GameStatus::Draw(reason) => Some(GameEvent::Draw { reason }),
            GameStatus::ToMove(_) | GameStatus::Check(_) => None,
        };
        if let Some(event) = terminal_event {
            self.game.clear_history();
            self.sink.on_event(&event);
            info!(?status, moves = self.record.len(), "game over");
        }
    }

    fn report_check_change(&mut self) {
        let now = self.game.in_check.then_some(self.game.side_to_move);
        if now == self.checked_side {
            return;
        }
        if let Some(color) = self.checked_side {
            self.sink.on_event(&GameEvent::CheckCleared { color });
        }
        if let Some(color) = now {
            self.sink.on_event(&GameEvent::CheckAsserted { color });
        }
        self.checked_side = now;
    }
}
