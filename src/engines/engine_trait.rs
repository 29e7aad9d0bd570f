//! Engine abstraction used by the game controller and the self-play binary.
//!
//! Defines common search parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Overrides the engine's configured depth.
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    /// Raised by the host to abort a running search.
    pub stop: Option<Arc<AtomicBool>>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub score: Option<f64>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        Err(ChessErrors::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    /// Pick a move for the side to move. `game_state` is used as a scratch
    /// board and is left as it was found.
    fn choose_move(&mut self, game_state: &mut GameState, params: &SearchParams) -> ChessResult<EngineOutput>;
}
