//! Random-move engine.
//!
//! Selects uniformly from legal moves. Used for seeded self-play openings,
//! diagnostics and integration testing.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Sable Random"
    }

    fn choose_move(&mut self, game_state: &mut GameState, params: &SearchParams) -> ChessResult<EngineOutput> {
        let legal_moves: Vec<Move> = game_state.legal_moves().iter().copied().collect();

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine legal_moves {}", legal_moves.len()));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {}", depth));
        }

        out.best_move = legal_moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, SearchParams};
    use crate::game_state::game_state::GameState;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn same_seed_same_choices() {
        let mut a = RandomEngine::with_seed(42);
        let mut b = RandomEngine::with_seed(42);
        let mut game = GameState::new_game();

        for _ in 0..10 {
            let pa = a.choose_move(&mut game, &SearchParams::default()).expect("engine runs");
            let pb = b.choose_move(&mut game, &SearchParams::default()).expect("engine runs");
            assert_eq!(pa.best_move, pb.best_move);
            let mv = pa.best_move.expect("opening has moves");
            assert!(game.legal_moves().contains(&mv));
            game.make_move(mv);
        }
    }

    #[test]
    fn no_move_in_terminal_position() {
        let mut engine = RandomEngine::new();
        let mut game = parse_fen("7k/8/6Q1/8/8/8/8/K7 b - - 0 1").expect("stalemate FEN should parse");
        let out = engine.choose_move(&mut game, &SearchParams::default()).expect("engine runs");
        assert!(out.best_move.is_none());
        assert!(engine.set_option("Depth", "2").is_err());
    }
}
