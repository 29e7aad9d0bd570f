//! Fixed-depth minimax engine with the positional evaluation.

use std::time::{Duration, Instant};

use tracing::info;

use crate::chess_errors::ChessResult;
use crate::engines::engine_config::EngineConfig;
use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::PositionalScorer;
use crate::search::minimax::{alpha_beta_search, SearchConfig, SearchControl};
use crate::utils::long_algebraic::move_to_coordinates;

#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    config: EngineConfig,
}

impl MinimaxEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_depth(depth: u8) -> Self {
        Self::new(EngineConfig {
            depth: depth.max(1),
            ..EngineConfig::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Sable Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        self.config.set_option(name, value)
    }

    fn choose_move(&mut self, game_state: &mut GameState, params: &SearchParams) -> ChessResult<EngineOutput> {
        let depth = params.depth.unwrap_or(self.config.depth).max(1);
        let control = SearchControl {
            stop: params.stop.clone(),
            deadline: params
                .movetime_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
        };
        let scorer = PositionalScorer::new(self.config.weights);

        let started = Instant::now();
        let result = alpha_beta_search(game_state, &scorer, SearchConfig { max_depth: depth }, &control);
        let elapsed_ms = started.elapsed().as_millis();

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: Some(result.score),
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} nodes {} time {} score {}",
            depth, result.nodes, elapsed_ms, result.score
        ));
        if result.aborted {
            out.info_lines.push("info string search stopped early".to_owned());
        }
        if let Some(best) = result.best_move {
            let coordinates = move_to_coordinates(&best);
            info!(depth, nodes = result.nodes, best = %coordinates, score = result.score, "minimax move chosen");
            out.info_lines.push(format!("info string bestmove {coordinates}"));
        }
        Ok(out)
    }
}
