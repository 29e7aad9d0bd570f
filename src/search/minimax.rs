//! Minimax search with alpha-beta pruning.
//!
//! The tree is walked in place: every child is entered with
//! `GameState::make_move` and left with `unmake_move`, so the caller's state
//! is restored when the search returns, aborted or not. Scores are taken from
//! the root side's perspective; the root side maximizes and the opponent
//! minimizes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::BoardScorer;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

/// External limits polled after every searched child.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    pub stop: Option<Arc<AtomicBool>>,
    pub deadline: Option<Instant>,
}

impl SearchControl {
    pub fn should_stop(&self) -> bool {
        if let Some(stop) = &self.stop {
            if stop.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: f64,
    pub nodes: u64,
    /// The search stopped early; `best_move` is the best among the root
    /// moves finished so far.
    pub aborted: bool,
}

struct Searcher<'a, S: BoardScorer> {
    scorer: &'a S,
    control: &'a SearchControl,
    perspective: Color,
    nodes: u64,
    aborted: bool,
}

impl<S: BoardScorer> Searcher<'_, S> {
    fn poll_stop(&mut self) -> bool {
        if !self.aborted && self.control.should_stop() {
            self.aborted = true;
        }
        self.aborted
    }

    fn leaf(&self, game_state: &GameState) -> f64 {
        self.scorer.score(game_state, self.perspective)
    }

    fn alpha_beta(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        self.nodes += 1;
        if depth == 0 || game_state.is_terminal() {
            return self.leaf(game_state);
        }

        let moves: Vec<Move> = game_state.legal_moves().iter().copied().collect();
        let mut value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            game_state.make_move(mv);
            let eval = self.alpha_beta(game_state, depth - 1, alpha, beta, !maximizing);
            game_state.unmake_move();

            if maximizing {
                value = value.max(eval);
                alpha = alpha.max(eval);
            } else {
                value = value.min(eval);
                beta = beta.min(eval);
            }
            if beta <= alpha || self.poll_stop() {
                break;
            }
        }
        value
    }
}

/// Alpha-beta search for the side to move.
///
/// The root best move starts as the first legal move and is replaced only by
/// a strictly better one, so ties keep the earlier move. A depth of zero is
/// treated as one.
pub fn alpha_beta_search<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    config: SearchConfig,
    control: &SearchControl,
) -> SearchResult {
    let mut searcher = Searcher {
        scorer,
        control,
        perspective: game_state.side_to_move,
        nodes: 1,
        aborted: false,
    };

    let moves: Vec<Move> = game_state.legal_moves().iter().copied().collect();
    let Some(&first) = moves.first() else {
        return SearchResult {
            best_move: None,
            score: searcher.leaf(game_state),
            nodes: searcher.nodes,
            aborted: false,
        };
    };

    let depth = config.max_depth.max(1);
    let mut best_move = first;
    let mut best_score = f64::NEG_INFINITY;
    let mut alpha = f64::NEG_INFINITY;
    let beta = f64::INFINITY;

    for mv in moves {
        game_state.make_move(mv);
        let score = searcher.alpha_beta(game_state, depth - 1, alpha, beta, false);
        game_state.unmake_move();
        if searcher.aborted {
            break;
        }

        trace!(from = mv.from, to = mv.to, score, "root move searched");
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        alpha = alpha.max(score);
        if searcher.poll_stop() {
            break;
        }
    }

    debug!(
        depth,
        from = best_move.from,
        to = best_move.to,
        score = best_score,
        nodes = searcher.nodes,
        aborted = searcher.aborted,
        "search finished"
    );

    SearchResult {
        best_move: Some(best_move),
        score: best_score,
        nodes: searcher.nodes,
        aborted: searcher.aborted,
    }
}

/// Unpruned minimax over the same tree, with the same root tie-breaking.
/// Used to check that pruning never changes the result.
pub fn full_minimax_search<S: BoardScorer>(game_state: &mut GameState, scorer: &S, depth: u8) -> SearchResult {
    fn visit<S: BoardScorer>(
        game_state: &mut GameState,
        scorer: &S,
        perspective: Color,
        depth: u8,
        maximizing: bool,
        nodes: &mut u64,
    ) -> f64 {
        *nodes += 1;
        if depth == 0 || game_state.is_terminal() {
            return scorer.score(game_state, perspective);
        }
        let moves: Vec<Move> = game_state.legal_moves().iter().copied().collect();
        let mut value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for mv in moves {
            game_state.make_move(mv);
            let eval = visit(game_state, scorer, perspective, depth - 1, !maximizing, nodes);
            game_state.unmake_move();
            value = if maximizing { value.max(eval) } else { value.min(eval) };
        }
        value
    }

    let perspective = game_state.side_to_move;
    let mut nodes = 1u64;
    let moves: Vec<Move> = game_state.legal_moves().iter().copied().collect();
    let mut best_move = moves.first().copied();
    let mut best_score = if best_move.is_some() {
        f64::NEG_INFINITY
    } else {
        scorer.score(game_state, perspective)
    };

    for mv in moves {
        game_state.make_move(mv);
        let score = visit(game_state, scorer, perspective, depth.max(1) - 1, false, &mut nodes);
        game_state.unmake_move();
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    SearchResult {
        best_move,
        score: best_score,
        nodes,
        aborted: false,
    }
}
