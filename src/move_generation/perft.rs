//! Perft: leaf counting over the legal move tree, walked with make/unmake.

use crate::game_state::game_state::GameState;
use crate::game_state::game_status::GameStatus;
use crate::move_generation::legal_move_checks::checkers_of;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub discovery_checks: usize,
    pub double_checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.discovery_checks += rhs.discovery_checks;
        self.double_checks += rhs.double_checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count the leaves `depth` plies below `game_state`, with a breakdown of
/// the last move played into each leaf. The state is restored on return.
pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    let moves: Vec<Move> = game_state.legal_moves().iter().copied().collect();
    for mv in moves {
        game_state.make_move(mv);
        if depth == 1 {
            total.merge(leaf_counts(game_state, &mv));
        } else {
            total.merge(perft(game_state, depth - 1));
        }
        game_state.unmake_move();
    }
    total
}

/// Per-root-move leaf counts, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(Move, usize)> {
    let moves: Vec<Move> = game_state.legal_moves().iter().copied().collect();
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        game_state.make_move(mv);
        let nodes = perft(game_state, depth.saturating_sub(1)).nodes;
        game_state.unmake_move();
        out.push((mv, nodes));
    }
    out
}

fn leaf_counts(after: &GameState, mv: &Move) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant() {
        counts.en_passant += 1;
    }
    if mv.castle.is_some() {
        counts.castles += 1;
    }
    if mv.promotion.is_some() {
        counts.promotions += 1;
    }

    if after.in_check {
        counts.checks += 1;
        let checkers = checkers_of(&after.board, after.side_to_move);
        let castle_rook = mv.castle.map(|c| c.rook);
        if checkers
            .iter()
            .any(|&id| id != mv.piece && Some(id) != castle_rook)
        {
            counts.discovery_checks += 1;
        }
        if checkers.len() >= 2 {
            counts.double_checks += 1;
        }
    }
    if matches!(after.status(), GameStatus::Checkmate { .. }) {
        counts.checkmates += 1;
    }
    counts
}
