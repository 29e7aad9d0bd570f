//! Static position evaluation.
//!
//! Search stays independent of the heuristic by going through the
//! `BoardScorer` trait. `PositionalScorer` reads the attack index of the
//! position it scores, so every term is computed from annotations that are
//! already up to date after `make_move`/`unmake_move`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::game_status::GameStatus;
use crate::move_generation::attack_index::AttackIndex;

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view. Positive favours `perspective`.
    fn score(&self, game_state: &GameState, perspective: Color) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationWeights {
    pub pawn: f64,
    pub knight: f64,
    pub bishop: f64,
    pub rook: f64,
    pub queen: f64,

    pub mobility: f64,
    pub attack_potential: f64,
    /// Multiplier on attack potential while the evaluated side gives check.
    pub check_boost: f64,
    pub king_safety: f64,
    pub pinned_penalty: f64,
    pub close_attack_penalty: f64,
    pub max_attack_amount: f64,
    pub pawn_chain: f64,
    pub isolated_pawn: f64,
    pub connectivity: f64,
    pub total_material: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            pawn: 1.0,
            knight: 3.0,
            bishop: 3.0,
            rook: 5.0,
            queen: 9.0,
            mobility: 0.4,
            attack_potential: 4.0,
            check_boost: 2.0,
            king_safety: 2.0,
            pinned_penalty: 0.2,
            close_attack_penalty: 0.1,
            max_attack_amount: 16.0,
            pawn_chain: 0.5,
            isolated_pawn: -0.2,
            connectivity: 1.0,
            total_material: 39.0,
        }
    }
}

impl EvaluationWeights {
    /// Material value of a piece kind. Kings carry none.
    #[inline]
    pub fn piece_value(&self, kind: PieceKind) -> f64 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => 0.0,
        }
    }
}

/// Weighted sum of material, mobility, attack potential, connectivity,
/// king safety and pawn structure, taken as `side - opponent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer {
    pub weights: EvaluationWeights,
}

impl PositionalScorer {
    pub const fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    /// Score of one side on its own, without the terminal-state shortcut.
    pub fn side_score(&self, game_state: &GameState, side: Color) -> f64 {
        let board = &game_state.board;
        let index = game_state.attack_index();

        self.material(board, side)
            + self.mobility(game_state, side)
            + self.attack_potential(game_state, side)
            + self.connectivity(board, index, side)
            + self.king_safety(game_state, side)
            + self.pawn_structure(board, index, side)
    }

    pub fn material(&self, board: &Board, side: Color) -> f64 {
        board
            .pieces_of(side)
            .map(|piece| self.weights.piece_value(piece.kind))
            .sum()
    }

    pub fn mobility(&self, game_state: &GameState, side: Color) -> f64 {
        game_state.generate_moves(side).len() as f64 * self.weights.mobility
    }

    /// Value of attacked enemy pieces times how many distinct ones are
    /// attacked, plus passed pawns, normalised by the maximum attack load.
    pub fn attack_potential(&self, game_state: &GameState, side: Color) -> f64 {
        let board = &game_state.board;
        let index = game_state.attack_index();

        let mut attacked_values = 0.0;
        let mut attacked = BTreeSet::<PieceId>::new();
        for target in board.pieces_of(side.opposite()) {
            if target.kind == PieceKind::King {
                continue;
            }
            let Some(square) = target.square else {
                continue;
            };
            for annotation in index.annotations_at(square) {
                if annotation.attackable && board.piece(annotation.id).color == side {
                    attacked_values += self.weights.piece_value(target.kind);
                    attacked.insert(target.id);
                }
            }
        }

        let raw = (passed_pawn_count(board, side) as f64 + attacked_values * attacked.len() as f64)
            / (self.weights.max_attack_amount * self.weights.total_material);
        let gives_check = game_state.in_check && game_state.side_to_move != side;
        let boosted = if gives_check {
            raw * self.weights.check_boost
        } else {
            raw
        };
        boosted * self.weights.attack_potential
    }

    /// Distinct defended pieces times total defend links, over the squared
    /// number of non-king pieces.
    pub fn connectivity(&self, board: &Board, index: &AttackIndex, side: Color) -> f64 {
        let mut count = 0usize;
        let mut links = 0usize;
        let mut defended = BTreeSet::<PieceId>::new();

        for piece in board.pieces_of(side) {
            if piece.kind == PieceKind::King {
                continue;
            }
            let Some(square) = piece.square else {
                continue;
            };
            count += 1;
            for annotation in index.annotations_at(square) {
                if annotation.defends {
                    links += 1;
                    defended.insert(piece.id);
                }
            }
        }

        if count == 0 {
            return 0.0;
        }
        (defended.len() * links) as f64 / (count * count) as f64 * self.weights.connectivity
    }

    /// Neutral while in check; otherwise penalised by own pinned pieces and
    /// by enemy attacks on the squares around the king.
    pub fn king_safety(&self, game_state: &GameState, side: Color) -> f64 {
        if game_state.in_check && game_state.side_to_move == side {
            return 0.0;
        }
        let board = &game_state.board;
        let index = game_state.attack_index();

        let pins = index
            .pins()
            .values()
            .filter(|&&pinned| board.piece(pinned).color == side)
            .count();

        let mut close_attacks = 0usize;
        if let Some(king_square) = board.king_square(side) {
            for d_file in -1..=1 {
                for d_rank in -1..=1 {
                    if d_file == 0 && d_rank == 0 {
                        continue;
                    }
                    let Some(square) = offset_square(king_square, d_file, d_rank) else {
                        continue;
                    };
                    close_attacks += index
                        .annotations_at(square)
                        .iter()
                        .filter(|a| a.attackable && board.piece(a.id).color != side)
                        .count();
                }
            }
        }

        let penalty = (pins as f64 * self.weights.pinned_penalty
            + close_attacks as f64 * self.weights.close_attack_penalty)
            / self.weights.max_attack_amount;
        (1.0 - penalty) * self.weights.king_safety
    }

    /// Pawn-defends-pawn links rewarded, pawns with no pawn defender penalised.
    pub fn pawn_structure(&self, board: &Board, index: &AttackIndex, side: Color) -> f64 {
        let mut chain_links = 0usize;
        let mut isolated = 0usize;

        for pawn in board.pieces_of(side).filter(|p| p.kind == PieceKind::Pawn) {
            let Some(square) = pawn.square else {
                continue;
            };
            let links = index
                .annotations_at(square)
                .iter()
                .filter(|a| a.defends && board.piece(a.id).kind == PieceKind::Pawn)
                .count();
            if links == 0 {
                isolated += 1;
            }
            chain_links += links;
        }

        chain_links as f64 * self.weights.pawn_chain + isolated as f64 * self.weights.isolated_pawn
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> f64 {
        match game_state.status() {
            GameStatus::Checkmate { winner } if winner == perspective => f64::INFINITY,
            GameStatus::Checkmate { .. } => f64::NEG_INFINITY,
            GameStatus::Stalemate | GameStatus::Draw(_) => 0.0,
            GameStatus::ToMove(_) | GameStatus::Check(_) => {
                self.side_score(game_state, perspective)
                    - self.side_score(game_state, perspective.opposite())
            }
        }
    }
}

/// Material only, from `perspective`. Terminal states score like the
/// positional scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer {
    pub weights: EvaluationWeights,
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> f64 {
        match game_state.status() {
            GameStatus::Checkmate { winner } if winner == perspective => f64::INFINITY,
            GameStatus::Checkmate { .. } => f64::NEG_INFINITY,
            GameStatus::Stalemate | GameStatus::Draw(_) => 0.0,
            _ => {
                let material = |color| -> f64 {
                    game_state
                        .board
                        .pieces_of(color)
                        .map(|p| self.weights.piece_value(p.kind))
                        .sum()
                };
                material(perspective) - material(perspective.opposite())
            }
        }
    }
}

/// Pawns with no enemy pawn ahead of them on their own or an adjacent file.
pub fn passed_pawn_count(board: &Board, side: Color) -> usize {
    board
        .pieces_of(side)
        .filter(|p| p.kind == PieceKind::Pawn)
        .filter_map(|p| p.square)
        .filter(|&square| is_passed_pawn(board, square, side))
        .count()
}

fn is_passed_pawn(board: &Board, square: Square, side: Color) -> bool {
    let direction = side.pawn_direction();
    for d_file in -1..=1 {
        let mut cursor = offset_square(square, d_file, direction);
        while let Some(ahead) = cursor {
            if let Some(piece) = board.piece_at(ahead) {
                if piece.kind == PieceKind::Pawn && piece.color != side {
                    return false;
                }
            }
            cursor = offset_square(ahead, 0, direction);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{passed_pawn_count, BoardScorer, EvaluationWeights, MaterialScorer, PositionalScorer};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_is_balanced() {
        let game = GameState::new_game();
        let scorer = PositionalScorer::default();
        let score = scorer.score(&game, Color::Light);
        assert!(score.abs() < 1e-9, "symmetric position scored {score}");
        assert_eq!(scorer.material(&game.board, Color::Light), 39.0);
    }

    #[test]
    fn extra_queen_dominates_the_score() {
        let game = parse_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("fixture FEN should parse");
        let scorer = PositionalScorer::default();
        assert!(scorer.score(&game, Color::Light) > 9.0);
        assert!(scorer.score(&game, Color::Dark) < -9.0);
    }

    #[test]
    fn checkmate_scores_infinite_by_winner() {
        let mut game = GameState::new_game();
        game.play_coordinates(&["f2f3", "e7e5", "g2g4", "d8h4"]).expect("fool's mate is legal");
        let scorer = PositionalScorer::default();
        assert_eq!(scorer.score(&game, Color::Dark), f64::INFINITY);
        assert_eq!(scorer.score(&game, Color::Light), f64::NEG_INFINITY);
        assert_eq!(MaterialScorer::default().score(&game, Color::Dark), f64::INFINITY);
    }

    #[test]
    fn drawn_positions_score_zero() {
        let game = parse_fen("7k/8/6Q1/8/8/8/8/K7 b - - 0 1").expect("stalemate FEN should parse");
        assert_eq!(PositionalScorer::default().score(&game, Color::Light), 0.0);
    }

    #[test]
    fn passed_pawns_are_counted_per_adjacent_file() {
        // The a-pawn is passed; the e-pawn is blocked by the enemy d-pawn ahead.
        let game = parse_fen("4k3/8/3p4/8/4P3/8/P7/4K3 w - - 0 1").expect("fixture FEN should parse");
        assert_eq!(passed_pawn_count(&game.board, Color::Light), 1);
        // The d-pawn still has the e-pawn ahead on an adjacent file.
        assert_eq!(passed_pawn_count(&game.board, Color::Dark), 0);
    }

    #[test]
    fn pawn_chain_beats_isolated_pawns() {
        let chain = parse_fen("4k3/8/8/8/8/2P5/1P6/4K3 w - - 0 1").expect("fixture FEN should parse");
        let split = parse_fen("4k3/8/8/8/8/8/1P4P1/4K3 w - - 0 1").expect("fixture FEN should parse");
        let scorer = PositionalScorer::default();

        let chained = scorer.pawn_structure(&chain.board, chain.attack_index(), Color::Light);
        let isolated = scorer.pawn_structure(&split.board, split.attack_index(), Color::Light);
        assert!((chained - (0.5 - 0.2)).abs() < 1e-9);
        assert!((isolated - (-0.4)).abs() < 1e-9);
    }

    #[test]
    fn pinned_piece_lowers_king_safety() {
        let pinned = parse_fen("4r2k/8/8/8/4B3/8/8/4K3 w - - 0 1").expect("fixture FEN should parse");
        let free = parse_fen("r6k/8/8/8/4B3/8/8/4K3 w - - 0 1").expect("fixture FEN should parse");
        let scorer = PositionalScorer::default();
        assert!(scorer.king_safety(&pinned, Color::Light) < scorer.king_safety(&free, Color::Light));
    }

    #[test]
    fn king_safety_is_neutral_in_check() {
        let game = parse_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").expect("fixture FEN should parse");
        let scorer = PositionalScorer::default();
        assert!(!game.in_check);

        let checked = parse_fen("R3k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("fixture FEN should parse");
        assert!(checked.in_check);
        assert_eq!(scorer.king_safety(&checked, Color::Dark), 0.0);
        assert!(scorer.king_safety(&game, Color::Dark) > 0.0);
    }

    #[test]
    fn weights_round_trip_through_json() {
        let weights = EvaluationWeights {
            mobility: 0.25,
            ..EvaluationWeights::default()
        };
        let json = serde_json::to_string(&weights).expect("weights serialize");
        let back: EvaluationWeights = serde_json::from_str(&json).expect("weights deserialize");
        assert_eq!(back, weights);
    }
}
