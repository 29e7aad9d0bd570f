//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type returned by the public surface of
//! the crate: the game controller, notation parsers, and engine options.
//! Move application inside the rules layer is infallible because it only ever
//! receives moves drawn from the legal-move set, so internal invariant
//! breakage is guarded with debug assertions instead of error variants.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_status::GameStatus;
use crate::utils::algebraic::square_to_algebraic;

/// Unified error type for the chess engine.
///
/// Input-related variants (`IllegalMove`, `InvalidAlgebraic`, `InvalidFen`,
/// `InvalidOption`) are recoverable and suitable for presenting to end users.
/// Session-state variants (`PromotionPending`, `GameOver`, `NothingToUndo`)
/// tell the caller the request does not apply to the current game phase; no
/// state is mutated when any of them is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChessErrors {
    /// The requested move is not in the current legal-move set.
    #[error("illegal move {} -> {}{}", square_name(.from), square_name(.to), promotion_suffix(.promotion))]
    IllegalMove {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },

    /// Undo was requested with an empty history.
    #[error("nothing to undo")]
    NothingToUndo,

    /// A pawn reached the last rank and is waiting for a promotion choice.
    ///
    /// Every other input is refused until `resolve_promotion` is called.
    #[error("promotion choice pending on {}", square_name(.square))]
    PromotionPending { square: Square },

    /// `resolve_promotion` was called without a pending promotion.
    #[error("no promotion is pending")]
    NoPromotionPending,

    /// The game already reached a terminal state.
    #[error("game is over: {0:?}")]
    GameOver(GameStatus),

    /// A move was requested for the side that is not on move.
    #[error("{requested:?} is not the side to move")]
    WrongSideToMove { requested: Color },

    /// Search was invoked on a position without legal moves.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A square or move string could not be parsed.
    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),

    /// A FEN record is malformed or describes an impossible position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// An engine option name is unknown or its value does not parse.
    #[error("invalid option {name}={value}")]
    InvalidOption { name: String, value: String },
}

pub type ChessResult<T> = Result<T, ChessErrors>;

fn square_name(square: &Square) -> String {
    square_to_algebraic(*square)
}

fn promotion_suffix(promotion: &Option<PieceKind>) -> String {
    match promotion {
        Some(kind) => format!("={}", kind.symbol()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::ChessErrors;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn illegal_move_message_uses_coordinates() {
        let err = ChessErrors::IllegalMove {
            from: 12,
            to: 36,
            promotion: None,
        };
        assert_eq!(err.to_string(), "illegal move e2 -> e5");

        let err = ChessErrors::IllegalMove {
            from: 52,
            to: 60,
            promotion: Some(PieceKind::Queen),
        };
        assert_eq!(err.to_string(), "illegal move e7 -> e8=Q");
    }
}
