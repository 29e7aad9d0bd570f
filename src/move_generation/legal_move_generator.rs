//! Legal move generation pipeline.
//!
//! 1. Refresh the attack index for dirty pieces.
//! 2. Take each piece's cached pseudo-legal moves and drop every move that
//!    would leave the mover's king attacked (what-if test on a scratch board).
//!    Castling is appended to the king's list here.
//! 3. Drop king steps onto squares the enemy attacks or defends.
//! 4. Restrict pinned pieces to the pin line or the capture of the pinner.
//! 5. In double check keep only king moves.
//! 6. In single check keep king moves, captures of the checker, and moves
//!    onto the squares between a sliding checker and the king.
//! 7. Drop pieces left without moves.

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::chess_rules::king_id;
use crate::game_state::chess_types::*;
use crate::move_generation::attack_index::AttackIndex;
use crate::move_generation::legal_move_checks::{
    checkers_of, is_on_line, leaves_king_in_check, squares_between,
};
use crate::move_generation::legal_moves_king::castling_moves;
use crate::move_generation::move_generator::LegalMoves;

/// Refresh `index` and generate the legal moves of `color`.
pub fn generate_legal_moves(
    board: &Board,
    index: &mut AttackIndex,
    rights: &CastlingRights,
    color: Color,
) -> LegalMoves {
    index.refresh(board);
    legal_moves_from_index(board, index, rights, color)
}

/// Steps 2-7 over an index that is already up to date.
pub fn legal_moves_from_index(
    board: &Board,
    index: &AttackIndex,
    rights: &CastlingRights,
    color: Color,
) -> LegalMoves {
    debug_assert!(index.is_clean(), "attack index must be refreshed before generation");

    let king = king_id(color);
    let enemy = color.opposite();
    let mut legal = LegalMoves::new();

    // Step 2.
    for piece in board.pieces_of(color) {
        let mut moves: Vec<_> = index
            .pseudo_moves(piece.id)
            .iter()
            .filter(|mv| !leaves_king_in_check(board, mv))
            .copied()
            .collect();
        if piece.id == king {
            moves.extend(castling_moves(board, rights, color));
        }
        legal.insert(piece.id, moves);
    }

    // Step 3.
    if let Some(king_moves) = legal.moves_of_mut(king) {
        king_moves.retain(|mv| mv.castle.is_some() || !index.is_controlled_by(board, mv.to, enemy));
    }

    // Step 4.
    if let Some(king_square) = board.king_square(color) {
        for (&pinner, &pinned) in index.pins() {
            if board.piece(pinned).color != color {
                continue;
            }
            let Some(pinner_square) = board.piece(pinner).square else {
                continue;
            };
            if let Some(moves) = legal.moves_of_mut(pinned) {
                moves.retain(|mv| {
                    mv.to == pinner_square || is_on_line(king_square, pinner_square, mv.to)
                });
            }
        }
    }

    // Steps 5 and 6.
    let checkers = checkers_of(board, color);
    match checkers.as_slice() {
        [] => {}
        [checker] => {
            let checker_piece = board.piece(*checker);
            let mut blocks = Vec::new();
            if checker_piece.kind.is_slider() {
                if let (Some(from), Some(king_square)) = (checker_piece.square, board.king_square(color)) {
                    blocks = squares_between(from, king_square);
                }
            }
            let checker_id = *checker;
            legal.retain_moves(|mv| {
                mv.piece == king
                    || mv.capture.map(|c| c.id) == Some(checker_id)
                    || blocks.contains(&mv.to)
            });
        }
        _ => legal.retain_pieces(|id| id == king),
    }

    // Step 7.
    legal.drop_empty();

    trace!(?color, moves = legal.len(), checkers = checkers.len(), "legal moves generated");
    legal
}
