//! Mechanical application and reversal of a `Move` on a `Board`.
//!
//! No legality is checked here. `apply_move` returns the only state a `Move`
//! value cannot carry by itself (previous last-move plies), and `revert_move`
//! consumes it to restore the board exactly.

use crate::game_state::board::Board;
use crate::moves::move_descriptions::Move;

/// Per-move board state that is not recoverable from the `Move` alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardUndo {
    pub mover_last_move_ply: Option<u16>,
    pub rook_last_move_ply: Option<u16>,
}

pub fn apply_move(board: &mut Board, mv: &Move) -> BoardUndo {
    let ply = board.ply;
    let mut undo = BoardUndo {
        mover_last_move_ply: board.piece(mv.piece).last_move_ply,
        rook_last_move_ply: None,
    };

    if let Some(capture) = mv.capture {
        let taken = board.vacate(capture.square);
        debug_assert_eq!(taken, Some(capture.id), "capture record out of sync with board");
    }

    board.move_piece(mv.piece, mv.to);
    {
        let mover = board.piece_mut(mv.piece);
        mover.move_count += 1;
        mover.last_move_ply = Some(ply);
        if let Some(kind) = mv.promotion {
            mover.kind = kind;
        }
    }

    if let Some(castle) = mv.castle {
        undo.rook_last_move_ply = board.piece(castle.rook).last_move_ply;
        board.move_piece(castle.rook, castle.rook_to);
        let rook = board.piece_mut(castle.rook);
        rook.move_count += 1;
        rook.last_move_ply = Some(ply);
    }

    board.ply += 1;
    undo
}

pub fn revert_move(board: &mut Board, mv: &Move, undo: &BoardUndo) {
    board.ply -= 1;

    if let Some(castle) = mv.castle {
        board.move_piece(castle.rook, castle.rook_from);
        let rook = board.piece_mut(castle.rook);
        rook.move_count -= 1;
        rook.last_move_ply = undo.rook_last_move_ply;
    }

    board.move_piece(mv.piece, mv.from);
    {
        let mover = board.piece_mut(mv.piece);
        mover.move_count -= 1;
        mover.last_move_ply = undo.mover_last_move_ply;
        mover.kind = mv.kind;
    }

    if let Some(capture) = mv.capture {
        board.place(capture.id, capture.square);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::move_descriptions::{Capture, CastleRelocation};

    #[test]
    fn apply_and_revert_double_push() {
        let original = Board::starting_position();
        let mut board = original.clone();
        let mv = Move::quiet(12, PieceKind::Pawn, Color::Light, 12, 28);

        let undo = apply_move(&mut board, &mv);
        assert_eq!(board.id_at(28), Some(12));
        assert_eq!(board.piece(12).move_count, 1);
        assert_eq!(board.piece(12).last_move_ply, Some(0));
        assert_eq!(board.ply, 1);

        revert_move(&mut board, &mv, &undo);
        assert_eq!(board, original);
    }

    #[test]
    fn revert_restores_capture_and_promotion() {
        let mut board = Board::empty();
        board.place(9, 49);
        board.place(16, 56);
        board.place(4, 4);
        board.place(20, 60);
        let original = board.clone();

        let mv = Move::quiet(9, PieceKind::Pawn, Color::Light, 49, 56)
            .with_capture(Capture {
                id: 16,
                square: 56,
                kind: PieceKind::Rook,
            })
            .with_promotion(PieceKind::Queen);

        let undo = apply_move(&mut board, &mv);
        assert_eq!(board.piece(9).kind, PieceKind::Queen);
        assert_eq!(board.piece(16).square, None);

        revert_move(&mut board, &mv, &undo);
        assert_eq!(board, original);
        assert!(board.is_consistent());
    }

    #[test]
    fn castle_moves_the_rook_too() {
        let mut board = Board::empty();
        board.place(4, 4);
        board.place(7, 7);
        board.place(20, 60);
        let original = board.clone();

        let mv = Move::quiet(4, PieceKind::King, Color::Light, 4, 6)
            .with_castle(CastleRelocation {
                rook: 7,
                rook_from: 7,
                rook_to: 5,
                is_short: true,
            });
        let undo = apply_move(&mut board, &mv);
        assert_eq!(board.id_at(5), Some(7));
        assert_eq!(board.piece(7).move_count, 1);

        revert_move(&mut board, &mv, &undo);
        assert_eq!(board, original);
    }
}
