use crate::game_state::board::Board;
use crate::game_state::piece_record::Piece;
use crate::move_generation::legal_move_shared::{scan_slider, PieceScan};
use crate::moves::rook_moves::ROOK_DIRECTIONS;

pub fn scan_rook(board: &Board, piece: &Piece, out: &mut PieceScan) {
    scan_slider(board, piece, &ROOK_DIRECTIONS, out);
}
