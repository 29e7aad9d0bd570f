use crate::game_state::board::Board;
use crate::game_state::piece_record::Piece;
use crate::move_generation::legal_move_shared::{scan_slider, PieceScan};
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;

pub fn scan_bishop(board: &Board, piece: &Piece, out: &mut PieceScan) {
    scan_slider(board, piece, &BISHOP_DIRECTIONS, out);
}
