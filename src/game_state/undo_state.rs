use crate::game_state::chess_types::CastlingRights;
use crate::game_state::position_key::PositionKey;
use crate::move_generation::legal_move_apply::BoardUndo;
use crate::moves::move_descriptions::Move;

/// Single undo record pushed by `make_move` and popped by `unmake_move`.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub board_undo: BoardUndo,

    pub prev_castling_rights: CastlingRights,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    /// Key recorded for the position reached by `mv`.
    pub reached_key: PositionKey,
}
