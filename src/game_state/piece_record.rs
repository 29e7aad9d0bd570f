//! Arena entry for a single piece.

use crate::game_state::chess_rules::color_of_id;
use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};

/// A piece keeps its id for the whole game. Capture takes it off the board
/// (`square == None`) rather than destroying it, and promotion only changes
/// `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Option<Square>,
    /// Number of times this piece has moved.
    pub move_count: u16,
    /// Ply at which this piece last moved.
    pub last_move_ply: Option<u16>,
}

impl Piece {
    pub const fn new(id: PieceId, kind: PieceKind) -> Self {
        Self {
            id,
            kind,
            color: color_of_id(id),
            square: None,
            move_count: 0,
            last_move_ply: None,
        }
    }

    #[inline]
    pub const fn is_on_board(&self) -> bool {
        self.square.is_some()
    }
}
