//! Canonical chess-rule constants.
//!
//! Starting layout, the fixed piece-id assignment, castling geometry and the
//! draw thresholds used by the rules layer.

use crate::game_state::chess_types::{square_of, Color, PieceId, PieceKind, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank order from the a-file to the h-file.
pub const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Half-moves without capture or pawn move that end the game in a draw.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position that end the game in a draw.
pub const REPETITION_LIMIT: u8 = 3;

/// First arena id owned by `color`. Light owns `0..16`, Dark owns `16..32`.
#[inline]
pub const fn first_id(color: Color) -> PieceId {
    match color {
        Color::Light => 0,
        Color::Dark => 16,
    }
}

#[inline]
pub const fn color_of_id(id: PieceId) -> Color {
    if id < 16 {
        Color::Light
    } else {
        Color::Dark
    }
}

#[inline]
pub const fn king_id(color: Color) -> PieceId {
    first_id(color) + 4
}

/// Id of the rook that castles on the given side.
#[inline]
pub const fn castling_rook_id(color: Color, is_short: bool) -> PieceId {
    if is_short {
        first_id(color) + 7
    } else {
        first_id(color)
    }
}

/// Square a piece id occupies in the starting position, with its kind.
///
/// Ids `+0..+8` run along the back rank from the a-file, `+8..+16` are the
/// pawns from the a-file.
pub const fn starting_placement(id: PieceId) -> (Square, PieceKind) {
    let color = color_of_id(id);
    let local = id - first_id(color);
    if local < 8 {
        (square_of(local, color.home_rank()), BACK_RANK_LAYOUT[local as usize])
    } else {
        (square_of(local - 8, color.pawn_start_rank()), PieceKind::Pawn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastlingGeometry {
    /// Squares between king and rook that must be empty.
    pub fn between(&self) -> Vec<Square> {
        let (low, high) = if self.king_from < self.rook_from {
            (self.king_from, self.rook_from)
        } else {
            (self.rook_from, self.king_from)
        };
        (low + 1..high).collect()
    }

    /// Squares the king stands on or crosses, start and end included.
    pub fn king_path(&self) -> Vec<Square> {
        if self.king_from < self.king_to {
            (self.king_from..=self.king_to).collect()
        } else {
            (self.king_to..=self.king_from).rev().collect()
        }
    }
}

pub const fn castling_geometry(color: Color, is_short: bool) -> CastlingGeometry {
    let rank = color.home_rank();
    if is_short {
        CastlingGeometry {
            king_from: square_of(4, rank),
            king_to: square_of(6, rank),
            rook_from: square_of(7, rank),
            rook_to: square_of(5, rank),
        }
    } else {
        CastlingGeometry {
            king_from: square_of(4, rank),
            king_to: square_of(2, rank),
            rook_from: square_of(0, rank),
            rook_to: square_of(3, rank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_ids_follow_back_rank_then_pawns() {
        assert_eq!(starting_placement(0), (0, PieceKind::Rook));
        assert_eq!(starting_placement(4), (4, PieceKind::King));
        assert_eq!(starting_placement(12), (12, PieceKind::Pawn));
        assert_eq!(starting_placement(20), (60, PieceKind::King));
        assert_eq!(starting_placement(23), (63, PieceKind::Rook));
        assert_eq!(starting_placement(31), (55, PieceKind::Pawn));
    }

    #[test]
    fn long_castle_needs_three_empty_squares() {
        let geometry = castling_geometry(Color::Light, false);
        assert_eq!(geometry.between(), vec![1, 2, 3]);
        assert_eq!(geometry.king_path(), vec![4, 3, 2]);
        assert_eq!(castling_geometry(Color::Dark, true).king_path(), vec![60, 61, 62]);
    }
}
