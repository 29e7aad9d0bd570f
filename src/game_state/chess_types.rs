//! Primitive chess vocabulary shared by every subsystem.
//!
//! Squares are indexed `rank * 8 + file` with `0 == a1`, `7 == h1` and
//! `63 == h8`. Pieces are addressed by a stable arena id in `0..32`.

use serde::{Deserialize, Serialize};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank delta of a single pawn push.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Rank a pawn of this color must stand on to capture en passant.
    /// It is also the rank an enemy pawn lands on after a double step.
    #[inline]
    pub const fn en_passant_rank(self) -> u8 {
        match self {
            Color::Light => 4,
            Color::Dark => 3,
        }
    }
}

/// Piece kind. Color is carried separately on the piece record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Choices offered when a pawn promotes, in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Upper-case letter used by SAN and FEN.
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Board square index (`0..=63`).
pub type Square = u8;

/// Stable arena identity of a piece (`0..32`).
pub type PieceId = u8;

pub const NUM_SQUARES: usize = 64;
pub const NUM_PIECES: usize = 32;

#[inline]
pub const fn square_of(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

/// Bounds check on signed file/rank coordinates.
#[inline]
pub const fn on_board(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

/// Square reached by stepping `(d_file, d_rank)` from `square`, if it stays
/// on the board.
#[inline]
pub const fn offset_square(square: Square, d_file: i8, d_rank: i8) -> Option<Square> {
    let file = file_of(square) as i8 + d_file;
    let rank = rank_of(square) as i8 + d_rank;
    if on_board(file, rank) {
        Some(square_of(file as u8, rank as u8))
    } else {
        None
    }
}

/// Light squares are those where file and rank parity differ (h1 is light).
#[inline]
pub const fn is_light_square(square: Square) -> bool {
    (file_of(square) + rank_of(square)) % 2 == 1
}

/// The four castling flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub light_short: bool,
    pub light_long: bool,
    pub dark_short: bool,
    pub dark_long: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        light_short: true,
        light_long: true,
        dark_short: true,
        dark_long: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        light_short: false,
        light_long: false,
        dark_short: false,
        dark_long: false,
    };

    #[inline]
    pub fn allows(&self, color: Color, is_short: bool) -> bool {
        match (color, is_short) {
            (Color::Light, true) => self.light_short,
            (Color::Light, false) => self.light_long,
            (Color::Dark, true) => self.dark_short,
            (Color::Dark, false) => self.dark_long,
        }
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, is_short: bool) {
        match (color, is_short) {
            (Color::Light, true) => self.light_short = false,
            (Color::Light, false) => self.light_long = false,
            (Color::Dark, true) => self.dark_short = false,
            (Color::Dark, false) => self.dark_long = false,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, true);
        self.revoke(color, false);
    }

    pub fn any(&self) -> bool {
        self.light_short || self.light_long || self.dark_short || self.dark_long
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_on_board() {
        assert_eq!(offset_square(square_of(0, 0), -1, 0), None);
        assert_eq!(offset_square(square_of(7, 7), 0, 1), None);
        assert_eq!(offset_square(square_of(4, 1), 0, 2), Some(square_of(4, 3)));
        assert_eq!(offset_square(square_of(6, 0), 1, 2), Some(square_of(7, 2)));
    }

    #[test]
    fn square_colors_match_board_convention() {
        assert!(!is_light_square(square_of(0, 0)));
        assert!(is_light_square(square_of(7, 0)));
        assert!(is_light_square(square_of(3, 0)));
    }

    #[test]
    fn castling_rights_revoke_single_side() {
        let mut rights = CastlingRights::ALL;
        rights.revoke(Color::Dark, false);
        assert!(rights.allows(Color::Dark, true));
        assert!(!rights.allows(Color::Dark, false));
        rights.revoke_all(Color::Light);
        assert!(!rights.allows(Color::Light, true));
        assert!(rights.any());
    }
}
