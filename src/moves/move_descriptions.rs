//! Move value type.
//!
//! A `Move` carries everything needed to apply and to reverse it without
//! consulting the board again: the moving piece id and its pre-move kind, the
//! captured piece with the square it stood on (which differs from `to` for en
//! passant), the rook relocation of a castle, and the promotion target.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{Color, PieceId, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub id: PieceId,
    pub square: Square,
    pub kind: PieceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastleRelocation {
    pub rook: PieceId,
    pub rook_from: Square,
    pub rook_to: Square,
    pub is_short: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub piece: PieceId,
    /// Kind of the moving piece before the move (a promoting move says `Pawn`).
    pub kind: PieceKind,
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub capture: Option<Capture>,
    pub castle: Option<CastleRelocation>,
    pub promotion: Option<PieceKind>,
}

/// Coarse classification of a move. A capturing promotion reports
/// `Promotion`; use `Move::is_capture` to ask about captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Quiet,
    Capture,
    Castle,
    Promotion,
    EnPassant,
}

impl Move {
    pub const fn quiet(piece: PieceId, kind: PieceKind, color: Color, from: Square, to: Square) -> Self {
        Self {
            piece,
            kind,
            color,
            from,
            to,
            capture: None,
            castle: None,
            promotion: None,
        }
    }

    pub fn with_capture(mut self, capture: Capture) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    pub fn with_castle(mut self, castle: CastleRelocation) -> Self {
        self.castle = Some(castle);
        self
    }

    pub fn move_type(&self) -> MoveType {
        if self.castle.is_some() {
            MoveType::Castle
        } else if self.promotion.is_some() {
            MoveType::Promotion
        } else if self.is_en_passant() {
            MoveType::EnPassant
        } else if self.capture.is_some() {
            MoveType::Capture
        } else {
            MoveType::Quiet
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.capture, Some(capture) if capture.square != self.to)
    }

    /// Captures and pawn moves reset the fifty-move counter.
    #[inline]
    pub fn resets_halfmove_clock(&self) -> bool {
        self.kind == PieceKind::Pawn || self.is_capture()
    }

    /// Kind standing on `to` once the move is made.
    #[inline]
    pub fn resulting_kind(&self) -> PieceKind {
        self.promotion.unwrap_or(self.kind)
    }

    /// Does this move match a `(from, to, promotion)` request?
    #[inline]
    pub fn matches(&self, from: Square, to: Square, promotion: Option<PieceKind>) -> bool {
        self.from == from && self.to == to && self.promotion == promotion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_passant_is_detected_from_capture_square() {
        let mv = Move::quiet(12, PieceKind::Pawn, Color::Light, 36, 43).with_capture(Capture {
            id: 27,
            square: 35,
            kind: PieceKind::Pawn,
        });
        assert!(mv.is_en_passant());
        assert_eq!(mv.move_type(), MoveType::EnPassant);
        assert!(mv.resets_halfmove_clock());
    }

    #[test]
    fn capturing_promotion_reports_promotion() {
        let mv = Move::quiet(9, PieceKind::Pawn, Color::Light, 49, 56)
            .with_capture(Capture {
                id: 16,
                square: 56,
                kind: PieceKind::Rook,
            })
            .with_promotion(PieceKind::Knight);
        assert_eq!(mv.move_type(), MoveType::Promotion);
        assert!(mv.is_capture());
        assert!(!mv.is_en_passant());
        assert_eq!(mv.resulting_kind(), PieceKind::Knight);
    }

    #[test]
    fn quiet_knight_move_keeps_clock() {
        let mv = Move::quiet(6, PieceKind::Knight, Color::Light, 6, 21);
        assert_eq!(mv.move_type(), MoveType::Quiet);
        assert!(!mv.resets_halfmove_clock());
    }
}
