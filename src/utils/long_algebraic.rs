//! Coordinate move notation (`e2e4`, `e7e8q`).

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Split a coordinate move into `(from, to, promotion)`.
pub fn parse_coordinate_move(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraic(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_symbol(ch) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(ChessErrors::InvalidAlgebraic(text.to_owned())),
        },
    };

    Ok((from, to, promotion))
}

pub fn move_to_coordinates(mv: &Move) -> String {
    let mut out = square_to_algebraic(mv.from);
    out.push_str(&square_to_algebraic(mv.to));
    if let Some(kind) = mv.promotion {
        out.push(kind.symbol().to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_promotion_moves() {
        assert_eq!(parse_coordinate_move("e2e4").expect("e2e4"), (12, 28, None));
        assert_eq!(
            parse_coordinate_move("a7a8n").expect("a7a8n"),
            (48, 56, Some(PieceKind::Knight))
        );
        assert!(parse_coordinate_move("a7a8k").is_err());
        assert!(parse_coordinate_move("e2").is_err());
    }
}
