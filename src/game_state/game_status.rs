//! Game phase classification and the insufficient-material rule.

use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::{is_light_square, Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawReason {
    Repetition,
    FiftyMove,
    InsufficientMaterial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    ToMove(Color),
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::ToMove(_) | GameStatus::Check(_))
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameStatus::Stalemate | GameStatus::Draw(_))
    }

    /// PGN result token.
    pub fn result_token(&self) -> &'static str {
        match self {
            GameStatus::Checkmate {
                winner: Color::Light,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Dark,
            } => "0-1",
            GameStatus::Stalemate | GameStatus::Draw(_) => "1/2-1/2",
            GameStatus::ToMove(_) | GameStatus::Check(_) => "*",
        }
    }
}

/// Neither side can deliver mate with the material left.
///
/// True for bare kings, a single minor piece against a bare king, one bishop
/// each on squares of the same color, and two knights against a bare king.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors: [Vec<(PieceKind, bool)>; 2] = [Vec::new(), Vec::new()];

    for piece in board.pieces() {
        let Some(square) = piece.square else {
            continue;
        };
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => {
                minors[piece.color.index()].push((piece.kind, is_light_square(square)));
            }
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    let [light, dark] = &minors;
    match (light.as_slice(), dark.as_slice()) {
        ([], []) => true,
        ([_], []) | ([], [_]) => true,
        ([(PieceKind::Bishop, a)], [(PieceKind::Bishop, b)]) => a == b,
        ([(PieceKind::Knight, _), (PieceKind::Knight, _)], [])
        | ([], [(PieceKind::Knight, _), (PieceKind::Knight, _)]) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn insufficient(fen: &str) -> bool {
        let game = parse_fen(fen).expect("fixture FEN should parse");
        is_insufficient_material(&game.board)
    }

    #[test]
    fn bare_kings_and_lone_minor_are_insufficient() {
        assert!(insufficient("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(insufficient("4k3/8/8/8/8/8/8/4KB2 w - - 0 1"));
        assert!(insufficient("4k3/8/8/8/8/8/8/1N2K3 b - - 0 1"));
        assert!(insufficient("4k3/8/8/8/8/8/8/1N2K1N1 w - - 0 1"));
    }

    #[test]
    fn bishops_depend_on_square_color() {
        // f1 and c8 are both light squares.
        assert!(insufficient("2b1k3/8/8/8/8/8/8/4KB2 w - - 0 1"));
        // f1 light, f8 dark.
        assert!(!insufficient("4kb2/8/8/8/8/8/8/4KB2 w - - 0 1"));
    }

    #[test]
    fn pawns_or_heavy_pieces_are_sufficient() {
        assert!(!insufficient("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1"));
        assert!(!insufficient("4kn2/8/8/8/8/8/8/4KB2 w - - 0 1"));
    }
}
