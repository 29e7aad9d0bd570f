//! King steps. Castling is not cached with the steps; it is produced when
//! legal moves are generated because it depends on enemy attacks on the
//! king's path rather than on the squares the king scans.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castling_geometry, castling_rook_id};
use crate::game_state::chess_types::{CastlingRights, Color, PieceKind};
use crate::game_state::piece_record::Piece;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{scan_step_target, PieceScan};
use crate::moves::king_moves::king_targets;
use crate::moves::move_descriptions::{CastleRelocation, Move};

pub fn scan_king(board: &Board, piece: &Piece, out: &mut PieceScan) {
    let Some(from) = piece.square else {
        return;
    };
    for to in king_targets(from) {
        scan_step_target(board, piece, from, to, out);
    }
}

/// Castling moves available to `color`, short side first.
///
/// Requires the castling flag, an unmoved king and rook on their home
/// squares, empty squares between them, and no enemy attack on any square
/// the king stands on or crosses. A king in check therefore never castles.
pub fn castling_moves(board: &Board, rights: &CastlingRights, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();

    for is_short in [true, false] {
        if !rights.allows(color, is_short) {
            continue;
        }

        let geometry = castling_geometry(color, is_short);
        let Some(king) = board.piece_at(geometry.king_from) else {
            continue;
        };
        let Some(rook) = board.piece_at(geometry.rook_from) else {
            continue;
        };

        let rook_id = castling_rook_id(color, is_short);
        let pieces_ready = king.kind == PieceKind::King
            && king.color == color
            && king.move_count == 0
            && rook.id == rook_id
            && rook.kind == PieceKind::Rook
            && rook.move_count == 0;
        if !pieces_ready {
            continue;
        }

        if geometry.between().into_iter().any(|sq| !board.is_empty(sq)) {
            continue;
        }

        let enemy = color.opposite();
        if geometry
            .king_path()
            .into_iter()
            .any(|sq| is_square_attacked(board, sq, enemy))
        {
            continue;
        }

        moves.push(
            Move::quiet(king.id, PieceKind::King, color, geometry.king_from, geometry.king_to)
                .with_castle(CastleRelocation {
                    rook: rook.id,
                    rook_from: geometry.rook_from,
                    rook_to: geometry.rook_to,
                    is_short,
                }),
        );
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::castling_moves;
    use crate::game_state::chess_types::Color;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn both_castles_available_on_clear_back_rank() {
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fixture FEN should parse");
        let moves = castling_moves(&game.board, &game.castling_rights, Color::Light);
        assert_eq!(moves.len(), 2);
        assert!(moves[0].castle.expect("castle").is_short);
        assert_eq!(moves[1].to, 2);
    }

    #[test]
    fn attacked_transit_square_blocks_castle() {
        // Dark rook on f8 covers f1.
        let game = parse_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fixture FEN should parse");
        let moves = castling_moves(&game.board, &game.castling_rights, Color::Light);
        assert_eq!(moves.len(), 1);
        assert!(!moves[0].castle.expect("castle").is_short);
    }

    #[test]
    fn long_castle_allowed_when_only_b_file_is_attacked() {
        // b1 is crossed by the rook but not by the king.
        let game = parse_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("fixture FEN should parse");
        let moves = castling_moves(&game.board, &game.castling_rights, Color::Light);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn king_in_check_cannot_castle() {
        // Dark rook on e8 checks the king; neither transit square is covered.
        let game = parse_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fixture FEN should parse");
        assert!(game.in_check);
        assert!(castling_moves(&game.board, &game.castling_rights, Color::Light).is_empty());
        assert!(game.legal_moves().iter().all(|mv| mv.castle.is_none()));
    }
}
