//! Pawn scanner.
//!
//! Push squares are recorded with neutral annotations: a pawn never captures
//! forward. Both diagonals are always attackable, occupied or not, since a
//! king may not step onto them. En passant is offered only on the ply right
//! after the adjacent enemy pawn made its double step.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::piece_record::Piece;
use crate::move_generation::legal_move_shared::{capture_of, PieceScan};
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::{pawn_capture_targets, pawn_double_push_target, pawn_push_target};

pub fn scan_pawn(board: &Board, piece: &Piece, out: &mut PieceScan) {
    let Some(from) = piece.square else {
        return;
    };
    let color = piece.color;
    let promotes = |to: Square| rank_of(to) == color.promotion_rank();

    if let Some(push) = pawn_push_target(color, from) {
        out.annotate(push, piece.id, false, false);
        if board.is_empty(push) {
            push_pawn_move(out, Move::quiet(piece.id, piece.kind, color, from, push), promotes(push));

            if let Some(double) = pawn_double_push_target(color, from) {
                if board.is_empty(double) {
                    out.moves
                        .push(Move::quiet(piece.id, piece.kind, color, from, double));
                }
            }
        }
        if let Some(double) = pawn_double_push_target(color, from) {
            out.annotate(double, piece.id, false, false);
        }
    }

    for to in pawn_capture_targets(color, from) {
        match board.piece_at(to) {
            Some(target) if target.color != color => {
                out.annotate(to, piece.id, true, false);
                if target.kind != PieceKind::King {
                    let mv = Move::quiet(piece.id, piece.kind, color, from, to)
                        .with_capture(capture_of(target));
                    push_pawn_move(out, mv, promotes(to));
                }
            }
            Some(_) => out.annotate(to, piece.id, true, true),
            None => out.annotate(to, piece.id, true, false),
        }
    }

    if rank_of(from) == color.en_passant_rank() {
        scan_en_passant(board, piece, from, out);
    }
}

fn scan_en_passant(board: &Board, piece: &Piece, from: Square, out: &mut PieceScan) {
    let Some(previous_ply) = board.ply.checked_sub(1) else {
        return;
    };

    for d_file in [-1i8, 1] {
        let Some(beside) = offset_square(from, d_file, 0) else {
            continue;
        };
        let Some(victim) = board.piece_at(beside) else {
            continue;
        };
        let just_double_stepped = victim.color != piece.color
            && victim.kind == PieceKind::Pawn
            && victim.move_count == 1
            && victim.last_move_ply == Some(previous_ply);
        if !just_double_stepped {
            continue;
        }

        let Some(landing) = offset_square(from, d_file, piece.color.pawn_direction()) else {
            continue;
        };
        if board.is_empty(landing) {
            out.moves.push(
                Move::quiet(piece.id, piece.kind, piece.color, from, landing)
                    .with_capture(capture_of(victim)),
            );
        }
    }
}

fn push_pawn_move(out: &mut PieceScan, mv: Move, promotes: bool) {
    if promotes {
        for kind in PieceKind::PROMOTIONS {
            out.moves.push(mv.with_promotion(kind));
        }
    } else {
        out.moves.push(mv);
    }
}

#[cfg(test)]
mod tests {
    use super::scan_pawn;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::PieceKind;
    use crate::move_generation::legal_move_shared::PieceScan;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_pawn_has_single_and_double_push() {
        let board = Board::starting_position();
        let mut scan = PieceScan::default();
        scan_pawn(&board, board.piece(12), &mut scan);

        let targets: Vec<u8> = scan.moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![20, 28]);
        assert!(scan.annotations.iter().all(|(_, a)| !a.defends || a.attackable));
        assert_eq!(scan.annotations.iter().filter(|(_, a)| a.attackable).count(), 2);
    }

    #[test]
    fn blocked_pawn_cannot_double_push() {
        let game = parse_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("fixture FEN should parse");
        let mut scan = PieceScan::default();
        let pawn = game.board.piece_at(12).expect("pawn on e2");
        scan_pawn(&game.board, pawn, &mut scan);
        assert!(scan.moves.is_empty());
    }

    #[test]
    fn en_passant_offered_right_after_double_step() {
        let game = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("fixture FEN should parse");
        let pawn = game.board.piece_at(36).expect("pawn on e5");
        let mut scan = PieceScan::default();
        scan_pawn(&game.board, pawn, &mut scan);

        let ep: Vec<_> = scan.moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, 43);
        assert_eq!(ep[0].capture.map(|c| c.square), Some(35));
    }

    #[test]
    fn en_passant_not_offered_without_fresh_double_step() {
        let game = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").expect("fixture FEN should parse");
        let pawn = game.board.piece_at(36).expect("pawn on e5");
        let mut scan = PieceScan::default();
        scan_pawn(&game.board, pawn, &mut scan);
        assert!(scan.moves.iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn promotion_expands_to_four_choices() {
        let game = parse_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("fixture FEN should parse");
        let pawn = game.board.piece_at(48).expect("pawn on a7");
        let mut scan = PieceScan::default();
        scan_pawn(&game.board, pawn, &mut scan);

        let kinds: Vec<_> = scan.moves.iter().filter_map(|m| m.promotion).collect();
        assert_eq!(kinds.len(), 8);
        assert_eq!(kinds[0], PieceKind::Queen);
        assert_eq!(scan.moves.iter().filter(|m| m.is_capture()).count(), 4);
    }
}
