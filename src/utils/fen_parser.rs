//! FEN-to-GameState parser.
//!
//! Piece ids are assigned the way a real game would have produced them:
//! kings always get ids 4 and 20, a piece standing on its own starting square
//! gets that square's starting id, and every other piece takes the lowest
//! free id of its color. Castling flags from the record are kept only when the
//! king and the matching rook stand on their home squares, and they set the
//! move counts that castling legality reads.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castling_geometry, castling_rook_id, first_id, king_id, starting_placement};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let invalid = |reason: &str| ChessErrors::InvalidFen(format!("{reason}: {fen}"));
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");
    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let placements = parse_board(board_part).map_err(|reason| invalid(&reason))?;
    let side_to_move = match side_part {
        "w" => Color::Light,
        "b" => Color::Dark,
        _ => return Err(invalid("side to move must be w or b")),
    };
    let mut castling_rights = parse_castling_rights(castling_part).map_err(|reason| invalid(&reason))?;
    let en_passant = match en_passant_part {
        "-" => None,
        square => Some(algebraic_to_square(square).map_err(|_| invalid("bad en-passant square"))?),
    };
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid("bad halfmove clock"))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid("bad fullmove number"))?;

    let mut board = assign_ids(&placements).map_err(|reason| invalid(&reason))?;
    sanitize_castling_rights(&board, &mut castling_rights);
    set_move_counts(&mut board, &castling_rights);
    if let Some(square) = en_passant {
        mark_double_step(&mut board, side_to_move, square).map_err(|reason| invalid(&reason))?;
    }

    Ok(GameState::from_setup(
        board,
        side_to_move,
        castling_rights,
        halfmove_clock,
        fullmove_number,
    ))
}

fn parse_board(board_part: &str) -> Result<Vec<(Square, Color, PieceKind)>, String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("board layout must contain 8 ranks".to_owned());
    }

    let mut placements = Vec::new();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("invalid empty-square count '{ch}'"));
                }
                if file + empty_count as u8 > 8 {
                    return Err("board rank has too many files".to_owned());
                }
                file += empty_count as u8;
                continue;
            }

            let kind = PieceKind::from_symbol(ch).ok_or_else(|| format!("invalid piece character '{ch}'"))?;
            let color = if ch.is_ascii_uppercase() {
                Color::Light
            } else {
                Color::Dark
            };
            if file >= 8 {
                return Err("board rank has too many files".to_owned());
            }
            placements.push((square_of(file, rank), color, kind));
            file += 1;
        }

        if file != 8 {
            return Err("board rank does not sum to 8 files".to_owned());
        }
    }

    placements.sort_by_key(|(square, _, _)| *square);
    Ok(placements)
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.light_short = true,
            'Q' => rights.light_long = true,
            'k' => rights.dark_short = true,
            'q' => rights.dark_long = true,
            _ => return Err(format!("invalid castling rights character '{ch}'")),
        }
    }
    Ok(rights)
}

fn assign_ids(placements: &[(Square, Color, PieceKind)]) -> Result<Board, String> {
    let mut slots: [Option<(Square, PieceKind)>; NUM_PIECES] = [None; NUM_PIECES];
    let mut pending = Vec::new();

    for &(square, color, kind) in placements {
        let id = if kind == PieceKind::King {
            Some(king_id(color))
        } else {
            (first_id(color)..first_id(color) + 16)
                .find(|&id| starting_placement(id) == (square, kind) && id != king_id(color))
        };

        match id {
            Some(id) if slots[id as usize].is_none() => slots[id as usize] = Some((square, kind)),
            Some(_) => return Err(format!("more than one {color:?} king")),
            None => pending.push((square, color, kind)),
        }
    }

    for (square, color, kind) in pending {
        let free = (first_id(color)..first_id(color) + 16)
            .find(|&id| id != king_id(color) && slots[id as usize].is_none())
            .ok_or_else(|| format!("{color:?} has more than sixteen pieces"))?;
        slots[free as usize] = Some((square, kind));
    }

    let mut board = Board::empty();
    for color in [Color::Light, Color::Dark] {
        if slots[king_id(color) as usize].is_none() {
            return Err(format!("{color:?} king is missing"));
        }
    }
    for (idx, slot) in slots.iter().enumerate() {
        if let Some((square, kind)) = *slot {
            let id = idx as PieceId;
            board.piece_mut(id).kind = kind;
            board.place(id, square);
        }
    }
    Ok(board)
}

fn sanitize_castling_rights(board: &Board, rights: &mut CastlingRights) {
    for color in [Color::Light, Color::Dark] {
        for is_short in [true, false] {
            let geometry = castling_geometry(color, is_short);
            let in_place = board.id_at(geometry.king_from) == Some(king_id(color))
                && board.id_at(geometry.rook_from) == Some(castling_rook_id(color, is_short))
                && board.piece(castling_rook_id(color, is_short)).kind == PieceKind::Rook;
            if !in_place {
                rights.revoke(color, is_short);
            }
        }
    }
}

fn set_move_counts(board: &mut Board, rights: &CastlingRights) {
    for idx in 0..NUM_PIECES {
        let id = idx as PieceId;
        let piece = *board.piece(id);
        let Some(square) = piece.square else {
            continue;
        };

        let unmoved = match piece.kind {
            PieceKind::Pawn => rank_of(square) == piece.color.pawn_start_rank(),
            PieceKind::King => {
                rights.allows(piece.color, true) || rights.allows(piece.color, false)
            }
            PieceKind::Rook if id == castling_rook_id(piece.color, true) => rights.allows(piece.color, true),
            PieceKind::Rook if id == castling_rook_id(piece.color, false) => rights.allows(piece.color, false),
            _ => starting_placement(id) == (square, piece.kind),
        };
        board.piece_mut(id).move_count = if unmoved { 0 } else { 1 };
    }
}

/// The pawn in front of the en-passant square has just made a double step.
fn mark_double_step(board: &mut Board, side_to_move: Color, square: Square) -> Result<(), String> {
    let mover = side_to_move.opposite();
    let pawn_square = offset_square(square, 0, mover.pawn_direction())
        .ok_or_else(|| "en-passant square on the edge".to_owned())?;
    let pawn = board
        .piece_at(pawn_square)
        .filter(|p| p.kind == PieceKind::Pawn && p.color == mover && rank_of(pawn_square) == side_to_move.en_passant_rank())
        .map(|p| p.id)
        .ok_or_else(|| "no pawn behind the en-passant square".to_owned())?;

    let record = board.piece_mut(pawn);
    record.move_count = 1;
    record.last_move_ply = Some(0);
    board.ply = 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{CastlingRights, Color, PieceKind};
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&game_state));

        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.board, Board::starting_position());
        assert_eq!(game_state.castling_rights, CastlingRights::ALL);
    }

    #[test]
    fn kings_keep_fixed_ids_and_extras_fill_free_slots() {
        let game = parse_fen("k7/8/8/8/8/8/8/QQ2K3 w - - 0 1").expect("fixture FEN should parse");
        assert_eq!(game.board.id_at(4), Some(4));
        assert_eq!(game.board.id_at(56), Some(20));
        // a1 is the light queen-side rook's square, so the queen there is not
        // given id 0 by placement; both queens take the lowest free ids.
        assert_eq!(game.board.id_at(0), Some(0));
        assert_eq!(game.board.id_at(1), Some(1));
        assert_eq!(game.board.piece(0).kind, PieceKind::Queen);
    }

    #[test]
    fn castling_flag_without_rook_is_dropped() {
        let game = parse_fen("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1").expect("fixture FEN should parse");
        assert!(game.castling_rights.light_short);
        assert!(!game.castling_rights.light_long);
        assert_eq!(game.board.piece(4).move_count, 0);
        assert_eq!(game.board.piece(7).move_count, 0);
    }

    #[test]
    fn missing_king_and_bad_layout_are_rejected() {
        assert!(matches!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"), Err(ChessErrors::InvalidFen(_))));
        assert!(matches!(parse_fen("4k3/8/8/8/8/8/4K3 w - - 0 1"), Err(ChessErrors::InvalidFen(_))));
        assert!(matches!(parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"), Err(ChessErrors::InvalidFen(_))));
        assert!(matches!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - e3 0 1"), Err(ChessErrors::InvalidFen(_))));
    }

    #[test]
    fn overlong_empty_runs_are_rejected() {
        let long_rank = "8".repeat(32);
        let fen = format!("{long_rank}/8/8/8/8/8/8/4K2k w - - 0 1");
        assert!(matches!(parse_fen(&fen), Err(ChessErrors::InvalidFen(_))));
        assert!(matches!(parse_fen("4k3/8/8/8/8/8/8/4K35 w - - 0 1"), Err(ChessErrors::InvalidFen(_))));
    }
}
