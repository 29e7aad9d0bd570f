//! GameState-to-FEN snapshot.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state),
        side_to_move,
        generate_castling_field(game_state.castling_rights),
        generate_en_passant_field(game_state),
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match game_state.board.piece_at(square_of(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece.color, piece.kind));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

pub fn piece_to_fen_char(color: Color, kind: PieceKind) -> char {
    match color {
        Color::Light => kind.symbol(),
        Color::Dark => kind.symbol().to_ascii_lowercase(),
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();
    if rights.light_short {
        out.push('K');
    }
    if rights.light_long {
        out.push('Q');
    }
    if rights.dark_short {
        out.push('k');
    }
    if rights.dark_long {
        out.push('q');
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

/// Square behind a pawn that double-stepped on the previous ply.
fn generate_en_passant_field(game_state: &GameState) -> String {
    let board = &game_state.board;
    let Some(previous_ply) = board.ply.checked_sub(1) else {
        return "-".to_owned();
    };
    let mover = game_state.side_to_move.opposite();

    board
        .pieces_of(mover)
        .find(|piece| {
            piece.kind == PieceKind::Pawn
                && piece.move_count == 1
                && piece.last_move_ply == Some(previous_ply)
                && piece
                    .square
                    .is_some_and(|sq| rank_of(sq) == game_state.side_to_move.en_passant_rank())
        })
        .and_then(|pawn| pawn.square)
        .and_then(|sq| offset_square(sq, 0, -mover.pawn_direction()))
        .map(square_to_algebraic)
        .unwrap_or_else(|| "-".to_owned())
}
