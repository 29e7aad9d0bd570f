//! PGN export of a game's move history.
//!
//! The movetext is produced by replaying the history from the initial
//! position and formatting each move in SAN.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;
use crate::utils::san::move_to_san;

/// Seven-tag roster with today's date, plus SetUp/FEN for non-standard starts.
pub fn default_headers(initial_state: &GameState, result: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Sable Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), result.to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }
    headers
}

pub fn write_pgn(initial_state: &GameState, move_history: &[Move], result: &str) -> ChessResult<String> {
    write_pgn_with_headers(initial_state, move_history, &default_headers(initial_state, result))
}

pub fn write_pgn_with_headers(
    initial_state: &GameState,
    move_history: &[Move],
    headers: &BTreeMap<String, String>,
) -> ChessResult<String> {
    let mut out = String::new();
    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut state = initial_state.clone();
    let mut parts = Vec::<String>::with_capacity(move_history.len() + 1);
    for (idx, mv) in move_history.iter().enumerate() {
        if !state.legal_moves().contains(mv) {
            return Err(ChessErrors::IllegalMove {
                from: mv.from,
                to: mv.to,
                promotion: mv.promotion,
            });
        }

        let san = move_to_san(&mut state, mv);
        match (state.side_to_move, idx) {
            (Color::Light, _) => parts.push(format!("{}. {}", state.fullmove_number, san)),
            (Color::Dark, 0) => parts.push(format!("{}... {}", state.fullmove_number, san)),
            (Color::Dark, _) => parts.push(san),
        }
        state.make_move(*mv);
    }

    let result = headers.get("Result").map(String::as_str).unwrap_or("*");
    parts.push(result.to_owned());
    out.push_str(&parts.join(" "));
    out.push('\n');

    Ok(out)
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::write_pgn;
    use crate::game_state::game_state::GameState;

    #[test]
    fn fools_mate_movetext() {
        let initial = GameState::new_game();
        let mut game = initial.clone();
        game.play_coordinates(&["f2f3", "e7e5", "g2g4", "d8h4"]).expect("legal");

        let pgn = write_pgn(&initial, &game.move_history(), game.status().result_token())
            .expect("history should format");
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.contains("[Date \""));
        assert!(pgn.trim_end().ends_with("1. f3 e5 2. g4 Qh4# 0-1"));
        assert!(!pgn.contains("SetUp"));
    }

    #[test]
    fn dark_to_move_start_uses_ellipsis() {
        let initial = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 12").expect("fixture FEN should parse");
        let mut game = initial.clone();
        game.play_coordinates(&["e8d7", "a1a7"]).expect("legal");

        let pgn = write_pgn(&initial, &game.move_history(), "*").expect("history should format");
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.trim_end().ends_with("12... Kd7 13. Ra7+ *"));
    }
}
