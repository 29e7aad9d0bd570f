//! Standard algebraic notation for move logs (`Nf3`, `exd5`, `O-O`, `e8=Q+`).

use crate::game_state::board::Board;
use crate::game_state::chess_types::{file_of, rank_of, PieceKind};
use crate::game_state::game_state::GameState;
use crate::game_state::game_status::GameStatus;
use crate::move_generation::move_generator::LegalMoves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};

/// SAN of `mv` in the current position, check and mate marks included.
///
/// The move is made and unmade on `game` to find the suffix; the position is
/// left as it was.
pub fn move_to_san(game: &mut GameState, mv: &Move) -> String {
    let mut san = san_body(&game.board, game.legal_moves(), mv);
    game.make_move(*mv);
    san.push_str(check_suffix(game));
    game.unmake_move();
    san
}

/// SAN without the check suffix.
pub fn san_body(board: &Board, legal: &LegalMoves, mv: &Move) -> String {
    if let Some(castle) = mv.castle {
        return if castle.is_short { "O-O" } else { "O-O-O" }.to_owned();
    }

    let mut out = String::new();
    if mv.kind == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(file_char(mv.from));
            out.push('x');
        }
        out.push_str(&square_to_algebraic(mv.to));
        if let Some(kind) = mv.promotion {
            out.push('=');
            out.push(kind.symbol());
        }
        return out;
    }

    out.push(mv.kind.symbol());
    out.push_str(&disambiguation(board, legal, mv));
    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(mv.to));
    out
}

/// `#` for mate, `+` for any other check, including a check that also
/// completes a draw.
pub fn check_suffix(game: &GameState) -> &'static str {
    match game.status() {
        GameStatus::Checkmate { .. } => "#",
        _ if game.in_check => "+",
        _ => "",
    }
}

fn disambiguation(board: &Board, legal: &LegalMoves, mv: &Move) -> String {
    let rivals: Vec<&Move> = legal
        .iter()
        .filter(|other| {
            other.piece != mv.piece
                && other.to == mv.to
                && board.piece(other.piece).kind == mv.kind
        })
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|other| file_of(other.from) != file_of(mv.from)) {
        return file_char(mv.from).to_string();
    }
    if rivals.iter().all(|other| rank_of(other.from) != rank_of(mv.from)) {
        return rank_char(mv.from).to_string();
    }
    square_to_algebraic(mv.from)
}

#[cfg(test)]
mod tests {
    use super::move_to_san;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn san_of(game: &mut GameState, from: &str, to: &str) -> String {
        let from = algebraic_to_square(from).expect("from square");
        let to = algebraic_to_square(to).expect("to square");
        let mv = game.find_move(from, to, None).expect("move should be legal");
        move_to_san(game, &mv)
    }

    #[test]
    fn opening_moves_and_captures() {
        let mut game = GameState::new_game();
        assert_eq!(san_of(&mut game, "g1", "f3"), "Nf3");
        game.play_coordinates(&["e2e4", "d7d5"]).expect("legal");
        assert_eq!(san_of(&mut game, "e4", "d5"), "exd5");
        assert_eq!(game.get_fen(), "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
    }

    #[test]
    fn castles_and_mate_marks() {
        let mut game = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fixture FEN should parse");
        assert_eq!(san_of(&mut game, "e1", "g1"), "O-O");
        assert_eq!(san_of(&mut game, "e1", "c1"), "O-O-O");

        let mut game = GameState::new_game();
        game.play_coordinates(&["f2f3", "e7e5", "g2g4"]).expect("legal");
        assert_eq!(san_of(&mut game, "d8", "h4"), "Qh4#");
    }

    #[test]
    fn rook_moves_are_disambiguated() {
        let mut game = parse_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1").expect("fixture FEN should parse");
        assert_eq!(san_of(&mut game, "a1", "d1"), "Rad1");
        assert_eq!(san_of(&mut game, "h1", "f1"), "Rhf1");

        let mut game = parse_fen("R7/8/7k/8/8/8/8/R3K3 w - - 0 1").expect("fixture FEN should parse");
        assert_eq!(san_of(&mut game, "a1", "a4"), "R1a4");
    }

    #[test]
    fn promotion_with_check() {
        let mut game = parse_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").expect("fixture FEN should parse");
        let from = algebraic_to_square("e7").expect("e7");
        let to = algebraic_to_square("e8").expect("e8");
        let mv = game
            .find_move(from, to, Some(crate::game_state::chess_types::PieceKind::Queen))
            .expect("promotion is legal");
        assert_eq!(move_to_san(&mut game, &mv), "e8=Q+");
    }
}
