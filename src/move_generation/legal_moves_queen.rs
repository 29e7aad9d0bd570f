use crate::game_state::board::Board;
use crate::game_state::piece_record::Piece;
use crate::move_generation::legal_move_shared::{scan_slider, PieceScan};
use crate::moves::queen_moves::QUEEN_DIRECTIONS;

pub fn scan_queen(board: &Board, piece: &Piece, out: &mut PieceScan) {
    scan_slider(board, piece, &QUEEN_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::scan_queen;
    use crate::move_generation::legal_move_shared::PieceScan;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn centralized_queen_on_empty_board_has_27_moves() {
        let game = parse_fen("8/7k/8/8/3Q4/8/K7/8 w - - 0 1").expect("fixture FEN should parse");
        let queen = game.board.piece_at(27).expect("queen on d4");
        let mut scan = PieceScan::default();
        scan_queen(&game.board, queen, &mut scan);
        assert_eq!(scan.moves.len(), 27);
    }
}
