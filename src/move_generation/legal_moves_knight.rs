use crate::game_state::board::Board;
use crate::game_state::piece_record::Piece;
use crate::move_generation::legal_move_shared::{scan_step_target, PieceScan};
use crate::moves::knight_moves::knight_targets;

pub fn scan_knight(board: &Board, piece: &Piece, out: &mut PieceScan) {
    let Some(from) = piece.square else {
        return;
    };
    for to in knight_targets(from) {
        scan_step_target(board, piece, from, to, out);
    }
}

#[cfg(test)]
mod tests {
    use super::scan_knight;
    use crate::game_state::board::Board;
    use crate::move_generation::legal_move_shared::PieceScan;

    #[test]
    fn starting_knight_reaches_two_squares_and_defends_one() {
        let board = Board::starting_position();
        let mut scan = PieceScan::default();
        scan_knight(&board, board.piece(1), &mut scan);

        assert_eq!(scan.moves.len(), 2);
        let defended: Vec<_> = scan
            .annotations
            .iter()
            .filter(|(_, a)| a.defends)
            .map(|(sq, _)| *sq)
            .collect();
        assert_eq!(defended, vec![11]);
    }
}
