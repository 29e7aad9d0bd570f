//! Direct attack probes and ray geometry.
//!
//! These helpers read the board only, never the attack index, so they can be
//! run on a scratch copy of the board for the what-if king test.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::pawn_capture_targets;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

/// Ids of `by` pieces attacking `square`, in ascending id order.
pub fn attackers_of(board: &Board, square: Square, by: Color) -> Vec<PieceId> {
    let mut attackers = Vec::new();

    let mut push_if = |target: Square, wanted: &[PieceKind]| {
        if let Some(piece) = board.piece_at(target) {
            if piece.color == by && wanted.contains(&piece.kind) {
                attackers.push(piece.id);
            }
        }
    };

    for target in knight_targets(square) {
        push_if(target, &[PieceKind::Knight]);
    }
    for target in king_targets(square) {
        push_if(target, &[PieceKind::King]);
    }
    // A `by` pawn attacks `square` from where a defender pawn would capture.
    for target in pawn_capture_targets(by.opposite(), square) {
        push_if(target, &[PieceKind::Pawn]);
    }
    for (directions, kinds) in [
        (&ROOK_DIRECTIONS, [PieceKind::Rook, PieceKind::Queen]),
        (&BISHOP_DIRECTIONS, [PieceKind::Bishop, PieceKind::Queen]),
    ] {
        for &(d_file, d_rank) in directions.iter() {
            if let Some(blocker) = first_occupied(board, square, d_file, d_rank) {
                push_if(blocker, &kinds);
            }
        }
    }

    attackers.sort_unstable();
    attackers
}

pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    !attackers_of(board, square, by).is_empty()
}

/// Enemy pieces giving check to `color`.
pub fn checkers_of(board: &Board, color: Color) -> Vec<PieceId> {
    match board.king_square(color) {
        Some(king) => attackers_of(board, king, color.opposite()),
        None => Vec::new(),
    }
}

pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    !checkers_of(board, color).is_empty()
}

/// What-if test: would `mv` leave its own king attacked?
///
/// Applies the move to a scratch copy so the caller's board is untouched.
pub fn leaves_king_in_check(board: &Board, mv: &Move) -> bool {
    let mut scratch = board.clone();
    apply_move(&mut scratch, mv);
    is_king_in_check(&scratch, mv.color)
}

fn first_occupied(board: &Board, from: Square, d_file: i8, d_rank: i8) -> Option<Square> {
    let mut cursor = from;
    while let Some(square) = offset_square(cursor, d_file, d_rank) {
        if !board.is_empty(square) {
            return Some(square);
        }
        cursor = square;
    }
    None
}

/// Unit step from `a` toward `b` when they share a rank, file or diagonal.
pub fn ray_step(a: Square, b: Square) -> Option<(i8, i8)> {
    let d_file = file_of(b) as i8 - file_of(a) as i8;
    let d_rank = rank_of(b) as i8 - rank_of(a) as i8;
    if (d_file, d_rank) == (0, 0) {
        return None;
    }
    if d_file == 0 || d_rank == 0 || d_file.abs() == d_rank.abs() {
        Some((d_file.signum(), d_rank.signum()))
    } else {
        None
    }
}

/// Squares strictly between `a` and `b`; empty when they are not aligned.
pub fn squares_between(a: Square, b: Square) -> Vec<Square> {
    let mut between = Vec::new();
    let Some((d_file, d_rank)) = ray_step(a, b) else {
        return between;
    };

    let mut cursor = a;
    while let Some(square) = offset_square(cursor, d_file, d_rank) {
        if square == b {
            break;
        }
        between.push(square);
        cursor = square;
    }
    between
}

/// Is `target` on the line through `origin` and `through`?
///
/// The line must be a rank, file or diagonal. Alignment is decided by exact
/// integer slope equality, i.e. a zero cross product of the two deltas.
pub fn is_on_line(origin: Square, through: Square, target: Square) -> bool {
    if ray_step(origin, through).is_none() {
        return false;
    }
    let (f0, r0) = (file_of(origin) as i16, rank_of(origin) as i16);
    let line = (file_of(through) as i16 - f0, rank_of(through) as i16 - r0);
    let probe = (file_of(target) as i16 - f0, rank_of(target) as i16 - r0);
    line.0 * probe.1 == line.1 * probe.0
}
