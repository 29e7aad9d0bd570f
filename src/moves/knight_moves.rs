use crate::game_state::chess_types::{offset_square, Square};

/// Knight jumps in generation order, clockwise from one-file-right two-ranks-up.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

#[inline]
pub fn knight_targets(square: Square) -> impl Iterator<Item = Square> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(d_file, d_rank)| offset_square(square, d_file, d_rank))
}
