use crate::game_state::chess_types::{offset_square, Square};

/// One-step king moves in generation order.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

#[inline]
pub fn king_targets(square: Square) -> impl Iterator<Item = Square> {
    KING_OFFSETS
        .into_iter()
        .filter_map(move |(d_file, d_rank)| offset_square(square, d_file, d_rank))
}

#[cfg(test)]
mod tests {
    use super::king_targets;

    #[test]
    fn king_targets_respect_edges() {
        assert_eq!(king_targets(27).count(), 8);
        assert_eq!(king_targets(0).count(), 3);
        assert_eq!(king_targets(4).count(), 5);
    }
}
