use crate::game_state::chess_types::{offset_square, Color, Square};

/// Diagonal capture targets of a pawn of `color` standing on `square`,
/// queen-side first.
#[inline]
pub fn pawn_capture_targets(color: Color, square: Square) -> impl Iterator<Item = Square> {
    let d_rank = color.pawn_direction();
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_file| offset_square(square, d_file, d_rank))
}

/// Single push target.
#[inline]
pub fn pawn_push_target(color: Color, square: Square) -> Option<Square> {
    offset_square(square, 0, color.pawn_direction())
}

/// Double push target, only from the pawn's starting rank.
#[inline]
pub fn pawn_double_push_target(color: Color, square: Square) -> Option<Square> {
    if square / 8 != color.pawn_start_rank() {
        return None;
    }
    offset_square(square, 0, 2 * color.pawn_direction())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_pawn_has_one_capture_target() {
        let a2 = 8u8;
        assert_eq!(pawn_capture_targets(Color::Light, a2).collect::<Vec<_>>(), vec![17]);
        let h7 = 55u8;
        assert_eq!(pawn_capture_targets(Color::Dark, h7).collect::<Vec<_>>(), vec![46]);
    }

    #[test]
    fn double_push_only_from_start_rank() {
        assert_eq!(pawn_double_push_target(Color::Light, 12), Some(28));
        assert_eq!(pawn_double_push_target(Color::Light, 20), None);
        assert_eq!(pawn_double_push_target(Color::Dark, 52), Some(36));
        assert_eq!(pawn_push_target(Color::Dark, 52), Some(44));
    }
}
