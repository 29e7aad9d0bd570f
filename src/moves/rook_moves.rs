/// Orthogonal ray directions as `(d_file, d_rank)`.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
