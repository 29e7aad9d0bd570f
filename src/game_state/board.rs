//! Mechanical board storage: an 8x8 grid of piece ids plus the piece arena.
//!
//! The grid (`square -> id`) and the arena (`id -> square`) are kept as
//! mutual inverses by every mutator. Nothing here knows chess legality.

use crate::game_state::chess_rules::{king_id, starting_placement};
use crate::game_state::chess_types::*;
use crate::game_state::piece_record::Piece;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<PieceId>; NUM_SQUARES],
    pieces: [Piece; NUM_PIECES],
    /// Half-moves applied since setup.
    pub ply: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Board with every piece off the board. Kinds default to the starting
    /// assignment so a fresh arena is always well-formed.
    pub fn empty() -> Self {
        let mut pieces = [Piece::new(0, PieceKind::Pawn); NUM_PIECES];
        for (idx, piece) in pieces.iter_mut().enumerate() {
            let id = idx as PieceId;
            *piece = Piece::new(id, starting_placement(id).1);
        }

        Self {
            squares: [None; NUM_SQUARES],
            pieces,
            ply: 0,
        }
    }

    /// The standard starting layout with ids fixed by `starting_placement`.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for id in 0..NUM_PIECES as PieceId {
            let (square, _) = starting_placement(id);
            board.place(id, square);
        }
        board
    }

    /// Put an off-board piece on an empty square.
    pub fn place(&mut self, id: PieceId, square: Square) {
        debug_assert!(self.squares[square as usize].is_none(), "place onto occupied square");
        debug_assert!(self.pieces[id as usize].square.is_none(), "place of an on-board piece");
        self.squares[square as usize] = Some(id);
        self.pieces[id as usize].square = Some(square);
    }

    /// Take whatever stands on `square` off the board.
    pub fn vacate(&mut self, square: Square) -> Option<PieceId> {
        let id = self.squares[square as usize].take()?;
        self.pieces[id as usize].square = None;
        Some(id)
    }

    /// Relocate an on-board piece to an empty square.
    pub fn move_piece(&mut self, id: PieceId, to: Square) {
        if let Some(from) = self.pieces[id as usize].square {
            self.squares[from as usize] = None;
        }
        debug_assert!(self.squares[to as usize].is_none(), "move onto occupied square");
        self.squares[to as usize] = Some(id);
        self.pieces[id as usize].square = Some(to);
    }

    #[inline]
    pub fn id_at(&self, square: Square) -> Option<PieceId> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square as usize].map(|id| &self.pieces[id as usize])
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square as usize].is_none()
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id as usize]
    }

    #[inline]
    pub fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id as usize]
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// On-board pieces of one color in ascending id order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces
            .iter()
            .filter(move |piece| piece.color == color && piece.is_on_board())
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces[king_id(color) as usize].square
    }

    /// Board-occupancy snapshot as one byte per square: 0 for empty, otherwise
    /// `1 + color * 6 + kind`.
    pub fn occupancy_codes(&self) -> [u8; NUM_SQUARES] {
        let mut codes = [0u8; NUM_SQUARES];
        for (square, code) in codes.iter_mut().enumerate() {
            if let Some(piece) = self.piece_at(square as Square) {
                *code = 1 + (piece.color.index() * 6 + piece.kind.index()) as u8;
            }
        }
        codes
    }

    /// Both maps agree for every square and every piece.
    pub fn is_consistent(&self) -> bool {
        let grid_ok = self.squares.iter().enumerate().all(|(square, slot)| match slot {
            Some(id) => self.pieces[*id as usize].square == Some(square as Square),
            None => true,
        });
        let arena_ok = self.pieces.iter().all(|piece| match piece.square {
            Some(square) => self.squares[square as usize] == Some(piece.id),
            None => true,
        });
        grid_ok && arena_ok
    }
}
