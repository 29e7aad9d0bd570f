//! Output shared by the per-kind piece scanners.
//!
//! A scan of one piece yields two things at once: the pseudo-legal moves of
//! that piece and the move-board annotations it contributes. Every square a
//! scan reads gets an annotation, even a neutral one, so the attack index can
//! tell which pieces must be rescanned when a square changes.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::piece_record::Piece;
use crate::moves::move_descriptions::{Capture, Move};

/// One move-board entry attached to a square.
///
/// `attackable`: the piece could move to or capture on this square.
/// `defends`: the square holds an ally the piece would recapture on.
/// Both flags false marks a square the scan looked at without reaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Annotation {
    pub id: PieceId,
    pub attackable: bool,
    pub defends: bool,
}

impl Annotation {
    #[inline]
    pub const fn new(id: PieceId, attackable: bool, defends: bool) -> Self {
        Self {
            id,
            attackable,
            defends,
        }
    }

    /// Would a king of the other color be unsafe on this square?
    #[inline]
    pub const fn controls(&self) -> bool {
        self.attackable || self.defends
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceScan {
    pub annotations: Vec<(Square, Annotation)>,
    pub moves: Vec<Move>,
    /// Piece pinned against the enemy king by this slider.
    pub pinned: Option<PieceId>,
}

impl PieceScan {
    #[inline]
    pub fn annotate(&mut self, square: Square, id: PieceId, attackable: bool, defends: bool) {
        self.annotations
            .push((square, Annotation::new(id, attackable, defends)));
    }
}

/// Classify one target of a non-sliding piece: empty squares and enemy
/// pieces are attackable, allies are defended. Enemy kings are never
/// captured, only attacked.
pub fn scan_step_target(board: &Board, piece: &Piece, from: Square, to: Square, out: &mut PieceScan) {
    match board.piece_at(to) {
        None => {
            out.annotate(to, piece.id, true, false);
            out.moves
                .push(Move::quiet(piece.id, piece.kind, piece.color, from, to));
        }
        Some(target) if target.color != piece.color => {
            out.annotate(to, piece.id, true, false);
            if target.kind != PieceKind::King {
                out.moves.push(
                    Move::quiet(piece.id, piece.kind, piece.color, from, to)
                        .with_capture(capture_of(target)),
                );
            }
        }
        Some(_) => out.annotate(to, piece.id, false, true),
    }
}

#[inline]
pub fn capture_of(target: &Piece) -> Capture {
    Capture {
        id: target.id,
        square: target.square.unwrap_or_default(),
        kind: target.kind,
    }
}

#[derive(Clone, Copy)]
enum RayPhase {
    Open,
    PastEnemyKing,
    LookThrough(PieceId),
}

/// Walk every ray of a slider.
///
/// Open squares are attackable and produce moves. The first blocker ends the
/// reachable part of the ray. Past an enemy king the ray keeps marking empty
/// squares attackable so the king cannot retreat along it. Past any other
/// enemy blocker the ray looks on to the next occupied square and records a
/// pin when that square holds the enemy king.
pub fn scan_slider(board: &Board, piece: &Piece, directions: &[(i8, i8)], out: &mut PieceScan) {
    let Some(from) = piece.square else {
        return;
    };

    for &(d_file, d_rank) in directions {
        let mut phase = RayPhase::Open;
        let mut cursor = from;

        while let Some(square) = offset_square(cursor, d_file, d_rank) {
            cursor = square;
            let occupant = board.piece_at(square);

            match phase {
                RayPhase::Open => match occupant {
                    None => {
                        out.annotate(square, piece.id, true, false);
                        out.moves
                            .push(Move::quiet(piece.id, piece.kind, piece.color, from, square));
                    }
                    Some(target) if target.color != piece.color => {
                        out.annotate(square, piece.id, true, false);
                        if target.kind == PieceKind::King {
                            phase = RayPhase::PastEnemyKing;
                        } else {
                            out.moves.push(
                                Move::quiet(piece.id, piece.kind, piece.color, from, square)
                                    .with_capture(capture_of(target)),
                            );
                            phase = RayPhase::LookThrough(target.id);
                        }
                    }
                    Some(_) => {
                        out.annotate(square, piece.id, false, true);
                        break;
                    }
                },
                RayPhase::PastEnemyKing => match occupant {
                    None => out.annotate(square, piece.id, true, false),
                    Some(target) => {
                        out.annotate(square, piece.id, false, target.color == piece.color);
                        break;
                    }
                },
                RayPhase::LookThrough(blocker) => match occupant {
                    None => out.annotate(square, piece.id, false, false),
                    Some(target) => {
                        out.annotate(square, piece.id, false, false);
                        if target.color != piece.color && target.kind == PieceKind::King {
                            out.pinned = Some(blocker);
                        }
                        break;
                    }
                },
            }
        }
    }
}
