//! Notifications raised by the game controller for a presentation layer.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::game_status::DrawReason;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MoveApplied(Move),
    MoveUndone(Move),
    CheckAsserted { color: Color },
    CheckCleared { color: Color },
    Checkmate { winner: Color },
    Stalemate,
    Draw { reason: DrawReason },
    /// A pawn reached `square` and input is blocked until a piece is chosen.
    PromotionChoiceNeeded { square: Square },
}

pub trait GameEventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl GameEventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Keeps every event in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
}

impl RecordingSink {
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameEventSink for RecordingSink {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(*event);
    }
}
