//! Game events emitted to presentation, audio and analytics collaborators
//!
//! Events are fire-and-forget. The simulation pushes them into a per-tick
//! buffer; the session forwards the buffer to its [`EventSink`].

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::sim::{MatchResult, Tier};

/// Which head touched/scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The local player (CavBot FC)
    #[serde(rename = "you")]
    Player,
    /// The AI opponent (the Imposter)
    #[serde(rename = "imposter")]
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "you",
            Side::Opponent => "imposter",
        }
    }
}

/// Everything the core reports to the outside world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    /// A head touched the ball
    Touch { who: Side, streak: u32 },
    /// A touch sent the ball at the other goal with pace
    Shot { who: Side },
    /// A touch inside the toucher's own defensive zone
    Save { who: Side },
    Goal { scorer: Side, you_score: u8, opp_score: u8 },
    MatchStart { match_number: u32, level: u32, tier: Tier, manual: bool },
    MatchEnd {
        result: MatchResult,
        score_you: u8,
        score_imposter: u8,
        elapsed_ms: u64,
        best_streak: u32,
    },
    LevelAdvance { from: u32, to: u32 },
    /// No input for a while during a running match
    IdleHint { idle_ms: u64 },
    /// Lifetime best touch streak was beaten
    StreakRecord { best_streak: u32 },
}

/// Consumer of game events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

/// Recording sink; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Copy of the recorded events
    pub fn snapshot(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: GameEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Sink that narrates events through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: GameEvent) {
        match &event {
            GameEvent::Touch { .. } | GameEvent::Shot { .. } | GameEvent::Save { .. } => {
                log::debug!("{:?}", event)
            }
            GameEvent::IdleHint { idle_ms } => log::debug!("Idle for {} ms", idle_ms),
            _ => log::info!("{:?}", event),
        }
    }
}
