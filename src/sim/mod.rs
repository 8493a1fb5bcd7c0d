//! Match simulation module
//!
//! All gameplay logic lives here. No rendering, audio or storage:
//! - Frame time normalized to nominal frames, clamped against jitter
//! - Seeded RNG only
//! - Fixed tick order (input, opponent, ball, collisions, anti-stall, goals)

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod geometry;
pub mod input;
pub mod opponent;
pub mod physics;
pub mod rules;
pub mod state;
pub mod tick;
pub mod watchdog;

pub use autopilot::{Autopilot, ChaseBot};
pub use collision::{Contact, TouchOutcome, circle_overlap, resolve_touch};
pub use difficulty::{DifficultyProfile, Tier, next_level, normalize_level};
pub use geometry::PitchGeometry;
pub use input::{InputAdapter, InputMode, TickInput};
pub use rules::{MatchPhase, MatchResult, MatchState, MatchSummary};
pub use state::{Actor, Ball, GameState};
pub use tick::tick;
pub use watchdog::StallWatchdog;
