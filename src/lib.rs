//! CavBot FC - head-ball arcade match simulation
//!
//! Core modules:
//! - `sim`: Match simulation (physics, collisions, AI opponent, match rules)
//! - `session`: Host-facing frame loop with staged input
//! - `events`: Game events and sinks for presentation/analytics collaborators
//! - `progression`: Cross-match record and level cycling
//! - `persistence`: Progression stores (memory, JSON file, LocalStorage)
//! - `platform`: Browser binding
//! - `tuning`: Data-driven feel constants

pub mod events;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod session;
pub mod sim;
pub mod tuning;

pub use events::{EventLog, EventSink, GameEvent, LogSink, Side};
pub use persistence::{MemoryStore, ProgressionStore, StoreError};
pub use progression::ProgressionState;
pub use session::{SessionContext, SimulationLoop};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frame length; `dt == 1.0` means one frame of this length
    pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Frame-time jitter clamp (in nominal frames)
    pub const DT_MIN: f32 = 0.55;
    pub const DT_MAX: f32 = 1.85;
    /// Upper bound on a single reported frame (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f32 = 250.0;

    /// Pitch layout
    pub const PITCH_PADDING: f32 = 14.0;
    pub const GOAL_DEPTH: f32 = 18.0;
    pub const GOAL_MOUTH_MIN: f32 = 120.0;
    pub const GOAL_MOUTH_MAX: f32 = 190.0;
    /// Goal mouth as a fraction of pitch height (before clamping)
    pub const GOAL_MOUTH_RATIO: f32 = 0.42;

    /// Head (actor) and ball radii
    pub const HEAD_RADIUS: f32 = 28.0;
    pub const BALL_RADIUS: f32 = 9.0;

    /// Goals needed to win a match
    pub const TARGET_GOALS: u8 = 3;

    /// Level counter range (cyclic, 1-based)
    pub const MAX_LEVEL: u32 = 6;
}

/// Clamp `value` into `[lo, hi]`, falling back to the midpoint when the range
/// is inverted (a pitch smaller than its own margins).
#[inline]
pub fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        return (lo + hi) * 0.5;
    }
    if value.is_nan() {
        return (lo + hi) * 0.5;
    }
    value.clamp(lo, hi)
}

/// Per-tick probability for `Rng::random_bool`; anything non-finite counts as never
#[inline]
pub fn chance(p: f32) -> f64 {
    if p.is_finite() { p.clamp(0.0, 1.0) as f64 } else { 0.0 }
}

/// Normalize a raw frame duration into simulation steps
#[inline]
pub fn frame_dt(frame_ms: f32) -> f32 {
    use consts::*;
    if !frame_ms.is_finite() {
        return 1.0;
    }
    (frame_ms / NOMINAL_FRAME_MS).clamp(DT_MIN, DT_MAX)
}
