//! Difficulty profile derived from the cyclic level counter

use serde::{Deserialize, Serialize};

use crate::clamp_span;
use crate::consts::MAX_LEVEL;
use crate::tuning::Tuning;

/// Display tier shown next to the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Rookie,
    Intermediate,
    Advanced,
    Expert,
}

impl Tier {
    pub fn for_level(level: u32) -> Self {
        match normalize_level(level) {
            1 | 2 => Tier::Rookie,
            3 => Tier::Intermediate,
            4 | 5 => Tier::Advanced,
            _ => Tier::Expert,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Rookie => "Rookie",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
            Tier::Expert => "Expert",
        }
    }
}

/// Bring a persisted level back into `1..=MAX_LEVEL`.
///
/// Zero maps to 1; anything above the range wraps cyclically.
pub fn normalize_level(level: u32) -> u32 {
    if level == 0 {
        1
    } else {
        (level - 1) % MAX_LEVEL + 1
    }
}

/// Level after one more completed match
pub fn next_level(level: u32) -> u32 {
    normalize_level(level) % MAX_LEVEL + 1
}

/// Simulation constants for one match, fixed from kickoff to final whistle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub level: u32,
    pub tier: Tier,
    /// 1.0 at level 1, grows linearly per level
    pub speed_factor: f32,
    pub opponent_max_speed: f32,
    /// Velocity smoothing rate for the opponent (lower = smoother)
    pub opponent_aggression: f32,
    /// How many frames ahead the opponent reads the ball
    pub opponent_prediction_horizon: f32,
    pub ball_max_speed: f32,
    /// Difficulty-scaled base of every opponent kick
    pub opponent_kick_base: f32,
}

impl DifficultyProfile {
    pub fn for_level(level: u32, tuning: &Tuning) -> Self {
        let level = normalize_level(level);
        let steps = (level - 1) as f32;
        let speed_factor = 1.0 + steps * tuning.level_factor_step;
        let aggression = tuning.opponent_aggression_base / speed_factor.max(f32::EPSILON);

        Self {
            level,
            tier: Tier::for_level(level),
            speed_factor,
            opponent_max_speed: tuning.opponent_speed_base * speed_factor,
            opponent_aggression: clamp_span(aggression, 0.01, 1.0),
            opponent_prediction_horizon: tuning.prediction_base + steps * tuning.prediction_per_level,
            ball_max_speed: tuning.ball_speed_base + speed_factor * tuning.ball_speed_per_factor,
            opponent_kick_base: tuning.opponent_kick_base * speed_factor,
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::for_level(1, &Tuning::default())
    }
}
