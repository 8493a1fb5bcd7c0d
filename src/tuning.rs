//! Data-driven feel constants
//!
//! Every number that was tuned by playing lives here. The defaults are the
//! shipped feel; a JSON file may override any subset of them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("tuning file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("tuning JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tuning value out of range: {0}")]
    Invalid(&'static str),
}

/// Feel constants for physics, AI, watchdog and match flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    /// Per-frame velocity retention, applied as `friction^dt`
    pub friction: f32,
    /// Ball max speed = base + per_factor * speed_factor
    pub ball_speed_base: f32,
    pub ball_speed_per_factor: f32,

    // === Input ===
    /// Player velocity retention on ticks without a pointer sample
    pub pointer_velocity_decay: f32,
    /// Analog stick full-deflection speed (units per frame)
    pub analog_speed: f32,
    pub analog_dead_zone: f32,
    pub analog_exponent: f32,

    // === Contact ===
    pub player_kick_min: f32,
    pub player_kick_max: f32,
    pub opponent_kick_min: f32,
    pub opponent_kick_max: f32,
    /// Opponent kick base before the speed factor is applied
    pub opponent_kick_base: f32,
    /// Share of the pre-contact velocity kept through a touch
    pub carry_weight: f32,
    /// Share of the kick impulse added along the contact normal
    pub impulse_weight: f32,
    /// How far opponent touches bend toward the player's goal (0..1)
    pub opponent_goal_bias: f32,
    /// Gap left between head and ball after push-out
    pub contact_separation: f32,
    /// Outgoing speed toward a goal that counts as a shot
    pub shot_speed: f32,
    /// Defensive zone width as a fraction of pitch width (saves)
    pub save_zone: f32,

    // === Opponent ===
    pub opponent_speed_base: f32,
    /// Velocity smoothing at level 1, divided by the speed factor
    pub opponent_aggression_base: f32,
    /// Proportional gain from target offset to desired velocity
    pub opponent_gain: f32,
    /// Prediction horizon (frames) = base + per_level * (level - 1)
    pub prediction_base: f32,
    pub prediction_per_level: f32,
    /// Attack weight when the ball is on the opponent half / player half
    pub attack_blend: f32,
    pub defend_blend: f32,
    /// Offset behind the ball the opponent approaches from
    pub attack_standoff: f32,
    /// Per-tick chance (divided by speed factor) of a hesitant step
    pub hesitation_chance: f32,
    pub hesitation_scale: f32,
    /// Amplitude of the anti-freeze target wobble
    pub jitter_radius: f32,

    // === Anti-stall ===
    pub stall_speed: f32,
    pub stall_window_ms: f32,
    /// Corrective impulse as a fraction of ball max speed
    pub stall_impulse_ratio: f32,

    // === Match flow ===
    pub kickoff_delay_ms: f32,
    pub kickoff_speed_base: f32,
    pub kickoff_speed_per_factor: f32,
    pub kickoff_speed_jitter: f32,
    /// Max vertical kickoff component relative to horizontal
    pub kickoff_angle: f32,

    // === Idle hints ===
    pub idle_hint_after_ms: f32,
    pub idle_hint_cooldown_ms: f32,
    pub idle_hint_chance: f32,

    // === Difficulty ===
    /// Speed factor gained per level above 1
    pub level_factor_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.9966,
            ball_speed_base: 11.0,
            ball_speed_per_factor: 1.2,

            pointer_velocity_decay: 0.6,
            analog_speed: 7.2,
            analog_dead_zone: 0.08,
            analog_exponent: 1.12,

            player_kick_min: 1.3,
            player_kick_max: 11.6,
            opponent_kick_min: 4.2,
            opponent_kick_max: 10.8,
            opponent_kick_base: 4.2,
            carry_weight: 0.62,
            impulse_weight: 0.95,
            opponent_goal_bias: 0.35,
            contact_separation: 0.2,
            shot_speed: 6.0,
            save_zone: 0.14,

            opponent_speed_base: 6.4,
            opponent_aggression_base: 0.34,
            opponent_gain: 0.2,
            prediction_base: 6.0,
            prediction_per_level: 2.4,
            attack_blend: 0.78,
            defend_blend: 0.35,
            attack_standoff: 18.0,
            hesitation_chance: 0.010,
            hesitation_scale: 0.2,
            jitter_radius: 2.2,

            stall_speed: 1.15,
            stall_window_ms: 720.0,
            stall_impulse_ratio: 0.32,

            kickoff_delay_ms: 400.0,
            kickoff_speed_base: 4.8,
            kickoff_speed_per_factor: 0.35,
            kickoff_speed_jitter: 0.6,
            kickoff_angle: 0.45,

            idle_hint_after_ms: 4200.0,
            idle_hint_cooldown_ms: 5200.0,
            idle_hint_chance: 0.09,

            level_factor_step: 0.084,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would make the simulation diverge or freeze
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(TuningError::Invalid("friction must be in (0, 1]"));
        }
        if self.player_kick_min > self.player_kick_max {
            return Err(TuningError::Invalid("player kick range is inverted"));
        }
        if self.opponent_kick_min > self.opponent_kick_max {
            return Err(TuningError::Invalid("opponent kick range is inverted"));
        }
        if !(0.0..1.0).contains(&self.analog_dead_zone) {
            return Err(TuningError::Invalid("analog dead zone must be in [0, 1)"));
        }
        if self.stall_speed <= 0.0 || self.stall_window_ms <= 0.0 {
            return Err(TuningError::Invalid("stall threshold and window must be positive"));
        }
        if self.ball_speed_base <= 0.0 {
            return Err(TuningError::Invalid("ball max speed must be positive"));
        }
        if self.level_factor_step < 0.0 {
            return Err(TuningError::Invalid("level factor step must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.hesitation_chance) || !(0.0..=1.0).contains(&self.idle_hint_chance) {
            return Err(TuningError::Invalid("per-tick chances must be in [0, 1]"));
        }
        if self.analog_exponent <= 0.0 || self.analog_speed < 0.0 {
            return Err(TuningError::Invalid("analog exponent must be positive and speed not negative"));
        }
        if self.opponent_speed_base < 0.0
            || !(self.opponent_aggression_base > 0.0 && self.opponent_aggression_base <= 1.0)
            || self.opponent_gain < 0.0
            || self.hesitation_scale < 0.0
        {
            return Err(TuningError::Invalid("opponent speed, aggression or gain out of range"));
        }
        if self.prediction_base < 0.0 || self.prediction_per_level < 0.0 {
            return Err(TuningError::Invalid("prediction horizon must not be negative"));
        }
        if self.kickoff_angle < 0.0 || self.kickoff_speed_jitter < 0.0 || self.stall_impulse_ratio < 0.0 {
            return Err(TuningError::Invalid("kickoff angle, jitter and stall impulse must not be negative"));
        }
        Ok(())
    }
}
