//! Anti-stall watchdog
//!
//! Keeps the ball from ever going visually dead: a ball crawling below the
//! stall speed for too long, or a ball with non-finite state, gets kicked.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::geometry::PitchGeometry;
use super::state::Ball;
use crate::consts::NOMINAL_FRAME_MS;
use crate::events::Side;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StallWatchdog {
    /// Nominal milliseconds spent below the stall speed
    pub stalled_ms: f32,
}

impl StallWatchdog {
    pub fn reset(&mut self) {
        self.stalled_ms = 0.0;
    }

    /// Observe the ball after collisions; returns true when an impulse was
    /// injected this tick.
    ///
    /// `last_touch` is the last toucher and its head position, if any.
    #[allow(clippy::too_many_arguments)]
    pub fn check(
        &mut self,
        ball: &mut Ball,
        last_touch: Option<(Side, Vec2)>,
        geometry: &PitchGeometry,
        profile: &DifficultyProfile,
        tuning: &Tuning,
        dt: f32,
        rng: &mut Pcg32,
    ) -> bool {
        if !ball.pos.is_finite() || !ball.vel.is_finite() {
            log::warn!("Non-finite ball state, recentring");
            if !ball.pos.is_finite() {
                ball.pos = geometry.center();
            }
            self.reset();
            inject(ball, last_touch, profile, tuning, rng);
            return true;
        }

        if ball.speed() >= tuning.stall_speed {
            self.stalled_ms = 0.0;
            return false;
        }

        self.stalled_ms += dt * NOMINAL_FRAME_MS;
        if self.stalled_ms <= tuning.stall_window_ms {
            return false;
        }

        self.reset();
        inject(ball, last_touch, profile, tuning, rng);
        log::debug!("Stalled ball kicked to {:.2}", ball.speed());
        true
    }
}

/// Corrective impulse magnitude for a profile
pub fn impulse_speed(profile: &DifficultyProfile, tuning: &Tuning) -> f32 {
    (tuning.stall_impulse_ratio * profile.ball_max_speed).max(2.0 * tuning.stall_speed)
}

fn inject(
    ball: &mut Ball,
    last_touch: Option<(Side, Vec2)>,
    profile: &DifficultyProfile,
    tuning: &Tuning,
    rng: &mut Pcg32,
) {
    let direction = match last_touch {
        Some((side, head)) => {
            let fallback = match side {
                Side::Player => Vec2::X,
                Side::Opponent => Vec2::NEG_X,
            };
            (ball.pos - head).normalize_or(fallback)
        }
        None => Vec2::from_angle(rng.random_range(0.0..TAU)),
    };
    ball.vel = direction * impulse_speed(profile, tuning);
}
