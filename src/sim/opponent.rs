//! AI opponent steering
//!
//! Reads the ball a few frames ahead, blends between attacking from behind
//! the ball and guarding its own goal, then eases its velocity toward the
//! resulting target.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyProfile;
use super::geometry::PitchGeometry;
use super::state::{Actor, Ball};
use crate::chance;
use crate::tuning::Tuning;

/// Below this distance to its target the opponent gets a wobble added
const ALIGNED_DISTANCE: f32 = 1.5;

/// Where the opponent wants to be this tick
pub fn opponent_target(
    opponent: &Actor,
    ball: &Ball,
    geometry: &PitchGeometry,
    profile: &DifficultyProfile,
    tuning: &Tuning,
) -> Vec2 {
    let predicted = ball.pos + ball.vel * profile.opponent_prediction_horizon;
    let own_goal = geometry.opponent_goal();

    // Approach from the goal side so contacts push the ball leftwards
    let behind = (own_goal - predicted).normalize_or(Vec2::X);
    let attack = predicted + behind * tuning.attack_standoff;

    let guard_y = predicted.y.clamp(geometry.goal_top, geometry.goal_bottom);
    let anchor = Vec2::new(own_goal.x - opponent.radius * 1.5, guard_y);

    let blend = if ball.pos.x >= geometry.midline() {
        tuning.attack_blend
    } else {
        tuning.defend_blend
    };
    anchor.lerp(attack, blend.clamp(0.0, 1.0))
}

/// Advance the opponent one tick
#[allow(clippy::too_many_arguments)]
pub fn update_opponent(
    opponent: &mut Actor,
    ball: &Ball,
    geometry: &PitchGeometry,
    profile: &DifficultyProfile,
    tuning: &Tuning,
    dt: f32,
    time_ticks: u64,
    rng: &mut Pcg32,
) {
    let mut target = opponent_target(opponent, ball, geometry, profile, tuning);

    if opponent.pos.distance(target) < ALIGNED_DISTANCE {
        // Two detuned sines so the wobble never repeats visibly
        let t = time_ticks as f32 * 0.05;
        let wobble = Vec2::new(t.sin() + (t * 0.7).sin() * 0.5, (t * 1.3).cos());
        target += wobble * tuning.jitter_radius;
    }

    let desired = ((target - opponent.pos) * tuning.opponent_gain).clamp_length_max(profile.opponent_max_speed);
    let smoothing = 1.0 - (1.0 - profile.opponent_aggression).powf(dt);
    opponent.vel = opponent.vel.lerp(desired, smoothing.clamp(0.0, 1.0));

    let hesitation = chance(tuning.hesitation_chance / profile.speed_factor.max(f32::EPSILON));
    let step_scale = if rng.random_bool(hesitation) {
        tuning.hesitation_scale
    } else {
        1.0
    };

    let next = opponent.pos + opponent.vel * dt * step_scale;
    opponent.pos = geometry.clamp_opponent(next, opponent.radius);
    if !opponent.vel.is_finite() {
        opponent.vel = Vec2::ZERO;
    }
}
