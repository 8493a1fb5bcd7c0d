//! Head-ball contact detection and response
//!
//! Both heads and the ball are circles. A contact pushes the ball clear of the
//! head and hands it a kick built from the head's own velocity.

use glam::Vec2;

use super::difficulty::DifficultyProfile;
use super::geometry::PitchGeometry;
use super::state::{Actor, Ball};
use crate::events::Side;
use crate::tuning::Tuning;

/// Centres closer than this are treated as coincident
const COINCIDENT_EPSILON: f32 = 1e-4;

/// Overlap between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal from the first circle toward the second
    pub normal: Vec2,
    /// Overlap depth
    pub penetration: f32,
}

/// Check overlap between two circles; `None` when they merely touch or are apart
pub fn circle_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Option<Contact> {
    let delta = b - a;
    let dist = delta.length();
    let reach = ra + rb;
    if dist.is_nan() || dist >= reach {
        return None;
    }
    let normal = if dist > COINCIDENT_EPSILON {
        delta / dist
    } else {
        Vec2::ZERO
    };
    Some(Contact {
        normal,
        penetration: reach - dist,
    })
}

/// What a touch amounted to, beyond the touch itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchOutcome {
    /// Ball leaves fast and on target for the other side's goal
    pub shot: bool,
    /// Touch happened deep in the toucher's own defensive zone
    pub save: bool,
}

/// Resolve a head-ball contact for `side`.
///
/// Returns `None` when there is no overlap. On contact the ball is moved out to
/// the combined radius plus a small separation and its velocity rebuilt from
/// the carried velocity and the kick.
pub fn resolve_touch(
    side: Side,
    actor: &Actor,
    ball: &mut Ball,
    geometry: &PitchGeometry,
    profile: &DifficultyProfile,
    tuning: &Tuning,
) -> Option<TouchOutcome> {
    let contact = circle_overlap(actor.pos, actor.radius, ball.pos, ball.radius)?;

    // Coincident centres: knock the ball toward the other side's goal
    let normal = if contact.normal == Vec2::ZERO {
        match side {
            Side::Player => Vec2::X,
            Side::Opponent => Vec2::NEG_X,
        }
    } else {
        contact.normal
    };

    ball.pos = actor.pos + normal * (actor.radius + ball.radius + tuning.contact_separation);
    let save = in_defensive_zone(side, ball.pos.x, geometry, tuning.save_zone);

    let effort = actor.vel.length();
    let (kick, direction) = match side {
        Side::Player => (
            clamp_kick(effort, tuning.player_kick_min, tuning.player_kick_max),
            normal,
        ),
        Side::Opponent => {
            let to_goal = (geometry.player_goal() - ball.pos).normalize_or(Vec2::NEG_X);
            let bias = tuning.opponent_goal_bias.clamp(0.0, 1.0);
            let biased = (normal * (1.0 - bias) + to_goal * bias).normalize_or(normal);
            (
                clamp_kick(
                    effort + profile.opponent_kick_base,
                    tuning.opponent_kick_min,
                    tuning.opponent_kick_max,
                ),
                biased,
            )
        }
    };

    let carried = if ball.vel.is_finite() { ball.vel } else { Vec2::ZERO };
    ball.vel = (carried * tuning.carry_weight + direction * kick * tuning.impulse_weight)
        .clamp_length_max(profile.ball_max_speed.max(0.0));

    let shot = ball.speed() >= tuning.shot_speed && heads_into_goal(side, ball, geometry);

    log::debug!(
        "{} touch: kick {:.2}, ball speed {:.2}{}{}",
        side.as_str(),
        kick,
        ball.speed(),
        if shot { ", shot" } else { "" },
        if save { ", save" } else { "" }
    );

    Some(TouchOutcome { shot, save })
}

fn clamp_kick(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() { value.clamp(min, max.max(min)) } else { min }
}

fn in_defensive_zone(side: Side, x: f32, geometry: &PitchGeometry, zone: f32) -> bool {
    match side {
        Side::Player => x < geometry.width * zone,
        Side::Opponent => x > geometry.width * (1.0 - zone),
    }
}

/// Straight-line projection of the ball onto the goal plane the other side defends
fn heads_into_goal(side: Side, ball: &Ball, geometry: &PitchGeometry) -> bool {
    let (plane, moving_toward) = match side {
        Side::Player => (geometry.right_goal_plane(), ball.vel.x > 0.0),
        Side::Opponent => (geometry.left_goal_plane(), ball.vel.x < 0.0),
    };
    if !moving_toward {
        return false;
    }
    let frames = (plane - ball.pos.x) / ball.vel.x;
    geometry.in_goal_mouth(ball.pos.y + ball.vel.y * frames)
}
