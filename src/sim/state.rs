//! Match state and core simulation types
//!
//! Everything the per-tick step mutates lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::geometry::PitchGeometry;
use super::input::{InputAdapter, InputMode};
use super::rules::{MatchPhase, MatchState};
use super::watchdog::StallWatchdog;
use crate::clamp_span;
use crate::consts::*;
use crate::events::Side;
use crate::tuning::Tuning;

/// A head on the pitch (player or opponent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Actor {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: HEAD_RADIUS,
        }
    }

    /// Place at rest
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub geometry: PitchGeometry,
    pub tuning: Tuning,
    /// Active difficulty (fixed for the duration of a match)
    pub profile: DifficultyProfile,
    pub player: Actor,
    pub opponent: Actor,
    pub ball: Ball,
    pub score: MatchState,
    pub input: InputAdapter,
    pub watchdog: StallWatchdog,
    /// Simulation clock (ms since session start)
    pub clock_ms: f64,
    /// Ticks since session start
    pub time_ticks: u64,
    /// Clock reading of the last consumed input sample
    pub last_input_ms: f64,
    /// Clock reading of the last idle hint
    pub last_idle_hint_ms: Option<f64>,
    pub rng: Pcg32,
}

impl GameState {
    pub fn new(geometry: PitchGeometry, tuning: Tuning, mode: InputMode, seed: u64) -> Self {
        let profile = DifficultyProfile::for_level(1, &tuning);
        let center = geometry.center();
        let mut state = Self {
            geometry,
            tuning,
            profile,
            player: Actor::new(center),
            opponent: Actor::new(center),
            ball: Ball::new(center),
            score: MatchState::new(TARGET_GOALS),
            input: InputAdapter::new(mode),
            watchdog: StallWatchdog::default(),
            clock_ms: 0.0,
            time_ticks: 0,
            last_input_ms: 0.0,
            last_idle_hint_ms: None,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.stage_idle();
        state
    }

    /// Pre-match stance: heads either side of a centred, motionless ball
    pub fn stage_idle(&mut self) {
        let g = self.geometry;
        let head_r = self.player.radius;
        let min_offset = (head_r + self.ball.radius + 10.0).max(60.0);
        let offset = clamp_span(g.width * 0.18, min_offset, 92.0);
        let center = g.center();

        self.player
            .place(g.clamp_player(Vec2::new(center.x - offset, center.y), head_r));
        self.opponent
            .place(g.clamp_opponent(Vec2::new(center.x + offset, center.y), self.opponent.radius));
        self.ball.pos = center;
        self.ball.vel = Vec2::ZERO;
        self.input.reset();
        self.watchdog.reset();
    }

    /// Kickoff stance after a goal or at match start; the ball is held still
    pub fn reset_positions(&mut self) {
        let g = self.geometry;
        self.player.place(g.clamp_player(
            Vec2::new(g.width * 0.24, g.height * 0.5),
            self.player.radius,
        ));
        self.opponent.place(g.clamp_opponent(
            Vec2::new(g.width * 0.76, g.height * 0.5),
            self.opponent.radius,
        ));
        self.ball.pos = g.center();
        self.ball.vel = Vec2::ZERO;

        self.score.touch_streak = 0;
        self.score.last_touch = None;
        self.input.reset();
        self.watchdog.reset();
    }

    /// Launch velocity for a kickoff toward `toward`'s half
    pub fn kickoff_velocity(&mut self, toward: Side) -> Vec2 {
        let t = &self.tuning;
        let dir = match toward {
            Side::Opponent => 1.0,
            Side::Player => -1.0,
        };
        let base = t.kickoff_speed_base + self.profile.speed_factor * t.kickoff_speed_per_factor;
        let jitter = t.kickoff_speed_jitter.max(0.0);
        let angle = t.kickoff_angle.abs();

        let vx = dir * (base + self.rng.random_range(0.0..=jitter));
        let vy = self.rng.random_range(-angle..=angle) * (base + self.rng.random_range(0.0..=jitter));
        Vec2::new(vx, vy)
    }

    /// Start a fresh match at the clock's current reading
    pub fn begin_match(&mut self, profile: DifficultyProfile) {
        self.profile = profile;
        self.score.begin(self.clock_ms);
        self.reset_positions();
        self.ball.vel = self.kickoff_velocity(Side::Opponent);
        self.last_input_ms = self.clock_ms;
        self.last_idle_hint_ms = None;
    }

    /// Apply a new container size
    pub fn apply_geometry(&mut self, geometry: PitchGeometry) {
        self.geometry = geometry;
        if self.score.phase == MatchPhase::Idle {
            self.stage_idle();
            return;
        }
        let g = self.geometry;
        self.player.pos = g.clamp_player(self.player.pos, self.player.radius);
        self.opponent.pos = g.clamp_opponent(self.opponent.pos, self.opponent.radius);
        self.ball.pos = g.clamp_ball(self.ball.pos, self.ball.radius);
    }

    /// Head position of `side`
    pub fn actor(&self, side: Side) -> &Actor {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}
