//! Demo autopilot for the player head
//!
//! Drives the player when nobody is at the controls (headless runner, attract
//! mode). It produces the same staged input a host would.

use glam::Vec2;

use super::input::{InputMode, TickInput};
use super::state::GameState;

/// Something that can play the player side
pub trait Autopilot {
    /// Decide this frame's input
    fn next_input(&mut self, state: &GameState) -> TickInput;

    fn name(&self) -> &str;
}

/// Chases a point just behind the ball and swings through it toward the
/// opponent's goal.
#[derive(Debug, Clone)]
pub struct ChaseBot {
    mode: InputMode,
    /// Frames of ball motion to lead by
    pub lead: f32,
    /// Max pointer travel per frame (pointer mode)
    pub max_step: f32,
    /// Distance from the target at which the stick is fully deflected
    pub stick_range: f32,
}

impl ChaseBot {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            lead: 4.0,
            max_step: 9.0,
            stick_range: 40.0,
        }
    }

    fn target(&self, state: &GameState) -> Vec2 {
        let ball = &state.ball;
        let g = &state.geometry;

        // Oscillating offset so rallies don't settle into a loop
        let t = state.time_ticks as f32 * 0.01;
        let wobble = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * state.player.radius;

        let future = ball.pos + ball.vel * self.lead;
        let aim = (g.opponent_goal() - future).normalize_or(Vec2::X);
        future - aim * (state.player.radius * 0.6) + Vec2::new(0.0, wobble)
    }
}

impl Autopilot for ChaseBot {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        let target = self.target(state);
        let offset = target - state.player.pos;
        match self.mode {
            InputMode::Pointer => {
                let p = state.player.pos + offset.clamp_length_max(self.max_step);
                TickInput::pointer(p.x, p.y)
            }
            InputMode::Analog => {
                let stick = (offset / self.stick_range.max(1.0)).clamp_length_max(1.0);
                TickInput::analog(stick.x, stick.y)
            }
        }
    }

    fn name(&self) -> &str {
        match self.mode {
            InputMode::Pointer => "chase-pointer",
            InputMode::Analog => "chase-analog",
        }
    }
}
