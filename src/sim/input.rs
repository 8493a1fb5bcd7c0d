//! Player input: pointer snapping or analog stick integration
//!
//! Host callbacks only fill a [`TickInput`]; the adapter consumes it at the
//! top of the next tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::PitchGeometry;
use super::state::Actor;
use crate::tuning::Tuning;

/// How the player head is driven for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    /// Head snaps to the pointer (mouse / touch)
    #[default]
    Pointer,
    /// Head integrates a virtual stick vector
    Analog,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Pointer => "pointer",
            InputMode::Analog => "analog",
        }
    }
}

/// Input staged between ticks (latest sample wins)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in pitch coordinates
    pub pointer: Option<Vec2>,
    /// Raw stick vector
    pub analog: Option<Vec2>,
}

impl TickInput {
    pub fn pointer(x: f32, y: f32) -> Self {
        Self {
            pointer: Some(Vec2::new(x, y)),
            analog: None,
        }
    }

    pub fn analog(dx: f32, dy: f32) -> Self {
        Self {
            pointer: None,
            analog: Some(Vec2::new(dx, dy)),
        }
    }
}

/// Turns staged input into player position and kick velocity
#[derive(Debug, Clone, PartialEq)]
pub struct InputAdapter {
    mode: InputMode,
    last_pointer: Option<Vec2>,
    /// Held stick vector (already shaped)
    stick: Vec2,
}

impl InputAdapter {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            last_pointer: None,
            stick: Vec2::ZERO,
        }
    }

    /// Forget the previous pointer sample (kickoff, idle staging)
    pub fn reset(&mut self) {
        self.last_pointer = None;
    }

    /// Whether `input` carries a real player action for this mode
    pub fn is_real_sample(&self, input: &TickInput, tuning: &Tuning) -> bool {
        match self.mode {
            InputMode::Pointer => input.pointer.is_some_and(|p| p.is_finite()),
            InputMode::Analog => input
                .analog
                .is_some_and(|v| v.is_finite() && v.length() > tuning.analog_dead_zone),
        }
    }

    /// Apply staged input to the player head.
    ///
    /// Returns true when the player is active this tick: a real sample was
    /// consumed, or an analog stick is still held off centre.
    pub fn apply(
        &mut self,
        input: &TickInput,
        player: &mut Actor,
        geometry: &PitchGeometry,
        tuning: &Tuning,
        dt: f32,
    ) -> bool {
        let real = self.is_real_sample(input, tuning);
        match self.mode {
            InputMode::Pointer => {
                if input.analog.is_some() {
                    log::debug!("Ignoring analog sample in pointer mode");
                }
                self.apply_pointer(input.pointer.filter(|p| p.is_finite()), player, geometry, tuning);
            }
            InputMode::Analog => {
                if input.pointer.is_some() {
                    log::debug!("Ignoring pointer sample in analog mode");
                }
                if let Some(raw) = input.analog.filter(|v| v.is_finite()) {
                    self.stick = shape_stick(raw, tuning.analog_dead_zone, tuning.analog_exponent);
                }
                self.apply_stick(player, geometry, tuning, dt);
                return real || self.stick != Vec2::ZERO;
            }
        }
        real
    }

    fn apply_pointer(&mut self, sample: Option<Vec2>, player: &mut Actor, geometry: &PitchGeometry, tuning: &Tuning) {
        let Some(sample) = sample else {
            // No new sample: the kick energy bleeds off
            player.vel *= tuning.pointer_velocity_decay;
            return;
        };
        let target = geometry.clamp_player(sample, player.radius);
        let last = self.last_pointer.unwrap_or(target);
        player.vel = target - last;
        player.pos = target;
        self.last_pointer = Some(target);
    }

    fn apply_stick(&mut self, player: &mut Actor, geometry: &PitchGeometry, tuning: &Tuning, dt: f32) {
        let step = self.stick * tuning.analog_speed * dt;
        let next = geometry.clamp_player(player.pos + step, player.radius);
        player.vel = if dt > 0.0 { (next - player.pos) / dt } else { Vec2::ZERO };
        player.pos = next;
    }
}

/// Dead zone plus power curve; output length is in `[0, 1]`
pub fn shape_stick(raw: Vec2, dead_zone: f32, exponent: f32) -> Vec2 {
    let raw = raw.clamp_length_max(1.0);
    let magnitude = raw.length();
    if magnitude <= dead_zone {
        return Vec2::ZERO;
    }
    let live = ((magnitude - dead_zone) / (1.0 - dead_zone)).clamp(0.0, 1.0);
    raw / magnitude * live.powf(exponent)
}
