//! Host-facing simulation loop
//!
//! The host owns a [`SimulationLoop`] and calls [`SimulationLoop::frame`] once
//! per animation frame. Every other host call only stages a value that the next
//! frame consumes, so the state changes in exactly one place.

use glam::Vec2;
use serde::Serialize;

use crate::events::{EventSink, GameEvent};
use crate::persistence::ProgressionStore;
use crate::progression::ProgressionState;
use crate::sim::{
    DifficultyProfile, GameState, InputMode, MatchPhase, MatchSummary, PitchGeometry, Tier, TickInput, tick,
};
use crate::tuning::Tuning;

/// Collaborators a session talks to, owned by the loop
pub struct SessionContext {
    pub store: Box<dyn ProgressionStore>,
    pub sink: Box<dyn EventSink>,
}

impl SessionContext {
    pub fn new(store: impl ProgressionStore + 'static, sink: impl EventSink + 'static) -> Self {
        Self {
            store: Box::new(store),
            sink: Box::new(sink),
        }
    }
}

/// A circle for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub pos: Vec2,
    pub radius: f32,
}

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub width: f32,
    pub height: f32,
    pub goal_top: f32,
    pub goal_bottom: f32,
    pub player: BodySnapshot,
    pub opponent: BodySnapshot,
    pub ball: BodySnapshot,
    pub you_score: u8,
    pub opp_score: u8,
    pub phase: &'static str,
    pub level: u32,
    pub tier: Tier,
    pub streak: u32,
    pub best_streak: u32,
    pub elapsed_ms: u64,
}

pub struct SimulationLoop {
    context: SessionContext,
    state: GameState,
    pending_input: TickInput,
    pending_geometry: Option<PitchGeometry>,
    /// Record loaded at match start, updated at match end
    progression: Option<ProgressionState>,
    events: Vec<GameEvent>,
}

impl SimulationLoop {
    pub fn new(context: SessionContext, mode: InputMode, tuning: Tuning, seed: u64) -> Self {
        log::info!("Session created ({} input, seed {})", mode.as_str(), seed);
        Self {
            context,
            state: GameState::new(PitchGeometry::default(), tuning, mode, seed),
            pending_input: TickInput::default(),
            pending_geometry: None,
            progression: None,
            events: Vec::new(),
        }
    }

    /// Container resized. Applied now when idle, at the next frame otherwise.
    pub fn resize(&mut self, width: f32, height: f32) {
        let geometry = PitchGeometry::new(width, height);
        if self.state.score.is_live() {
            self.pending_geometry = Some(geometry);
        } else {
            self.pending_geometry = None;
            self.state.apply_geometry(geometry);
        }
    }

    /// Stage a pointer sample (pitch coordinates)
    pub fn set_player_target(&mut self, x: f32, y: f32) {
        self.pending_input.pointer = Some(Vec2::new(x, y));
    }

    /// Stage an analog stick vector
    pub fn set_analog_vector(&mut self, dx: f32, dy: f32) {
        self.pending_input.analog = Some(Vec2::new(dx, dy));
    }

    /// Per-frame callback. Returns false once the match has ended.
    pub fn frame(&mut self, frame_ms: f32) -> bool {
        if let Some(geometry) = self.pending_geometry.take() {
            self.state.apply_geometry(geometry);
        }
        let input = std::mem::take(&mut self.pending_input);

        match self.state.score.phase {
            MatchPhase::MatchEnded => return false,
            MatchPhase::Idle => {
                if !self.state.input.is_real_sample(&input, &self.state.tuning) {
                    return true;
                }
                self.start_match(false);
            }
            MatchPhase::Running | MatchPhase::GoalScored { .. } => {}
        }

        let summary = tick(&mut self.state, &input, frame_ms, &mut self.events);
        self.flush_events();
        if let Some(summary) = summary {
            self.finish_match(summary);
        }
        self.state.score.is_live()
    }

    /// Abandon the current match and kick off a fresh one. Nothing is written
    /// to the store for the abandoned match.
    pub fn restart(&mut self) {
        if let Some(geometry) = self.pending_geometry.take() {
            self.state.apply_geometry(geometry);
        }
        self.pending_input = TickInput::default();
        log::info!("Manual restart");
        self.start_match(true);
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let s = &self.state;
        let body = |pos: Vec2, radius: f32| BodySnapshot { pos, radius };
        RenderSnapshot {
            width: s.geometry.width,
            height: s.geometry.height,
            goal_top: s.geometry.goal_top,
            goal_bottom: s.geometry.goal_bottom,
            player: body(s.player.pos, s.player.radius),
            opponent: body(s.opponent.pos, s.opponent.radius),
            ball: body(s.ball.pos, s.ball.radius),
            you_score: s.score.you_goals,
            opp_score: s.score.opponent_goals,
            phase: phase_name(&s.score.phase),
            level: s.profile.level,
            tier: s.profile.tier,
            streak: s.score.touch_streak,
            best_streak: s.score.best_streak,
            elapsed_ms: if s.score.phase == MatchPhase::Idle {
                0
            } else {
                s.score.elapsed_ms(s.clock_ms)
            },
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.score.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.score.is_live()
    }

    /// Record as of the last match boundary
    pub fn progression(&self) -> Option<&ProgressionState> {
        self.progression.as_ref()
    }

    pub fn into_context(self) -> SessionContext {
        self.context
    }

    fn start_match(&mut self, manual: bool) {
        let progression = match self.context.store.load() {
            Ok(p) => p.sanitized(),
            Err(e) => {
                log::warn!("Failed to load progression, using defaults: {}", e);
                ProgressionState::default()
            }
        };
        let profile = DifficultyProfile::for_level(progression.level, &self.state.tuning);
        let match_number = progression.matches.saturating_add(1);
        self.progression = Some(progression);

        self.state.begin_match(profile);
        log::info!(
            "Match {} start: level {} ({})",
            match_number,
            profile.level,
            profile.tier.as_str()
        );
        self.context.sink.emit(GameEvent::MatchStart {
            match_number,
            level: profile.level,
            tier: profile.tier,
            manual,
        });
    }

    fn finish_match(&mut self, summary: MatchSummary) {
        let mut progression = self.progression.take().unwrap_or_default();
        let record = progression.record_match(&summary);
        if let Err(e) = self.context.store.save(&progression) {
            log::warn!("Failed to save progression: {}", e);
        }
        log::info!(
            "Match over: {:?} {}-{} in {} ms, level {} -> {}",
            summary.result,
            summary.you_goals,
            summary.opponent_goals,
            summary.elapsed_ms,
            record.level_from,
            record.level_to
        );
        if record.fastest_win {
            log::info!("New fastest win: {} ms", summary.elapsed_ms);
        }

        let sink = &mut self.context.sink;
        if record.streak_record {
            sink.emit(GameEvent::StreakRecord {
                best_streak: progression.best_streak,
            });
        }
        sink.emit(GameEvent::MatchEnd {
            result: summary.result,
            score_you: summary.you_goals,
            score_imposter: summary.opponent_goals,
            elapsed_ms: summary.elapsed_ms,
            best_streak: summary.best_streak,
        });
        sink.emit(GameEvent::LevelAdvance {
            from: record.level_from,
            to: record.level_to,
        });
        self.progression = Some(progression);
    }

    fn flush_events(&mut self) {
        for event in self.events.drain(..) {
            self.context.sink.emit(event);
        }
    }
}

fn phase_name(phase: &MatchPhase) -> &'static str {
    match phase {
        MatchPhase::Idle => "idle",
        MatchPhase::Running => "running",
        MatchPhase::GoalScored { .. } => "goalScored",
        MatchPhase::MatchEnded => "matchEnded",
    }
}
