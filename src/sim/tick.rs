//! Per-frame simulation tick
//!
//! Fixed order: input, opponent, ball integration, collisions, anti-stall,
//! goal check. Frame time is normalized into `dt` nominal frames.

use rand::Rng;

use super::collision::resolve_touch;
use super::input::TickInput;
use super::opponent::update_opponent;
use super::physics::{bounce_walls, step_ball};
use super::rules::{MatchPhase, MatchSummary};
use super::state::GameState;
use crate::consts::*;
use crate::events::{GameEvent, Side};
use crate::{chance, frame_dt};

/// Advance the match by one host frame.
///
/// Events produced during the tick are appended to `events`. Returns the
/// match summary on the tick the match ends.
pub fn tick(state: &mut GameState, input: &TickInput, frame_ms: f32, events: &mut Vec<GameEvent>) -> Option<MatchSummary> {
    let frame_ms = if frame_ms.is_finite() {
        frame_ms.clamp(0.0, MAX_FRAME_MS)
    } else {
        NOMINAL_FRAME_MS
    };
    let dt = frame_dt(frame_ms);
    state.clock_ms += frame_ms as f64;
    state.time_ticks += 1;

    if !state.score.is_live() {
        return None;
    }

    // Input
    if state
        .input
        .apply(input, &mut state.player, &state.geometry, &state.tuning, dt)
    {
        state.last_input_ms = state.clock_ms;
    }
    check_idle_hint(state, events);

    // Opponent
    update_opponent(
        &mut state.opponent,
        &state.ball,
        &state.geometry,
        &state.profile,
        &state.tuning,
        dt,
        state.time_ticks,
        &mut state.rng,
    );

    // Kickoff hold: ball stays centred until released
    if let MatchPhase::GoalScored { .. } = state.score.phase {
        match state.score.release_kickoff(state.clock_ms) {
            Some(toward) => {
                state.ball.vel = state.kickoff_velocity(toward);
                log::debug!("Kickoff toward {}", toward.as_str());
            }
            None => {
                state.ball.pos = state.geometry.center();
                state.ball.vel = glam::Vec2::ZERO;
                return None;
            }
        }
    }

    // Ball
    step_ball(
        &mut state.ball,
        &state.geometry,
        state.tuning.friction,
        state.profile.ball_max_speed,
        dt,
    );

    // Collisions, player first
    for side in [Side::Player, Side::Opponent] {
        let actor = *state.actor(side);
        let Some(outcome) = resolve_touch(
            side,
            &actor,
            &mut state.ball,
            &state.geometry,
            &state.profile,
            &state.tuning,
        ) else {
            continue;
        };
        let streak = state.score.record_touch(side);
        events.push(GameEvent::Touch { who: side, streak });
        if outcome.shot {
            state.score.record_shot(side);
            events.push(GameEvent::Shot { who: side });
        }
        if outcome.save {
            events.push(GameEvent::Save { who: side });
        }
    }
    bounce_walls(&mut state.ball, &state.geometry);

    // Anti-stall
    let last_touch = state.score.last_touch.map(|side| (side, state.actor(side).pos));
    state.watchdog.check(
        &mut state.ball,
        last_touch,
        &state.geometry,
        &state.profile,
        &state.tuning,
        dt,
        &mut state.rng,
    );

    check_goal(state, events)
}

/// Goal-plane crossing inside the mouth
fn check_goal(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<MatchSummary> {
    let g = state.geometry;
    let ball = state.ball.pos;
    if !g.in_goal_mouth(ball.y) {
        return None;
    }
    let scorer = if ball.x <= g.left_goal_plane() {
        Side::Opponent
    } else if ball.x >= g.right_goal_plane() {
        Side::Player
    } else {
        return None;
    };

    let summary = state.score.record_goal(
        scorer,
        state.clock_ms,
        state.tuning.kickoff_delay_ms as f64,
    );
    events.push(GameEvent::Goal {
        scorer,
        you_score: state.score.you_goals,
        opp_score: state.score.opponent_goals,
    });
    log::info!(
        "Goal for {} ({}-{})",
        scorer.as_str(),
        state.score.you_goals,
        state.score.opponent_goals
    );

    state.reset_positions();
    summary
}

fn check_idle_hint(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let t = &state.tuning;
    let idle_ms = state.clock_ms - state.last_input_ms;
    if idle_ms <= t.idle_hint_after_ms as f64 {
        return;
    }
    let cooled = state
        .last_idle_hint_ms
        .is_none_or(|at| state.clock_ms - at > t.idle_hint_cooldown_ms as f64);
    if !cooled {
        return;
    }
    if state.rng.random_bool(chance(t.idle_hint_chance)) {
        state.last_idle_hint_ms = Some(state.clock_ms);
        events.push(GameEvent::IdleHint {
            idle_ms: idle_ms.round() as u64,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::DifficultyProfile;
    use crate::sim::geometry::PitchGeometry;
    use crate::sim::input::InputMode;
    use crate::sim::rules::MatchResult;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn running(mode: InputMode) -> GameState {
        let mut state = GameState::new(PitchGeometry::new(800.0, 450.0), Tuning::default(), mode, 42);
        state.begin_match(DifficultyProfile::default());
        state
    }

    /// Put the ball just short of the opponent's goal plane, heading in
    fn shoot_right(state: &mut GameState) {
        state.ball.pos = Vec2::new(state.geometry.right_goal_plane() - 2.0, state.geometry.goal_center_y());
        state.ball.vel = Vec2::new(8.0, 0.0);
        state.opponent.pos = Vec2::new(state.geometry.midline() + 40.0, 60.0);
    }

    #[test]
    fn test_idle_state_does_not_tick() {
        let mut state = GameState::new(PitchGeometry::default(), Tuning::default(), InputMode::Pointer, 1);
        let before = state.ball;
        let mut events = Vec::new();
        assert!(tick(&mut state, &TickInput::pointer(100.0, 100.0), NOMINAL_FRAME_MS, &mut events).is_none());
        assert_eq!(state.ball, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_player_touch_emits_event_and_streak() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        state.ball.pos = Vec2::new(230.0, 225.0);
        state.ball.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::pointer(200.0, 225.0), NOMINAL_FRAME_MS, &mut events);

        assert!(events.contains(&GameEvent::Touch {
            who: Side::Player,
            streak: 1
        }));
        assert_eq!(state.score.last_touch, Some(Side::Player));
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_opponent_touch_resets_streak() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        state.score.touch_streak = 4;
        state.ball.pos = state.opponent.pos - Vec2::new(20.0, 0.0);
        state.ball.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);

        assert_eq!(state.score.touch_streak, 0);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Touch {
                who: Side::Opponent,
                streak: 0
            }
        )));
    }

    #[test]
    fn test_goal_holds_then_kicks_off_toward_conceding_side() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        shoot_right(&mut state);
        tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);

        assert!(events.contains(&GameEvent::Goal {
            scorer: Side::Player,
            you_score: 1,
            opp_score: 0
        }));
        assert!(matches!(state.score.phase, MatchPhase::GoalScored { .. }));
        assert_eq!(state.ball.pos, state.geometry.center());

        // Held for the kickoff delay
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
            assert_eq!(state.ball.vel, Vec2::ZERO);
        }
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
            if state.score.phase == MatchPhase::Running {
                break;
            }
        }
        assert_eq!(state.score.phase, MatchPhase::Running);
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_left_goal_counts_for_opponent() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        state.player.pos = Vec2::new(300.0, 60.0);
        state.ball.pos = Vec2::new(state.geometry.left_goal_plane() + 2.0, state.geometry.goal_center_y());
        state.ball.vel = Vec2::new(-8.0, 0.0);
        tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
        assert_eq!(state.score.opponent_goals, 1);
        assert_eq!(state.score.you_goals, 0);
    }

    #[test]
    fn test_ball_outside_mouth_bounces_off_end_wall() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        state.opponent.pos = Vec2::new(500.0, 225.0);
        state.ball.pos = Vec2::new(770.0, 40.0);
        state.ball.vel = Vec2::new(9.0, 0.0);
        tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
        assert_eq!(state.score.you_goals, 0);
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_three_unanswered_goals_win_the_match() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        let mut summary = None;

        for goal in 0..3 {
            // Wait out any kickoff hold first
            while !matches!(state.score.phase, MatchPhase::Running) {
                tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
            }
            shoot_right(&mut state);
            summary = tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
            assert_eq!(state.score.you_goals, goal + 1);
        }

        let summary = summary.expect("match should end on the third goal");
        assert_eq!(summary.result, MatchResult::Win);
        assert_eq!(summary.you_goals, 3);
        assert_eq!(summary.opponent_goals, 0);
        assert_eq!(state.score.phase, MatchPhase::MatchEnded);

        // Terminal: further ticks change nothing
        let ball = state.ball;
        assert!(tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events).is_none());
        assert_eq!(state.ball, ball);
    }

    #[test]
    fn test_resting_ball_gets_unstuck() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        state.ball.pos = Vec2::new(300.0, 60.0);
        state.ball.vel = Vec2::ZERO;
        state.player.pos = Vec2::new(100.0, 400.0);

        let window_ticks = (state.tuning.stall_window_ms / NOMINAL_FRAME_MS).ceil() as usize;
        let mut moved_at = None;
        for i in 0..window_ticks * 2 {
            tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
            if state.ball.speed() > state.tuning.stall_speed {
                moved_at = Some(i);
                break;
            }
        }
        let moved_at = moved_at.expect("ball never unstuck");
        assert!(moved_at <= window_ticks + 1);
    }

    #[test]
    fn test_idle_hint_respects_cooldown() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        state.last_input_ms = state.clock_ms - 5000.0;
        for _ in 0..400 {
            if !state.score.is_live() {
                break;
            }
            tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
        }
        let hints = events
            .iter()
            .filter(|e| matches!(e, GameEvent::IdleHint { .. }))
            .count();
        assert!(hints >= 1);
        // 400 frames is under two cooldown periods
        assert!(hints <= 2);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(InputMode::Analog);
        let mut b = running(InputMode::Analog);
        let inputs = [
            TickInput::analog(1.0, 0.0),
            TickInput::default(),
            TickInput::analog(0.2, -0.8),
            TickInput::default(),
        ];
        let (mut ea, mut eb) = (Vec::new(), Vec::new());
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input, 16.0, &mut ea);
                tick(&mut b, input, 16.0, &mut eb);
            }
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.opponent, b.opponent);
        assert_eq!(ea, eb);
    }

    #[test]
    fn test_hostile_frame_times_are_absorbed() {
        let mut state = running(InputMode::Pointer);
        let mut events = Vec::new();
        for ms in [f32::NAN, -5.0, 0.0, 10_000.0, f32::INFINITY] {
            tick(&mut state, &TickInput::default(), ms, &mut events);
            assert!(state.ball.pos.is_finite());
            assert!(state.clock_ms.is_finite());
        }
    }

    #[test]
    fn test_held_stick_is_not_idle() {
        let mut state = running(InputMode::Analog);
        let mut events = Vec::new();
        tick(&mut state, &TickInput::analog(0.0, 1.0), NOMINAL_FRAME_MS, &mut events);
        for _ in 0..400 {
            if !state.score.is_live() {
                break;
            }
            tick(&mut state, &TickInput::default(), NOMINAL_FRAME_MS, &mut events);
            assert!(state.clock_ms - state.last_input_ms < 1.0);
        }
        assert!(!events.iter().any(|e| matches!(e, GameEvent::IdleHint { .. })));
    }

    #[test]
    fn test_collapsed_difficulty_does_not_panic() {
        // Built directly, so validation never sees these values
        let tuning = Tuning {
            level_factor_step: -0.5,
            hesitation_chance: 0.0,
            ..Tuning::default()
        };
        let profile = DifficultyProfile::for_level(3, &tuning);
        let mut state = GameState::new(PitchGeometry::new(800.0, 450.0), tuning, InputMode::Pointer, 9);
        state.begin_match(profile);
        let mut events = Vec::new();
        for i in 0..600 {
            let input = TickInput::pointer(100.0 + (i % 200) as f32, 225.0);
            tick(&mut state, &input, NOMINAL_FRAME_MS, &mut events);
            assert!(state.opponent.pos.is_finite());
            assert!(state.ball.pos.is_finite());
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn frame() -> impl Strategy<Value = (f32, f32, f32)> {
            (-100.0f32..1000.0, -100.0f32..600.0, 4.0f32..40.0)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(48))]

            /// Property: both heads stay in their halves and the ball stays in the pitch
            #[test]
            fn prop_bodies_stay_in_bounds(
                width in 200.0f32..1400.0,
                height in 150.0f32..900.0,
                seed in any::<u64>(),
                analog in any::<bool>(),
                frames in prop::collection::vec(frame(), 1..240),
            ) {
                let mode = if analog { InputMode::Analog } else { InputMode::Pointer };
                let mut state = GameState::new(PitchGeometry::new(width, height), Tuning::default(), mode, seed);
                state.begin_match(DifficultyProfile::default());
                let mut events = Vec::new();
                let g = state.geometry;

                for (x, y, ms) in frames {
                    let input = match mode {
                        InputMode::Pointer => TickInput::pointer(x, y),
                        InputMode::Analog => TickInput::analog(x / 500.0 - 0.5, y / 300.0 - 0.5),
                    };
                    tick(&mut state, &input, ms, &mut events);

                    let (px_lo, px_hi) = g.player_x_range(state.player.radius);
                    let (ox_lo, ox_hi) = g.opponent_x_range(state.opponent.radius);
                    let (bx_lo, bx_hi) = g.ball_x_range(state.ball.radius);
                    let (by_lo, by_hi) = g.y_range(state.ball.radius);
                    prop_assert!(state.player.pos.x >= px_lo - 1e-3 && state.player.pos.x <= px_hi + 1e-3);
                    prop_assert!(state.opponent.pos.x >= ox_lo - 1e-3 && state.opponent.pos.x <= ox_hi + 1e-3);
                    prop_assert!(state.ball.pos.x >= bx_lo - 1e-3 && state.ball.pos.x <= bx_hi + 1e-3);
                    prop_assert!(state.ball.pos.y >= by_lo - 1e-3 && state.ball.pos.y <= by_hi + 1e-3);
                }
            }

            /// Property: the match never ends before a side reaches the target
            #[test]
            fn prop_match_ends_only_at_target(
                seed in any::<u64>(),
                frames in prop::collection::vec(frame(), 1..400),
            ) {
                let mut state = GameState::new(PitchGeometry::default(), Tuning::default(), InputMode::Pointer, seed);
                state.begin_match(DifficultyProfile::default());
                let mut events = Vec::new();
                for (x, y, ms) in frames {
                    let summary = tick(&mut state, &TickInput::pointer(x, y), ms, &mut events);
                    let decided = state.score.you_goals == TARGET_GOALS || state.score.opponent_goals == TARGET_GOALS;
                    prop_assert_eq!(state.score.phase == MatchPhase::MatchEnded, decided);
                    if summary.is_some() {
                        prop_assert!(decided);
                    }
                }
            }
        }
    }
}
