//! Match state machine: scores, touch streaks and the round lifecycle
//!
//! `Idle -> Running -> GoalScored -> Running ... -> MatchEnded`

use serde::{Deserialize, Serialize};

use crate::events::Side;

/// Lifecycle phase of the current match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Pre-interaction: heads staged, ball centred and still
    Idle,
    /// Simulation ticking
    Running,
    /// Kickoff hold after a goal; still a live match
    GoalScored { resume_at_ms: f64, kickoff_toward: Side },
    /// Terminal for this match
    MatchEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
}

/// Final numbers of a completed match, handed to progression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub result: MatchResult,
    pub you_goals: u8,
    pub opponent_goals: u8,
    pub elapsed_ms: u64,
    pub best_streak: u32,
    pub player_shots: u32,
}

/// Score and streak bookkeeping for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub you_goals: u8,
    pub opponent_goals: u8,
    pub target: u8,
    /// Consecutive player touches without an opponent touch
    pub touch_streak: u32,
    pub best_streak: u32,
    pub player_shots: u32,
    pub last_touch: Option<Side>,
    pub phase: MatchPhase,
    pub started_at_ms: f64,
}

impl MatchState {
    pub fn new(target: u8) -> Self {
        Self {
            you_goals: 0,
            opponent_goals: 0,
            target: target.max(1),
            touch_streak: 0,
            best_streak: 0,
            player_shots: 0,
            last_touch: None,
            phase: MatchPhase::Idle,
            started_at_ms: 0.0,
        }
    }

    /// Reset counters and enter `Running`
    pub fn begin(&mut self, now_ms: f64) {
        *self = Self {
            phase: MatchPhase::Running,
            started_at_ms: now_ms,
            ..Self::new(self.target)
        };
    }

    /// Running or holding for a kickoff
    pub fn is_live(&self) -> bool {
        matches!(self.phase, MatchPhase::Running | MatchPhase::GoalScored { .. })
    }

    /// Record a touch; returns the streak after it
    pub fn record_touch(&mut self, side: Side) -> u32 {
        match side {
            Side::Player => {
                self.touch_streak += 1;
                self.best_streak = self.best_streak.max(self.touch_streak);
            }
            Side::Opponent => self.touch_streak = 0,
        }
        self.last_touch = Some(side);
        self.touch_streak
    }

    pub fn record_shot(&mut self, side: Side) {
        if side == Side::Player {
            self.player_shots += 1;
        }
    }

    /// Count a goal. Ends the match the instant a score reaches the target,
    /// otherwise holds for a kickoff toward the conceding side.
    pub fn record_goal(&mut self, scorer: Side, now_ms: f64, kickoff_delay_ms: f64) -> Option<MatchSummary> {
        if !self.is_live() {
            return None;
        }
        match scorer {
            Side::Player => self.you_goals = self.you_goals.saturating_add(1),
            Side::Opponent => self.opponent_goals = self.opponent_goals.saturating_add(1),
        }

        if self.is_decided() {
            self.phase = MatchPhase::MatchEnded;
            return self.summary(now_ms);
        }

        self.phase = MatchPhase::GoalScored {
            resume_at_ms: now_ms + kickoff_delay_ms.max(0.0),
            kickoff_toward: scorer.other(),
        };
        None
    }

    /// Release a pending kickoff once its hold has elapsed
    pub fn release_kickoff(&mut self, now_ms: f64) -> Option<Side> {
        match self.phase {
            MatchPhase::GoalScored {
                resume_at_ms,
                kickoff_toward,
            } if now_ms >= resume_at_ms => {
                self.phase = MatchPhase::Running;
                Some(kickoff_toward)
            }
            _ => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.you_goals >= self.target || self.opponent_goals >= self.target
    }

    pub fn result(&self) -> Option<MatchResult> {
        if !self.is_decided() {
            return None;
        }
        Some(if self.you_goals > self.opponent_goals {
            MatchResult::Win
        } else {
            MatchResult::Loss
        })
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> u64 {
        (now_ms - self.started_at_ms).max(0.0).round() as u64
    }

    fn summary(&self, now_ms: f64) -> Option<MatchSummary> {
        Some(MatchSummary {
            result: self.result()?,
            you_goals: self.you_goals,
            opponent_goals: self.opponent_goals,
            elapsed_ms: self.elapsed_ms(now_ms),
            best_streak: self.best_streak,
            player_shots: self.player_shots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> MatchState {
        let mut m = MatchState::new(3);
        m.begin(1000.0);
        m
    }

    #[test]
    fn test_streak_counts_and_resets() {
        let mut m = running();
        assert_eq!(m.record_touch(Side::Player), 1);
        assert_eq!(m.record_touch(Side::Player), 2);
        assert_eq!(m.record_touch(Side::Player), 3);
        assert_eq!(m.record_touch(Side::Opponent), 0);
        assert_eq!(m.record_touch(Side::Player), 1);
        assert_eq!(m.best_streak, 3);
        assert_eq!(m.last_touch, Some(Side::Player));
    }

    #[test]
    fn test_match_ends_exactly_at_target() {
        let mut m = running();
        assert!(m.record_goal(Side::Player, 2000.0, 400.0).is_none());
        assert!(matches!(m.phase, MatchPhase::GoalScored { kickoff_toward: Side::Opponent, .. }));
        m.phase = MatchPhase::Running;
        assert!(m.record_goal(Side::Opponent, 3000.0, 400.0).is_none());
        m.phase = MatchPhase::Running;
        assert!(m.record_goal(Side::Opponent, 4000.0, 400.0).is_none());
        m.phase = MatchPhase::Running;
        assert!(!m.is_decided());

        let summary = m.record_goal(Side::Player, 5000.0, 400.0);
        assert!(summary.is_none());
        m.phase = MatchPhase::Running;
        let summary = m.record_goal(Side::Opponent, 6500.0, 400.0).unwrap();
        assert_eq!(m.phase, MatchPhase::MatchEnded);
        assert_eq!(summary.result, MatchResult::Loss);
        assert_eq!(summary.you_goals, 2);
        assert_eq!(summary.opponent_goals, 3);
        assert_eq!(summary.elapsed_ms, 5500);
    }

    #[test]
    fn test_no_goals_after_match_end() {
        let mut m = running();
        for _ in 0..3 {
            m.record_goal(Side::Player, 0.0, 0.0);
            let _ = m.release_kickoff(0.0);
        }
        assert_eq!(m.phase, MatchPhase::MatchEnded);
        assert!(m.record_goal(Side::Player, 0.0, 0.0).is_none());
        assert_eq!(m.you_goals, 3);
    }

    #[test]
    fn test_kickoff_release_waits_for_hold() {
        let mut m = running();
        m.record_goal(Side::Opponent, 1000.0, 400.0);
        assert_eq!(m.release_kickoff(1200.0), None);
        assert_eq!(m.release_kickoff(1400.0), Some(Side::Player));
        assert_eq!(m.phase, MatchPhase::Running);
    }
}
