//! Cross-match progression record
//!
//! Read once at match start, written once at match end. The level counter
//! cycles 1..=6 and advances after every completed match, win or lose.

use serde::{Deserialize, Serialize};

use crate::sim::{MatchResult, MatchSummary, next_level, normalize_level};

/// Persisted player record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressionState {
    pub wins: u32,
    pub losses: u32,
    /// Best touch streak in any match
    pub best_streak: u32,
    /// Current level (1-based, cyclic)
    pub level: u32,
    /// Completed matches
    pub matches: u32,
    /// Fastest win, if any
    pub fastest_win_ms: Option<u64>,
    /// Goals scored by the player across all matches
    pub lifetime_goals: u64,
    pub lifetime_shots: u64,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            best_streak: 0,
            level: 1,
            matches: 0,
            fastest_win_ms: None,
            lifetime_goals: 0,
            lifetime_shots: 0,
        }
    }
}

/// What changed when a match was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord {
    pub level_from: u32,
    pub level_to: u32,
    /// Lifetime best streak was beaten
    pub streak_record: bool,
    /// New fastest win
    pub fastest_win: bool,
}

impl ProgressionState {
    /// Copy with the level brought back into range
    pub fn sanitized(&self) -> Self {
        let level = normalize_level(self.level);
        if level != self.level {
            log::warn!("Stored level {} out of range, using {}", self.level, level);
        }
        Self {
            level,
            ..self.clone()
        }
    }


    /// Fold a completed match into the record and advance the level
    pub fn record_match(&mut self, summary: &MatchSummary) -> MatchRecord {
        let level_from = normalize_level(self.level);
        let level_to = next_level(level_from);

        match summary.result {
            MatchResult::Win => self.wins = self.wins.saturating_add(1),
            MatchResult::Loss => self.losses = self.losses.saturating_add(1),
        }
        self.matches = self.matches.saturating_add(1);
        self.lifetime_goals = self.lifetime_goals.saturating_add(summary.you_goals as u64);
        self.lifetime_shots = self.lifetime_shots.saturating_add(summary.player_shots as u64);

        let streak_record = summary.best_streak > self.best_streak;
        if streak_record {
            self.best_streak = summary.best_streak;
        }

        let fastest_win = summary.result == MatchResult::Win
            && self.fastest_win_ms.is_none_or(|best| summary.elapsed_ms < best);
        if fastest_win {
            self.fastest_win_ms = Some(summary.elapsed_ms);
        }

        self.level = level_to;
        MatchRecord {
            level_from,
            level_to,
            streak_record,
            fastest_win,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(result: MatchResult, streak: u32, elapsed_ms: u64) -> MatchSummary {
        let (you, opp) = match result {
            MatchResult::Win => (3, 1),
            MatchResult::Loss => (0, 3),
        };
        MatchSummary {
            result,
            you_goals: you,
            opponent_goals: opp,
            elapsed_ms,
            best_streak: streak,
            player_shots: 5,
        }
    }

    #[test]
    fn test_record_win_and_loss() {
        let mut p = ProgressionState::default();
        let rec = p.record_match(&summary(MatchResult::Win, 4, 60_000));
        assert_eq!((rec.level_from, rec.level_to), (1, 2));
        assert!(rec.streak_record);
        assert!(rec.fastest_win);

        let rec = p.record_match(&summary(MatchResult::Loss, 2, 30_000));
        assert!(!rec.streak_record);
        assert!(!rec.fastest_win);

        assert_eq!(p.wins, 1);
        assert_eq!(p.losses, 1);
        assert_eq!(p.matches, 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.best_streak, 4);
        assert_eq!(p.fastest_win_ms, Some(60_000));
        assert_eq!(p.lifetime_goals, 3);
        assert_eq!(p.lifetime_shots, 10);
    }

    #[test]
    fn test_level_wraps_after_six() {
        let mut p = ProgressionState {
            level: 6,
            ..Default::default()
        };
        let rec = p.record_match(&summary(MatchResult::Loss, 0, 1));
        assert_eq!((rec.level_from, rec.level_to), (6, 1));
    }

    #[test]
    fn test_sanitize_corrupted_level() {
        let p = ProgressionState {
            level: 0,
            ..Default::default()
        };
        assert_eq!(p.sanitized().level, 1);
        let p = ProgressionState {
            level: 14,
            ..Default::default()
        };
        assert_eq!(p.sanitized().level, 2);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let p: ProgressionState = serde_json::from_str(r#"{"wins": 7, "bestStreak": 3}"#).unwrap();
        assert_eq!(p.wins, 7);
        assert_eq!(p.best_streak, 3);
        assert_eq!(p.level, 1);
        assert_eq!(p.fastest_win_ms, None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: level after N matches = ((initial - 1 + N) mod 6) + 1
            #[test]
            fn prop_level_cycles(initial in 1u32..=6, results in prop::collection::vec(any::<bool>(), 0..40)) {
                let mut p = ProgressionState { level: initial, ..Default::default() };
                for &won in &results {
                    let result = if won { MatchResult::Win } else { MatchResult::Loss };
                    p.record_match(&summary(result, 1, 1000));
                }
                let n = results.len() as u32;
                prop_assert_eq!(p.level, (initial - 1 + n) % 6 + 1);
                prop_assert_eq!(p.wins + p.losses, n);
            }
        }
    }
}
