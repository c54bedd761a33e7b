//! Level unlocks and per-level best scores
//!
//! Fed by `on_level_completed`; the host saves it as JSON and checks
//! [`LevelProgress::check_unlocked`] before offering a level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::events::ProgressSink;
use crate::sim::level::LEVEL_COUNT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Levels open for selection, counted from the first
    unlocked_levels: usize,
    /// Best score per completed level (0-based index)
    best_scores: BTreeMap<usize, u64>,
    total_score: u64,
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelProgress {
    /// Only the first level unlocked
    pub fn new() -> Self {
        Self {
            unlocked_levels: 1,
            best_scores: BTreeMap::new(),
            total_score: 0,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut progress: LevelProgress = serde_json::from_str(json)?;
        progress.unlocked_levels = progress.unlocked_levels.clamp(1, LEVEL_COUNT);
        progress.best_scores.retain(|&index, _| index < LEVEL_COUNT);
        log::info!(
            "Loaded progress: {}/{} levels unlocked",
            progress.unlocked_levels,
            LEVEL_COUNT
        );
        Ok(progress)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Record a cleared level: keep the best score and open the next one
    pub fn complete_level(&mut self, index: usize, score: u64) {
        if index >= LEVEL_COUNT {
            log::warn!("Ignoring completion of unknown level {index}");
            return;
        }
        let best = self.best_scores.entry(index).or_insert(0);
        *best = (*best).max(score);
        self.total_score = self.total_score.saturating_add(score);
        self.unlocked_levels = self.unlocked_levels.max(index + 2).min(LEVEL_COUNT);
        log::info!("Level {} completed, score {score}", index + 1);
    }

    pub fn unlocked_levels(&self) -> usize {
        self.unlocked_levels
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        index < self.unlocked_levels
    }

    /// Gate for level select, ahead of `GameState::start_at_level`
    pub fn check_unlocked(&self, index: usize) -> Result<(), ConfigError> {
        if index >= LEVEL_COUNT {
            return Err(ConfigError::LevelOutOfRange {
                index,
                count: LEVEL_COUNT,
            });
        }
        if !self.is_unlocked(index) {
            return Err(ConfigError::LevelLocked { index });
        }
        Ok(())
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.best_scores.contains_key(&index)
    }

    pub fn best_score(&self, index: usize) -> Option<u64> {
        self.best_scores.get(&index).copied()
    }

    /// Sum of every completion's score
    pub fn total_score(&self) -> u64 {
        self.total_score
    }
}

impl ProgressSink for LevelProgress {
    fn on_level_completed(&mut self, level_index: usize, score: u64) {
        self.complete_level(level_index, score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::{Services, Silent};
    use crate::sim::{GameEvent, GameState};

    #[test]
    fn test_fresh_progress() {
        let progress = LevelProgress::new();
        assert_eq!(progress.unlocked_levels(), 1);
        assert!(progress.is_unlocked(0));
        assert!(!progress.is_unlocked(1));
        assert!(!progress.is_completed(0));
        assert_eq!(progress.best_score(0), None);
    }

    #[test]
    fn test_completion_unlocks_next_and_keeps_best() {
        let mut progress = LevelProgress::new();
        progress.complete_level(0, 800);
        progress.complete_level(0, 500);

        assert!(progress.is_completed(0));
        assert_eq!(progress.best_score(0), Some(800));
        assert_eq!(progress.total_score(), 1300);
        assert_eq!(progress.unlocked_levels(), 2);
        assert!(progress.is_unlocked(1));
    }

    #[test]
    fn test_unlocks_capped_at_catalogue() {
        let mut progress = LevelProgress::new();
        progress.complete_level(LEVEL_COUNT - 1, 100);
        assert_eq!(progress.unlocked_levels(), LEVEL_COUNT);

        progress.complete_level(LEVEL_COUNT, 100);
        assert!(!progress.is_completed(LEVEL_COUNT));
        assert_eq!(progress.total_score(), 100);
    }

    #[test]
    fn test_check_unlocked_gates_level_select() {
        let mut progress = LevelProgress::new();
        assert!(matches!(
            progress.check_unlocked(2),
            Err(ConfigError::LevelLocked { index: 2 })
        ));
        assert!(matches!(
            progress.check_unlocked(LEVEL_COUNT),
            Err(ConfigError::LevelOutOfRange { .. })
        ));

        progress.complete_level(0, 100);
        progress.complete_level(1, 100);
        progress.check_unlocked(2).unwrap();

        let mut state = GameState::new(3);
        state.start_at_level(2).unwrap();
        assert_eq!(state.level_index, 2);
    }

    #[test]
    fn test_fed_by_level_completed_event() {
        let mut audio = Silent;
        let mut progress = LevelProgress::new();
        Services::new(&mut audio, &mut progress).dispatch(&[GameEvent::LevelCompleted {
            level_index: 0,
            score: 2400,
        }]);
        assert_eq!(progress.best_score(0), Some(2400));
        assert!(progress.is_unlocked(1));
    }

    #[test]
    fn test_json_round_trip() {
        let mut progress = LevelProgress::new();
        progress.complete_level(0, 300);
        progress.complete_level(1, 900);
        let json = progress.to_json().unwrap();
        assert_eq!(LevelProgress::from_json(&json).unwrap(), progress);
    }

    #[test]
    fn test_loaded_unlocks_are_clamped() {
        let json = r#"{ "unlocked_levels": 99, "best_scores": {}, "total_score": 0 }"#;
        let progress = LevelProgress::from_json(json).unwrap();
        assert_eq!(progress.unlocked_levels(), LEVEL_COUNT);

        let json = r#"{ "unlocked_levels": 0, "best_scores": {}, "total_score": 0 }"#;
        let progress = LevelProgress::from_json(json).unwrap();
        assert_eq!(progress.unlocked_levels(), 1);
    }
}
