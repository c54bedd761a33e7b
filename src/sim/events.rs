//! Game events
//!
//! Recorded during a tick and handed to the host's services afterwards.

use serde::{Deserialize, Serialize};

use super::powerup::PowerUpKind;
use crate::audio::{AudioSink, SoundEffect};

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched {
        ball_id: u32,
    },
    PaddleHit {
        ball_id: u32,
    },
    WallHit {
        ball_id: u32,
    },
    /// Score is awarded on every hit, not only the destroying one
    BrickHit {
        brick_id: u32,
        score_delta: u32,
        destroyed: bool,
    },
    PowerUpSpawned {
        id: u32,
        kind: PowerUpKind,
    },
    PowerUpCollected {
        id: u32,
        kind: PowerUpKind,
    },
    LifeLost {
        lives_left: u32,
    },
    LevelCompleted {
        level_index: usize,
        score: u64,
    },
    /// The final layout was cleared
    AllLevelsCompleted {
        score: u64,
        level_index: usize,
    },
    GameOver {
        score: u64,
        level_index: usize,
    },
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::BallLaunched { .. } => Some(SoundEffect::Launch),
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::WallHit { .. } => Some(SoundEffect::WallHit),
            GameEvent::BrickHit { destroyed: true, .. } => Some(SoundEffect::BrickBreak),
            GameEvent::BrickHit { .. } => Some(SoundEffect::BrickHit),
            GameEvent::PowerUpSpawned { .. } => None,
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUpCollected),
            GameEvent::LifeLost { .. } => Some(SoundEffect::LifeLost),
            GameEvent::LevelCompleted { .. } => Some(SoundEffect::LevelComplete),
            GameEvent::AllLevelsCompleted { .. } => Some(SoundEffect::Victory),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        }
    }
}

/// Persistence hooks (save progress, high scores)
pub trait ProgressSink {
    fn on_brick_destroyed(&mut self, _score_delta: u32) {}
    fn on_level_completed(&mut self, _level_index: usize, _score: u64) {}
    fn on_life_lost(&mut self) {}
    /// Also called with the final score when the last level is cleared
    fn on_game_over(&mut self, _score: u64, _level_index: usize) {}
}

/// Feed two sinks from one event stream
impl<A: ProgressSink, B: ProgressSink> ProgressSink for (A, B) {
    fn on_brick_destroyed(&mut self, score_delta: u32) {
        self.0.on_brick_destroyed(score_delta);
        self.1.on_brick_destroyed(score_delta);
    }
    fn on_level_completed(&mut self, level_index: usize, score: u64) {
        self.0.on_level_completed(level_index, score);
        self.1.on_level_completed(level_index, score);
    }
    fn on_life_lost(&mut self) {
        self.0.on_life_lost();
        self.1.on_life_lost();
    }
    fn on_game_over(&mut self, score: u64, level_index: usize) {
        self.0.on_game_over(score, level_index);
        self.1.on_game_over(score, level_index);
    }
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

impl ProgressSink for Silent {}

/// Host services, constructed by the caller and passed in by reference
pub struct Services<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub progress: &'a mut dyn ProgressSink,
}

impl<'a> Services<'a> {
    pub fn new(audio: &'a mut dyn AudioSink, progress: &'a mut dyn ProgressSink) -> Self {
        Self { audio, progress }
    }

    /// Route each event to the audio and persistence services
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(sound) = event.sound() {
                self.audio.play(sound);
            }
            match *event {
                GameEvent::BrickHit {
                    score_delta,
                    destroyed: true,
                    ..
                } => self.progress.on_brick_destroyed(score_delta),
                GameEvent::LifeLost { .. } => self.progress.on_life_lost(),
                GameEvent::LevelCompleted { level_index, score } => {
                    self.progress.on_level_completed(level_index, score)
                }
                GameEvent::GameOver { score, level_index }
                | GameEvent::AllLevelsCompleted { score, level_index } => {
                    self.progress.on_game_over(score, level_index)
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<SoundEffect>,
        destroyed: Vec<u32>,
        levels: Vec<(usize, u64)>,
        lives_lost: u32,
        game_overs: Vec<(u64, usize)>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.sounds.push(effect);
        }
    }

    impl ProgressSink for Recorder {
        fn on_brick_destroyed(&mut self, score_delta: u32) {
            self.destroyed.push(score_delta);
        }
        fn on_level_completed(&mut self, level_index: usize, score: u64) {
            self.levels.push((level_index, score));
        }
        fn on_life_lost(&mut self) {
            self.lives_lost += 1;
        }
        fn on_game_over(&mut self, score: u64, level_index: usize) {
            self.game_overs.push((score, level_index));
        }
    }

    #[test]
    fn test_brick_sounds() {
        let hit = GameEvent::BrickHit {
            brick_id: 1,
            score_delta: 200,
            destroyed: false,
        };
        let broke = GameEvent::BrickHit {
            brick_id: 1,
            score_delta: 200,
            destroyed: true,
        };
        assert_eq!(hit.sound(), Some(SoundEffect::BrickHit));
        assert_eq!(broke.sound(), Some(SoundEffect::BrickBreak));
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut audio = Recorder::default();
        let mut progress = Recorder::default();
        let events = vec![
            GameEvent::PaddleHit { ball_id: 1 },
            GameEvent::BrickHit {
                brick_id: 4,
                score_delta: 100,
                destroyed: false,
            },
            GameEvent::BrickHit {
                brick_id: 4,
                score_delta: 100,
                destroyed: true,
            },
            GameEvent::PowerUpSpawned {
                id: 9,
                kind: PowerUpKind::ExtraLife,
            },
            GameEvent::LifeLost { lives_left: 2 },
            GameEvent::LevelCompleted {
                level_index: 0,
                score: 1200,
            },
            GameEvent::GameOver {
                score: 1200,
                level_index: 1,
            },
        ];

        Services::new(&mut audio, &mut progress).dispatch(&events);

        assert_eq!(
            audio.sounds,
            vec![
                SoundEffect::PaddleHit,
                SoundEffect::BrickHit,
                SoundEffect::BrickBreak,
                SoundEffect::LifeLost,
                SoundEffect::LevelComplete,
                SoundEffect::GameOver,
            ]
        );
        assert_eq!(progress.destroyed, vec![100]);
        assert_eq!(progress.levels, vec![(0, 1200)]);
        assert_eq!(progress.lives_lost, 1);
        assert_eq!(progress.game_overs, vec![(1200, 1)]);
    }

    #[test]
    fn test_paired_sinks_both_hear_events() {
        let mut audio = Silent;
        let mut progress = (Recorder::default(), Recorder::default());
        Services::new(&mut audio, &mut progress).dispatch(&[
            GameEvent::LifeLost { lives_left: 0 },
            GameEvent::GameOver {
                score: 40,
                level_index: 0,
            },
        ]);
        assert_eq!(progress.0.lives_lost, 1);
        assert_eq!(progress.1.game_overs, vec![(40, 0)]);
    }

    #[test]
    fn test_silent_services() {
        let mut audio = Silent;
        let mut progress = Silent;
        Services::new(&mut audio, &mut progress).dispatch(&[GameEvent::AllLevelsCompleted {
            score: 5,
            level_index: 4,
        }]);
    }

    #[test]
    fn test_victory_records_final_score() {
        let mut audio = Recorder::default();
        let mut progress = Recorder::default();
        Services::new(&mut audio, &mut progress).dispatch(&[GameEvent::AllLevelsCompleted {
            score: 9000,
            level_index: 4,
        }]);
        assert_eq!(audio.sounds, vec![SoundEffect::Victory]);
        assert_eq!(progress.game_overs, vec![(9000, 4)]);
    }
}
