//! Game state and session lifecycle
//!
//! The session owns every entity collection; nothing else holds a reference
//! to a ball, brick or power-up between ticks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::BallSet;
use super::brick::{Brick, BrickKind};
use super::events::GameEvent;
use super::level;
use super::paddle::Paddle;
use super::powerup::{ActiveEffects, PowerUp, PowerUpKind};
use super::vector::Rect;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (including a ball waiting on the paddle)
    Playing,
    /// Game is paused; nothing advances
    Paused,
    /// Level cleared, breather before the next layout
    LevelComplete,
    /// Final layout cleared
    Victory,
    /// Out of lives
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Power-up and multi-ball randomness
    pub(crate) rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Current level (0-based)
    pub level_index: usize,
    pub score: u64,
    pub lives: u32,
    pub paddle: Paddle,
    pub balls: BallSet,
    /// Bricks of the current level, in layout order
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    /// Seconds left in the level-complete breather
    pub transition_timer: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events recorded by the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game at the first level with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: settings.starting_lives,
            settings,
            phase: GamePhase::Playing,
            level_index: 0,
            score: 0,
            paddle: Paddle::default(),
            balls: BallSet::new(),
            bricks: Vec::new(),
            power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            transition_timer: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        if let Err(e) = state.start_at_level(0) {
            log::error!("Failed to load first level: {e}");
        }
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fresh game (score, lives) at any catalogue level.
    ///
    /// On error the current session is left untouched.
    pub fn start_at_level(&mut self, index: usize) -> Result<(), ConfigError> {
        self.load_level(index)?;
        self.score = 0;
        self.lives = self.settings.starting_lives;
        log::info!("Game started at level {}", index + 1);
        Ok(())
    }

    /// Fresh game from the first level
    pub fn restart(&mut self) {
        if let Err(e) = self.start_at_level(0) {
            log::error!("Restart failed: {e}");
        }
    }

    /// Swap in a level's bricks and reset the play field, keeping score and lives
    pub fn load_level(&mut self, index: usize) -> Result<(), ConfigError> {
        let mut next_id = self.next_id;
        let bricks = level::build_bricks(index, || {
            let id = next_id;
            next_id += 1;
            id
        })?;
        self.next_id = next_id;
        self.bricks = bricks;
        self.level_index = index;
        self.transition_timer = 0.0;
        self.phase = GamePhase::Playing;
        self.reset_play_field();
        Ok(())
    }

    /// Paddle and ball back to start, power-ups and effects dropped
    pub fn reset_play_field(&mut self) {
        self.paddle.reset();
        self.balls.clear();
        self.balls.spawn_attached(&self.paddle);
        self.power_ups.clear();
        self.effects.clear();
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            level: self.level_index + 1,
            paddle: self.paddle.rect(),
            balls: self
                .balls
                .iter()
                .map(|b| BallView {
                    id: b.id,
                    x: b.pos().x,
                    y: b.pos().y,
                    radius: b.radius,
                    on_paddle: b.on_paddle,
                    pierce: b.pierce,
                    color: b.color,
                })
                .collect(),
            bricks: self
                .bricks
                .iter()
                .map(|b| BrickView {
                    id: b.id,
                    kind: b.kind,
                    rect: b.rect(),
                    hit_points: b.hit_points(),
                    max_hit_points: b.max_hit_points(),
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    id: p.id,
                    kind: p.kind,
                    rect: p.rect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub on_paddle: bool,
    pub pierce: bool,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickView {
    pub id: u32,
    pub kind: BrickKind,
    pub rect: Rect,
    pub hit_points: u32,
    pub max_hit_points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
}

/// Everything the renderer and HUD need for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// 1-based level number
    pub level: usize,
    pub paddle: Rect,
    pub balls: Vec<BallView>,
    pub bricks: Vec<BrickView>,
    pub power_ups: Vec<PowerUpView>,
}
