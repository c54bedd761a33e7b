//! Brick Breaker - paddle-and-ball brick-breaking simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, bricks, power-ups, levels)
//! - `settings`: Data-driven game balance
//! - `audio`: Named sound events and the sink that plays them
//! - `highscores`: Leaderboard fed by session events
//! - `progress`: Level unlocks and best scores
//! - `error`: Configuration errors

pub mod audio;
pub mod error;
pub mod highscores;
pub mod progress;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, SoundEffect};
pub use error::ConfigError;
pub use highscores::HighScores;
pub use progress::LevelProgress;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native driver (120 Hz)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f64 = 560.0;
    pub const SCREEN_HEIGHT: f64 = 740.0;
    /// Side wall thickness
    pub const INSET: f64 = 22.0;
    /// Ceiling (HUD band height)
    pub const UPPER_INSET: f64 = 85.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f64 = 80.0;
    pub const PADDLE_HEIGHT: f64 = 22.0;
    /// Distance from the bottom edge to the paddle centre
    pub const PADDLE_OFFSET_Y: f64 = 68.0;

    /// Ball defaults
    pub const BALL_SIZE: f64 = 12.0;
    pub const BALL_RADIUS: f64 = BALL_SIZE / 2.0;
    /// Horizontal speed floor for a moving ball
    pub const BALL_MIN_HORIZONTAL_SPEED: f64 = 50.0;
    /// Paddle bounces never leave the ball slower than this fraction of the base speed
    pub const BALL_SPEED_FLOOR_FACTOR: f64 = 0.8;
    /// Largest paddle bounce deflection from vertical (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f64 = 60.0;
    /// Hit position is clamped to this fraction of the paddle half-width
    pub const MAX_HIT_POSITION: f64 = 0.8;

    /// Brick defaults
    pub const BRICK_WIDTH: f64 = 38.0;
    pub const BRICK_HEIGHT: f64 = 20.0;
    pub const BRICK_H_GAP: f64 = 6.0;
    pub const BRICK_V_GAP: f64 = 6.0;
    /// Vertical offset of the brick grid below the ceiling
    pub const BRICK_GRID_TOP_OFFSET: f64 = 80.0;

    /// Power-up pickup box size
    pub const POWERUP_SIZE: f64 = 20.0;
}
