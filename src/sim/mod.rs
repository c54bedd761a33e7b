//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (layout order for bricks, spawn order for balls)
//! - No rendering or platform dependencies

pub mod ball;
pub mod body;
pub mod brick;
pub mod collision;
pub mod events;
pub mod level;
pub mod paddle;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod vector;

pub use ball::{Ball, BallSet};
pub use body::KinematicBody;
pub use brick::{Brick, BrickKind};
pub use events::{GameEvent, ProgressSink, Services, Silent};
pub use level::{LEVEL_COUNT, LEVELS, LevelLayout};
pub use paddle::{Paddle, PaddleIntent};
pub use powerup::{ActiveEffects, PowerFactory, PowerUp, PowerUpKind, TimedEffect};
pub use state::{GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
pub use vector::{Rect, Vector2};
