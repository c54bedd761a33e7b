//! Game settings and balance tuning
//!
//! Loaded from JSON by the host; every field has a default matching the
//! shipped game balance.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Relative spawn weights per power-up kind (0 disables a kind)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpWeights {
    pub expand_paddle: u32,
    pub fast_ball: u32,
    pub pierce_ball: u32,
    pub multi_ball: u32,
    pub extra_life: u32,
}

impl Default for PowerUpWeights {
    fn default() -> Self {
        Self {
            expand_paddle: 25,
            fast_ball: 20,
            pierce_ball: 15,
            multi_ball: 25,
            extra_life: 15,
        }
    }
}

impl PowerUpWeights {
    /// Sum of all weights; `None` if it does not fit in a `u32`
    pub fn total(&self) -> Option<u32> {
        [self.fast_ball, self.pierce_ball, self.multi_ball, self.extra_life]
            .into_iter()
            .try_fold(self.expand_paddle, u32::checked_add)
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Lives at the start of a game
    pub starting_lives: u32,
    /// Seconds the level-complete breather lasts before the next layout loads
    pub level_transition_secs: f64,

    // === Motion ===
    /// Launch speed and base for the paddle-bounce speed floor
    pub ball_speed: f64,
    /// Paddle speed while a move intent is held
    pub paddle_speed: f64,
    /// Power-up fall speed
    pub powerup_fall_speed: f64,

    // === Power-ups ===
    /// Chance a destroyed brick drops a power-up (0.0 - 1.0)
    pub powerup_spawn_chance: f64,
    pub powerup_weights: PowerUpWeights,
    pub expand_factor: f64,
    pub expand_duration_secs: f64,
    pub fast_ball_factor: f64,
    pub fast_ball_duration_secs: f64,
    /// Hard cap on simultaneous balls
    pub multi_ball_cap: usize,
    /// Maximum clone deflection either side (radians)
    pub multi_ball_jitter: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            level_transition_secs: 1.5,

            ball_speed: 350.0,
            paddle_speed: 400.0,
            powerup_fall_speed: 70.0,

            powerup_spawn_chance: 0.3,
            powerup_weights: PowerUpWeights::default(),
            expand_factor: 1.5,
            expand_duration_secs: 10.0,
            fast_ball_factor: 1.5,
            fast_ball_duration_secs: 8.0,
            multi_ball_cap: 10,
            multi_ball_jitter: 0.3,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ball_speed", self.ball_speed),
            ("paddle_speed", self.paddle_speed),
            ("powerup_fall_speed", self.powerup_fall_speed),
            ("expand_factor", self.expand_factor),
            ("fast_ball_factor", self.fast_ball_factor),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("level_transition_secs", self.level_transition_secs),
            ("expand_duration_secs", self.expand_duration_secs),
            ("fast_ball_duration_secs", self.fast_ball_duration_secs),
            ("multi_ball_jitter", self.multi_ball_jitter),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 0, got {value}")));
            }
        }

        if !(0.0..=1.0).contains(&self.powerup_spawn_chance) {
            return Err(ConfigError::Invalid(format!(
                "powerup_spawn_chance must be within 0..=1, got {}",
                self.powerup_spawn_chance
            )));
        }
        match self.powerup_weights.total() {
            None => {
                return Err(ConfigError::Invalid("power-up weights overflow".into()));
            }
            Some(0) if self.powerup_spawn_chance > 0.0 => {
                return Err(ConfigError::Invalid("all power-up weights are zero".into()));
            }
            Some(_) => {}
        }
        if self.multi_ball_cap == 0 {
            return Err(ConfigError::Invalid("multi_ball_cap must be at least 1".into()));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "starting_lives": 5 }"#).unwrap();
        assert_eq!(settings.starting_lives, 5);
        assert_eq!(settings.ball_speed, 350.0);
        assert_eq!(settings.multi_ball_cap, 10);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.powerup_spawn_chance = 1.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "powerup_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Settings::from_json(r#"{ "ball_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_weight_total() {
        assert_eq!(PowerUpWeights::default().total(), Some(100));
    }

    #[test]
    fn test_overflowing_weights_rejected() {
        let json = r#"{ "powerup_weights": {
            "expand_paddle": 4000000000,
            "fast_ball": 4000000000,
            "pierce_ball": 1,
            "multi_ball": 1,
            "extra_life": 1
        } }"#;
        let err = Settings::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
