//! Configuration errors

/// Errors raised while loading levels or settings
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Requested level is not in the catalogue
    #[error("level index {index} out of range (catalogue has {count} levels)")]
    LevelOutOfRange { index: usize, count: usize },

    /// Level exists but has not been unlocked yet
    #[error("level {index} is locked")]
    LevelLocked { index: usize },

    /// Settings document could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but hold an unusable value
    #[error("invalid setting: {0}")]
    Invalid(String),
}
