//! Sound effects
//!
//! The simulation names the sounds; a host-provided [`AudioSink`] plays them.
//! Playback is fire-and-forget and never blocks a tick.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall or ceiling
    WallHit,
    /// Ball hits brick (doesn't break)
    BrickHit,
    /// Brick breaks
    BrickBreak,
    /// Power-up collected
    PowerUpCollected,
    /// Last ball lost
    LifeLost,
    /// Level cleared
    LevelComplete,
    /// Final level cleared
    Victory,
    /// Ball launched
    Launch,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Asset key the audio layer looks the sound up by
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::WallHit => "wall_hit",
            SoundEffect::BrickHit => "brick_hit",
            SoundEffect::BrickBreak => "brick_break",
            SoundEffect::PowerUpCollected => "powerup_collected",
            SoundEffect::LifeLost => "life_lost",
            SoundEffect::LevelComplete => "level_complete",
            SoundEffect::Victory => "victory",
            SoundEffect::Launch => "ball_launched",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Anything that can play a named sound
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio manager for the game
///
/// Applies volume and mute, then hands the sound to the log. Hosts with a
/// real mixer wrap or replace this.
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
    last: Option<SoundEffect>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
            last: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Sounds actually played (muted sounds are not counted)
    pub fn played(&self) -> u64 {
        self.played
    }

    pub fn last_played(&self) -> Option<SoundEffect> {
        self.last
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        self.last = Some(effect);
        log::debug!("♪ {} (vol {:.2})", effect.name(), vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_audio_assets() {
        assert_eq!(SoundEffect::PaddleHit.name(), "paddle_hit");
        assert_eq!(SoundEffect::BrickBreak.name(), "brick_break");
        assert_eq!(SoundEffect::PowerUpCollected.name(), "powerup_collected");
        assert_eq!(SoundEffect::LevelComplete.name(), "level_complete");
    }

    #[test]
    fn test_muted_manager_plays_nothing() {
        let mut settings = Settings::default();
        settings.muted = true;
        let mut audio = AudioManager::from_settings(&settings);
        audio.play(SoundEffect::WallHit);
        assert_eq!(audio.played(), 0);
        assert_eq!(audio.last_played(), None);

        audio.set_muted(false);
        audio.play(SoundEffect::WallHit);
        assert_eq!(audio.played(), 1);
        assert_eq!(audio.last_played(), Some(SoundEffect::WallHit));
    }

    #[test]
    fn test_volume_clamped() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        audio.play(SoundEffect::GameOver);
        assert_eq!(audio.played(), 0);
    }
}
