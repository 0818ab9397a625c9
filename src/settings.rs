//! Game settings and preferences
//!
//! Audio and haptics knobs for the host's playback layer. Persisted
//! separately from player progress; nothing here feeds back into the
//! simulation.

use serde::{Deserialize, Serialize};

/// Volume levels are 0-100
pub const MAX_VOLUME: u8 = 100;

/// Player preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Background music volume (0-100)
    pub music_level: u8,
    /// Effect sounds volume (0-100)
    pub effects_level: u8,
    /// Vibrate on coin pickup / game over
    pub haptics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_level: 70,
            effects_level: 100,
            haptics: true,
        }
    }
}

impl Settings {
    /// Suggested storage key for the host
    pub const STORAGE_KEY: &'static str = "carrot_toss_settings";

    pub fn set_music_level(&mut self, level: u8) {
        self.music_level = level.min(MAX_VOLUME);
    }

    pub fn set_effects_level(&mut self, level: u8) {
        self.effects_level = level.min(MAX_VOLUME);
    }

    pub fn is_muted(&self) -> bool {
        self.music_level == 0 && self.effects_level == 0
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.music_level = settings.music_level.min(MAX_VOLUME);
        settings.effects_level = settings.effects_level.min(MAX_VOLUME);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_clamped() {
        let mut settings = Settings::default();
        settings.set_music_level(200);
        assert_eq!(settings.music_level, MAX_VOLUME);
        settings.set_effects_level(0);
        assert_eq!(settings.effects_level, 0);
    }

    #[test]
    fn test_muted_only_when_both_silent() {
        let mut settings = Settings::default();
        assert!(!settings.is_muted());
        settings.set_music_level(0);
        settings.set_effects_level(0);
        assert!(settings.is_muted());
    }

    #[test]
    fn test_json_round_trip_clamps() {
        let json = r#"{"music_level":250,"effects_level":30,"haptics":false}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.music_level, MAX_VOLUME);
        assert_eq!(settings.effects_level, 30);
        assert!(!settings.haptics);
    }
}
