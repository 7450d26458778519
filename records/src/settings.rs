//! User settings blob

use game_core::{Config, Difficulty, PaddleIntent};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::RecordsError;

/// Base of the ball speed slider: speed = BASE + slider factor
pub const BALL_SPEED_SLIDER_BASE: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Retro,
    Neon,
    Minimal,
    Matrix,
}

/// Which keys drive the player paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlScheme {
    Arrows,
    Wasd,
    #[default]
    Both,
}

impl ControlScheme {
    pub fn intent(&self, keys: &HeldKeys) -> PaddleIntent {
        let (arrows, wasd) = match self {
            ControlScheme::Arrows => (true, false),
            ControlScheme::Wasd => (false, true),
            ControlScheme::Both => (true, true),
        };
        PaddleIntent::new(
            (arrows && keys.arrow_up) || (wasd && keys.w),
            (arrows && keys.arrow_down) || (wasd && keys.s),
        )
    }
}

/// Movement keys currently held down, fed from keydown/keyup events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub arrow_up: bool,
    pub arrow_down: bool,
    pub w: bool,
    pub s: bool,
}

impl HeldKeys {
    /// Returns false for keys that don't move the paddle
    pub fn press(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    pub fn release(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set(&mut self, key: &str, held: bool) -> bool {
        let slot = match key {
            "ArrowUp" => &mut self.arrow_up,
            "ArrowDown" => &mut self.arrow_down,
            "w" | "W" => &mut self.w,
            "s" | "S" => &mut self.s,
            _ => return false,
        };
        *slot = held;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Accessibility {
    pub high_contrast: bool,
    pub large_text: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub sound_enabled: bool,
    pub commentary_enabled: bool,
    pub theme: Theme,
    pub controls_type: ControlScheme,
    pub initial_ball_speed: f32,
    pub ai_difficulty: Difficulty,
    pub accessibility: Accessibility,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            commentary_enabled: true,
            theme: Theme::default(),
            controls_type: ControlScheme::default(),
            initial_ball_speed: game_core::Params::BALL_SPEED_INITIAL,
            ai_difficulty: Difficulty::default(),
            accessibility: Accessibility::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, RecordsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a stored blob, falling back to defaults if it is missing or
    /// unreadable
    pub fn load_or_default(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        Self::from_json(json).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable settings");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, RecordsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Ball speed slider position to initial speed
    pub fn set_ball_speed_slider(&mut self, factor: f32) {
        self.initial_ball_speed = BALL_SPEED_SLIDER_BASE + factor;
    }

    /// Copy the gameplay settings into `config`. The config is left as it
    /// was if the result would be invalid.
    pub fn apply(&self, config: &mut Config) -> Result<Difficulty, RecordsError> {
        let mut updated = config.clone();
        updated.ball_speed_initial = self.initial_ball_speed;
        updated.validate()?;
        *config = updated;
        Ok(self.ai_difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ConfigError;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert!(settings.commentary_enabled);
        assert_eq!(settings.theme, Theme::Retro);
        assert_eq!(settings.controls_type, ControlScheme::Both);
        assert_eq!(settings.initial_ball_speed, 5.0);
        assert_eq!(settings.ai_difficulty, Difficulty::Easy);
        assert!(!settings.accessibility.high_contrast);
    }

    #[test]
    fn test_camel_case_blob() {
        let json = r#"{
            "soundEnabled": false,
            "commentaryEnabled": true,
            "theme": "matrix",
            "controlsType": "wasd",
            "initialBallSpeed": 7,
            "aiDifficulty": "hard",
            "accessibility": { "highContrast": true, "largeText": false }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert!(!settings.sound_enabled);
        assert_eq!(settings.theme, Theme::Matrix);
        assert_eq!(settings.controls_type, ControlScheme::Wasd);
        assert_eq!(settings.initial_ball_speed, 7.0);
        assert_eq!(settings.ai_difficulty, Difficulty::Hard);
        assert!(settings.accessibility.high_contrast);
    }

    #[test]
    fn test_missing_fields_default() {
        let settings = Settings::from_json(r#"{"theme":"neon","accessibility":{}}"#).unwrap();
        assert_eq!(settings.theme, Theme::Neon);
        assert!(settings.sound_enabled);
        assert_eq!(settings.initial_ball_speed, 5.0);
        assert!(!settings.accessibility.large_text);
    }

    #[test]
    fn test_malformed_blob_falls_back() {
        assert!(Settings::from_json("{not json").is_err());
        assert_eq!(Settings::load_or_default("{not json"), Settings::default());
        assert_eq!(
            Settings::load_or_default(r#"{"theme":"sepia"}"#),
            Settings::default()
        );
    }

    #[test]
    fn test_empty_storage_gives_defaults() {
        assert_eq!(Settings::load_or_default(""), Settings::default());
        assert_eq!(Settings::load_or_default("   "), Settings::default());
    }

    #[test]
    fn test_slider() {
        let mut settings = Settings::default();
        settings.set_ball_speed_slider(4.0);
        assert_eq!(settings.initial_ball_speed, 7.0);
    }

    #[test]
    fn test_apply() {
        let mut config = Config::new();
        let settings = Settings {
            initial_ball_speed: 6.5,
            ai_difficulty: Difficulty::Medium,
            ..Settings::default()
        };
        assert_eq!(settings.apply(&mut config).unwrap(), Difficulty::Medium);
        assert_eq!(config.ball_speed_initial, 6.5);
    }

    #[test]
    fn test_apply_rejects_speed_above_max() {
        let mut config = Config::new();
        let settings = Settings {
            initial_ball_speed: 40.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.apply(&mut config),
            Err(RecordsError::Config(ConfigError::InitialSpeedAboveMax { .. }))
        ));
        assert_eq!(config.ball_speed_initial, 5.0, "Config untouched");
    }

    #[test]
    fn test_control_schemes() {
        let mut keys = HeldKeys::default();
        assert!(keys.press("ArrowUp"));
        assert!(!keys.press("Enter"));

        assert_eq!(ControlScheme::Arrows.intent(&keys).dir(), -1);
        assert_eq!(ControlScheme::Wasd.intent(&keys).dir(), 0);
        assert_eq!(ControlScheme::Both.intent(&keys).dir(), -1);

        keys.release("ArrowUp");
        keys.press("S");
        assert_eq!(ControlScheme::Arrows.intent(&keys).dir(), 0);
        assert_eq!(ControlScheme::Wasd.intent(&keys).dir(), 1);

        keys.press("ArrowUp");
        assert_eq!(ControlScheme::Both.intent(&keys).dir(), 0, "Up and down cancel");

        keys.clear();
        assert_eq!(ControlScheme::Both.intent(&keys), PaddleIntent::default());
    }
}
