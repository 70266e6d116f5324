//! Game Configuration
//!
//! Every tunable of the simulation in one place, loadable from JSON.
//! Missing fields fall back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Largest accepted screen dimension. Keeps every coordinate sum in `i32`.
pub const MAX_SCREEN_EXTENT: i32 = 1 << 20;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// File contents were not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parsed but are unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Visible area width; also the world width of every level
    pub screen_width: i32,
    /// Visible area height; falling below it costs a life
    pub screen_height: i32,
    /// Player box width
    pub player_width: i32,
    /// Player box height
    pub player_height: i32,
    /// Pixels moved per step (jump ascent moves twice this)
    pub step_size: i32,
    /// Ticks a jump stays registered (active for one extra tick)
    pub jump_duration: u32,
    /// Lives at the start of a game
    pub starting_lives: u32,
    /// Ground thickness
    pub ground_height: i32,
    /// Platform thickness
    pub platform_height: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            player_width: 48,
            player_height: 48,
            step_size: 1,
            jump_duration: 40,
            starting_lives: 3,
            ground_height: 64,
            platform_height: 16,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check the values describe a playable game.
    ///
    /// Accepted values cannot overflow any position the frame loop computes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(ConfigError::Invalid("screen size must be positive".into()));
        }
        if self.screen_width > MAX_SCREEN_EXTENT || self.screen_height > MAX_SCREEN_EXTENT {
            return Err(ConfigError::Invalid(format!(
                "screen {}x{} exceeds {} pixels per side",
                self.screen_width, self.screen_height, MAX_SCREEN_EXTENT
            )));
        }
        if self.player_width <= 0 || self.player_height <= 0 {
            return Err(ConfigError::Invalid("player size must be positive".into()));
        }
        if self.step_size <= 0 {
            return Err(ConfigError::Invalid("step size must be positive".into()));
        }
        if self.step_size > self.screen_width.min(self.screen_height) {
            return Err(ConfigError::Invalid(format!(
                "step size {} is larger than the screen",
                self.step_size
            )));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting lives must be at least 1".into()));
        }
        if self.ground_height <= 0 || self.platform_height <= 0 {
            return Err(ConfigError::Invalid("geometry thickness must be positive".into()));
        }
        if self.platform_height > self.screen_height {
            return Err(ConfigError::Invalid(format!(
                "platform height {} is taller than the screen",
                self.platform_height
            )));
        }
        let fits_vertically = self
            .player_height
            .checked_add(self.ground_height)
            .is_some_and(|stacked| stacked <= self.screen_height);
        if self.player_width >= self.screen_width || !fits_vertically {
            return Err(ConfigError::Invalid(format!(
                "player {}x{} does not fit above the ground on a {}x{} screen",
                self.player_width, self.player_height, self.screen_width, self.screen_height
            )));
        }
        // Total ascent of one jump, which is active for jump_duration + 1 ticks
        let ascent = (i64::from(self.jump_duration) + 1) * 2 * i64::from(self.step_size);
        if ascent > i64::from(MAX_SCREEN_EXTENT) {
            return Err(ConfigError::Invalid(format!(
                "jump of {} ticks at step {} rises {} pixels",
                self.jump_duration, self.step_size, ascent
            )));
        }
        Ok(())
    }

    /// Spawn height for a player standing on ground of the given thickness.
    pub fn spawn_y(&self, ground_height: i32) -> i32 {
        self.screen_height - ground_height - self.player_height
    }

    /// Leftmost x at which the player counts as having reached the right edge.
    pub fn finish_x(&self) -> i32 {
        self.screen_width - self.player_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_y(config.ground_height), 488);
        assert_eq!(config.finish_x(), 752);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json_str(r#"{ "starting_lives": 5 }"#).unwrap();
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.jump_duration, 40);
        assert_eq!(config.screen_width, 800);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::from_json_str(r#"{ "step_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_json_str(r#"{ "player_height": 580 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_overflowing_values_rejected() {
        let cases = [
            r#"{ "player_height": 2147483647 }"#,
            r#"{ "ground_height": 2147483647 }"#,
            r#"{ "step_size": 2000000000 }"#,
            r#"{ "screen_width": 2147483647, "screen_height": 2147483647 }"#,
            r#"{ "platform_height": 2147483647 }"#,
            r#"{ "jump_duration": 4294967295 }"#,
        ];
        for json in cases {
            let err = GameConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{} accepted", json);
        }
    }

    #[test]
    fn test_largest_screen_accepted() {
        let config = GameConfig {
            screen_width: MAX_SCREEN_EXTENT,
            screen_height: MAX_SCREEN_EXTENT,
            step_size: 1000,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/sidescroll/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
