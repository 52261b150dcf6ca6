// SPDX-License-Identifier: MIT OR Apache-2.0
//! Application configuration.
//!
//! Settings are stored as RON and cover:
//! - Escort timings and layout
//! - Dungeon cell placement
//! - Board placement and theme
//! - Headless replay parameters

use dungeon_chess_board::{BoardLayout, Piece, PieceColor, PieceKind, Square, ThemePreset};
use dungeon_chess_sequencer::{EscortConfig, TimingError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "dungeon_chess.ron";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid RON for this schema
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serializing the configuration failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Written by a newer version
    #[error("Config version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// Escort timings are unusable
    #[error("Invalid escort timing: {0}")]
    Timing(#[from] TimingError),

    /// Replay frame rate is not positive
    #[error("Frame rate must be positive (got {0})")]
    InvalidFrameRate(f64),

    /// Board square size is not positive
    #[error("Board square size must be positive (got {0})")]
    InvalidSquareSize(f32),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Headless replay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Simulated frames per second
    pub frame_rate: f64,
    /// Square the captured piece stood on
    pub capture_square: Square,
    /// The captured piece
    pub captured_piece: Piece,
    /// Give up after this many simulated seconds
    pub max_seconds: f64,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            capture_square: Square::clamped(3, 4),
            captured_piece: Piece::new(PieceKind::Pawn, PieceColor::Black),
            max_seconds: 10.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Format version
    pub version: u32,
    /// Escort timings and layout
    pub escort: EscortConfig,
    /// World position of the dungeon cell
    pub dungeon_anchor: [f32; 3],
    /// Board placement
    pub board: BoardLayout,
    /// Starting theme
    pub theme: ThemePreset,
    /// Headless replay
    pub replay: ReplaySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            escort: EscortConfig::default(),
            dungeon_anchor: [0.0, 0.0, -9.0],
            board: BoardLayout::default(),
            theme: ThemePreset::default(),
            replay: ReplaySettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = ron::from_str(&content)?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_FORMAT_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        let content = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.escort.validate()?;
        if !(self.replay.frame_rate.is_finite() && self.replay.frame_rate > 0.0) {
            return Err(ConfigError::InvalidFrameRate(self.replay.frame_rate));
        }
        if !(self.board.square_size.is_finite() && self.board.square_size > 0.0) {
            return Err(ConfigError::InvalidSquareSize(self.board.square_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.dungeon_anchor, [0.0, 0.0, -9.0]);
        assert_eq!(config.replay.capture_square.to_string(), "d5");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = AppConfig::default();
        config.theme = ThemePreset::Dungeon;
        config.escort.timings.escort = 2.0;
        config.replay.capture_square = "g7".parse().unwrap();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "(dungeon_anchor: (1.0, 0.0, -12.0), replay: (frame_rate: 30.0))").unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.dungeon_anchor, [1.0, 0.0, -12.0]);
        assert_eq!(loaded.replay.frame_rate, 30.0);
        assert_eq!(loaded.replay.max_seconds, 10.0);
        assert_eq!(loaded.escort, EscortConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(&path, "(version: 99)").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::UnsupportedVersion { found: 99, .. })
        ));

        std::fs::write(&path, "(escort: (timings: (drop: -1.0)))").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Timing(_))));

        std::fs::write(&path, "(replay: (frame_rate: 0.0))").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::InvalidFrameRate(_))));

        std::fs::write(&path, "(replay: (capture_square: \"z9\"))").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));

        std::fs::write(&path, "not ron").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
