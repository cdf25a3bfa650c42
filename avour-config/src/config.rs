//! Sketch configuration: window, timing and rendering settings.
//!
//! Covers:
//! - the `Config` struct and its builder helpers
//! - `validate` (fail-fast checks for sizes and rates)
//! - YAML load / save with atomic write
//! - XDG-style path helpers (`config_path`, `config_dir`)

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{LogLevel, PowerPreference, VsyncMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a sketch window and its loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Window width in logical pixels
    #[serde(default = "defaults::screen_width")]
    pub screen_width: u32,

    /// Window height in logical pixels
    #[serde(default = "defaults::screen_height")]
    pub screen_height: u32,

    /// Window title
    #[serde(default)]
    pub screen_title: String,

    /// Draw the measured frame rate in the bottom-left corner
    #[serde(default)]
    pub show_fps: bool,

    /// Target number of `draw()` calls per second
    #[serde(default = "defaults::frame_rate")]
    pub frame_rate: u32,

    /// Target number of `update()` calls per second
    #[serde(default = "defaults::physics_rate")]
    pub physics_rate: u32,

    /// Allow the user to resize the window
    #[serde(default)]
    pub resizable: bool,

    /// Surface presentation mode
    #[serde(default)]
    pub vsync_mode: VsyncMode,

    /// GPU adapter preference
    #[serde(default)]
    pub power_preference: PowerPreference,

    /// Debug log verbosity
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: defaults::screen_width(),
            screen_height: defaults::screen_height(),
            screen_title: String::new(),
            show_fps: false,
            frame_rate: defaults::frame_rate(),
            physics_rate: defaults::physics_rate(),
            resizable: false,
            vsync_mode: VsyncMode::default(),
            power_preference: PowerPreference::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size in logical pixels
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.screen_title = title.into();
        self
    }

    /// Enable or disable the fps overlay
    pub fn with_show_fps(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;
        self
    }

    /// Set the draw loop frequency
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Set the physics loop frequency
    pub fn with_physics_rate(mut self, physics_rate: u32) -> Self {
        self.physics_rate = physics_rate;
        self
    }

    /// Window size as a `(width, height)` tuple
    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// Check every field that has a semantic constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Validation(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Validation(
                "frame_rate must be greater than 0".to_string(),
            ));
        }
        if self.physics_rate == 0 {
            return Err(ConfigError::Validation(
                "physics_rate must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the user's config file, or defaults when it does not exist.
    ///
    /// Unlike [`Config::load_from`] a missing file is not an error, but a
    /// file that exists and fails to parse or validate still is.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to the given path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Write to a temp file then rename so a crash never leaves a half-written config
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::info!("Config saved to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("avour")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("avour")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.screen_size(), (1200, 800));
        assert_eq!(config.screen_title, "");
        assert!(!config.show_fps);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.physics_rate, 120);
        assert!(!config.resizable);
        assert_eq!(config.vsync_mode, VsyncMode::Fifo);
        assert_eq!(config.power_preference, PowerPreference::LowPower);
        assert_eq!(config.log_level, LogLevel::Off);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_frame_rate_rejected() {
        let config = Config::new().with_frame_rate(0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("frame_rate")));
    }

    #[test]
    fn test_zero_physics_rate_rejected() {
        let config = Config::new().with_physics_rate(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_screen_size_rejected() {
        let config = Config::new().with_screen_size(0, 600);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_minimal_yaml() {
        let yaml = "screen_title: hello\nframe_rate: 30\n";
        let config: Config = serde_yaml_ng::from_str(yaml).expect("deserialize");
        assert_eq!(config.screen_title, "hello");
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.physics_rate, 120);
        assert_eq!(config.screen_size(), (1200, 800));
    }

    #[test]
    fn test_deserialize_enums() {
        let yaml = "vsync_mode: mailbox\npower_preference: high_performance\nlog_level: debug\n";
        let config: Config = serde_yaml_ng::from_str(yaml).expect("deserialize");
        assert_eq!(config.vsync_mode, VsyncMode::Mailbox);
        assert_eq!(config.power_preference, PowerPreference::HighPerformance);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_negative_frame_rate_fails_to_parse() {
        let yaml = "frame_rate: -5\n";
        assert!(serde_yaml_ng::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");

        let mut config = Config::new().with_title("Saved").with_frame_rate(24);
        config.vsync_mode = VsyncMode::Mailbox;
        config.power_preference = PowerPreference::HighPerformance;
        config.log_level = LogLevel::Debug;
        config.save_to(&path).unwrap();

        // atomic save leaves no temp file behind
        assert!(path.exists());
        assert!(!path.with_extension("yaml.tmp").exists());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_validates_file_contents() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "physics_rate: 0\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
