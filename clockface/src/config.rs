//! Configuration persistence utilities
//!
//! Provides the picker configuration and functions for loading and saving it
//! (or any other serde type) to disk as TOML.

use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::face::{Dial, DEFAULT_FACE_SIZE, INNER_RING_INSET, LABEL_INSET};
use crate::mode::HourCycle;
use crate::time_source::parse_timezone;

/// Smallest face that keeps the inner ring 12 px clear of the center
pub const MIN_FACE_SIZE: f64 = 2.0 * (LABEL_INSET + INNER_RING_INSET + 12.0);

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("could not determine config directory")]
    NoConfigDir,
    /// IO error while reading/writing config
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Config values out of range
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Time zone name not in the tz database
    #[error("unknown time zone: {0}")]
    UnknownTimezone(String),
}

/// Settings shared by the selection controller and its hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// 12-hour or 24-hour hour face
    pub hour_cycle: HourCycle,
    /// Only multiples of this many minutes are selectable
    pub minute_step: u32,
    /// Pause after releasing the pointer before moving on
    pub settle_delay_ms: u64,
    /// Duration of the hand rotation between values
    pub transition_ms: u64,
    /// Edge length of the square face in pixels
    pub face_size: f64,
    /// IANA zone used for the initial value; system local time when unset
    pub timezone: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            hour_cycle: HourCycle::default(),
            minute_step: 1,
            settle_delay_ms: 300,
            transition_ms: 250,
            face_size: DEFAULT_FACE_SIZE,
            timezone: None,
        }
    }
}

impl PickerConfig {
    /// Check value ranges before the config reaches the controller
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=60).contains(&self.minute_step) {
            return Err(ConfigError::Invalid(format!(
                "minute_step must be between 1 and 60, got {}",
                self.minute_step
            )));
        }
        if !self.face_size.is_finite() || self.face_size < MIN_FACE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "face_size must be at least {}, got {}",
                MIN_FACE_SIZE, self.face_size
            )));
        }
        self.zone()?;
        Ok(())
    }

    pub fn dial(&self) -> Dial {
        Dial::for_face(self.face_size)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Configured zone, if any
    pub fn zone(&self) -> Result<Option<Tz>, ConfigError> {
        self.timezone.as_deref().map(parse_timezone).transpose()
    }
}

/// Get the base configuration directory
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "clockface", "clockface")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the configuration file path for a specific app
pub fn config_path(app_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", app_name)))
}

/// Load configuration from an explicit path
///
/// Returns `None` if the file doesn't exist yet.
pub fn load_config_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save configuration to an explicit path, creating parent directories
pub fn save_config_to<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load configuration for a specific app
///
/// Returns `None` if the config file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config<T: DeserializeOwned>(app_name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;
    load_config_from(&path)
}

/// Save configuration for a specific app
pub fn save_config<T: Serialize>(app_name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, config)
}

/// Delete configuration for a specific app
pub fn delete_config(app_name: &str) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        if let Some(path) = config_path("test_picker") {
            assert!(path.to_string_lossy().contains("test_picker.toml"));
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("picker.toml");
        let config = PickerConfig {
            hour_cycle: HourCycle::H24,
            minute_step: 5,
            timezone: Some("Europe/Berlin".to_string()),
            ..PickerConfig::default()
        };

        save_config_to(&path, &config).unwrap();
        let loaded: Option<PickerConfig> = load_config_from(&path).unwrap();
        assert_eq!(loaded, Some(config));
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<PickerConfig> =
            load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: PickerConfig =
            toml::from_str("minute_step = 5\nhour_cycle = \"24h\"\n").unwrap();
        assert_eq!(config.minute_step, 5);
        assert_eq!(config.hour_cycle, HourCycle::H24);
        assert_eq!(config.settle_delay_ms, 300);
        assert_eq!(config.face_size, DEFAULT_FACE_SIZE);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "minute_step = \"five\"").unwrap();
        let result: Result<Option<PickerConfig>, _> = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(PickerConfig::default().validate().is_ok());

        let zero_step = PickerConfig {
            minute_step: 0,
            ..PickerConfig::default()
        };
        assert!(matches!(zero_step.validate(), Err(ConfigError::Invalid(_))));

        let huge_step = PickerConfig {
            minute_step: 61,
            ..PickerConfig::default()
        };
        assert!(matches!(huge_step.validate(), Err(ConfigError::Invalid(_))));

        let tiny_face = PickerConfig {
            face_size: 100.0,
            ..PickerConfig::default()
        };
        assert!(matches!(tiny_face.validate(), Err(ConfigError::Invalid(_))));

        let bad_zone = PickerConfig {
            timezone: Some("Mars/Olympus_Mons".to_string()),
            ..PickerConfig::default()
        };
        assert!(matches!(
            bad_zone.validate(),
            Err(ConfigError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn test_dial_follows_face_size() {
        let config = PickerConfig {
            face_size: 320.0,
            ..PickerConfig::default()
        };
        let dial = config.dial();
        assert_eq!(dial.outer_radius, 140.0);
        assert_eq!(dial.inner_radius, 108.0);
    }
}
