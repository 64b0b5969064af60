//! Typed player configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::utils::logging::LogLevel;

/// Every configuration key understood by [`PlayerSettings::apply`]
pub const CONFIG_KEYS: &[&str] = &[
    "log_level",
    "log_json",
    "catalog_path",
    "trim_store_path",
    "mount_point",
    "frame_interval_ms",
    "simulated_duration",
    "playback_speed",
];

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Search listing the catalog is read from
    pub catalog_path: PathBuf,
    /// File holding persisted trim windows
    pub trim_store_path: PathBuf,
    /// Element id the widget mounts into
    pub mount_point: String,
    /// Progress loop cadence
    pub frame_interval_ms: u64,
    /// Clip length reported by the simulated widget
    pub simulated_duration: f64,
    /// Clock multiplier of the simulated widget
    pub playback_speed: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            catalog_path: PathBuf::from("data/catalog.json"),
            trim_store_path: Self::default_trim_store_path(),
            mount_point: "clip-player".to_string(),
            frame_interval_ms: 16,
            simulated_duration: 120.0,
            playback_speed: 1.0,
        }
    }
}

impl PlayerSettings {
    /// Get default trim store path
    fn default_trim_store_path() -> PathBuf {
        // Prefer the per-user data directory, fall back to the working directory
        if let Some(appdata) = std::env::var_os("APPDATA") {
            PathBuf::from(appdata).join("ClipTrim").join("trims.json")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".cliptrim").join("trims.json")
        } else {
            PathBuf::from("cliptrim_trims.json")
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Read a setting by key as text
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "log_level" => self.log_level.clone(),
            "log_json" => self.log_json.to_string(),
            "catalog_path" => self.catalog_path.to_string_lossy().to_string(),
            "trim_store_path" => self.trim_store_path.to_string_lossy().to_string(),
            "mount_point" => self.mount_point.clone(),
            "frame_interval_ms" => self.frame_interval_ms.to_string(),
            "simulated_duration" => self.simulated_duration.to_string(),
            "playback_speed" => self.playback_speed.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Overwrite a setting from its text form
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        match key {
            "log_level" => self.log_level = value.to_string(),
            "log_json" => self.log_json = parse_value(key, value)?,
            "catalog_path" => self.catalog_path = PathBuf::from(value),
            "trim_store_path" => self.trim_store_path = PathBuf::from(value),
            "mount_point" => self.mount_point = value.to_string(),
            "frame_interval_ms" => self.frame_interval_ms = parse_value(key, value)?,
            "simulated_duration" => self.simulated_duration = parse_value(key, value)?,
            "playback_speed" => self.playback_speed = parse_value(key, value)?,
            _ => {
                return Err(DomainError::ConfigError(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), DomainError> {
        LogLevel::parse(&self.log_level)?;

        if self.frame_interval_ms == 0 || self.frame_interval_ms > 1000 {
            return Err(DomainError::ConfigError(format!(
                "frame_interval_ms must be within 1..=1000, got {}",
                self.frame_interval_ms
            )));
        }
        if self.mount_point.trim().is_empty() {
            return Err(DomainError::ConfigError(
                "mount_point cannot be empty".to_string(),
            ));
        }
        if !(self.simulated_duration > 0.0) {
            return Err(DomainError::ConfigError(format!(
                "simulated_duration must be positive, got {}",
                self.simulated_duration
            )));
        }
        if !(self.playback_speed > 0.0) {
            return Err(DomainError::ConfigError(format!(
                "playback_speed must be positive, got {}",
                self.playback_speed
            )));
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DomainError::ConfigError(format!("Invalid value for {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(PlayerSettings::default().validate().is_ok());
    }

    #[test]
    fn test_apply_and_get_roundtrip_keys() {
        let mut settings = PlayerSettings::default();
        settings.apply("frame_interval_ms", "33").unwrap();
        settings.apply("log_json", "true").unwrap();
        assert_eq!(settings.frame_interval(), Duration::from_millis(33));
        assert!(settings.log_json);
        for key in CONFIG_KEYS {
            assert!(settings.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut settings = PlayerSettings::default();
        assert!(settings.apply("frame_interval_ms", "fast").is_err());
        assert!(settings.apply("volume", "11").is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut settings = PlayerSettings::default();
        settings.frame_interval_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = PlayerSettings::default();
        settings.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
    }
}
