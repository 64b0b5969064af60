// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::info;

use crate::config::PlayerSettings;
use crate::domain::errors::*;
use crate::ports::*;

/// Shape of a config file; settings live under `[cliptrim]`
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    cliptrim: Option<PlayerSettings>,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    settings: RwLock<PlayerSettings>,
    config_file_path: RwLock<Option<PathBuf>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter holding the defaults
    pub fn new() -> Self {
        Self::with_settings(PlayerSettings::default())
    }

    pub fn with_settings(settings: PlayerSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
            config_file_path: RwLock::new(None),
        }
    }

    /// Replace the settings with the `[cliptrim]` section of `toml_content`
    ///
    /// Keys missing from the section keep their default values.
    pub fn deserialize_config(&self, toml_content: &str) -> Result<(), DomainError> {
        let parsed: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigError(format!("Failed to parse TOML config: {}", e)))?;

        if let Some(settings) = parsed.cliptrim {
            *self.settings.write() = settings;
        }
        Ok(())
    }

    /// Path of the last loaded config file
    pub fn config_file_path(&self) -> Option<PathBuf> {
        self.config_file_path.read().clone()
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.settings.read().get(key))
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.settings.write().apply(key, value)?;
        info!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError> {
        let content = tokio::fs::read_to_string(file_path).await.map_err(|e| {
            DomainError::ConfigError(format!(
                "Failed to read config file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        self.deserialize_config(&content)?;
        *self.config_file_path.write() = Some(file_path.to_path_buf());
        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        self.settings.read().validate()
    }

    fn settings(&self) -> PlayerSettings {
        self.settings.read().clone()
    }
}
