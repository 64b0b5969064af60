//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::adapters::TomlConfigAdapter;
use crate::cli::{Cli, Commands};
use crate::config::PlayerSettings;
use crate::ports::ConfigPort;

/// Config files tried, in order, when `--config` is not given
const CONFIG_CANDIDATES: &[&str] = &["config/cliptrim.toml", "cliptrim.toml"];

/// Environment variables and the settings they override
const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("CLIPTRIM_LOG_LEVEL", "log_level"),
    ("CLIPTRIM_LOG_JSON", "log_json"),
    ("CLIPTRIM_CATALOG_PATH", "catalog_path"),
    ("CLIPTRIM_TRIM_STORE_PATH", "trim_store_path"),
    ("CLIPTRIM_MOUNT_POINT", "mount_point"),
    ("CLIPTRIM_FRAME_INTERVAL_MS", "frame_interval_ms"),
    ("CLIPTRIM_SIMULATED_DURATION", "simulated_duration"),
    ("CLIPTRIM_PLAYBACK_SPEED", "playback_speed"),
];

/// Outcome of resolving the configuration hierarchy
///
/// Logging is installed from the resolved settings, so the summary is kept
/// here and logged afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: PlayerSettings,
    pub config_file: Option<PathBuf>,
    pub env_overrides: Vec<String>,
    pub cli_overrides: Vec<String>,
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(cli: &Cli) -> Result<ResolvedConfig> {
    let adapter = TomlConfigAdapter::new();

    let config_file = load_config_file(&adapter, cli.config.as_deref()).await?;
    let env_overrides = load_environment_variables(&adapter, |name| std::env::var(name).ok()).await?;
    let cli_overrides = apply_cli_configuration_overrides(&adapter, cli).await?;

    adapter
        .validate_config()
        .await
        .context("Invalid configuration")?;

    Ok(ResolvedConfig {
        settings: adapter.settings(),
        config_file,
        env_overrides,
        cli_overrides,
    })
}

/// Load configuration from file
///
/// An explicit path must exist; the default candidates are optional.
async fn load_config_file(
    adapter: &TomlConfigAdapter,
    explicit: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        adapter
            .load_config(path)
            .await
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        return Ok(Some(path.to_path_buf()));
    }

    for candidate in CONFIG_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            adapter.load_config(path).await?;
            return Ok(Some(path.to_path_buf()));
        }
    }
    Ok(None)
}

/// Apply `CLIPTRIM_*` environment overrides
async fn load_environment_variables<F>(adapter: &TomlConfigAdapter, lookup: F) -> Result<Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = Vec::new();
    for &(env_var, key) in ENV_MAPPINGS {
        if let Some(value) = lookup(env_var) {
            adapter
                .set_config(key, &value)
                .await
                .with_context(|| format!("Invalid value in {}", env_var))?;
            applied.push(key.to_string());
        }
    }
    Ok(applied)
}

/// Apply CLI argument overrides to configuration
async fn apply_cli_configuration_overrides(adapter: &TomlConfigAdapter, cli: &Cli) -> Result<Vec<String>> {
    let mut overrides: Vec<(&str, String)> = Vec::new();

    if let Some(level) = &cli.log_level {
        overrides.push(("log_level", level.clone()));
    }
    if cli.log_json {
        overrides.push(("log_json", "true".to_string()));
    }
    if let Some(store) = &cli.store {
        overrides.push(("trim_store_path", store.to_string_lossy().to_string()));
    }

    match &cli.command {
        Commands::Catalog(args) => {
            if let Some(data) = &args.data {
                overrides.push(("catalog_path", data.to_string_lossy().to_string()));
            }
        }
        Commands::Play(args) => {
            if let Some(duration) = args.duration {
                overrides.push(("simulated_duration", duration.to_string()));
            }
            if let Some(speed) = args.speed {
                overrides.push(("playback_speed", speed.to_string()));
            }
        }
        Commands::Trim(_) | Commands::Drag(_) => {}
    }

    let mut applied = Vec::with_capacity(overrides.len());
    for (key, value) in overrides {
        adapter.set_config(key, &value).await?;
        applied.push(key.to_string());
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cliptrim.toml");
        std::fs::write(&path, "[cliptrim]\nplayback_speed = 2.0\nmount_point = \"file-player\"\n").unwrap();

        let adapter = TomlConfigAdapter::new();
        load_config_file(&adapter, Some(&path)).await.unwrap();

        let env: HashMap<&str, &str> = [("CLIPTRIM_PLAYBACK_SPEED", "8")].into_iter().collect();
        let applied = load_environment_variables(&adapter, |name| env.get(name).map(|v| v.to_string()))
            .await
            .unwrap();

        let settings = adapter.settings();
        assert_eq!(applied, vec!["playback_speed".to_string()]);
        assert_eq!(settings.playback_speed, 8.0);
        assert_eq!(settings.mount_point, "file-player");
    }

    #[tokio::test]
    async fn test_cli_overrides_env() {
        let adapter = TomlConfigAdapter::new();
        let env: HashMap<&str, &str> = [("CLIPTRIM_SIMULATED_DURATION", "30")].into_iter().collect();
        load_environment_variables(&adapter, |name| env.get(name).map(|v| v.to_string()))
            .await
            .unwrap();

        let cli = Cli::parse_from(["cliptrim", "--log-json", "play", "--clip", "v1", "--duration", "200"]);
        let applied = apply_cli_configuration_overrides(&adapter, &cli).await.unwrap();

        let settings = adapter.settings();
        assert_eq!(settings.simulated_duration, 200.0);
        assert!(settings.log_json);
        assert!(applied.contains(&"simulated_duration".to_string()));
    }

    #[tokio::test]
    async fn test_missing_explicit_config_fails() {
        let adapter = TomlConfigAdapter::new();
        let result = load_config_file(&adapter, Some(Path::new("/nonexistent/cliptrim.toml"))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_bad_env_value_is_reported() {
        let adapter = TomlConfigAdapter::new();
        let result = load_environment_variables(&adapter, |name| {
            (name == "CLIPTRIM_FRAME_INTERVAL_MS").then(|| "soon".to_string())
        })
        .await;
        assert!(result.is_err());
    }
}
