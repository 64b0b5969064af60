//! ClipTrim CLI
//!
//! Browse a local clip catalog and play clips through trim windows that are
//! remembered per clip.
//!
//! # Usage
//!
//! ```bash
//! cliptrim catalog --page 2 --query cat
//! cliptrim drag --clip dQw4w9WgXcQ --boundary start --to 20
//! cliptrim play --clip dQw4w9WgXcQ --duration 200 --seconds 3 --speed 20
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use cliptrim::app::DefaultAppContainer;
use cliptrim::cli::{commands, Cli, Commands};
use cliptrim::config_initialization::initialize_configuration_hierarchy;
use cliptrim::utils::logging::{LogLevel, LoggingConfig};

/// Main entry point for the ClipTrim CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let resolved = initialize_configuration_hierarchy(&cli).await?;
    let settings = resolved.settings;

    // Initialize logging
    let level = LogLevel::parse(&settings.log_level)?;
    LoggingConfig::new(level, settings.log_json).init();

    info!("Starting ClipTrim");
    match &resolved.config_file {
        Some(path) => info!(path = %path.display(), "Loaded configuration file"),
        None => debug!("No configuration file found; using defaults"),
    }
    if !resolved.env_overrides.is_empty() {
        info!(keys = ?resolved.env_overrides, "Applied environment overrides");
    }
    if !resolved.cli_overrides.is_empty() {
        info!(keys = ?resolved.cli_overrides, "Applied CLI overrides");
    }

    let container = DefaultAppContainer::new(settings).context("Failed to wire application")?;

    // Execute the requested command
    match cli.command {
        Commands::Catalog(args) => {
            info!("Executing catalog command");
            commands::catalog(&container, args).await?;
        }
        Commands::Trim(args) => {
            info!("Executing trim command");
            commands::trim(&container, args).await?;
        }
        Commands::Drag(args) => {
            info!("Executing drag command");
            commands::drag(&container, args).await?;
        }
        Commands::Play(args) => {
            info!("Executing play command");
            commands::play(&container, args).await?;
        }
    }

    info!("ClipTrim completed successfully");
    Ok(())
}
