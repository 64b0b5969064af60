//! CLI module for ClipTrim
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// ClipTrim video-clip browser
///
/// Browse a local clip catalog and play clips through persisted trim windows.
#[derive(Parser, Debug)]
#[command(name = "cliptrim")]
#[command(about = "ClipTrim - Browse clips and play them through saved trim windows")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file
    #[arg(long, global = true, env = "CLIPTRIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Trim store file
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of the clip catalog
    Catalog(args::CatalogArgs),
    /// Show the saved trim window of a clip
    Trim(args::TrimArgs),
    /// Drag a trim handle to a track position
    Drag(args::DragArgs),
    /// Play a clip through its trim window
    Play(args::PlayArgs),
}
