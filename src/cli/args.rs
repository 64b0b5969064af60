//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the catalog command
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Page number, starting at 1
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Case-insensitive title filter
    #[arg(short, long)]
    pub query: Option<String>,

    /// Catalog listing file (default from configuration)
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Clip id
    #[arg(short, long)]
    pub clip: String,
}

/// Arguments for the drag command
#[derive(Args, Debug)]
pub struct DragArgs {
    /// Clip id
    #[arg(short, long)]
    pub clip: String,

    /// Handle to drag (start or end)
    #[arg(short, long)]
    pub boundary: String,

    /// Release position on the track, in percent
    #[arg(long, allow_negative_numbers = true)]
    pub to: f64,
}

/// Arguments for the play command
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Clip id
    #[arg(short, long)]
    pub clip: String,

    /// Clip length reported by the simulated widget, in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Wall-clock seconds to let playback run
    #[arg(long, default_value = "5")]
    pub seconds: f64,

    /// Simulated playback speed multiplier
    #[arg(long)]
    pub speed: Option<f64>,
}
