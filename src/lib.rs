//! ClipTrim Library
//!
//! Browse a clip catalog and play clips through per-clip trim windows that
//! persist across sessions.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, ClipController, ControllerPhase, DefaultAppContainer};
pub use config::PlayerSettings;
pub use domain::errors::DomainError;
pub use domain::model::{Boundary, CatalogPage, CatalogRequest, ClipId, PlaybackSession, TrimWindow};
pub use error::{ClipTrimError, ClipTrimResult};
