// Ports - Interface definitions (contracts)

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::PlayerSettings;
use crate::domain::errors::*;
use crate::domain::model::*;

/// Event emitted by a playback widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// Widget finished loading its first clip and knows the duration
    Ready { duration: f64 },
    /// Widget-driven state transition
    StateChange(WidgetState),
}

/// Sending half of the widget event stream
pub type WidgetEventSender = mpsc::UnboundedSender<WidgetEvent>;

/// Receiving half of the widget event stream
pub type WidgetEvents = mpsc::UnboundedReceiver<WidgetEvent>;

/// Imperative controls of a created playback widget
///
/// Calls return immediately; their effect is reported back through
/// [`WidgetEvent`]s.
pub trait PlaybackWidget: Send + Sync {
    fn play(&self);

    fn pause(&self);

    /// Stop playback and unload the stream
    fn stop(&self);

    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool);

    /// Play head position in seconds
    fn current_time(&self) -> f64;

    /// Clip length in seconds, zero while unknown
    fn duration(&self) -> f64;

    /// Swap the active clip without recreating the widget
    fn load_clip(&self, clip: &ClipId);
}

/// Arguments handed to the widget constructor
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    /// Identifier of the element the widget mounts into
    pub mount_point: String,
    /// Clip to load initially
    pub clip: ClipId,
    /// Where the widget reports readiness and state changes
    pub events: WidgetEventSender,
}

/// Port for the external script that provides playback widgets
#[async_trait]
pub trait WidgetRuntime: Send + Sync {
    /// Inject the runtime and wait for its readiness signal
    ///
    /// May never resolve when the runtime fails to load.
    async fn inject(&self) -> Result<(), DomainError>;

    /// Construct a widget; only valid after `inject` resolved
    fn create_widget(&self, options: WidgetOptions) -> Result<Arc<dyn PlaybackWidget>, DomainError>;
}

/// Port for device-local key/value persistence
pub trait StoragePort: Send + Sync {
    /// Stored text for `key`, `None` when unset
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`; failures are absorbed by the adapter
    fn set(&self, key: &str, value: &str);
}

/// Port for the clip metadata source
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Load every playable catalog entry in source order
    async fn load_items(&self) -> Result<Vec<CatalogItem>, DomainError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Set configuration value
    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Load configuration from file
    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Validate configuration
    async fn validate_config(&self) -> Result<(), DomainError>;

    /// Typed snapshot of the current configuration
    fn settings(&self) -> PlayerSettings;
}
