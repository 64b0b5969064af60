//! Shared, always-current playback cells
//!
//! The progress loop, the drag controller and the widget event handler all
//! run against the same cells. Readers take a fresh copy on every access
//! instead of holding a snapshot across frames.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::model::{PlaybackSession, TrimWindow};

/// Current trim window of the mounted clip
#[derive(Debug, Clone, Default)]
pub struct TrimCell(Arc<RwLock<TrimWindow>>);

impl TrimCell {
    pub fn new(window: TrimWindow) -> Self {
        Self(Arc::new(RwLock::new(window)))
    }

    pub fn get(&self) -> TrimWindow {
        *self.0.read()
    }

    pub fn set(&self, window: TrimWindow) {
        *self.0.write() = window;
    }
}

/// Playback session of the mounted clip
#[derive(Debug, Clone, Default)]
pub struct SessionCell(Arc<RwLock<PlaybackSession>>);

impl SessionCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PlaybackSession {
        *self.0.read()
    }

    pub fn is_playing(&self) -> bool {
        self.0.read().is_playing
    }

    pub fn duration(&self) -> f64 {
        self.0.read().duration
    }

    pub fn set_playing(&self, playing: bool) {
        self.0.write().is_playing = playing;
    }

    pub fn set_current_time(&self, seconds: f64) {
        self.0.write().current_time = seconds;
    }

    pub fn set_duration(&self, seconds: f64) {
        self.0.write().duration = seconds;
    }

    /// Clear position and duration for a newly targeted clip
    pub fn reset(&self) {
        *self.0.write() = PlaybackSession::default();
    }
}
