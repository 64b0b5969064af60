//! Playback widget adapter
//!
//! Owns the single widget instance of a player. Until the runtime is ready
//! every control is inert: commands are dropped and the play head reads 0.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::domain::model::ClipId;
use crate::engine::runtime::RuntimeLoader;
use crate::ports::{PlaybackWidget, WidgetEventSender, WidgetOptions};

/// What a `load` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Clip queued; the widget is created once the runtime is ready
    Queued,
    /// A widget exists already; nothing changed
    AlreadyLoaded,
}

pub struct PlaybackAdapter {
    loader: Arc<RuntimeLoader>,
    mount_point: String,
    events: WidgetEventSender,
    widget: RwLock<Option<Arc<dyn PlaybackWidget>>>,
    pending: Mutex<Option<ClipId>>,
    flush_scheduled: AtomicBool,
}

impl PlaybackAdapter {
    pub fn new(
        loader: Arc<RuntimeLoader>,
        mount_point: impl Into<String>,
        events: WidgetEventSender,
    ) -> Self {
        Self {
            loader,
            mount_point: mount_point.into(),
            events,
            widget: RwLock::new(None),
            pending: Mutex::new(None),
            flush_scheduled: AtomicBool::new(false),
        }
    }

    fn widget(&self) -> Option<Arc<dyn PlaybackWidget>> {
        self.widget.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.widget.read().is_some()
    }

    /// Create the widget for `clip`, once
    ///
    /// Calls made before the runtime is ready are queued; the latest queued
    /// clip is flushed exactly once on readiness. Must be called from within a
    /// tokio runtime.
    pub fn load(self: &Arc<Self>, clip: &ClipId) -> LoadOutcome {
        {
            let mut pending = self.pending.lock();
            if self.is_loaded() {
                debug!(clip = %clip, "Widget already created");
                return LoadOutcome::AlreadyLoaded;
            }
            *pending = Some(clip.clone());
        }

        if self.flush_scheduled.swap(true, Ordering::SeqCst) {
            debug!(clip = %clip, "Widget load queued until runtime is ready");
            return LoadOutcome::Queued;
        }

        let adapter = Arc::clone(self);
        tokio::spawn(async move {
            adapter.flush_when_ready().await;
        });
        LoadOutcome::Queued
    }

    async fn flush_when_ready(&self) {
        if let Err(e) = self.loader.ready().await {
            warn!(error = %e, "Widget runtime unavailable; playback stays inert");
            return;
        }

        // Held until the widget slot is filled so a concurrent retarget
        // either replaces the queued clip or sees the new widget.
        let mut pending = self.pending.lock();
        let Some(clip) = pending.take() else {
            return;
        };

        let options = WidgetOptions {
            mount_point: self.mount_point.clone(),
            clip: clip.clone(),
            events: self.events.clone(),
        };
        match self.loader.create_widget(options) {
            Ok(widget) => {
                *self.widget.write() = Some(widget);
                info!(clip = %clip, mount_point = %self.mount_point, "Widget created");
            }
            Err(e) => warn!(error = %e, clip = %clip, "Widget creation failed; playback stays inert"),
        }
    }

    /// Point the existing widget at `clip`, then stop it
    ///
    /// Without a widget the queued clip is replaced instead. Returns whether a
    /// live widget was retargeted.
    pub fn retarget(&self, clip: &ClipId) -> bool {
        let widget = {
            let mut pending = self.pending.lock();
            match self.widget() {
                Some(widget) => widget,
                None => {
                    *pending = Some(clip.clone());
                    debug!(clip = %clip, "Queued clip replaced before widget creation");
                    return false;
                }
            }
        };

        widget.load_clip(clip);
        widget.stop();
        info!(clip = %clip, "Widget retargeted");
        true
    }

    pub fn play(&self) {
        if let Some(widget) = self.widget() {
            widget.play();
        }
    }

    pub fn pause(&self) {
        if let Some(widget) = self.widget() {
            widget.pause();
        }
    }

    pub fn seek(&self, seconds: f64, allow_seek_ahead: bool) {
        if let Some(widget) = self.widget() {
            widget.seek_to(seconds, allow_seek_ahead);
        }
    }

    pub fn current_time(&self) -> f64 {
        self.widget().map(|w| w.current_time()).unwrap_or(0.0)
    }

    pub fn duration(&self) -> f64 {
        self.widget().map(|w| w.duration()).unwrap_or(0.0)
    }
}
