// Clip controller - Composition root of the trim playback player

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::model::*;
use crate::domain::rules::{BoundaryEnforcer, SeekRules};
use crate::engine::*;
use crate::ports::*;

/// Lifecycle of the player with respect to clip identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerPhase {
    /// No clip selected yet
    Unloaded,
    /// Waiting for the runtime and the first widget
    Loading,
    /// Widget created and reporting
    Ready,
    /// Swapping the clip on the existing widget
    Retargeting,
}

/// Drives one playback widget through per-clip trim windows
///
/// Widget events, progress frames and pointer input all mutate the shared
/// session and trim cells; every reader takes the latest values.
pub struct ClipController {
    adapter: Arc<PlaybackAdapter>,
    store: Arc<TrimStore>,
    trim: TrimCell,
    session: SessionCell,
    progress: ProgressLoop,
    drag: TrimDragController,
    phase: Mutex<ControllerPhase>,
    clip: Mutex<Option<ClipId>>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl ClipController {
    /// Create a controller and the event stream its widget will report on
    ///
    /// Feed the returned events back through [`ClipController::spawn_event_pump`]
    /// or [`ClipController::handle_event`].
    pub fn new(
        loader: Arc<RuntimeLoader>,
        storage: Arc<dyn StoragePort>,
        mount_point: &str,
        frame_interval: Duration,
    ) -> (Arc<Self>, WidgetEvents) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let adapter = Arc::new(PlaybackAdapter::new(loader, mount_point, events_tx));
        let store = Arc::new(TrimStore::new(storage));
        let trim = TrimCell::default();
        let session = SessionCell::new();

        let progress = ProgressLoop::new(
            Arc::clone(&adapter),
            session.clone(),
            trim.clone(),
            frame_interval,
        );
        let drag = TrimDragController::new(
            Arc::clone(&store),
            Arc::clone(&adapter),
            session.clone(),
            trim.clone(),
        );

        let controller = Arc::new(Self {
            adapter,
            store,
            trim,
            session,
            progress,
            drag,
            phase: Mutex::new(ControllerPhase::Unloaded),
            clip: Mutex::new(None),
            pump: Mutex::new(None),
        });
        (controller, events_rx)
    }

    /// Dispatch widget events in the background until the controller is dropped
    pub fn spawn_event_pump(self: &Arc<Self>, mut events: WidgetEvents) {
        let controller = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let Some(controller) = controller.upgrade() else {
                    break;
                };
                controller.handle_event(event);
            }
        });
        if let Some(previous) = self.pump.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Make `clip` the active clip
    pub fn select_clip(&self, clip: ClipId) {
        let mut phase = self.phase.lock();
        if self.clip.lock().as_ref() == Some(&clip) {
            debug!(clip = %clip, "Clip already active");
            return;
        }

        match *phase {
            ControllerPhase::Unloaded => {
                *phase = ControllerPhase::Loading;
                info!(clip = %clip, "Loading player");
                self.trim.set(self.store.load(&clip));
                *self.clip.lock() = Some(clip.clone());
                self.adapter.load(&clip);
            }
            ControllerPhase::Loading => {
                info!(clip = %clip, "Clip changed while player is loading");
                self.drag.cancel();
                self.trim.set(self.store.load(&clip));
                *self.clip.lock() = Some(clip.clone());
                self.adapter.retarget(&clip);
            }
            ControllerPhase::Ready | ControllerPhase::Retargeting => {
                *phase = ControllerPhase::Retargeting;
                info!(clip = %clip, "Retargeting player");
                self.drag.cancel();
                self.progress.stop();
                self.session.reset();
                *self.clip.lock() = Some(clip.clone());
                self.adapter.retarget(&clip);
                self.trim.set(self.store.load(&clip));
                *phase = ControllerPhase::Ready;
            }
        }
    }

    /// React to a widget event
    pub fn handle_event(&self, event: WidgetEvent) {
        match event {
            WidgetEvent::Ready { duration } => {
                self.session.set_duration(duration);
                let mut phase = self.phase.lock();
                if *phase == ControllerPhase::Loading {
                    *phase = ControllerPhase::Ready;
                }
                info!(duration, "Player ready");
            }
            WidgetEvent::StateChange(state) => self.handle_state_change(state),
        }
    }

    fn handle_state_change(&self, state: WidgetState) {
        debug!(?state, "Widget state changed");

        if state == WidgetState::Unstarted {
            self.session.set_current_time(0.0);
        }

        if state.is_playing() {
            if !self.session.snapshot().has_duration() {
                self.session.set_duration(self.adapter.duration());
            }
            self.session.set_playing(true);
            self.progress.start();
        } else {
            self.session.set_playing(false);
            self.progress.stop();
        }

        if state == WidgetState::Ended {
            let start = BoundaryEnforcer::ended_rewind(&self.trim.get(), self.session.duration());
            self.adapter.seek(start, true);
            self.adapter.pause();
            self.session.set_current_time(start);
            debug!(start, "Clip ended; rewound to trim start");
        }
    }

    /// Play when paused, pause when playing
    pub fn toggle_play_pause(&self) {
        if self.session.is_playing() {
            self.adapter.pause();
        } else {
            self.adapter.play();
        }
    }

    /// Seek to a click on the progress track, kept inside the trim window
    pub fn seek_to_track(&self, pointer_x: f64, track: TrackGeometry) -> Option<f64> {
        if !self.adapter.is_loaded() {
            return None;
        }
        let duration = self.session.duration();
        let target = SeekRules::track_seek(track.fraction_at(pointer_x), &self.trim.get(), duration);
        self.adapter.seek(target, true);
        self.session.set_current_time(target);
        Some(target)
    }

    /// Press on a boundary handle of the current clip
    ///
    /// Returns false when no clip is selected.
    pub fn begin_trim_drag(&self, boundary: Boundary, track: TrackGeometry) -> bool {
        let Some(clip) = self.current_clip() else {
            return false;
        };
        self.drag.begin(&clip, boundary, track);
        true
    }

    /// Pointer input while a drag may be active
    pub fn pointer(&self, event: PointerEvent) -> Option<TrimWindow> {
        self.drag.handle_pointer(event)
    }

    pub fn phase(&self) -> ControllerPhase {
        *self.phase.lock()
    }

    pub fn current_clip(&self) -> Option<ClipId> {
        self.clip.lock().clone()
    }

    pub fn trim_window(&self) -> TrimWindow {
        self.trim.get()
    }

    pub fn session(&self) -> PlaybackSession {
        self.session.snapshot()
    }

    pub fn progress_running(&self) -> bool {
        self.progress.is_running()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Run one progress frame by hand
    pub fn tick(&self) {
        self.progress.tick();
    }

    /// Stop every background task before the widget goes away
    pub fn shutdown(&self) {
        self.progress.stop();
        self.drag.cancel();
        if let Some(pump) = self.pump.lock().take() {
            pump.abort();
        }
        info!("Player shut down");
    }
}

impl Drop for ClipController {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.get_mut().take() {
            pump.abort();
        }
    }
}
