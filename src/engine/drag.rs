//! Drag sessions on the trim boundary handles

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::model::{Boundary, ClipId, TrackGeometry, TrimWindow};
use crate::domain::rules::DragRules;
use crate::engine::shared::{SessionCell, TrimCell};
use crate::engine::trim_store::TrimStore;
use crate::engine::widget_adapter::PlaybackAdapter;

/// Pointer input observed anywhere in the view while a drag is active
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f64 },
    Up,
}

/// An in-progress edit of one boundary
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub clip: ClipId,
    pub boundary: Boundary,
    pub track: TrackGeometry,
    pub updates: u32,
}

/// Turns pointer drags on the handles into trim window edits
///
/// Only the active session writes the trim cell, so there is a single writer
/// at a time while the progress loop keeps reading it.
pub struct TrimDragController {
    store: Arc<TrimStore>,
    adapter: Arc<PlaybackAdapter>,
    session: SessionCell,
    trim: TrimCell,
    active: Mutex<Option<DragSession>>,
}

impl TrimDragController {
    pub fn new(
        store: Arc<TrimStore>,
        adapter: Arc<PlaybackAdapter>,
        session: SessionCell,
        trim: TrimCell,
    ) -> Self {
        Self {
            store,
            adapter,
            session,
            trim,
            active: Mutex::new(None),
        }
    }

    /// Start dragging `boundary` of `clip` along `track`
    pub fn begin(&self, clip: &ClipId, boundary: Boundary, track: TrackGeometry) {
        let mut active = self.active.lock();
        if let Some(previous) = active.take() {
            warn!(boundary = %previous.boundary, "Replacing drag session that never saw pointer-up");
        }
        *active = Some(DragSession {
            clip: clip.clone(),
            boundary,
            track,
            updates: 0,
        });
        debug!(clip = %clip, %boundary, "Trim drag started");
    }

    /// Route a pointer event; returns the window after a move
    pub fn handle_pointer(&self, event: PointerEvent) -> Option<TrimWindow> {
        match event {
            PointerEvent::Move { x } => self.update(x),
            PointerEvent::Up => {
                self.end();
                None
            }
        }
    }

    /// Move the dragged boundary to the pointer position
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&self, pointer_x: f64) -> Option<TrimWindow> {
        let (clip, boundary, track) = {
            let mut active = self.active.lock();
            let drag = active.as_mut()?;
            drag.updates += 1;
            (drag.clip.clone(), drag.boundary, drag.track)
        };

        let target = track.percent_at(pointer_x);
        let window = self.trim.get().with_boundary(boundary, target);
        self.trim.set(window);
        self.store.save(&clip, boundary, window.value(boundary));

        let duration = self.session.duration();
        let live_time = self.adapter.current_time();
        match boundary {
            Boundary::Start => {
                if let Some(start) = DragRules::start_seek(live_time, window.start(), duration) {
                    self.adapter.seek(start, true);
                    self.session.set_current_time(start);
                }
            }
            Boundary::End => {
                let playing = self.session.is_playing();
                if DragRules::end_should_pause(playing, live_time, window.end(), duration) {
                    debug!(live_time, end = window.end(), "Trim end dragged behind play head");
                    self.adapter.pause();
                    self.session.set_playing(false);
                }
            }
        }
        Some(window)
    }

    /// Finish the active drag, wherever the pointer was released
    pub fn end(&self) -> Option<DragSession> {
        let finished = self.active.lock().take();
        if let Some(drag) = &finished {
            info!(
                clip = %drag.clip,
                boundary = %drag.boundary,
                window = %self.trim.get(),
                updates = drag.updates,
                "Trim drag finished"
            );
        }
        finished
    }

    /// Drop the active drag, if any, without touching the window
    pub fn cancel(&self) -> bool {
        let cancelled = self.active.lock().take().is_some();
        if cancelled {
            debug!("Trim drag cancelled");
        }
        cancelled
    }

    pub fn is_dragging(&self) -> bool {
        self.active.lock().is_some()
    }

    pub fn active_boundary(&self) -> Option<Boundary> {
        self.active.lock().as_ref().map(|d| d.boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemoryStorage, SimulatedRuntime};
    use crate::domain::model::{WidgetState, MIN_TRIM_GAP};
    use crate::engine::runtime::RuntimeLoader;
    use crate::ports::{PlaybackWidget, StoragePort};
    use tokio::sync::mpsc;

    struct Fixture {
        runtime: Arc<SimulatedRuntime>,
        storage: Arc<MemoryStorage>,
        session: SessionCell,
        trim: TrimCell,
        drag: TrimDragController,
    }

    fn clip() -> ClipId {
        ClipId::new("clip").unwrap()
    }

    fn track() -> TrackGeometry {
        TrackGeometry::new(0.0, 100.0)
    }

    async fn fixture(window: TrimWindow) -> Fixture {
        let runtime = Arc::new(SimulatedRuntime::new(200.0));
        let loader = Arc::new(RuntimeLoader::new(runtime.clone()));
        let (tx, _rx) = mpsc::unbounded_channel();
        let adapter = Arc::new(PlaybackAdapter::new(loader, "player", tx));
        adapter.load(&clip());
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(TrimStore::new(storage.clone()));
        let session = SessionCell::new();
        session.set_duration(200.0);
        let trim = TrimCell::new(window);
        let drag = TrimDragController::new(store, adapter, session.clone(), trim.clone());
        Fixture {
            runtime,
            storage,
            session,
            trim,
            drag,
        }
    }

    #[tokio::test]
    async fn test_invariant_holds_for_any_pointer_position() {
        let fx = fixture(TrimWindow::full()).await;
        let positions = [-50.0, 0.0, 0.5, 12.3, 49.9, 50.0, 99.0, 99.9, 100.0, 250.0];

        for boundary in [Boundary::Start, Boundary::End] {
            fx.drag.begin(&clip(), boundary, track());
            for x in positions {
                let window = fx.drag.update(x).unwrap();
                assert!(window.start() < window.end());
                assert!(window.end() - window.start() >= MIN_TRIM_GAP - 1e-9);
                assert!(window.start() >= 0.0 && window.end() <= 100.0);
            }
            fx.drag.end();
        }
    }

    #[tokio::test]
    async fn test_start_dragged_past_end_stops_one_point_before() {
        let fx = fixture(TrimWindow::new(10.0, 60.0).unwrap()).await;
        fx.drag.begin(&clip(), Boundary::Start, track());
        let window = fx.drag.update(75.0).unwrap();
        assert_eq!(window.start(), 59.0);
        assert_eq!(fx.storage.get("trimStart-clip").as_deref(), Some("59"));
    }

    #[tokio::test]
    async fn test_end_dragged_before_start_stops_one_point_after() {
        let fx = fixture(TrimWindow::new(40.0, 90.0).unwrap()).await;
        fx.drag.begin(&clip(), Boundary::End, track());
        let window = fx.drag.update(20.0).unwrap();
        assert_eq!(window.end(), 41.0);
        assert_eq!(fx.storage.get("trimEnd-clip").as_deref(), Some("41"));
    }

    #[tokio::test]
    async fn test_start_drag_past_play_head_seeks() {
        let fx = fixture(TrimWindow::full()).await;
        let widget = fx.runtime.widget().unwrap();
        widget.seek_to(10.0, true);

        fx.drag.begin(&clip(), Boundary::Start, track());
        fx.drag.update(25.0);
        assert_eq!(widget.current_time(), 50.0);
        assert_eq!(fx.session.snapshot().current_time, 50.0);

        // Moving back below the play head leaves it alone
        fx.drag.update(5.0);
        assert_eq!(widget.current_time(), 50.0);
    }

    #[tokio::test]
    async fn test_end_drag_behind_play_head_pauses_without_seeking() {
        let fx = fixture(TrimWindow::full()).await;
        let widget = fx.runtime.widget().unwrap();
        widget.play();
        widget.seek_to(150.0, true);
        fx.session.set_playing(true);
        let seeks_before = widget.seek_history().len();

        fx.drag.begin(&clip(), Boundary::End, track());
        fx.drag.update(50.0);

        assert_eq!(widget.state(), WidgetState::Paused);
        assert!(!fx.session.is_playing());
        assert_eq!(widget.seek_history().len(), seeks_before);
        assert!(widget.current_time() >= 150.0);
    }

    #[tokio::test]
    async fn test_pointer_up_ends_session() {
        let fx = fixture(TrimWindow::full()).await;
        fx.drag.begin(&clip(), Boundary::End, track());
        assert!(fx.drag.handle_pointer(PointerEvent::Move { x: 70.0 }).is_some());
        assert_eq!(fx.drag.active_boundary(), Some(Boundary::End));

        assert!(fx.drag.handle_pointer(PointerEvent::Up).is_none());
        assert!(!fx.drag.is_dragging());
        assert!(fx.drag.handle_pointer(PointerEvent::Move { x: 10.0 }).is_none());
        assert_eq!(fx.trim.get().end(), 70.0);
    }

    #[tokio::test]
    async fn test_cancel_keeps_window() {
        let fx = fixture(TrimWindow::full()).await;
        fx.drag.begin(&clip(), Boundary::Start, track());
        assert!(fx.drag.cancel());
        assert!(fx.drag.update(30.0).is_none());
        assert_eq!(fx.trim.get(), TrimWindow::full());
        assert!(fx.storage.is_empty());
    }
}
