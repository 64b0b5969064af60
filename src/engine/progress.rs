//! Frame-paced progress loop enforcing the trim window

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::domain::rules::{BoundaryEnforcer, Correction};
use crate::engine::shared::{SessionCell, TrimCell};
use crate::engine::widget_adapter::PlaybackAdapter;

/// Roughly one display refresh at 60 Hz
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Polls the play head while playing and keeps it inside the trim window
///
/// At most one polling task runs per loop. The task reads the trim cell on
/// every frame, so boundary edits made mid-playback apply on the next frame.
pub struct ProgressLoop {
    adapter: Arc<PlaybackAdapter>,
    session: SessionCell,
    trim: TrimCell,
    frame_interval: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
    frames: Arc<AtomicU64>,
}

impl ProgressLoop {
    pub fn new(
        adapter: Arc<PlaybackAdapter>,
        session: SessionCell,
        trim: TrimCell,
        frame_interval: Duration,
    ) -> Self {
        Self {
            adapter,
            session,
            trim,
            frame_interval,
            handle: Mutex::new(None),
            frames: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start polling; returns false when a loop is already running
    pub fn start(&self) -> bool {
        let mut handle = self.handle.lock();
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            return false;
        }

        let adapter = Arc::clone(&self.adapter);
        let session = self.session.clone();
        let trim = self.trim.clone();
        let frames = Arc::clone(&self.frames);
        let interval = self.frame_interval;

        *handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                frames.fetch_add(1, Ordering::Relaxed);
                run_frame(&adapter, &session, &trim);
            }
        }));
        debug!(interval_ms = interval.as_millis() as u64, "Progress loop started");
        true
    }

    /// Cancel the pending frame; returns false when nothing was running
    pub fn stop(&self) -> bool {
        match self.handle.lock().take() {
            Some(handle) => {
                handle.abort();
                debug!("Progress loop stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Run a single frame outside the scheduled task
    pub fn tick(&self) -> Correction {
        run_frame(&self.adapter, &self.session, &self.trim)
    }

    /// Frames run by scheduled tasks so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl Drop for ProgressLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}

fn run_frame(adapter: &PlaybackAdapter, session: &SessionCell, trim: &TrimCell) -> Correction {
    let time = adapter.current_time();
    session.set_current_time(time);

    let duration = session.duration();
    let window = trim.get();
    let correction = BoundaryEnforcer::enforce(time, &window, duration);

    match correction {
        Correction::SeekToStart(start) => {
            trace!(time, start, "Play head before trim start");
            adapter.seek(start, true);
        }
        Correction::PauseAndRewind(start) => {
            debug!(time, end = window.end_seconds(duration), "Trim end reached");
            adapter.pause();
            adapter.seek(start, true);
        }
        Correction::None => {}
    }
    correction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SimulatedRuntime;
    use crate::domain::model::{ClipId, TrimWindow, WidgetState};
    use crate::engine::runtime::RuntimeLoader;
    use crate::ports::PlaybackWidget;
    use tokio::sync::mpsc;

    struct Fixture {
        runtime: Arc<SimulatedRuntime>,
        session: SessionCell,
        trim: TrimCell,
        progress: ProgressLoop,
    }

    async fn fixture(duration: f64) -> Fixture {
        let runtime = Arc::new(SimulatedRuntime::new(duration));
        let loader = Arc::new(RuntimeLoader::new(runtime.clone()));
        let (tx, _rx) = mpsc::unbounded_channel();
        let adapter = Arc::new(PlaybackAdapter::new(loader, "player", tx));
        adapter.load(&ClipId::new("clip").unwrap());
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let session = SessionCell::new();
        session.set_duration(duration);
        let trim = TrimCell::new(TrimWindow::new(10.0, 90.0).unwrap());
        let progress = ProgressLoop::new(
            adapter,
            session.clone(),
            trim.clone(),
            Duration::from_millis(10),
        );
        Fixture {
            runtime,
            session,
            trim,
            progress,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_seeks_forward_to_trim_start() {
        let fx = fixture(200.0).await;
        let widget = fx.runtime.widget().unwrap();
        widget.seek_to(15.0, true);

        assert_eq!(fx.progress.tick(), Correction::SeekToStart(20.0));
        assert_eq!(widget.current_time(), 20.0);
        assert_eq!(fx.session.snapshot().current_time, 15.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_pauses_and_rewinds_at_trim_end() {
        let fx = fixture(200.0).await;
        let widget = fx.runtime.widget().unwrap();
        widget.play();
        widget.seek_to(185.0, true);

        assert_eq!(fx.progress.tick(), Correction::PauseAndRewind(20.0));
        assert_eq!(widget.state(), WidgetState::Paused);
        assert_eq!(widget.current_time(), 20.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_reads_latest_trim_window() {
        let fx = fixture(200.0).await;
        let widget = fx.runtime.widget().unwrap();
        widget.seek_to(100.0, true);
        assert_eq!(fx.progress.tick(), Correction::None);

        fx.trim.set(TrimWindow::new(10.0, 40.0).unwrap());
        assert_eq!(fx.progress.tick(), Correction::PauseAndRewind(20.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_loop_instance_and_cancellation() {
        let fx = fixture(200.0).await;
        assert!(fx.progress.start());
        assert!(!fx.progress.start());
        assert!(fx.progress.is_running());

        tokio::time::sleep(Duration::from_millis(55)).await;
        let frames = fx.progress.frames();
        assert!(frames >= 4, "expected frames to run, got {}", frames);

        assert!(fx.progress.stop());
        assert!(!fx.progress.is_running());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fx.progress.frames(), frames);
        assert!(!fx.progress.stop());
    }
}
