// Simulated widget adapter - Clock-driven stand-in for the embeddable player

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Opens the readiness gate of a [`SimulatedRuntime`]
pub struct RuntimeGate(watch::Sender<bool>);

impl RuntimeGate {
    /// Fire the runtime's readiness signal
    pub fn open(&self) {
        self.0.send_replace(true);
    }
}

/// Runtime producing [`SimulatedWidget`]s
pub struct SimulatedRuntime {
    gate: watch::Receiver<bool>,
    _always_ready: Option<watch::Sender<bool>>,
    durations: Arc<RwLock<HashMap<ClipId, f64>>>,
    default_duration: f64,
    speed: f64,
    injections: AtomicUsize,
    widgets: Mutex<Vec<Arc<SimulatedWidget>>>,
}

impl SimulatedRuntime {
    /// Runtime that is ready as soon as it is injected
    pub fn new(default_duration: f64) -> Self {
        let (tx, rx) = watch::channel(true);
        Self::build(rx, Some(tx), default_duration)
    }

    /// Runtime that stays pending until the returned gate is opened
    pub fn gated(default_duration: f64) -> (Self, RuntimeGate) {
        let (tx, rx) = watch::channel(false);
        (Self::build(rx, None, default_duration), RuntimeGate(tx))
    }

    fn build(
        gate: watch::Receiver<bool>,
        always_ready: Option<watch::Sender<bool>>,
        default_duration: f64,
    ) -> Self {
        Self {
            gate,
            _always_ready: always_ready,
            durations: Arc::new(RwLock::new(HashMap::new())),
            default_duration,
            speed: 1.0,
            injections: AtomicUsize::new(0),
            widgets: Mutex::new(Vec::new()),
        }
    }

    /// Report `seconds` as the length of `clip`
    pub fn with_duration(self, clip: &ClipId, seconds: f64) -> Self {
        self.durations.write().insert(clip.clone(), seconds);
        self
    }

    /// Advance the widget clock `speed` times faster than wall time
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Number of times the runtime script was injected
    pub fn injections(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    /// Number of widgets constructed
    pub fn widgets_created(&self) -> usize {
        self.widgets.lock().len()
    }

    /// Most recently constructed widget
    pub fn widget(&self) -> Option<Arc<SimulatedWidget>> {
        self.widgets.lock().last().cloned()
    }
}

#[async_trait]
impl WidgetRuntime for SimulatedRuntime {
    async fn inject(&self) -> Result<(), DomainError> {
        self.injections.fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.clone();
        gate.wait_for(|ready| *ready).await.map(|_| ()).map_err(|_| {
            DomainError::RuntimeUnavailable("runtime never signalled readiness".to_string())
        })
    }

    fn create_widget(&self, options: WidgetOptions) -> Result<Arc<dyn PlaybackWidget>, DomainError> {
        let widget = Arc::new(SimulatedWidget::new(
            options,
            Arc::clone(&self.durations),
            self.default_duration,
            self.speed,
        ));
        widget.announce_ready();
        self.widgets.lock().push(Arc::clone(&widget));
        Ok(widget)
    }
}

struct WidgetClock {
    clip: ClipId,
    state: WidgetState,
    position: f64,
    resumed_at: Option<Instant>,
    duration: f64,
}

/// Simulated playback widget
pub struct SimulatedWidget {
    mount_point: String,
    events: WidgetEventSender,
    clock: Mutex<WidgetClock>,
    durations: Arc<RwLock<HashMap<ClipId, f64>>>,
    default_duration: f64,
    speed: f64,
    seeks: Mutex<Vec<f64>>,
}

impl SimulatedWidget {
    fn new(
        options: WidgetOptions,
        durations: Arc<RwLock<HashMap<ClipId, f64>>>,
        default_duration: f64,
        speed: f64,
    ) -> Self {
        let duration = durations
            .read()
            .get(&options.clip)
            .copied()
            .unwrap_or(default_duration);
        Self {
            mount_point: options.mount_point,
            events: options.events,
            clock: Mutex::new(WidgetClock {
                clip: options.clip,
                state: WidgetState::Unstarted,
                position: 0.0,
                resumed_at: None,
                duration,
            }),
            durations,
            default_duration,
            speed,
            seeks: Mutex::new(Vec::new()),
        }
    }

    fn emit(&self, event: WidgetEvent) {
        trace!(mount_point = %self.mount_point, ?event, "Widget event");
        // Nobody listening means the player was torn down
        let _ = self.events.send(event);
    }

    fn announce_ready(&self) {
        let duration = self.clock.lock().duration;
        self.emit(WidgetEvent::Ready { duration });
    }

    fn position_now(&self, clock: &WidgetClock) -> f64 {
        let position = match clock.resumed_at {
            Some(resumed) => clock.position + resumed.elapsed().as_secs_f64() * self.speed,
            None => clock.position,
        };
        position.min(clock.duration)
    }

    /// Fold elapsed time into the stored position, ending playback at the clip end
    fn settle(&self, clock: &mut WidgetClock) {
        if clock.resumed_at.is_none() {
            return;
        }
        let position = self.position_now(clock);
        clock.position = position;
        clock.resumed_at = Some(Instant::now());

        if position >= clock.duration {
            clock.resumed_at = None;
            self.transition(clock, WidgetState::Ended);
        }
    }

    fn transition(&self, clock: &mut WidgetClock, state: WidgetState) {
        if clock.state != state {
            clock.state = state;
            self.emit(WidgetEvent::StateChange(state));
        }
    }

    pub fn state(&self) -> WidgetState {
        let mut clock = self.clock.lock();
        self.settle(&mut clock);
        clock.state
    }

    pub fn clip(&self) -> ClipId {
        self.clock.lock().clip.clone()
    }

    /// Every seek target received, oldest first
    pub fn seek_history(&self) -> Vec<f64> {
        self.seeks.lock().clone()
    }
}

impl PlaybackWidget for SimulatedWidget {
    fn play(&self) {
        let mut clock = self.clock.lock();
        self.settle(&mut clock);
        if clock.state == WidgetState::Playing {
            return;
        }
        if clock.position >= clock.duration {
            clock.position = 0.0;
        }
        clock.resumed_at = Some(Instant::now());
        self.transition(&mut clock, WidgetState::Playing);
    }

    fn pause(&self) {
        let mut clock = self.clock.lock();
        self.settle(&mut clock);
        if matches!(
            clock.state,
            WidgetState::Playing | WidgetState::Buffering | WidgetState::Ended
        ) {
            clock.resumed_at = None;
            self.transition(&mut clock, WidgetState::Paused);
        }
    }

    fn stop(&self) {
        let mut clock = self.clock.lock();
        clock.position = 0.0;
        clock.resumed_at = None;
        self.transition(&mut clock, WidgetState::Cued);
    }

    fn seek_to(&self, seconds: f64, _allow_seek_ahead: bool) {
        let mut clock = self.clock.lock();
        clock.position = seconds.clamp(0.0, clock.duration);
        if clock.resumed_at.is_some() {
            clock.resumed_at = Some(Instant::now());
        }
        self.seeks.lock().push(clock.position);
    }

    fn current_time(&self) -> f64 {
        let mut clock = self.clock.lock();
        self.settle(&mut clock);
        clock.position
    }

    fn duration(&self) -> f64 {
        self.clock.lock().duration
    }

    fn load_clip(&self, clip: &ClipId) {
        {
            let mut clock = self.clock.lock();
            clock.clip = clip.clone();
            clock.duration = self
                .durations
                .read()
                .get(clip)
                .copied()
                .unwrap_or(self.default_duration);
            clock.position = 0.0;
            clock.resumed_at = None;
            clock.state = WidgetState::Unstarted;
            debug!(clip = %clip, duration = clock.duration, "Simulated widget loaded clip");
        }
        self.emit(WidgetEvent::StateChange(WidgetState::Unstarted));
    }
}
