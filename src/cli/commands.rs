//! Command implementations

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::app::{AppContainer, ClipController, ControllerPhase};
use crate::cli::args::{CatalogArgs, DragArgs, PlayArgs, TrimArgs};
use crate::domain::errors::DomainError;
use crate::domain::model::{Boundary, CatalogRequest, ClipId, PlaybackSession, TrackGeometry, TrimWindow};
use crate::engine::{PointerEvent, TrimStore};
use crate::utils::format_clock;

/// Track used by `drag`: positions map one to one onto percent
const PERCENT_TRACK: TrackGeometry = TrackGeometry {
    left: 0.0,
    width: 100.0,
};

#[derive(Serialize)]
struct TrimReport<'a> {
    clip: &'a ClipId,
    #[serde(flatten)]
    window: TrimWindow,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayReport {
    clip: ClipId,
    phase: ControllerPhase,
    session: PlaybackSession,
    trim: TrimWindow,
    progress_percent: f64,
}

#[derive(Serialize)]
struct ErrorReport {
    error: String,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Execute the catalog command
pub async fn catalog(container: &dyn AppContainer, args: CatalogArgs) -> Result<()> {
    let request = CatalogRequest {
        page: args.page,
        query: args.query,
    };

    match container.catalog_interactor().fetch_page(request).await {
        Ok(page) => {
            info!(items = page.items.len(), total_pages = page.total_pages, "Catalog page served");
            print_json(&page)
        }
        Err(DomainError::MissingPage) => {
            print_json(&ErrorReport {
                error: DomainError::MissingPage.to_string(),
            })?;
            Err(DomainError::MissingPage).context("Catalog request rejected")
        }
        Err(e) => Err(e).context("Catalog request failed"),
    }
}

/// Execute the trim command
pub async fn trim(container: &dyn AppContainer, args: TrimArgs) -> Result<()> {
    let clip = ClipId::new(args.clip)?;
    let window = TrimStore::new(container.storage()).load(&clip);
    info!(clip = %clip, %window, "Trim window");
    print_json(&TrimReport {
        clip: &clip,
        window,
    })
}

/// Execute the drag command
pub async fn drag(container: &dyn AppContainer, args: DragArgs) -> Result<()> {
    let clip = ClipId::new(args.clip)?;
    let boundary = Boundary::parse(&args.boundary)?;

    let (controller, events) = container.clip_controller();
    controller.spawn_event_pump(events);
    controller.select_clip(clip.clone());

    if !controller.begin_trim_drag(boundary, PERCENT_TRACK) {
        controller.shutdown();
        anyhow::bail!("No clip is active");
    }
    let before = controller.trim_window();
    controller.pointer(PointerEvent::Move { x: args.to });
    controller.pointer(PointerEvent::Up);

    let window = controller.trim_window();
    info!(clip = %clip, %boundary, from = %before, to = %window, "Trim handle released");
    controller.shutdown();

    print_json(&TrimReport {
        clip: &clip,
        window,
    })
}

/// Wait for the widget, at most for the whole run
///
/// Returns false when the player is still loading after `limit`; playback is
/// then inert for the rest of the run.
async fn ready_within(controller: &ClipController, limit: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    while controller.phase() != ControllerPhase::Ready {
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    true
}

fn report(controller: &ClipController, clip: ClipId) -> PlayReport {
    let session = controller.session();
    PlayReport {
        clip,
        phase: controller.phase(),
        session,
        trim: controller.trim_window(),
        progress_percent: session.progress_percent(),
    }
}

async fn run_playback(container: &dyn AppContainer, args: PlayArgs) -> Result<PlayReport> {
    let clip = ClipId::new(args.clip)?;
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        anyhow::bail!("--seconds must be a non-negative number, got {}", args.seconds);
    }
    let run_time = Duration::from_secs_f64(args.seconds);

    let settings = container.settings();
    info!(
        mount_point = %settings.mount_point,
        speed = settings.playback_speed,
        "Mounting player"
    );
    let (controller, events) = container.clip_controller();
    controller.spawn_event_pump(events);
    controller.select_clip(clip.clone());

    let started = tokio::time::Instant::now();
    if !ready_within(&controller, run_time).await {
        warn!(clip = %clip, "Player runtime not ready; playback stayed inert");
        let report = report(&controller, clip);
        controller.shutdown();
        return Ok(report);
    }

    info!(clip = %clip, trim = %controller.trim_window(), "Starting playback");
    controller.toggle_play_pause();

    tokio::time::sleep(run_time.saturating_sub(started.elapsed())).await;

    let report = report(&controller, clip);
    if report.session.is_playing {
        controller.toggle_play_pause();
    } else {
        warn!("Playback was not running when the run ended");
    }
    info!(
        position = %format_clock(report.session.current_time),
        duration = %format_clock(report.session.duration),
        "Playback stopped"
    );
    controller.shutdown();
    Ok(report)
}

/// Execute the play command
pub async fn play(container: &dyn AppContainer, args: PlayArgs) -> Result<()> {
    let report = run_playback(container, args).await?;
    print_json(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{JsonCatalogAdapter, MemoryStorage, RuntimeGate, SimulatedRuntime};
    use crate::app::DefaultAppContainer;
    use crate::config::PlayerSettings;
    use crate::ports::{CatalogPort, StoragePort, WidgetRuntime};
    use std::sync::Arc;

    fn container(runtime: SimulatedRuntime) -> DefaultAppContainer {
        DefaultAppContainer::with_ports(
            PlayerSettings::default(),
            Arc::new(JsonCatalogAdapter::new("unused.json")) as Arc<dyn CatalogPort>,
            Arc::new(MemoryStorage::new()) as Arc<dyn StoragePort>,
            Arc::new(runtime) as Arc<dyn WidgetRuntime>,
        )
    }

    fn args(seconds: f64) -> PlayArgs {
        PlayArgs {
            clip: "v1".to_string(),
            duration: None,
            seconds,
            speed: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_reports_inert_player_without_failing() {
        let (runtime, _gate): (SimulatedRuntime, RuntimeGate) = SimulatedRuntime::gated(60.0);
        let report = run_playback(&container(runtime), args(2.0)).await.unwrap();

        assert_eq!(report.phase, ControllerPhase::Loading);
        assert!(!report.session.is_playing);
        assert_eq!(report.session.current_time, 0.0);
        assert_eq!(report.trim, TrimWindow::full());
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_runs_through_the_window() {
        let report = run_playback(&container(SimulatedRuntime::new(60.0)), args(2.0))
            .await
            .unwrap();

        assert_eq!(report.phase, ControllerPhase::Ready);
        assert!(report.session.is_playing);
        assert_eq!(report.session.duration, 60.0);
        assert!(report.session.current_time > 1.0);
    }
}
