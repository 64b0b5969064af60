// Domain rules - Business logic and policies

use crate::domain::model::*;

/// Correction the progress loop applies after reading the play head
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// Play head is inside the window
    None,
    /// Play head is at or before the start boundary; seek to it
    SeekToStart(f64),
    /// Play head reached the end boundary; pause and rewind to the start
    PauseAndRewind(f64),
}

/// Business rules keeping playback inside the trim window
pub struct BoundaryEnforcer;

impl BoundaryEnforcer {
    /// Decide the correction for a play head at `time` seconds
    ///
    /// Both directions are checked on every frame because seeks land
    /// asynchronously and the widget clock may still report a stale position.
    pub fn enforce(time: f64, window: &TrimWindow, duration: f64) -> Correction {
        if duration <= 0.0 {
            return Correction::None;
        }

        let start = window.start_seconds(duration);
        let end = window.end_seconds(duration);

        if time >= end {
            Correction::PauseAndRewind(start)
        } else if time <= start {
            Correction::SeekToStart(start)
        } else {
            Correction::None
        }
    }

    /// Position a clip that played to its native end is reset to
    pub fn ended_rewind(window: &TrimWindow, duration: f64) -> f64 {
        window.start_seconds(duration)
    }
}

/// Rules applied to playback while a boundary handle is dragged
pub struct DragRules;

impl DragRules {
    /// Seek target when the new start overtook the live play head
    pub fn start_seek(live_time: f64, new_start: f64, duration: f64) -> Option<f64> {
        let start = new_start / 100.0 * duration;
        (live_time < start).then_some(start)
    }

    /// Whether an end edit must stop forward progress
    pub fn end_should_pause(is_playing: bool, live_time: f64, new_end: f64, duration: f64) -> bool {
        is_playing && live_time > new_end / 100.0 * duration
    }
}

/// Rules for click-to-seek on the progress track
pub struct SeekRules;

impl SeekRules {
    /// Seconds to seek to for a click at `fraction` of the track, kept inside the window
    pub fn track_seek(fraction: f64, window: &TrimWindow, duration: f64) -> f64 {
        let start = window.start_seconds(duration);
        let end = window.end_seconds(duration);
        let target = fraction * duration;
        if target.is_nan() {
            return start;
        }
        target.max(start).min(end)
    }
}

/// Catalog search and pagination rules
pub struct CatalogRules;

impl CatalogRules {
    /// Case-insensitive substring match against a title
    pub fn title_matches(title: &str, query: &str) -> bool {
        title.to_lowercase().contains(&query.to_lowercase())
    }

    /// Number of pages needed for `len` items
    pub fn total_pages(len: usize) -> usize {
        len.div_ceil(PAGE_SIZE)
    }

    /// Items on the 1-based `page`; empty past the last page
    pub fn page_slice<T: Clone>(items: &[T], page: u32) -> Vec<T> {
        let start = (page.saturating_sub(1) as usize).saturating_mul(PAGE_SIZE);
        items.iter().skip(start).take(PAGE_SIZE).cloned().collect()
    }
}
