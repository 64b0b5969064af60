// Domain models - Core types and data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Smallest allowed distance between trim start and end, in percentage points
pub const MIN_TRIM_GAP: f64 = 1.0;

/// Full-range trim boundaries
pub const FULL_RANGE_START: f64 = 0.0;
pub const FULL_RANGE_END: f64 = 100.0;

/// Floating slack accepted when validating the gap of a restored window
const GAP_EPSILON: f64 = 1e-9;

/// Catalog page size
pub const PAGE_SIZE: usize = 10;

/// Opaque identifier of a playable clip
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    /// Create a clip id, rejecting empty or blank input
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::BadArgs("Clip id cannot be empty".to_string()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the trim window a handle controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Start,
    End,
}

impl Boundary {
    /// Name used as the storage key prefix
    pub fn storage_name(&self) -> &'static str {
        match self {
            Boundary::Start => "trimStart",
            Boundary::End => "trimEnd",
        }
    }

    /// Parse boundary from string
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_lowercase().as_str() {
            "start" => Ok(Boundary::Start),
            "end" => Ok(Boundary::End),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid boundary: {}. Valid boundaries: start, end",
                value
            ))),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Start => f.write_str("start"),
            Boundary::End => f.write_str("end"),
        }
    }
}

/// Trim window expressed as percentages of the clip duration
///
/// Kept in percent rather than seconds so that it stays meaningful while the
/// widget has not reported a duration yet. `start < end` with at least
/// [`MIN_TRIM_GAP`] between them holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimWindow {
    start: f64,
    end: f64,
}

impl TrimWindow {
    /// Create a validated trim window
    pub fn new(start: f64, end: f64) -> Result<Self, DomainError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(DomainError::InvalidTrim(format!(
                "boundaries must be finite (start {}, end {})",
                start, end
            )));
        }
        if !(FULL_RANGE_START..FULL_RANGE_END).contains(&start) {
            return Err(DomainError::InvalidTrim(format!(
                "start {} outside [0, 100)",
                start
            )));
        }
        if end <= FULL_RANGE_START || end > FULL_RANGE_END {
            return Err(DomainError::InvalidTrim(format!("end {} outside (0, 100]", end)));
        }
        if end - start < MIN_TRIM_GAP - GAP_EPSILON {
            return Err(DomainError::InvalidTrim(format!(
                "start {} and end {} closer than {} point",
                start, end, MIN_TRIM_GAP
            )));
        }
        Ok(Self { start, end })
    }

    /// Window covering the whole clip
    pub fn full() -> Self {
        Self {
            start: FULL_RANGE_START,
            end: FULL_RANGE_END,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Value of the given boundary
    pub fn value(&self, boundary: Boundary) -> f64 {
        match boundary {
            Boundary::Start => self.start,
            Boundary::End => self.end,
        }
    }

    pub fn is_full(&self) -> bool {
        self.start == FULL_RANGE_START && self.end == FULL_RANGE_END
    }

    /// Start boundary in seconds for a clip of `duration` seconds
    pub fn start_seconds(&self, duration: f64) -> f64 {
        self.start / 100.0 * duration
    }

    /// End boundary in seconds for a clip of `duration` seconds
    pub fn end_seconds(&self, duration: f64) -> f64 {
        self.end / 100.0 * duration
    }

    /// Move the start boundary toward `target`, never closer than one point to the end
    pub fn with_start(&self, target: f64) -> Self {
        let target = clamp_percent(target);
        Self {
            start: target.min(self.end - MIN_TRIM_GAP),
            end: self.end,
        }
    }

    /// Move the end boundary toward `target`, never closer than one point to the start
    pub fn with_end(&self, target: f64) -> Self {
        let target = clamp_percent(target);
        Self {
            start: self.start,
            end: target.max(self.start + MIN_TRIM_GAP),
        }
    }

    /// Move either boundary
    pub fn with_boundary(&self, boundary: Boundary, target: f64) -> Self {
        match boundary {
            Boundary::Start => self.with_start(target),
            Boundary::End => self.with_end(target),
        }
    }
}

impl Default for TrimWindow {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for TrimWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%..{:.1}%", self.start, self.end)
    }
}

/// Clamp a value onto the 0..=100 percent scale; NaN collapses to 0
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return FULL_RANGE_START;
    }
    value.clamp(FULL_RANGE_START, FULL_RANGE_END)
}

/// Player state as reported by the embeddable widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl WidgetState {
    /// Map the widget's numeric state code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(WidgetState::Unstarted),
            0 => Some(WidgetState::Ended),
            1 => Some(WidgetState::Playing),
            2 => Some(WidgetState::Paused),
            3 => Some(WidgetState::Buffering),
            5 => Some(WidgetState::Cued),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            WidgetState::Unstarted => -1,
            WidgetState::Ended => 0,
            WidgetState::Playing => 1,
            WidgetState::Paused => 2,
            WidgetState::Buffering => 3,
            WidgetState::Cued => 5,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, WidgetState::Playing)
    }
}

/// Live playback state of the mounted player
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackSession {
    pub is_playing: bool,
    /// Seconds, refreshed every progress tick while playing
    pub current_time: f64,
    /// Seconds, zero until the widget reports it
    pub duration: f64,
}

impl PlaybackSession {
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Play head position as a percentage of the duration
    pub fn progress_percent(&self) -> f64 {
        if !self.has_duration() {
            return 0.0;
        }
        clamp_percent(self.current_time / self.duration * 100.0)
    }
}

/// Horizontal placement of the progress track on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
}

impl TrackGeometry {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Unclamped fraction of the track under `pointer_x`
    pub fn fraction_at(&self, pointer_x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        (pointer_x - self.left) / self.width
    }

    /// Percentage under `pointer_x`, clamped to 0..=100
    pub fn percent_at(&self, pointer_x: f64) -> f64 {
        clamp_percent(self.fraction_at(pointer_x) * 100.0)
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ClipId,
    pub title: String,
    pub description: String,
}

/// One page of catalog results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub total_pages: usize,
    pub items: Vec<CatalogItem>,
}

/// Catalog query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRequest {
    pub page: Option<u32>,
    pub query: Option<String>,
}

impl CatalogRequest {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            query: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Search text, if any; an empty query means "no filter"
    pub fn filter(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}
