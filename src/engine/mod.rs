//! Playback engine: widget adapter, trim persistence, progress loop and drag sessions

pub mod drag;
pub mod progress;
pub mod runtime;
pub mod shared;
pub mod trim_store;
pub mod widget_adapter;

pub use drag::{DragSession, PointerEvent, TrimDragController};
pub use progress::{ProgressLoop, DEFAULT_FRAME_INTERVAL};
pub use runtime::RuntimeLoader;
pub use shared::{SessionCell, TrimCell};
pub use trim_store::TrimStore;
pub use widget_adapter::{LoadOutcome, PlaybackAdapter};
