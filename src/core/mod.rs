pub mod ease;
pub mod geometry;
pub mod scroll_window;
pub mod tween;
pub mod types;

pub use ease::Ease;
pub use geometry::{GeometryConfig, LayoutBounds, ResolvedGeometry, ShiftRequest, resolve_geometry};
pub use scroll_window::{Crossing, ScrollWindow};
pub use tween::{ScrubPlayhead, ToggleTween, ValueTween};
pub use types::{
    CaptionSide, GroupStatus, ScenePhase, SecondaryGroupKind, ShiftDirection, Span, Viewport,
};
