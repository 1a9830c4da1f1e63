mod frame;
mod null_renderer;

pub use frame::{
    AmbientFrame, CaptionFrame, GroupFrame, LayerFrame, SceneFrame, StoryFrame, VisualSlotFrame,
};
pub use null_renderer::NullRenderer;

use crate::error::SceneResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `StoryFrame` so styling code stays
/// isolated from scroll, timeline and exclusivity logic.
pub trait Renderer {
    fn render(&mut self, frame: &StoryFrame) -> SceneResult<()>;
}
