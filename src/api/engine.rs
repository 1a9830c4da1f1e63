use crate::error::SceneResult;
use crate::render::Renderer;

use super::engine_core::EngineCore;
use super::frame_coordinator::FrameCoordinator;

/// Main orchestration facade consumed by host applications.
///
/// `StoryEngine` owns every scene instance, the process-wide scroll binding
/// registry and the shared visualization layer. The host feeds it scroll
/// offsets, measurements and frame ticks; it hands a `StoryFrame` to the
/// renderer.
pub struct StoryEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> StoryEngine<R> {
    /// Builds the current frame and submits it to the renderer.
    pub fn render(&mut self) -> SceneResult<()> {
        FrameCoordinator::render(self)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
