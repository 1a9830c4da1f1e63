use crate::error::SceneResult;
use crate::render::{Renderer, StoryFrame};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests catch broken invariants before
/// a real backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_scene_count: usize,
    pub last_caption_count: usize,
    pub last_visible_layer_count: usize,
    pub last_frame: Option<StoryFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &StoryFrame) -> SceneResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_scene_count = frame.scenes.len();
        self.last_caption_count = frame.caption_count();
        self.last_visible_layer_count = frame.visible_layer_count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
