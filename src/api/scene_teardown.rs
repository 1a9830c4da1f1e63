use tracing::debug;

use crate::error::{SceneError, SceneResult};
use crate::extensions::StoryEvent;
use crate::render::Renderer;

use super::StoryEngine;

impl<R: Renderer> StoryEngine<R> {
    /// Tears one scene down and returns how many scroll bindings it disposed.
    ///
    /// Sections below it move up on the next layout pass.
    pub fn remove_scene(&mut self, key: &str) -> SceneResult<usize> {
        let model = &mut self.core.model;
        let id = model
            .scene_id(key)
            .ok_or_else(|| SceneError::UnknownScene(key.to_owned()))?;
        let Some(mut scene) = model.scenes.shift_remove(&id) else {
            return Err(SceneError::UnknownScene(key.to_owned()));
        };
        let disposed = scene.dispose(&mut model.bindings);
        let mut events = Vec::new();
        if model.exclusivity.leave(id) {
            events.push(StoryEvent::SceneLeft {
                key: key.to_owned(),
                direction: model.scroll.direction(),
            });
        }
        self.core.runtime.layout_dirty = true;
        self.emit_plugin_events(events);
        Ok(disposed)
    }

    /// Tears every scene down. Returns the total number of disposed bindings.
    pub fn dispose(&mut self) -> usize {
        let model = &mut self.core.model;
        let bindings = &mut model.bindings;
        let mut disposed = 0;
        for (_, mut scene) in model.scenes.drain(..) {
            disposed += scene.dispose(bindings);
        }
        model.exclusivity.reassign(None);
        model.ambient.jump_to(0.0);
        debug!(disposed, remaining = model.bindings.len(), "story disposed");
        disposed
    }
}
