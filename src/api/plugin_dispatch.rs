use crate::extensions::{StoryContext, StoryEvent};
use crate::render::Renderer;

use super::StoryEngine;

impl<R: Renderer> StoryEngine<R> {
    pub(super) fn plugin_context(&self) -> StoryContext {
        let model = &self.core.model;
        StoryContext {
            viewport: self.core.config.viewport,
            scroll_position: model.scroll.position(),
            scroll_direction: model.scroll.direction(),
            active_scene: self.active_scene().map(str::to_owned),
            scene_count: model.scenes.len(),
            mounted_scene_count: model.mounted_scene_count(),
            active_binding_count: model.bindings.len(),
        }
    }

    /// Delivers `events` in order. The context reflects state after the batch.
    pub(super) fn emit_plugin_events(&mut self, events: Vec<StoryEvent>) {
        if events.is_empty() || self.core.runtime.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for event in &events {
            for plugin in self.core.runtime.plugins.values_mut() {
                plugin.on_event(event, &context);
            }
        }
    }
}
