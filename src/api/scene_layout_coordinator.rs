use tracing::debug;

use crate::core::Viewport;
use crate::error::{SceneError, SceneResult};
use crate::extensions::StoryEvent;
use crate::interaction::ScrollStep;
use crate::render::Renderer;

use super::scene_layout::stack_sections;
use super::scene_runtime::SceneRuntime;
use super::StoryEngine;

impl<R: Renderer> StoryEngine<R> {
    /// Records a new viewport. The layout pass runs on the next frame.
    pub fn resize(&mut self, viewport: Viewport) -> SceneResult<()> {
        if !viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport != self.core.config.viewport {
            self.core.config.viewport = viewport;
            self.core.runtime.layout_dirty = true;
        }
        Ok(())
    }

    /// Records a measured caption box width, e.g. after localized text reflows.
    pub fn set_caption_width(
        &mut self,
        key: &str,
        index: usize,
        width_px: f64,
    ) -> SceneResult<()> {
        if !width_px.is_finite() || width_px < 0.0 {
            return Err(SceneError::InvalidData(
                "caption width must be finite and >= 0".to_owned(),
            ));
        }
        let scene = self
            .core
            .model
            .scene_by_key_mut(key)
            .ok_or_else(|| SceneError::UnknownScene(key.to_owned()))?;
        if index >= scene.caption_count() {
            return Err(SceneError::InvalidData(format!(
                "scene `{key}` has no caption {index}"
            )));
        }
        if scene.set_caption_width(index, width_px) {
            self.core.runtime.layout_dirty = true;
        }
        Ok(())
    }

    #[must_use]
    pub fn layout_pending(&self) -> bool {
        self.core.runtime.layout_dirty
    }

    /// Re-stacks sections, rewrites binding windows and re-resolves geometry.
    ///
    /// Only targets move; committed tween values continue from where they are.
    pub(super) fn refresh_layout(&mut self, events: &mut Vec<StoryEvent>) {
        let config = self.core.config;
        let model = &mut self.core.model;
        let scroll = model.scroll.position();
        let layouts = stack_sections(
            config.story_top_px,
            config.viewport.height_px(),
            model
                .scenes
                .values()
                .map(|scene| scene.descriptor.scroll_screens()),
        );
        for (scene, layout) in model.scenes.values_mut().zip(layouts) {
            scene.relayout(layout, &config, &mut model.bindings, scroll, events);
        }
        debug!(scenes = model.scenes.len(), "layout refreshed");
        self.reconcile_owner(events);
        self.observe_mount_gates(events);
    }

    /// Keeps the owner if it still contains the scroll offset, otherwise hands
    /// the layer to the last scene in page order that does.
    fn reconcile_owner(&mut self, events: &mut Vec<StoryEvent>) {
        let motion = self.core.config.motion;
        let model = &self.core.model;
        let scroll = model.scroll.position();
        let direction = model.scroll.direction();
        let contains = |scene: &SceneRuntime| scene.layout.active_window(motion).contains(scroll);

        let current = model.exclusivity.owner();
        if current
            .and_then(|id| model.scenes.get(&id))
            .is_some_and(contains)
        {
            return;
        }
        let next = model
            .scenes
            .values()
            .rev()
            .find(|scene| contains(scene))
            .map(|scene| scene.id);

        match (next, current) {
            (Some(id), _) => {
                let settled = ScrollStep {
                    from: scroll,
                    to: scroll,
                };
                self.enter_scene(id, direction, (scroll, settled), events);
            }
            (None, Some(previous)) => {
                let model = &mut self.core.model;
                model.exclusivity.leave(previous);
                if let Some(scene) = model.scenes.get(&previous) {
                    debug!(scene = scene.key(), "layout moved the owner out of view");
                    events.push(StoryEvent::SceneLeft {
                        key: scene.key().to_owned(),
                        direction,
                    });
                }
            }
            (None, None) => {}
        }
    }
}
