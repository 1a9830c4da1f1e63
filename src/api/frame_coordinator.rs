use tracing::trace;

use crate::error::{SceneError, SceneResult};
use crate::extensions::StoryEvent;
use crate::render::{AmbientFrame, Renderer, StoryFrame};

use super::StoryEngine;

/// Builds frames from engine state and hands them to the renderer.
pub(super) struct FrameCoordinator;

impl FrameCoordinator {
    pub(super) fn render<R: Renderer>(engine: &mut StoryEngine<R>) -> SceneResult<()> {
        let frame = engine.build_frame();
        engine.renderer.render(&frame)?;
        engine.core.runtime.frames_rendered += 1;
        trace!(
            scenes = frame.scenes.len(),
            visible_layers = frame.visible_layer_count(),
            "frame rendered"
        );
        engine.emit_plugin_events(vec![StoryEvent::Rendered]);
        Ok(())
    }
}

impl<R: Renderer> StoryEngine<R> {
    /// Advances every time-driven value by `delta_seconds`.
    ///
    /// A pending layout pass runs first. Secondary-group selectors are polled
    /// after the visual has had its frame.
    pub fn advance_frame(&mut self, delta_seconds: f64) -> SceneResult<()> {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            return Err(SceneError::InvalidData(
                "frame delta must be finite and >= 0".to_owned(),
            ));
        }
        let mut events = Vec::new();
        if self.core.runtime.take_layout_dirty() {
            self.refresh_layout(&mut events);
        }

        let model = &mut self.core.model;
        let scroll = model.scroll.position();
        for scene in model.scenes.values_mut() {
            scene.step(delta_seconds);
            events.extend(scene.poll_groups(&mut model.bindings, scroll));
        }
        model.ambient.step(delta_seconds);
        self.core.runtime.frames_advanced += 1;
        self.emit_plugin_events(events);
        Ok(())
    }

    /// Advances one frame and renders it.
    pub fn tick(&mut self, delta_seconds: f64) -> SceneResult<()> {
        self.advance_frame(delta_seconds)?;
        self.render()
    }

    /// Snaps every running tween to its target.
    ///
    /// Deterministic checkpoint for tests and for hosts that disable motion.
    pub fn settle(&mut self) {
        let mut events = Vec::new();
        if self.core.runtime.take_layout_dirty() {
            self.refresh_layout(&mut events);
        }
        let model = &mut self.core.model;
        for scene in model.scenes.values_mut() {
            scene.settle();
        }
        model.ambient.settle();
        self.emit_plugin_events(events);
    }

    #[must_use]
    pub fn build_frame(&self) -> StoryFrame {
        let model = &self.core.model;
        let scroll = model.scroll.position();
        let viewport_height = self.core.config.viewport.height_px();

        let mut frame = StoryFrame::new(self.core.config.viewport, scroll);
        frame.ambient = AmbientFrame {
            opacity: model.ambient.value().clamp(0.0, 1.0),
        };
        for scene in model.scenes.values() {
            let visible = model.exclusivity.is_visible(scene.id);
            let phase = scene.phase(visible, scroll, viewport_height);
            frame = frame.with_scene(scene.frame(visible, phase));
        }
        frame
    }

    #[must_use]
    pub fn frames_advanced(&self) -> u64 {
        self.core.runtime.frames_advanced
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.core.runtime.frames_rendered
    }
}
