use tracing::debug;

use crate::core::Crossing;
use crate::error::{SceneError, SceneResult};
use crate::extensions::StoryEvent;
use crate::interaction::{ScrollDirection, ScrollStep};
use crate::render::Renderer;

use super::binding_registry::BindingCrossing;
use super::{BindingEffect, SceneId, StoryEngine};

impl<R: Renderer> StoryEngine<R> {
    /// Moves the page to `position` and applies every crossing on the way.
    ///
    /// Crossings are applied in travel order, so one large jump ends in the
    /// same state as many small steps over the same distance.
    pub fn scroll_to(&mut self, position: f64) -> SceneResult<()> {
        if !position.is_finite() {
            return Err(SceneError::InvalidData(
                "scroll position must be finite".to_owned(),
            ));
        }
        let Some(step) = self.core.model.scroll.on_scroll(position) else {
            return Ok(());
        };
        self.apply_scroll_step(step);
        Ok(())
    }

    pub fn scroll_by(&mut self, delta: f64) -> SceneResult<()> {
        self.scroll_to(self.core.model.scroll.position() + delta)
    }

    pub(super) fn apply_scroll_step(&mut self, step: ScrollStep) {
        let mut events = Vec::new();
        self.observe_mount_gates(&mut events);
        for crossing in self.core.model.bindings.crossings(step) {
            self.apply_crossing(crossing, step, &mut events);
        }
        self.seek_scenes();
        self.emit_plugin_events(events);
    }

    fn apply_crossing(
        &mut self,
        crossing: BindingCrossing,
        step: ScrollStep,
        events: &mut Vec<StoryEvent>,
    ) {
        let direction = step.direction();
        match (crossing.effect, crossing.crossing) {
            (BindingEffect::SceneRegion, Crossing::Enter | Crossing::EnterBack) => {
                let entry = (crossing.position, step);
                self.enter_scene(crossing.scene, direction, entry, events);
            }
            (BindingEffect::SceneRegion, Crossing::Leave | Crossing::LeaveBack) => {
                self.leave_scene(crossing.scene, direction, events);
            }
            (effect, kind) => {
                if let Some(scene) = self.core.model.scenes.get_mut(&crossing.scene) {
                    events.extend(scene.on_crossing(effect, kind));
                }
            }
        }
    }

    /// Hands the layer to `id`, mounting it and resetting its stage.
    ///
    /// `entry` is the offset the region was entered at and the step that
    /// carried it there; actions already behind it are replayed after the reset.
    pub(super) fn enter_scene(
        &mut self,
        id: SceneId,
        direction: ScrollDirection,
        entry: (f64, ScrollStep),
        events: &mut Vec<StoryEvent>,
    ) {
        let model = &mut self.core.model;
        let Some(scene) = model.scenes.get_mut(&id) else {
            return;
        };
        model.exclusivity.enter(id);
        events.extend(scene.force_mount(&model.catalog, &model.data));
        let reset = scene.reset_stage();
        let (position, step) = entry;
        let replayed = scene.replay_passed_actions(&model.bindings, position, step);
        debug!(
            scene = scene.key(),
            ?direction,
            ?reset,
            replayed = replayed.len(),
            "scene entered"
        );

        let ambient = if scene.descriptor.layout.snow_visible {
            1.0
        } else {
            0.0
        };
        model.ambient.retarget(ambient);
        events.push(StoryEvent::SceneEntered {
            key: scene.key().to_owned(),
            direction,
        });
        events.extend(replayed);
    }

    fn leave_scene(
        &mut self,
        id: SceneId,
        direction: ScrollDirection,
        events: &mut Vec<StoryEvent>,
    ) {
        let model = &mut self.core.model;
        let Some(scene) = model.scenes.get(&id) else {
            return;
        };
        let hidden = model.exclusivity.leave(id);
        debug!(scene = scene.key(), ?direction, hidden, "scene left");
        events.push(StoryEvent::SceneLeft {
            key: scene.key().to_owned(),
            direction,
        });
    }

    pub(super) fn observe_mount_gates(&mut self, events: &mut Vec<StoryEvent>) {
        let viewport_height = self.core.config.viewport.height_px();
        let model = &mut self.core.model;
        let scroll = model.scroll.position();
        for scene in model.scenes.values_mut() {
            events.extend(scene.observe_gate(
                scroll,
                viewport_height,
                &model.catalog,
                &model.data,
            ));
        }
    }

    pub(super) fn seek_scenes(&mut self) {
        let scroll = self.core.model.scroll.position();
        let config = &self.core.config;
        for scene in self.core.model.scenes.values_mut() {
            scene.seek(scroll, config);
        }
    }
}
