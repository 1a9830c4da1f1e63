use crate::core::{
    GroupStatus, LayoutBounds, ScenePhase, SecondaryGroupKind, ShiftDirection, Viewport,
};
use crate::error::{SceneError, SceneResult};
use crate::interaction::ScrollDirection;
use crate::render::Renderer;

use super::scene_runtime::SceneRuntime;
use super::{
    CapabilityCall, CapabilitySlot, CaptionVisual, DispatchOutcome, SceneLayout, StoryEngine,
    StoryEngineConfig,
};

impl<R: Renderer> StoryEngine<R> {
    fn scene(&self, key: &str) -> SceneResult<&SceneRuntime> {
        self.core
            .model
            .scene_by_key(key)
            .ok_or_else(|| SceneError::UnknownScene(key.to_owned()))
    }

    #[must_use]
    pub fn config(&self) -> &StoryEngineConfig {
        &self.core.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.config.viewport
    }

    #[must_use]
    pub fn scroll_position(&self) -> f64 {
        self.core.model.scroll.position()
    }

    #[must_use]
    pub fn scroll_direction(&self) -> ScrollDirection {
        self.core.model.scroll.direction()
    }

    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.core.model.scenes.len()
    }

    /// Scene keys in page order.
    #[must_use]
    pub fn scene_keys(&self) -> Vec<&str> {
        self.core
            .model
            .scenes
            .values()
            .map(SceneRuntime::key)
            .collect()
    }

    /// Key of the scene currently owning the visualization layer.
    #[must_use]
    pub fn active_scene(&self) -> Option<&str> {
        let model = &self.core.model;
        model
            .exclusivity
            .owner()
            .and_then(|id| model.scenes.get(&id))
            .map(SceneRuntime::key)
    }

    pub fn scene_phase(&self, key: &str) -> SceneResult<ScenePhase> {
        let model = &self.core.model;
        let scene = self.scene(key)?;
        Ok(scene.phase(
            model.exclusivity.is_visible(scene.id),
            model.scroll.position(),
            self.core.config.viewport.height_px(),
        ))
    }

    /// How many times the scene's visualization was constructed.
    pub fn mount_count(&self, key: &str) -> SceneResult<u32> {
        Ok(self.scene(key)?.mount_count())
    }

    pub fn is_mounted(&self, key: &str) -> SceneResult<bool> {
        Ok(self.scene(key)?.is_mounted())
    }

    #[must_use]
    pub fn visible_layer_count(&self) -> usize {
        self.core.model.exclusivity.visible_count()
    }

    /// Live scroll bindings across all scenes.
    #[must_use]
    pub fn active_binding_count(&self) -> usize {
        self.core.model.bindings.len()
    }

    pub fn scene_binding_count(&self, key: &str) -> SceneResult<usize> {
        let scene = self.scene(key)?;
        debug_assert_eq!(
            scene.binding_count(),
            self.core.model.bindings.count_for_scene(scene.id)
        );
        Ok(scene.binding_count())
    }

    pub fn caption_visuals(&self, key: &str) -> SceneResult<Vec<CaptionVisual>> {
        Ok(self.scene(key)?.caption_visuals())
    }

    /// `None` when the descriptor declares no such group.
    pub fn group_status(
        &self,
        key: &str,
        group: SecondaryGroupKind,
    ) -> SceneResult<Option<GroupStatus>> {
        Ok(self.scene(key)?.group_status(group))
    }

    pub fn scene_layout(&self, key: &str) -> SceneResult<SceneLayout> {
        Ok(self.scene(key)?.layout)
    }

    pub fn layout_bounds(&self, key: &str) -> SceneResult<LayoutBounds> {
        Ok(self.scene(key)?.bounds())
    }

    pub fn visual_width(&self, key: &str) -> SceneResult<f64> {
        Ok(self.scene(key)?.vis_width())
    }

    /// Current horizontal offset of the visualization, mid-tween included.
    pub fn visual_offset(&self, key: &str) -> SceneResult<f64> {
        Ok(self.scene(key)?.vis_offset())
    }

    pub fn shift_direction(&self, key: &str) -> SceneResult<ShiftDirection> {
        Ok(self
            .scene(key)?
            .shift_direction(self.core.model.scroll.position(), self.core.config.motion))
    }

    pub fn layer_opacity(&self, key: &str) -> SceneResult<f64> {
        Ok(self.scene(key)?.layer_opacity())
    }

    #[must_use]
    pub fn ambient_opacity(&self) -> f64 {
        self.core.model.ambient.value()
    }

    /// Shared handle to the capability slot the scene's visualization fills.
    pub fn capability_slot(&self, key: &str) -> SceneResult<CapabilitySlot> {
        Ok(self.scene(key)?.capability().clone())
    }

    /// Invokes a capability directly, outside any caption trigger.
    pub fn dispatch(&self, key: &str, call: &CapabilityCall) -> SceneResult<DispatchOutcome> {
        Ok(self.scene(key)?.capability().dispatch(call))
    }
}
