use indexmap::IndexMap;

use crate::core::{Ease, ValueTween};
use crate::interaction::ScrollState;

use super::binding_registry::ScrollBindingRegistry;
use super::exclusivity_manager::ExclusivityManager;
use super::scene_runtime::SceneRuntime;
use super::{SceneData, SceneId, VisualCatalog};

/// Mutable story state: scroll, scene instances and the shared layer.
///
/// Scenes are kept in page order; the binding registry and the exclusivity
/// manager are shared by all of them.
pub(super) struct StoryModel {
    pub(super) scroll: ScrollState,
    pub(super) scenes: IndexMap<SceneId, SceneRuntime>,
    pub(super) bindings: ScrollBindingRegistry,
    pub(super) exclusivity: ExclusivityManager,
    pub(super) catalog: VisualCatalog,
    pub(super) data: SceneData,
    pub(super) ambient: ValueTween,
    next_scene_id: u32,
}

impl StoryModel {
    pub(super) fn new(catalog: VisualCatalog, data: SceneData, ambient_fade_seconds: f64) -> Self {
        Self {
            scroll: ScrollState::default(),
            scenes: IndexMap::new(),
            bindings: ScrollBindingRegistry::default(),
            exclusivity: ExclusivityManager::default(),
            catalog,
            data,
            ambient: ValueTween::new(0.0, ambient_fade_seconds, Ease::Power2Out),
            next_scene_id: 0,
        }
    }

    pub(super) fn allocate_scene_id(&mut self) -> SceneId {
        let id = SceneId::new(self.next_scene_id);
        self.next_scene_id += 1;
        id
    }

    #[must_use]
    pub(super) fn scene_id(&self, key: &str) -> Option<SceneId> {
        self.scenes
            .values()
            .find(|scene| scene.key() == key)
            .map(|scene| scene.id)
    }

    #[must_use]
    pub(super) fn scene_by_key(&self, key: &str) -> Option<&SceneRuntime> {
        self.scenes.values().find(|scene| scene.key() == key)
    }

    pub(super) fn scene_by_key_mut(&mut self, key: &str) -> Option<&mut SceneRuntime> {
        self.scenes.values_mut().find(|scene| scene.key() == key)
    }

    #[must_use]
    pub(super) fn mounted_scene_count(&self) -> usize {
        self.scenes.values().filter(|scene| scene.is_mounted()).count()
    }
}
