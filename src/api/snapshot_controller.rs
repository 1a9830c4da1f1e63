use indexmap::IndexMap;

use crate::error::{SceneError, SceneResult};
use crate::render::Renderer;

use super::{GroupSnapshot, SceneSnapshot, StoryEngine, StorySnapshot};

impl<R: Renderer> StoryEngine<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> StorySnapshot {
        let model = &self.core.model;
        let scroll = model.scroll.position();
        let viewport_height = self.core.config.viewport.height_px();

        let scenes = model
            .scenes
            .values()
            .map(|scene| {
                let visible = model.exclusivity.is_visible(scene.id);
                let frame = scene.frame(visible, scene.phase(visible, scroll, viewport_height));
                let groups = frame
                    .groups
                    .iter()
                    .map(|group| {
                        (
                            group.kind.name().to_owned(),
                            GroupSnapshot {
                                status: group.status,
                                matched: group.matched,
                                opacity: group.opacity,
                            },
                        )
                    })
                    .collect::<IndexMap<_, _>>();
                let snapshot = SceneSnapshot {
                    phase: frame.phase,
                    top: scene.layout.top,
                    bottom: scene.layout.bottom(),
                    mount_count: scene.mount_count(),
                    layer_visible: visible,
                    layer_opacity: frame.layer.opacity,
                    stacked: frame.visual.stacked,
                    visual_width: frame.visual.width,
                    visual_offset: frame.visual.offset_x,
                    captions: scene.caption_visuals(),
                    groups,
                };
                (frame.key, snapshot)
            })
            .collect();

        StorySnapshot {
            viewport: self.core.config.viewport,
            scroll_position: scroll,
            active_scene: self.active_scene().map(str::to_owned),
            ambient_opacity: model.ambient.value(),
            active_binding_count: model.bindings.len(),
            scenes,
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> SceneResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| SceneError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
