use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::render::Renderer;

use super::StoryEngine;

/// The rail appears once the first section is this close to the viewport top.
const RAIL_REVEAL_VIEWPORT_FRACTION: f64 = 0.1;
/// A waypoint counts as reached when its section top passes this line.
const WAYPOINT_REACH_VIEWPORT_FRACTION: f64 = 0.6;

/// Reading progress through the whole story.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoryProgress {
    /// Position between the first section top and the last section end, in `[0, 1]`.
    pub fraction: f64,
    pub rail_visible: bool,
    pub waypoints: Vec<ProgressWaypoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressWaypoint {
    pub key: String,
    /// Descriptor title, or the key when the scene has none.
    pub title: String,
    pub fraction: f64,
    pub reached: bool,
}

impl<R: Renderer> StoryEngine<R> {
    #[must_use]
    pub fn story_progress(&self) -> StoryProgress {
        let model = &self.core.model;
        let (Some((_, first)), Some((_, last))) = (model.scenes.first(), model.scenes.last())
        else {
            return StoryProgress::default();
        };
        let scroll = model.scroll.position();
        let viewport_height = self.core.config.viewport.height_px();
        let start = first.layout.top;
        let end = last.layout.bottom() - viewport_height;
        let span = (end - start).max(1.0);

        let reach_offset = WAYPOINT_REACH_VIEWPORT_FRACTION * viewport_height;
        let waypoints = model
            .scenes
            .values()
            .map(|scene| ProgressWaypoint {
                key: scene.descriptor.key.clone(),
                title: scene
                    .descriptor
                    .title
                    .clone()
                    .unwrap_or_else(|| scene.descriptor.key.clone()),
                fraction: ((scene.layout.top - start) / span).clamp(0.0, 1.0),
                reached: scroll >= scene.layout.top - reach_offset,
            })
            .collect();

        StoryProgress {
            fraction: ((scroll - start) / span).clamp(0.0, 1.0),
            rail_visible: scroll >= start - RAIL_REVEAL_VIEWPORT_FRACTION * viewport_height
                && scroll <= end,
            waypoints,
        }
    }

    /// Scroll offset that brings the scene's section top to the viewport top.
    pub fn scroll_target(&self, key: &str) -> SceneResult<f64> {
        self.core
            .model
            .scene_by_key(key)
            .map(|scene| scene.layout.top)
            .ok_or_else(|| SceneError::UnknownScene(key.to_owned()))
    }
}
