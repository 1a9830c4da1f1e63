use serde::{Deserialize, Serialize};

use crate::core::{SecondaryGroupKind, Viewport};
use crate::interaction::ScrollDirection;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryContext {
    pub viewport: Viewport,
    pub scroll_position: f64,
    pub scroll_direction: ScrollDirection,
    pub active_scene: Option<String>,
    pub scene_count: usize,
    pub mounted_scene_count: usize,
    pub active_binding_count: usize,
}

/// Outcome of a capability call as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Applied,
    Unsupported,
    Unmounted,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoryEvent {
    SceneEntered {
        key: String,
        direction: ScrollDirection,
    },
    SceneLeft {
        key: String,
        direction: ScrollDirection,
    },
    VisualMounted {
        key: String,
        mount_count: u32,
    },
    ActionDispatched {
        key: String,
        caption_index: usize,
        method: String,
        outcome: ActionOutcome,
    },
    SecondaryGroupBound {
        key: String,
        group: SecondaryGroupKind,
        matched: usize,
    },
    SecondaryGroupAbsent {
        key: String,
        group: SecondaryGroupKind,
    },
    LayoutResolved {
        key: String,
        stacked: bool,
        vis_width: f64,
    },
    Rendered,
}

/// Extension hook interface for observing the story.
///
/// Plugins see events and a context snapshot; they cannot mutate engine
/// internals.
pub trait StoryPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &StoryEvent, context: &StoryContext);
}
