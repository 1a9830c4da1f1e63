use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{GroupStatus, ScenePhase, Viewport};

use super::CaptionVisual;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySnapshot {
    pub viewport: Viewport,
    pub scroll_position: f64,
    pub active_scene: Option<String>,
    pub ambient_opacity: f64,
    pub active_binding_count: usize,
    /// Keyed by scene key, in page order.
    pub scenes: IndexMap<String, SceneSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub phase: ScenePhase,
    pub top: f64,
    pub bottom: f64,
    pub mount_count: u32,
    pub layer_visible: bool,
    pub layer_opacity: f64,
    pub stacked: bool,
    pub visual_width: f64,
    pub visual_offset: f64,
    pub captions: Vec<CaptionVisual>,
    /// Keyed by group name (`axes`, `helper`).
    pub groups: IndexMap<String, GroupSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub status: GroupStatus,
    pub matched: usize,
    pub opacity: f64,
}
