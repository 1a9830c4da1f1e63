mod action_dispatcher;
mod binding_registry;
mod capability;
mod caption_timeline;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod exclusivity_manager;
mod frame_coordinator;
mod json_contract;
mod lazy_mount_gate;
mod plugin_dispatch;
mod plugin_registry;
mod reveal_binder;
mod scene_descriptor;
mod scene_layout;
mod scene_layout_coordinator;
mod scene_registry;
mod scene_runtime;
mod scene_teardown;
mod scroll_coordinator;
mod snapshot_controller;
mod story_model;
mod story_progress;
mod story_runtime;
mod validation;
mod visual_catalog;

pub use binding_registry::{BindingEffect, BindingId, SceneId};
pub use capability::{CallOutcome, Capability, CapabilityCall, CapabilitySlot, DispatchOutcome};
pub use caption_timeline::{CaptionVisual, CaptionWindows, caption_exit_point, caption_windows};
pub use engine::StoryEngine;
pub use engine_config::{
    CaptionBoxConfig, MotionConfig, RevealConfig, StoryEngineConfig, TimelineConfig,
};
pub use engine_snapshot::{GroupSnapshot, SceneSnapshot, StorySnapshot};
pub use json_contract::{STORY_SNAPSHOT_JSON_SCHEMA_V1, StorySnapshotJsonContractV1};
pub use lazy_mount_gate::{LazyMountGate, intersects_viewport};
pub use scene_descriptor::{
    ActionDescriptor, CaptionDescriptor, LayoutHints, NO_MATCH, PreferredSide, SceneDescriptor,
    SecondaryGroup, SecondaryGroups,
};
pub use scene_layout::{SceneLayout, stack_sections};
pub use scene_registry::{SCENE_REGISTRY_JSON_SCHEMA_V1, SceneRegistry, SceneRegistryJsonContractV1};
pub use story_progress::{ProgressWaypoint, StoryProgress};
pub use visual_catalog::{EmptyVisual, SceneData, VisualCatalog, VisualNode, VisualizationFactory};
