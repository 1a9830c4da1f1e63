use super::{StoryEngineConfig, story_model::StoryModel, story_runtime::StoryRuntimeState};

/// Internal engine core state used by the public facade (`StoryEngine`).
pub(super) struct EngineCore {
    pub(super) config: StoryEngineConfig,
    pub(super) model: StoryModel,
    pub(super) runtime: StoryRuntimeState,
}
