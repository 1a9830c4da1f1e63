use indexmap::IndexMap;

use crate::extensions::StoryPlugin;

/// Runtime orchestration state grouped separately from the story model.
pub(super) struct StoryRuntimeState {
    /// Keyed by plugin id, in registration order.
    pub(super) plugins: IndexMap<String, Box<dyn StoryPlugin>>,
    /// Set by resize and caption measurements; consumed once per frame.
    pub(super) layout_dirty: bool,
    pub(super) frames_advanced: u64,
    pub(super) frames_rendered: u64,
}

impl StoryRuntimeState {
    #[must_use]
    pub(super) fn new() -> Self {
        Self {
            plugins: IndexMap::new(),
            layout_dirty: false,
            frames_advanced: 0,
            frames_rendered: 0,
        }
    }

    /// Returns whether a layout pass was pending and clears the flag.
    pub(super) fn take_layout_dirty(&mut self) -> bool {
        std::mem::take(&mut self.layout_dirty)
    }
}
