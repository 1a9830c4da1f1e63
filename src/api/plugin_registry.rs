use indexmap::map::Entry;
use tracing::debug;

use crate::error::{SceneError, SceneResult};
use crate::extensions::StoryPlugin;
use crate::render::Renderer;

use super::StoryEngine;

impl<R: Renderer> StoryEngine<R> {
    /// Registers an observer under its unique, non-empty id.
    ///
    /// Plugins receive events in registration order.
    pub fn register_plugin(&mut self, plugin: Box<dyn StoryPlugin>) -> SceneResult<()> {
        let plugin_id = plugin.id().trim().to_owned();
        if plugin_id.is_empty() {
            return Err(SceneError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        match self.core.runtime.plugins.entry(plugin_id) {
            Entry::Occupied(entry) => Err(SceneError::InvalidData(format!(
                "plugin `{}` is already registered",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                debug!(plugin = entry.key().as_str(), "plugin registered");
                entry.insert(plugin);
                Ok(())
            }
        }
    }

    /// Returns `true` when a plugin with `plugin_id` was removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        let removed = self.core.runtime.plugins.shift_remove(plugin_id).is_some();
        if removed {
            debug!(plugin = plugin_id, "plugin unregistered");
        }
        removed
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.core.runtime.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.core.runtime.plugins.contains_key(plugin_id)
    }

    /// Registered plugin ids in delivery order.
    #[must_use]
    pub fn plugin_ids(&self) -> Vec<&str> {
        self.core.runtime.plugins.keys().map(String::as_str).collect()
    }
}
