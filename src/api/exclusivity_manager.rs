use tracing::debug;

use super::SceneId;

/// Arbitrates the single fixed visualization layer between scenes.
///
/// The last entered scene owns the layer; every other scene is hidden. With a
/// single owner slot at most one layer can be visible at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct ExclusivityManager {
    owner: Option<SceneId>,
}

impl ExclusivityManager {
    #[must_use]
    pub(super) fn owner(self) -> Option<SceneId> {
        self.owner
    }

    #[must_use]
    pub(super) fn is_visible(self, scene: SceneId) -> bool {
        self.owner == Some(scene)
    }

    #[must_use]
    pub(super) fn visible_count(self) -> usize {
        usize::from(self.owner.is_some())
    }

    /// Makes `scene` the owner. Returns the scene that was hidden, if any.
    pub(super) fn enter(&mut self, scene: SceneId) -> Option<SceneId> {
        let previous = self.owner.replace(scene).filter(|previous| *previous != scene);
        if let Some(previous) = previous {
            debug!(
                hidden = previous.raw(),
                shown = scene.raw(),
                "layer ownership moved"
            );
        }
        previous
    }

    /// Hides `scene` if it owns the layer. Returns `true` when it did.
    pub(super) fn leave(&mut self, scene: SceneId) -> bool {
        if self.owner == Some(scene) {
            self.owner = None;
            return true;
        }
        false
    }

    pub(super) fn reassign(&mut self, owner: Option<SceneId>) {
        self.owner = owner;
    }
}
