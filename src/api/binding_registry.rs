use std::cmp::Reverse;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Crossing, ScrollWindow, SecondaryGroupKind};
use crate::interaction::{ScrollDirection, ScrollStep};

/// Stable identity of a scene instance inside one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneId(u32);

impl SceneId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BindingId(u64);

impl BindingId {
    #[must_use]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What a scroll binding drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingEffect {
    /// Scene enter/leave boundaries arbitrated by the exclusivity manager.
    SceneRegion,
    /// Continuous caption fade/slide driven by scroll progress.
    CaptionScrub { index: usize },
    /// One-shot capability call at a caption beat.
    Action { index: usize },
    RevealIn { group: SecondaryGroupKind },
    RevealOut { group: SecondaryGroupKind },
    /// Continuous fade of the visualization layer as the scene scrolls out.
    LayerExitFade,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ScrollBinding {
    pub(super) scene: SceneId,
    pub(super) window: ScrollWindow,
    pub(super) effect: BindingEffect,
}

/// One crossing produced by a scroll step, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct BindingCrossing {
    pub(super) binding: BindingId,
    pub(super) scene: SceneId,
    pub(super) effect: BindingEffect,
    pub(super) crossing: Crossing,
    pub(super) position: f64,
}

/// Process-wide ledger of live scroll bindings.
///
/// Every binding is created against a scene and must be disposed with it; the
/// registry is the single place crossings are computed from.
#[derive(Debug, Default)]
pub(super) struct ScrollBindingRegistry {
    next_id: u64,
    bindings: IndexMap<BindingId, ScrollBinding>,
}

impl ScrollBindingRegistry {
    pub(super) fn register(
        &mut self,
        scene: SceneId,
        window: ScrollWindow,
        effect: BindingEffect,
    ) -> BindingId {
        let id = BindingId(self.next_id);
        self.next_id += 1;
        self.bindings.insert(
            id,
            ScrollBinding {
                scene,
                window,
                effect,
            },
        );
        debug!(binding = id.0, scene = scene.raw(), ?effect, "scroll binding registered");
        id
    }

    pub(super) fn update_window(&mut self, id: BindingId, window: ScrollWindow) {
        if let Some(binding) = self.bindings.get_mut(&id) {
            binding.window = window;
        }
    }

    #[must_use]
    pub(super) fn window(&self, id: BindingId) -> Option<ScrollWindow> {
        self.bindings.get(&id).map(|binding| binding.window)
    }

    /// Disposes every binding in `ids`, draining the list.
    pub(super) fn dispose_all(&mut self, ids: &mut Vec<BindingId>) -> usize {
        let mut removed = 0;
        for id in ids.drain(..) {
            if self.bindings.shift_remove(&id).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(removed, remaining = self.bindings.len(), "scroll bindings disposed");
        }
        removed
    }

    #[must_use]
    pub(super) fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub(super) fn count_for_scene(&self, scene: SceneId) -> usize {
        self.bindings
            .values()
            .filter(|binding| binding.scene == scene)
            .count()
    }

    /// All crossings for `step`, ordered as they would occur along the travel direction.
    #[must_use]
    pub(super) fn crossings(&self, step: ScrollStep) -> Vec<BindingCrossing> {
        let mut out = Vec::new();
        for (id, binding) in &self.bindings {
            for (crossing, position) in binding.window.crossings(step.from, step.to) {
                out.push(BindingCrossing {
                    binding: *id,
                    scene: binding.scene,
                    effect: binding.effect,
                    crossing,
                    position,
                });
            }
        }
        match step.direction() {
            ScrollDirection::Forward => out.sort_by_key(|entry| {
                (
                    OrderedFloat(entry.position),
                    entry.crossing.tie_rank(),
                    entry.binding,
                )
            }),
            ScrollDirection::Backward => out.sort_by_key(|entry| {
                (
                    Reverse(OrderedFloat(entry.position)),
                    entry.crossing.tie_rank(),
                    Reverse(entry.binding),
                )
            }),
            ScrollDirection::Idle => out.clear(),
        }
        out
    }
}
