use serde::{Deserialize, Serialize};

/// Decides when a scene's visualization is first instantiated.
///
/// The gate opens the first time the scene box intersects the viewport grown
/// by the prefetch margin, and never closes again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LazyMountGate {
    prefetch_margin_px: Option<f64>,
    open: bool,
}

impl LazyMountGate {
    #[must_use]
    pub fn new(prefetch_margin_px: Option<f64>) -> Self {
        Self {
            prefetch_margin_px,
            open: false,
        }
    }

    #[must_use]
    pub fn should_mount(self) -> bool {
        self.open
    }

    /// Root margin applied around the viewport when testing intersection.
    #[must_use]
    pub fn root_margin_px(self) -> f64 {
        self.prefetch_margin_px.unwrap_or(0.0).max(0.0)
    }

    /// Feeds one intersection observation. Returns `true` only on the opening transition.
    pub fn observe(
        &mut self,
        scene_top: f64,
        scene_bottom: f64,
        scroll: f64,
        viewport_height: f64,
    ) -> bool {
        if self.open {
            return false;
        }
        if intersects_viewport(
            scene_top,
            scene_bottom,
            scroll,
            viewport_height,
            self.root_margin_px(),
        ) {
            self.open = true;
            return true;
        }
        false
    }

    /// Opens the gate regardless of intersection. Returns `true` if it was closed.
    pub fn force_open(&mut self) -> bool {
        let opened = !self.open;
        self.open = true;
        opened
    }
}

/// Whether `[scene_top, scene_bottom]` touches the viewport expanded by `margin_px`.
#[must_use]
pub fn intersects_viewport(
    scene_top: f64,
    scene_bottom: f64,
    scroll: f64,
    viewport_height: f64,
    margin_px: f64,
) -> bool {
    let view_top = scroll - margin_px;
    let view_bottom = scroll + viewport_height + margin_px;
    scene_top <= view_bottom && scene_bottom >= view_top
}
