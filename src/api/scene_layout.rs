use serde::{Deserialize, Serialize};

use crate::core::ScrollWindow;

use super::MotionConfig;

/// Page-space placement of one scene section.
///
/// A section is `span + viewport_height` tall: the narrative scroll span
/// followed by a trailing spacer so the last caption can scroll clear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub top: f64,
    pub span: f64,
    pub viewport_height: f64,
}

impl SceneLayout {
    #[must_use]
    pub fn new(top: f64, scroll_screens: f64, viewport_height: f64) -> Self {
        Self {
            top,
            span: scroll_screens * viewport_height,
            viewport_height,
        }
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.span + self.viewport_height
    }

    /// Scroll offset where the scene top meets the viewport bottom.
    #[must_use]
    pub fn narrative_start(self) -> f64 {
        self.top - self.viewport_height
    }

    #[must_use]
    pub fn narrative_end(self) -> f64 {
        self.narrative_start() + self.span
    }

    /// Scroll offset at a fraction of the narrative span.
    #[must_use]
    pub fn at_fraction(self, fraction: f64) -> f64 {
        self.narrative_start() + fraction * self.span
    }

    /// Region in which the scene may own the fixed layer.
    #[must_use]
    pub fn active_window(self, motion: MotionConfig) -> ScrollWindow {
        ScrollWindow::new(
            self.narrative_start(),
            self.bottom() - motion.layer_exit_end_viewports * self.viewport_height,
        )
    }

    #[must_use]
    pub fn exit_fade_window(self, motion: MotionConfig) -> ScrollWindow {
        ScrollWindow::new(
            self.bottom() - motion.layer_exit_start_viewports * self.viewport_height,
            self.bottom() - motion.layer_exit_end_viewports * self.viewport_height,
        )
    }

    /// Scroll offset after which the visualization may leave the center.
    #[must_use]
    pub fn side_slide_point(self, motion: MotionConfig) -> f64 {
        self.top - motion.side_slide_viewport_fraction * self.viewport_height
    }

    /// Page offset of the caption slot for `index` out of `count`.
    #[must_use]
    pub fn caption_slot_top(self, index: usize, count: usize) -> f64 {
        let slot = self.span / count.max(1) as f64;
        self.top + slot * index as f64
    }
}

/// Stacks sections one after another from `story_top`.
#[must_use]
pub fn stack_sections(
    story_top: f64,
    viewport_height: f64,
    scroll_screens: impl IntoIterator<Item = f64>,
) -> Vec<SceneLayout> {
    let mut top = story_top;
    scroll_screens
        .into_iter()
        .map(|screens| {
            let layout = SceneLayout::new(top, screens, viewport_height);
            top = layout.bottom();
            layout
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{SceneLayout, stack_sections};
    use crate::api::MotionConfig;

    #[test]
    fn sections_stack_without_gaps() {
        let layouts = stack_sections(100.0, 800.0, [2.0, 1.0]);
        assert_eq!(layouts[0].top, 100.0);
        assert_eq!(layouts[0].bottom(), 100.0 + 1_600.0 + 800.0);
        assert_eq!(layouts[1].top, layouts[0].bottom());
    }

    #[test]
    fn neighbouring_active_windows_hand_over_inside_the_spacer() {
        let motion = MotionConfig::default();
        let layouts = stack_sections(0.0, 1_000.0, [1.0, 1.0]);
        let first = layouts[0].active_window(motion);
        let second = layouts[1].active_window(motion);
        assert_eq!(first.start, -1_000.0);
        assert!((first.end - 1_100.0).abs() < 1e-9);
        assert_eq!(second.start, 1_000.0);
        assert!(second.start < first.end);
    }

    #[test]
    fn exit_fade_ends_where_the_active_window_ends() {
        let motion = MotionConfig::default();
        let layout = SceneLayout::new(0.0, 3.0, 1_000.0);
        assert_eq!(
            layout.exit_fade_window(motion).end,
            layout.active_window(motion).end
        );
        assert_eq!(layout.caption_slot_top(1, 3), 1_000.0);
    }
}
