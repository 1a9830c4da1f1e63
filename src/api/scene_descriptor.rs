use serde::{Deserialize, Serialize};

use crate::core::CaptionSide;

use super::CapabilityCall;

/// Selector that never matches; marks a secondary group as absent.
pub const NO_MATCH: &str = "*:not(*)";

/// Declarative description of one narrative scene.
///
/// Descriptors are plain data so content authors can add or reorder scenes
/// without touching engine code. The visualization itself is looked up by
/// `visual` in the [`super::VisualCatalog`] when the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub key: String,
    pub visual: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub secondary: SecondaryGroups,
    pub captions: Vec<CaptionDescriptor>,
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
    #[serde(default)]
    pub layout: LayoutHints,
}

impl SceneDescriptor {
    #[must_use]
    pub fn new(key: impl Into<String>, visual: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            visual: visual.into(),
            title: None,
            secondary: SecondaryGroups::default(),
            captions: Vec::new(),
            actions: Vec::new(),
            layout: LayoutHints::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Appends a caption, assigning the next index.
    #[must_use]
    pub fn with_caption(mut self, caption: CaptionDescriptor) -> Self {
        let index = self.captions.len();
        self.captions.push(CaptionDescriptor { index, ..caption });
        self
    }

    #[must_use]
    pub fn with_action(mut self, trigger_caption_index: usize, call: CapabilityCall) -> Self {
        self.actions.push(ActionDescriptor {
            trigger_caption_index,
            call,
        });
        self
    }

    #[must_use]
    pub fn with_axes(mut self, group: SecondaryGroup) -> Self {
        self.secondary.axes = Some(group);
        self
    }

    #[must_use]
    pub fn with_helper(mut self, group: SecondaryGroup) -> Self {
        self.secondary.helper = Some(group);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutHints) -> Self {
        self.layout = layout;
        self
    }

    /// Scroll span of the scene in viewport heights.
    #[must_use]
    pub fn scroll_screens(&self) -> f64 {
        self.layout
            .scroll_screens
            .unwrap_or(self.captions.len() as f64)
            .max(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionDescriptor {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub side: CaptionSide,
    #[serde(default)]
    pub content: String,
    /// Scene-relative scroll fraction where the caption starts fading in.
    #[serde(default)]
    pub fade_in_fraction: Option<f64>,
    /// Scene-relative scroll fraction where the caption starts fading out.
    #[serde(default)]
    pub fade_out_fraction: Option<f64>,
    #[serde(default)]
    pub reveal_from_idx: Option<usize>,
    #[serde(default)]
    pub reveal_to_idx: Option<usize>,
}

impl CaptionDescriptor {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            index: 0,
            side: CaptionSide::None,
            content: content.into(),
            fade_in_fraction: None,
            fade_out_fraction: None,
            reveal_from_idx: None,
            reveal_to_idx: None,
        }
    }

    #[must_use]
    pub fn on_side(mut self, side: CaptionSide) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub fn fading(mut self, fade_in: f64, fade_out: Option<f64>) -> Self {
        self.fade_in_fraction = Some(fade_in);
        self.fade_out_fraction = fade_out;
        self
    }
}

/// Capability call fired when the scroll crosses the trigger caption's beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub trigger_caption_index: usize,
    pub call: CapabilityCall,
}

/// Descendant element group of a mounted visualization faded in at a beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryGroup {
    pub selector: String,
    #[serde(default)]
    pub reveal_at: Option<usize>,
    #[serde(default)]
    pub hide_at: Option<usize>,
}

impl SecondaryGroup {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            reveal_at: None,
            hide_at: None,
        }
    }

    #[must_use]
    pub fn revealed_between(mut self, reveal_at: usize, hide_at: Option<usize>) -> Self {
        self.reveal_at = Some(reveal_at);
        self.hide_at = hide_at;
        self
    }

    #[must_use]
    pub fn is_no_match(&self) -> bool {
        self.selector.trim() == NO_MATCH
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SecondaryGroups {
    #[serde(default)]
    pub axes: Option<SecondaryGroup>,
    #[serde(default)]
    pub helper: Option<SecondaryGroup>,
}

/// Horizontal placement requested for the visualization box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredSide {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LayoutHints {
    #[serde(default)]
    pub preferred_side: Option<PreferredSide>,
    /// Captions use the wide box width.
    #[serde(default)]
    pub wide: bool,
    /// Visualization spans the whole container and never shifts.
    #[serde(default)]
    pub fullscreen: bool,
    #[serde(default)]
    pub scroll_screens: Option<f64>,
    #[serde(default)]
    pub prefetch_margin_px: Option<f64>,
    /// Whether the shared ambient overlay is shown while this scene is active.
    #[serde(default)]
    pub snow_visible: bool,
}
