use serde::{Deserialize, Serialize};

use crate::core::{Ease, GeometryConfig, Viewport};
use crate::error::{SceneError, SceneResult};

/// Caption pacing expressed as fractions of a scene's scroll span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Fade-in start step per caption index when no explicit fraction is given.
    #[serde(default = "default_caption_step_fraction")]
    pub caption_step_fraction: f64,
    #[serde(default = "default_entry_duration_fraction")]
    pub entry_duration_fraction: f64,
    #[serde(default = "default_exit_duration_fraction")]
    pub exit_duration_fraction: f64,
    /// Lateral and vertical distance a caption slides in from.
    #[serde(default = "default_caption_offset_px")]
    pub caption_offset_px: f64,
    /// Time the scrubbed caption playheads take to catch up with scroll.
    #[serde(default = "default_scrub_lag_seconds")]
    pub scrub_lag_seconds: Option<f64>,
    #[serde(default)]
    pub caption_ease: Ease,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            caption_step_fraction: default_caption_step_fraction(),
            entry_duration_fraction: default_entry_duration_fraction(),
            exit_duration_fraction: default_exit_duration_fraction(),
            caption_offset_px: default_caption_offset_px(),
            scrub_lag_seconds: default_scrub_lag_seconds(),
            caption_ease: Ease::Power2Out,
        }
    }
}

/// Secondary-group fade and selector polling limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_reveal_fade_seconds")]
    pub fade_seconds: f64,
    /// Frames to poll for a selector after mount before giving up on it.
    #[serde(default = "default_max_poll_frames")]
    pub max_poll_frames: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            fade_seconds: default_reveal_fade_seconds(),
            max_poll_frames: default_max_poll_frames(),
        }
    }
}

/// Layer, shift and ambient motion timings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default = "default_shift_seconds")]
    pub shift_seconds: f64,
    #[serde(default = "default_ambient_fade_seconds")]
    pub ambient_fade_seconds: f64,
    /// Viewport heights above the scene bottom where the layer starts fading out.
    #[serde(default = "default_layer_exit_start_viewports")]
    pub layer_exit_start_viewports: f64,
    /// Viewport heights above the scene bottom where the layer is gone and the scene leaves.
    #[serde(default = "default_layer_exit_end_viewports")]
    pub layer_exit_end_viewports: f64,
    /// The visualization slides off center once the scene top passes this viewport fraction.
    #[serde(default = "default_side_slide_viewport_fraction")]
    pub side_slide_viewport_fraction: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            shift_seconds: default_shift_seconds(),
            ambient_fade_seconds: default_ambient_fade_seconds(),
            layer_exit_start_viewports: default_layer_exit_start_viewports(),
            layer_exit_end_viewports: default_layer_exit_end_viewports(),
            side_slide_viewport_fraction: default_side_slide_viewport_fraction(),
        }
    }
}

/// Caption box measurements used until the host reports real ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionBoxConfig {
    #[serde(default = "default_caption_width_px")]
    pub default_width_px: f64,
    #[serde(default = "default_wide_caption_width_px")]
    pub wide_width_px: f64,
    /// Distance between a sided caption box and its container edge.
    #[serde(default = "default_caption_inset_px")]
    pub inset_px: f64,
}

impl Default for CaptionBoxConfig {
    fn default() -> Self {
        Self {
            default_width_px: default_caption_width_px(),
            wide_width_px: default_wide_caption_width_px(),
            inset_px: default_caption_inset_px(),
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can ship it next to the scene registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoryEngineConfig {
    pub viewport: Viewport,
    /// Page offset of the first scene's top edge.
    #[serde(default)]
    pub story_top_px: f64,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub captions: CaptionBoxConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub motion: MotionConfig,
}

impl StoryEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            story_top_px: 0.0,
            geometry: GeometryConfig::default(),
            captions: CaptionBoxConfig::default(),
            timeline: TimelineConfig::default(),
            reveal: RevealConfig::default(),
            motion: MotionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_story_top(mut self, story_top_px: f64) -> Self {
        self.story_top_px = story_top_px;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_timeline(mut self, timeline: TimelineConfig) -> Self {
        self.timeline = timeline;
        self
    }

    #[must_use]
    pub fn with_reveal(mut self, reveal: RevealConfig) -> Self {
        self.reveal = reveal;
        self
    }

    #[must_use]
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Disables scrub smoothing so caption state is a pure function of scroll.
    #[must_use]
    pub fn without_scrub_lag(mut self) -> Self {
        self.timeline.scrub_lag_seconds = None;
        self
    }

    pub fn to_json_pretty(&self) -> SceneResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SceneError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> SceneResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| SceneError::InvalidData(format!("failed to parse config: {e}")))
    }

    pub(super) fn validate(self) -> SceneResult<Self> {
        if !self.viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.geometry.validate()?;
        if let Some(lag) = self.timeline.scrub_lag_seconds {
            if !lag.is_finite() || lag < 0.0 {
                return Err(SceneError::InvalidData(
                    "timeline scrub_lag_seconds must be finite and >= 0".to_owned(),
                ));
            }
        }
        for (name, value) in [
            ("story_top_px", self.story_top_px),
            ("captions.default_width_px", self.captions.default_width_px),
            ("captions.wide_width_px", self.captions.wide_width_px),
            ("captions.inset_px", self.captions.inset_px),
            (
                "timeline.caption_step_fraction",
                self.timeline.caption_step_fraction,
            ),
            (
                "timeline.entry_duration_fraction",
                self.timeline.entry_duration_fraction,
            ),
            (
                "timeline.exit_duration_fraction",
                self.timeline.exit_duration_fraction,
            ),
            ("timeline.caption_offset_px", self.timeline.caption_offset_px),
            ("reveal.fade_seconds", self.reveal.fade_seconds),
            ("motion.shift_seconds", self.motion.shift_seconds),
            ("motion.ambient_fade_seconds", self.motion.ambient_fade_seconds),
            (
                "motion.layer_exit_start_viewports",
                self.motion.layer_exit_start_viewports,
            ),
            (
                "motion.layer_exit_end_viewports",
                self.motion.layer_exit_end_viewports,
            ),
            (
                "motion.side_slide_viewport_fraction",
                self.motion.side_slide_viewport_fraction,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::InvalidData(format!(
                    "config `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.motion.layer_exit_start_viewports < self.motion.layer_exit_end_viewports {
            return Err(SceneError::InvalidData(
                "motion layer exit must start above where it ends".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_caption_step_fraction() -> f64 {
    0.05
}

fn default_entry_duration_fraction() -> f64 {
    0.08
}

fn default_exit_duration_fraction() -> f64 {
    0.08
}

fn default_caption_offset_px() -> f64 {
    64.0
}

fn default_scrub_lag_seconds() -> Option<f64> {
    Some(0.3)
}

fn default_reveal_fade_seconds() -> f64 {
    0.4
}

fn default_max_poll_frames() -> u32 {
    600
}

fn default_shift_seconds() -> f64 {
    0.5
}

fn default_ambient_fade_seconds() -> f64 {
    0.6
}

fn default_layer_exit_start_viewports() -> f64 {
    1.3
}

fn default_layer_exit_end_viewports() -> f64 {
    0.9
}

fn default_side_slide_viewport_fraction() -> f64 {
    0.1
}

fn default_caption_width_px() -> f64 {
    320.0
}

fn default_wide_caption_width_px() -> f64 {
    640.0
}

fn default_caption_inset_px() -> f64 {
    40.0
}
