use serde::{Deserialize, Serialize};

use crate::core::{CaptionSide, GroupStatus, ScenePhase, SecondaryGroupKind, Viewport};
use crate::error::{SceneError, SceneResult};

/// Backend-agnostic state of the whole story for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryFrame {
    pub viewport: Viewport,
    pub scroll_position: f64,
    pub ambient: AmbientFrame,
    pub scenes: Vec<SceneFrame>,
}

/// Shared decorative overlay behind every scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientFrame {
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub key: String,
    pub phase: ScenePhase,
    /// Page offset of the section top.
    pub top: f64,
    pub height: f64,
    pub layer: LayerFrame,
    pub visual: VisualSlotFrame,
    pub captions: Vec<CaptionFrame>,
    pub groups: Vec<GroupFrame>,
}

/// The viewport-fixed layer holding a scene's visualization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerFrame {
    pub visible: bool,
    pub opacity: f64,
}

/// Visualization box inside the layer. Unmounted slots keep their size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualSlotFrame {
    pub mounted: bool,
    pub width: f64,
    pub offset_x: f64,
    pub stacked: bool,
    pub fullscreen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionFrame {
    pub index: usize,
    pub side: CaptionSide,
    pub width: f64,
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupFrame {
    pub kind: SecondaryGroupKind,
    pub status: GroupStatus,
    pub matched: usize,
    pub opacity: f64,
}

impl StoryFrame {
    #[must_use]
    pub fn new(viewport: Viewport, scroll_position: f64) -> Self {
        Self {
            viewport,
            scroll_position,
            ambient: AmbientFrame { opacity: 0.0 },
            scenes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_scene(mut self, scene: SceneFrame) -> Self {
        self.scenes.push(scene);
        self
    }

    #[must_use]
    pub fn visible_layer_count(&self) -> usize {
        self.scenes.iter().filter(|scene| scene.layer.visible).count()
    }

    #[must_use]
    pub fn caption_count(&self) -> usize {
        self.scenes.iter().map(|scene| scene.captions.len()).sum()
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !self.viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.scroll_position.is_finite() {
            return Err(SceneError::InvalidData(
                "frame scroll position must be finite".to_owned(),
            ));
        }
        validate_opacity("ambient", self.ambient.opacity)?;

        for scene in &self.scenes {
            scene.validate()?;
        }

        let visible = self.visible_layer_count();
        if visible > 1 {
            return Err(SceneError::InvalidData(format!(
                "{visible} visualization layers are visible at once"
            )));
        }
        Ok(())
    }
}

impl SceneFrame {
    fn validate(&self) -> SceneResult<()> {
        for (name, value) in [
            ("top", self.top),
            ("height", self.height),
            ("visual width", self.visual.width),
            ("visual offset", self.visual.offset_x),
        ] {
            if !value.is_finite() {
                return Err(SceneError::InvalidData(format!(
                    "scene `{}` {name} must be finite",
                    self.key
                )));
            }
        }
        if self.visual.width < 0.0 || self.height < 0.0 {
            return Err(SceneError::InvalidData(format!(
                "scene `{}` has a negative size",
                self.key
            )));
        }
        validate_opacity(&self.key, self.layer.opacity)?;
        for caption in &self.captions {
            validate_opacity(&self.key, caption.opacity)?;
            if !caption.translate_x.is_finite()
                || !caption.translate_y.is_finite()
                || !caption.width.is_finite()
            {
                return Err(SceneError::InvalidData(format!(
                    "scene `{}` caption {} has a non-finite transform",
                    self.key, caption.index
                )));
            }
        }
        for group in &self.groups {
            validate_opacity(&self.key, group.opacity)?;
        }
        Ok(())
    }
}

fn validate_opacity(owner: &str, opacity: f64) -> SceneResult<()> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(SceneError::InvalidData(format!(
            "`{owner}` opacity {opacity} is outside [0, 1]"
        )));
    }
    Ok(())
}
