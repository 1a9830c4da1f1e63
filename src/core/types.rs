use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// Side of the viewport a caption box is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptionSide {
    Left,
    Right,
    Center,
    #[default]
    None,
}

impl CaptionSide {
    /// Direction the visualization moves to make room for a caption on this side.
    #[must_use]
    pub fn yielding_direction(self) -> Option<ShiftDirection> {
        match self {
            Self::Left => Some(ShiftDirection::Right),
            Self::Right => Some(ShiftDirection::Left),
            Self::Center | Self::None => None,
        }
    }

    /// Signed lateral offset a caption slides in from.
    #[must_use]
    pub fn entry_sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            Self::Center | Self::None => 0.0,
        }
    }
}

/// Horizontal direction the visualization box is shifted toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    Left,
    Right,
    #[default]
    Center,
}

impl ShiftDirection {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            Self::Center => 0.0,
        }
    }
}

/// Closed horizontal pixel interval in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub left: f64,
    pub right: f64,
}

impl Span {
    #[must_use]
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.left + self.right) * 0.5
    }

    /// Length of the overlap with `other`, zero when disjoint.
    #[must_use]
    pub fn overlap(self, other: Self) -> f64 {
        (self.right.min(other.right) - self.left.max(other.left)).max(0.0)
    }
}

/// Lifecycle phase of one scene instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScenePhase {
    /// Not mounted, or mounted but scrolled well away.
    #[default]
    Dormant,
    /// Mounted and near the viewport, layer still hidden.
    Priming,
    /// Owns the fixed visualization layer.
    Active,
}

/// Named group of secondary elements inside a visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryGroupKind {
    Axes,
    Helper,
}

impl SecondaryGroupKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Axes => "axes",
            Self::Helper => "helper",
        }
    }
}

/// Readiness of a secondary element group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    /// Sentinel selector; the group does not exist in this scene.
    Disabled,
    /// Polling for the selector to match after mount.
    Waiting,
    Bound,
    /// Gave up after the poll budget ran out.
    Absent,
}
