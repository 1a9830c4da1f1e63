use serde::{Deserialize, Serialize};

use crate::core::types::{ShiftDirection, Span};
use crate::error::{SceneError, SceneResult};

const SAFETY_MARGIN_MIN_PX: f64 = 160.0;
const SAFETY_MARGIN_RATIO: f64 = 0.08;
const STACK_THRESHOLD_RATIO: f64 = 0.8;
const STACKED_WIDTH_RATIO: f64 = 0.82;
const SIDE_BY_SIDE_WIDTH_RATIO: f64 = 0.58;
const EDGE_LIMIT_MIN_PX: f64 = 48.0;
const EDGE_LIMIT_RATIO: f64 = 0.05;

/// Sizing knobs for the visualization box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    #[serde(default = "default_min_vis_width_px")]
    pub min_vis_width_px: f64,
    #[serde(default = "default_max_vis_width_px")]
    pub max_vis_width_px: f64,
    /// Width reserved for fixed side UI (progress rail) on the right edge.
    #[serde(default = "default_gutter_width_px")]
    pub gutter_width_px: f64,
    #[serde(default = "default_caption_margin_px")]
    pub caption_margin_px: f64,
    #[serde(default = "default_shift_factor")]
    pub shift_factor: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_vis_width_px: default_min_vis_width_px(),
            max_vis_width_px: default_max_vis_width_px(),
            gutter_width_px: default_gutter_width_px(),
            caption_margin_px: default_caption_margin_px(),
            shift_factor: default_shift_factor(),
        }
    }
}

impl GeometryConfig {
    pub fn validate(self) -> SceneResult<Self> {
        for (name, value) in [
            ("min_vis_width_px", self.min_vis_width_px),
            ("max_vis_width_px", self.max_vis_width_px),
            ("gutter_width_px", self.gutter_width_px),
            ("caption_margin_px", self.caption_margin_px),
            ("shift_factor", self.shift_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::InvalidData(format!(
                    "geometry `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.min_vis_width_px <= 0.0 || self.min_vis_width_px > self.max_vis_width_px {
            return Err(SceneError::InvalidData(
                "geometry visualization width bounds must satisfy 0 < min <= max".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_min_vis_width_px() -> f64 {
    520.0
}

fn default_max_vis_width_px() -> f64 {
    960.0
}

fn default_gutter_width_px() -> f64 {
    160.0
}

fn default_caption_margin_px() -> f64 {
    24.0
}

fn default_shift_factor() -> f64 {
    0.6
}

/// Measured widths and the stacking decision derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBounds {
    pub container_width: f64,
    pub max_caption_width: f64,
    pub gutter_width: f64,
    pub available_width: f64,
    pub stacked: bool,
}

/// Caption box used to resolve a shift toward one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftRequest {
    pub direction: ShiftDirection,
    pub caption_width: f64,
    /// Caption bounding box in container coordinates, when known.
    pub caption_box: Option<Span>,
}

impl ShiftRequest {
    #[must_use]
    pub fn new(direction: ShiftDirection, caption_width: f64) -> Self {
        Self {
            direction,
            caption_width,
            caption_box: None,
        }
    }

    #[must_use]
    pub fn with_caption_box(mut self, caption_box: Span) -> Self {
        self.caption_box = Some(caption_box);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGeometry {
    pub bounds: LayoutBounds,
    pub vis_width: f64,
    config: GeometryConfig,
}

/// Decides stacking and visualization width for the given measurements.
///
/// Non-finite or negative caption widths are treated as zero.
#[must_use]
pub fn resolve_geometry(
    container_width: f64,
    caption_widths: &[f64],
    config: GeometryConfig,
) -> ResolvedGeometry {
    let container_width = sanitize(container_width);
    let max_caption_width = caption_widths
        .iter()
        .copied()
        .map(sanitize)
        .fold(0.0, f64::max);
    let safety_margin = SAFETY_MARGIN_MIN_PX.max(container_width * SAFETY_MARGIN_RATIO);
    let available_width =
        container_width - (max_caption_width + config.gutter_width_px + safety_margin);
    let min = config.min_vis_width_px;
    let max = config.max_vis_width_px;
    let stacked = available_width < min * STACK_THRESHOLD_RATIO;

    let vis_width = if stacked {
        clamp_to_bounds(container_width * STACKED_WIDTH_RATIO, min, max)
    } else {
        let preferred = clamp_to_bounds(container_width * SIDE_BY_SIDE_WIDTH_RATIO, min, max);
        clamp_to_bounds(preferred.min(available_width), min, max)
    };

    ResolvedGeometry {
        bounds: LayoutBounds {
            container_width,
            max_caption_width,
            gutter_width: config.gutter_width_px,
            available_width,
            stacked,
        },
        vis_width,
        config,
    }
}

impl ResolvedGeometry {
    #[must_use]
    pub fn stacked(&self) -> bool {
        self.bounds.stacked
    }

    /// Gap between a centered visualization box and each container edge.
    #[must_use]
    pub fn symmetric_gap(&self) -> f64 {
        (self.bounds.container_width - self.vis_width) * 0.5
    }

    /// Visualization box in container coordinates for a given shift.
    #[must_use]
    pub fn vis_box(&self, shift: f64) -> Span {
        let left = self.symmetric_gap() + shift;
        Span::new(left, left + self.vis_width)
    }

    /// Signed horizontal offset that moves the box toward `request.direction`.
    #[must_use]
    pub fn shift(&self, request: ShiftRequest) -> f64 {
        if self.bounds.stacked || request.direction == ShiftDirection::Center {
            return 0.0;
        }

        let width = self.bounds.container_width;
        let gap = self.symmetric_gap();
        let sign = request.direction.sign();
        let mut magnitude = (gap * self.config.shift_factor)
            .max(sanitize(request.caption_width) * 0.5 + self.config.caption_margin_px);

        if let Some(caption_box) = request.caption_box {
            let caption_ahead = sign * (caption_box.center() - width * 0.5) > 0.0;
            if caption_ahead {
                let overlap = self.vis_box(sign * magnitude).overlap(caption_box);
                magnitude = (magnitude - overlap).max(0.0);
            }
        }
        let mut shift = sign * magnitude;

        let edge_limit = EDGE_LIMIT_MIN_PX.max(width * EDGE_LIMIT_RATIO);
        let right_limit = width - self.bounds.gutter_width - edge_limit;
        let lo = edge_limit - gap;
        let hi = right_limit - width + gap;
        shift = if lo <= hi {
            shift.clamp(lo, hi)
        } else {
            (lo + hi) * 0.5
        };

        if gap >= 0.0 {
            shift.clamp(-gap, gap)
        } else {
            0.0
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn clamp_to_bounds(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
