use serde::{Deserialize, Serialize};

/// Easing curves used by caption, reveal and shift tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// No easing; progress maps 1:1.
    Linear,
    /// Quadratic ease-out.
    #[default]
    Power2Out,
    /// Quadratic ease-in.
    Power2In,
    /// Quadratic ease-in/out.
    Power2InOut,
    /// Cubic ease-out.
    Power3Out,
}

impl Ease {
    /// Applies this curve to normalized progress `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Self::Power2In => t * t,
            Self::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::Power3Out => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Ease;

    #[test]
    fn curves_hit_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::Power2Out,
            Ease::Power2In,
            Ease::Power2InOut,
            Ease::Power3Out,
        ] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            assert_eq!(ease.apply(-3.0), 0.0);
            assert_eq!(ease.apply(7.0), 1.0);
        }
    }

    #[test]
    fn power2_out_front_loads_progress() {
        assert!(Ease::Power2Out.apply(0.5) > 0.5);
        assert!(Ease::Power2In.apply(0.5) < 0.5);
    }
}
