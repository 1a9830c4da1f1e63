use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScrollDirection {
    #[default]
    Idle,
    Forward,
    Backward,
}

/// Movement between two consecutive scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollStep {
    pub from: f64,
    pub to: f64,
}

impl ScrollStep {
    #[must_use]
    pub fn direction(self) -> ScrollDirection {
        if self.to > self.from {
            ScrollDirection::Forward
        } else if self.to < self.from {
            ScrollDirection::Backward
        } else {
            ScrollDirection::Idle
        }
    }
}

/// Page scroll position as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    position: f64,
    direction: ScrollDirection,
}

impl ScrollState {
    #[must_use]
    pub fn position(self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn direction(self) -> ScrollDirection {
        self.direction
    }

    /// Records a new offset and returns the step taken, or `None` when unchanged.
    pub fn on_scroll(&mut self, position: f64) -> Option<ScrollStep> {
        let step = ScrollStep {
            from: self.position,
            to: position,
        };
        let direction = step.direction();
        if direction == ScrollDirection::Idle {
            return None;
        }
        self.position = position;
        self.direction = direction;
        Some(step)
    }
}
