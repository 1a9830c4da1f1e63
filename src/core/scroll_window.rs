use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Scroll-offset interval, in page pixels, that a binding reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollWindow {
    pub start: f64,
    pub end: f64,
}

/// Boundary crossing reported when scroll moves from one offset to another.
///
/// Naming follows scroll-trigger conventions: `Enter`/`Leave` happen while
/// scrolling forward, `EnterBack`/`LeaveBack` while scrolling backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

impl Crossing {
    /// Ordering among crossings that share a boundary position.
    #[must_use]
    pub(crate) fn tie_rank(self) -> u8 {
        match self {
            Self::Enter | Self::EnterBack => 0,
            Self::Leave | Self::LeaveBack => 1,
        }
    }
}

impl ScrollWindow {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    #[must_use]
    pub fn point(at: f64) -> Self {
        Self { start: at, end: at }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, scroll: f64) -> bool {
        scroll >= self.start && scroll < self.end
    }

    /// Linear progress of `scroll` through the window, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(self, scroll: f64) -> f64 {
        let length = self.length();
        if length <= 0.0 {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / length).clamp(0.0, 1.0)
    }

    /// Crossings produced by moving from `from` to `to`, each paired with the
    /// boundary position it happened at, in travel order.
    #[must_use]
    pub fn crossings(self, from: f64, to: f64) -> SmallVec<[(Crossing, f64); 2]> {
        let mut out = SmallVec::new();
        if to > from {
            if from < self.start && to >= self.start {
                out.push((Crossing::Enter, self.start));
            }
            if from < self.end && to >= self.end {
                out.push((Crossing::Leave, self.end));
            }
        } else if to < from {
            if from >= self.end && to < self.end {
                out.push((Crossing::EnterBack, self.end));
            }
            if from >= self.start && to < self.start {
                out.push((Crossing::LeaveBack, self.start));
            }
        }
        out
    }

    /// Crossings implied when the window itself moves to `moved` while the
    /// page stays at `scroll`.
    ///
    /// An edge counts as passed once `scroll >= edge`, matching [`Self::crossings`].
    #[must_use]
    pub fn relocation_crossings(self, moved: Self, scroll: f64) -> SmallVec<[Crossing; 2]> {
        let passed = |edge: f64| scroll >= edge;
        let mut out = SmallVec::new();
        match (passed(self.start), passed(moved.start)) {
            (false, true) => out.push(Crossing::Enter),
            (true, false) => {
                if passed(self.end) && !passed(moved.end) {
                    out.push(Crossing::EnterBack);
                }
                out.push(Crossing::LeaveBack);
                return out;
            }
            _ => {}
        }
        match (passed(self.end), passed(moved.end)) {
            (false, true) => out.push(Crossing::Leave),
            (true, false) => out.push(Crossing::EnterBack),
            _ => {}
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Crossing, ScrollWindow};

    #[test]
    fn forward_jump_over_window_enters_then_leaves() {
        let window = ScrollWindow::new(100.0, 200.0);
        let crossings = window.crossings(0.0, 500.0);
        assert_eq!(
            crossings.as_slice(),
            &[(Crossing::Enter, 100.0), (Crossing::Leave, 200.0)]
        );
    }

    #[test]
    fn backward_jump_over_window_enters_back_then_leaves_back() {
        let window = ScrollWindow::new(100.0, 200.0);
        let crossings = window.crossings(500.0, 0.0);
        assert_eq!(
            crossings.as_slice(),
            &[(Crossing::EnterBack, 200.0), (Crossing::LeaveBack, 100.0)]
        );
    }

    #[test]
    fn point_window_reports_both_edges() {
        let window = ScrollWindow::point(50.0);
        assert_eq!(window.crossings(0.0, 50.0).len(), 2);
        assert_eq!(window.crossings(50.0, 49.0).len(), 2);
        assert!(window.crossings(51.0, 60.0).is_empty());
    }

    #[test]
    fn relocating_a_window_reports_the_edges_that_moved_past_scroll() {
        let window = ScrollWindow::new(100.0, 200.0);
        assert_eq!(
            window
                .relocation_crossings(ScrollWindow::new(20.0, 40.0), 50.0)
                .as_slice(),
            &[Crossing::Enter, Crossing::Leave]
        );
        assert_eq!(
            ScrollWindow::new(20.0, 40.0)
                .relocation_crossings(window, 50.0)
                .as_slice(),
            &[Crossing::EnterBack, Crossing::LeaveBack]
        );
        assert_eq!(
            window
                .relocation_crossings(ScrollWindow::new(40.0, 120.0), 50.0)
                .as_slice(),
            &[Crossing::Enter]
        );
        assert!(
            window
                .relocation_crossings(ScrollWindow::new(300.0, 400.0), 50.0)
                .is_empty()
        );
        assert_eq!(
            ScrollWindow::point(60.0)
                .relocation_crossings(ScrollWindow::point(40.0), 50.0)
                .as_slice(),
            &[Crossing::Enter, Crossing::Leave]
        );
    }

    #[test]
    fn progress_clamps_and_handles_empty_windows() {
        let window = ScrollWindow::new(0.0, 100.0);
        assert_eq!(window.progress(-10.0), 0.0);
        assert_eq!(window.progress(50.0), 0.5);
        assert_eq!(window.progress(1_000.0), 1.0);
        assert_eq!(ScrollWindow::point(10.0).progress(10.0), 1.0);
    }
}
