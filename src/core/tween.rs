//! Frame-stepped tweens.
//!
//! Every tween separates its *target* from the value committed to the frame.
//! Hosts retarget between frames; `step` only moves the committed value.

use crate::core::ease::Ease;

const SETTLE_EPSILON: f64 = 1e-4;

/// Scroll-scrubbed progress that trails its target by a lag.
///
/// With no lag the playhead jumps straight to the scroll-derived target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrubPlayhead {
    target: f64,
    current: f64,
}

impl ScrubPlayhead {
    #[must_use]
    pub fn new(progress: f64) -> Self {
        Self {
            target: progress,
            current: progress,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn current(self) -> f64 {
        self.current
    }

    pub fn step(&mut self, delta_seconds: f64, lag_seconds: Option<f64>) {
        match lag_seconds {
            Some(lag) if lag > 0.0 && delta_seconds.is_finite() => {
                // Roughly 95% of the distance is covered after `lag` seconds.
                let alpha = 1.0 - (-3.0 * delta_seconds.max(0.0) / lag).exp();
                self.current += (self.target - self.current) * alpha;
                if (self.target - self.current).abs() < SETTLE_EPSILON {
                    self.current = self.target;
                }
            }
            _ => self.current = self.target,
        }
    }

    pub fn settle(&mut self) {
        self.current = self.target;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToggleDirection {
    Idle,
    Forward,
    Reverse,
}

/// Timed 0 → 1 tween that can be played forward or reversed from where it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleTween {
    progress: f64,
    direction: ToggleDirection,
    duration_seconds: f64,
    ease: Ease,
}

impl ToggleTween {
    #[must_use]
    pub fn new(duration_seconds: f64, ease: Ease) -> Self {
        Self {
            progress: 0.0,
            direction: ToggleDirection::Idle,
            duration_seconds,
            ease,
        }
    }

    pub fn play(&mut self) {
        self.direction = ToggleDirection::Forward;
    }

    pub fn reverse(&mut self) {
        self.direction = ToggleDirection::Reverse;
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.direction = ToggleDirection::Idle;
    }

    #[must_use]
    pub fn progress(self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.ease.apply(self.progress)
    }

    #[must_use]
    pub fn is_running(self) -> bool {
        self.direction != ToggleDirection::Idle
    }

    pub fn step(&mut self, delta_seconds: f64) {
        let delta = if self.duration_seconds > 0.0 {
            delta_seconds.max(0.0) / self.duration_seconds
        } else {
            1.0
        };
        match self.direction {
            ToggleDirection::Idle => {}
            ToggleDirection::Forward => {
                self.progress = (self.progress + delta).min(1.0);
                if self.progress >= 1.0 {
                    self.direction = ToggleDirection::Idle;
                }
            }
            ToggleDirection::Reverse => {
                self.progress = (self.progress - delta).max(0.0);
                if self.progress <= 0.0 {
                    self.direction = ToggleDirection::Idle;
                }
            }
        }
    }

    pub fn settle(&mut self) {
        match self.direction {
            ToggleDirection::Idle => {}
            ToggleDirection::Forward => self.progress = 1.0,
            ToggleDirection::Reverse => self.progress = 0.0,
        }
        self.direction = ToggleDirection::Idle;
    }
}

/// Timed tween toward a numeric target, restarted from the committed value on retarget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueTween {
    from: f64,
    to: f64,
    current: f64,
    elapsed_seconds: f64,
    duration_seconds: f64,
    ease: Ease,
}

impl ValueTween {
    #[must_use]
    pub fn new(value: f64, duration_seconds: f64, ease: Ease) -> Self {
        Self {
            from: value,
            to: value,
            current: value,
            elapsed_seconds: duration_seconds,
            duration_seconds,
            ease,
        }
    }

    /// Starts animating toward `to` unless it is already the target.
    pub fn retarget(&mut self, to: f64) {
        if (self.to - to).abs() < SETTLE_EPSILON {
            return;
        }
        self.from = self.current;
        self.to = to;
        self.elapsed_seconds = 0.0;
    }

    pub fn jump_to(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.current = value;
        self.elapsed_seconds = self.duration_seconds;
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.current
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn is_running(self) -> bool {
        self.elapsed_seconds < self.duration_seconds
    }

    pub fn step(&mut self, delta_seconds: f64) {
        if !self.is_running() {
            self.current = self.to;
            return;
        }
        self.elapsed_seconds =
            (self.elapsed_seconds + delta_seconds.max(0.0)).min(self.duration_seconds);
        let t = if self.duration_seconds > 0.0 {
            self.elapsed_seconds / self.duration_seconds
        } else {
            1.0
        };
        self.current = self.from + (self.to - self.from) * self.ease.apply(t);
    }

    pub fn settle(&mut self) {
        self.jump_to(self.to);
    }
}

#[cfg(test)]
mod tests {
    use super::{ScrubPlayhead, ToggleTween, ValueTween};
    use crate::core::ease::Ease;

    #[test]
    fn scrub_without_lag_tracks_target_immediately() {
        let mut playhead = ScrubPlayhead::new(0.0);
        playhead.set_target(0.75);
        playhead.step(0.016, None);
        assert_eq!(playhead.current(), 0.75);
    }

    #[test]
    fn scrub_with_lag_converges() {
        let mut playhead = ScrubPlayhead::new(0.0);
        playhead.set_target(1.0);
        playhead.step(0.016, Some(0.3));
        assert!(playhead.current() > 0.0 && playhead.current() < 1.0);
        for _ in 0..200 {
            playhead.step(0.016, Some(0.3));
        }
        assert_eq!(playhead.current(), 1.0);
    }

    #[test]
    fn toggle_reverses_from_current_progress() {
        let mut tween = ToggleTween::new(0.4, Ease::Linear);
        tween.play();
        tween.step(0.2);
        assert!((tween.progress() - 0.5).abs() < 1e-9);
        tween.reverse();
        tween.step(0.1);
        assert!((tween.progress() - 0.25).abs() < 1e-9);
        tween.settle();
        assert_eq!(tween.progress(), 0.0);
        assert!(!tween.is_running());
    }

    #[test]
    fn value_tween_retarget_starts_from_committed_value() {
        let mut tween = ValueTween::new(0.0, 0.5, Ease::Linear);
        tween.retarget(100.0);
        tween.step(0.25);
        assert!((tween.value() - 50.0).abs() < 1e-9);
        tween.retarget(-100.0);
        tween.step(0.25);
        assert!((tween.value() - (-25.0)).abs() < 1e-9);
        tween.settle();
        assert_eq!(tween.value(), -100.0);
    }
}
