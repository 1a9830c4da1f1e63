use serde::{Deserialize, Serialize};

use crate::core::{CaptionSide, ScrollWindow, ScrubPlayhead};

use super::{CaptionDescriptor, SceneLayout, TimelineConfig};

/// Scroll windows of one caption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionWindows {
    pub entry: ScrollWindow,
    pub exit: Option<ScrollWindow>,
}

impl CaptionWindows {
    /// Beat at which the caption starts to appear.
    #[must_use]
    pub fn beat(self) -> f64 {
        self.entry.start
    }

    /// Window covered by both tweens.
    #[must_use]
    pub fn full_window(self) -> ScrollWindow {
        let end = self.exit.map_or(self.entry.end, |exit| exit.end);
        ScrollWindow::new(self.entry.start, end)
    }
}

/// Resolved visual state of one caption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionVisual {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

/// Computes every caption's windows for a scene placed at `layout`.
#[must_use]
pub fn caption_windows(
    captions: &[CaptionDescriptor],
    layout: SceneLayout,
    timeline: TimelineConfig,
) -> Vec<CaptionWindows> {
    let entry_length = timeline.entry_duration_fraction * layout.span;
    let exit_length = timeline.exit_duration_fraction * layout.span;
    captions
        .iter()
        .map(|caption| {
            let fade_in = caption
                .fade_in_fraction
                .unwrap_or(caption.index as f64 * timeline.caption_step_fraction);
            let start = layout.at_fraction(fade_in);
            let exit = caption.fade_out_fraction.map(|fade_out| {
                let exit_start = layout.at_fraction(fade_out);
                ScrollWindow::new(exit_start, exit_start + exit_length)
            });
            CaptionWindows {
                entry: ScrollWindow::new(start, start + entry_length),
                exit,
            }
        })
        .collect()
}

/// Scroll offset at which caption `index` is considered done.
///
/// That is the end of its fade-out when it has one, otherwise the next
/// caption's beat, otherwise the end of the narrative span.
#[must_use]
pub fn caption_exit_point(windows: &[CaptionWindows], index: usize, layout: SceneLayout) -> f64 {
    if let Some(exit) = windows.get(index).and_then(|caption| caption.exit) {
        return exit.end;
    }
    windows
        .get(index + 1)
        .map_or(layout.narrative_end(), |next| next.beat())
}

/// Scrubbed caption tweens of one scene.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CaptionTimeline {
    tracks: Vec<CaptionTrack>,
    timeline: TimelineConfig,
}

#[derive(Debug, Clone, PartialEq)]
struct CaptionTrack {
    side: CaptionSide,
    windows: CaptionWindows,
    entry: ScrubPlayhead,
    exit: ScrubPlayhead,
}

impl CaptionTimeline {
    pub(super) fn new(
        captions: &[CaptionDescriptor],
        layout: SceneLayout,
        timeline: TimelineConfig,
        scroll: f64,
    ) -> Self {
        let tracks = captions
            .iter()
            .zip(caption_windows(captions, layout, timeline))
            .map(|(caption, windows)| {
                let (entry, exit) = targets(windows, scroll);
                CaptionTrack {
                    side: caption.side,
                    windows,
                    entry: ScrubPlayhead::new(entry),
                    exit: ScrubPlayhead::new(exit),
                }
            })
            .collect();
        Self { tracks, timeline }
    }

    pub(super) fn windows(&self) -> Vec<CaptionWindows> {
        self.tracks.iter().map(|track| track.windows).collect()
    }

    #[must_use]
    pub(super) fn beat(&self, index: usize) -> Option<f64> {
        self.tracks.get(index).map(|track| track.windows.beat())
    }

    /// Replaces windows after a layout change; playheads keep their values.
    pub(super) fn relayout(&mut self, windows: Vec<CaptionWindows>, scroll: f64) {
        for (track, windows) in self.tracks.iter_mut().zip(windows) {
            track.windows = windows;
        }
        self.seek(scroll);
    }

    pub(super) fn seek(&mut self, scroll: f64) {
        for track in &mut self.tracks {
            let (entry, exit) = targets(track.windows, scroll);
            track.entry.set_target(entry);
            track.exit.set_target(exit);
        }
    }

    pub(super) fn step(&mut self, delta_seconds: f64) {
        let lag = self.timeline.scrub_lag_seconds;
        for track in &mut self.tracks {
            track.entry.step(delta_seconds, lag);
            track.exit.step(delta_seconds, lag);
        }
    }

    pub(super) fn settle(&mut self) {
        for track in &mut self.tracks {
            track.entry.settle();
            track.exit.settle();
        }
    }

    pub(super) fn visuals(&self) -> Vec<CaptionVisual> {
        let ease = self.timeline.caption_ease;
        let offset = self.timeline.caption_offset_px;
        self.tracks
            .iter()
            .map(|track| {
                let shown = ease.apply(track.entry.current());
                let hidden = ease.apply(track.exit.current());
                let remaining = 1.0 - shown;
                CaptionVisual {
                    opacity: (shown * (1.0 - hidden)).clamp(0.0, 1.0),
                    translate_x: track.side.entry_sign() * offset * remaining,
                    translate_y: offset * remaining,
                }
            })
            .collect()
    }
}

fn targets(windows: CaptionWindows, scroll: f64) -> (f64, f64) {
    let entry = windows.entry.progress(scroll);
    let exit = windows.exit.map_or(0.0, |exit| exit.progress(scroll));
    (entry, exit)
}
