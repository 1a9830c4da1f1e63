use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{Crossing, Ease, GroupStatus, SecondaryGroupKind, ToggleTween};
use crate::render::GroupFrame;

use super::{BindingId, RevealConfig, SceneDescriptor, SecondaryGroup, VisualNode};

/// Result of polling a selector once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Readiness {
    Pending,
    Ready(usize),
    TimedOut,
}

/// Bounded per-frame wait for a selector to match inside a mounted visual.
///
/// Resolves at most once; polls after resolution report the settled result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SelectorWait {
    selector: String,
    polled_frames: u32,
    max_frames: u32,
    settled: Option<Readiness>,
}

impl SelectorWait {
    pub(super) fn new(selector: impl Into<String>, max_frames: u32) -> Self {
        Self {
            selector: selector.into(),
            polled_frames: 0,
            max_frames,
            settled: None,
        }
    }

    #[must_use]
    pub(super) fn polled_frames(&self) -> u32 {
        self.polled_frames
    }

    pub(super) fn poll(&mut self, node: &dyn VisualNode) -> Readiness {
        if let Some(settled) = self.settled {
            return settled;
        }
        let matched = node.match_count(&self.selector);
        if matched > 0 {
            self.settled = Some(Readiness::Ready(matched));
            return Readiness::Ready(matched);
        }
        self.polled_frames += 1;
        if self.polled_frames >= self.max_frames {
            self.settled = Some(Readiness::TimedOut);
            return Readiness::TimedOut;
        }
        Readiness::Pending
    }
}

/// Caption beats a group reacts to, after defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RevealSchedule {
    pub(super) reveal_at: usize,
    pub(super) hide_at: Option<usize>,
}

/// Fills in missing reveal beats for both groups of a scene.
///
/// Axes fall back to the first caption declaring a reveal range, then to the
/// second caption. Helpers fall back to the axes schedule.
pub(super) fn resolve_schedules(
    descriptor: &SceneDescriptor,
) -> (Option<RevealSchedule>, Option<RevealSchedule>) {
    let last = descriptor.captions.len().saturating_sub(1);
    let caption_from = descriptor
        .captions
        .iter()
        .find_map(|caption| caption.reveal_from_idx);
    let caption_to = descriptor
        .captions
        .iter()
        .find_map(|caption| caption.reveal_to_idx);
    let fallback = schedule(caption_from.unwrap_or(1), caption_to, last);

    let axes = descriptor.secondary.axes.as_ref().map(|group| {
        schedule(
            group.reveal_at.unwrap_or(fallback.reveal_at),
            group.hide_at.or(fallback.hide_at),
            last,
        )
    });
    let base = axes.unwrap_or(fallback);
    let helper = descriptor.secondary.helper.as_ref().map(|group| {
        schedule(
            group.reveal_at.unwrap_or(base.reveal_at),
            group.hide_at.or(base.hide_at),
            last,
        )
    });
    (axes, helper)
}

fn schedule(reveal_at: usize, hide_at: Option<usize>, last: usize) -> RevealSchedule {
    let reveal_at = reveal_at.min(last);
    RevealSchedule {
        reveal_at,
        hide_at: hide_at.filter(|hide_at| *hide_at >= reveal_at),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct RevealGroup {
    pub(super) kind: SecondaryGroupKind,
    pub(super) schedule: RevealSchedule,
    status: GroupStatus,
    wait: SelectorWait,
    matched: usize,
    fade_in: ToggleTween,
    fade_out: ToggleTween,
    pub(super) in_binding: Option<BindingId>,
    pub(super) out_binding: Option<BindingId>,
}

impl RevealGroup {
    fn new(
        kind: SecondaryGroupKind,
        group: &SecondaryGroup,
        schedule: RevealSchedule,
        config: RevealConfig,
    ) -> Self {
        let status = if group.is_no_match() {
            GroupStatus::Disabled
        } else {
            GroupStatus::Waiting
        };
        Self {
            kind,
            schedule,
            status,
            wait: SelectorWait::new(group.selector.trim(), config.max_poll_frames),
            matched: 0,
            fade_in: ToggleTween::new(config.fade_seconds, Ease::Power2Out),
            fade_out: ToggleTween::new(config.fade_seconds, Ease::Power2Out),
            in_binding: None,
            out_binding: None,
        }
    }

    #[must_use]
    pub(super) fn status(&self) -> GroupStatus {
        self.status
    }

    #[must_use]
    pub(super) fn opacity(&self) -> f64 {
        match self.status {
            GroupStatus::Bound => self.fade_in.value() * (1.0 - self.fade_out.value()),
            _ => 0.0,
        }
    }

    /// Hides the elements and syncs with points the scroll already passed.
    pub(super) fn bind(
        &mut self,
        matched: usize,
        bindings: (BindingId, Option<BindingId>),
        points: (f64, Option<f64>),
        scroll: f64,
    ) {
        self.status = GroupStatus::Bound;
        self.matched = matched;
        self.in_binding = Some(bindings.0);
        self.out_binding = bindings.1;
        self.fade_in.reset();
        self.fade_out.reset();
        if scroll >= points.0 {
            self.fade_in.play();
        }
        if points.1.is_some_and(|hide_point| scroll >= hide_point) {
            self.fade_out.play();
        }
    }

    /// The reveal is one-shot: it plays on the first forward pass only.
    pub(super) fn on_reveal_crossing(&mut self, crossing: Crossing) {
        if crossing == Crossing::Enter && self.status == GroupStatus::Bound {
            self.fade_in.play();
        }
    }

    pub(super) fn on_hide_crossing(&mut self, crossing: Crossing) {
        if self.status != GroupStatus::Bound {
            return;
        }
        match crossing {
            Crossing::Enter => self.fade_out.play(),
            Crossing::EnterBack => self.fade_out.reverse(),
            Crossing::Leave | Crossing::LeaveBack => {}
        }
    }

    fn frame(&self) -> GroupFrame {
        GroupFrame {
            kind: self.kind,
            status: self.status,
            matched: self.matched,
            opacity: self.opacity(),
        }
    }
}

/// Secondary element groups of one scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub(super) struct RevealBinder {
    groups: SmallVec<[RevealGroup; 2]>,
}

impl RevealBinder {
    pub(super) fn new(descriptor: &SceneDescriptor, config: RevealConfig) -> Self {
        let (axes_schedule, helper_schedule) = resolve_schedules(descriptor);
        let mut groups = SmallVec::new();
        for (kind, group, schedule) in [
            (
                SecondaryGroupKind::Axes,
                descriptor.secondary.axes.as_ref(),
                axes_schedule,
            ),
            (
                SecondaryGroupKind::Helper,
                descriptor.secondary.helper.as_ref(),
                helper_schedule,
            ),
        ] {
            if let (Some(group), Some(schedule)) = (group, schedule) {
                groups.push(RevealGroup::new(kind, group, schedule, config));
            }
        }
        Self { groups }
    }

    pub(super) fn groups(&self) -> impl Iterator<Item = &RevealGroup> {
        self.groups.iter()
    }

    pub(super) fn group_mut(&mut self, kind: SecondaryGroupKind) -> Option<&mut RevealGroup> {
        self.groups.iter_mut().find(|group| group.kind == kind)
    }

    #[must_use]
    pub(super) fn status(&self, kind: SecondaryGroupKind) -> Option<GroupStatus> {
        self.groups
            .iter()
            .find(|group| group.kind == kind)
            .map(RevealGroup::status)
    }

    /// Polls every waiting group once. Timed-out groups become absent here.
    pub(super) fn poll(
        &mut self,
        scene_key: &str,
        node: &dyn VisualNode,
    ) -> SmallVec<[(SecondaryGroupKind, Readiness); 2]> {
        let mut out = SmallVec::new();
        for group in &mut self.groups {
            if group.status != GroupStatus::Waiting {
                continue;
            }
            match group.wait.poll(node) {
                Readiness::Pending => {}
                Readiness::Ready(matched) => {
                    debug!(
                        scene = scene_key,
                        group = group.kind.name(),
                        matched,
                        frames = group.wait.polled_frames(),
                        "secondary group found"
                    );
                    out.push((group.kind, Readiness::Ready(matched)));
                }
                Readiness::TimedOut => {
                    warn!(
                        scene = scene_key,
                        group = group.kind.name(),
                        frames = group.wait.polled_frames(),
                        "secondary group selector never matched; treating as absent"
                    );
                    group.status = GroupStatus::Absent;
                    out.push((group.kind, Readiness::TimedOut));
                }
            }
        }
        out
    }

    pub(super) fn step(&mut self, delta_seconds: f64) {
        for group in &mut self.groups {
            group.fade_in.step(delta_seconds);
            group.fade_out.step(delta_seconds);
        }
    }

    pub(super) fn settle(&mut self) {
        for group in &mut self.groups {
            group.fade_in.settle();
            group.fade_out.settle();
        }
    }

    pub(super) fn frames(&self) -> Vec<GroupFrame> {
        self.groups.iter().map(RevealGroup::frame).collect()
    }
}
