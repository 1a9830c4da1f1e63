use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::core::{
    CaptionSide, Crossing, Ease, GroupStatus, LayoutBounds, ResolvedGeometry, ScenePhase,
    ScrollWindow, SecondaryGroupKind, ShiftDirection, ShiftRequest, Span, ValueTween,
    resolve_geometry,
};
use crate::extensions::StoryEvent;
use crate::interaction::{ScrollDirection, ScrollStep};
use crate::render::{CaptionFrame, LayerFrame, SceneFrame, VisualSlotFrame};

use super::action_dispatcher::{ActionDispatcher, action_window};
use super::binding_registry::ScrollBindingRegistry;
use super::caption_timeline::CaptionTimeline;
use super::lazy_mount_gate::intersects_viewport;
use super::reveal_binder::{Readiness, RevealBinder, RevealSchedule};
use super::{
    BindingEffect, BindingId, CapabilityCall, CapabilitySlot, CaptionVisual, CaptionWindows,
    DispatchOutcome, LazyMountGate, MotionConfig, PreferredSide, SceneData, SceneDescriptor,
    SceneId, SceneLayout, StoryEngineConfig, VisualCatalog, VisualNode, caption_exit_point,
    caption_windows,
};

/// Live state of one scene instance.
///
/// Owns the disposal list of every scroll binding created for the scene, the
/// lazily mounted visual, and the tweens driven by scroll and frame ticks.
pub(super) struct SceneRuntime {
    pub(super) id: SceneId,
    pub(super) descriptor: SceneDescriptor,
    pub(super) layout: SceneLayout,
    gate: LazyMountGate,
    capability: CapabilitySlot,
    visual: Option<Box<dyn VisualNode>>,
    mount_count: u32,
    disposal: Vec<BindingId>,
    region_binding: BindingId,
    exit_fade_binding: BindingId,
    caption_bindings: Vec<BindingId>,
    timeline: CaptionTimeline,
    actions: ActionDispatcher,
    reveal: RevealBinder,
    caption_widths: Vec<f64>,
    geometry: ResolvedGeometry,
    shift: ValueTween,
    layer_opacity: f64,
}

fn track(
    bindings: &mut ScrollBindingRegistry,
    disposal: &mut Vec<BindingId>,
    scene: SceneId,
    window: ScrollWindow,
    effect: BindingEffect,
) -> BindingId {
    let id = bindings.register(scene, window, effect);
    disposal.push(id);
    id
}

fn reveal_points(
    schedule: RevealSchedule,
    windows: &[CaptionWindows],
    layout: SceneLayout,
) -> (f64, Option<f64>) {
    let reveal = windows
        .get(schedule.reveal_at)
        .map_or(layout.narrative_start(), |caption| caption.beat());
    let hide = schedule
        .hide_at
        .map(|hide_at| caption_exit_point(windows, hide_at, layout));
    (reveal, hide)
}

impl SceneRuntime {
    pub(super) fn new(
        id: SceneId,
        descriptor: SceneDescriptor,
        layout: SceneLayout,
        config: &StoryEngineConfig,
        bindings: &mut ScrollBindingRegistry,
        scroll: f64,
    ) -> Self {
        let timeline = CaptionTimeline::new(&descriptor.captions, layout, config.timeline, scroll);
        let windows = timeline.windows();
        let mut disposal = Vec::new();

        let region_binding = track(
            bindings,
            &mut disposal,
            id,
            layout.active_window(config.motion),
            BindingEffect::SceneRegion,
        );
        let exit_fade_binding = track(
            bindings,
            &mut disposal,
            id,
            layout.exit_fade_window(config.motion),
            BindingEffect::LayerExitFade,
        );
        let caption_bindings = windows
            .iter()
            .enumerate()
            .map(|(index, caption)| {
                track(
                    bindings,
                    &mut disposal,
                    id,
                    caption.full_window(),
                    BindingEffect::CaptionScrub { index },
                )
            })
            .collect();
        let mut actions = ActionDispatcher::default();
        for (index, action) in descriptor.actions.iter().enumerate() {
            let window = action_window(&windows, action.trigger_caption_index, layout);
            let binding = track(
                bindings,
                &mut disposal,
                id,
                window,
                BindingEffect::Action { index },
            );
            actions.bind(action, binding);
        }

        let caption_width = if descriptor.layout.wide {
            config.captions.wide_width_px
        } else {
            config.captions.default_width_px
        };
        let caption_widths = vec![caption_width; descriptor.captions.len()];
        let geometry = resolve_geometry(
            config.viewport.width_px(),
            &caption_widths,
            config.geometry,
        );
        let reveal = RevealBinder::new(&descriptor, config.reveal);
        let gate = LazyMountGate::new(descriptor.layout.prefetch_margin_px);

        let mut runtime = Self {
            id,
            descriptor,
            layout,
            gate,
            capability: CapabilitySlot::new(),
            visual: None,
            mount_count: 0,
            disposal,
            region_binding,
            exit_fade_binding,
            caption_bindings,
            timeline,
            actions,
            reveal,
            caption_widths,
            geometry,
            shift: ValueTween::new(0.0, config.motion.shift_seconds, Ease::Power2Out),
            layer_opacity: 1.0,
        };
        let shift = runtime.shift_target(scroll, config);
        runtime.shift.jump_to(shift);
        runtime.layer_opacity = runtime.layer_opacity_at(scroll, config.motion);
        runtime
    }

    #[must_use]
    pub(super) fn key(&self) -> &str {
        &self.descriptor.key
    }

    #[must_use]
    pub(super) fn mount_count(&self) -> u32 {
        self.mount_count
    }

    #[must_use]
    pub(super) fn is_mounted(&self) -> bool {
        self.visual.is_some()
    }

    #[must_use]
    pub(super) fn binding_count(&self) -> usize {
        self.disposal.len()
    }

    #[must_use]
    pub(super) fn capability(&self) -> &CapabilitySlot {
        &self.capability
    }

    #[must_use]
    pub(super) fn phase(&self, owns_layer: bool, scroll: f64, viewport_height: f64) -> ScenePhase {
        if owns_layer {
            return ScenePhase::Active;
        }
        let near = intersects_viewport(
            self.layout.top,
            self.layout.bottom(),
            scroll,
            viewport_height,
            self.gate.root_margin_px(),
        );
        if self.is_mounted() && near {
            ScenePhase::Priming
        } else {
            ScenePhase::Dormant
        }
    }

    /// Feeds the lazy mount gate; mounts on its opening transition.
    pub(super) fn observe_gate(
        &mut self,
        scroll: f64,
        viewport_height: f64,
        catalog: &VisualCatalog,
        data: &SceneData,
    ) -> Option<StoryEvent> {
        let opened = self.gate.observe(
            self.layout.top,
            self.layout.bottom(),
            scroll,
            viewport_height,
        );
        if opened { self.mount(catalog, data) } else { None }
    }

    /// Opens the gate unconditionally, mounting if that has not happened yet.
    pub(super) fn force_mount(
        &mut self,
        catalog: &VisualCatalog,
        data: &SceneData,
    ) -> Option<StoryEvent> {
        self.gate.force_open();
        self.mount(catalog, data)
    }

    fn mount(&mut self, catalog: &VisualCatalog, data: &SceneData) -> Option<StoryEvent> {
        if self.visual.is_some() {
            return None;
        }
        let Some(factory) = catalog.get(&self.descriptor.visual) else {
            warn!(
                scene = self.key(),
                visual = %self.descriptor.visual,
                "visualization factory missing; slot stays empty"
            );
            return None;
        };
        self.visual = Some(factory.render(data, self.capability.clone()));
        self.mount_count += 1;
        debug!(scene = self.key(), mount_count = self.mount_count, "visualization mounted");
        Some(StoryEvent::VisualMounted {
            key: self.descriptor.key.clone(),
            mount_count: self.mount_count,
        })
    }

    /// Puts a stage-driven visualization back to its first stage.
    pub(super) fn reset_stage(&self) -> DispatchOutcome {
        self.capability
            .dispatch(&CapabilityCall::ShowStage { stage: 0 })
    }

    pub(super) fn on_crossing(
        &mut self,
        effect: BindingEffect,
        crossing: Crossing,
    ) -> Option<StoryEvent> {
        match effect {
            BindingEffect::Action { index } => self.fire_action(index, crossing),
            BindingEffect::RevealIn { group } => {
                if let Some(group) = self.reveal.group_mut(group) {
                    group.on_reveal_crossing(crossing);
                }
                None
            }
            BindingEffect::RevealOut { group } => {
                if let Some(group) = self.reveal.group_mut(group) {
                    group.on_hide_crossing(crossing);
                }
                None
            }
            BindingEffect::SceneRegion
            | BindingEffect::CaptionScrub { .. }
            | BindingEffect::LayerExitFade => None,
        }
    }

    fn fire_action(&self, index: usize, crossing: Crossing) -> Option<StoryEvent> {
        let fired = self.actions.on_crossing(index, crossing, &self.capability)?;
        Some(StoryEvent::ActionDispatched {
            key: self.descriptor.key.clone(),
            caption_index: fired.caption_index,
            method: fired.method,
            outcome: fired.outcome.into(),
        })
    }

    /// Re-fires, in beat order, the actions already behind `entry` that the
    /// rest of `step` will not cross again.
    ///
    /// Run right after the stage reset on enter, so a scene re-entered from
    /// below shows the stage of the nearest passed beat.
    pub(super) fn replay_passed_actions(
        &self,
        bindings: &ScrollBindingRegistry,
        entry: f64,
        step: ScrollStep,
    ) -> Vec<StoryEvent> {
        let direction = step.direction();
        let mut passed: Vec<(OrderedFloat<f64>, usize)> = self
            .actions
            .bindings()
            .enumerate()
            .filter_map(|(index, (_, binding))| {
                let window = bindings.window(binding)?;
                let behind = match direction {
                    // A beat sitting on the entry point fires through its own crossing.
                    ScrollDirection::Forward => window.start < entry,
                    ScrollDirection::Backward | ScrollDirection::Idle => window.start <= entry,
                };
                let entered_back = direction == ScrollDirection::Backward
                    && step.to < window.end
                    && window.end < entry;
                (behind && !entered_back).then_some((OrderedFloat(window.start), index))
            })
            .collect();
        passed.sort_unstable();
        passed
            .into_iter()
            .filter_map(|(_, index)| self.fire_action(index, Crossing::Enter))
            .collect()
    }

    /// Retargets every scroll-derived value for `scroll`.
    pub(super) fn seek(&mut self, scroll: f64, config: &StoryEngineConfig) {
        self.timeline.seek(scroll);
        self.layer_opacity = self.layer_opacity_at(scroll, config.motion);
        let shift = self.shift_target(scroll, config);
        self.shift.retarget(shift);
    }

    fn layer_opacity_at(&self, scroll: f64, motion: MotionConfig) -> f64 {
        1.0 - self.layout.exit_fade_window(motion).progress(scroll)
    }

    /// Caption whose side decides where the visualization moves.
    fn driving_caption(&self, scroll: f64) -> Option<usize> {
        let sided = |index: &usize| {
            self.descriptor.captions[*index]
                .side
                .yielding_direction()
                .is_some()
        };
        let captions = 0..self.descriptor.captions.len();
        captions
            .clone()
            .rev()
            .filter(sided)
            .find(|index| self.timeline.beat(*index).is_some_and(|beat| beat <= scroll))
            .or_else(|| captions.clone().find(sided))
    }

    #[must_use]
    pub(super) fn shift_direction(&self, scroll: f64, motion: MotionConfig) -> ShiftDirection {
        let hints = self.descriptor.layout;
        if hints.fullscreen {
            return ShiftDirection::Center;
        }
        match hints.preferred_side {
            Some(PreferredSide::Left) => ShiftDirection::Left,
            Some(PreferredSide::Right) => ShiftDirection::Right,
            Some(PreferredSide::Center) => ShiftDirection::Center,
            None if scroll < self.layout.side_slide_point(motion) => ShiftDirection::Center,
            None => self
                .driving_caption(scroll)
                .and_then(|index| self.descriptor.captions[index].side.yielding_direction())
                .unwrap_or(ShiftDirection::Center),
        }
    }

    fn caption_box(&self, index: usize, config: &StoryEngineConfig) -> Option<Span> {
        let width = self.caption_widths.get(index).copied()?;
        let inset = config.captions.inset_px;
        match self.descriptor.captions.get(index)?.side {
            CaptionSide::Left => Some(Span::new(inset, inset + width)),
            CaptionSide::Right => {
                let right =
                    self.geometry.bounds.container_width - config.geometry.gutter_width_px - inset;
                Some(Span::new(right - width, right))
            }
            CaptionSide::Center | CaptionSide::None => None,
        }
    }

    fn shift_target(&self, scroll: f64, config: &StoryEngineConfig) -> f64 {
        if self.descriptor.layout.fullscreen {
            return 0.0;
        }
        let direction = self.shift_direction(scroll, config.motion);
        let driving = self.driving_caption(scroll);
        let width = driving
            .and_then(|index| self.caption_widths.get(index).copied())
            .unwrap_or(self.geometry.bounds.max_caption_width);
        let mut request = ShiftRequest::new(direction, width);
        if let Some(caption_box) = driving.and_then(|index| self.caption_box(index, config)) {
            request = request.with_caption_box(caption_box);
        }
        self.geometry.shift(request)
    }

    /// Records a measured caption width. Returns `true` when it changed.
    pub(super) fn set_caption_width(&mut self, index: usize, width_px: f64) -> bool {
        match self.caption_widths.get_mut(index) {
            Some(width) if (*width - width_px).abs() > f64::EPSILON => {
                *width = width_px;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub(super) fn caption_count(&self) -> usize {
        self.descriptor.captions.len()
    }

    /// Re-resolves geometry for the current container and caption widths.
    pub(super) fn resolve_layout(&mut self, config: &StoryEngineConfig) -> StoryEvent {
        let container = config.viewport.width_px();
        self.geometry = resolve_geometry(container, &self.caption_widths, config.geometry);
        if self.geometry.stacked() && container < config.geometry.min_vis_width_px {
            warn!(
                scene = self.key(),
                container,
                min = config.geometry.min_vis_width_px,
                "container narrower than minimum visualization width; clamping"
            );
        }
        debug!(
            scene = self.key(),
            stacked = self.geometry.stacked(),
            vis_width = self.vis_width(),
            "scene layout resolved"
        );
        StoryEvent::LayoutResolved {
            key: self.descriptor.key.clone(),
            stacked: self.geometry.stacked(),
            vis_width: self.vis_width(),
        }
    }

    /// Moves the scene to `layout` and rewrites every binding window in place.
    ///
    /// Beats and reveal points that move across `scroll` are applied as the
    /// crossings scrolling would have produced, so actions and groups stay in
    /// step with the re-seeked captions.
    pub(super) fn relayout(
        &mut self,
        layout: SceneLayout,
        config: &StoryEngineConfig,
        bindings: &mut ScrollBindingRegistry,
        scroll: f64,
        events: &mut Vec<StoryEvent>,
    ) {
        self.layout = layout;
        let windows = caption_windows(&self.descriptor.captions, layout, config.timeline);

        bindings.update_window(self.region_binding, layout.active_window(config.motion));
        bindings.update_window(self.exit_fade_binding, layout.exit_fade_window(config.motion));
        for (binding, caption) in self.caption_bindings.iter().zip(&windows) {
            bindings.update_window(*binding, caption.full_window());
        }

        let mut implied = Vec::new();
        let mut relocate = |binding: BindingId, window: ScrollWindow, effect: BindingEffect| {
            if let Some(previous) = bindings.window(binding) {
                for crossing in previous.relocation_crossings(window, scroll) {
                    implied.push((effect, crossing));
                }
            }
            bindings.update_window(binding, window);
        };
        for (index, (trigger, binding)) in self.actions.bindings().enumerate() {
            relocate(
                binding,
                action_window(&windows, trigger, layout),
                BindingEffect::Action { index },
            );
        }
        for group in self.reveal.groups() {
            let (reveal, hide) = reveal_points(group.schedule, &windows, layout);
            if let Some(binding) = group.in_binding {
                relocate(
                    binding,
                    ScrollWindow::point(reveal),
                    BindingEffect::RevealIn { group: group.kind },
                );
            }
            if let (Some(binding), Some(hide)) = (group.out_binding, hide) {
                relocate(
                    binding,
                    ScrollWindow::point(hide),
                    BindingEffect::RevealOut { group: group.kind },
                );
            }
        }
        // Backward crossings unwind from the latest beat, forward ones replay from the earliest.
        let (backward, forward): (Vec<_>, Vec<_>) = implied
            .into_iter()
            .partition(|(_, crossing)| {
                matches!(crossing, Crossing::EnterBack | Crossing::LeaveBack)
            });
        for (effect, crossing) in backward.into_iter().rev().chain(forward) {
            events.extend(self.on_crossing(effect, crossing));
        }

        self.timeline.relayout(windows, scroll);
        events.push(self.resolve_layout(config));
        self.seek(scroll, config);
    }

    /// Polls waiting secondary groups and binds the ones that appeared.
    pub(super) fn poll_groups(
        &mut self,
        bindings: &mut ScrollBindingRegistry,
        scroll: f64,
    ) -> Vec<StoryEvent> {
        let Some(node) = self.visual.as_deref() else {
            return Vec::new();
        };
        let results = self.reveal.poll(&self.descriptor.key, node);
        if results.is_empty() {
            return Vec::new();
        }

        let windows = self.timeline.windows();
        let mut events = Vec::with_capacity(results.len());
        for (kind, readiness) in results {
            match readiness {
                Readiness::Ready(matched) => {
                    let Some(group) = self.reveal.group_mut(kind) else {
                        continue;
                    };
                    let (reveal, hide) = reveal_points(group.schedule, &windows, self.layout);
                    let in_binding = track(
                        bindings,
                        &mut self.disposal,
                        self.id,
                        ScrollWindow::point(reveal),
                        BindingEffect::RevealIn { group: kind },
                    );
                    let out_binding = hide.map(|hide| {
                        track(
                            bindings,
                            &mut self.disposal,
                            self.id,
                            ScrollWindow::point(hide),
                            BindingEffect::RevealOut { group: kind },
                        )
                    });
                    group.bind(matched, (in_binding, out_binding), (reveal, hide), scroll);
                    events.push(StoryEvent::SecondaryGroupBound {
                        key: self.descriptor.key.clone(),
                        group: kind,
                        matched,
                    });
                }
                Readiness::TimedOut => events.push(StoryEvent::SecondaryGroupAbsent {
                    key: self.descriptor.key.clone(),
                    group: kind,
                }),
                Readiness::Pending => {}
            }
        }
        events
    }

    pub(super) fn step(&mut self, delta_seconds: f64) {
        if let Some(visual) = self.visual.as_mut() {
            visual.on_frame(delta_seconds);
        }
        self.timeline.step(delta_seconds);
        self.reveal.step(delta_seconds);
        self.shift.step(delta_seconds);
    }

    pub(super) fn settle(&mut self) {
        self.timeline.settle();
        self.reveal.settle();
        self.shift.settle();
    }

    /// Disposes every binding of this scene and drops the visual.
    pub(super) fn dispose(&mut self, bindings: &mut ScrollBindingRegistry) -> usize {
        let disposed = bindings.dispose_all(&mut self.disposal);
        self.capability.clear();
        self.visual = None;
        debug!(scene = self.key(), disposed, "scene torn down");
        disposed
    }

    #[must_use]
    pub(super) fn caption_visuals(&self) -> Vec<CaptionVisual> {
        self.timeline.visuals()
    }

    #[must_use]
    pub(super) fn group_status(&self, kind: SecondaryGroupKind) -> Option<GroupStatus> {
        self.reveal.status(kind)
    }

    #[must_use]
    pub(super) fn bounds(&self) -> LayoutBounds {
        self.geometry.bounds
    }

    #[must_use]
    pub(super) fn vis_width(&self) -> f64 {
        if self.descriptor.layout.fullscreen {
            self.geometry.bounds.container_width
        } else {
            self.geometry.vis_width
        }
    }

    #[must_use]
    pub(super) fn vis_offset(&self) -> f64 {
        self.shift.value()
    }

    #[must_use]
    pub(super) fn layer_opacity(&self) -> f64 {
        self.layer_opacity
    }

    pub(super) fn frame(&self, visible: bool, phase: ScenePhase) -> SceneFrame {
        let captions = self
            .descriptor
            .captions
            .iter()
            .zip(self.timeline.visuals())
            .zip(&self.caption_widths)
            .map(|((caption, visual), width)| CaptionFrame {
                index: caption.index,
                side: caption.side,
                width: *width,
                opacity: visual.opacity,
                translate_x: visual.translate_x,
                translate_y: visual.translate_y,
            })
            .collect();
        SceneFrame {
            key: self.descriptor.key.clone(),
            phase,
            top: self.layout.top,
            height: self.layout.bottom() - self.layout.top,
            layer: LayerFrame {
                visible,
                opacity: self.layer_opacity,
            },
            visual: VisualSlotFrame {
                mounted: self.is_mounted(),
                width: self.vis_width(),
                offset_x: self.vis_offset(),
                stacked: self.geometry.stacked(),
                fullscreen: self.descriptor.layout.fullscreen,
            },
            captions,
            groups: self.reveal.frames(),
        }
    }
}
