use tracing::debug;

use crate::core::{Crossing, ScrollWindow};

use super::{
    ActionDescriptor, BindingId, CapabilityCall, CapabilitySlot, CaptionWindows, DispatchOutcome,
    SceneLayout, caption_exit_point,
};

#[derive(Debug, Clone, PartialEq)]
struct BoundAction {
    trigger_caption_index: usize,
    call: CapabilityCall,
    binding: BindingId,
}

/// A capability call that was attempted at a beat.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct FiredAction {
    pub(super) caption_index: usize,
    pub(super) method: String,
    pub(super) outcome: DispatchOutcome,
}

/// Beat-keyed capability calls of one scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub(super) struct ActionDispatcher {
    actions: Vec<BoundAction>,
}

/// Region of caption `index`: from its beat until it is done.
#[must_use]
pub(super) fn action_window(
    windows: &[CaptionWindows],
    index: usize,
    layout: SceneLayout,
) -> ScrollWindow {
    let beat = windows
        .get(index)
        .map_or(layout.narrative_start(), |caption| caption.beat());
    ScrollWindow::new(beat, caption_exit_point(windows, index, layout))
}

impl ActionDispatcher {
    pub(super) fn bind(&mut self, action: &ActionDescriptor, binding: BindingId) {
        self.actions.push(BoundAction {
            trigger_caption_index: action.trigger_caption_index,
            call: action.call.clone(),
            binding,
        });
    }

    pub(super) fn bindings(&self) -> impl Iterator<Item = (usize, BindingId)> + '_ {
        self.actions
            .iter()
            .map(|action| (action.trigger_caption_index, action.binding))
    }

    /// Fires action `index` when its beat is crossed in either direction.
    pub(super) fn on_crossing(
        &self,
        index: usize,
        crossing: Crossing,
        capability: &CapabilitySlot,
    ) -> Option<FiredAction> {
        if !matches!(crossing, Crossing::Enter | Crossing::EnterBack) {
            return None;
        }
        let action = self.actions.get(index)?;
        let outcome = capability.dispatch(&action.call);
        debug!(
            caption = action.trigger_caption_index,
            method = action.call.method_name(),
            ?crossing,
            ?outcome,
            "beat action fired"
        );
        Some(FiredAction {
            caption_index: action.trigger_caption_index,
            method: action.call.method_name().to_owned(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionDispatcher, action_window};
    use crate::api::{
        ActionDescriptor, BindingId, CallOutcome, Capability, CapabilityCall, CapabilitySlot,
        CaptionDescriptor, DispatchOutcome, SceneLayout, TimelineConfig, caption_windows,
    };
    use crate::core::Crossing;

    struct Years(u32);

    impl Capability for Years {
        fn next_year(&mut self) -> CallOutcome {
            self.0 += 1;
            CallOutcome::Applied
        }
    }

    #[test]
    fn fires_on_enter_and_enter_back_only() {
        let mut dispatcher = ActionDispatcher::default();
        dispatcher.bind(
            &ActionDescriptor {
                trigger_caption_index: 0,
                call: CapabilityCall::NextYear,
            },
            BindingId::from_raw(7),
        );
        let slot = CapabilitySlot::new();
        let fired = dispatcher
            .on_crossing(0, Crossing::Enter, &slot)
            .expect("fired");
        assert_eq!(fired.outcome, DispatchOutcome::Unmounted);

        slot.install(Box::new(Years(0)));
        assert!(dispatcher.on_crossing(0, Crossing::Leave, &slot).is_none());
        let fired = dispatcher
            .on_crossing(0, Crossing::EnterBack, &slot)
            .expect("fired");
        assert_eq!(fired.outcome, DispatchOutcome::Applied);
        assert_eq!(fired.method, "next_year");
    }

    #[test]
    fn window_spans_beat_to_next_beat() {
        let layout = SceneLayout::new(0.0, 1.0, 1_000.0);
        let captions = vec![
            CaptionDescriptor::new("a"),
            CaptionDescriptor {
                index: 1,
                ..CaptionDescriptor::new("b")
            },
        ];
        let windows = caption_windows(&captions, layout, TimelineConfig::default());
        let first = action_window(&windows, 0, layout);
        assert_eq!(first.start, -1_000.0);
        assert!((first.end - (-950.0)).abs() < 1e-9);
        let last = action_window(&windows, 1, layout);
        assert_eq!(last.end, layout.narrative_end());
    }
}
