use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::extensions::ActionOutcome;

/// Named call into a mounted visualization's capability object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CapabilityCall {
    ToggleInvert { inverted: bool },
    NextYear,
    AddYear,
    ShowStage { stage: u32 },
    Custom {
        name: String,
        #[serde(default)]
        args: Value,
    },
}

impl CapabilityCall {
    #[must_use]
    pub fn method_name(&self) -> &str {
        match self {
            Self::ToggleInvert { .. } => "toggle_invert",
            Self::NextYear => "next_year",
            Self::AddYear => "add_year",
            Self::ShowStage { .. } => "show_stage",
            Self::Custom { name, .. } => name,
        }
    }
}

/// Result reported by a capability method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutcome {
    Applied,
    Unsupported,
}

/// Control surface a mounted visualization may expose.
///
/// Every method is independently optional: the defaults report
/// [`CallOutcome::Unsupported`], so implementors only override what they
/// actually support.
pub trait Capability {
    fn toggle_invert(&mut self, _inverted: bool) -> CallOutcome {
        CallOutcome::Unsupported
    }

    fn next_year(&mut self) -> CallOutcome {
        CallOutcome::Unsupported
    }

    fn add_year(&mut self) -> CallOutcome {
        CallOutcome::Unsupported
    }

    fn show_stage(&mut self, _stage: u32) -> CallOutcome {
        CallOutcome::Unsupported
    }

    fn call_custom(&mut self, _name: &str, _args: &Value) -> CallOutcome {
        CallOutcome::Unsupported
    }
}

/// What happened when the engine tried to invoke a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    Applied,
    /// The capability object does not implement the method.
    Unsupported,
    /// No capability object is installed yet.
    Unmounted,
}

impl From<DispatchOutcome> for ActionOutcome {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Applied => Self::Applied,
            DispatchOutcome::Unsupported => Self::Unsupported,
            DispatchOutcome::Unmounted => Self::Unmounted,
        }
    }
}

/// Shared, lazily populated slot holding a visualization's capability object.
///
/// The engine hands a clone to the visualization on mount; the visualization
/// installs its capability whenever it is ready. Dispatch before that point is
/// a silent no-op.
#[derive(Clone, Default)]
pub struct CapabilitySlot {
    inner: Rc<RefCell<Option<Box<dyn Capability>>>>,
}

impl fmt::Debug for CapabilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilitySlot")
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl CapabilitySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, capability: Box<dyn Capability>) {
        match self.inner.try_borrow_mut() {
            Ok(mut slot) => *slot = Some(capability),
            Err(_) => warn!("capability slot busy; install skipped"),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.try_borrow_mut() {
            *slot = None;
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|slot| slot.is_some())
            .unwrap_or(true)
    }

    /// Invokes `call` with optional-call semantics; never panics.
    pub fn dispatch(&self, call: &CapabilityCall) -> DispatchOutcome {
        let Ok(mut slot) = self.inner.try_borrow_mut() else {
            warn!(method = call.method_name(), "capability re-entered; call dropped");
            return DispatchOutcome::Unmounted;
        };
        let Some(capability) = slot.as_mut() else {
            debug!(method = call.method_name(), "capability not mounted; call ignored");
            return DispatchOutcome::Unmounted;
        };
        let outcome = match call {
            CapabilityCall::ToggleInvert { inverted } => capability.toggle_invert(*inverted),
            CapabilityCall::NextYear => capability.next_year(),
            CapabilityCall::AddYear => capability.add_year(),
            CapabilityCall::ShowStage { stage } => capability.show_stage(*stage),
            CapabilityCall::Custom { name, args } => capability.call_custom(name, args),
        };
        match outcome {
            CallOutcome::Applied => DispatchOutcome::Applied,
            CallOutcome::Unsupported => {
                debug!(method = call.method_name(), "capability method unsupported");
                DispatchOutcome::Unsupported
            }
        }
    }
}
