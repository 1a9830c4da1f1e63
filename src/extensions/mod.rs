//! Observer hooks for hosts embedding the engine.

mod plugins;

pub use plugins::{ActionOutcome, StoryContext, StoryEvent, StoryPlugin};
