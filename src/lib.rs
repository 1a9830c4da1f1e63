//! scrolly: headless scroll-synchronized scene orchestration.
//!
//! A long-form page is a vertical stack of scenes. Each scene pairs a
//! visualization with a sequence of captions; scrolling through the scene
//! fades captions in and out, fires capability calls on the visualization at
//! caption beats, and hands a single shared visualization layer from one
//! scene to the next. The host feeds scroll offsets, viewport sizes and frame
//! ticks; a `Renderer` receives backend-agnostic frames.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{StoryEngine, StoryEngineConfig};
pub use error::{SceneError, SceneResult};
