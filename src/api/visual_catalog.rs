use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{SceneError, SceneResult};

use super::CapabilitySlot;

/// Opaque page-level data handed unchanged to every visualization.
pub type SceneData = Value;

/// A mounted visualization instance.
///
/// The engine never draws it; it only asks which secondary elements exist
/// and ticks it once per animation frame.
pub trait VisualNode {
    /// Number of descendant elements matching a CSS-style selector.
    fn match_count(&self, selector: &str) -> usize;

    /// Called once per animation frame while the scene is alive.
    fn on_frame(&mut self, _delta_seconds: f64) {}
}

/// Builds a visualization instance for a scene.
pub trait VisualizationFactory {
    fn render(&self, data: &SceneData, capability: CapabilitySlot) -> Box<dyn VisualNode>;
}

impl<F> VisualizationFactory for F
where
    F: Fn(&SceneData, CapabilitySlot) -> Box<dyn VisualNode>,
{
    fn render(&self, data: &SceneData, capability: CapabilitySlot) -> Box<dyn VisualNode> {
        self(data, capability)
    }
}

/// Visualization with no content and no secondary elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyVisual;

impl VisualNode for EmptyVisual {
    fn match_count(&self, _selector: &str) -> usize {
        0
    }
}

/// Named visualization factories referenced by scene descriptors.
#[derive(Default)]
pub struct VisualCatalog {
    factories: IndexMap<String, Box<dyn VisualizationFactory>>,
}

impl VisualCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under a unique non-empty id.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        factory: Box<dyn VisualizationFactory>,
    ) -> SceneResult<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(SceneError::InvalidData(
                "visualization id must not be empty".to_owned(),
            ));
        }
        if self.factories.contains_key(&id) {
            return Err(SceneError::InvalidData(format!(
                "visualization `{id}` is already registered"
            )));
        }
        self.factories.insert(id, factory);
        Ok(())
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, factory: Box<dyn VisualizationFactory>) -> Self {
        let id = id.into();
        self.factories.insert(id, factory);
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub(super) fn get(&self, id: &str) -> Option<&dyn VisualizationFactory> {
        self.factories.get(id).map(|factory| factory.as_ref())
    }
}
