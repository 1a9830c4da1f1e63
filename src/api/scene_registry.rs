use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

use super::SceneDescriptor;
use super::validation::validate_scene_descriptor;

pub const SCENE_REGISTRY_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRegistryJsonContractV1 {
    pub schema_version: u32,
    pub scenes: Vec<SceneDescriptor>,
}

/// Ordered, validated list of scene descriptors.
///
/// Page order is registration order. Every descriptor is checked once here so
/// malformed content fails before any scroll binding exists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneRegistry {
    scenes: IndexMap<String, SceneDescriptor>,
}

impl SceneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = SceneDescriptor>,
    ) -> SceneResult<Self> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.push(descriptor)?;
        }
        Ok(registry)
    }

    /// Parses either a bare descriptor array or a versioned contract object.
    pub fn from_json_str(input: &str) -> SceneResult<Self> {
        if let Ok(descriptors) = serde_json::from_str::<Vec<SceneDescriptor>>(input) {
            return Self::from_descriptors(descriptors);
        }
        let payload: SceneRegistryJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            SceneError::InvalidData(format!("failed to parse scene registry json: {e}"))
        })?;
        if payload.schema_version != SCENE_REGISTRY_JSON_SCHEMA_V1 {
            return Err(SceneError::InvalidData(format!(
                "unsupported scene registry schema version: {}",
                payload.schema_version
            )));
        }
        Self::from_descriptors(payload.scenes)
    }

    pub fn to_json_contract_v1_pretty(&self) -> SceneResult<String> {
        let payload = SceneRegistryJsonContractV1 {
            schema_version: SCENE_REGISTRY_JSON_SCHEMA_V1,
            scenes: self.scenes.values().cloned().collect(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SceneError::InvalidData(format!("failed to serialize scene registry: {e}"))
        })
    }

    /// Appends a descriptor after validating it.
    pub fn push(&mut self, descriptor: SceneDescriptor) -> SceneResult<()> {
        validate_scene_descriptor(&descriptor)?;
        if self.scenes.contains_key(&descriptor.key) {
            return Err(SceneError::DuplicateScene(descriptor.key));
        }
        self.scenes.insert(descriptor.key.clone(), descriptor);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SceneDescriptor> {
        self.scenes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneDescriptor> {
        self.scenes.values()
    }

    /// Consumes the registry, yielding descriptors in page order.
    pub fn into_descriptors(self) -> impl Iterator<Item = SceneDescriptor> {
        self.scenes.into_values()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.scenes.keys().map(String::as_str).collect()
    }
}
