use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::render::Renderer;

use super::{StoryEngine, StorySnapshot};

pub const STORY_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: StorySnapshot,
}

impl StorySnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> SceneResult<String> {
        let payload = StorySnapshotJsonContractV1 {
            schema_version: STORY_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SceneError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> SceneResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<StorySnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: StorySnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            SceneError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != STORY_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(SceneError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> StoryEngine<R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> SceneResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
