use serde::{Deserialize, Serialize};

use crate::queue::QueueError;

/// Queue the serving process publishes ended games to.
pub const DEFAULT_QUEUE: &str = "game_ended";

/// Work item wire shape: `{"roomId": "<uuid>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub room_id: String,
}

impl ExportJob {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
        }
    }

    pub fn encode(&self) -> Result<String, QueueError> {
        serde_json::to_string(self).map_err(|err| QueueError::Encode(err.to_string()))
    }

    pub fn decode(payload: &str) -> Result<Self, QueueError> {
        let job: ExportJob =
            serde_json::from_str(payload).map_err(|err| QueueError::Decode(err.to_string()))?;
        if job.room_id.trim().is_empty() {
            return Err(QueueError::Decode("roomId is empty".to_string()));
        }
        Ok(job)
    }
}
