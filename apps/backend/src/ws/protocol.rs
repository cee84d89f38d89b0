use serde::{Deserialize, Serialize};

use crate::domain::RoomView;

/// Frames the server pushes to room subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMsg {
    Ack {
        message: String,
    },

    RoomStateChanged(RoomView),

    #[serde(rename_all = "camelCase")]
    ArtifactReady {
        room_id: String,
    },
}

impl ServerMsg {
    pub fn connected() -> Self {
        ServerMsg::Ack {
            message: "connected".to_string(),
        }
    }
}
