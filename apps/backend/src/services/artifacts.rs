//! Read side of captured artifacts and the worker's completion callback.

use export_pipeline::{ArtifactError, ArtifactStore};
use tracing::{info, warn};

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::ws::{BroadcastHub, RoomEvent};

fn artifact_error(room_id: &str, err: ArtifactError) -> DomainError {
    match err {
        ArtifactError::InvalidRoomId(_) => {
            DomainError::validation(ValidationKind::InvalidRoomId, "Room id is not valid")
        }
        ArtifactError::Io(io) => {
            warn!(room_id, error = %io, "Artifact store io failure");
            DomainError::infra(
                InfraErrorKind::Other("ArtifactIo".into()),
                "Artifact storage failed",
            )
        }
    }
}

pub async fn artifact_exists(store: &ArtifactStore, room_id: &str) -> Result<bool, DomainError> {
    store
        .exists(room_id)
        .await
        .map_err(|e| artifact_error(room_id, e))
}

pub async fn fetch_artifact(store: &ArtifactStore, room_id: &str) -> Result<Vec<u8>, DomainError> {
    store
        .read(room_id)
        .await
        .map_err(|e| artifact_error(room_id, e))?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Artifact,
                format!("No artifact captured for room {room_id}"),
            )
        })
}

/// Worker callback: the artifact must really be on disk before subscribers
/// hear about it. Returns how many subscribers were notified.
pub async fn confirm_ready(
    store: &ArtifactStore,
    hub: &BroadcastHub,
    room_id: &str,
) -> Result<usize, DomainError> {
    if !artifact_exists(store, room_id).await? {
        return Err(DomainError::not_found(
            NotFoundKind::Artifact,
            format!("No artifact captured for room {room_id}"),
        ));
    }

    let delivered = hub.publish(
        room_id,
        RoomEvent::ArtifactReady {
            room_id: room_id.to_string(),
        },
    );
    info!(room_id, delivered, "Artifact ready relayed");
    Ok(delivered)
}
