use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("invalid room id for artifact path: {0}")]
    InvalidRoomId(String),
    #[error("artifact io failed: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk layout of captured artifacts: `<root>/room_<roomId>.svg`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

pub const ARTIFACT_CONTENT_TYPE: &str = "image/svg+xml";

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, room_id: &str) -> Result<PathBuf, ArtifactError> {
        let valid = !room_id.is_empty()
            && room_id.len() <= 64
            && room_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(ArtifactError::InvalidRoomId(room_id.to_string()));
        }
        Ok(self.root.join(format!("room_{room_id}.svg")))
    }

    pub async fn exists(&self, room_id: &str) -> Result<bool, ArtifactError> {
        let path = self.path_for(room_id)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    /// `Ok(None)` when no artifact has been captured for the room.
    pub async fn read(&self, room_id: &str) -> Result<Option<Vec<u8>>, ArtifactError> {
        let path = self.path_for(room_id)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Write via a temp file and rename so readers never see a partial artifact.
    pub async fn write(&self, room_id: &str, contents: &[u8]) -> Result<PathBuf, ArtifactError> {
        let path = self.path_for(room_id)?;
        tokio::fs::create_dir_all(&self.root).await?;
        let tmp = self
            .root
            .join(format!(".room_{room_id}.{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, contents).await?;
        if let Err(err) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        Ok(path)
    }
}
