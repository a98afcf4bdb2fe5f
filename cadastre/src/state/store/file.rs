use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{CadastreResult, ErrorKind};
use crate::state::store::base::CheckpointStore;
use crate::types::Checkpoint;

/// [`CheckpointStore`] backed by a small JSON file.
///
/// The file holds the three resume fields as a single JSON object. An absent
/// or unparsable file is treated as "no prior state" and yields the default
/// starting position; each save fully replaces the file's contents.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    /// Creates a store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the checkpoint file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for FileCheckpointStore {
    async fn load(&self) -> CadastreResult<Checkpoint> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(_) => return Ok(Checkpoint::default()),
        };

        match serde_json::from_str(&contents) {
            Ok(checkpoint) => Ok(checkpoint),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "checkpoint file is corrupt, starting from scratch"
                );
                Ok(Checkpoint::default())
            }
        }
    }

    async fn save(&self, checkpoint: Checkpoint) -> CadastreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                crate::cadastre_error!(
                    ErrorKind::CheckpointIoError,
                    "Failed to create the checkpoint directory",
                    self.path.display(),
                    source: err
                )
            })?;
        }

        let contents = serde_json::to_string_pretty(&checkpoint).map_err(|err| {
            crate::cadastre_error!(
                ErrorKind::SerializationError,
                "Failed to serialize the checkpoint",
                source: err
            )
        })?;

        tokio::fs::write(&self.path, contents).await.map_err(|err| {
            crate::cadastre_error!(
                ErrorKind::CheckpointIoError,
                "Failed to persist the checkpoint",
                self.path.display(),
                source: err
            )
        })
    }
}
