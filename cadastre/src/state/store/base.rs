use std::future::Future;

use crate::error::CadastreResult;
use crate::types::Checkpoint;

/// Trait for persisting and restoring the walk's resume position.
///
/// [`CheckpointStore`] implementations define where the checkpoint lives.
/// The store is written after every flushed batch and at every sheet
/// completion, so implementations should keep `save` cheap.
pub trait CheckpointStore {
    /// Loads the persisted checkpoint.
    ///
    /// Returns the default starting position when no prior state exists or
    /// the stored state is unreadable; a missing checkpoint is never an
    /// error.
    fn load(&self) -> impl Future<Output = CadastreResult<Checkpoint>> + Send;

    /// Persists a checkpoint, fully replacing the prior contents.
    fn save(&self, checkpoint: Checkpoint) -> impl Future<Output = CadastreResult<()>> + Send;
}
