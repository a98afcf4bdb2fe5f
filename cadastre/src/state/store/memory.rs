use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::CadastreResult;
use crate::state::store::base::CheckpointStore;
use crate::types::Checkpoint;

#[derive(Debug, Default)]
struct Inner {
    saves: Vec<Checkpoint>,
}

/// In-memory checkpoint store for testing and development purposes.
///
/// [`MemoryCheckpointStore`] keeps every saved checkpoint, so tests can
/// assert on the full save history (for example, checkpoint monotonicity),
/// not just the latest position. `load` returns the most recent save, or the
/// default starting position when nothing has been saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryCheckpointStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryCheckpointStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose first `load` resumes from `checkpoint`.
    pub fn resuming_from(checkpoint: Checkpoint) -> Self {
        let store = Self::new();
        store
            .inner
            .try_lock()
            .expect("store was just created")
            .saves
            .push(checkpoint);
        store
    }

    /// Returns a copy of every checkpoint saved so far, in save order.
    pub async fn history(&self) -> Vec<Checkpoint> {
        let inner = self.inner.lock().await;
        inner.saves.clone()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    async fn load(&self) -> CadastreResult<Checkpoint> {
        let inner = self.inner.lock().await;
        Ok(inner.saves.last().cloned().unwrap_or_default())
    }

    async fn save(&self, checkpoint: Checkpoint) -> CadastreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.saves.push(checkpoint);
        Ok(())
    }
}
