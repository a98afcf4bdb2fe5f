//! Process-wide cache for reference-data entities.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::types::{RelatedCategory, RelatedEntity};

/// Internal storage for cached reference data.
#[derive(Debug, Default)]
struct Inner {
    entities: HashMap<(RelatedCategory, String), RelatedEntity>,
}

/// Thread-safe, process-wide cache of fetched reference-data entities.
///
/// [`ReferenceCache`] maps `(category, code)` to the entity fetched for that
/// pair. Entries are write-once: the first successful fetch wins and the key
/// is never fetched again for the life of the run. Failed or empty fetches
/// are not recorded, so a later batch that references the same code retries
/// it.
///
/// The cache is shared by cloning; all clones observe the same entries.
/// Insertion is mutually exclusive, which keeps concurrent phase-2 workers
/// from corrupting the map when they discover new codes at the same instant.
/// The cache is unbounded and entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    inner: Arc<Mutex<Inner>>,
}

impl ReferenceCache {
    /// Creates a new empty reference cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves a copy of the entity cached for `(category, code)`.
    ///
    /// Returns [`None`] if the pair has not been successfully fetched yet.
    pub async fn lookup(&self, category: RelatedCategory, code: &str) -> Option<RelatedEntity> {
        let inner = self.inner.lock().await;
        inner.entities.get(&(category, code.to_string())).cloned()
    }

    /// Returns whether an entity is cached for `(category, code)`.
    pub async fn contains(&self, category: RelatedCategory, code: &str) -> bool {
        let inner = self.inner.lock().await;
        inner.entities.contains_key(&(category, code.to_string()))
    }

    /// Inserts an entity under `(category, code)`.
    ///
    /// Keys are write-once: if the pair is already present the existing
    /// entry is kept and the new value is discarded.
    pub async fn insert(&self, category: RelatedCategory, code: String, entity: RelatedEntity) {
        let mut inner = self.inner.lock().await;
        inner.entities.entry((category, code)).or_insert(entity);
    }

    /// Returns the number of cached entities across all categories.
    pub async fn len(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.entities.len()
    }

    /// Returns whether the cache holds no entities.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
