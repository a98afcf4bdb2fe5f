use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::CadastreResult;
use crate::sink::base::RecordSink;
use crate::types::EnrichedRecord;

#[derive(Debug, Default)]
struct Inner {
    records: Vec<EnrichedRecord>,
    batches: usize,
}

/// In-memory sink for testing and development purposes.
///
/// [`MemorySink`] stores every written record in memory so tests can inspect
/// what the pipeline emitted and in how many batches. All data is lost when
/// the process terminates.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records written so far, in write order.
    pub async fn records(&self) -> Vec<EnrichedRecord> {
        let inner = self.inner.lock().await;
        inner.records.clone()
    }

    /// Returns how many non-empty batches have been written.
    pub async fn batches(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.batches
    }
}

impl RecordSink for MemorySink {
    async fn write_records(&self, records: Vec<EnrichedRecord>) -> CadastreResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut inner = self.inner.lock().await;
        inner.batches += 1;
        inner.records.extend(records);

        Ok(())
    }
}
