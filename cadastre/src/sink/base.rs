use std::future::Future;

use crate::error::CadastreResult;
use crate::types::EnrichedRecord;

/// Trait for systems that receive the enriched records a harvest produces.
///
/// [`RecordSink`] implementations define where enriched records end up.
/// Delivery is append-only with at-least-once semantics: resuming an
/// interrupted run may re-emit records of the batch that was in flight when
/// the run stopped, and sinks must tolerate that.
pub trait RecordSink {
    /// Appends a batch of enriched records.
    ///
    /// Called once per batch, in the order batches complete. The batch may
    /// contain records without any enrichment; it is never empty.
    fn write_records(
        &self,
        records: Vec<EnrichedRecord>,
    ) -> impl Future<Output = CadastreResult<()>> + Send;
}
