//! Batch harvester for cadastral planning records.
//!
//! The crate walks a resumable (ward, sheet, plot) index space, fetches a
//! primary record per plot from the upstream planning-data API, enriches
//! each record with lazily fetched and process-wide cached reference data,
//! appends enriched records to an append-only JSONL log, and checkpoints
//! progress after every batch so an interrupted run resumes where it
//! stopped.

pub mod cache;
pub mod client;
pub mod concurrency;
pub mod enrich;
pub mod error;
mod macros;
pub mod pipeline;
pub mod sink;
pub mod state;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
