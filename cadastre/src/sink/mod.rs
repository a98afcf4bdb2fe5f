//! Output sinks for enriched records.

pub mod base;
pub mod jsonl;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use base::RecordSink;
pub use jsonl::JsonlSink;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemorySink;
