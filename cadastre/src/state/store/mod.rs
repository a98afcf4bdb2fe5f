//! Checkpoint stores.

pub mod base;
pub mod file;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use base::CheckpointStore;
pub use file::FileCheckpointStore;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryCheckpointStore;
