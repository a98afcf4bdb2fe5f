//! Shared configuration types for the cadastre harvester.

mod base;
mod batch;
mod endpoints;
mod harvest;
mod retry;
mod walk;

pub use base::ValidationError;
pub use batch::BatchConfig;
pub use endpoints::EndpointsConfig;
pub use harvest::{HarvestConfig, StorageConfig};
pub use retry::RetryConfig;
pub use walk::WalkConfig;
