use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::{
    BatchConfig, EndpointsConfig, RetryConfig, ValidationError, WalkConfig,
};

/// Filesystem locations for harvester state and output.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Append-only JSONL log that enriched records are written to.
    #[serde(default = "default_output_path")]
    pub output_path: String,
    /// JSON file holding the resume checkpoint.
    #[serde(default = "default_checkpoint_path")]
    pub checkpoint_path: String,
    /// Line-oriented file listing the ward codes to walk, in order.
    #[serde(default = "default_wards_path")]
    pub wards_path: String,
}

fn default_output_path() -> String {
    "output/planning_data.jsonl".to_string()
}

fn default_checkpoint_path() -> String {
    "output/progress.json".to_string()
}

fn default_wards_path() -> String {
    "domains/wards.txt".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            checkpoint_path: default_checkpoint_path(),
            wards_path: default_wards_path(),
        }
    }
}

impl StorageConfig {
    /// Validates that no path is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_path.is_empty() {
            return Err(ValidationError::EmptyPath("storage.output_path"));
        }

        if self.checkpoint_path.is_empty() {
            return Err(ValidationError::EmptyPath("storage.checkpoint_path"));
        }

        if self.wards_path.is_empty() {
            return Err(ValidationError::EmptyPath("storage.wards_path"));
        }

        Ok(())
    }
}

/// Configuration for a harvest run.
///
/// Contains all settings required to walk the index space and fetch records:
/// upstream endpoints, walk bounds, batching parameters, the transport retry
/// policy, and storage locations.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HarvestConfig {
    /// Upstream planning-data API endpoints.
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    /// Index-space bounds per ward and sheet.
    #[serde(default)]
    pub walk: WalkConfig,
    /// Batch size and per-phase fetch concurrency.
    #[serde(default)]
    pub batch: BatchConfig,
    /// Transport-level retry policy.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Filesystem locations for state and output.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Per-request timeout in milliseconds.
    ///
    /// Default: 20000ms (20 seconds)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    20000
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointsConfig::default(),
            walk: WalkConfig::default(),
            batch: BatchConfig::default(),
            retry: RetryConfig::default(),
            storage: StorageConfig::default(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl HarvestConfig {
    /// Returns the per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validates the whole configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.endpoints.validate()?;
        self.walk.validate()?;
        self.batch.validate()?;
        self.retry.validate()?;
        self.storage.validate()?;

        if self.request_timeout_ms == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "request_timeout_ms",
                constraint: "must be greater than 0",
            });
        }

        Ok(())
    }
}
