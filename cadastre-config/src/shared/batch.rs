use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Batch processing configuration for the harvest pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchConfig {
    /// Maximum number of plot keys accumulated before a batch is flushed.
    #[serde(default = "default_batch_max_size")]
    pub max_size: usize,
    /// Maximum number of HTTP fetches in flight at once within a batch phase.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

impl BatchConfig {
    /// Default maximum batch size.
    pub const DEFAULT_MAX_SIZE: usize = 100;

    /// Default fetch concurrency within a batch phase.
    pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 10;

    /// Validates batch configuration settings.
    ///
    /// Ensures both the batch size and the fetch concurrency are non-zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_size == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "batch.max_size",
                constraint: "must be greater than 0",
            });
        }

        if self.max_concurrent_fetches == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "batch.max_concurrent_fetches",
                constraint: "must be greater than 0",
            });
        }

        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_size: default_batch_max_size(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

fn default_batch_max_size() -> usize {
    BatchConfig::DEFAULT_MAX_SIZE
}

fn default_max_concurrent_fetches() -> usize {
    BatchConfig::DEFAULT_MAX_CONCURRENT_FETCHES
}

#[cfg(test)]
mod tests {
    use super::BatchConfig;

    #[test]
    fn default_batch_config_is_valid() {
        let config = BatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_size, BatchConfig::DEFAULT_MAX_SIZE);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let config = BatchConfig {
            max_size: 0,
            ..BatchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
