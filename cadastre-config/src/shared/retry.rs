use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Configuration for the transport-level retry policy.
///
/// Applied uniformly to every fetch: transient transport failures and
/// retryable HTTP statuses are retried with exponential backoff until the
/// attempt budget is exhausted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of attempts for a single fetch, including the first one.
    ///
    /// Default: 3
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry.
    ///
    /// Specified in milliseconds for serialization compatibility.
    /// Default: 1000ms (1 second)
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay between attempts.
    ///
    /// The backoff schedule will not exceed this delay.
    /// Specified in milliseconds for serialization compatibility.
    /// Default: 30000ms (30 seconds)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff between attempts.
    ///
    /// Must be >= 1.0.
    /// Default: 2.0
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_factor() -> f64 {
    2.0
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

impl RetryConfig {
    /// Returns the initial retry delay as a [`Duration`].
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Returns the maximum retry delay as a [`Duration`].
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// Validates retry configuration settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "retry.max_attempts",
                constraint: "must be greater than 0",
            });
        }

        if self.backoff_factor < 1.0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "retry.backoff_factor",
                constraint: "must be at least 1.0",
            });
        }

        Ok(())
    }
}
