//! Telemetry initialization for cadastre services.
//!
//! Provides tracing setup for binaries and tests. Log filtering is driven by
//! the standard `RUST_LOG` environment variable with a sensible default.

pub mod tracing;
