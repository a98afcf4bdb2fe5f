//! Concurrency primitives for the harvest pipeline.
//!
//! The [`halt`] module provides the process-wide cooperative halt flag that
//! every fetch path observes, and the [`executor`] module provides the
//! bounded-width parallel map used to run one batch phase's fetches.

pub mod executor;
pub mod halt;
