//! Test utilities for exercising the harvest pipeline without a network.
//!
//! Available under the `test-utils` feature. The centerpiece is
//! [`ScriptedClient`], a [`crate::client::PlanningClient`] whose responses
//! are programmed up front and whose invocations are recorded, so tests can
//! assert on exactly which fetches the pipeline issued.

mod client;

pub use client::ScriptedClient;

use crate::types::FieldMap;

/// Converts a `serde_json::json!` object literal into a [`FieldMap`].
///
/// Panics if the value is not a JSON object; intended for test setup only.
pub fn fields(value: serde_json::Value) -> FieldMap {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
