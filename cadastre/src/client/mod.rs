//! Clients for the upstream planning-data API.

pub mod base;
pub mod headers;
pub mod http;

pub use base::PlanningClient;
pub use http::HttpPlanningClient;
