//! Persistence of the walk's resume state.

pub mod store;
