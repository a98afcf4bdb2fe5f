//! Configuration types and loading for the cadastre harvester.
//!
//! Provides the shared configuration structures consumed by the core library
//! and the harvester binary, together with a layered loader that merges base
//! files, environment-specific files, and `APP_`-prefixed environment
//! variable overrides.

pub mod environment;
pub mod load;
pub mod shared;
