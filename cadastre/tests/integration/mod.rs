#![cfg(feature = "test-utils")]

mod cache_population_test;
mod halt_test;
mod pipeline_test;
mod resume_test;
mod support;
