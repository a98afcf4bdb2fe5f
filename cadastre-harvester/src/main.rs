//! Cadastral planning-data harvester service binary.
//!
//! Loads configuration, initializes tracing, and runs the harvest pipeline
//! that walks the (ward, sheet, plot) index space and appends enriched
//! records to the JSONL output log. Interrupt signals stop the walk at the
//! next batch boundary, leaving a checkpoint the next run resumes from.

use tracing::error;

use crate::config::load_harvest_config;
use crate::core::start_harvester_with_config;
use crate::error::HarvesterResult;

mod config;
mod core;
mod error;
mod wards;

/// Entry point for the harvester service.
///
/// Loads configuration, initializes tracing, starts the async runtime, and
/// launches the harvest pipeline.
fn main() -> HarvesterResult<()> {
    let config = load_harvest_config()?;

    cadastre_telemetry::tracing::init_tracing(env!("CARGO_BIN_NAME"))?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(config))?;

    Ok(())
}

/// Main async entry point that runs the harvest pipeline and logs failures.
async fn async_main(config: cadastre_config::shared::HarvestConfig) -> HarvesterResult<()> {
    if let Err(err) = start_harvester_with_config(config).await {
        error!("{err}");
        return Err(err);
    }

    Ok(())
}
