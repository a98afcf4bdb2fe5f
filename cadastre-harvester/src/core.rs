use std::path::Path;

use cadastre::client::HttpPlanningClient;
use cadastre::concurrency::halt::HaltSignal;
use cadastre::pipeline::Pipeline;
use cadastre::sink::JsonlSink;
use cadastre::state::store::FileCheckpointStore;
use cadastre_config::shared::{BatchConfig, HarvestConfig, RetryConfig, StorageConfig, WalkConfig};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{debug, info};

use crate::error::HarvesterResult;
use crate::wards::load_ward_codes;

/// Starts the harvester service with the provided configuration.
///
/// Loads the ward universe, wires the HTTP client, JSONL sink, and file
/// checkpoint store to a shared halt signal, and runs the pipeline until the
/// walk completes or the halt signal is set by an interrupt or a critical
/// upstream error.
pub async fn start_harvester_with_config(config: HarvestConfig) -> HarvesterResult<()> {
    info!("starting harvester service");

    log_config(&config);

    let wards = load_ward_codes(Path::new(&config.storage.wards_path))?;
    info!(wards = wards.len(), "loaded ward universe");

    let halt = HaltSignal::new();
    let client = HttpPlanningClient::new(&config, halt.clone())?;
    let sink = JsonlSink::new(&config.storage.output_path);
    let checkpoints = FileCheckpointStore::new(&config.storage.checkpoint_path);

    let pipeline = Pipeline::new(config, wards, client, sink, checkpoints, halt.clone());

    start_pipeline(pipeline, halt).await?;

    info!("harvester service completed");

    Ok(())
}

fn log_config(config: &HarvestConfig) {
    debug!(
        plot_url = config.endpoints.plot_url,
        zone_project_url = config.endpoints.zone_project_url,
        sub_zone_plan_url = config.endpoints.sub_zone_plan_url,
        architecture_url = config.endpoints.architecture_url,
        request_timeout_ms = config.request_timeout_ms,
        "endpoints config"
    );
    log_walk_config(&config.walk);
    log_batch_config(&config.batch);
    log_retry_config(&config.retry);
    log_storage_config(&config.storage);
}

fn log_walk_config(config: &WalkConfig) {
    debug!(
        max_sheet_number = config.max_sheet_number,
        max_plot_number = config.max_plot_number,
        "walk config"
    );
}

fn log_batch_config(config: &BatchConfig) {
    debug!(
        max_size = config.max_size,
        max_concurrent_fetches = config.max_concurrent_fetches,
        "batch config"
    );
}

fn log_retry_config(config: &RetryConfig) {
    debug!(
        max_attempts = config.max_attempts,
        initial_delay_ms = config.initial_delay_ms,
        max_delay_ms = config.max_delay_ms,
        backoff_factor = config.backoff_factor,
        "retry config"
    );
}

fn log_storage_config(config: &StorageConfig) {
    debug!(
        output_path = config.output_path,
        checkpoint_path = config.checkpoint_path,
        wards_path = config.wards_path,
        "storage config"
    );
}

/// Runs a pipeline and handles graceful shutdown signals.
///
/// Sets up handlers for SIGTERM and SIGINT that set the halt signal, then
/// waits for the pipeline. The walk stops at the next halt check; the batch
/// in flight finishes and the checkpoint on disk stays valid for resume.
async fn start_pipeline<C, S, K>(pipeline: Pipeline<C, S, K>, halt: HaltSignal) -> HarvesterResult<()>
where
    C: cadastre::client::PlanningClient + Clone + Send + Sync + 'static,
    S: cadastre::sink::RecordSink + Send + Sync,
    K: cadastre::state::store::CheckpointStore + Send + Sync,
{
    // Listen for SIGTERM, sent by orchestrators before SIGKILL during
    // termination, alongside interactive SIGINT.
    let shutdown_handle = tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(error) => {
                tracing::warn!(%error, "failed to register sigterm handler");
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("sigint (ctrl+c) received, stopping walk at the next batch boundary");
            }
            _ = sigterm.recv() => {
                info!("sigterm received, stopping walk at the next batch boundary");
            }
        }

        halt.halt();
    });

    let result = pipeline.run().await;

    // If the walk finished on its own the listener is still pending; drop it.
    shutdown_handle.abort();
    let _ = shutdown_handle.await;

    result?;

    Ok(())
}
