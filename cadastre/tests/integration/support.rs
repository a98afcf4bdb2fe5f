use cadastre::concurrency::halt::HaltSignal;
use cadastre::pipeline::Pipeline;
use cadastre::sink::memory::MemorySink;
use cadastre::state::store::memory::MemoryCheckpointStore;
use cadastre::test_utils::ScriptedClient;
use cadastre_config::shared::HarvestConfig;

/// Builds a harvest config with small walk bounds suitable for tests.
pub fn test_config(max_sheet: u32, max_plot: u32, batch_size: usize) -> HarvestConfig {
    let mut config = HarvestConfig::default();
    config.walk.max_sheet_number = max_sheet;
    config.walk.max_plot_number = max_plot;
    config.batch.max_size = batch_size;
    config.batch.max_concurrent_fetches = 4;
    config
}

/// Wires a pipeline from a scripted client and in-memory stores.
pub fn test_pipeline(
    config: HarvestConfig,
    wards: &[&str],
    client: ScriptedClient,
    sink: MemorySink,
    checkpoints: MemoryCheckpointStore,
    halt: HaltSignal,
) -> Pipeline<ScriptedClient, MemorySink, MemoryCheckpointStore> {
    let wards = wards.iter().map(|ward| ward.to_string()).collect();
    Pipeline::new(config, wards, client, sink, checkpoints, halt)
}
