use cadastre::concurrency::halt::HaltSignal;
use cadastre::sink::memory::MemorySink;
use cadastre::state::store::memory::MemoryCheckpointStore;
use cadastre::test_utils::ScriptedClient;
use cadastre::types::{Checkpoint, PlotKey};
use cadastre_telemetry::tracing::init_test_tracing;

use crate::support::{test_config, test_pipeline};

#[tokio::test]
async fn resume_starts_exactly_at_the_stored_checkpoint() {
    init_test_tracing();

    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone());
    let checkpoints = MemoryCheckpointStore::resuming_from(Checkpoint::new(5, 37, 3));
    let pipeline = test_pipeline(
        test_config(5, 40, 10),
        &["W0", "W1", "W2", "W3"],
        client.clone(),
        MemorySink::new(),
        checkpoints.clone(),
        halt,
    );

    pipeline.run().await.unwrap();

    let fetched = client.fetched_plots();
    assert!(fetched.contains(&PlotKey::new("W3", 5, 37)));
    assert!(!fetched.contains(&PlotKey::new("W3", 5, 36)));
    assert!(fetched.iter().all(|key| key.ward_code == "W3"));
    assert!(fetched.iter().all(|key| key.sheet_number == 5));
    assert_eq!(client.plot_fetch_count(), 4);

    assert_eq!(
        checkpoints.history().await.last(),
        Some(&Checkpoint::new(6, 1, 3))
    );
}

#[tokio::test]
async fn resume_plot_offset_applies_only_to_the_first_sheet() {
    init_test_tracing();

    // Resuming at (2, 3) of a 2-plot-per-sheet space: sheet 2 contributes
    // nothing, but sheet 3 starts over at plot 1.
    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone());
    let pipeline = test_pipeline(
        test_config(3, 2, 10),
        &["W1"],
        client.clone(),
        MemorySink::new(),
        MemoryCheckpointStore::resuming_from(Checkpoint::new(2, 3, 0)),
        halt,
    );

    pipeline.run().await.unwrap();

    let mut fetched = client.fetched_plots();
    fetched.sort_by_key(|key| (key.sheet_number, key.plot_number));
    assert_eq!(
        fetched,
        vec![PlotKey::new("W1", 3, 1), PlotKey::new("W1", 3, 2)]
    );
}

#[tokio::test]
async fn checkpoint_past_the_ward_universe_is_a_completed_run() {
    init_test_tracing();

    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone());
    let pipeline = test_pipeline(
        test_config(2, 2, 10),
        &["W1", "W2"],
        client.clone(),
        MemorySink::new(),
        MemoryCheckpointStore::resuming_from(Checkpoint::new(1, 1, 2)),
        halt,
    );

    pipeline.run().await.unwrap();

    assert_eq!(client.plot_fetch_count(), 0);
}
