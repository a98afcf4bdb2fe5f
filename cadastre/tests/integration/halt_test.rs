use cadastre::concurrency::halt::HaltSignal;
use cadastre::sink::memory::MemorySink;
use cadastre::state::store::memory::MemoryCheckpointStore;
use cadastre::test_utils::{ScriptedClient, fields};
use cadastre::types::Checkpoint;
use cadastre_telemetry::tracing::init_test_tracing;
use serde_json::json;

use crate::support::{test_config, test_pipeline};

#[tokio::test]
async fn critical_fetch_stops_the_walk_and_freezes_the_checkpoint() {
    init_test_tracing();

    // Sheet 1 completes normally; the first plot of sheet 2 answers with a
    // critical status, which trips the halt signal mid-batch.
    let halt = HaltSignal::new();
    let mut client = ScriptedClient::new(halt.clone()).with_critical_plot("W1", 2, 1);
    for plot in 1..=4 {
        client = client.with_plot("W1", 1, plot, fields(json!({ "MaThua": plot.to_string() })));
    }

    let sink = MemorySink::new();
    let checkpoints = MemoryCheckpointStore::new();
    let pipeline = test_pipeline(
        test_config(3, 4, 2),
        &["W1"],
        client.clone(),
        sink.clone(),
        checkpoints.clone(),
        halt.clone(),
    );

    pipeline.run().await.unwrap();

    assert!(halt.is_halted());

    // No checkpoint covers the interrupted batch, so sheet 2 is revisited
    // in full on resume.
    assert_eq!(
        checkpoints.history().await,
        vec![
            Checkpoint::new(1, 3, 0),
            Checkpoint::new(1, 5, 0),
            Checkpoint::new(2, 1, 0),
        ]
    );

    // Sheet 1 was fully written; the walk never reached sheet 3.
    assert_eq!(sink.records().await.len(), 4);
    assert!(
        client
            .fetched_plots()
            .iter()
            .all(|key| key.sheet_number < 3)
    );
}

#[tokio::test]
async fn no_fetches_are_issued_after_an_external_halt() {
    init_test_tracing();

    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone())
        .with_plot("W1", 1, 1, fields(json!({ "MaThua": "1" })));

    let pipeline = test_pipeline(
        test_config(400, 1000, 100),
        &["W1", "W2"],
        client.clone(),
        MemorySink::new(),
        MemoryCheckpointStore::new(),
        halt.clone(),
    );

    // Halt before the walk starts, as a shutdown signal would.
    halt.halt();
    pipeline.run().await.unwrap();

    assert_eq!(client.plot_fetch_count(), 0);
    assert_eq!(client.related_fetch_count(), 0);
}
