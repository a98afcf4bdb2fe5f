use cadastre::concurrency::halt::HaltSignal;
use cadastre::error::ErrorKind;
use cadastre::sink::memory::MemorySink;
use cadastre::state::store::memory::MemoryCheckpointStore;
use cadastre::test_utils::{ScriptedClient, fields};
use cadastre::types::{Checkpoint, RelatedCategory};
use cadastre_telemetry::tracing::init_test_tracing;
use serde_json::json;

use crate::support::{test_config, test_pipeline};

#[tokio::test]
async fn run_fails_without_ward_codes() {
    init_test_tracing();

    let halt = HaltSignal::new();
    let pipeline = test_pipeline(
        test_config(1, 1, 10),
        &[],
        ScriptedClient::new(halt.clone()),
        MemorySink::new(),
        MemoryCheckpointStore::new(),
        halt,
    );

    let err = pipeline.run().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[tokio::test]
async fn records_are_written_in_ceil_m_over_b_batches() {
    init_test_tracing();

    // One sheet of 5 plots with a batch size of 2 yields 3 sink batches.
    let halt = HaltSignal::new();
    let mut client = ScriptedClient::new(halt.clone());
    for plot in 1..=5 {
        client = client.with_plot("W1", 1, plot, fields(json!({ "MaThua": plot.to_string() })));
    }

    let sink = MemorySink::new();
    let checkpoints = MemoryCheckpointStore::new();
    let pipeline = test_pipeline(
        test_config(1, 5, 2),
        &["W1"],
        client.clone(),
        sink.clone(),
        checkpoints.clone(),
        halt,
    );

    pipeline.run().await.unwrap();

    assert_eq!(sink.batches().await, 3);
    assert_eq!(sink.records().await.len(), 5);
    assert_eq!(client.plot_fetch_count(), 5);
    assert_eq!(
        checkpoints.history().await,
        vec![
            Checkpoint::new(1, 3, 0),
            Checkpoint::new(1, 5, 0),
            Checkpoint::new(2, 1, 0),
        ]
    );
}

#[tokio::test]
async fn enrichment_merges_reference_fields_into_written_records() {
    init_test_tracing();

    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone())
        .with_plot(
            "W1",
            1,
            1,
            fields(json!({ "MaThua": "7", "MaDuAnQH": "DA-01" })),
        )
        .with_related(
            RelatedCategory::ZoneProject,
            "DA-01",
            json!({ "TenDuAn": "Khu A" }),
        );

    let sink = MemorySink::new();
    let pipeline = test_pipeline(
        test_config(1, 1, 10),
        &["W1"],
        client,
        sink.clone(),
        MemoryCheckpointStore::new(),
        halt,
    );

    pipeline.run().await.unwrap();

    let records = sink.records().await;
    assert_eq!(records.len(), 1);

    let written = records[0].fields();
    assert_eq!(written.get("DuAnQH_TenDuAn"), Some(&json!("Khu A")));
    // Primary fields survive the merge unchanged.
    assert_eq!(written.get("MaThua"), Some(&json!("7")));
    assert_eq!(written.get("MaDuAnQH"), Some(&json!("DA-01")));
}

#[tokio::test]
async fn empty_sheets_still_advance_the_checkpoint() {
    init_test_tracing();

    // Nothing is programmed, so every plot comes back without data; the
    // walk must still cover the whole index space and record progress.
    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone());
    let sink = MemorySink::new();
    let checkpoints = MemoryCheckpointStore::new();
    let pipeline = test_pipeline(
        test_config(2, 3, 2),
        &["W1"],
        client.clone(),
        sink.clone(),
        checkpoints.clone(),
        halt,
    );

    pipeline.run().await.unwrap();

    assert_eq!(sink.batches().await, 0);
    assert_eq!(client.plot_fetch_count(), 6);

    let history = checkpoints.history().await;
    assert_eq!(
        history,
        vec![
            Checkpoint::new(1, 3, 0),
            Checkpoint::new(2, 1, 0),
            Checkpoint::new(2, 3, 0),
            Checkpoint::new(3, 1, 0),
        ]
    );
    assert!(history.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn full_walk_covers_every_ward_in_order() {
    init_test_tracing();

    let halt = HaltSignal::new();
    let mut client = ScriptedClient::new(halt.clone());
    for ward in ["W1", "W2"] {
        for sheet in 1..=2 {
            for plot in 1..=2 {
                client = client.with_plot(
                    ward,
                    sheet,
                    plot,
                    fields(json!({ "PhuongXa": ward, "SoTo": sheet, "SoThua": plot })),
                );
            }
        }
    }

    let sink = MemorySink::new();
    let checkpoints = MemoryCheckpointStore::new();
    let pipeline = test_pipeline(
        test_config(2, 2, 2),
        &["W1", "W2"],
        client.clone(),
        sink.clone(),
        checkpoints.clone(),
        halt,
    );

    pipeline.run().await.unwrap();

    assert_eq!(sink.records().await.len(), 8);
    assert_eq!(sink.batches().await, 4);
    assert_eq!(client.plot_fetch_count(), 8);
    assert_eq!(
        checkpoints.history().await,
        vec![
            Checkpoint::new(1, 3, 0),
            Checkpoint::new(2, 1, 0),
            Checkpoint::new(2, 3, 0),
            Checkpoint::new(3, 1, 0),
            Checkpoint::new(1, 3, 1),
            Checkpoint::new(2, 1, 1),
            Checkpoint::new(2, 3, 1),
            Checkpoint::new(3, 1, 1),
        ]
    );
}
