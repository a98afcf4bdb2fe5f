use cadastre::concurrency::halt::HaltSignal;
use cadastre::sink::memory::MemorySink;
use cadastre::state::store::memory::MemoryCheckpointStore;
use cadastre::test_utils::{ScriptedClient, fields};
use cadastre::types::RelatedCategory;
use cadastre_telemetry::tracing::init_test_tracing;
use serde_json::json;

use crate::support::{test_config, test_pipeline};

#[tokio::test]
async fn shared_codes_are_fetched_once_across_batches() {
    init_test_tracing();

    // Plots 1 and 3 land in different batches but reference the same zone
    // project; the second batch must be served from the cache.
    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone())
        .with_plot("W1", 1, 1, fields(json!({ "MaThua": "1", "MaDuAnQH": "DA-09" })))
        .with_plot("W1", 1, 2, fields(json!({ "MaThua": "2" })))
        .with_plot("W1", 1, 3, fields(json!({ "MaThua": "3", "MaDuAnQH": "DA-09" })))
        .with_plot("W1", 1, 4, fields(json!({ "MaThua": "4" })))
        .with_related(
            RelatedCategory::ZoneProject,
            "DA-09",
            json!({ "TenDuAn": "Khu A" }),
        );

    let sink = MemorySink::new();
    let pipeline = test_pipeline(
        test_config(1, 4, 2),
        &["W1"],
        client.clone(),
        sink.clone(),
        MemoryCheckpointStore::new(),
        halt,
    );
    let cache = pipeline.reference_cache();

    pipeline.run().await.unwrap();

    assert_eq!(
        client.related_fetch_count_for(RelatedCategory::ZoneProject, "DA-09"),
        1
    );
    assert_eq!(cache.len().await, 1);

    // Enrichment applies to both batches, including the one whose code was
    // already cached when it was processed.
    let records = sink.records().await;
    let enriched_plots: Vec<_> = records
        .iter()
        .filter(|record| record.fields().contains_key("DuAnQH_TenDuAn"))
        .map(|record| record.fields().get("MaThua").cloned())
        .collect();
    assert_eq!(enriched_plots, vec![Some(json!("1")), Some(json!("3"))]);
}

#[tokio::test]
async fn duplicate_codes_within_a_batch_are_fetched_once() {
    init_test_tracing();

    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone())
        .with_plot("W1", 1, 1, fields(json!({ "MaKVKT": "KT-1" })))
        .with_plot("W1", 1, 2, fields(json!({ "MaKVKT": "KT-1" })))
        .with_related(
            RelatedCategory::Architecture,
            "KT-1",
            json!({ "TenKhuVuc": "Trung tam" }),
        );

    let pipeline = test_pipeline(
        test_config(1, 2, 10),
        &["W1"],
        client.clone(),
        MemorySink::new(),
        MemoryCheckpointStore::new(),
        halt,
    );

    pipeline.run().await.unwrap();

    assert_eq!(
        client.related_fetch_count_for(RelatedCategory::Architecture, "KT-1"),
        1
    );
}

#[tokio::test]
async fn codes_without_data_are_retried_when_referenced_again() {
    init_test_tracing();

    // A code whose fetch yields nothing is not cached, so a later batch
    // referencing it triggers a fresh attempt.
    let halt = HaltSignal::new();
    let client = ScriptedClient::new(halt.clone())
        .with_plot("W1", 1, 1, fields(json!({ "MaQHPhanKhu": "PK-404" })))
        .with_plot("W1", 1, 3, fields(json!({ "MaQHPhanKhu": "PK-404" })));

    let pipeline = test_pipeline(
        test_config(1, 4, 2),
        &["W1"],
        client.clone(),
        MemorySink::new(),
        MemoryCheckpointStore::new(),
        halt,
    );
    let cache = pipeline.reference_cache();

    pipeline.run().await.unwrap();

    assert_eq!(
        client.related_fetch_count_for(RelatedCategory::SubZonePlan, "PK-404"),
        2
    );
    assert!(cache.is_empty().await);
}
