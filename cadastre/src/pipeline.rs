//! The harvest pipeline: index-space walk and batch coordination.

use std::collections::HashSet;
use std::sync::Arc;

use cadastre_config::shared::HarvestConfig;
use tracing::{debug, info};

use crate::cache::ReferenceCache;
use crate::client::base::PlanningClient;
use crate::concurrency::executor::fetch_all;
use crate::concurrency::halt::HaltSignal;
use crate::enrich::enrich_record;
use crate::error::CadastreResult;
use crate::sink::base::RecordSink;
use crate::state::store::base::CheckpointStore;
use crate::types::{Checkpoint, PlotKey, RelatedCategory};

/// Drives a harvest run over the (ward, sheet, plot) index space.
///
/// The pipeline walks wards in order, sheets `1..=max_sheet_number` within
/// each ward, and plots `1..=max_plot_number` within each sheet, resuming
/// from the stored checkpoint. Plot keys are accumulated into fixed-size
/// batches; each batch goes through a two-phase concurrent fetch (primary
/// records, then uncached reference data), enrichment, a sink append, and a
/// checkpoint save.
///
/// The outer walk is strictly sequential: no two batches overlap and phase 2
/// of a batch never starts before phase 1 has fully completed, since its
/// task set is derived from phase 1's output. Concurrency exists only inside
/// a phase, bounded by the configured fetch width.
#[derive(Debug)]
pub struct Pipeline<C, S, K> {
    config: Arc<HarvestConfig>,
    wards: Vec<String>,
    client: C,
    sink: S,
    checkpoints: K,
    cache: ReferenceCache,
    halt: HaltSignal,
}

impl<C, S, K> Pipeline<C, S, K>
where
    C: PlanningClient + Clone + Send + Sync + 'static,
    S: RecordSink + Send + Sync,
    K: CheckpointStore + Send + Sync,
{
    /// Creates a new pipeline.
    ///
    /// `wards` is the ordered ward-code universe; checkpoint ward indices
    /// refer to positions in this list. The `halt` signal should be the same
    /// one the client observes, so that a critical fetch error stops the
    /// walk.
    pub fn new(
        config: HarvestConfig,
        wards: Vec<String>,
        client: C,
        sink: S,
        checkpoints: K,
        halt: HaltSignal,
    ) -> Self {
        Self {
            config: Arc::new(config),
            wards,
            client,
            sink,
            checkpoints,
            cache: ReferenceCache::new(),
            halt,
        }
    }

    /// Returns a handle to the pipeline's halt signal.
    pub fn halt_signal(&self) -> HaltSignal {
        self.halt.clone()
    }

    /// Returns a handle to the pipeline's reference-data cache.
    pub fn reference_cache(&self) -> ReferenceCache {
        self.cache.clone()
    }

    /// Runs the walk to completion or until the halt signal is set.
    ///
    /// Returns an error only for conditions that make the run itself
    /// impossible to continue (sink or checkpoint I/O failures); per-fetch
    /// failures are absorbed as missing records.
    pub async fn run(self) -> CadastreResult<()> {
        if self.wards.is_empty() {
            crate::bail!(
                crate::error::ErrorKind::InvalidState,
                "No ward codes to walk"
            );
        }

        let resume = self.checkpoints.load().await?;
        if resume.ward_index >= self.wards.len() {
            info!(
                ward_index = resume.ward_index,
                wards = self.wards.len(),
                "checkpoint is past the ward universe, nothing to do"
            );
            return Ok(());
        }

        info!(
            ward_index = resume.ward_index,
            sheet = resume.sheet_number,
            plot = resume.plot_number,
            wards = self.wards.len(),
            "starting harvest walk"
        );

        let max_sheet = self.config.walk.max_sheet_number;
        let max_plot = self.config.walk.max_plot_number;
        let batch_size = self.config.batch.max_size;

        for ward_index in resume.ward_index..self.wards.len() {
            if self.halt.is_halted() {
                break;
            }

            let ward_code = self.wards[ward_index].clone();
            let first_ward = ward_index == resume.ward_index;
            let sheet_start = if first_ward { resume.sheet_number } else { 1 };

            info!(
                ward = %ward_code,
                position = ward_index + 1,
                total = self.wards.len(),
                sheet_start,
                "processing ward"
            );

            for sheet in sheet_start..=max_sheet {
                if self.halt.is_halted() {
                    break;
                }

                // The resume plot applies only to the very first sheet of
                // the run; every later sheet starts at plot 1.
                let plot_start = if first_ward && sheet == sheet_start {
                    resume.plot_number
                } else {
                    1
                };

                let mut batch = Vec::with_capacity(batch_size);
                for plot in plot_start..=max_plot {
                    if self.halt.is_halted() {
                        break;
                    }

                    batch.push(PlotKey::new(ward_code.clone(), sheet, plot));

                    if batch.len() >= batch_size {
                        self.process_batch(std::mem::take(&mut batch)).await?;

                        // A halt raised mid-batch means the batch may be
                        // incomplete; keep the previous checkpoint so those
                        // plots are revisited on resume.
                        if self.halt.is_halted() {
                            break;
                        }

                        self.checkpoints
                            .save(Checkpoint::new(sheet, plot + 1, ward_index))
                            .await?;
                    }
                }

                if !self.halt.is_halted() {
                    if !batch.is_empty() {
                        self.process_batch(batch).await?;
                    }

                    // Forward progress is saved even for sheets whose plots
                    // all came back empty.
                    self.checkpoints
                        .save(Checkpoint::new(sheet + 1, 1, ward_index))
                        .await?;
                }
            }
        }

        if self.halt.is_halted() {
            info!("halt signal set, walk stopped; resume state preserved");
        } else {
            info!("finished walking all wards");
        }

        Ok(())
    }

    /// Processes one batch: two-phase fetch, enrichment, sink append.
    async fn process_batch(&self, keys: Vec<PlotKey>) -> CadastreResult<()> {
        if keys.is_empty() || self.halt.is_halted() {
            return Ok(());
        }

        let width = self.config.batch.max_concurrent_fetches;

        // Phase 1: primary records. Keys without data are simply dropped.
        let primary_tasks: Vec<_> = keys
            .into_iter()
            .map(|key| {
                let client = self.client.clone();
                async move { client.fetch_plot(&key).await }
            })
            .collect();

        let records = fetch_all(width, primary_tasks).await;
        if records.is_empty() {
            debug!("batch produced no primary records");
            return Ok(());
        }

        debug!(records = records.len(), "fetched primary records");

        // Collect the reference codes this batch needs but the cache lacks,
        // deduplicated so no (category, code) pair is fetched twice.
        let mut seen = HashSet::new();
        let mut pending = Vec::new();
        for record in &records {
            for category in RelatedCategory::ALL {
                let Some(code) = record.reference_code(category) else {
                    continue;
                };

                if seen.insert((category, code.to_string()))
                    && !self.cache.contains(category, code).await
                {
                    pending.push((category, code.to_string()));
                }
            }
        }

        // Phase 2: reference data, cache-aware. Only runs when this batch
        // actually discovered new codes.
        if !pending.is_empty() {
            let related_tasks: Vec<_> = pending
                .into_iter()
                .map(|(category, code)| {
                    let client = self.client.clone();
                    let cache = self.cache.clone();
                    async move {
                        let entity = client.fetch_related(category, &code).await?;
                        cache.insert(category, code, entity).await;
                        Some(())
                    }
                })
                .collect();

            let cached = fetch_all(width, related_tasks).await.len();
            debug!(cached, "fetched reference data");
        }

        // Enrichment is best-effort and always attempted: codes cached by
        // earlier batches still apply to this one.
        let mut enriched = Vec::with_capacity(records.len());
        for record in records {
            enriched.push(enrich_record(&self.cache, record).await);
        }

        self.sink.write_records(enriched).await
    }
}
