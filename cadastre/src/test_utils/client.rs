use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::client::base::PlanningClient;
use crate::concurrency::halt::HaltSignal;
use crate::types::{FieldMap, PlotKey, PrimaryRecord, RelatedCategory, RelatedEntity};

#[derive(Debug, Default)]
struct Inner {
    plots: Mutex<HashMap<(String, u32, u32), FieldMap>>,
    related: Mutex<HashMap<(RelatedCategory, String), Value>>,
    critical_plots: Mutex<HashSet<(String, u32, u32)>>,
    fetched_plots: Mutex<Vec<PlotKey>>,
    related_fetches: Mutex<HashMap<(RelatedCategory, String), usize>>,
}

/// Scripted [`PlanningClient`] for tests.
///
/// Responses are programmed with the `with_*` methods; everything not
/// programmed yields "no data", like a sparse index space. Every fetch that
/// passes the halt check is recorded, so tests can assert on issued fetch
/// counts and on the exact set of keys the pipeline visited.
///
/// A plot marked critical simulates an upstream status >= 400: fetching it
/// trips the halt signal and yields no data.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClient {
    inner: Arc<Inner>,
    halt: HaltSignal,
}

impl ScriptedClient {
    /// Creates a client observing the given halt signal.
    pub fn new(halt: HaltSignal) -> Self {
        Self {
            inner: Arc::new(Inner::default()),
            halt,
        }
    }

    /// Programs the primary record returned for a plot.
    pub fn with_plot(
        self,
        ward_code: &str,
        sheet_number: u32,
        plot_number: u32,
        record: FieldMap,
    ) -> Self {
        self.inner
            .plots
            .lock()
            .unwrap()
            .insert((ward_code.to_string(), sheet_number, plot_number), record);
        self
    }

    /// Programs the payload returned for a related `(category, code)` pair.
    pub fn with_related(self, category: RelatedCategory, code: &str, payload: Value) -> Self {
        self.inner
            .related
            .lock()
            .unwrap()
            .insert((category, code.to_string()), payload);
        self
    }

    /// Marks a plot as answering with a critical status.
    pub fn with_critical_plot(self, ward_code: &str, sheet_number: u32, plot_number: u32) -> Self {
        self.inner
            .critical_plots
            .lock()
            .unwrap()
            .insert((ward_code.to_string(), sheet_number, plot_number));
        self
    }

    /// Every plot key fetched so far, in invocation order.
    pub fn fetched_plots(&self) -> Vec<PlotKey> {
        self.inner.fetched_plots.lock().unwrap().clone()
    }

    /// Total number of primary fetches issued.
    pub fn plot_fetch_count(&self) -> usize {
        self.inner.fetched_plots.lock().unwrap().len()
    }

    /// Total number of related fetches issued, across all pairs.
    pub fn related_fetch_count(&self) -> usize {
        self.inner.related_fetches.lock().unwrap().values().sum()
    }

    /// Number of related fetches issued for one `(category, code)` pair.
    pub fn related_fetch_count_for(&self, category: RelatedCategory, code: &str) -> usize {
        self.inner
            .related_fetches
            .lock()
            .unwrap()
            .get(&(category, code.to_string()))
            .copied()
            .unwrap_or(0)
    }
}

impl PlanningClient for ScriptedClient {
    async fn fetch_plot(&self, key: &PlotKey) -> Option<PrimaryRecord> {
        if self.halt.is_halted() {
            return None;
        }

        self.inner.fetched_plots.lock().unwrap().push(key.clone());

        let lookup = (key.ward_code.clone(), key.sheet_number, key.plot_number);
        if self.inner.critical_plots.lock().unwrap().contains(&lookup) {
            self.halt.halt();
            return None;
        }

        self.inner
            .plots
            .lock()
            .unwrap()
            .get(&lookup)
            .cloned()
            .map(PrimaryRecord::new)
    }

    async fn fetch_related(&self, category: RelatedCategory, code: &str) -> Option<RelatedEntity> {
        if self.halt.is_halted() {
            return None;
        }

        *self
            .inner
            .related_fetches
            .lock()
            .unwrap()
            .entry((category, code.to_string()))
            .or_insert(0) += 1;

        self.inner
            .related
            .lock()
            .unwrap()
            .get(&(category, code.to_string()))
            .cloned()
            .and_then(RelatedEntity::from_payload)
    }
}
