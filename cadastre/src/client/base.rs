use std::future::Future;

use crate::types::{PlotKey, PrimaryRecord, RelatedCategory, RelatedEntity};

/// Trait for sources of primary and reference planning data.
///
/// [`PlanningClient`] implementations define how a primary record is fetched
/// for a plot and how reference entities are fetched by code. Both methods
/// return an absence value rather than an error: transient failures, empty
/// responses, and halt-signal short-circuits all collapse into [`None`],
/// because nothing below the batch coordinator raises per-fetch failures.
///
/// Implementations must be cheap to clone; the pipeline clones the client
/// into every concurrent fetch task.
pub trait PlanningClient {
    /// Fetches the primary record for a plot.
    ///
    /// Returns [`None`] when the plot has no data, the fetch failed after
    /// the transport retry budget, or the halt signal is set.
    fn fetch_plot(&self, key: &PlotKey) -> impl Future<Output = Option<PrimaryRecord>> + Send;

    /// Fetches the reference entity of `category` with the given code.
    ///
    /// Returns [`None`] under the same conditions as
    /// [`PlanningClient::fetch_plot`].
    fn fetch_related(
        &self,
        category: RelatedCategory,
        code: &str,
    ) -> impl Future<Output = Option<RelatedEntity>> + Send;
}
