use std::time::Duration;

use cadastre_config::shared::{EndpointsConfig, HarvestConfig, RetryConfig};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::client::base::PlanningClient;
use crate::client::headers::browser_headers;
use crate::concurrency::halt::HaltSignal;
use crate::error::{CadastreResult, ErrorKind};
use crate::types::{PlotKey, PrimaryRecord, RelatedCategory, RelatedEntity};

/// Explicit transport-level retry policy.
///
/// Applied uniformly to every fetch, independent of the pipeline logic:
/// transient transport failures and retryable HTTP statuses are retried on
/// an exponential backoff schedule until the attempt budget is exhausted.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    backoff_factor: f64,
}

/// HTTP statuses that indicate a transient upstream condition worth retrying.
const RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

impl RetryPolicy {
    /// Builds a policy from its configuration.
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: config.initial_delay(),
            max_delay: config.max_delay(),
            backoff_factor: config.backoff_factor,
        }
    }

    /// Total number of attempts allowed for a single fetch.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the backoff delay to sleep after the given zero-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.powi(attempt as i32);
        self.initial_delay.mul_f64(factor).min(self.max_delay)
    }

    /// Returns whether a status is worth retrying before giving up.
    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        RETRYABLE_STATUSES.contains(&status.as_u16())
    }
}

/// Outcome of a single request attempt, before retry classification.
enum AttemptOutcome {
    /// A usable JSON payload.
    Payload(Value),
    /// The endpoint had no data for this query.
    NoData,
    /// A transient condition; the attempt may be retried.
    Transient(String),
    /// A critical status; the whole run must wind down.
    Critical(StatusCode),
}

/// [`PlanningClient`] backed by the upstream planning-data HTTP API.
///
/// Every fetch consults the halt signal before issuing network I/O, carries
/// browser-mimicking headers, and applies the transport retry policy. A
/// final status >= 400 trips the halt signal and yields absence; every other
/// failure mode is absorbed into absence without touching the signal.
#[derive(Debug, Clone)]
pub struct HttpPlanningClient {
    client: reqwest::Client,
    endpoints: EndpointsConfig,
    retry: RetryPolicy,
    halt: HaltSignal,
}

impl HttpPlanningClient {
    /// Creates a client from the harvest configuration.
    pub fn new(config: &HarvestConfig, halt: HaltSignal) -> CadastreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| {
                crate::cadastre_error!(
                    ErrorKind::ConfigError,
                    "Failed to build the HTTP client",
                    source: err
                )
            })?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            retry: RetryPolicy::new(&config.retry),
            halt,
        })
    }

    /// Endpoint URL serving the given related category.
    fn related_url(&self, category: RelatedCategory) -> &str {
        match category {
            RelatedCategory::ZoneProject => &self.endpoints.zone_project_url,
            RelatedCategory::SubZonePlan => &self.endpoints.sub_zone_plan_url,
            RelatedCategory::Architecture => &self.endpoints.architecture_url,
        }
    }

    /// Fetches a JSON payload from `url` with retries and halt handling.
    ///
    /// Returns [`None`] for every non-payload outcome; a critical status has
    /// already tripped the halt signal by the time this returns.
    async fn fetch_payload(&self, url: &str, params: &[(&str, String)]) -> Option<Value> {
        for attempt in 0..self.retry.max_attempts() {
            if self.halt.is_halted() {
                return None;
            }

            if attempt > 0 {
                tokio::time::sleep(self.retry.delay_for(attempt - 1)).await;
            }

            match self.attempt(url, params).await {
                AttemptOutcome::Payload(payload) => return Some(payload),
                AttemptOutcome::NoData => return None,
                AttemptOutcome::Transient(reason) => {
                    debug!(url, attempt, reason, "fetch attempt failed, will retry");
                }
                AttemptOutcome::Critical(status) => {
                    error!(url, %status, "critical status from upstream, halting the run");
                    self.halt.halt();
                    return None;
                }
            }
        }

        warn!(url, "fetch failed after exhausting the retry budget");
        None
    }

    /// Performs one request attempt and classifies its outcome.
    async fn attempt(&self, url: &str, params: &[(&str, String)]) -> AttemptOutcome {
        let response = self
            .client
            .get(url)
            .headers(browser_headers(url))
            .query(params)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => return AttemptOutcome::Transient(err.to_string()),
        };

        let status = response.status();
        if status.as_u16() >= 400 {
            if self.retry.is_retryable_status(status) {
                return AttemptOutcome::Transient(format!("retryable status {status}"));
            }

            return AttemptOutcome::Critical(status);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return AttemptOutcome::Transient(err.to_string()),
        };

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "[]" {
            return AttemptOutcome::NoData;
        }

        match serde_json::from_str(trimmed) {
            Ok(payload) => AttemptOutcome::Payload(payload),
            // A non-JSON body from a 2xx response carries no data for this key.
            Err(_) => AttemptOutcome::NoData,
        }
    }
}

impl PlanningClient for HttpPlanningClient {
    async fn fetch_plot(&self, key: &PlotKey) -> Option<PrimaryRecord> {
        let params = [
            ("soTo", key.sheet_number.to_string()),
            ("soThua", key.plot_number.to_string()),
            ("phuongXa", key.ward_code.clone()),
        ];

        let payload = self
            .fetch_payload(&self.endpoints.plot_url, &params)
            .await?;

        // The plot endpoint replies with an array; element 0 is the record.
        match payload {
            Value::Array(mut elements) if !elements.is_empty() => {
                match elements.swap_remove(0) {
                    Value::Object(fields) => Some(PrimaryRecord::new(fields)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    async fn fetch_related(&self, category: RelatedCategory, code: &str) -> Option<RelatedEntity> {
        let params = [("code", code.to_string())];

        let payload = self
            .fetch_payload(self.related_url(category), &params)
            .await?;

        RelatedEntity::from_payload(payload)
    }
}
