use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Endpoint URLs for the upstream planning-data API.
///
/// All endpoints are read-only GET endpoints taking query parameters. The
/// defaults point at the Da Nang planning-information service the harvester
/// was built for.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointsConfig {
    /// Endpoint returning the primary record for a (sheet, plot, ward) triple.
    #[serde(default = "default_plot_url")]
    pub plot_url: String,
    /// Endpoint returning a zone project by code.
    #[serde(default = "default_zone_project_url")]
    pub zone_project_url: String,
    /// Endpoint returning a sub-zone plan by code.
    #[serde(default = "default_sub_zone_plan_url")]
    pub sub_zone_plan_url: String,
    /// Endpoint returning architecture-control info by code.
    #[serde(default = "default_architecture_url")]
    pub architecture_url: String,
}

const API_BASE: &str = "https://thongtinquyhoachxaydung.danang.gov.vn/api";

fn default_plot_url() -> String {
    format!("{API_BASE}/ranh-gioi-qh/tim-theo-to-thua")
}

fn default_zone_project_url() -> String {
    format!("{API_BASE}/duanqh/tim-theo-ma")
}

fn default_sub_zone_plan_url() -> String {
    format!("{API_BASE}/duanqh/tim-theo-ma-phan-khu")
}

fn default_architecture_url() -> String {
    format!("{API_BASE}/kien-truc/tim-theo-ma")
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            plot_url: default_plot_url(),
            zone_project_url: default_zone_project_url(),
            sub_zone_plan_url: default_sub_zone_plan_url(),
            architecture_url: default_architecture_url(),
        }
    }
}

impl EndpointsConfig {
    /// Validates that every endpoint is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let endpoints = [
            ("endpoints.plot_url", &self.plot_url),
            ("endpoints.zone_project_url", &self.zone_project_url),
            ("endpoints.sub_zone_plan_url", &self.sub_zone_plan_url),
            ("endpoints.architecture_url", &self.architecture_url),
        ];

        for (field, url) in endpoints {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidEndpointUrl(field));
            }
        }

        Ok(())
    }
}
