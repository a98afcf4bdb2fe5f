use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Bounds of the index space walked per ward.
///
/// Every ward is walked over sheets `1..=max_sheet_number`, and every sheet
/// over plots `1..=max_plot_number`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WalkConfig {
    /// Highest sheet number probed within a ward.
    #[serde(default = "default_max_sheet_number")]
    pub max_sheet_number: u32,
    /// Highest plot number probed within a sheet.
    #[serde(default = "default_max_plot_number")]
    pub max_plot_number: u32,
}

impl WalkConfig {
    /// Default highest sheet number.
    pub const DEFAULT_MAX_SHEET_NUMBER: u32 = 400;

    /// Default highest plot number.
    pub const DEFAULT_MAX_PLOT_NUMBER: u32 = 1000;

    /// Validates walk bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_sheet_number == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "walk.max_sheet_number",
                constraint: "must be greater than 0",
            });
        }

        if self.max_plot_number == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "walk.max_plot_number",
                constraint: "must be greater than 0",
            });
        }

        Ok(())
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_sheet_number: default_max_sheet_number(),
            max_plot_number: default_max_plot_number(),
        }
    }
}

fn default_max_sheet_number() -> u32 {
    WalkConfig::DEFAULT_MAX_SHEET_NUMBER
}

fn default_max_plot_number() -> u32 {
    WalkConfig::DEFAULT_MAX_PLOT_NUMBER
}
