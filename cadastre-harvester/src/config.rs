use cadastre_config::load::load_config;
use cadastre_config::shared::HarvestConfig;

use crate::error::HarvesterResult;

/// Loads and validates the harvester configuration.
///
/// Uses the standard configuration loading mechanism from [`cadastre_config`]
/// and validates the resulting [`HarvestConfig`] before returning it.
pub fn load_harvest_config() -> HarvesterResult<HarvestConfig> {
    let config = load_config::<HarvestConfig>()?;
    config.validate()?;

    Ok(config)
}
