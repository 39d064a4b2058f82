//! Configuration loaders for scenarios covering failure paths.

use pythia_config::{Config, ConfigError};

use crate::bootstrap::ConfigLoader;

/// Loader that fails because no scope arguments are supplied.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        Config::load_from_iter(["pythia", "--http", ":0"])
    }
}
