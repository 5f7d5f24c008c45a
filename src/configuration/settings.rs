use crate::configuration::constants::common::ENV_PREFIX;
use config::{Config, ConfigError, Environment, File};
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

/// Defaults for a run, read from an optional settings file and `SIMTEST_*`
/// environment variables. Command-line flags take precedence.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tempdir: Option<PathBuf>,
    pub datadir: Option<PathBuf>,
    pub verbose: bool,
    pub xml: bool,
    pub fullness: Option<String>,
    /// Also register the deliberately failing suites.
    pub fixtures: bool,
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        if let Some(file) = file {
            config.merge(File::from(file))?;
        }
        config.merge(Environment::with_prefix(ENV_PREFIX))?;
        config.try_into()
    }
}
