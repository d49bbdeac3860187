//! Test suite configuration structures and validation.
//!
//! This module defines [`SuiteConfig`] for the executables the suite
//! workflow shells out to. Configuration is loaded via `ortho-config` which
//! merges defaults, configuration files, and environment variables.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::error::{SuiteConfigLoadError, SuiteError};

/// Executable settings loaded via `ortho-config`.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "RELAY_TEST",
    discovery(
        app_name = "relay",
        env_var = "RELAY_CONFIG_PATH",
        config_file_name = "relay.toml",
        dotfile_name = ".relay.toml",
        project_file_name = "relay.toml"
    )
)]
pub struct SuiteConfig {
    /// Path to the `npm` executable used to run the app's test script.
    #[ortho_config(default = "npm".to_owned())]
    pub npm_bin: String,
    /// Path to the `node` executable probed for the local runtime version.
    #[ortho_config(default = "node".to_owned())]
    pub node_bin: String,
}

impl SuiteConfig {
    /// Ensures configuration values are present after trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::InvalidConfig`] when any required field is empty.
    pub fn validate(&self) -> Result<(), SuiteError> {
        Self::require_value(&self.npm_bin, "npm_bin")?;
        Self::require_value(&self.node_bin, "node_bin")?;
        Ok(())
    }

    /// Loads configuration using defaults, configuration files, and
    /// environment variables, ignoring any CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteConfigLoadError::Parse`] when merging sources fails.
    pub fn load_without_cli_args() -> Result<Self, SuiteConfigLoadError> {
        Self::load_from_iter([std::ffi::OsString::from("relay")])
            .map_err(|err| SuiteConfigLoadError::Parse(err.to_string()))
    }

    fn require_value(value: &str, field: &str) -> Result<(), SuiteError> {
        if value.trim().is_empty() {
            return Err(SuiteError::InvalidConfig {
                field: field.to_owned(),
            });
        }
        Ok(())
    }
}
