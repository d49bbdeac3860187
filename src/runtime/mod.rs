//! Host runtime version checks against the pinned platform runtime.
//!
//! Apps execute on a hosted Node.js runtime pinned to an exact version.
//! Local test runs must use the same version so behaviour observed locally
//! matches production.

use std::process::Command;

use thiserror::Error;

/// Node.js version the platform executes app code on.
///
/// Comparison is exact string equality against the `v`-prefixed form
/// reported by `node --version`.
pub const PLATFORM_NODE_VERSION: &str = "v4.3.2";

/// Errors raised while probing the host runtime version.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum VersionError {
    /// Raised when the version probe cannot be spawned.
    #[error("failed to spawn {program}: {message}")]
    Probe {
        /// Executable that failed to start.
        program: String,
        /// Operating system error string.
        message: String,
    },
    /// Raised when the probe produces no version string.
    #[error("{program} --version produced no version string")]
    Unparseable {
        /// Executable that produced the empty output.
        program: String,
    },
}

/// Abstraction over host runtime version lookup to support fakes in tests.
pub trait VersionOracle {
    /// Returns the `v`-prefixed version string of the host runtime.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] when the version cannot be determined.
    fn current_version(&self) -> Result<String, VersionError>;
}

/// Probes the configured Node.js executable for its version.
#[derive(Clone, Debug)]
pub struct NodeVersionOracle {
    node_bin: String,
}

impl NodeVersionOracle {
    /// Creates an oracle that probes the given executable.
    #[must_use]
    pub fn new(node_bin: impl Into<String>) -> Self {
        Self {
            node_bin: node_bin.into(),
        }
    }
}

impl VersionOracle for NodeVersionOracle {
    fn current_version(&self) -> Result<String, VersionError> {
        let output = Command::new(&self.node_bin)
            .arg("--version")
            .output()
            .map_err(|err| VersionError::Probe {
                program: self.node_bin.clone(),
                message: err.to_string(),
            })?;

        parse_version_output(&self.node_bin, &String::from_utf8_lossy(&output.stdout))
    }
}

fn parse_version_output(program: &str, raw: &str) -> Result<String, VersionError> {
    let version = raw.trim();
    if version.is_empty() {
        return Err(VersionError::Unparseable {
            program: program.to_owned(),
        });
    }
    Ok(version.to_owned())
}
