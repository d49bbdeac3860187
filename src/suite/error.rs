//! Error types for the test suite workflow.

use thiserror::Error;

use crate::credentials::CredentialError;
use crate::runner::RunnerError;
use crate::runtime::{PLATFORM_NODE_VERSION, VersionError};

const REQUIREMENTS_URL: &str = "https://github.com/relayhq/relay-cli#requirements";

/// Errors raised while loading the test suite configuration.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SuiteConfigLoadError {
    /// Raised when configuration parsing fails.
    #[error("test configuration parsing failed: {0}")]
    Parse(String),
}

/// Errors surfaced while running the test suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Raised when configuration is missing required values. The error message
    /// includes guidance on how to provide the value via environment variable
    /// or configuration file.
    #[error("missing {field}: set RELAY_TEST_{env_suffix} or add {field} to [test] in relay.toml", env_suffix = field.to_uppercase())]
    InvalidConfig {
        /// Configuration field that failed validation.
        field: String,
    },
    /// Raised when the local runtime version differs from the platform's.
    #[error(
        "tests run on Node {actual} locally, but the platform runs your app on Node {pinned}; the versions must match exactly (see {docs_url} for more info)",
        pinned = PLATFORM_NODE_VERSION,
        docs_url = REQUIREMENTS_URL
    )]
    VersionMismatch {
        /// Version reported by the local runtime.
        actual: String,
    },
    /// Raised when the local runtime version cannot be determined.
    #[error("failed to determine the local Node version: {0}")]
    VersionProbe(#[from] VersionError),
    /// Raised when stored deploy credentials cannot be read.
    #[error("failed to read deploy credentials: {0}")]
    Credentials(#[from] CredentialError),
    /// Raised when the test runner cannot be launched.
    #[error("failed to launch the test runner: {0}")]
    Runner(#[from] RunnerError),
    /// Raised when the test script completes with a non-zero exit code.
    #[error("{program} exited with status {status_text}: {stderr}")]
    TestsFailed {
        /// Command name used to run the test script.
        program: String,
        /// Exit status as reported by the OS.
        status: Option<i32>,
        /// Human readable representation of the exit status.
        status_text: String,
        /// Stderr captured from the process.
        stderr: String,
    },
}
