//! Stored deploy credentials for the Relay platform.
//!
//! The platform login tooling writes a `.relayrc` file containing the
//! account's deploy key. This module locates that file using the standard
//! discovery search order and reads the key back for commands that talk to
//! the platform. It never writes the file or prompts for input.

use std::future::Future;
use std::io;
use std::pin::Pin;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use ortho_config::ConfigDiscovery;
use serde::Deserialize;
use thiserror::Error;

const APP_NAME: &str = "relay";
const RC_ENV_VAR: &str = "RELAY_RC_PATH";
const RC_FILE_NAME: &str = "relayrc.json";
const RC_DOTFILE_NAME: &str = ".relayrc";
const RC_PROJECT_FILE_NAME: &str = ".relayrc";

/// Errors raised while reading stored deploy credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Raised when no credential file candidates are available.
    #[error("no credential file candidates were discovered")]
    NoCandidates,
    /// Raised when none of the candidate files exist.
    #[error(
        "no deploy credentials found; run the platform login first or point RELAY_RC_PATH at your .relayrc file"
    )]
    Missing,
    /// Raised when file system operations fail.
    #[error("failed to access {path}: {message}")]
    Io {
        /// Path that could not be accessed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when parsing credential file content fails.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path that could not be parsed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when the credential file has no usable deploy key.
    #[error("{path} does not contain a deployKey entry")]
    MissingDeployKey {
        /// Path that lacked the deploy key.
        path: Utf8PathBuf,
    },
}

/// Deploy credentials read from the rc file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credentials {
    /// Deploy key identifying the account to the platform.
    pub deploy_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawCredentials {
    #[serde(rename = "deployKey", default)]
    deploy_key: Option<String>,
}

/// Boxed future returned by credential sources.
pub type CredentialFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, CredentialError>> + Send + 'a>>;

/// Abstraction over credential lookup for dependency injection.
pub trait CredentialSource {
    /// Reads the stored deploy credentials.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the credentials cannot be located,
    /// read, or parsed.
    fn read(&self) -> CredentialFuture<'_, Credentials>;
}

/// Reads `.relayrc` using `OrthoConfig`'s discovery search order.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    discovery: ConfigDiscovery,
}

impl CredentialStore {
    /// Builds a credential store using the standard Relay discovery settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            discovery: ConfigDiscovery::builder(APP_NAME)
                .env_var(RC_ENV_VAR)
                .config_file_name(RC_FILE_NAME)
                .dotfile_name(RC_DOTFILE_NAME)
                .project_file_name(RC_PROJECT_FILE_NAME)
                .build(),
        }
    }

    /// Builds a credential store using an explicit discovery configuration.
    #[must_use]
    pub const fn with_discovery(discovery: ConfigDiscovery) -> Self {
        Self { discovery }
    }

    fn resolve_existing(&self) -> Result<Utf8PathBuf, CredentialError> {
        let candidates = self.discovery.utf8_candidates();
        if candidates.is_empty() {
            return Err(CredentialError::NoCandidates);
        }

        for candidate in &candidates {
            if path_exists(candidate)? {
                return Ok(candidate.clone());
            }
        }

        Err(CredentialError::Missing)
    }

    fn read_credentials(&self) -> Result<Credentials, CredentialError> {
        let path = self.resolve_existing()?;
        let contents = read_rc_file(&path)?;
        parse_credentials(&path, &contents)
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for CredentialStore {
    fn read(&self) -> CredentialFuture<'_, Credentials> {
        Box::pin(async move { self.read_credentials() })
    }
}

fn path_exists(path: &Utf8Path) -> Result<bool, CredentialError> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| CredentialError::Io {
        path: path.to_path_buf(),
        message: String::from("credential file path is missing a filename"),
    })?;

    match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir.try_exists(file_name).map_err(|err| CredentialError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(CredentialError::Io {
            path: parent.to_path_buf(),
            message: err.to_string(),
        }),
    }
}

fn read_rc_file(path: &Utf8Path) -> Result<String, CredentialError> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| CredentialError::Io {
        path: path.to_path_buf(),
        message: String::from("credential file path is missing a filename"),
    })?;

    let dir =
        Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| CredentialError::Io {
            path: parent.to_path_buf(),
            message: err.to_string(),
        })?;

    dir.read_to_string(file_name)
        .map_err(|err| CredentialError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn parse_credentials(path: &Utf8Path, contents: &str) -> Result<Credentials, CredentialError> {
    let raw: RawCredentials =
        serde_json::from_str(contents).map_err(|err| CredentialError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let deploy_key = raw
        .deploy_key
        .map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| CredentialError::MissingDeployKey {
            path: path.to_path_buf(),
        })?;

    Ok(Credentials { deploy_key })
}
