//! Child process environment construction for test runs.
//!
//! The platform surfaces two logging streams while an app's suite runs: a
//! summary stream and a detailed stream. Both default to on; the quiet
//! flags subtract from that baseline rather than adding to it.

use std::env;

use crate::runner::EnvMap;

/// Environment variable enabling the summary log stream.
pub const SUMMARY_LOG_VAR: &str = "LOG_TO_STDOUT";

/// Environment variable enabling the detailed log stream.
pub const DETAIL_LOG_VAR: &str = "DETAILED_LOG_TO_STDOUT";

/// Environment variable carrying the deploy key to the child process.
pub const DEPLOY_KEY_VAR: &str = "RELAY_DEPLOY_KEY";

/// Computes the logging overlay for the given quiet flags.
///
/// `very_quiet` silences both streams regardless of `quiet`. A silenced
/// stream's variable is absent from the overlay rather than set to a falsy
/// value, so the child sees the same shape the platform produces.
///
/// # Examples
///
/// ```
/// # use relay::suite::{DETAIL_LOG_VAR, SUMMARY_LOG_VAR, logging_overlay};
/// let overlay = logging_overlay(true, false);
/// assert_eq!(overlay.get(SUMMARY_LOG_VAR).map(String::as_str), Some("true"));
/// assert!(!overlay.contains_key(DETAIL_LOG_VAR));
/// ```
#[must_use]
pub fn logging_overlay(quiet: bool, very_quiet: bool) -> EnvMap {
    let mut overlay = EnvMap::new();
    if !very_quiet {
        overlay.insert(SUMMARY_LOG_VAR.to_owned(), String::from("true"));
        if !quiet {
            overlay.insert(DETAIL_LOG_VAR.to_owned(), String::from("true"));
        }
    }
    overlay
}

/// Merges an overlay into a base environment.
///
/// Overlay entries win on key collisions; base entries without a
/// counterpart in the overlay pass through unchanged.
#[must_use]
pub fn merge_environment(base: &EnvMap, overlay: &EnvMap) -> EnvMap {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Snapshots the current process environment.
///
/// Entries whose name or value is not valid UTF-8 are skipped.
#[must_use]
pub fn ambient_environment() -> EnvMap {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
