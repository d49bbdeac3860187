//! Core library for the Relay platform CLI.
//!
//! The crate exposes the orchestration behind `relay test`: a version
//! oracle for the pinned platform runtime, a credential store for the
//! stored deploy key, command runners for the package manager, and sinks
//! that receive captured test output.

pub mod credentials;
pub mod runner;
pub mod runtime;
pub mod sink;
pub mod suite;
#[cfg(test)]
pub mod test_helpers;
pub mod test_support;

pub use credentials::{
    CredentialError, CredentialFuture, CredentialSource, CredentialStore, Credentials,
};
pub use runner::{
    CommandOutput, CommandRunner, EnvMap, InteractiveCommandRunner, ProcessCommandRunner,
    RunnerError, RunnerFuture,
};
pub use runtime::{NodeVersionOracle, PLATFORM_NODE_VERSION, VersionError, VersionOracle};
pub use sink::{LineSink, StdoutSink};
pub use suite::{
    SuiteConfig, SuiteConfigLoadError, SuiteError, SuiteOrchestrator, SuiteOutcome, SuiteRequest,
};
