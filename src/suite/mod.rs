//! Test suite orchestration for `relay test`.
//!
//! Running an app's suite locally mirrors how the platform runs it: the
//! local runtime must match the platform's pinned version, the stored
//! deploy key is injected into the child environment, and the platform
//! logging variables are applied on top of the caller's environment.

use crate::credentials::CredentialSource;
use crate::runner::{CommandOutput, CommandRunner, EnvMap};
use crate::runtime::{PLATFORM_NODE_VERSION, VersionOracle};
use crate::sink::LineSink;

mod config;
mod env;
mod error;

pub use config::SuiteConfig;
pub use env::{
    DEPLOY_KEY_VAR, DETAIL_LOG_VAR, SUMMARY_LOG_VAR, ambient_environment, logging_overlay,
    merge_environment,
};
pub use error::{SuiteConfigLoadError, SuiteError};

/// Arguments passed to the package manager to run the app's test script.
const TEST_SCRIPT_ARGS: [&str; 3] = ["run", "--silent", "test"];

/// Inputs for one test suite run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SuiteRequest {
    /// Whether to silence the detailed platform log stream.
    pub quiet: bool,
    /// Whether to silence both platform log streams.
    pub very_quiet: bool,
    /// Environment the child process starts from before the overlay.
    pub base_env: EnvMap,
}

/// Outcome returned after the test script succeeds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SuiteOutcome {
    /// Standard output captured from the test script.
    pub stdout: String,
}

/// Coordinates the version check, credential lookup, and test script run.
#[derive(Debug)]
pub struct SuiteOrchestrator<V, C, R, L> {
    config: SuiteConfig,
    oracle: V,
    credentials: C,
    runner: R,
    sink: L,
}

impl<V, C, R, L> SuiteOrchestrator<V, C, R, L>
where
    V: VersionOracle,
    C: CredentialSource,
    R: CommandRunner,
    L: LineSink,
{
    /// Creates a new suite orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::InvalidConfig`] when the configuration has
    /// missing values.
    pub fn new(
        config: SuiteConfig,
        oracle: V,
        credentials: C,
        runner: R,
        sink: L,
    ) -> Result<Self, SuiteError> {
        config.validate()?;
        Ok(Self {
            config,
            oracle,
            credentials,
            runner,
            sink,
        })
    }

    /// Executes the test suite workflow.
    ///
    /// The local runtime version is checked before anything else; on
    /// mismatch no credentials are read and no process is spawned.
    /// Credential errors likewise stop the run before the test script
    /// starts. Captured output is forwarded to the sink only after the
    /// script succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] when the version check, credential lookup, or
    /// test script fails.
    pub async fn execute(&self, request: &SuiteRequest) -> Result<SuiteOutcome, SuiteError> {
        let mut overlay = logging_overlay(request.quiet, request.very_quiet);

        self.check_runtime_version()?;

        let credentials = self.credentials.read().await?;
        overlay.insert(DEPLOY_KEY_VAR.to_owned(), credentials.deploy_key);

        let merged = merge_environment(&request.base_env, &overlay);
        let output = self.run_test_script(&merged).await?;
        if !output.is_success() {
            return Err(tests_failed(&self.config.npm_bin, &output));
        }

        if !output.stdout.is_empty() {
            self.sink.line(&output.stdout);
        }

        Ok(SuiteOutcome {
            stdout: output.stdout,
        })
    }

    fn check_runtime_version(&self) -> Result<(), SuiteError> {
        let actual = self.oracle.current_version()?;
        if actual != PLATFORM_NODE_VERSION {
            return Err(SuiteError::VersionMismatch { actual });
        }
        Ok(())
    }

    async fn run_test_script(&self, env: &EnvMap) -> Result<CommandOutput, SuiteError> {
        let args: Vec<String> = TEST_SCRIPT_ARGS
            .iter()
            .map(|arg| (*arg).to_owned())
            .collect();
        let output = self.runner.run(&self.config.npm_bin, &args, env).await?;
        Ok(output)
    }
}

fn tests_failed(program: &str, output: &CommandOutput) -> SuiteError {
    let status_text = output
        .code
        .map_or_else(|| String::from("unknown"), |code| code.to_string());
    SuiteError::TestsFailed {
        program: program.to_owned(),
        status: output.code,
        status_text,
        stderr: output.stderr.trim().to_owned(),
    }
}
