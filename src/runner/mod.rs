//! Process execution abstraction used to launch package-manager scripts.
//!
//! The runner receives the child's entire environment as an explicit map;
//! nothing is inherited from the parent process implicitly. Two production
//! implementations exist: [`ProcessCommandRunner`] captures output for
//! programmatic use, while [`InteractiveCommandRunner`] hands the terminal
//! to the child so users watch their test suite run live.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use tokio::process::Command;

/// Environment map passed to child processes.
///
/// Ordered so rendered environments and test assertions are deterministic.
pub type EnvMap = BTreeMap<String, String>;

/// Result of running an external command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandOutput {
    /// Exit code reported by the process, if available.
    pub code: Option<i32>,
    /// Captured standard output, empty in interactive mode.
    pub stdout: String,
    /// Captured standard error, empty in interactive mode.
    pub stderr: String,
}

impl CommandOutput {
    /// Returns `true` when the exit code equals zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Errors raised while launching child processes.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RunnerError {
    /// Raised when a command cannot be spawned.
    #[error("failed to spawn {program}: {message}")]
    Spawn {
        /// Command that failed to start.
        program: String,
        /// Operating system error string.
        message: String,
    },
}

/// Future returned by runner operations.
pub type RunnerFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RunnerError>> + Send + 'a>>;

/// Abstraction over child process execution to support fakes in tests.
pub trait CommandRunner {
    /// Runs `program` with the given arguments and environment.
    ///
    /// The `env` map becomes the child's entire environment.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Spawn`] if the command cannot be started.
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
        env: &'a EnvMap,
    ) -> RunnerFuture<'a, CommandOutput>;
}

/// Captured-mode runner that collects the child's stdout and stderr.
#[derive(Clone, Debug, Default)]
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
        env: &'a EnvMap,
    ) -> RunnerFuture<'a, CommandOutput> {
        Box::pin(async move {
            let output = Command::new(program)
                .args(args)
                .env_clear()
                .envs(env)
                .output()
                .await
                .map_err(|err| RunnerError::Spawn {
                    program: program.to_owned(),
                    message: err.to_string(),
                })?;

            Ok(CommandOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }
}

/// Interactive runner that hands the terminal to the child process.
///
/// Standard input, output, and error are inherited from the parent process,
/// so the captured fields of the returned [`CommandOutput`] are always empty.
#[derive(Clone, Debug, Default)]
pub struct InteractiveCommandRunner;

impl CommandRunner for InteractiveCommandRunner {
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
        env: &'a EnvMap,
    ) -> RunnerFuture<'a, CommandOutput> {
        Box::pin(async move {
            let status = Command::new(program)
                .args(args)
                .env_clear()
                .envs(env)
                .status()
                .await
                .map_err(|err| RunnerError::Spawn {
                    program: program.to_owned(),
                    message: err.to_string(),
                })?;

            Ok(CommandOutput {
                code: status.code(),
                stdout: String::new(),
                stderr: String::new(),
            })
        })
    }
}
