//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::credentials::{CredentialError, CredentialFuture, CredentialSource, Credentials};
use crate::runner::{CommandOutput, CommandRunner, EnvMap, RunnerError, RunnerFuture};
use crate::runtime::{VersionError, VersionOracle};
use crate::sink::LineSink;

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted command runner that returns pre-seeded outputs in FIFO order.
///
/// Used to drive deterministic command outcomes without spawning processes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRunner {
    responses: Arc<Mutex<VecDeque<CommandOutput>>>,
    invocations: Arc<Mutex<Vec<CommandInvocation>>>,
}

/// Records a single invocation made through [`ScriptedRunner`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandInvocation {
    /// Program name as passed to the runner.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Environment the child process would have received.
    pub env: EnvMap,
}

impl CommandInvocation {
    /// Returns a shell-like command string for assertions.
    #[must_use]
    pub fn command_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

impl ScriptedRunner {
    /// Creates a new runner with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all invocations recorded so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<CommandInvocation> {
        lock_or_recover(&self.invocations).clone()
    }

    /// Pushes a successful exit status.
    pub fn push_success(&self) {
        self.push_output(Some(0), "", "");
    }

    /// Pushes a specific exit code.
    pub fn push_exit_code(&self, code: i32) {
        self.push_output(Some(code), "", "");
    }

    /// Pushes a failing exit code with stderr text.
    pub fn push_failure(&self, code: i32) {
        self.push_output(Some(code), "", "simulated failure");
    }

    /// Pushes a response with no exit code to simulate abnormal termination.
    pub fn push_missing_exit_code(&self) {
        self.push_output(None, "", "");
    }

    /// Pushes an explicit command output response.
    pub fn push_output(
        &self,
        code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) {
        lock_or_recover(&self.responses).push_back(CommandOutput {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        });
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
        env: &'a EnvMap,
    ) -> RunnerFuture<'a, CommandOutput> {
        Box::pin(async move {
            lock_or_recover(&self.invocations).push(CommandInvocation {
                program: program.to_owned(),
                args: args.to_vec(),
                env: env.clone(),
            });
            lock_or_recover(&self.responses)
                .pop_front()
                .ok_or_else(|| RunnerError::Spawn {
                    program: program.to_owned(),
                    message: String::from("no scripted response available"),
                })
        })
    }
}

#[derive(Debug)]
struct VersionOracleState {
    version: Result<String, VersionError>,
    calls: u32,
}

/// Version oracle that reports a scripted version without probing a binary.
#[derive(Clone, Debug)]
pub struct ScriptedVersionOracle {
    state: Arc<Mutex<VersionOracleState>>,
}

impl ScriptedVersionOracle {
    /// Creates an oracle that reports the given version string.
    #[must_use]
    pub fn reporting(version: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(VersionOracleState {
                version: Ok(version.into()),
                calls: 0,
            })),
        }
    }

    /// Creates an oracle whose probe always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            state: Arc::new(Mutex::new(VersionOracleState {
                version: Err(VersionError::Probe {
                    program: String::from("node"),
                    message: String::from("scripted failure"),
                }),
                calls: 0,
            })),
        }
    }

    /// Returns how many times the version was requested.
    #[must_use]
    pub fn calls(&self) -> u32 {
        lock_or_recover(&self.state).calls
    }
}

impl VersionOracle for ScriptedVersionOracle {
    fn current_version(&self) -> Result<String, VersionError> {
        let mut state = lock_or_recover(&self.state);
        state.calls += 1;
        state.version.clone()
    }
}

#[derive(Debug)]
struct CredentialState {
    deploy_key: String,
    fail: bool,
    read_calls: u32,
}

/// In-memory credential source with a switchable failure mode.
#[derive(Clone, Debug)]
pub struct MemoryCredentialStore {
    state: Arc<Mutex<CredentialState>>,
}

impl MemoryCredentialStore {
    /// Creates a store that returns the given deploy key.
    #[must_use]
    pub fn with_deploy_key(deploy_key: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CredentialState {
                deploy_key: deploy_key.into(),
                fail: false,
                read_calls: 0,
            })),
        }
    }

    /// Creates a store whose reads always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            state: Arc::new(Mutex::new(CredentialState {
                deploy_key: String::new(),
                fail: true,
                read_calls: 0,
            })),
        }
    }

    /// Returns how many times the credentials were read.
    #[must_use]
    pub fn read_calls(&self) -> u32 {
        lock_or_recover(&self.state).read_calls
    }
}

impl CredentialSource for MemoryCredentialStore {
    fn read(&self) -> CredentialFuture<'_, Credentials> {
        Box::pin(async move {
            let mut state = lock_or_recover(&self.state);
            state.read_calls += 1;
            if state.fail {
                return Err(CredentialError::Missing);
            }
            Ok(Credentials {
                deploy_key: state.deploy_key.clone(),
            })
        })
    }
}

/// Sink that records forwarded lines for assertions.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    /// Creates a sink with no recorded lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all lines recorded so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        lock_or_recover(&self.lines).clone()
    }
}

impl LineSink for RecordingSink {
    fn line(&self, text: &str) {
        lock_or_recover(&self.lines).push(text.to_owned());
    }
}
