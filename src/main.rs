//! Binary entry point for the Relay CLI.

use std::io::{self, Write};
use std::process;
#[cfg(test)]
use std::sync::OnceLock;
#[cfg(test)]
use std::{future::Future, pin::Pin};

use clap::Parser;
use thiserror::Error;

use relay::suite::ambient_environment;
use relay::{
    CredentialStore, InteractiveCommandRunner, NodeVersionOracle, StdoutSink, SuiteConfig,
    SuiteError, SuiteOrchestrator, SuiteRequest,
};

use cli::{Cli, TestCommand};

mod cli;
#[cfg(test)]
mod test_helpers;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("test run failed: {0}")]
    Test(#[from] SuiteError),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> Result<i32, CliError> {
    match cli {
        Cli::Test(command) => {
            #[cfg(test)]
            if let Some(hook) = TEST_COMMAND_HOOK.get() {
                return hook(command).await;
            }

            test_command(command).await
        }
    }
}

async fn test_command(args: TestCommand) -> Result<i32, CliError> {
    let config =
        SuiteConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    let oracle = NodeVersionOracle::new(config.node_bin.clone());
    let orchestrator = SuiteOrchestrator::new(
        config,
        oracle,
        CredentialStore::new(),
        InteractiveCommandRunner,
        StdoutSink,
    )?;

    let request = SuiteRequest {
        quiet: args.quiet,
        very_quiet: args.very_quiet,
        base_env: ambient_environment(),
    };
    orchestrator.execute(&request).await?;
    Ok(0)
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
type TestHook = dyn Fn(TestCommand) -> Pin<Box<dyn Future<Output = Result<i32, CliError>> + Send>>
    + Send
    + Sync;

#[cfg(test)]
static TEST_COMMAND_HOOK: OnceLock<Box<TestHook>> = OnceLock::new();
