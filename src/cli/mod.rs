//! Command-line interface definitions for the `relay` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

const TEST_AFTER_HELP: &str = "\
Examples:

  $ relay test
  # > test
  # > mocha
  #
  #   app
  #     validation
  #       * should be a valid app
  #
  #   triggers
  #     hello world
  #       * should load from an url
  #
  #   2 passing (312ms)
";

/// Top-level CLI for the `relay` binary.
#[derive(Debug, Parser)]
#[command(
    name = "relay",
    about = "Build, test, and manage your Relay integrations from the command line",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Run your app's test suite against the pinned platform runtime.
    #[command(
        name = "test",
        about = "Run your app's test suite with the platform environment applied"
    )]
    Test(TestCommand),
}

/// Arguments for the `relay test` subcommand.
///
/// The verbosity flags are subtractive: `--quiet` silences the detailed run
/// logs and `--very-quiet` silences the summary logs as well.
#[derive(Debug, Parser)]
#[command(after_long_help = TEST_AFTER_HELP)]
pub(crate) struct TestCommand {
    /// Do not print detailed platform logs to standard out.
    #[arg(long)]
    pub(crate) quiet: bool,
    /// Do not print summary or detailed platform logs to standard out.
    #[arg(long)]
    pub(crate) very_quiet: bool,
}
