//! Shared fixtures for suite BDD scenarios.

use relay::test_support::{
    MemoryCredentialStore, RecordingSink, ScriptedRunner, ScriptedVersionOracle,
};
use relay::{EnvMap, PLATFORM_NODE_VERSION, SuiteConfig, SuiteOutcome, SuiteRequest};
use rstest::fixture;

#[derive(Clone, Debug)]
pub struct SuiteContext {
    pub oracle: ScriptedVersionOracle,
    pub credentials: MemoryCredentialStore,
    pub runner: ScriptedRunner,
    pub sink: RecordingSink,
    pub config: SuiteConfig,
    pub request: SuiteRequest,
    pub outcome: Option<SuiteResult>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SuiteFailureKind {
    InvalidConfig,
    VersionMismatch,
    VersionProbe,
    Credentials,
    Runner,
    TestsFailed,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SuiteFailure {
    pub kind: SuiteFailureKind,
    pub message: String,
}

#[derive(Clone, Debug)]
pub enum SuiteResult {
    Success(SuiteOutcome),
    Failure(SuiteFailure),
}

#[fixture]
pub fn suite_context() -> SuiteContext {
    SuiteContext {
        oracle: ScriptedVersionOracle::reporting(PLATFORM_NODE_VERSION),
        credentials: MemoryCredentialStore::with_deploy_key("abc123"),
        runner: ScriptedRunner::new(),
        sink: RecordingSink::new(),
        config: SuiteConfig {
            npm_bin: String::from("npm"),
            node_bin: String::from("node"),
        },
        request: SuiteRequest {
            quiet: false,
            very_quiet: false,
            base_env: EnvMap::from([
                (String::from("PATH"), String::from("/usr/bin")),
                (String::from("HOME"), String::from("/home/dev")),
            ]),
        },
        outcome: None,
    }
}
