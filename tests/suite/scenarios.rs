//! BDD scenarios for the test suite workflow.

use rstest_bdd_macros::scenario;

use super::test_helpers::{SuiteContext, suite_context};

#[scenario(
    path = "tests/features/suite.feature",
    name = "Run the suite and forward captured output"
)]
fn scenario_run_suite(suite_context: SuiteContext) {
    drop(suite_context);
}

#[scenario(
    path = "tests/features/suite.feature",
    name = "Reject a mismatched local runtime before doing any work"
)]
fn scenario_version_mismatch(suite_context: SuiteContext) {
    drop(suite_context);
}

#[scenario(
    path = "tests/features/suite.feature",
    name = "Propagate credential failures without starting the suite"
)]
fn scenario_credentials_unavailable(suite_context: SuiteContext) {
    drop(suite_context);
}

#[scenario(
    path = "tests/features/suite.feature",
    name = "Report failing tests without forwarding output"
)]
fn scenario_failing_tests(suite_context: SuiteContext) {
    drop(suite_context);
}

#[scenario(
    path = "tests/features/suite.feature",
    name = "Silence detailed logs with the quiet flag"
)]
fn scenario_quiet_flag(suite_context: SuiteContext) {
    drop(suite_context);
}

#[scenario(
    path = "tests/features/suite.feature",
    name = "Silence all platform logs with the very quiet flag"
)]
fn scenario_very_quiet_flag(suite_context: SuiteContext) {
    drop(suite_context);
}

#[scenario(
    path = "tests/features/suite.feature",
    name = "Overlay wins over the ambient environment on collision"
)]
fn scenario_overlay_precedence(suite_context: SuiteContext) {
    drop(suite_context);
}
