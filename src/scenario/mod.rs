//! End-to-end scenarios against the tool under test
//!
//! A scenario provisions fixtures into its own test root, then walks
//! restore -> build -> run/publish. The first step whose exit code doesn't
//! match its expectation ends the scenario.

pub mod catalog;
pub mod context;
pub mod runner;
pub mod step;

use serde::Serialize;
use std::fmt;

pub use catalog::Scenario;
pub use context::{Harness, RunSettings, ScenarioContext};
pub use runner::{run_scenario, ScenarioOutcome};
pub use step::{Expect, Step, StepFailure};

/// Where a scenario is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Provisioning,
    Restoring,
    Building,
    Running,
    Publishing,
    Passed,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Provisioning => "provisioning",
            Phase::Restoring => "restoring",
            Phase::Building => "building",
            Phase::Running => "running",
            Phase::Publishing => "publishing",
            Phase::Passed => "passed",
            Phase::Failed => "failed",
        };
        f.write_str(s)
    }
}
