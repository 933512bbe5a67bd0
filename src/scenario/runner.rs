use super::catalog::Scenario;
use super::context::{Harness, StepRecord};
use super::step::StepFailure;
use super::Phase;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Result of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    /// Terminal phase (passed/failed)
    pub phase: Phase,
    /// Phase the scenario was in when it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_in: Option<Phase>,
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
    /// Test roots left on disk for inspection
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub kept_roots: Vec<PathBuf>,
    pub duration_ms: u128,
}

/// Run one scenario in a fresh context. Never panics on a failed step; the
/// failure is captured in the outcome.
pub fn run_scenario(harness: &Harness, scenario: &Scenario) -> ScenarioOutcome {
    let started = Instant::now();
    let mut ctx = harness.context();
    tracing::info!(scenario = scenario.name, "starting");

    let result = scenario.run(&mut ctx);
    let last_phase = ctx.phase();
    let (steps, kept_roots) = ctx.finish();

    let outcome = match result {
        Ok(()) => ScenarioOutcome {
            name: scenario.name.to_string(),
            passed: true,
            phase: Phase::Passed,
            failed_in: None,
            steps,
            error: None,
            failure: None,
            kept_roots,
            duration_ms: started.elapsed().as_millis(),
        },
        Err(err) => {
            tracing::warn!(scenario = scenario.name, phase = %last_phase, "failed: {}", err);
            ScenarioOutcome {
                name: scenario.name.to_string(),
                passed: false,
                phase: Phase::Failed,
                failed_in: Some(last_phase),
                steps,
                failure: err.step_failure().cloned(),
                error: Some(format!("{:#}", anyhow::Error::new(err))),
                kept_roots,
                duration_ms: started.elapsed().as_millis(),
            }
        }
    };

    tracing::info!(
        scenario = scenario.name,
        passed = outcome.passed,
        duration_ms = outcome.duration_ms as u64,
        "finished"
    );
    outcome
}
