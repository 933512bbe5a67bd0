//! Custom assertions for scenario outcomes

use scenario_rig::scenario::{Phase, ScenarioOutcome};

/// Extension trait for scenario outcome assertions
pub trait OutcomeAssertions {
    /// Assert the scenario passed, dumping the failure report otherwise
    fn assert_passed(&self);

    /// Assert the scenario failed while in `phase`
    fn assert_failed_in(&self, phase: Phase);

    /// Assert the executed step labels, in order
    fn assert_steps(&self, labels: &[&str]);

    /// Assert the error message contains a substring
    fn assert_error_contains(&self, message: &str);
}

impl OutcomeAssertions for ScenarioOutcome {
    fn assert_passed(&self) {
        assert!(
            self.passed,
            "Expected scenario '{}' to pass, failed while {:?}:\n{}",
            self.name,
            self.failed_in,
            self.error.as_deref().unwrap_or("")
        );
        assert_eq!(self.phase, Phase::Passed);
    }

    fn assert_failed_in(&self, phase: Phase) {
        assert!(
            !self.passed,
            "Expected scenario '{}' to fail, but it passed",
            self.name
        );
        assert_eq!(self.phase, Phase::Failed);
        assert_eq!(
            self.failed_in,
            Some(phase),
            "Wrong failure phase:\n{}",
            self.error.as_deref().unwrap_or("")
        );
    }

    fn assert_steps(&self, labels: &[&str]) {
        let actual: Vec<&str> = self.steps.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(actual, labels, "Unexpected steps for '{}'", self.name);
    }

    fn assert_error_contains(&self, message: &str) {
        let error = self.error.as_deref().unwrap_or("");
        assert!(
            error.contains(message),
            "Expected error containing '{}', got:\n{}",
            message,
            error
        );
    }
}
