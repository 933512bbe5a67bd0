//! The run-and-assert primitive every scenario is built from

use crate::error::{Result, RigError};
use crate::util::process::{self, Invocation, InvocationResult};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// What a step's exit code must look like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    Success,
    Failure,
    /// Recorded but not asserted
    Any,
}

impl Expect {
    pub fn accepts(self, exit_code: i32) -> bool {
        match self {
            Expect::Success => exit_code == 0,
            Expect::Failure => exit_code != 0,
            Expect::Any => true,
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Success => write!(f, "success (exit 0)"),
            Expect::Failure => write!(f, "failure (non-zero exit)"),
            Expect::Any => write!(f, "any exit code"),
        }
    }
}

pub struct Step {
    pub label: String,
    pub invocation: Invocation,
    pub expect: Expect,
}

impl Step {
    pub fn new(label: impl Into<String>, invocation: Invocation) -> Self {
        Self {
            label: label.into(),
            invocation,
            expect: Expect::Success,
        }
    }

    pub fn expect(mut self, expect: Expect) -> Self {
        self.expect = expect;
        self
    }

    /// Run the invocation and check its exit code against `expect`
    pub fn execute(self) -> Result<InvocationResult> {
        let result = process::run(&self.invocation)?;

        if !self.expect.accepts(result.exit_code) {
            return Err(RigError::StepAssertion(Box::new(StepFailure {
                label: self.label,
                expected: self.expect,
                command_line: result.command_line,
                working_dir: result.working_dir,
                exit_code: result.exit_code,
                stdout: result.stdout,
                stderr: result.stderr,
                captured: result.captured,
            })));
        }

        Ok(result)
    }
}

/// Everything needed to reproduce a failed step by hand
#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    pub label: String,
    pub expected: Expect,
    pub command_line: String,
    pub working_dir: PathBuf,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub captured: bool,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Step '{}' expected {}, got exit {}",
            self.label, self.expected, self.exit_code
        )?;
        writeln!(f, "command: {}", self.command_line)?;
        writeln!(f, "cwd: {}", self.working_dir.display())?;
        if self.captured {
            writeln!(f, "stdout:\n{}", self.stdout)?;
            write!(f, "stderr:\n{}", self.stderr)
        } else {
            write!(f, "(output was streamed, not captured)")
        }
    }
}
