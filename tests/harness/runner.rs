//! Binary execution for integration tests

use assert_cmd::Command;
use std::path::Path;
use std::process::Output;

/// Result of running the rig binary
#[derive(Debug)]
pub struct RunResult {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Standard output as string
    pub stdout: String,
    /// Standard error as string
    pub stderr: String,
}

impl RunResult {
    /// Check if command succeeded (exit code 0)
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains a substring
    pub fn stdout_contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }

    /// Combined output (stdout + stderr)
    pub fn output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Check if combined output contains a substring
    pub fn output_contains(&self, needle: &str) -> bool {
        self.output().contains(needle)
    }
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Base command for the rig binary in `dir`, with version pins cleared
pub fn rig_command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rig").expect("rig binary not built");
    cmd.current_dir(dir);

    // Keep host pins from leaking into recorded restore args
    cmd.env_remove("TEST_SUITE_FSHARP_NET_SDK_PKG_VERSION");
    cmd.env_remove("TEST_SUITE_MS_FSHARP_CORE_PKG_VERSION");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run rig in a directory
pub fn rig(dir: &Path, args: &[&str]) -> RunResult {
    let output = rig_command(dir)
        .args(args)
        .output()
        .expect("Failed to execute rig");
    RunResult::from(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_result_success() {
        let result = RunResult {
            exit_code: 0,
            stdout: "output".to_string(),
            stderr: "".to_string(),
        };
        assert!(result.success());
    }

    #[test]
    fn run_result_contains() {
        let result = RunResult {
            exit_code: 1,
            stdout: "library".to_string(),
            stderr: "1 of 1 scenarios failed".to_string(),
        };
        assert!(!result.success());
        assert!(result.stdout_contains("library"));
        assert!(result.output_contains("scenarios failed"));
    }
}
