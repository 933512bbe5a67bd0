use crate::args::render_command_line;
use crate::error::{Result, RigError};
use serde::Serialize;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// A single external command, run exactly once
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    working_dir: PathBuf,
    env: Vec<(String, OsString)>,
    capture: bool,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            env: Vec::new(),
            capture: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a variable for this invocation only
    pub fn env(mut self, key: impl Into<String>, value: impl AsRef<OsStr>) -> Self {
        self.env.push((key.into(), value.as_ref().to_os_string()));
        self
    }

    /// Capture stdout/stderr (default) or inherit the caller's streams
    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn command_line(&self) -> String {
        render_command_line(&self.program.to_string_lossy(), &self.args)
    }
}

/// Result of running one invocation
#[derive(Debug, Clone, Serialize)]
pub struct InvocationResult {
    /// Exit code (0 = success, -1 = terminated by signal)
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub command_line: String,
    pub working_dir: PathBuf,
    /// False when output went straight to the terminal
    pub captured: bool,
}

impl InvocationResult {
    /// Check if command succeeded (exit code 0)
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    fn from_output(invocation: &Invocation, output: Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            command_line: invocation.command_line(),
            working_dir: invocation.working_dir.clone(),
            captured: invocation.capture,
        }
    }
}

/// Spawn the invocation and wait for it to exit.
/// Uses current_dir and per-command env (doesn't touch the process cwd or env).
pub fn run(invocation: &Invocation) -> Result<InvocationResult> {
    let command_line = invocation.command_line();
    tracing::debug!(
        command = %command_line,
        cwd = %invocation.working_dir.display(),
        capture = invocation.capture,
        "spawning"
    );

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .current_dir(&invocation.working_dir)
        .stdin(Stdio::null());

    for (key, value) in &invocation.env {
        cmd.env(key, value);
    }

    let launch_err = |source: std::io::Error| RigError::ProcessLaunch {
        command: format!(
            "{} (in {})",
            command_line,
            invocation.working_dir.display()
        ),
        source,
    };

    let output = if invocation.capture {
        cmd.output().map_err(launch_err)?
    } else {
        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(launch_err)?;
        Output {
            status,
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    };

    let result = InvocationResult::from_output(invocation, output);
    tracing::debug!(exit_code = result.exit_code, command = %command_line, "exited");
    Ok(result)
}

/// Inherited PATH with `dir` placed in front
pub fn prepend_to_path(dir: &Path) -> Result<OsString> {
    prepend_path_entry(dir, env::var_os("PATH"))
}

// Empty entries are dropped; POSIX reads them as the current directory
fn prepend_path_entry(dir: &Path, inherited: Option<OsString>) -> Result<OsString> {
    let inherited = inherited.unwrap_or_default();
    let entries = std::iter::once(dir.to_path_buf())
        .chain(env::split_paths(&inherited).filter(|p| !p.as_os_str().is_empty()));
    env::join_paths(entries).map_err(|e| {
        RigError::io(
            format!("Cannot add {} to PATH", dir.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
        )
    })
}

/// Absolute path for a program name, searching PATH when it isn't a path already
pub fn resolve_program(name: &str) -> Result<PathBuf> {
    let candidate = Path::new(name);
    if candidate.is_absolute() {
        if candidate.is_file() {
            return Ok(candidate.to_path_buf());
        }
        return Err(RigError::ToolNotFound {
            name: name.to_string(),
        });
    }

    which::which(name).map_err(|_| RigError::ToolNotFound {
        name: name.to_string(),
    })
}
