use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::scenario::step::StepFailure;

pub type Result<T> = std::result::Result<T, RigError>;

#[derive(Error, Debug)]
pub enum RigError {
    #[error("Fixture '{name}' not found (looked in {})", .searched.display())]
    FixtureNotFound { name: String, searched: PathBuf },

    #[error("Failed to launch: {command}")]
    ProcessLaunch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{name}' not found on PATH. Set [tool] path in rig.toml")]
    ToolNotFound { name: String },

    #[error("{0}")]
    StepAssertion(Box<StepFailure>),

    #[error("No line starting with '{marker}' in tool output")]
    ParseMiss { marker: String },

    #[error("Expected artifact missing: {}", .path.display())]
    MissingArtifact { path: PathBuf },

    #[error("Unknown scenario '{name}'. Run `rig list` to see available scenarios")]
    UnknownScenario { name: String },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl RigError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        RigError::Io {
            context: context.into(),
            source,
        }
    }

    /// The failing step, when this error came from an exit code assertion
    pub fn step_failure(&self) -> Option<&StepFailure> {
        match self {
            RigError::StepAssertion(failure) => Some(failure.as_ref()),
            _ => None,
        }
    }
}
