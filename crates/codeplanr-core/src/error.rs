//! Error types for the agent library.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    completion::{CompletionError, CompletionErrorKind},
    models::{Action, StepStatus},
};

/// Comprehensive error type for all agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The classifier decided the request is not about code or files
    #[error("NOT_A_CODING_TASK: the request is not a coding or file task")]
    NotACodingTask,
    /// The plan could not be produced from the model output
    #[error("Failed to create plan: {0}")]
    PlanGeneration(#[from] PlanGenerationError),
    /// A step failed while the plan was running
    #[error("Step {step_id} ({description}) failed: {source}")]
    StepExecution {
        step_id: u32,
        description: String,
        #[source]
        source: StepFailure,
    },
    /// A step was asked to move backwards or skip a state
    #[error("Step {step_id} cannot move from {from} to {to}")]
    InvalidTransition {
        step_id: u32,
        from: StepStatus,
        to: StepStatus,
    },
    /// A chat completion failed
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// A step's id does not match its position in the plan
    #[error("Step at position {position} has id {found}; steps must be numbered from 1 in order")]
    StepOrder { position: usize, found: u32 },
    /// The plan has already been (partly) executed
    #[error("Plan has already been run; create a new plan to run again")]
    PlanAlreadyRun,
    /// No plan is held by the session
    #[error("No active plan")]
    NoActivePlan,
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// File system operation errors outside of step execution
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Reasons a plan could not be generated.
#[derive(Error, Debug)]
pub enum PlanGenerationError {
    /// The classification or planning call itself failed
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// The model answered with something that is not a plan
    #[error("Could not extract valid JSON from response: {reason}")]
    Parse { reason: String },
    /// The model answered with an empty step list
    #[error("The generated plan contains no steps")]
    Empty,
}

/// Underlying cause of a failed step.
#[derive(Error, Debug)]
pub enum StepFailure {
    /// Code generation for the step failed
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// Reading or writing the target failed
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The step modifies a file that is not there
    #[error("File {file} does not exist")]
    FileNotFound { file: String },
    /// The step names no target file
    #[error("Step has no target file for action {action}")]
    MissingTarget { action: Action },
    /// The target path is absolute or climbs out of the workspace root
    #[error("File {file} is outside the workspace")]
    OutsideWorkspace { file: String },
}

impl AgentError {
    /// Creates a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns the collaborator error kind behind this error, if any.
    ///
    /// The UI layer uses this to pick a message without inspecting text.
    pub fn completion_kind(&self) -> Option<CompletionErrorKind> {
        match self {
            Self::Completion(e)
            | Self::PlanGeneration(PlanGenerationError::Completion(e))
            | Self::StepExecution {
                source: StepFailure::Completion(e),
                ..
            } => Some(e.kind),
            _ => None,
        }
    }
}

/// Extension trait for attaching a path to I/O errors.
pub trait IoResultExt<T> {
    /// Map an I/O error into a step failure at `path`.
    fn step_context(self, path: impl Into<PathBuf>) -> std::result::Result<T, StepFailure>;

    /// Map an I/O error into an agent error at `path`.
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn step_context(self, path: impl Into<PathBuf>) -> std::result::Result<T, StepFailure> {
        self.map_err(|source| StepFailure::FileSystem {
            path: path.into(),
            source,
        })
    }

    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| AgentError::FileSystem {
            path: path.into(),
            source,
        })
    }
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_coding_task_keeps_marker() {
        let message = AgentError::NotACodingTask.to_string();
        assert!(message.contains("NOT_A_CODING_TASK"));
    }

    #[test]
    fn test_completion_kind_from_step_failure() {
        let error = AgentError::StepExecution {
            step_id: 2,
            description: "Write code".to_string(),
            source: StepFailure::Completion(CompletionError::new(
                CompletionErrorKind::RateLimited,
                "429 Too Many Requests",
            )),
        };
        assert_eq!(error.completion_kind(), Some(CompletionErrorKind::RateLimited));
        assert!(error.to_string().starts_with("Step 2 (Write code) failed"));
    }

    #[test]
    fn test_completion_kind_absent_for_parse_errors() {
        let error = AgentError::from(PlanGenerationError::Parse {
            reason: "expected value".to_string(),
        });
        assert_eq!(error.completion_kind(), None);
    }

    #[test]
    fn test_io_context_keeps_path() {
        let io: std::io::Result<()> = Err(std::io::Error::other("disk full"));
        let failure = io.step_context("src/main.rs").unwrap_err();
        assert!(failure.to_string().contains("src/main.rs"));
    }
}
