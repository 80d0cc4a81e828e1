//! Step model definition and its status transitions.

use serde::{Deserialize, Serialize};

use super::{Action, StepStatus};
use crate::error::{AgentError, Result};

/// Represents an individual unit of agent work within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// 1-based position of the step, defines execution order
    pub id: u32,

    /// Free-text intent of the step
    pub description: String,

    /// Requested action; `None` when the model omitted it or named an unknown
    /// one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,

    /// Workspace-relative path the action targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Current status of the step
    #[serde(default)]
    pub status: StepStatus,

    /// Success message, set only once completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Failure message, set only once failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Step {
    /// Creates a pending step.
    pub fn new(
        id: u32,
        description: impl Into<String>,
        action: Option<Action>,
        file: Option<String>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            action,
            file,
            status: StepStatus::Pending,
            result: None,
            error: None,
        }
    }

    /// The action to dispatch on, inferred from the description when absent.
    pub fn effective_action(&self) -> Action {
        self.action.unwrap_or_else(|| Action::infer(&self.description))
    }

    /// Moves the step from `Pending` to `InProgress`.
    pub fn start(&mut self) -> Result<()> {
        self.transition(StepStatus::InProgress)
    }

    /// Moves the step from `InProgress` to `Completed`, recording `result`.
    pub fn complete(&mut self, result: impl Into<String>) -> Result<()> {
        self.transition(StepStatus::Completed)?;
        self.result = Some(result.into());
        Ok(())
    }

    /// Moves the step from `InProgress` to `Failed`, recording `error`.
    pub fn fail(&mut self, error: impl Into<String>) -> Result<()> {
        self.transition(StepStatus::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }

    fn transition(&mut self, next: StepStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(AgentError::InvalidTransition {
                step_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
