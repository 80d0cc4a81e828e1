//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{PlanStatus, Step, StepStatus};

/// An ordered set of steps derived from one user request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    task: String,

    /// Steps in execution order; `steps[i].id == i + 1`
    pub steps: Vec<Step>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,
}

impl Plan {
    /// Creates a plan for `task`, stamped with the current time.
    pub fn new(task: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            task: task.into(),
            steps,
            created_at: Timestamp::now(),
        }
    }

    /// The request the plan was generated for.
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Computes the plan status from its steps.
    pub fn status(&self) -> PlanStatus {
        if self.steps.iter().any(|s| s.status == StepStatus::Failed) {
            PlanStatus::Failed
        } else if !self.steps.is_empty()
            && self.steps.iter().all(|s| s.status == StepStatus::Completed)
        {
            PlanStatus::Completed
        } else if self.steps.iter().any(|s| s.status != StepStatus::Pending) {
            PlanStatus::Executing
        } else {
            PlanStatus::Planning
        }
    }

    /// Number of completed steps and total number of steps.
    pub fn progress(&self) -> (usize, usize) {
        let completed = self
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count();
        (completed, self.steps.len())
    }

    /// Whether no step has left `Pending` yet.
    pub fn is_untouched(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Pending)
    }

    /// Looks up a step by its id.
    pub fn step(&self, id: u32) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }
}
