//! Status enumerations for plans and steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Derived lifecycle state of a plan.
///
/// Plans carry no stored status; it is computed from their steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// No step has started yet
    Planning,

    /// At least one step has left `Pending` and none failed
    Executing,

    /// Every step completed
    Completed,

    /// A step failed and the run stopped
    Failed,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Planning => "planning",
            PlanStatus::Executing => "executing",
            PlanStatus::Completed => "completed",
            PlanStatus::Failed => "failed",
        }
    }
}

/// Type-safe enumeration of step statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step has not started
    #[default]
    Pending,

    /// Step is being executed
    InProgress,

    /// Step finished successfully
    Completed,

    /// Step failed
    Failed,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StepStatus::Pending),
            "inprogress" | "in_progress" | "in-progress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            "failed" => Ok(StepStatus::Failed),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in-progress",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
        }
    }

    /// Whether the status can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Failed)
    }

    /// Whether a step may move from `self` to `next`.
    ///
    /// Only `Pending → InProgress` and `InProgress → Completed | Failed` are
    /// allowed.
    pub fn can_transition_to(&self, next: StepStatus) -> bool {
        matches!(
            (self, next),
            (StepStatus::Pending, StepStatus::InProgress)
                | (StepStatus::InProgress, StepStatus::Completed)
                | (StepStatus::InProgress, StepStatus::Failed)
        )
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use codeplanr_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::Completed.with_icon(), "✅ Completed");
    /// assert_eq!(StepStatus::Pending.with_icon(), "⬜ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Pending => "⬜ Pending",
            StepStatus::InProgress => "⏳ In Progress",
            StepStatus::Completed => "✅ Completed",
            StepStatus::Failed => "❌ Failed",
        }
    }
}
