//! Sequential, fail-fast plan execution.

use std::path::PathBuf;

use log::{info, warn};

use super::executor::ExecuteStep;
use crate::{
    error::{AgentError, Result},
    models::{Plan, Step},
};

/// Drives a plan's steps through an executor in plan order.
///
/// Steps run one at a time because later steps usually depend on files
/// earlier ones created. The first failure stops the run; steps after it
/// stay `Pending`.
pub struct PlanRunner<E> {
    executor: E,
    workspace_root: PathBuf,
}

impl<E: ExecuteStep> PlanRunner<E> {
    pub fn new(executor: E, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            executor,
            workspace_root: workspace_root.into(),
        }
    }

    /// Runs every step of `plan`, calling `on_transition` after each status
    /// change.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::PlanAlreadyRun` if any step has already left
    /// `Pending`, `AgentError::StepOrder` if the steps are not numbered
    /// `1..=n` in sequence, and `AgentError::StepExecution` for the first failing step.
    /// Results of the steps before it remain recorded in `plan`.
    pub async fn run<F>(&self, plan: &mut Plan, mut on_transition: F) -> Result<()>
    where
        F: FnMut(&Step),
    {
        if !plan.is_untouched() {
            return Err(AgentError::PlanAlreadyRun);
        }
        check_order(plan)?;

        let total = plan.steps.len();
        info!("Running plan {:?} ({total} steps)", plan.task());

        for step in &mut plan.steps {
            step.start()?;
            info!("Step {}/{total}: {}", step.id, step.description);
            on_transition(step);

            match self.executor.execute(step, &self.workspace_root).await {
                Ok(result) => {
                    info!("Step {} completed: {result}", step.id);
                    step.complete(result)?;
                    on_transition(step);
                }
                Err(failure) => {
                    warn!("Step {} failed: {failure}", step.id);
                    step.fail(failure.to_string())?;
                    on_transition(step);
                    return Err(AgentError::StepExecution {
                        step_id: step.id,
                        description: step.description.clone(),
                        source: failure,
                    });
                }
            }
        }

        info!("Plan {:?} completed", plan.task());
        Ok(())
    }
}

/// Steps must already be numbered 1, 2, 3... in list order.
fn check_order(plan: &Plan) -> Result<()> {
    for (index, step) in plan.steps.iter().enumerate() {
        let position = index + 1;
        if step.id as usize != position {
            return Err(AgentError::StepOrder {
                position,
                found: step.id,
            });
        }
    }
    Ok(())
}
