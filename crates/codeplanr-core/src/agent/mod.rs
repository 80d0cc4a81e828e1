//! The plan / execute / report core of the coding agent.
//!
//! A request flows through four components, leaves first:
//!
//! ```text
//! ┌────────────────┐   ┌─────────┐   ┌────────────┐   ┌──────────────┐
//! │ TaskClassifier │──▶│ Planner │──▶│ PlanRunner │──▶│ AgentSession │
//! └────────────────┘   └─────────┘   └─────┬──────┘   └──────────────┘
//!                                          │ per step
//!                                    ┌─────▼────────┐
//!                                    │ StepExecutor │
//!                                    └──────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Agent`] instances
//! - [`classifier`]: yes/no gate in front of planning
//! - [`planner`]: request → [`Plan`] via one completion call
//! - [`extract`]: JSON array extraction from free-form model output
//! - [`executor`]: one step → filesystem/editor effects
//! - [`runner`]: sequential fail-fast execution with transition callbacks
//! - [`scanner`]: relevant existing files for the planning prompt
//! - [`session`]: the retained active plan
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use codeplanr_core::{AgentBuilder, OpenAiProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut agent = AgentBuilder::new()
//!     .with_provider(Arc::new(OpenAiProvider::new("sk-...")))
//!     .with_workspace_root(".")
//!     .build()
//!     .await?;
//!
//! let plan = agent
//!     .handle_task("create a cpp file for addition of 2 numbers", |step| {
//!         println!("{} {}", step.status.with_icon(), step.description);
//!     })
//!     .await?;
//! println!("{}", plan.status().as_str());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod classifier;
pub mod executor;
pub mod extract;
pub mod planner;
pub mod runner;
pub mod scanner;
pub mod session;


pub use builder::AgentBuilder;
pub use classifier::TaskClassifier;
pub use executor::{language_for, strip_code_fences, ExecuteStep, StepExecutor};
pub use extract::extract_json_array;
pub use planner::Planner;
pub use runner::PlanRunner;
pub use scanner::WorkspaceScanner;
pub use session::AgentSession;

use crate::{
    error::{AgentError, Result},
    models::{Plan, Step},
};

/// Single entry point wiring planner, runner and session together.
pub struct Agent {
    planner: Planner,
    runner: PlanRunner<StepExecutor>,
    session: AgentSession,
}

impl Agent {
    pub(crate) fn new(planner: Planner, runner: PlanRunner<StepExecutor>) -> Self {
        Self {
            planner,
            runner,
            session: AgentSession::new(),
        }
    }

    /// Plans `request` and makes the result the active plan.
    pub async fn create_plan(&mut self, request: &str) -> Result<&Plan> {
        let plan = self.planner.create_plan(request).await?;
        Ok(self.session.set_active_plan(plan))
    }

    /// Runs the active plan in place.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NoActivePlan` without a plan, otherwise whatever
    /// [`PlanRunner::run`] returns. Partial progress stays in the session.
    pub async fn run_active_plan<F>(&mut self, on_transition: F) -> Result<()>
    where
        F: FnMut(&Step),
    {
        let plan = self
            .session
            .active_plan_mut()
            .ok_or(AgentError::NoActivePlan)?;
        self.runner.run(plan, on_transition).await
    }

    /// Plans and runs `request` in one go, returning the finished plan.
    pub async fn handle_task<F>(&mut self, request: &str, on_transition: F) -> Result<&Plan>
    where
        F: FnMut(&Step),
    {
        self.create_plan(request).await?;
        self.run_active_plan(on_transition).await?;
        self.session.active_plan().ok_or(AgentError::NoActivePlan)
    }

    pub fn session(&self) -> &AgentSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AgentSession {
        &mut self.session
    }
}
