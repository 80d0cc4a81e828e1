//! Core library for the CodePlanr coding agent.
//!
//! This crate turns a free-text request into an ordered plan of file steps,
//! executes the steps against a workspace directory and reports progress:
//!
//! - [`agent`]: classifier, planner, step executor, plan runner and session
//! - [`chat`]: plain question answering outside of plans
//! - [`models`]: [`Plan`], [`Step`], [`Action`] and their statuses
//! - [`completion`]: the [`CompletionProvider`] capability and an OpenAI client
//! - [`host`]: file system, diagnostics and editor capabilities
//! - [`config`]: API key and model settings
//! - [`display`]: markdown rendering of plans, progress and errors
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use codeplanr_core::{
//!     config::{FileConfigStore, Settings},
//!     display::{PlanChecklist, StepTransition},
//!     AgentBuilder, OpenAiProvider,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load(&FileConfigStore::open_default()?);
//! let provider = OpenAiProvider::from_settings(&settings).ok_or("no API key")?;
//!
//! let mut agent = AgentBuilder::new()
//!     .with_provider(Arc::new(provider))
//!     .with_workspace_root("/home/user/project")
//!     .build()
//!     .await?;
//!
//! agent.create_plan("create a cpp file for addition of 2 numbers").await?;
//! agent
//!     .run_active_plan(|step| println!("{}", StepTransition(step)))
//!     .await?;
//!
//! if let Some(plan) = agent.session().active_plan() {
//!     println!("{}", PlanChecklist(plan));
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod chat;
pub mod completion;
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod models;

// Re-export commonly used types
pub use agent::{
    Agent, AgentBuilder, AgentSession, ExecuteStep, PlanRunner, Planner, StepExecutor,
    TaskClassifier,
};
pub use chat::ChatAssistant;
pub use completion::{CompletionError, CompletionErrorKind, CompletionProvider, OpenAiProvider};
pub use error::{AgentError, PlanGenerationError, Result, StepFailure};
pub use models::{Action, Plan, PlanStatus, Step, StepStatus};
