//! Data models for plans and steps.
//!
//! This module contains the core domain models of the agent: a [`Plan`] is
//! the ordered list of [`Step`]s produced for one user request, each step
//! tagged with an [`Action`] and a target file. Display implementations for
//! these models live in [`crate::display::models`].
//!
//! # Step lifecycle
//!
//! Steps move forward only:
//!
//! ```text
//! Pending ──▶ InProgress ──┬──▶ Completed   (result set)
//!                          └──▶ Failed      (error set)
//! ```
//!
//! The transition methods on [`Step`] reject every other move, so a terminal
//! step never changes again and carries exactly one of `result`/`error`.
//!
//! # Examples
//!
//! ```rust
//! use codeplanr_core::models::{Action, Plan, PlanStatus, Step};
//!
//! let mut plan = Plan::new(
//!     "create a cpp file for addition of 2 numbers",
//!     vec![Step::new(
//!         1,
//!         "Create addition.cpp file",
//!         Some(Action::CreateFile),
//!         Some("addition.cpp".to_string()),
//!     )],
//! );
//! assert_eq!(plan.status(), PlanStatus::Planning);
//!
//! plan.steps[0].start().unwrap();
//! plan.steps[0].complete("Created file: addition.cpp").unwrap();
//! assert_eq!(plan.status(), PlanStatus::Completed);
//! ```

pub mod action;
pub mod plan;
pub mod status;
pub mod step;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use plan::Plan;
pub use status::{PlanStatus, StepStatus};
pub use step::Step;
