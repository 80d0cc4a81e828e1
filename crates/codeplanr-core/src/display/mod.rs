//! Display formatting for plans, progress and errors.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrapper types here format the same data for a specific context:
//!
//! - [`checklist`]: [`PlanChecklist`] for exporting the active plan and
//!   [`StepTransition`] for live progress lines
//! - [`guidance`]: [`ErrorGuidance`], what to tell the user about an error
//! - [`status`]: [`OperationStatus`] confirmation messages
//! - [`datetime`]: [`LocalDateTime`] timestamp formatting
//!
//! All output is markdown so the CLI can render it richly or print it as-is.

pub mod checklist;
pub mod datetime;
pub mod guidance;
pub mod models;
pub mod status;

pub use checklist::{PlanChecklist, StepTransition};
pub use datetime::LocalDateTime;
pub use guidance::ErrorGuidance;
pub use status::OperationStatus;
