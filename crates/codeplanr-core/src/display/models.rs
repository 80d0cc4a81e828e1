//! Display implementations for domain models.
//!
//! Models render as markdown so the CLI can pass them straight to the
//! terminal renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Action, Plan, PlanStatus, Step, StepStatus};

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.task())?;
        writeln!(f)?;

        let (completed, total) = self.progress();
        writeln!(f, "- Status: {}", self.status())?;
        writeln!(f, "- Progress: {completed}/{total}")?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this plan.")?;
            return Ok(());
        }

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.description,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        match (&self.action, &self.file) {
            (Some(action), Some(file)) => writeln!(f, "- Action: `{action}` on `{file}`")?,
            (Some(action), None) => writeln!(f, "- Action: `{action}`")?,
            (None, Some(file)) => writeln!(
                f,
                "- Action: `{}` (inferred) on `{file}`",
                self.effective_action()
            )?,
            (None, None) => writeln!(f, "- Action: `{}` (inferred)", self.effective_action())?,
        }

        if let Some(result) = &self.result {
            writeln!(f, "- Result: {result}")?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "- Error: {error}")?;
        }
        writeln!(f)
    }
}
