//! Markdown checklist export and per-transition progress lines.

use std::fmt;

use crate::models::{Plan, Step, StepStatus};

/// Renders a plan as a markdown checklist document.
///
/// # Examples
///
/// ```rust
/// use codeplanr_core::{display::PlanChecklist, models::{Action, Plan, Step}};
///
/// let plan = Plan::new(
///     "add a readme",
///     vec![Step::new(
///         1,
///         "Create README.md file",
///         Some(Action::CreateFile),
///         Some("README.md".to_string()),
///     )],
/// );
/// let output = PlanChecklist(&plan).to_string();
/// assert!(output.contains("- [ ] 1. Create README.md file"));
/// ```
pub struct PlanChecklist<'a>(pub &'a Plan);

impl fmt::Display for PlanChecklist<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        let (completed, total) = plan.progress();

        writeln!(f, "# {}", plan.task())?;
        writeln!(f)?;
        writeln!(f, "Status: {} ({completed}/{total} steps completed)", plan.status())?;
        writeln!(f)?;

        for step in &plan.steps {
            let mark = if step.status == StepStatus::Completed { "x" } else { " " };
            write!(f, "- [{mark}] {}. {}", step.id, step.description)?;
            if let Some(file) = &step.file {
                write!(f, " ({} `{file}`)", step.effective_action())?;
            }
            writeln!(f, " [{}]", step.status)?;

            if let Some(result) = &step.result {
                writeln!(f, "  - {result}")?;
            }
            if let Some(error) = &step.error {
                writeln!(f, "  - Error: {error}")?;
            }
        }
        Ok(())
    }
}

/// One-line progress message for a step transition.
pub struct StepTransition<'a>(pub &'a Step);

impl fmt::Display for StepTransition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.0;
        let icon = match step.status {
            StepStatus::Pending => "⬜",
            StepStatus::InProgress => "⏳",
            StepStatus::Completed => "✅",
            StepStatus::Failed => "❌",
        };
        write!(f, "{icon} Step {}: {}", step.id, step.description)?;
        match (&step.result, &step.error) {
            (Some(result), _) => write!(f, " ({result})"),
            (_, Some(error)) => write!(f, " ({error})"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    #[test]
    fn test_checklist_marks_each_state() {
        let mut plan = Plan::new(
            "build a calculator",
            vec![
                Step::new(
                    1,
                    "Create calc.py file",
                    Some(Action::CreateFile),
                    Some("calc.py".to_string()),
                ),
                Step::new(
                    2,
                    "Write the code",
                    Some(Action::WriteCode),
                    Some("calc.py".to_string()),
                ),
                Step::new(
                    3,
                    "Check errors",
                    Some(Action::CheckErrors),
                    Some("calc.py".to_string()),
                ),
            ],
        );
        plan.steps[0].start().unwrap();
        plan.steps[0].complete("Created file: calc.py").unwrap();
        plan.steps[1].start().unwrap();
        plan.steps[1].fail("rate limited").unwrap();

        let output = PlanChecklist(&plan).to_string();
        assert!(output.starts_with("# build a calculator\n"));
        assert!(output.contains("Status: failed (1/3 steps completed)"));
        assert!(
            output.contains("- [x] 1. Create calc.py file (create_file `calc.py`) [completed]")
        );
        assert!(output.contains("  - Created file: calc.py"));
        assert!(output.contains("- [ ] 2. Write the code (write_code `calc.py`) [failed]"));
        assert!(output.contains("  - Error: rate limited"));
        assert!(output.contains("- [ ] 3. Check errors (check_errors `calc.py`) [pending]"));
    }

    #[test]
    fn test_transition_line() {
        let mut step = Step::new(
            2,
            "Write code",
            Some(Action::WriteCode),
            Some("a.rs".to_string()),
        );
        step.start().unwrap();
        assert_eq!(StepTransition(&step).to_string(), "⏳ Step 2: Write code");

        step.complete("Wrote code to a.rs").unwrap();
        assert_eq!(
            StepTransition(&step).to_string(),
            "✅ Step 2: Write code (Wrote code to a.rs)"
        );
    }
}
