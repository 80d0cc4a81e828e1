//! User-facing guidance for agent errors.

use std::fmt;

use crate::{completion::CompletionErrorKind, error::AgentError};

/// Turns an [`AgentError`] into a message telling the user what to do next.
///
/// The message is chosen from the typed error, never from its text.
pub struct ErrorGuidance<'a>(pub &'a AgentError);

impl fmt::Display for ErrorGuidance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if matches!(self.0, AgentError::NotACodingTask) {
            writeln!(f, "💬 Not a Coding Task")?;
            writeln!(f)?;
            writeln!(f, "The agent helps with coding tasks like:")?;
            writeln!(f, "- Creating files")?;
            writeln!(f, "- Writing code")?;
            writeln!(f, "- Modifying existing code")?;
            writeln!(f, "- Checking for errors")?;
            writeln!(f)?;
            writeln!(f, "Rephrase the request as a file task, for example:")?;
            writeln!(f, "- \"create a python file for sorting\"")?;
            writeln!(f, "- \"create a cpp file for addition\"")?;
            writeln!(f)?;
            writeln!(f, "For general questions use `codeplanr chat \"<question>\"`.")?;
            return Ok(());
        }

        match self.0.completion_kind() {
            Some(CompletionErrorKind::Unauthorized) => {
                writeln!(f, "🔑 Invalid API Key")?;
                writeln!(f)?;
                writeln!(f, "Your OpenAI API key is invalid or expired.")?;
                writeln!(
                    f,
                    "Set a valid key with `codeplanr config set-key` or the OPENAI_API_KEY environment variable."
                )
            }
            Some(CompletionErrorKind::RateLimited) => {
                writeln!(f, "⏰ Rate Limit Exceeded")?;
                writeln!(f)?;
                writeln!(f, "Please wait a moment and try again.")
            }
            Some(CompletionErrorKind::ServerError) => {
                writeln!(f, "🌐 Server Error")?;
                writeln!(f)?;
                writeln!(
                    f,
                    "The completion service is having issues. Please try again in a few minutes."
                )
            }
            Some(CompletionErrorKind::NetworkError) => {
                writeln!(f, "🔌 Network Error")?;
                writeln!(f)?;
                writeln!(f, "The completion service could not be reached. Check your connection.")
            }
            Some(CompletionErrorKind::Unknown) | None => writeln!(f, "❌ Error: {}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        completion::CompletionError,
        error::{PlanGenerationError, StepFailure},
    };

    #[test]
    fn test_not_a_coding_task_guidance() {
        let output = ErrorGuidance(&AgentError::NotACodingTask).to_string();
        assert!(output.starts_with("💬 Not a Coding Task"));
        assert!(output.contains("create a python file for sorting"));
        assert!(output.contains("codeplanr chat"));
    }

    #[test]
    fn test_guidance_follows_completion_kind() {
        let unauthorized = AgentError::PlanGeneration(PlanGenerationError::Completion(
            CompletionError::new(CompletionErrorKind::Unauthorized, "OpenAI API error: 401"),
        ));
        assert!(ErrorGuidance(&unauthorized).to_string().contains("Invalid API Key"));

        let throttled = AgentError::StepExecution {
            step_id: 1,
            description: "Write code".to_string(),
            source: StepFailure::Completion(CompletionError::new(
                CompletionErrorKind::RateLimited,
                "OpenAI API error: 429",
            )),
        };
        assert!(ErrorGuidance(&throttled).to_string().contains("Rate Limit Exceeded"));
    }

    #[test]
    fn test_other_errors_show_cause() {
        let error = AgentError::StepExecution {
            step_id: 3,
            description: "Modify app.js".to_string(),
            source: StepFailure::FileNotFound {
                file: "app.js".to_string(),
            },
        };
        let output = ErrorGuidance(&error).to_string();
        assert!(output.starts_with("❌ Error: Step 3 (Modify app.js) failed"));
        assert!(output.contains("File app.js does not exist"));
    }
}
