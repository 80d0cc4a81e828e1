//! Free-form chat with the coding assistant.
//!
//! Chat is the interaction mode for questions that are not file tasks. It
//! makes one completion call and flattens the markdown in the reply to
//! plain text.

use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{completion::CompletionProvider, error::Result};

const CHAT_SYSTEM_PROMPT: &str = "You are CodePlanr AI, a helpful coding assistant. \
    Help users with their coding tasks, provide step-by-step plans, and suggest code \
    implementations. Be concise and practical. Always respond in plain text without \
    markdown formatting, bullet points, or special characters. Just provide clear, \
    readable text.";

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-*][ \t]*").expect("valid regex"));
static NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]*").expect("valid regex"));
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{1,6}[ \t]*").expect("valid regex"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));

/// Answers free-form questions through a completion provider.
#[derive(Clone)]
pub struct ChatAssistant {
    provider: Arc<dyn CompletionProvider>,
}

impl ChatAssistant {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Sends `message` and returns the cleaned-up reply.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Completion` when the provider call fails.
    pub async fn reply(&self, message: &str) -> Result<String> {
        let raw = self.provider.complete(CHAT_SYSTEM_PROMPT, message).await?;
        debug!("Chat reply: {} bytes", raw.len());
        Ok(clean_reply(&raw))
    }
}

/// Flattens markdown in a chat reply to plain text.
///
/// Emphasis markers, headings, inline code and link targets are dropped,
/// list markers become `• `, numbering is removed and fenced code blocks are
/// removed entirely.
///
/// ```rust
/// use codeplanr_core::chat::clean_reply;
///
/// assert_eq!(clean_reply("## Tip\nUse **cargo** `fmt`"), "Tip\nUse cargo fmt");
/// ```
pub fn clean_reply(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = BULLET.replace_all(&text, "• ");
    let text = NUMBERED.replace_all(&text, "");
    let text = CODE_BLOCK.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        completion::{CompletionError, CompletionErrorKind},
        error::AgentError,
    };

    struct FixedReply(std::result::Result<&'static str, CompletionErrorKind>);

    #[async_trait]
    impl CompletionProvider for FixedReply {
        async fn complete(
            &self,
            system_prompt: &str,
            _user_prompt: &str,
        ) -> std::result::Result<String, CompletionError> {
            assert!(system_prompt.starts_with("You are CodePlanr AI"));
            self.0
                .map(str::to_string)
                .map_err(|kind| CompletionError::new(kind, "boom"))
        }
    }

    #[test]
    fn test_clean_reply_flattens_markdown() {
        let raw = "# Sorting\n\
                   Use **quicksort** or *merge sort*.\n\
                   - fast\n  * stable\n\
                   1. pick a pivot\n\
                   2. partition\n\
                   ```python\nsorted(xs)\n```\n\
                   Call `sorted` and see [the docs](https://docs.python.org).";

        assert_eq!(
            clean_reply(raw),
            "Sorting\n\
             Use quicksort or merge sort.\n\
             • fast\n• stable\n\
             pick a pivot\n\
             partition\n\
             \n\
             Call sorted and see the docs."
        );
    }

    #[test]
    fn test_clean_reply_keeps_plain_text() {
        assert_eq!(clean_reply("  Just use a loop.  \n"), "Just use a loop.");
    }

    #[tokio::test]
    async fn test_reply_is_cleaned() {
        let chat = ChatAssistant::new(Arc::new(FixedReply(Ok("**Rust** is a language."))));
        assert_eq!(chat.reply("what is rust?").await.unwrap(), "Rust is a language.");
    }

    #[tokio::test]
    async fn test_reply_failure_keeps_kind() {
        let chat = ChatAssistant::new(Arc::new(FixedReply(Err(CompletionErrorKind::RateLimited))));
        let err = chat.reply("hello").await.unwrap_err();
        assert!(matches!(err, AgentError::Completion(_)));
        assert_eq!(err.completion_kind(), Some(CompletionErrorKind::RateLimited));
    }
}
