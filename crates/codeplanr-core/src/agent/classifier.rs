//! Gate that keeps non-coding requests out of planning.

use std::sync::Arc;

use log::debug;

use crate::completion::{CompletionError, CompletionProvider};

const CLASSIFIER_SYSTEM_PROMPT: &str = "You are a strict request classifier.";

/// Decides whether a request is a coding or file task.
#[derive(Clone)]
pub struct TaskClassifier {
    provider: Arc<dyn CompletionProvider>,
}

impl TaskClassifier {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Returns `true` when the model answers "yes" for `request`.
    ///
    /// Collaborator failures are returned as-is and not retried.
    pub async fn classify(&self, request: &str) -> Result<bool, CompletionError> {
        let prompt = format!(
            "Is this a request to create, modify, or work with code/files? \
             Answer only yes/no.\n\nRequest: {request}"
        );
        let answer = self
            .provider
            .complete(CLASSIFIER_SYSTEM_PROMPT, &prompt)
            .await?;
        let is_coding = is_affirmative(&answer);
        debug!("Classifier answered {:?} -> {is_coding}", answer.trim());
        Ok(is_coding)
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase().contains("yes")
}
