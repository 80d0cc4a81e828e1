//! Language-model completion capability.
//!
//! The agent only needs "system prompt + user prompt in, text out". Failures
//! are classified into a [`CompletionErrorKind`] where they happen, at the
//! provider boundary, so callers never inspect error text.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;

pub use openai::OpenAiProvider;

/// Classification of a failed completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionErrorKind {
    /// The API key was rejected
    Unauthorized,
    /// The provider throttled the request
    RateLimited,
    /// The provider failed internally
    ServerError,
    /// The request never got a response
    NetworkError,
    /// Anything else, including malformed responses
    Unknown,
}

impl fmt::Display for CompletionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompletionErrorKind::Unauthorized => "unauthorized",
            CompletionErrorKind::RateLimited => "rate limited",
            CompletionErrorKind::ServerError => "server error",
            CompletionErrorKind::NetworkError => "network error",
            CompletionErrorKind::Unknown => "unknown error",
        };
        f.write_str(name)
    }
}

/// A failed completion call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Completion failed ({kind}): {message}")]
pub struct CompletionError {
    pub kind: CompletionErrorKind,
    pub message: String,
}

impl CompletionError {
    pub fn new(kind: CompletionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Produces model-generated text from a system and a user prompt.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Runs one completion.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, CompletionError>;
}
