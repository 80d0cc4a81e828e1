//! OpenAI chat-completions provider.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CompletionError, CompletionErrorKind, CompletionProvider};
use crate::config::{Settings, DEFAULT_MODEL};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Completion provider backed by the OpenAI chat-completions endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: http_client(DEFAULT_TIMEOUT),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: OPENAI_API_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Builds a provider from loaded settings; `None` without an API key.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        settings
            .api_key
            .as_ref()
            .map(|key| Self::new(key.clone()).with_model(settings.model.clone()))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the provider at a compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Limits how long a single completion request may take.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    /// Replaces the HTTP client, including its timeout.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn http_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        warn!("Could not configure HTTP client ({e}); falling back to defaults");
        Client::new()
    })
}

/// Maps an HTTP status to the error kind reported to callers.
pub fn classify_status(status: StatusCode) -> CompletionErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionErrorKind::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => CompletionErrorKind::RateLimited,
        s if s.is_server_error() => CompletionErrorKind::ServerError,
        _ => CompletionErrorKind::Unknown,
    }
}

fn classify_transport(error: &reqwest::Error) -> CompletionErrorKind {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        CompletionErrorKind::NetworkError
    } else {
        CompletionErrorKind::Unknown
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            "Requesting completion from {} ({} prompt bytes)",
            self.model,
            system_prompt.len() + user_prompt.len()
        );

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let kind = classify_transport(&e);
                CompletionError::new(kind, format!("OpenAI API request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("OpenAI API error body: {body}");
            return Err(CompletionError::new(
                classify_status(status),
                format!("OpenAI API error: {status}"),
            ));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            CompletionError::new(
                CompletionErrorKind::Unknown,
                format!("Failed to parse OpenAI response: {e}"),
            )
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::new(CompletionErrorKind::Unknown, "No response from OpenAI")
            })
    }
}
