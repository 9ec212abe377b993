//! LLM Client: the single point of entry for all chat-completion calls in the analyzer.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! All LLM interactions MUST go through the `CompletionClient` trait.
//!
//! Model: gpt-4o at temperature 0.3, hardcoded.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod extract;
#[cfg(test)]
pub mod mock;
pub mod prompts;

/// The model used for every analysis call.
pub const MODEL: &str = "gpt-4o";
pub const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion service error (status {status}): {message}")]
    Service { status: u16, message: String },
}

/// A text-completion backend: one prompt in, free-form text out.
///
/// The credential travels with every call; implementations hold no secrets.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, credential: &str, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: config.openai_api_url.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    /// Sends a single user-role message and returns the trimmed text of the first choice.
    /// No retries: any failure is returned to the caller as-is.
    async fn complete(&self, credential: &str, prompt: &str) -> Result<String, CompletionError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(credential)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Completion API returned {status}");
            return Err(classify_failure(status, body));
        }

        let chat: ChatResponse = serde_json::from_str(&body).map_err(|e| CompletionError::Service {
            status: status.as_u16(),
            message: format!("malformed completion response: {e}"),
        })?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| CompletionError::Service {
                status: status.as_u16(),
                message: "completion returned no message content".to_string(),
            })
    }
}

/// Maps a non-success status and body to the error taxonomy.
fn classify_failure(status: StatusCode, body: String) -> CompletionError {
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Authentication(message),
        _ => CompletionError::Service {
            status: status.as_u16(),
            message,
        },
    }
}
