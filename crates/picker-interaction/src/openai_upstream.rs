//! Upstream chat-completion client used by the relay server.
//!
//! Calls the OpenAI Chat Completions API with the server-held credential and
//! hands back the raw response so that the relay can pass it through untouched.

use crate::wire::ChatCompletionRequest;
use async_trait::async_trait;
use picker_core::session::ChatMessage;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Raw upstream answer: HTTP status plus the decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The request could not be sent or the body could not be read.
    #[error("Upstream request failed: {0}")]
    Request(String),

    /// The upstream body was not JSON.
    #[error("Upstream returned a non-JSON body (HTTP {status}): {message}")]
    InvalidBody { status: u16, message: String },
}

/// Forwards a conversation to the language-model provider.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn forward(&self, messages: &[ChatMessage]) -> Result<UpstreamResponse, UpstreamError>;
}

/// Client for the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiUpstream {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    url: String,
}

impl OpenAiUpstream {
    /// Creates a client with the default model, token cap and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            url: BASE_URL.to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Points the client at a different chat-completions URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Upstream for OpenAiUpstream {
    async fn forward(&self, messages: &[ChatMessage]) -> Result<UpstreamResponse, UpstreamError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|err| UpstreamError::Request(format!("OpenAI API request failed: {err}")))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| UpstreamError::Request(format!("Failed to read OpenAI body: {err}")))?;

        let body: Value = serde_json::from_str(&text).map_err(|err| UpstreamError::InvalidBody {
            status,
            message: err.to_string(),
        })?;

        debug!("OpenAI answered HTTP {} for model {}", status, self.model);
        Ok(UpstreamResponse { status, body })
    }
}
