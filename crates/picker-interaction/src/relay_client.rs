//! Chat relay client.
//!
//! Posts the whole transcript to the relay endpoint and returns the assistant
//! reply. One attempt per call: no retry, no timeout, no cancellation.

use crate::wire::{ErrorBody, RelayRequest, extract_reply};
use async_trait::async_trait;
use picker_core::session::Transcript;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of a relay call.
///
/// `MalformedResponse` is a contract violation by the far side and is never
/// worth retrying. Every other variant is a generic relay failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The JSON reply has no `choices[0].message.content`.
    #[error("Unexpected response shape: missing choices[0].message.content")]
    MalformedResponse,

    /// The request never completed (connect, send, or body read failure).
    #[error("Relay request failed: {0}")]
    Transport(String),

    /// The relay answered with a non-success status.
    #[error("Relay returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The reply body is not JSON.
    #[error("Relay returned a non-JSON body: {0}")]
    InvalidBody(String),
}

impl RelayError {
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse)
    }

    /// Whether a caller could reasonably try the same request again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            Self::MalformedResponse | Self::InvalidBody(_) => false,
        }
    }
}

/// Anything that can turn a transcript into one assistant reply.
#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn send(&self, transcript: &Transcript) -> Result<String, RelayError>;
}

/// HTTP client for the relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatRelay for RelayClient {
    async fn send(&self, transcript: &Transcript) -> Result<String, RelayError> {
        let request = RelayRequest {
            messages: transcript.messages().to_vec(),
        };

        debug!(
            "Posting {} message(s) to {}",
            request.messages.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RelayError::Transport(format!("Failed to read relay body: {err}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|wrapper| wrapper.error)
                .unwrap_or(body);
            warn!("Relay answered HTTP {}: {}", status, message);
            return Err(RelayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: Value =
            serde_json::from_str(&body).map_err(|err| RelayError::InvalidBody(err.to_string()))?;

        extract_reply(&parsed)
            .map(str::to_string)
            .ok_or(RelayError::MalformedResponse)
    }
}
