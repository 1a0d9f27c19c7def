//! JSON shapes exchanged with the relay and the upstream API.

use picker_core::session::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body posted to the relay endpoint: `{ "messages": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub messages: Vec<ChatMessage>,
}

/// Body forwarded to the chat-completion API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
}

/// Error payload the relay answers with, `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Pulls `choices[0].message.content` out of a chat-completion response.
///
/// The rest of the response is opaque; only this path is relied upon.
pub fn extract_reply(response: &Value) -> Option<&str> {
    response
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}
