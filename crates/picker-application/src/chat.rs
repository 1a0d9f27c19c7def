//! Chat request lifecycle.
//!
//! Every submission moves through `Sending -> Succeeded | Failed`. While a
//! request is in flight the thread shows a "Thinking..." placeholder tagged
//! with the request's correlation token; completion swaps that placeholder for
//! the reply or an inline error. The transcript gains the user message at
//! submit time and the assistant message only on success, so a retry after a
//! failure resends the same context.

use chrono::{DateTime, Utc};
use picker_core::session::Transcript;
use picker_interaction::RelayError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error};
use uuid::Uuid;

pub const THINKING_TEXT: &str = "Thinking...";

/// Correlates a placeholder entry with the request that will resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestToken(Uuid);

impl RequestToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Sending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    User,
    Assistant,
    /// Placeholder for an in-flight request.
    Pending,
    Error,
}

/// One displayed line of the chat thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadEntry {
    pub kind: EntryKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<RequestToken>,
    pub created_at: DateTime<Utc>,
}

impl ThreadEntry {
    fn new(kind: EntryKind, text: impl Into<String>, token: Option<RequestToken>) -> Self {
        Self {
            kind,
            text: text.into(),
            token,
            created_at: Utc::now(),
        }
    }
}

/// What the chat region displays. Kept apart from the transcript: it also
/// holds placeholders and errors, which are never sent upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatThread {
    entries: Vec<ThreadEntry>,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ThreadEntry] {
        &self.entries
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(ThreadEntry::new(EntryKind::User, text, None));
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.entries.push(ThreadEntry::new(EntryKind::Error, text, None));
    }

    /// Appends a placeholder and returns the token that resolves it.
    pub fn push_placeholder(&mut self) -> RequestToken {
        let token = RequestToken::new();
        self.entries
            .push(ThreadEntry::new(EntryKind::Pending, THINKING_TEXT, Some(token)));
        token
    }

    /// Replaces the placeholder for `token`. If it is gone the entry is appended instead.
    pub fn resolve(&mut self, token: RequestToken, kind: EntryKind, text: impl Into<String>) {
        let entry = ThreadEntry::new(kind, text, None);
        match self
            .entries
            .iter_mut()
            .find(|e| e.kind == EntryKind::Pending && e.token == Some(token))
        {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Pending)
            .count()
    }
}

/// A submitted request waiting for its relay round trip.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub token: RequestToken,
    /// Transcript as it stood at submit time, user message included.
    pub transcript: Transcript,
}

/// The transcript sent upstream together with the thread shown to the user.
#[derive(Debug, Clone, Default)]
pub struct ChatConversation {
    transcript: Transcript,
    thread: ChatThread,
    /// Requests still in flight. Entries are dropped on completion.
    in_flight: HashMap<RequestToken, RequestState>,
}

impl ChatConversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn thread(&self) -> &ChatThread {
        &self.thread
    }

    pub fn thread_mut(&mut self) -> &mut ChatThread {
        &mut self.thread
    }

    /// `Some(Sending)` while `token` is in flight, `None` once it has completed.
    pub fn state(&self, token: RequestToken) -> Option<RequestState> {
        self.in_flight.get(&token).copied()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Records a chat submission. Blank text is ignored and yields `None`.
    pub fn submit(&mut self, text: &str) -> Option<PendingRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.submit_as(text, text))
    }

    /// Records `message` in the transcript while showing `display` in the thread.
    pub fn submit_as(&mut self, message: &str, display: &str) -> PendingRequest {
        self.transcript.append_user(message);
        self.thread.push_user(display);

        let token = self.thread.push_placeholder();
        self.in_flight.insert(token, RequestState::Sending);
        debug!("Chat request {} sending", token);

        PendingRequest {
            token,
            transcript: self.transcript.clone(),
        }
    }

    /// Applies the relay outcome for `token` and returns the final state.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<String, RelayError>) -> RequestState {
        let state = match outcome {
            Ok(reply) => {
                self.transcript.append_assistant(reply.as_str());
                self.thread.resolve(token, EntryKind::Assistant, reply);
                RequestState::Succeeded
            }
            Err(err) => {
                error!("Chat request {} failed: {}", token, err);
                self.thread
                    .resolve(token, EntryKind::Error, format!("Error: {err}"));
                RequestState::Failed
            }
        };

        self.in_flight.remove(&token);
        state
    }
}
