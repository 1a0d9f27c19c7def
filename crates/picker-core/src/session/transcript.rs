//! Append-only conversation log.

use serde::{Deserialize, Serialize};

use super::message::{ChatMessage, MessageRole};

/// Persona the assistant is seeded with at session start.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Ordered conversation history for one session.
///
/// A transcript always starts with exactly one system message and only ever
/// grows. It lives in memory for the duration of the session and is sent
/// whole on every relay request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates a transcript seeded with the default system persona.
    pub fn new() -> Self {
        Self::with_system_prompt(SYSTEM_PROMPT)
    }

    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(prompt)],
        }
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(text));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the system message is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages excluding the seeded system persona.
    pub fn conversation(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages
            .iter()
            .filter(|message| message.role != MessageRole::System)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_seeded_with_one_system_message() {
        let transcript = Transcript::new();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].role, MessageRole::System);
        assert_eq!(transcript.messages()[0].content, SYSTEM_PROMPT);
        assert_eq!(transcript.conversation().count(), 0);
    }

    #[test]
    fn test_appends_keep_order() {
        let mut transcript = Transcript::new();
        transcript.append_user("hello");
        transcript.append_assistant("hi!");
        transcript.append_user("routine please");

        let roles: Vec<MessageRole> = transcript.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User
            ]
        );
        assert_eq!(transcript.last().unwrap().content, "routine please");
    }

    #[test]
    fn test_serializes_as_message_array() {
        let mut transcript = Transcript::new();
        transcript.append_user("hello");
        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": "hello"}
            ])
        );
    }
}
