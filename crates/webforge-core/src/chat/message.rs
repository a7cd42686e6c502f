//! Chat message types.

use serde::{Deserialize, Serialize};

use super::snippet::CodeSnippet;

/// Represents the role of a message in the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Reply, confirmation or error produced on the assistant side.
    Assistant,
}

/// A single entry of the chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier (UUID format)
    pub id: String,
    pub role: MessageRole,
    /// Display text.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
    /// Code blocks extracted from an assistant reply.
    #[serde(default)]
    pub snippets: Vec<CodeSnippet>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            snippets: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn with_snippets(mut self, snippets: Vec<CodeSnippet>) -> Self {
        self.snippets = snippets;
        self
    }
}
