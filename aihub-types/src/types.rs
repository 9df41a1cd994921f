//! Chat request types and session lifecycle status.

use serde::{Deserialize, Serialize};

/// The role of a message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A human user.
    User,
    /// An AI assistant.
    Assistant,
    /// A system message.
    System,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author.
    pub role: Role,
    /// The text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }

    /// Create a system message.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }
}

/// A chat completion request.
///
/// Serialized as the upstream chat endpoint expects it; the client adds the
/// `stream` flag when dispatching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model identifier. Empty means "use the client default".
    pub model: String,
    /// The conversation messages.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// The text of the most recent user message, used as the `input` field of
    /// the terminal history record.
    #[must_use]
    pub fn input_text(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

/// Lifecycle status of a streaming session.
///
/// Transitions are `Idle → Streaming → {Completed | Failed | Cancelled}`.
/// The three terminal states are mutually exclusive and reached exactly once;
/// once a session leaves `Streaming` its status never changes again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Created but not yet started.
    #[default]
    Idle,
    /// Actively consuming the response body.
    Streaming,
    /// Terminated normally (sentinel frame or end-of-stream).
    Completed,
    /// Terminated by a transport error.
    Failed,
    /// Terminated by explicit cancellation.
    Cancelled,
}

impl SessionStatus {
    /// Whether this status is one of the three terminal states.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}
