//! Session Store Port - Per-chat conversation state.

use async_trait::async_trait;

use crate::domain::conversation::ChatSession;
use crate::domain::foundation::ChatId;

/// Errors that can occur during session storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session for chat {chat_id}: {reason}")]
    SerializationFailed { chat_id: ChatId, reason: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Port for loading and saving chat sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session for a chat
    ///
    /// # Returns
    /// A fresh default session when the chat has never been seen
    async fn load(&self, chat_id: ChatId) -> Result<ChatSession, SessionStoreError>;

    /// Save the session for a chat, replacing any previous one
    async fn save(&self, chat_id: ChatId, session: &ChatSession) -> Result<(), SessionStoreError>;

    /// Number of chats with stored state
    async fn len(&self) -> usize;
}
