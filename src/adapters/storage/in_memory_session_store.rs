//! In-Memory Session Store Adapter
//!
//! Keeps one `ChatSession` per chat in memory. Sessions are lost on
//! restart, so every chat starts over in sentiment mode.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ChatSession;
use crate::domain::foundation::ChatId;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for chat sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<ChatId, ChatSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, chat_id: ChatId) -> Result<ChatSession, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&chat_id).cloned().unwrap_or_default())
    }

    async fn save(&self, chat_id: ChatId, session: &ChatSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(chat_id, session.clone());
        Ok(())
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationMode;

    #[tokio::test]
    async fn unknown_chat_loads_default_session() {
        let store = InMemorySessionStore::new();
        let session = store.load(ChatId::new(1)).await.unwrap();
        assert_eq!(session, ChatSession::default());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn save_then_load_returns_saved_session() {
        let store = InMemorySessionStore::new();
        let session = ChatSession {
            mode: ConversationMode::ContextCapture,
            context: "La capital de Francia es París".to_string(),
            reset_context: true,
        };

        store.save(ChatId::new(1), &session).await.unwrap();

        assert_eq!(store.load(ChatId::new(1)).await.unwrap(), session);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn chats_are_isolated() {
        let store = InMemorySessionStore::new();
        let qa = ChatSession {
            mode: ConversationMode::QuestionAnswering,
            ..ChatSession::default()
        };

        store.save(ChatId::new(1), &qa).await.unwrap();

        assert_eq!(store.load(ChatId::new(2)).await.unwrap().mode, ConversationMode::Sentiment);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = InMemorySessionStore::new();
        store.save(ChatId::new(1), &ChatSession::default()).await.unwrap();
        store.clear().await;
        assert_eq!(store.len().await, 0);
    }
}
