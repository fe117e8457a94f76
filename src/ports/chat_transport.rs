//! Chat Transport Port - Receiving user messages and sending replies.
//!
//! Implemented by the Telegram adapter; tests use a scripted transport.

use async_trait::async_trait;

use crate::domain::conversation::{InboundMessage, Reply};

/// Result of one long poll.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollBatch {
    /// Offset for the next poll; past every update seen, including skipped ones.
    pub next_offset: i64,
    /// Text messages in arrival order.
    pub messages: Vec<InboundMessage>,
}

impl PollBatch {
    /// A batch with no updates.
    pub fn empty(offset: i64) -> Self {
        Self {
            next_offset: offset,
            messages: Vec::new(),
        }
    }
}

/// Port for the messaging platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Waits for updates with an id of at least `offset`.
    ///
    /// May return an empty batch when the long poll expires. Updates that
    /// carry no text are skipped but still advance the offset.
    async fn poll(&self, offset: i64) -> Result<PollBatch, ChatTransportError>;

    /// Sends one reply.
    async fn send(&self, reply: &Reply) -> Result<(), ChatTransportError>;
}

/// Chat transport errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatTransportError {
    #[error("network error: {0}")]
    Network(String),

    /// The platform rejected the call.
    #[error("chat API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("failed to decode chat API response: {0}")]
    Decode(String),
}
