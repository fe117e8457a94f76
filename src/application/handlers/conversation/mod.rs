//! Conversation controller handlers.

mod handle_message;

pub use handle_message::{ConversationError, HandleMessageHandler};
