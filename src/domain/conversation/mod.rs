//! Conversation domain module.
//!
//! Per-chat mode state machine, classification of inbound text and the
//! replies the bot sends back.

mod input;
mod message;
mod mode;
mod session;

pub use input::{Input, MODE_CHANGE_TRIGGER};
pub use message::{InboundMessage, Keyboard, Reply, TextFormat};
pub use mode::ConversationMode;
pub use session::{Action, ChatSession};
