//! Application layer - Handlers and the bot dispatch loop.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod dispatcher;
pub mod handlers;

pub use dispatcher::{ChatDispatcher, DispatcherConfig};
pub use handlers::{
    AnswerQuestionHandler, ClassifySentimentHandler, ConversationError, HandleMessageHandler,
    InferenceServiceError,
};
