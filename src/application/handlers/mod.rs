//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod conversation;
pub mod inference;

pub use conversation::{ConversationError, HandleMessageHandler};
pub use inference::{AnswerQuestionHandler, ClassifySentimentHandler, InferenceServiceError};
