//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the bot and the inference service.

mod confidence;
mod errors;
mod ids;
mod state_machine;

pub use confidence::Confidence;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ChatId, CorrelationId, MessageId};
pub use state_machine::StateMachine;
