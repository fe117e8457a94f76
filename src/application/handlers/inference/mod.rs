//! Inference service command handlers.

mod answer_question;
mod classify_sentiment;

pub use answer_question::AnswerQuestionHandler;
pub use classify_sentiment::ClassifySentimentHandler;

use crate::domain::foundation::ValidationError;
use crate::ports::InferenceError;

/// Failures of an inference service operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceServiceError {
    /// The request was rejected before reaching the model.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The model call failed.
    #[error("inference failed: {0}")]
    Model(#[from] InferenceError),
}
