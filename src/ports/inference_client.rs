//! Inference Client Port - How the bot reaches the inference service.

use async_trait::async_trait;

use crate::domain::inference::{QaRequest, QaResult, SentimentRequest, SentimentResult};

/// Port for calling the inference service from the conversation controller.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Calls the sentiment endpoint.
    async fn classify_sentiment(
        &self,
        request: &SentimentRequest,
    ) -> Result<SentimentResult, InferenceClientError>;

    /// Calls the question answering endpoint.
    async fn answer_question(&self, request: &QaRequest) -> Result<QaResult, InferenceClientError>;
}

/// Failures reaching the inference service.
///
/// The controller treats every variant the same way; the distinction only
/// matters for logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("inference call timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The service answered with a non-success status.
    #[error("inference service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode inference response: {0}")]
    Decode(String),
}
