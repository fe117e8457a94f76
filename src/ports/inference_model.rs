//! Inference Model Ports - Interfaces for the pretrained NLP models.
//!
//! The service treats both models as opaque: text in, labelled prediction
//! out. Adapters connect to a hosted inference API or, in tests, return
//! canned predictions.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct AlwaysPositive;
//!
//! #[async_trait]
//! impl SentimentModel for AlwaysPositive {
//!     async fn classify(&self, _text: &str) -> Result<SentimentPrediction, InferenceError> {
//!         Ok(SentimentPrediction::new(SentimentLabel::Positive, Confidence::CERTAIN))
//!     }
//!
//!     fn model_info(&self) -> ModelInfo {
//!         ModelInfo::new("static", "always-positive")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::inference::{QaPrediction, SentimentPrediction};

/// Port for three-way sentiment classification.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Classifies the polarity of `text`.
    async fn classify(&self, text: &str) -> Result<SentimentPrediction, InferenceError>;

    /// Provider and model identifier.
    fn model_info(&self) -> ModelInfo;
}

/// Port for extractive question answering.
#[async_trait]
pub trait QuestionAnsweringModel: Send + Sync {
    /// Selects the span of `context` that answers `question`.
    async fn answer(&self, question: &str, context: &str) -> Result<QaPrediction, InferenceError>;

    /// Provider and model identifier.
    fn model_info(&self) -> ModelInfo;
}

/// Identifies the model behind a port implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Provider name (e.g., "huggingface", "mock").
    pub provider: String,
    /// Model identifier as the provider knows it.
    pub model: String,
}

impl ModelInfo {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }
}

/// Model invocation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    /// The provider rejected the input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// API token missing or rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by provider.
    #[error("rate limited")]
    RateLimited,

    /// Model is loading or the provider is down.
    #[error("model unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl InferenceError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
