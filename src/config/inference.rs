//! Model provider configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Hosted model configuration for the inference service
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the HuggingFace inference API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// HuggingFace API token
    pub api_token: Option<Secret<String>>,

    /// Sentiment classification model id
    #[serde(default = "default_sentiment_model")]
    pub sentiment_model: String,

    /// Question answering model id
    #[serde(default = "default_qa_model")]
    pub qa_model: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl InferenceConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate model configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.api_base) {
            return Err(ValidationError::InvalidUrl("inference.api_base"));
        }
        if self.sentiment_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelId("sentiment"));
        }
        if self.qa_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelId("question answering"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_token: None,
            sentiment_model: default_sentiment_model(),
            qa_model: default_qa_model(),
            timeout_secs: default_timeout(),
        }
    }
}

pub(super) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_api_base() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_sentiment_model() -> String {
    "pysentimiento/robertuito-sentiment-analysis".to_string()
}

fn default_qa_model() -> String {
    "mrm8488/distill-bert-base-spanish-wwm-cased-finetuned-spa-squad2-es".to_string()
}

fn default_timeout() -> u64 {
    120
}
