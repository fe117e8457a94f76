//! Model adapters - Implementations of the sentiment and QA model ports.
//!
//! - `huggingface` - Hosted HuggingFace Inference API
//! - `mock` - Configurable models for testing

mod huggingface;
mod mock;

pub use huggingface::{
    HuggingFaceApi, HuggingFaceConfig, HuggingFaceQaModel, HuggingFaceSentimentModel,
    DEFAULT_QA_MODEL, DEFAULT_SENTIMENT_MODEL,
};
pub use mock::{MockQaModel, MockSentimentModel, QaCall};
