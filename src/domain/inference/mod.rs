//! Inference domain module.
//!
//! Model outputs, the QA stored context and the JSON contracts
//! exchanged between the bot and the inference service.

mod contracts;
mod qa;
mod sentiment;

pub use contracts::{EchoMessage, QaRequest, QaResult, SentimentRequest, SentimentResult};
pub use qa::{QaPrediction, StoredContext};
pub use sentiment::{SentimentLabel, SentimentPrediction};
