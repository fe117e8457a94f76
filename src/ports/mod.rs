//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Inference Service Ports
//!
//! - `SentimentModel` - Three-way polarity classifier
//! - `QuestionAnsweringModel` - Extractive QA over a context passage
//!
//! ## Bot Ports
//!
//! - `InferenceClient` - Calls the inference service over HTTP
//! - `ChatTransport` - Receives messages and sends replies
//! - `SessionStore` - Per-chat conversation state

mod chat_transport;
mod inference_client;
mod inference_model;
mod session_store;

pub use chat_transport::{ChatTransport, ChatTransportError, PollBatch};
pub use inference_client::{InferenceClient, InferenceClientError};
pub use inference_model::{InferenceError, ModelInfo, QuestionAnsweringModel, SentimentModel};
pub use session_store::{SessionStore, SessionStoreError};
