//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes of the inference service
//! - `models` - Sentiment and QA models (HuggingFace, mocks)
//! - `inference_client` - Bot-side client of the inference service
//! - `telegram` - Chat transport over the Telegram Bot API
//! - `storage` - Per-chat session storage

pub mod http;
pub mod inference_client;
pub mod models;
pub mod storage;
pub mod telegram;
