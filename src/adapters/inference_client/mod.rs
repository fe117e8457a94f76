//! Inference client adapters - How the bot calls the inference service.

mod http_client;
mod mock;

pub use http_client::HttpInferenceClient;
pub use mock::MockInferenceClient;
