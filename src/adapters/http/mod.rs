//! HTTP adapters - REST API implementations.

pub mod inference;

pub use inference::{inference_router, InferenceAppState};
