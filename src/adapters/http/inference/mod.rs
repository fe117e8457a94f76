//! HTTP adapter for the inference service.
//!
//! Endpoints:
//! - `POST /sent_analysis/` - Sentiment classification of `{name, text}`
//! - `POST /qa/` - Question answering with the stored context
//! - `POST /test/` - Echo diagnostic
//! - `GET /health` - Liveness and configured models

mod dto;
mod handlers;
mod routes;

pub use dto::{ApiError, ErrorResponse, HealthResponse};
pub use handlers::InferenceAppState;
pub use routes::inference_router;
