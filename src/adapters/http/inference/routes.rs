//! HTTP routes for the inference service.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{answer_question, classify_sentiment, echo, health, InferenceAppState};

/// Creates the inference router.
///
/// Each POST route answers with and without a trailing slash.
pub fn inference_router(state: InferenceAppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/sent_analysis", post(classify_sentiment))
        .route("/sent_analysis/", post(classify_sentiment))
        .route("/qa", post(answer_question))
        .route("/qa/", post(answer_question))
        .route("/test", post(echo))
        .route("/test/", post(echo))
        .route("/health", get(health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout)),
        )
}
