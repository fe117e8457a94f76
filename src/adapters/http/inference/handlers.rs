//! HTTP handlers for the inference endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::application::{AnswerQuestionHandler, ClassifySentimentHandler};
use crate::domain::inference::{EchoMessage, QaRequest, QaResult, SentimentRequest, SentimentResult};
use crate::ports::ModelInfo;

use super::dto::{ApiError, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InferenceAppState {
    sentiment: Arc<ClassifySentimentHandler>,
    qa: Arc<AnswerQuestionHandler>,
    sentiment_model: ModelInfo,
    qa_model: ModelInfo,
}

impl InferenceAppState {
    pub fn new(
        sentiment: Arc<ClassifySentimentHandler>,
        qa: Arc<AnswerQuestionHandler>,
        sentiment_model: ModelInfo,
        qa_model: ModelInfo,
    ) -> Self {
        Self {
            sentiment,
            qa,
            sentiment_model,
            qa_model,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /sent_analysis/ - Classify message sentiment
pub async fn classify_sentiment(
    State(state): State<InferenceAppState>,
    body: Result<Json<SentimentRequest>, JsonRejection>,
) -> Result<Json<SentimentResult>, ApiError> {
    let Json(request) = body?;
    let result = state.sentiment.handle(request).await?;
    Ok(Json(result))
}

/// POST /qa/ - Answer a question against the stored context
pub async fn answer_question(
    State(state): State<InferenceAppState>,
    body: Result<Json<QaRequest>, JsonRejection>,
) -> Result<Json<QaResult>, ApiError> {
    let Json(request) = body?;
    let result = state.qa.handle(request).await?;
    Ok(Json(result))
}

/// POST /test/ - Echo the message back
pub async fn echo(body: Result<Json<EchoMessage>, JsonRejection>) -> Result<Json<EchoMessage>, ApiError> {
    let Json(message) = body?;
    Ok(Json(message))
}

/// GET /health - Report configured models
pub async fn health(State(state): State<InferenceAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        sentiment_model: state.sentiment_model.model,
        qa_model: state.qa_model.model,
    })
}
