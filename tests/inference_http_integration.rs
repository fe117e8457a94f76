//! Integration tests for the inference service HTTP surface.
//!
//! These tests drive the public router with mock models:
//! 1. Request bodies deserialize into the shared contracts
//! 2. Responses carry the wire field names the bot expects
//! 3. QA context persists across requests until reset

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use nlp_chatbot::adapters::http::{inference_router, InferenceAppState};
use nlp_chatbot::adapters::models::{MockQaModel, MockSentimentModel};
use nlp_chatbot::application::{AnswerQuestionHandler, ClassifySentimentHandler};
use nlp_chatbot::domain::inference::{SentimentLabel, StoredContext};
use nlp_chatbot::ports::{InferenceError, QuestionAnsweringModel, SentimentModel};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestService {
    router: Router,
    sentiment: MockSentimentModel,
    qa: MockQaModel,
}

impl TestService {
    fn new(sentiment: MockSentimentModel, qa: MockQaModel) -> Self {
        let state = InferenceAppState::new(
            Arc::new(ClassifySentimentHandler::new(Arc::new(sentiment.clone()))),
            Arc::new(AnswerQuestionHandler::new(
                Arc::new(qa.clone()),
                Arc::new(StoredContext::new()),
            )),
            sentiment.model_info(),
            qa.model_info(),
        );
        Self {
            router: inference_router(state, Duration::from_secs(5)),
            sentiment,
            qa,
        }
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

fn qa_body(question: &str, context: &str, reset_context: bool) -> Value {
    json!({
        "question": question,
        "context": context,
        "reset_context": reset_context,
    })
}

// =============================================================================
// Sentiment
// =============================================================================

#[tokio::test]
async fn sentiment_echoes_sender_and_reports_short_code() {
    let service = TestService::new(
        MockSentimentModel::new().with_prediction(SentimentLabel::Negative, 0.91),
        MockQaModel::new(),
    );

    let (status, body) = service
        .post("/sent_analysis/", json!({"name": "Luis", "text": "odio los lunes"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "name": "Luis",
            "text": "odio los lunes",
            "classification": "NEG",
            "confidence": 0.91
        })
    );
    assert_eq!(service.sentiment.get_calls(), vec!["odio los lunes".to_string()]);
}

#[tokio::test]
async fn sentiment_rejects_blank_text_without_calling_model() {
    let service = TestService::new(MockSentimentModel::new(), MockQaModel::new());

    let (status, body) = service
        .post("/sent_analysis", json!({"name": "Luis", "text": "   "}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "text");
    assert_eq!(service.sentiment.call_count(), 0);
}

#[tokio::test]
async fn sentiment_model_failure_maps_to_bad_gateway() {
    let service = TestService::new(
        MockSentimentModel::new().with_error(InferenceError::unavailable("model loading")),
        MockQaModel::new(),
    );

    let (status, body) = service
        .post("/sent_analysis/", json!({"name": "Luis", "text": "hola"}))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "INFERENCE_FAILED");
}

#[tokio::test]
async fn missing_fields_are_validation_failures() {
    let service = TestService::new(MockSentimentModel::new(), MockQaModel::new());

    let (status, body) = service.post("/sent_analysis/", json!({"name": "Luis"})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Question answering
// =============================================================================

#[tokio::test]
async fn qa_reset_replaces_context_for_later_questions() {
    let service = TestService::new(MockSentimentModel::new(), MockQaModel::new());

    let (status, first) = service
        .post(
            "/qa/",
            qa_body("¿Cuál es la capital?", "La capital de Francia es París", true),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["answer"], "La capital de Francia es París");

    let (status, _) = service
        .post("/qa/", qa_body("¿Y el río?", "texto ignorado", false))
        .await;
    assert_eq!(status, StatusCode::OK);

    let calls = service.qa.get_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].question, "¿Y el río?");
    assert_eq!(calls[1].context, "La capital de Francia es París");
}

#[tokio::test]
async fn qa_reports_model_answer_and_confidence() {
    let service = TestService::new(
        MockSentimentModel::new(),
        MockQaModel::new().with_answer("París", 0.8731),
    );

    let (status, body) = service
        .post("/qa", qa_body("¿Cuál es la capital?", "La capital de Francia es París", true))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"answer": "París", "confidence": 0.8731}));
}

#[tokio::test]
async fn qa_rejects_blank_question_and_keeps_context() {
    let service = TestService::new(MockSentimentModel::new(), MockQaModel::new());

    service
        .post("/qa/", qa_body("¿Cuál es la capital?", "contexto original", true))
        .await;
    let (status, body) = service
        .post("/qa/", qa_body(" ", "contexto nuevo", true))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["field"], "question");

    service
        .post("/qa/", qa_body("¿Otra?", "", false))
        .await;
    let calls = service.qa.get_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].context, "contexto original");
}

// =============================================================================
// Diagnostics
// =============================================================================

#[tokio::test]
async fn test_endpoint_echoes_body() {
    let service = TestService::new(MockSentimentModel::new(), MockQaModel::new());

    let (status, body) = service
        .post("/test/", json!({"name": "Ana", "text": "ping"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"name": "Ana", "text": "ping"}));
    assert_eq!(service.sentiment.call_count(), 0);
    assert_eq!(service.qa.call_count(), 0);
}
