//! HTTP DTOs for the inference endpoints.
//!
//! Request and success bodies are the domain contracts themselves
//! (`SentimentRequest`, `QaResult`, ...); this module adds the error and
//! health shapes and the error-to-status mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::InferenceServiceError;
use crate::domain::foundation::{DomainError, ErrorCode};

// ════════════════════════════════════════════════════════════════════════════
// Response types
// ════════════════════════════════════════════════════════════════════════════

/// Response for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sentiment_model: String,
    pub qa_model: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn inference_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InferenceFailed, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(error: DomainError) -> Self {
        let response = Self::new(error.code, error.message);
        if error.details.is_empty() {
            response
        } else {
            response.with_details(serde_json::json!(error.details))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

/// Errors returned by the inference handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be parsed into the expected contract.
    MalformedBody(JsonRejection),
    /// Operation failed in the application layer.
    Service(InferenceServiceError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection)
    }
}

impl From<InferenceServiceError> for ApiError {
    fn from(error: InferenceServiceError) -> Self {
        ApiError::Service(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedBody(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::validation_failed(rejection.body_text()),
            ),
            ApiError::Service(InferenceServiceError::Validation(e)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::from(DomainError::from(e)),
            ),
            ApiError::Service(InferenceServiceError::Model(e)) => {
                tracing::warn!(error = %e, "model call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::inference_failed(e.to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;
    use crate::ports::InferenceError;

    #[test]
    fn error_codes_are_screaming_snake_case() {
        assert_eq!(ErrorResponse::validation_failed("x").code, "VALIDATION_FAILED");
        assert_eq!(ErrorResponse::inference_failed("x").code, "INFERENCE_FAILED");
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::inference_failed("down")).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn domain_error_details_become_json_object() {
        let response = ErrorResponse::from(DomainError::from(ValidationError::empty_field("text")));
        assert_eq!(response.code, "VALIDATION_FAILED");
        assert_eq!(response.details, Some(serde_json::json!({"field": "text"})));
    }

    #[test]
    fn validation_maps_to_422() {
        let error = ApiError::from(InferenceServiceError::from(ValidationError::empty_field("text")));
        assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn model_failure_maps_to_502() {
        let error = ApiError::from(InferenceServiceError::from(InferenceError::RateLimited));
        assert_eq!(error.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
