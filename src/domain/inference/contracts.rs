//! Request/response contracts between the bot and the inference service.
//!
//! Field names are the JSON wire names; both the HTTP server and the
//! bot-side client serialize these types directly.

use serde::{Deserialize, Serialize};

use super::{QaPrediction, SentimentLabel, SentimentPrediction};
use crate::domain::foundation::Confidence;

/// Body of `POST /sent_analysis/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRequest {
    /// Display name of the sender, echoed back in the result.
    pub name: String,
    pub text: String,
}

impl SentimentRequest {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Response of `POST /sent_analysis/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub name: String,
    pub text: String,
    pub classification: SentimentLabel,
    pub confidence: Confidence,
}

impl SentimentResult {
    pub fn from_prediction(request: SentimentRequest, prediction: SentimentPrediction) -> Self {
        Self {
            name: request.name,
            text: request.text,
            classification: prediction.label,
            confidence: prediction.confidence,
        }
    }
}

/// Body of `POST /qa/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRequest {
    pub question: String,
    /// Only read by the service when `reset_context` is true.
    pub context: String,
    pub reset_context: bool,
}

/// Response of `POST /qa/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaResult {
    pub answer: String,
    pub confidence: Confidence,
}

impl From<QaPrediction> for QaResult {
    fn from(prediction: QaPrediction) -> Self {
        Self {
            answer: prediction.answer,
            confidence: prediction.confidence,
        }
    }
}

/// Body and response of the diagnostic `POST /test/` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoMessage {
    pub name: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentiment_result_uses_wire_field_names() {
        let result = SentimentResult::from_prediction(
            SentimentRequest::new("Ana", "me encanta esto"),
            SentimentPrediction::new(SentimentLabel::Positive, Confidence::new(0.95)),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Ana",
                "text": "me encanta esto",
                "classification": "POS",
                "confidence": 0.95
            })
        );
    }

    #[test]
    fn qa_request_deserializes_reset_flag() {
        let request: QaRequest = serde_json::from_value(json!({
            "question": "¿Cuál es la capital de Francia?",
            "context": "La capital de Francia es París",
            "reset_context": true
        }))
        .unwrap();
        assert!(request.reset_context);
        assert_eq!(request.context, "La capital de Francia es París");
    }

    #[test]
    fn qa_request_requires_reset_flag() {
        let result: Result<QaRequest, _> =
            serde_json::from_value(json!({"question": "q", "context": "c"}));
        assert!(result.is_err());
    }

    #[test]
    fn qa_result_rejects_confidence_above_one() {
        let result: Result<QaResult, _> =
            serde_json::from_value(json!({"answer": "París", "confidence": 1.5}));
        assert!(result.is_err());
    }
}
