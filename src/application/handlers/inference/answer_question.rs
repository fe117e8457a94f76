//! AnswerQuestionHandler - Extractive QA against the stored context.

use std::sync::Arc;
use std::time::Instant;

use super::InferenceServiceError;
use crate::domain::foundation::ValidationError;
use crate::domain::inference::{QaRequest, QaResult, StoredContext};
use crate::ports::QuestionAnsweringModel;

/// Handler for question answering.
///
/// Owns the service-wide stored context. A request with `reset_context`
/// replaces it before answering; any other request ignores its own
/// `context` field.
pub struct AnswerQuestionHandler {
    model: Arc<dyn QuestionAnsweringModel>,
    context: Arc<StoredContext>,
}

impl AnswerQuestionHandler {
    pub fn new(model: Arc<dyn QuestionAnsweringModel>, context: Arc<StoredContext>) -> Self {
        Self { model, context }
    }

    pub async fn handle(&self, request: QaRequest) -> Result<QaResult, InferenceServiceError> {
        // A rejected request must not touch the stored context.
        if request.question.trim().is_empty() {
            return Err(ValidationError::empty_field("question").into());
        }

        let context = self.context.resolve(&request.context, request.reset_context);

        let started = Instant::now();
        let prediction = self.model.answer(&request.question, &context).await?;

        tracing::info!(
            model = %self.model.model_info().model,
            reset_context = request.reset_context,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "question answered"
        );

        Ok(prediction.into())
    }

    /// Current stored context.
    pub fn stored_context(&self) -> String {
        self.context.snapshot()
    }
}
