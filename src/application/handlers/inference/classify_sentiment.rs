//! ClassifySentimentHandler - Labels the polarity of one message.

use std::sync::Arc;
use std::time::Instant;

use super::InferenceServiceError;
use crate::domain::foundation::ValidationError;
use crate::domain::inference::{SentimentRequest, SentimentResult};
use crate::ports::SentimentModel;

/// Handler for sentiment classification.
pub struct ClassifySentimentHandler {
    model: Arc<dyn SentimentModel>,
}

impl ClassifySentimentHandler {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self { model }
    }

    pub async fn handle(
        &self,
        request: SentimentRequest,
    ) -> Result<SentimentResult, InferenceServiceError> {
        if request.text.trim().is_empty() {
            return Err(ValidationError::empty_field("text").into());
        }

        let started = Instant::now();
        let prediction = self.model.classify(&request.text).await?;

        tracing::info!(
            model = %self.model.model_info().model,
            classification = %prediction.label,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "sentiment classified"
        );

        Ok(SentimentResult::from_prediction(request, prediction))
    }
}
