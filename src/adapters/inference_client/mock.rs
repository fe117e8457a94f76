//! Mock inference client for controller tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Confidence;
use crate::domain::inference::{
    QaRequest, QaResult, SentimentLabel, SentimentRequest, SentimentResult,
};
use crate::ports::{InferenceClient, InferenceClientError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted `InferenceClient`.
///
/// Sentiment calls fall back to neutral at 0.5; QA calls fall back to an
/// answer equal to the request's context at full confidence.
#[derive(Debug, Clone, Default)]
pub struct MockInferenceClient {
    sentiment: Arc<Mutex<VecDeque<Result<(SentimentLabel, f64), InferenceClientError>>>>,
    answers: Arc<Mutex<VecDeque<Result<QaResult, InferenceClientError>>>>,
    delay: Duration,
    sentiment_calls: Arc<Mutex<Vec<SentimentRequest>>>,
    qa_calls: Arc<Mutex<Vec<QaRequest>>>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a sentiment classification.
    pub fn with_sentiment(self, label: SentimentLabel, confidence: f64) -> Self {
        lock(&self.sentiment).push_back(Ok((label, confidence)));
        self
    }

    /// Queues a sentiment failure.
    pub fn with_sentiment_error(self, error: InferenceClientError) -> Self {
        lock(&self.sentiment).push_back(Err(error));
        self
    }

    /// Queues a QA answer.
    pub fn with_answer(self, answer: impl Into<String>, confidence: f64) -> Self {
        lock(&self.answers).push_back(Ok(QaResult {
            answer: answer.into(),
            confidence: Confidence::new(confidence),
        }));
        self
    }

    /// Queues a QA failure.
    pub fn with_answer_error(self, error: InferenceClientError) -> Self {
        lock(&self.answers).push_back(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn sentiment_calls(&self) -> Vec<SentimentRequest> {
        lock(&self.sentiment_calls).clone()
    }

    pub fn qa_calls(&self) -> Vec<QaRequest> {
        lock(&self.qa_calls).clone()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn classify_sentiment(
        &self,
        request: &SentimentRequest,
    ) -> Result<SentimentResult, InferenceClientError> {
        lock(&self.sentiment_calls).push(request.clone());
        self.simulate_latency().await;

        let queued = lock(&self.sentiment).pop_front();
        let (label, confidence) = queued.unwrap_or(Ok((SentimentLabel::Neutral, 0.5)))?;
        Ok(SentimentResult {
            name: request.name.clone(),
            text: request.text.clone(),
            classification: label,
            confidence: Confidence::new(confidence),
        })
    }

    async fn answer_question(&self, request: &QaRequest) -> Result<QaResult, InferenceClientError> {
        lock(&self.qa_calls).push(request.clone());
        self.simulate_latency().await;

        let queued = lock(&self.answers).pop_front();
        queued.unwrap_or_else(|| {
            Ok(QaResult {
                answer: request.context.clone(),
                confidence: Confidence::CERTAIN,
            })
        })
    }
}
