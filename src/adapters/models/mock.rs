//! Mock models for testing.
//!
//! Configurable implementations of the model ports, allowing tests to run
//! without calling a hosted inference API.
//!
//! # Features
//!
//! - Pre-configured predictions, consumed in order
//! - Simulated delays for timeout testing
//! - Error injection for failure handling
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let model = MockSentimentModel::new()
//!     .with_prediction(SentimentLabel::Positive, 0.95)
//!     .with_delay(Duration::from_millis(100));
//!
//! let prediction = model.classify("me encanta esto").await?;
//! assert_eq!(prediction.label, SentimentLabel::Positive);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Confidence;
use crate::domain::inference::{QaPrediction, SentimentLabel, SentimentPrediction};
use crate::ports::{InferenceError, ModelInfo, QuestionAnsweringModel, SentimentModel};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock sentiment model.
///
/// Returns neutral with 0.5 confidence once the queue is exhausted.
#[derive(Debug, Clone)]
pub struct MockSentimentModel {
    responses: Arc<Mutex<VecDeque<Result<SentimentPrediction, InferenceError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockSentimentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSentimentModel {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful prediction to the queue.
    pub fn with_prediction(self, label: SentimentLabel, confidence: f64) -> Self {
        lock(&self.responses).push_back(Ok(SentimentPrediction::new(
            label,
            Confidence::new(confidence),
        )));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: InferenceError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this model.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns the classified texts in call order.
    pub fn get_calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> Result<SentimentPrediction, InferenceError> {
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Ok(SentimentPrediction::new(
                SentimentLabel::Neutral,
                Confidence::new(0.5),
            ))
        })
    }
}

#[async_trait]
impl SentimentModel for MockSentimentModel {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction, InferenceError> {
        lock(&self.calls).push(text.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_response()
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new("mock", "mock-sentiment")
    }
}

/// A recorded question answering call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaCall {
    pub question: String,
    pub context: String,
}

/// Mock question answering model.
///
/// Once the queue is exhausted it answers with the whole context at full
/// confidence, which lets tests observe which context a call used.
#[derive(Debug, Clone)]
pub struct MockQaModel {
    responses: Arc<Mutex<VecDeque<Result<QaPrediction, InferenceError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<QaCall>>>,
}

impl Default for MockQaModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockQaModel {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful answer to the queue.
    pub fn with_answer(self, answer: impl Into<String>, confidence: f64) -> Self {
        lock(&self.responses).push_back(Ok(QaPrediction::new(answer, Confidence::new(confidence))));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: InferenceError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<QaCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl QuestionAnsweringModel for MockQaModel {
    async fn answer(&self, question: &str, context: &str) -> Result<QaPrediction, InferenceError> {
        lock(&self.calls).push(QaCall {
            question: question.to_string(),
            context: context.to_string(),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let queued = lock(&self.responses).pop_front();
        queued.unwrap_or_else(|| Ok(QaPrediction::new(context, Confidence::CERTAIN)))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new("mock", "mock-qa")
    }
}
