//! HuggingFace Inference API adapters for the sentiment and QA model ports.
//!
//! Both models are served by the hosted inference API: one `POST` per call
//! to `{api_base}/{model_id}` with an `inputs` payload. Requests ask the API
//! to wait for cold models instead of failing fast.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HuggingFaceConfig::new("https://api-inference.huggingface.co/models")
//!     .with_token(token)
//!     .with_timeout(Duration::from_secs(120));
//!
//! let api = HuggingFaceApi::new(config)?;
//! let sentiment = HuggingFaceSentimentModel::new(api.clone(), DEFAULT_SENTIMENT_MODEL);
//! let qa = HuggingFaceQaModel::new(api, DEFAULT_QA_MODEL);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::Confidence;
use crate::domain::inference::{QaPrediction, SentimentLabel, SentimentPrediction};
use crate::ports::{InferenceError, ModelInfo, QuestionAnsweringModel, SentimentModel};

/// Spanish tweet sentiment model (labels NEG, NEU, POS).
pub const DEFAULT_SENTIMENT_MODEL: &str = "pysentimiento/robertuito-sentiment-analysis";

/// Spanish SQuAD2 extractive QA model.
pub const DEFAULT_QA_MODEL: &str =
    "mrm8488/distill-bert-base-spanish-wwm-cased-finetuned-spa-squad2-es";

const PROVIDER: &str = "huggingface";

/// Configuration for the HuggingFace inference API.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// Base URL under which models are addressed by id.
    pub api_base: String,
    /// Optional API token; anonymous calls are heavily rate limited.
    token: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl HuggingFaceConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            token: None,
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the API token.
    pub fn with_token(mut self, token: Secret<String>) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the endpoint URL for a model.
    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), model)
    }
}

/// HTTP client shared by both model adapters.
#[derive(Debug, Clone)]
pub struct HuggingFaceApi {
    config: HuggingFaceConfig,
    client: Client,
}

impl HuggingFaceApi {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InferenceError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Runs one inference call and decodes the JSON body.
    async fn infer<I, O>(&self, model: &str, inputs: &I) -> Result<O, InferenceError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let body = InferenceRequest {
            inputs,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(self.config.model_url(model)).json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                InferenceError::Network(format!("Connection failed: {}", e))
            } else {
                InferenceError::Network(e.to_string())
            }
        })?;

        let response = Self::handle_response_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| InferenceError::Parse(format!("Failed to parse response: {}", e)))
    }

    /// Maps error statuses onto inference errors.
    async fn handle_response_status(response: Response) -> Result<Response, InferenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), error_body))
    }
}

fn status_error(status: u16, error_body: String) -> InferenceError {
    match status {
        401 | 403 => InferenceError::AuthenticationFailed,
        429 => InferenceError::RateLimited,
        400 | 422 => InferenceError::InvalidInput(error_body),
        503 => InferenceError::unavailable(format!("Model loading or overloaded: {}", error_body)),
        500..=599 => InferenceError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => InferenceError::Network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Sentiment adapter.
pub struct HuggingFaceSentimentModel {
    api: HuggingFaceApi,
    model: String,
}

impl HuggingFaceSentimentModel {
    pub fn new(api: HuggingFaceApi, model: impl Into<String>) -> Self {
        Self {
            api,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SentimentModel for HuggingFaceSentimentModel {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction, InferenceError> {
        let scores: LabelScores = self.api.infer(&self.model, &text).await?;
        best_label(scores.flatten())
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new(PROVIDER, &self.model)
    }
}

/// Question answering adapter.
pub struct HuggingFaceQaModel {
    api: HuggingFaceApi,
    model: String,
}

impl HuggingFaceQaModel {
    pub fn new(api: HuggingFaceApi, model: impl Into<String>) -> Self {
        Self {
            api,
            model: model.into(),
        }
    }
}

#[async_trait]
impl QuestionAnsweringModel for HuggingFaceQaModel {
    async fn answer(&self, question: &str, context: &str) -> Result<QaPrediction, InferenceError> {
        let inputs = QaInputs { question, context };
        let span: AnswerSpan = self.api.infer(&self.model, &inputs).await?;
        Ok(QaPrediction::new(span.answer, Confidence::new(span.score)))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new(PROVIDER, &self.model)
    }
}

/// Picks the highest-scoring label.
fn best_label(scores: Vec<LabelScore>) -> Result<SentimentPrediction, InferenceError> {
    let best = scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| InferenceError::Parse("No labels in response".to_string()))?;

    let label: SentimentLabel = best
        .label
        .parse()
        .map_err(|_| InferenceError::Parse(format!("Unknown sentiment label: {}", best.label)))?;

    Ok(SentimentPrediction::new(label, Confidence::new(best.score)))
}

// ----- HuggingFace API Types -----

#[derive(Debug, Serialize)]
struct InferenceRequest<'a, I> {
    inputs: &'a I,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Text classification output: one list per input, or a flat list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LabelScores {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl LabelScores {
    fn flatten(self) -> Vec<LabelScore> {
        match self {
            LabelScores::Nested(batches) => batches.into_iter().flatten().collect(),
            LabelScores::Flat(scores) => scores,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnswerSpan {
    answer: String,
    score: f64,
}
