//! HTTP client for the inference service.
//!
//! Calls the slash-less routes (`/sent_analysis`, `/qa`) with JSON bodies.
//! No retries: one attempt per call, bounded by the client timeout.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::domain::inference::{QaRequest, QaResult, SentimentRequest, SentimentResult};
use crate::ports::{InferenceClient, InferenceClientError};

/// reqwest-backed `InferenceClient`.
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl HttpInferenceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, InferenceClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceClientError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, InferenceClientError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let response = Self::handle_response_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| InferenceClientError::Decode(e.to_string()))
    }

    fn map_send_error(&self, error: reqwest::Error) -> InferenceClientError {
        if error.is_timeout() {
            InferenceClientError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            InferenceClientError::Network(error.to_string())
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, InferenceClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(InferenceClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn classify_sentiment(
        &self,
        request: &SentimentRequest,
    ) -> Result<SentimentResult, InferenceClientError> {
        self.post("sent_analysis", request).await
    }

    async fn answer_question(&self, request: &QaRequest) -> Result<QaResult, InferenceClientError> {
        self.post("qa", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slash() {
        let client = HttpInferenceClient::new("http://127.0.0.1:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("qa"), "http://127.0.0.1:8000/qa");
        assert_eq!(client.url("sent_analysis"), "http://127.0.0.1:8000/sent_analysis");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        // Port 9 (discard) is not expected to have an HTTP listener.
        let client = HttpInferenceClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = client
            .classify_sentiment(&SentimentRequest::new("Ana", "hola"))
            .await;
        assert!(matches!(
            result,
            Err(InferenceClientError::Network(_)) | Err(InferenceClientError::Timeout { .. })
        ));
    }
}
