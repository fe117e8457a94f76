//! Telegram Bot API adapter for the chat transport port.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TelegramConfig::new(token)
//!     .with_poll_timeout(Duration::from_secs(30));
//!
//! let transport = TelegramTransport::new(config)?;
//! ```
//!
//! Method URLs embed the bot token, so transport errors are rendered
//! without their URL.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::types::{ApiResponse, GetUpdatesRequest, SendMessageRequest, Update};
use crate::domain::conversation::Reply;
use crate::ports::{ChatTransport, ChatTransportError, PollBatch};

/// Default Bot API endpoint.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Slack added to the HTTP timeout on top of the long-poll timeout.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Configuration for the Telegram transport.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    token: Secret<String>,
    /// Base URL of the Bot API.
    pub api_base: String,
    /// How long `getUpdates` may hold the connection open.
    pub poll_timeout: Duration,
}

impl TelegramConfig {
    pub fn new(token: Secret<String>) -> Self {
        Self {
            token,
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            poll_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Sets the long-poll timeout.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base.trim_end_matches('/'),
            self.token.expose_secret(),
            method
        )
    }
}

/// Long-polling Telegram transport.
pub struct TelegramTransport {
    config: TelegramConfig,
    client: Client,
}

impl TelegramTransport {
    pub fn new(config: TelegramConfig) -> Result<Self, ChatTransportError> {
        let client = Client::builder()
            .timeout(config.poll_timeout + POLL_GRACE)
            .build()
            .map_err(|e| ChatTransportError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, ChatTransportError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.config.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| ChatTransportError::Network(e.without_url().to_string()))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| ChatTransportError::Decode(e.without_url().to_string()))?;

        unwrap_envelope(envelope)
    }
}

fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, ChatTransportError> {
    match envelope {
        ApiResponse {
            ok: true,
            result: Some(result),
            ..
        } => Ok(result),
        ApiResponse { ok: true, .. } => Err(ChatTransportError::Decode(
            "missing result in successful response".to_string(),
        )),
        ApiResponse {
            error_code,
            description,
            ..
        } => Err(ChatTransportError::Api {
            code: error_code.unwrap_or_default(),
            description: description.unwrap_or_default(),
        }),
    }
}

/// Collects text messages and the offset past the last update.
fn into_batch(offset: i64, updates: Vec<Update>) -> PollBatch {
    let mut batch = PollBatch::empty(offset);
    for update in updates {
        batch.next_offset = batch.next_offset.max(update.update_id + 1);
        if let Some(message) = update.message.and_then(|m| m.into_inbound()) {
            batch.messages.push(message);
        }
    }
    batch
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn poll(&self, offset: i64) -> Result<PollBatch, ChatTransportError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.config.poll_timeout.as_secs(),
            allowed_updates: vec!["message"],
        };
        let updates: Vec<Update> = self.call("getUpdates", &request).await?;
        Ok(into_batch(offset, updates))
    }

    async fn send(&self, reply: &Reply) -> Result<(), ChatTransportError> {
        let request = SendMessageRequest::from(reply);
        let _sent: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn updates(body: serde_json::Value) -> Vec<Update> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn method_url_embeds_token() {
        let config = TelegramConfig::new(Secret::new("123:abc".to_string()))
            .with_api_base("http://localhost:8081/");
        assert_eq!(
            config.method_url("getUpdates"),
            "http://localhost:8081/bot123:abc/getUpdates"
        );
    }

    #[test]
    fn batch_advances_past_skipped_updates() {
        let batch = into_batch(
            10,
            updates(json!([
                {"update_id": 10, "message": {"message_id": 1, "chat": {"id": 1}, "text": "hola"}},
                {"update_id": 11, "message": {"message_id": 2, "chat": {"id": 1}}},
                {"update_id": 12}
            ])),
        );
        assert_eq!(batch.next_offset, 13);
        assert_eq!(batch.messages.len(), 1);
        assert_eq!(batch.messages[0].text, "hola");
        assert_eq!(batch.messages[0].sender_name, "");
    }

    #[test]
    fn empty_batch_keeps_offset() {
        assert_eq!(into_batch(5, Vec::new()), PollBatch::empty(5));
    }

    #[test]
    fn failed_envelope_is_api_error() {
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_value(
            json!({"ok": false, "error_code": 409, "description": "Conflict"}),
        )
        .unwrap();
        assert_eq!(
            unwrap_envelope(envelope).unwrap_err(),
            ChatTransportError::Api {
                code: 409,
                description: "Conflict".to_string()
            }
        );
    }

    #[test]
    fn ok_without_result_is_decode_error() {
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_value(json!({"ok": true})).unwrap();
        assert!(matches!(unwrap_envelope(envelope), Err(ChatTransportError::Decode(_))));
    }
}
