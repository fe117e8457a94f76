//! Chat bot configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::inference::is_http_url;

/// Chat bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: Option<Secret<String>>,

    /// Telegram Bot API base URL
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,

    /// Base URL of the inference service
    #[serde(default = "default_inference_base_url")]
    pub inference_base_url: String,

    /// Timeout for one inference call, in seconds
    #[serde(default = "default_inference_timeout")]
    pub inference_timeout_secs: u64,

    /// Long-poll timeout for getUpdates, in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// Pause after a failed poll, in milliseconds
    #[serde(default = "default_poll_error_delay")]
    pub poll_error_delay_ms: u64,

    /// Pending messages per chat before new ones are dropped
    #[serde(default = "default_worker_queue_capacity")]
    pub worker_queue_capacity: usize,

    /// Idle time after which a chat worker exits, in seconds
    #[serde(default = "default_worker_idle_timeout")]
    pub worker_idle_timeout_secs: u64,
}

impl BotConfig {
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn poll_error_delay(&self) -> Duration {
        Duration::from_millis(self.poll_error_delay_ms)
    }

    pub fn worker_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.worker_idle_timeout_secs)
    }

    /// Check if a non-empty token is configured
    pub fn has_token(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }

    /// Validate bot configuration
    ///
    /// The token is checked separately by `AppConfig::validate_for_bot`, so
    /// the inference service can start without one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.telegram_api_base) {
            return Err(ValidationError::InvalidUrl("bot.telegram_api_base"));
        }
        if !is_http_url(&self.inference_base_url) {
            return Err(ValidationError::InvalidUrl("bot.inference_base_url"));
        }
        if self.inference_timeout_secs == 0 || self.inference_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.poll_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.worker_queue_capacity == 0 {
            return Err(ValidationError::InvalidQueueCapacity);
        }
        if self.worker_idle_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            telegram_api_base: default_telegram_api_base(),
            inference_base_url: default_inference_base_url(),
            inference_timeout_secs: default_inference_timeout(),
            poll_timeout_secs: default_poll_timeout(),
            poll_error_delay_ms: default_poll_error_delay(),
            worker_queue_capacity: default_worker_queue_capacity(),
            worker_idle_timeout_secs: default_worker_idle_timeout(),
        }
    }
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_inference_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_inference_timeout() -> u64 {
    30
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_poll_error_delay() -> u64 {
    1000
}

fn default_worker_queue_capacity() -> usize {
    32
}

fn default_worker_idle_timeout() -> u64 {
    300
}
