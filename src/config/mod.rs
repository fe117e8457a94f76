//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `NLP_CHATBOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use nlp_chatbot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod bot;
mod error;
mod inference;
mod server;

pub use bot::BotConfig;
pub use error::{ConfigError, ValidationError};
pub use inference::InferenceConfig;
pub use server::{Environment, ServerConfig};

use secrecy::Secret;
use serde::Deserialize;

/// Environment variable the bot token falls back to.
pub const BOT_TOKEN_FALLBACK_VAR: &str = "BOT_TOKEN";

/// Root application configuration
///
/// Shared by both binaries; each validates the sections it needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted model configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Chat bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NLP_CHATBOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    /// 5. Falls back to `BOT_TOKEN` when no bot token is configured
    ///
    /// # Environment Variable Format
    ///
    /// - `NLP_CHATBOT__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `NLP_CHATBOT__BOT__INFERENCE_BASE_URL=...` -> `bot.inference_base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NLP_CHATBOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if !config.bot.has_token() {
            if let Ok(token) = std::env::var(BOT_TOKEN_FALLBACK_VAR) {
                config.bot.token = Some(Secret::new(token));
            }
        }

        Ok(config)
    }

    /// Validate the configuration needed by the inference service
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.inference.validate()?;
        Ok(())
    }

    /// Validate the configuration needed by the chat bot
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the bot section is invalid or no token is set.
    pub fn validate_for_bot(&self) -> Result<(), ValidationError> {
        self.bot.validate()?;
        if !self.bot.has_token() {
            return Err(ValidationError::MissingRequired("BOT_TOKEN"));
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
