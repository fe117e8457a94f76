//! Chat bot entry point.
//!
//! Long-polls Telegram and answers each chat according to its current mode,
//! calling the inference service for sentiment and QA.

use std::sync::Arc;

use tokio::sync::watch;

use nlp_chatbot::adapters::inference_client::HttpInferenceClient;
use nlp_chatbot::adapters::storage::InMemorySessionStore;
use nlp_chatbot::adapters::telegram::{TelegramConfig, TelegramTransport};
use nlp_chatbot::application::{ChatDispatcher, DispatcherConfig, HandleMessageHandler};
use nlp_chatbot::config::{AppConfig, ValidationError};
use nlp_chatbot::ports::{ChatTransport, InferenceClient, SessionStore};
use nlp_chatbot::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.server)?;
    config.validate_for_bot()?;

    let token = config
        .bot
        .token
        .clone()
        .ok_or(ValidationError::MissingRequired("BOT_TOKEN"))?;

    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramTransport::new(
        TelegramConfig::new(token)
            .with_api_base(&config.bot.telegram_api_base)
            .with_poll_timeout(config.bot.poll_timeout()),
    )?);
    let inference: Arc<dyn InferenceClient> = Arc::new(HttpInferenceClient::new(
        &config.bot.inference_base_url,
        config.bot.inference_timeout(),
    )?);
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let handler = Arc::new(HandleMessageHandler::new(
        inference,
        sessions,
        config.bot.inference_timeout(),
    ));
    let dispatcher = ChatDispatcher::new(
        transport,
        handler,
        DispatcherConfig::default()
            .with_poll_error_delay(config.bot.poll_error_delay())
            .with_worker_queue_capacity(config.bot.worker_queue_capacity)
            .with_worker_idle_timeout(config.bot.worker_idle_timeout()),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("shutdown signal received"),
            Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
        }
        let _ = shutdown_tx.send(true);
    });

    tracing::info!(
        inference_base_url = %config.bot.inference_base_url,
        "chat bot starting"
    );
    dispatcher.run(shutdown_rx).await;

    tracing::info!("chat bot stopped");
    Ok(())
}
