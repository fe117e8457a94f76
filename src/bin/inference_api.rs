//! Inference service entry point.
//!
//! Serves `/sent_analysis/`, `/qa/`, `/test/` and `/health` over the hosted
//! HuggingFace models named in configuration.

use std::sync::Arc;

use nlp_chatbot::adapters::http::{inference_router, InferenceAppState};
use nlp_chatbot::adapters::models::{
    HuggingFaceApi, HuggingFaceConfig, HuggingFaceQaModel, HuggingFaceSentimentModel,
};
use nlp_chatbot::application::{AnswerQuestionHandler, ClassifySentimentHandler};
use nlp_chatbot::config::AppConfig;
use nlp_chatbot::domain::inference::StoredContext;
use nlp_chatbot::ports::{QuestionAnsweringModel, SentimentModel};
use nlp_chatbot::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.server)?;
    config.validate()?;

    let mut hf_config =
        HuggingFaceConfig::new(&config.inference.api_base).with_timeout(config.inference.timeout());
    if let Some(token) = &config.inference.api_token {
        hf_config = hf_config.with_token(token.clone());
    } else {
        tracing::warn!("no HuggingFace API token configured; using anonymous access");
    }
    let api = HuggingFaceApi::new(hf_config)?;

    let sentiment_model: Arc<dyn SentimentModel> = Arc::new(HuggingFaceSentimentModel::new(
        api.clone(),
        &config.inference.sentiment_model,
    ));
    let qa_model: Arc<dyn QuestionAnsweringModel> =
        Arc::new(HuggingFaceQaModel::new(api, &config.inference.qa_model));

    let state = InferenceAppState::new(
        Arc::new(ClassifySentimentHandler::new(sentiment_model.clone())),
        Arc::new(AnswerQuestionHandler::new(
            qa_model.clone(),
            Arc::new(StoredContext::new()),
        )),
        sentiment_model.model_info(),
        qa_model.model_info(),
    );
    let app = inference_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        sentiment_model = %config.inference.sentiment_model,
        qa_model = %config.inference.qa_model,
        "inference service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("inference service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
