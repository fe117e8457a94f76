//! HandleMessageHandler - Runs one inbound chat message through the
//! conversation state machine.
//!
//! Load session → classify input → step → call the inference service if
//! the action needs it → save session → reply.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::Instrument;

use crate::domain::conversation::{Action, ChatSession, InboundMessage, Input, Reply};
use crate::domain::foundation::{ChatId, CorrelationId, ValidationError};
use crate::domain::inference::{QaRequest, SentimentRequest};
use crate::ports::{InferenceClient, InferenceClientError, SessionStore, SessionStoreError};

/// Failures that prevent the controller from replying at all.
///
/// Inference failures are not in here: they become an apology reply.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversationError {
    #[error("session storage failed: {0}")]
    Storage(#[from] SessionStoreError),

    #[error("invalid mode transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}

/// Handler for inbound chat messages.
///
/// The inference service keeps a single QA context for all callers, so the
/// handler remembers which chat last reset it. A question from any other chat
/// is sent with `reset_context` forced on, carrying that chat's own context.
pub struct HandleMessageHandler {
    inference: Arc<dyn InferenceClient>,
    sessions: Arc<dyn SessionStore>,
    inference_timeout: Duration,
    context_owner: Mutex<Option<ChatId>>,
}

impl HandleMessageHandler {
    pub fn new(
        inference: Arc<dyn InferenceClient>,
        sessions: Arc<dyn SessionStore>,
        inference_timeout: Duration,
    ) -> Self {
        Self {
            inference,
            sessions,
            inference_timeout,
            context_owner: Mutex::new(None),
        }
    }

    pub async fn handle(&self, message: &InboundMessage) -> Result<Reply, ConversationError> {
        let correlation_id = CorrelationId::new();
        let span = tracing::info_span!(
            "chat_message",
            chat_id = %message.chat_id,
            correlation_id = %correlation_id,
        );

        self.process(message).instrument(span).await
    }

    async fn process(&self, message: &InboundMessage) -> Result<Reply, ConversationError> {
        let session = self.sessions.load(message.chat_id).await?;
        let previous_mode = session.mode;

        let input = Input::parse(&message.text);
        let (session, action) = session.step(&input)?;
        let (session, reply) = self.perform(session, action, message).await;

        self.sessions.save(message.chat_id, &session).await?;

        tracing::debug!(from = %previous_mode, mode = %session.mode, "message handled");
        Ok(reply)
    }

    /// Carries out an action, returning the final session and the reply.
    async fn perform(
        &self,
        session: ChatSession,
        action: Action,
        message: &InboundMessage,
    ) -> (ChatSession, Reply) {
        match action {
            Action::Welcome => (session, Reply::welcome(message)),
            Action::PromptModeSelection => (session, Reply::mode_selection_prompt(message)),
            Action::ConfirmMode(mode) => (session, Reply::mode_confirmed(message, mode)),
            Action::RejectSelection => (session, Reply::selection_rejected(message)),
            Action::ContextStored => (session, Reply::context_stored(message)),
            Action::ClassifySentiment { text } => {
                let request = SentimentRequest::new(message.sender_name.clone(), text);
                let reply = match self.call(self.inference.classify_sentiment(&request)).await {
                    Ok(result) => Reply::sentiment(message, &result),
                    Err(e) => self.apologize(message, e),
                };
                (session, reply)
            }
            Action::AnswerQuestion {
                question,
                context,
                reset_context,
            } => {
                let request = QaRequest {
                    question,
                    context,
                    reset_context: self.claim_service_context(message.chat_id, reset_context),
                };
                match self.call(self.inference.answer_question(&request)).await {
                    Ok(result) => (session.question_answered(), Reply::answer(message, &result)),
                    // The flag stays set so the next question still ships the context.
                    Err(e) => {
                        if request.reset_context {
                            self.release_service_context(message.chat_id);
                        }
                        (session, self.apologize(message, e))
                    }
                }
            }
        }
    }

    /// Records `chat_id` as the owner of the service context and returns
    /// whether the request must reset it.
    fn claim_service_context(&self, chat_id: ChatId, requested: bool) -> bool {
        let mut owner = self
            .context_owner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let reset = requested || *owner != Some(chat_id);
        *owner = Some(chat_id);
        reset
    }

    /// A failed reset leaves the service context unknown.
    fn release_service_context(&self, chat_id: ChatId) {
        let mut owner = self
            .context_owner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *owner == Some(chat_id) {
            *owner = None;
        }
    }

    async fn call<T>(
        &self,
        request: impl Future<Output = Result<T, InferenceClientError>>,
    ) -> Result<T, InferenceClientError> {
        match tokio::time::timeout(self.inference_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(InferenceClientError::Timeout {
                timeout_secs: self.inference_timeout.as_secs(),
            }),
        }
    }

    fn apologize(&self, message: &InboundMessage, error: InferenceClientError) -> Reply {
        tracing::warn!(error = %error, "inference call failed");
        Reply::service_error(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::inference_client::MockInferenceClient;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::conversation::{ConversationMode, Keyboard};
    use crate::domain::foundation::{ChatId, MessageId};
    use crate::domain::inference::SentimentLabel;

    struct Fixture {
        inference: MockInferenceClient,
        sessions: Arc<InMemorySessionStore>,
        handler: HandleMessageHandler,
    }

    fn fixture(inference: MockInferenceClient) -> Fixture {
        fixture_with_timeout(inference, Duration::from_secs(5))
    }

    fn fixture_with_timeout(inference: MockInferenceClient, timeout: Duration) -> Fixture {
        let sessions = Arc::new(InMemorySessionStore::new());
        let handler = HandleMessageHandler::new(Arc::new(inference.clone()), sessions.clone(), timeout);
        Fixture {
            inference,
            sessions,
            handler,
        }
    }

    fn message(chat: i64, text: &str) -> InboundMessage {
        InboundMessage::new(ChatId::new(chat), MessageId::new(1), "Ana", text)
    }

    async fn send(fixture: &Fixture, chat: i64, text: &str) -> Reply {
        fixture.handler.handle(&message(chat, text)).await.unwrap()
    }

    async fn session(fixture: &Fixture, chat: i64) -> ChatSession {
        fixture.sessions.load(ChatId::new(chat)).await.unwrap()
    }

    mod sentiment {
        use super::*;

        #[tokio::test]
        async fn default_mode_classifies_sentiment() {
            let fx = fixture(MockInferenceClient::new().with_sentiment(SentimentLabel::Positive, 0.95));

            let reply = send(&fx, 1, "me encanta esto").await;

            assert!(reply.text.contains("95.00%"));
            assert!(reply.text.contains("positivo"));
            assert_eq!(reply.reply_to, Some(MessageId::new(1)));
            assert_eq!(
                fx.inference.sentiment_calls(),
                vec![SentimentRequest::new("Ana", "me encanta esto")]
            );
        }

        #[tokio::test]
        async fn service_failure_yields_apology() {
            let fx = fixture(
                MockInferenceClient::new().with_sentiment_error(InferenceClientError::Status {
                    status: 502,
                    body: "upstream".to_string(),
                }),
            );

            let reply = send(&fx, 1, "hola").await;

            assert_eq!(
                reply.text,
                "Lo siento, no pude procesar tu mensaje. Intenta de nuevo más tarde."
            );
            assert_eq!(session(&fx, 1).await.mode, ConversationMode::Sentiment);
        }

        #[tokio::test]
        async fn slow_service_times_out() {
            let fx = fixture_with_timeout(
                MockInferenceClient::new().with_delay(Duration::from_millis(500)),
                Duration::from_millis(20),
            );

            let reply = send(&fx, 1, "hola").await;

            assert_eq!(reply, Reply::service_error(&message(1, "hola")));
        }
    }

    mod mode_selection {
        use super::*;

        #[tokio::test]
        async fn trigger_prompts_with_selection_keyboard() {
            let fx = fixture(MockInferenceClient::new());

            let reply = send(&fx, 1, "Cambiar estado").await;

            assert_eq!(reply.text, "Seleccionar estado");
            assert_eq!(reply.keyboard, Some(Keyboard::ModeSelection));
            assert_eq!(session(&fx, 1).await.mode, ConversationMode::ModeSelection);
            assert!(fx.inference.sentiment_calls().is_empty(), "trigger is not classified");
        }

        #[tokio::test]
        async fn selecting_qa_confirms_mode() {
            let fx = fixture(MockInferenceClient::new());
            send(&fx, 1, "Cambiar estado").await;

            let reply = send(&fx, 1, "QA").await;

            assert_eq!(reply.text, "Nuevo estado: *Responder preguntas*");
            assert_eq!(session(&fx, 1).await.mode, ConversationMode::QuestionAnswering);
        }

        #[tokio::test]
        async fn unknown_label_is_rejected() {
            let fx = fixture(MockInferenceClient::new());
            send(&fx, 1, "Cambiar estado").await;

            let reply = send(&fx, 1, "Traducir").await;

            assert_eq!(reply.text, "Estado desconocido, reingrese utilizando botones");
            assert_eq!(session(&fx, 1).await.mode, ConversationMode::ModeSelection);
        }
    }

    mod question_answering {
        use super::*;

        async fn capture_context(fx: &Fixture, chat: i64, context: &str) {
            send(fx, chat, "Cambiar estado").await;
            send(fx, chat, "Context").await;
            let reply = send(fx, chat, context).await;
            assert_eq!(reply.text, "Contexto guardado");
            send(fx, chat, "Cambiar estado").await;
            send(fx, chat, "QA").await;
        }

        #[tokio::test]
        async fn first_question_ships_context_and_clears_flag() {
            let fx = fixture(MockInferenceClient::new().with_answer("París", 0.8731));
            capture_context(&fx, 1, "La capital de Francia es París").await;

            let reply = send(&fx, 1, "¿Cuál es la capital de Francia?").await;

            assert_eq!(reply.text, "París (87.31% certeza)");
            assert_eq!(
                fx.inference.qa_calls(),
                vec![QaRequest {
                    question: "¿Cuál es la capital de Francia?".to_string(),
                    context: "La capital de Francia es París".to_string(),
                    reset_context: true,
                }]
            );
            assert!(!session(&fx, 1).await.reset_context);
        }

        #[tokio::test]
        async fn later_questions_do_not_reset() {
            let fx = fixture(MockInferenceClient::new());
            capture_context(&fx, 1, "texto").await;

            send(&fx, 1, "¿primera?").await;
            send(&fx, 1, "¿segunda?").await;

            let calls = fx.inference.qa_calls();
            assert!(calls[0].reset_context);
            assert!(!calls[1].reset_context);
        }

        #[tokio::test]
        async fn failed_question_keeps_flag() {
            let fx = fixture(
                MockInferenceClient::new()
                    .with_answer_error(InferenceClientError::Network("refused".to_string())),
            );
            capture_context(&fx, 1, "texto").await;

            let reply = send(&fx, 1, "¿algo?").await;

            assert_eq!(reply, Reply::service_error(&message(1, "¿algo?")));
            assert!(session(&fx, 1).await.reset_context);
        }

        #[tokio::test]
        async fn trigger_is_not_sent_as_a_question() {
            let fx = fixture(MockInferenceClient::new());
            capture_context(&fx, 1, "texto").await;

            let reply = send(&fx, 1, "Cambiar estado").await;

            assert_eq!(reply.text, "Seleccionar estado");
            assert!(fx.inference.qa_calls().is_empty());
            assert_eq!(session(&fx, 1).await.mode, ConversationMode::ModeSelection);
            assert!(session(&fx, 1).await.reset_context);
        }

        #[tokio::test]
        async fn question_after_other_chat_resends_own_context() {
            let fx = fixture(MockInferenceClient::new());
            capture_context(&fx, 1, "contexto uno").await;
            capture_context(&fx, 2, "contexto dos").await;

            send(&fx, 1, "¿uno?").await;
            send(&fx, 2, "¿dos?").await;
            send(&fx, 1, "¿uno otra vez?").await;
            send(&fx, 1, "¿y ahora?").await;

            let calls = fx.inference.qa_calls();
            assert_eq!(calls.len(), 4);
            assert!(calls[2].reset_context);
            assert_eq!(calls[2].context, "contexto uno");
            assert!(!calls[3].reset_context, "chat 1 owns the service context again");
            assert!(!session(&fx, 1).await.reset_context);
        }

        #[tokio::test]
        async fn failed_reset_forces_next_question_to_reset() {
            let fx = fixture(
                MockInferenceClient::new()
                    .with_answer("uno", 0.9)
                    .with_answer("dos", 0.9)
                    .with_answer_error(InferenceClientError::Network("refused".to_string())),
            );
            capture_context(&fx, 1, "contexto uno").await;
            capture_context(&fx, 2, "contexto dos").await;

            send(&fx, 1, "¿uno?").await;
            send(&fx, 2, "¿dos?").await;
            // Chat 1 takes the context back but the call fails.
            send(&fx, 1, "¿uno otra vez?").await;
            send(&fx, 1, "¿reintento?").await;

            let calls = fx.inference.qa_calls();
            assert_eq!(calls.len(), 4);
            assert!(calls[2].reset_context);
            assert!(calls[3].reset_context);
            assert_eq!(calls[3].context, "contexto uno");
        }
    }

    mod isolation {
        use super::*;

        #[tokio::test]
        async fn chats_keep_independent_modes() {
            let fx = fixture(MockInferenceClient::new());

            send(&fx, 1, "Cambiar estado").await;
            send(&fx, 1, "Context").await;
            send(&fx, 1, "contexto de uno").await;

            assert_eq!(session(&fx, 2).await, ChatSession::default());
            assert_eq!(session(&fx, 1).await.context, "contexto de uno");
        }

        #[tokio::test]
        async fn greeting_does_not_change_mode() {
            let fx = fixture(MockInferenceClient::new());
            send(&fx, 1, "Cambiar estado").await;

            let reply = send(&fx, 1, "/start").await;

            assert_eq!(reply.text, "Hola Ana! ¿Cómo estás?");
            assert_eq!(session(&fx, 1).await.mode, ConversationMode::ModeSelection);
        }
    }
}
