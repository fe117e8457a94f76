//! Inbound chat messages and outbound replies.

use serde::{Deserialize, Serialize};

use super::{ConversationMode, MODE_CHANGE_TRIGGER};
use crate::domain::foundation::{ChatId, Confidence, MessageId};
use crate::domain::inference::{QaResult, SentimentResult};

/// A text message received from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    /// First name of the sender, used to personalize replies.
    pub sender_name: String,
    pub text: String,
}

impl InboundMessage {
    pub fn new(
        chat_id: ChatId,
        message_id: MessageId,
        sender_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chat_id,
            message_id,
            sender_name: sender_name.into(),
            text: text.into(),
        }
    }
}

/// Fixed reply keyboards offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyboard {
    /// Single `Cambiar estado` button, kept visible in every content mode.
    ModeChange,
    /// One row with the selectable mode labels.
    ModeSelection,
}

impl Keyboard {
    /// Button labels, row by row.
    pub fn rows(&self) -> Vec<Vec<&'static str>> {
        match self {
            Keyboard::ModeChange => vec![vec![MODE_CHANGE_TRIGGER]],
            Keyboard::ModeSelection => vec![ConversationMode::SELECTABLE
                .iter()
                .filter_map(ConversationMode::selection_label)
                .collect()],
        }
    }
}

/// How the transport should render reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    Markdown,
}

/// A message the bot sends back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: ChatId,
    pub text: String,
    /// Message this reply quotes, if any.
    pub reply_to: Option<MessageId>,
    pub keyboard: Option<Keyboard>,
    pub format: TextFormat,
}

impl Reply {
    /// Plain message to a chat.
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to: None,
            keyboard: None,
            format: TextFormat::Plain,
        }
    }

    /// Plain message quoting the inbound message.
    pub fn quoting(message: &InboundMessage, text: impl Into<String>) -> Self {
        Self {
            reply_to: Some(message.message_id),
            ..Self::new(message.chat_id, text)
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn markdown(mut self) -> Self {
        self.format = TextFormat::Markdown;
        self
    }

    pub fn welcome(message: &InboundMessage) -> Self {
        Self::new(
            message.chat_id,
            format!("Hola {}! ¿Cómo estás?", message.sender_name),
        )
        .with_keyboard(Keyboard::ModeChange)
    }

    pub fn mode_selection_prompt(message: &InboundMessage) -> Self {
        Self::new(message.chat_id, "Seleccionar estado").with_keyboard(Keyboard::ModeSelection)
    }

    pub fn mode_confirmed(message: &InboundMessage, mode: ConversationMode) -> Self {
        Self::new(
            message.chat_id,
            format!("Nuevo estado: *{}*", mode.display_name()),
        )
        .markdown()
        .with_keyboard(Keyboard::ModeChange)
    }

    pub fn selection_rejected(message: &InboundMessage) -> Self {
        Self::new(
            message.chat_id,
            "Estado desconocido, reingrese utilizando botones",
        )
        .markdown()
        .with_keyboard(Keyboard::ModeSelection)
    }

    pub fn sentiment(message: &InboundMessage, result: &SentimentResult) -> Self {
        Self::quoting(
            message,
            format!(
                "{}, estoy {} seguro de que tu mensaje fue {}",
                result.name,
                result.confidence,
                result.classification.spanish_term()
            ),
        )
        .with_keyboard(Keyboard::ModeChange)
    }

    pub fn answer(message: &InboundMessage, result: &QaResult) -> Self {
        Self::quoting(message, format_answer(&result.answer, result.confidence))
            .with_keyboard(Keyboard::ModeChange)
    }

    pub fn context_stored(message: &InboundMessage) -> Self {
        Self::quoting(message, "Contexto guardado").with_keyboard(Keyboard::ModeChange)
    }

    /// Opaque reply for any failure reaching the inference service.
    pub fn service_error(message: &InboundMessage) -> Self {
        Self::quoting(
            message,
            "Lo siento, no pude procesar tu mensaje. Intenta de nuevo más tarde.",
        )
        .with_keyboard(Keyboard::ModeChange)
    }
}

fn format_answer(answer: &str, confidence: Confidence) -> String {
    format!("{} ({} certeza)", answer, confidence)
}
