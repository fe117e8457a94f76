//! Telegram Bot API wire types (the subset the bot uses).

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{InboundMessage, Keyboard, Reply, TextFormat};
use crate::domain::foundation::{ChatId, MessageId};

/// Response envelope shared by every Bot API method.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesRequest {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct User {
    pub first_name: String,
}

impl Message {
    /// Converts a text message; other message kinds yield `None`.
    pub fn into_inbound(self) -> Option<InboundMessage> {
        let text = self.text?;
        let sender_name = self.from.map(|user| user.first_name).unwrap_or_default();
        Some(InboundMessage::new(
            ChatId::new(self.chat.id),
            MessageId::new(self.message_id),
            sender_name,
            text,
        ))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyKeyboardMarkup>,
}

impl<'a> From<&'a Reply> for SendMessageRequest<'a> {
    fn from(reply: &'a Reply) -> Self {
        Self {
            chat_id: reply.chat_id.value(),
            text: &reply.text,
            reply_to_message_id: reply.reply_to.map(|id| id.value()),
            parse_mode: match reply.format {
                TextFormat::Markdown => Some("Markdown"),
                TextFormat::Plain => None,
            },
            reply_markup: reply.keyboard.map(ReplyKeyboardMarkup::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct KeyboardButton {
    pub text: &'static str,
}

impl From<Keyboard> for ReplyKeyboardMarkup {
    fn from(keyboard: Keyboard) -> Self {
        Self {
            keyboard: keyboard
                .rows()
                .into_iter()
                .map(|row| row.into_iter().map(|text| KeyboardButton { text }).collect())
                .collect(),
            resize_keyboard: true,
        }
    }
}
