//! Telegram adapter - Bot API long polling and message sending.

mod client;
mod types;

pub use client::{TelegramConfig, TelegramTransport, DEFAULT_TELEGRAM_API_BASE};
