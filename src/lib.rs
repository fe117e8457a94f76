//! NLP Chatbot - Sentiment analysis and question answering over chat
//!
//! Two processes share this crate: an HTTP inference service wrapping hosted
//! Spanish NLP models, and a chat bot that routes each user through a small
//! per-chat mode machine and calls the service over HTTP.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
