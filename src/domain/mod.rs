//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `conversation` - Chat session modes, transitions and replies
//! - `inference` - Model outputs, stored QA context and service contracts

pub mod conversation;
pub mod foundation;
pub mod inference;
