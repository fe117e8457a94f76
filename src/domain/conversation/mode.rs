//! Conversation mode state machine.
//!
//! Defines the modes a chat can be in and the valid transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Conversational behavior currently active for a chat.
///
/// - `Sentiment`: every message is classified by polarity
/// - `QuestionAnswering`: every message is a question about the stored context
/// - `ContextCapture`: every message replaces the stored context
/// - `ModeSelection`: waiting for the user to pick one of the modes above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationMode {
    #[default]
    Sentiment,
    QuestionAnswering,
    ContextCapture,
    ModeSelection,
}

impl ConversationMode {
    /// Modes a user can pick from the selection keyboard, in button order.
    pub const SELECTABLE: [ConversationMode; 3] = [
        ConversationMode::QuestionAnswering,
        ConversationMode::Sentiment,
        ConversationMode::ContextCapture,
    ];

    /// Button label that selects this mode, if it is selectable.
    pub fn selection_label(&self) -> Option<&'static str> {
        match self {
            ConversationMode::QuestionAnswering => Some("QA"),
            ConversationMode::Sentiment => Some("Sentiment"),
            ConversationMode::ContextCapture => Some("Context"),
            ConversationMode::ModeSelection => None,
        }
    }

    /// Resolves an exact selection label to its mode.
    pub fn from_selection_label(label: &str) -> Option<Self> {
        Self::SELECTABLE
            .into_iter()
            .find(|mode| mode.selection_label() == Some(label))
    }

    /// Name shown to users when the mode becomes active.
    pub fn display_name(&self) -> &'static str {
        match self {
            ConversationMode::Sentiment => "Análisis de sentimiento",
            ConversationMode::QuestionAnswering => "Responder preguntas",
            ConversationMode::ContextCapture => "Ingresar nuevo contexto",
            ConversationMode::ModeSelection => "Seleccionar estado",
        }
    }
}

impl fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationMode::Sentiment => "sentiment",
            ConversationMode::QuestionAnswering => "question_answering",
            ConversationMode::ContextCapture => "context_capture",
            ConversationMode::ModeSelection => "mode_selection",
        };
        f.write_str(s)
    }
}

impl StateMachine for ConversationMode {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationMode::*;
        matches!(
            (self, target),
            // The trigger is honored from anywhere
            (_, ModeSelection) |
            // A selection picks any content mode
            (ModeSelection, Sentiment | QuestionAnswering | ContextCapture)
        ) || (self == target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationMode::*;
        match self {
            ModeSelection => vec![ModeSelection, QuestionAnswering, Sentiment, ContextCapture],
            content => vec![*content, ModeSelection],
        }
    }
}
