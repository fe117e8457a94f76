//! Per-chat conversation session and its transition function.

use serde::{Deserialize, Serialize};

use super::{ConversationMode, Input};
use crate::domain::foundation::{StateMachine, ValidationError};

/// Conversation state of one chat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatSession {
    /// Active mode.
    pub mode: ConversationMode,
    /// Passage questions are answered against. Starts empty.
    pub context: String,
    /// True until the first successful question after a context capture.
    pub reset_context: bool,
}

/// What the controller must do after a step.
///
/// Pure bookkeeping (mode changes, context capture) has already been applied
/// to the returned session; variants carrying data need a service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Greet the user.
    Welcome,
    /// Show the mode-selection keyboard.
    PromptModeSelection,
    /// Confirm the newly selected mode.
    ConfirmMode(ConversationMode),
    /// The selection did not match a mode label.
    RejectSelection,
    /// Classify the text's sentiment.
    ClassifySentiment { text: String },
    /// Ask the QA service.
    AnswerQuestion {
        question: String,
        context: String,
        reset_context: bool,
    },
    /// The message became the new context.
    ContextStored,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one inbound message.
    ///
    /// Precedence, highest first: greeting, mode-change trigger, then the
    /// active mode's rule. The trigger consumes the message; the previous
    /// mode never sees it.
    pub fn step(mut self, input: &Input) -> Result<(ChatSession, Action), ValidationError> {
        use ConversationMode::*;

        let (next, action) = match (self.mode, input) {
            (current, Input::Greeting) => (current, Action::Welcome),
            (_, Input::ModeChangeTrigger) => (ModeSelection, Action::PromptModeSelection),
            (ModeSelection, Input::Text(label)) => match ConversationMode::from_selection_label(label) {
                Some(selected) => (selected, Action::ConfirmMode(selected)),
                None => (ModeSelection, Action::RejectSelection),
            },
            (QuestionAnswering, Input::Text(question)) => (
                QuestionAnswering,
                Action::AnswerQuestion {
                    question: question.clone(),
                    context: self.context.clone(),
                    reset_context: self.reset_context,
                },
            ),
            (Sentiment, Input::Text(text)) => {
                (Sentiment, Action::ClassifySentiment { text: text.clone() })
            }
            (ContextCapture, Input::Text(text)) => {
                self.context = text.clone();
                self.reset_context = true;
                (ContextCapture, Action::ContextStored)
            }
        };

        self.mode = self.mode.transition_to(next)?;
        Ok((self, action))
    }

    /// Records that the service has adopted the captured context.
    pub fn question_answered(mut self) -> Self {
        self.reset_context = false;
        self
    }
}
