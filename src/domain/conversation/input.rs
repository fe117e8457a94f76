//! Classification of inbound chat text.

/// Exact text of the always-visible mode-change button.
pub const MODE_CHANGE_TRIGGER: &str = "Cambiar estado";

/// Bot commands answered with a greeting.
const GREETING_COMMANDS: [&str; 2] = ["start", "hola"];

/// What an inbound message means to the conversation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `/start` or `/hola`.
    Greeting,
    /// The mode-change trigger, honored from every mode.
    ModeChangeTrigger,
    /// Anything else; interpreted according to the current mode.
    Text(String),
}

impl Input {
    /// Classifies raw message text.
    ///
    /// Commands may carry a `@botname` suffix and trailing arguments, as
    /// chat clients append them in group chats.
    pub fn parse(text: &str) -> Self {
        if text == MODE_CHANGE_TRIGGER {
            return Input::ModeChangeTrigger;
        }
        if let Some(command) = text.strip_prefix('/') {
            let name = command
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .split('@')
                .next()
                .unwrap_or_default();
            if GREETING_COMMANDS.contains(&name) {
                return Input::Greeting;
            }
        }
        Input::Text(text.to_string())
    }
}
