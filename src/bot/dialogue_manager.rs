//! Dialogue Manager module for deciding dialogue state transitions
//!
//! The manager is pure decision logic: it never touches storage or the
//! network. The dispatcher applies the returned [`Transition`].

use std::sync::Arc;

use crate::dialogue::{ChatState, StudentDraft};
use crate::localization::LocalizationManager;

/// Command that shows the welcome message and main menu
pub const START_COMMAND: &str = "/start";

/// What to send back to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Text sent together with the main menu keyboard
    Welcome(String),
    /// Plain text
    Text(String),
    /// Relay the answer produced by the AI collaborator verbatim
    AiAnswer,
}

/// Work the dispatcher must perform besides replying
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SideEffect {
    SaveStudent(StudentDraft),
    AskAi(String),
}

/// Outcome of feeding one message to the dialogue
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: ChatState,
    pub reply: Reply,
    pub effect: Option<SideEffect>,
}

impl Transition {
    fn stay(current: &ChatState, reply: Reply) -> Self {
        Self {
            next: current.clone(),
            reply,
            effect: None,
        }
    }

    fn to(next: ChatState, reply: Reply) -> Self {
        Self {
            next,
            reply,
            effect: None,
        }
    }
}

/// Registration and AI dialogue rules
pub struct DialogueManager {
    localization: Arc<LocalizationManager>,
    channel_url: Option<String>,
}

impl DialogueManager {
    pub fn new(localization: Arc<LocalizationManager>, channel_url: Option<String>) -> Self {
        Self {
            localization,
            channel_url,
        }
    }

    pub fn localization(&self) -> &LocalizationManager {
        &self.localization
    }

    fn text(&self, key: &str) -> Reply {
        Reply::Text(self.localization.get_message(key))
    }

    fn is_menu_label(&self, input: &str, key: &str) -> bool {
        input == self.localization.get_message(key)
    }

    /// Decide the next state and reply for `input` received in `current`.
    ///
    /// Rules are checked in priority order, first match wins: `/start`, the
    /// three registration steps, the register and ask-AI labels, AI mode, the
    /// channel label, then the fallback.
    pub fn transition(&self, current: &ChatState, input: &str) -> Transition {
        let input = input.trim();

        if input == START_COMMAND {
            return Transition::stay(
                current,
                Reply::Welcome(self.localization.get_message("welcome")),
            );
        }

        match current {
            ChatState::AwaitName => {
                return Transition::to(
                    ChatState::AwaitPhone {
                        name: input.to_string(),
                    },
                    self.text("ask-phone"),
                );
            }
            ChatState::AwaitPhone { name } => {
                return Transition::to(
                    ChatState::AwaitLevel {
                        name: name.clone(),
                        phone: input.to_string(),
                    },
                    self.text("ask-level"),
                );
            }
            ChatState::AwaitLevel { name, phone } => {
                return Transition {
                    next: ChatState::Idle,
                    reply: Reply::Text(self.localization.get_message_with_args(
                        "registration-complete",
                        &[("name", name.as_str())],
                    )),
                    effect: Some(SideEffect::SaveStudent(StudentDraft {
                        name: name.clone(),
                        phone: phone.clone(),
                        level: input.to_string(),
                    })),
                };
            }
            ChatState::Idle | ChatState::AiMode => {}
        }

        if self.is_menu_label(input, "menu-register") {
            return Transition::to(ChatState::AwaitName, self.text("ask-name"));
        }

        if self.is_menu_label(input, "menu-ask-ai") {
            return Transition::to(ChatState::AiMode, self.text("ask-ai-prompt"));
        }

        if *current == ChatState::AiMode {
            return Transition {
                next: ChatState::AiMode,
                reply: Reply::AiAnswer,
                effect: Some(SideEffect::AskAi(input.to_string())),
            };
        }

        if self.is_menu_label(input, "menu-channel") {
            let reply = match &self.channel_url {
                Some(url) => Reply::Text(
                    self.localization
                        .get_message_with_args("channel-link", &[("url", url.as_str())]),
                ),
                None => self.text("channel-unavailable"),
            };
            return Transition::stay(current, reply);
        }

        Transition::stay(current, self.text("not-understood"))
    }
}
