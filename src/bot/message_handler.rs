//! Message Handler module for processing incoming chat messages

use std::sync::Arc;
use teloxide::types::ChatId;
use tracing::{debug, error, info, warn};

use crate::ai::AnswerService;
use crate::dialogue::{ChatState, StudentRecord};
use crate::store::{SessionStore, StudentSink};

use super::dialogue_manager::{DialogueManager, Reply, SideEffect};
use super::sender::MessageSender;
use super::ui_builder::create_main_menu_keyboard;

/// Routes one inbound message through the dialogue and its collaborators
pub struct MessageDispatcher {
    dialogue: DialogueManager,
    sessions: Arc<dyn SessionStore>,
    students: Arc<dyn StudentSink>,
    sender: Arc<dyn MessageSender>,
    answers: Arc<dyn AnswerService>,
}

impl MessageDispatcher {
    pub fn new(
        dialogue: DialogueManager,
        sessions: Arc<dyn SessionStore>,
        students: Arc<dyn StudentSink>,
        sender: Arc<dyn MessageSender>,
        answers: Arc<dyn AnswerService>,
    ) -> Self {
        Self {
            dialogue,
            sessions,
            students,
            sender,
            answers,
        }
    }

    /// Handle one message to completion.
    ///
    /// Collaborator failures are logged and degrade the reply; nothing is
    /// propagated to the caller.
    pub async fn handle_message(&self, chat_id: ChatId, text: &str) {
        debug!(user_id = %chat_id, message_length = text.len(), "Received text message from user");

        let current = match self.sessions.get(chat_id).await {
            Ok(state) => state,
            Err(e) => {
                warn!(user_id = %chat_id, error = %e, "Failed to load chat state, starting fresh");
                ChatState::Idle
            }
        };

        let transition = self.dialogue.transition(&current, text);
        let mut next = transition.next;
        let localization = self.dialogue.localization();

        let (reply_text, menu) = match (transition.reply, transition.effect) {
            (reply, Some(SideEffect::SaveStudent(draft))) => {
                let record = StudentRecord::from_draft(chat_id, draft);
                match self.students.append(&record).await {
                    Ok(()) => {
                        info!(user_id = %chat_id, "Registration completed");
                        (Self::reply_text(reply), None)
                    }
                    Err(e) => {
                        error!(user_id = %chat_id, error = %e, "Failed to save student record");
                        // Keep collecting the level so the user can retry
                        next = current.clone();
                        (localization.get_message("registration-save-failed"), None)
                    }
                }
            }
            (_, Some(SideEffect::AskAi(prompt))) => match self.answers.ask(&prompt).await {
                Ok(answer) if answer.trim().is_empty() => {
                    warn!(user_id = %chat_id, "AI returned an empty answer");
                    (localization.get_message("ai-error"), None)
                }
                Ok(answer) => (answer, None),
                Err(e) => {
                    error!(user_id = %chat_id, error = %e, "AI answer failed");
                    (localization.get_message("ai-error"), None)
                }
            },
            (Reply::Welcome(text), None) => (text, Some(create_main_menu_keyboard(localization))),
            (reply, None) => (Self::reply_text(reply), None),
        };

        if next != current {
            if let Err(e) = self.sessions.set(chat_id, &next).await {
                warn!(user_id = %chat_id, error = %e, "Failed to persist chat state");
            }
        }

        if reply_text.is_empty() {
            debug!(user_id = %chat_id, "Nothing to send");
            return;
        }

        if let Err(e) = self.sender.send_message(chat_id, &reply_text, menu).await {
            warn!(user_id = %chat_id, error = %e, "Failed to send reply");
        }
    }

    fn reply_text(reply: Reply) -> String {
        match reply {
            Reply::Welcome(text) | Reply::Text(text) => text,
            Reply::AiAnswer => String::new(),
        }
    }
}
