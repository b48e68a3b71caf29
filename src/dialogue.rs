//! Registration dialogue state and the records it produces.

use chrono::{DateTime, Utc};
use teloxide::types::ChatId;

/// Separator used when `AwaitLevel` is flattened into a single scratch column
pub const SCRATCH_DELIMITER: &str = "||";

pub const STATE_AWAIT_NAME: &str = "await_name";
pub const STATE_AWAIT_PHONE: &str = "await_phone";
pub const STATE_AWAIT_LEVEL: &str = "await_level";
pub const STATE_AI_MODE: &str = "ai_mode";

/// Represents the conversation state of one chat
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitName,
    AwaitPhone {
        name: String,
    },
    AwaitLevel {
        name: String,
        phone: String,
    },
    AiMode,
}

impl ChatState {
    /// Flatten into the `(state, temp)` pair kept by the stores
    pub fn to_row(&self) -> (&'static str, String) {
        match self {
            ChatState::Idle => ("", String::new()),
            ChatState::AwaitName => (STATE_AWAIT_NAME, String::new()),
            ChatState::AwaitPhone { name } => (STATE_AWAIT_PHONE, name.clone()),
            ChatState::AwaitLevel { name, phone } => (
                STATE_AWAIT_LEVEL,
                format!("{name}{SCRATCH_DELIMITER}{phone}"),
            ),
            ChatState::AiMode => (STATE_AI_MODE, String::new()),
        }
    }

    /// Rebuild a state from a stored row.
    ///
    /// Never fails: an unknown or missing state decodes to `Idle`, and an
    /// `await_level` scratch without the delimiter keeps the whole scratch as
    /// the name with an empty phone.
    pub fn from_row(state: Option<&str>, temp: Option<&str>) -> Self {
        let temp = temp.unwrap_or_default();
        match state.map(str::trim).unwrap_or_default() {
            STATE_AWAIT_NAME => ChatState::AwaitName,
            STATE_AWAIT_PHONE => ChatState::AwaitPhone {
                name: temp.to_string(),
            },
            STATE_AWAIT_LEVEL => {
                let mut parts = temp.split(SCRATCH_DELIMITER);
                let name = parts.next().unwrap_or_default().to_string();
                let phone = parts.next().unwrap_or_default().to_string();
                ChatState::AwaitLevel { name, phone }
            }
            STATE_AI_MODE => ChatState::AiMode,
            _ => ChatState::Idle,
        }
    }
}

/// Fields collected by a completed registration, before it is timestamped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub phone: String,
    pub level: String,
}

/// One completed registration. Append-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    pub timestamp: DateTime<Utc>,
    pub chat_id: ChatId,
    pub name: String,
    pub phone: String,
    pub level: String,
    pub notes: String,
}

impl StudentRecord {
    pub fn from_draft(chat_id: ChatId, draft: StudentDraft) -> Self {
        Self {
            timestamp: Utc::now(),
            chat_id,
            name: draft.name,
            phone: draft.phone,
            level: draft.level,
            notes: String::new(),
        }
    }
}
