//! # Error Types Module
//!
//! Error taxonomy shared by the stores, the collaborator clients and the
//! startup code. Nothing in the request path lets one of these escape to the
//! webhook caller; the dispatcher logs them and degrades instead.

use thiserror::Error;

/// Errors raised while configuring or running the bot
#[derive(Debug, Error)]
pub enum BotError {
    /// A required setting is absent (fatal at startup)
    #[error("missing required configuration: {0}")]
    ConfigMissing(String),
    /// A setting is present but cannot be used
    #[error("invalid configuration for {var}: {reason}")]
    ConfigInvalid { var: String, reason: String },
    /// Network or auth failure talking to the store, Telegram or the AI backend
    #[error("{collaborator} unavailable: {reason}")]
    CollaboratorUnavailable {
        collaborator: &'static str,
        reason: String,
    },
    /// Inbound update without a usable chat id
    #[error("malformed inbound payload: {0}")]
    MalformedInboundPayload(String),
}

impl BotError {
    pub fn unavailable(collaborator: &'static str, reason: impl ToString) -> Self {
        BotError::CollaboratorUnavailable {
            collaborator,
            reason: reason.to_string(),
        }
    }
}

impl From<sqlx::Error> for BotError {
    fn from(err: sqlx::Error) -> Self {
        BotError::unavailable("state store", err)
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::unavailable("ai service", err)
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::unavailable("telegram", err)
    }
}

pub type BotResult<T> = Result<T, BotError>;
