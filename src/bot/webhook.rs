//! Webhook endpoint receiving Telegram updates

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use teloxide::types::ChatId;
use tracing::{debug, warn};

use crate::errors::{BotError, BotResult};

use super::message_handler::MessageDispatcher;

/// The subset of a Telegram update the bot reads
#[derive(Debug, Deserialize)]
pub struct InboundUpdate {
    #[serde(default)]
    pub message: Option<InboundMessage>,
}

#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub chat: Option<InboundChat>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InboundChat {
    pub id: i64,
}

/// A message that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    pub text: String,
}

impl InboundUpdate {
    /// Extract the chat id and text.
    ///
    /// `Ok(None)` for updates that carry no message at all (edits, callbacks
    /// and the like); an error when a message has no chat id.
    pub fn into_event(self) -> BotResult<Option<InboundEvent>> {
        let Some(message) = self.message else {
            return Ok(None);
        };
        let chat = message
            .chat
            .ok_or_else(|| BotError::MalformedInboundPayload("message without chat".into()))?;

        Ok(Some(InboundEvent {
            chat_id: ChatId(chat.id),
            text: message.text.unwrap_or_default(),
        }))
    }
}

/// Parse a raw webhook body into an event
pub fn parse_update(body: &[u8]) -> BotResult<Option<InboundEvent>> {
    let update: InboundUpdate = serde_json::from_slice(body)
        .map_err(|e| BotError::MalformedInboundPayload(e.to_string()))?;
    update.into_event()
}

/// Build the HTTP router
pub fn router(dispatcher: Arc<MessageDispatcher>) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(dispatcher)
}

async fn webhook_handler(
    State(dispatcher): State<Arc<MessageDispatcher>>,
    body: Bytes,
) -> impl IntoResponse {
    match parse_update(&body) {
        Ok(Some(event)) => dispatcher.handle_message(event.chat_id, &event.text).await,
        Ok(None) => debug!("Ignoring update without a message"),
        Err(e) => warn!(error = %e, "Ignoring inbound update"),
    }

    // Always acknowledge so Telegram does not redeliver
    Json(json!({ "ok": true }))
}

async fn health_handler() -> &'static str {
    "ok"
}
