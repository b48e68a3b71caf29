//! Per-chat session storage and the student record sink.
//!
//! Both traits are implemented by the Postgres backend in [`crate::db`] and by
//! [`MemoryStore`], which is used when no database is configured and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use teloxide::types::ChatId;
use tokio::sync::RwLock;

use crate::dialogue::{ChatState, StudentRecord};
use crate::errors::BotResult;

/// Durable mapping from chat id to dialogue state
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current state of a chat; an unknown chat is `ChatState::Idle`
    async fn get(&self, chat_id: ChatId) -> BotResult<ChatState>;

    /// Upsert the state of a chat
    async fn set(&self, chat_id: ChatId, state: &ChatState) -> BotResult<()>;

    /// Reset a chat to `Idle`
    async fn clear(&self, chat_id: ChatId) -> BotResult<()> {
        self.set(chat_id, &ChatState::Idle).await
    }
}

/// Append-only destination for completed registrations
#[async_trait]
pub trait StudentSink: Send + Sync {
    async fn append(&self, record: &StudentRecord) -> BotResult<()>;
}

/// In-process store keeping rows in the same `(state, temp)` shape as the database
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: RwLock<HashMap<String, (String, String)>>,
    students: RwLock<Vec<StudentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record appended so far
    pub async fn students(&self) -> Vec<StudentRecord> {
        self.students.read().await.clone()
    }

    /// Number of chats with a stored row
    pub async fn session_count(&self) -> usize {
        self.states.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, chat_id: ChatId) -> BotResult<ChatState> {
        let states = self.states.read().await;
        Ok(match states.get(&chat_id.to_string()) {
            Some((state, temp)) => ChatState::from_row(Some(state), Some(temp)),
            None => ChatState::Idle,
        })
    }

    async fn set(&self, chat_id: ChatId, state: &ChatState) -> BotResult<()> {
        let (tag, temp) = state.to_row();
        self.states
            .write()
            .await
            .insert(chat_id.to_string(), (tag.to_string(), temp));
        Ok(())
    }
}

#[async_trait]
impl StudentSink for MemoryStore {
    async fn append(&self, record: &StudentRecord) -> BotResult<()> {
        self.students.write().await.push(record.clone());
        Ok(())
    }
}
