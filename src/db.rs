use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use teloxide::types::ChatId;
use tracing::{debug, info};

use crate::dialogue::{ChatState, StudentRecord};
use crate::errors::BotResult;
use crate::store::{SessionStore, StudentSink};

/// Connect to Postgres and make sure the schema exists
pub async fn connect(database_url: &str) -> BotResult<PgPool> {
    info!("Connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    init_database_schema(&pool).await?;
    Ok(pool)
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> BotResult<()> {
    info!("Initializing database schema...");

    // One row per chat, mirrors the "states" worksheet columns
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS chat_states (
            chat_id TEXT PRIMARY KEY,
            state TEXT NOT NULL DEFAULT '',
            temp TEXT NOT NULL DEFAULT '',
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;

    // Append-only, mirrors the "students" worksheet columns
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS students (
            id BIGSERIAL PRIMARY KEY,
            timestamp TIMESTAMPTZ NOT NULL,
            chat_id TEXT NOT NULL,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            level TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Postgres-backed session store and student sink
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn get(&self, chat_id: ChatId) -> BotResult<ChatState> {
        let row = sqlx::query("SELECT state, temp FROM chat_states WHERE chat_id = $1")
            .bind(chat_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        let state = match row {
            Some(row) => {
                let state: Option<String> = row.try_get("state")?;
                let temp: Option<String> = row.try_get("temp")?;
                ChatState::from_row(state.as_deref(), temp.as_deref())
            }
            None => ChatState::Idle,
        };
        debug!(chat_id = %chat_id, state = ?state, "Loaded chat state");
        Ok(state)
    }

    async fn set(&self, chat_id: ChatId, state: &ChatState) -> BotResult<()> {
        let (tag, temp) = state.to_row();
        sqlx::query(
            "INSERT INTO chat_states (chat_id, state, temp, updated_at)
             VALUES ($1, $2, $3, NOW())
             ON CONFLICT (chat_id)
             DO UPDATE SET state = EXCLUDED.state, temp = EXCLUDED.temp, updated_at = NOW()",
        )
        .bind(chat_id.to_string())
        .bind(tag)
        .bind(temp)
        .execute(&self.pool)
        .await?;

        debug!(chat_id = %chat_id, state = tag, "Stored chat state");
        Ok(())
    }
}

#[async_trait]
impl StudentSink for PgStore {
    async fn append(&self, record: &StudentRecord) -> BotResult<()> {
        sqlx::query(
            "INSERT INTO students (timestamp, chat_id, name, phone, level, notes)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.timestamp)
        .bind(record.chat_id.to_string())
        .bind(&record.name)
        .bind(&record.phone)
        .bind(&record.level)
        .bind(&record.notes)
        .execute(&self.pool)
        .await?;

        info!(chat_id = %record.chat_id, "Student record appended");
        Ok(())
    }
}
