//! # Configuration Module
//!
//! Runtime settings read from the environment (optionally seeded from a
//! `.env` file), with defaults for everything except the bot token.

use std::net::SocketAddr;

use crate::errors::{BotError, BotResult};
use crate::localization::DEFAULT_LANGUAGE;

// Defaults for the OpenAI collaborator
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_MAX_TOKENS: u32 = 500;

// Defaults for the webhook listener
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Settings for the AI question answering collaborator
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key; `None` disables AI answers
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Chat completion model name
    pub model: String,
    /// Upper bound on generated tokens per answer
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: DEFAULT_OPENAI_MAX_TOKENS,
        }
    }
}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    /// Postgres URL for chat states and student records
    pub database_url: Option<String>,
    pub openai: OpenAiConfig,
    pub listen_addr: SocketAddr,
    /// Public URL registered with Telegram as the webhook
    pub webhook_url: Option<String>,
    pub language: String,
    /// Link sent when the channel button is pressed
    pub channel_url: Option<String>,
}

impl BotConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> BotResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let telegram_token = get("TELEGRAM_TOKEN")
            .ok_or_else(|| BotError::ConfigMissing("TELEGRAM_TOKEN".into()))?;

        let max_tokens = match get("OPENAI_MAX_TOKENS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|tokens| *tokens > 0)
                .ok_or_else(|| BotError::ConfigInvalid {
                    var: "OPENAI_MAX_TOKENS".into(),
                    reason: format!("`{raw}` is not a positive integer"),
                })?,
            None => DEFAULT_OPENAI_MAX_TOKENS,
        };

        let openai = OpenAiConfig {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            max_tokens,
        };

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| BotError::ConfigInvalid {
                var: "PORT".into(),
                reason: format!("`{raw}` is not a valid port"),
            })?,
            None => DEFAULT_PORT,
        };
        let listen_addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|_| BotError::ConfigInvalid {
                var: "HOST".into(),
                reason: format!("`{host}` is not an IP address"),
            })?;

        Ok(Self {
            telegram_token,
            database_url: get("DATABASE_URL"),
            openai,
            listen_addr,
            webhook_url: get("WEBHOOK_URL"),
            language: get("BOT_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            channel_url: get("CHANNEL_URL"),
        })
    }
}
