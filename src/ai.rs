//! AI question answering collaborator.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::OpenAiConfig;
use crate::errors::{BotError, BotResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Answers a free-form user question
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, prompt: &str) -> BotResult<String>;
}

/// Stand-in used when no API key is configured; always returns the same notice
#[derive(Debug, Clone)]
pub struct DisabledAnswerService {
    notice: String,
}

impl DisabledAnswerService {
    pub fn new(notice: impl Into<String>) -> Self {
        Self {
            notice: notice.into(),
        }
    }
}

#[async_trait]
impl AnswerService for DisabledAnswerService {
    async fn ask(&self, _prompt: &str) -> BotResult<String> {
        Ok(self.notice.clone())
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI chat completions client
pub struct OpenAiAnswerService {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiAnswerService {
    pub fn new(api_key: String, config: &OpenAiConfig) -> BotResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl AnswerService for OpenAiAnswerService {
    async fn ask(&self, prompt: &str) -> BotResult<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, prompt_length = prompt.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Chat completion request rejected");
            return Err(BotError::unavailable(
                "ai service",
                format!("HTTP {status}: {body}"),
            ));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| BotError::unavailable("ai service", "response contained no answer"))
    }
}
