//! Outbound messaging transport

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::KeyboardMarkup;

use crate::errors::BotResult;

/// Delivers replies to a chat
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        menu: Option<KeyboardMarkup>,
    ) -> BotResult<()>;
}

/// Sends replies through the Telegram Bot API
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        menu: Option<KeyboardMarkup>,
    ) -> BotResult<()> {
        let request = self.bot.send_message(chat_id, text);
        match menu {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
        Ok(())
    }
}
