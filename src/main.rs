use anyhow::{Context, Result};
use reqwest::Url;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tutor_bot::ai::{AnswerService, DisabledAnswerService, OpenAiAnswerService};
use tutor_bot::bot::{router, DialogueManager, MessageDispatcher, TelegramSender};
use tutor_bot::config::BotConfig;
use tutor_bot::db::{self, PgStore};
use tutor_bot::localization::LocalizationManager;
use tutor_bot::store::{MemoryStore, SessionStore, StudentSink};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_tracing();

    info!("Starting language school bot");

    let config = BotConfig::from_env().context("Failed to load configuration")?;

    let localization = Arc::new(
        LocalizationManager::with_language(&config.language)
            .context("Failed to load translations")?,
    );
    info!(language = localization.language(), "Localization loaded");

    let (sessions, students): (Arc<dyn SessionStore>, Arc<dyn StudentSink>) =
        match &config.database_url {
            Some(url) => {
                let pool = db::connect(url)
                    .await
                    .context("Failed to initialize database")?;
                let store = Arc::new(PgStore::new(pool));
                (store.clone() as Arc<dyn SessionStore>, store as Arc<dyn StudentSink>)
            }
            None => {
                warn!("DATABASE_URL not set, chat states and registrations are kept in memory");
                let store = Arc::new(MemoryStore::new());
                (store.clone() as Arc<dyn SessionStore>, store as Arc<dyn StudentSink>)
            }
        };

    let answers: Arc<dyn AnswerService> = match &config.openai.api_key {
        Some(key) => Arc::new(OpenAiAnswerService::new(key.clone(), &config.openai)?),
        None => {
            info!("OPENAI_API_KEY not set, AI answers are disabled");
            Arc::new(DisabledAnswerService::new(
                localization.get_message("ai-unavailable"),
            ))
        }
    };

    let bot = Bot::new(&config.telegram_token);

    if let Some(webhook_url) = &config.webhook_url {
        match Url::parse(webhook_url) {
            Ok(url) => match bot.set_webhook(url).await {
                Ok(_) => info!(url = %webhook_url, "Webhook registered"),
                Err(e) => error!(error = %e, "Failed to register webhook"),
            },
            Err(e) => error!(url = %webhook_url, error = %e, "Invalid WEBHOOK_URL"),
        }
    }

    let dispatcher = Arc::new(MessageDispatcher::new(
        DialogueManager::new(localization, config.channel_url.clone()),
        sessions,
        students,
        Arc::new(TelegramSender::new(bot)),
        answers,
    ));

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "Listening for webhook updates");

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
