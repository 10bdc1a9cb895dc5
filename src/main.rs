mod catalog;
mod claude;
mod commands;
mod config;
mod discord_bot;
mod error;
mod file_logger;
mod generator;
mod history;
mod models;
mod prompts;
mod render;
mod router;
mod scheduler;
mod selection;
mod service;
#[cfg(test)]
mod testing;
mod trigger;

use crate::claude::ClaudeClient;
use crate::config::Config;
use crate::discord_bot::{DiscordService, Handler};
use crate::file_logger::FileLogger;
use crate::generator::Generator;
use crate::history::HistoryStore;
use crate::service::PostService;
use dotenv::dotenv;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("wonderbot stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    let writer = Arc::new(ClaudeClient::new(&config.anthropic_api_key, &config.content_model)?);
    let summarizer = Arc::new(ClaudeClient::new(&config.anthropic_api_key, &config.summary_model)?);
    info!(
        "Content model {}, summary model {}",
        writer.model(),
        summarizer.model()
    );

    let journal = match &config.activity_log {
        Some(path) => match FileLogger::new(path) {
            Ok(logger) => Some(Arc::new(logger)),
            Err(e) => {
                warn!("Activity log {} unavailable: {}", path.display(), e);
                None
            }
        },
        None => None,
    };

    let store = HistoryStore::new(&config.history_file);
    info!("History file {}", store.path().display());

    let service = Arc::new(PostService::new(
        Generator::new(writer, summarizer),
        store,
        Arc::new(DiscordService::new(&config.discord_token, config.channel_id)),
        journal,
    ));

    tokio::spawn(scheduler::run_daily(service.clone(), config.post_time));

    if let Some(addr) = config.trigger_addr {
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = trigger::serve(service, addr).await {
                error!("Trigger endpoint stopped: {}", e);
            }
        });
    }

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(service))
        .await?;

    client.start().await?;
    Ok(())
}
