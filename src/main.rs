mod api_client;
mod bot;
mod config;
mod error;
mod formatter;
mod notifier;
mod poller;
mod statuses;
mod validator;

use anyhow::Result;
use config::Config;
use teloxide::prelude::*;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(severity = "critical", "Cannot start without configuration: {:#}", e);
            return Err(e);
        }
    };

    info!("Starting homework status bot...");
    info!("API endpoint: {}", config.endpoint);

    // Create bot
    let bot = Bot::new(&config.telegram_token);

    // Start polling
    bot::start_bot(bot, config).await?;

    Ok(())
}
