use crate::api_client::PracticumClient;
use crate::config::Config;
use crate::notifier::{Notifier, TelegramSender};
use crate::poller::{initial_watermark, Poller};
use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;

pub async fn start_bot(bot: Bot, config: Config) -> Result<()> {
    info!("Bot is starting...");

    let api = PracticumClient::new(config.endpoint.clone(), &config.practicum_token);
    let notifier = Notifier::new(TelegramSender::new(bot), config.chat_id.clone());

    let watermark = initial_watermark(chrono::Utc::now().timestamp(), config.retry_interval);
    let poller = Poller::new(api, notifier, config.retry_interval, watermark);

    poller.run().await;

    Ok(())
}
