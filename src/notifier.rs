use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};
use tracing::{error, info};

/// Транспорт для отправки текстовых сообщений в чат.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()>;
}

#[async_trait]
impl<T: MessageSender + ?Sized> MessageSender for Arc<T> {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        (**self).send_text(chat_id, text).await
    }
}

pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Числовой id чата или `@username` канала.
pub fn recipient(chat_id: &str) -> Recipient {
    match chat_id.trim().parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.trim().to_string()),
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        self.bot
            .send_message(recipient(chat_id), text)
            .await
            .context("Failed to send Telegram message")?;
        Ok(())
    }
}

/// Доставка по принципу best-effort: ошибки транспорта только логируются.
pub struct Notifier<S> {
    sender: S,
    chat_id: String,
}

impl<S: MessageSender> Notifier<S> {
    pub fn new(sender: S, chat_id: String) -> Self {
        Self { sender, chat_id }
    }

    #[cfg(test)]
    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub async fn notify(&self, message: &str) {
        match self.sender.send_text(&self.chat_id, message).await {
            Ok(()) => info!("Message sent: {}", message),
            Err(e) => error!("Failed to send message: {:#}", e),
        }
    }
}
