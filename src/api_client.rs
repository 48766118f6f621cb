use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::BotError;

/// Источник статусов домашних работ.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value>;
}

#[async_trait]
impl<T: HomeworkApi + ?Sized> HomeworkApi for Arc<T> {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value> {
        (**self).fetch_statuses(from_date).await
    }
}

pub struct PracticumClient {
    endpoint: String,
    auth_header: String,
    client: reqwest::Client,
}

impl PracticumClient {
    pub fn new(endpoint: String, token: &str) -> Self {
        Self {
            endpoint,
            auth_header: format!("OAuth {}", token),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| BotError::Fetch(format!("failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let excerpt: String = text.chars().take(200).collect();
            return Err(BotError::Fetch(format!("API returned {}: {}", status, excerpt)).into());
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| BotError::Fetch(format!("failed to decode response: {}", e)))?;

        Ok(payload)
    }
}
