use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::api_client::HomeworkApi;
use crate::error::{BotError, ErrorSignature};
use crate::formatter::{failure_message, parse_status};
use crate::notifier::{MessageSender, Notifier};
use crate::validator::check_response;

/// Состояние между итерациями. Живёт только в памяти процесса.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub watermark: i64,
    pub last_error: Option<ErrorSignature>,
}

/// Стартовая отметка: текущее время минус один интервал опроса.
pub fn initial_watermark(now: i64, retry_interval: Duration) -> i64 {
    now.saturating_sub(retry_interval.as_secs() as i64)
}

pub struct Poller<A, S> {
    api: A,
    notifier: Notifier<S>,
    retry_interval: Duration,
    state: PollState,
}

impl<A, S> Poller<A, S>
where
    A: HomeworkApi,
    S: MessageSender,
{
    pub fn new(api: A, notifier: Notifier<S>, retry_interval: Duration, watermark: i64) -> Self {
        Self {
            api,
            notifier,
            retry_interval,
            state: PollState {
                watermark,
                last_error: None,
            },
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Опрашивает API бесконечно, засыпая после каждой итерации.
    pub async fn run(mut self) {
        info!(
            "Polling every {}s starting from {}",
            self.retry_interval.as_secs(),
            self.state.watermark
        );
        loop {
            let _ = self.poll_once().await;
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// Одна итерация без сна. Ошибка уже залогирована и, если она новая,
    /// отправлена в чат.
    pub async fn poll_once(&mut self) -> Result<(), BotError> {
        match self.process().await {
            Ok(next) => {
                self.advance(next);
                self.state.last_error = None;
                Ok(())
            }
            Err(err) => {
                error!(kind = %err.kind(), "Iteration failed: {}", err);
                self.report_failure(&err).await;
                Err(err)
            }
        }
    }

    async fn process(&self) -> Result<i64, BotError> {
        let payload = self
            .api
            .fetch_statuses(self.state.watermark)
            .await
            .map_err(BotError::from)?;
        let validated = check_response(&payload)?;

        if validated.homeworks.is_empty() {
            debug!("No new homework statuses since {}", self.state.watermark);
        }

        // Одна битая запись бракует всю пачку.
        for record in &validated.homeworks {
            let message = parse_status(record)?;
            self.notifier.notify(&message).await;
        }

        Ok(validated.next_watermark)
    }

    fn advance(&mut self, next: i64) {
        if next < self.state.watermark {
            warn!(
                "Server moved current_date backwards ({} -> {}), keeping {}",
                self.state.watermark, next, self.state.watermark
            );
            return;
        }
        self.state.watermark = next;
    }

    async fn report_failure(&mut self, err: &BotError) {
        let signature = err.signature();
        if self.state.last_error.as_ref() != Some(&signature) {
            self.notifier.notify(&failure_message(err)).await;
        } else {
            debug!("Suppressing repeated failure notification: {}", err);
        }
        self.state.last_error = Some(signature);
    }
}
