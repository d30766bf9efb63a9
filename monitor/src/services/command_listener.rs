//! Polls the bot for an operator `/start` and acknowledges it once per process

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::telegram::TelegramNotifier;
use crate::constants::messages;
use crate::errors::{MonitorError, ProtocolError, TransportError};

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
struct IncomingMessage {
    text: Option<String>,
    chat: Chat,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

pub struct CommandListener {
    client: Client,
    notifier: Arc<TelegramNotifier>,
    poll_interval: Duration,
    // One-shot latch, owned by this task only
    acknowledged: bool,
    next_offset: Option<i64>,
}

impl CommandListener {
    pub fn new(client: Client, notifier: Arc<TelegramNotifier>, poll_interval: Duration) -> Self {
        Self {
            client,
            notifier,
            poll_interval,
            acknowledged: false,
            next_offset: None,
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    info!("Command listener stopping");
                    return;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        warn!("Failed to get updates: {}", e);
                    }
                }
            }
        }
    }

    /// Fetch pending updates and answer the first `/start`.
    ///
    /// Returns whether an acknowledgment was sent by this call. The offset only
    /// moves past a `/start` once it has been answered, so a failed reply is
    /// retried on the next poll.
    pub async fn poll_once(&mut self) -> Result<bool, MonitorError> {
        let updates = self.fetch_updates().await?;
        let mut sent = false;

        for update in updates {
            let is_start = update
                .message
                .as_ref()
                .and_then(|m| m.text.as_deref())
                .map(|text| text == messages::START_COMMAND)
                .unwrap_or(false);

            if is_start && !self.acknowledged {
                if let Some(message) = &update.message {
                    let chat_id = message.chat.id.to_string();
                    match self
                        .notifier
                        .send_message(&chat_id, messages::START_ACKNOWLEDGMENT)
                        .await
                    {
                        Ok(()) => {
                            info!("Acknowledged /start from chat {}", chat_id);
                            self.acknowledged = true;
                            sent = true;
                        }
                        Err(e) => {
                            warn!("Failed to acknowledge /start in chat {}: {}", chat_id, e);
                            break;
                        }
                    }
                }
            }

            self.next_offset = Some(update.update_id + 1);
        }

        Ok(sent)
    }

    async fn fetch_updates(&self) -> Result<Vec<Update>, MonitorError> {
        let mut request = self.client.get(self.notifier.method_url("getUpdates"));
        if let Some(offset) = self.next_offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest("getUpdates", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::UnexpectedStatus {
                endpoint: "getUpdates".to_string(),
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }
            .into());
        }

        let parsed: UpdatesResponse = response.json().await.map_err(|e| ProtocolError::InvalidBody {
            endpoint: "getUpdates".to_string(),
            reason: e.without_url().to_string(),
        })?;

        debug!("Received {} bot updates", parsed.result.len());
        Ok(parsed.result)
    }
}
