use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::TelegramConfig;
use crate::errors::{MonitorError, ProtocolError, TransportError};

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Delivers text messages through the Telegram bot API.
///
/// Shared between the scheduling loop and the command listener; the underlying
/// client is safe to use from both.
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(client: Client, config: &TelegramConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        }
    }

    /// `<api>/bot<token>/<method>`
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Send to the configured operator chat. Failures are logged and reported as `false`.
    pub async fn notify(&self, text: &str) -> bool {
        match self.send_message(&self.chat_id, text).await {
            Ok(()) => {
                info!("Notification delivered to chat {}", self.chat_id);
                true
            }
            Err(e) => {
                warn!("Failed to deliver notification to chat {}: {}", self.chat_id, e);
                false
            }
        }
    }

    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), MonitorError> {
        // The token is part of the URL, so errors name the API host instead
        let endpoint = format!("{}/sendMessage", self.api_url);
        let payload = SendMessagePayload { chat_id, text };

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&endpoint, e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::UnexpectedStatus {
                endpoint,
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }
            .into());
        }

        Ok(())
    }
}
