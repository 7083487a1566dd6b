//! Best-effort Telegram notifications for failed sync runs.
//!
//! The notifier is fire-and-forget from the pipeline's point of view: the
//! handler invokes it on a fatal error, logs a send failure, and never lets
//! notification problems mask the original error.

use std::time::Duration;

use reqwest::{Client, Url};
use thiserror::Error;

use storesync_core::TelegramConfig;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
const SEND_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid notifier base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("unexpected http status from telegram: {status}")]
    UnexpectedStatus { status: String },
}

/// Client for the Telegram Bot API `sendMessage` endpoint.
pub struct TelegramNotifier {
    client: Client,
    send_url: Url,
    chat_id: i64,
}

impl TelegramNotifier {
    /// Creates a notifier pointed at the production Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &TelegramConfig) -> Result<Self, NotifyError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a notifier with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NotifyError::InvalidBaseUrl`] if the URL
    /// does not parse.
    pub fn with_base_url(config: &TelegramConfig, base_url: &str) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()?;

        let raw = format!(
            "{}/bot{}/sendMessage",
            base_url.trim_end_matches('/'),
            config.token
        );
        let send_url = Url::parse(&raw).map_err(|e| NotifyError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            send_url,
            chat_id: config.chat_id,
        })
    }

    /// Sends a plain-text message to the configured chat.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::UnexpectedStatus`] on any non-2xx response.
    /// - [`NotifyError::Http`] on network failure.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.send_url.clone())
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.to_string(),
            });
        }

        tracing::debug!(chat_id = self.chat_id, "notification sent");
        Ok(())
    }
}
