//! Discord alert delivery for monitored events
//!
//! Sends alerts to a Discord channel via webhook as structured Embed
//! messages. Delivery is single-shot: a failed call is reported to the
//! caller and never retried here.

use crate::event::Alert;
use crate::utils::AppError;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Bound on a single webhook call so a hung sink cannot stall a poll pass
/// indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Discord webhook message payload
#[derive(Debug, Serialize)]
pub struct DiscordMessage {
    /// Rich embeds
    pub embeds: Vec<DiscordEmbed>,
}

/// Discord embed for rich messages
#[derive(Debug, Clone, Serialize)]
pub struct DiscordEmbed {
    /// Embed title
    pub title: String,
    /// Labeled fields
    pub fields: Vec<DiscordEmbedField>,
    /// Color (as decimal integer)
    pub color: u32,
}

/// Discord embed field
#[derive(Debug, Clone, Serialize)]
pub struct DiscordEmbedField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: String,
    /// Whether the field is inline
    pub inline: bool,
}

/// Discord color constants (decimal)
pub mod colors {
    /// Alert red - #FF0000
    pub const ALERT: u32 = 16711680;
}

/// Discord alert service
#[derive(Debug, Clone)]
pub struct DiscordAlert {
    /// Webhook URL
    webhook_url: String,
    /// HTTP client
    client: Client,
    /// Whether alerts are enabled
    enabled: bool,
}

impl DiscordAlert {
    /// Create a new Discord alert service
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: http_client(),
            enabled: true,
        }
    }

    /// Create from the `DISCORD_WEBHOOK_URL` environment variable
    pub fn from_env() -> Result<Self, AppError> {
        let webhook_url = std::env::var("DISCORD_WEBHOOK_URL").map_err(|_| {
            warn!("DISCORD_WEBHOOK_URL not configured, alerts disabled");
            AppError::internal("DISCORD_WEBHOOK_URL not configured")
        })?;

        Ok(Self::new(webhook_url))
    }

    /// Create a disabled alert service (for testing and unconfigured runs)
    pub fn disabled() -> Self {
        Self {
            webhook_url: String::new(),
            client: http_client(),
            enabled: false,
        }
    }

    /// Check if alerts are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.webhook_url.is_empty()
    }

    /// Get the webhook URL (for testing)
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Send an alert to the configured webhook.
    ///
    /// Performs exactly one POST; any transport failure or non-success
    /// status is a delivery error. The caller decides whether to drop it.
    pub async fn send_alert(&self, alert: &Alert) -> Result<(), AppError> {
        if !self.is_enabled() {
            debug!("Discord alerts disabled, skipping");
            return Ok(());
        }

        let payload = build_message(alert);
        self.send_payload(&payload).await?;

        info!(event_id = alert.code, "Discord notification sent");
        Ok(())
    }

    /// Send raw Discord message payload
    async fn send_payload(&self, payload: &DiscordMessage) -> Result<(), AppError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send Discord webhook");
                AppError::delivery(format!("Failed to send Discord webhook: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Discord webhook returned error");
            return Err(AppError::delivery(format!(
                "Discord webhook error: {} - {}",
                status, body
            )));
        }

        Ok(())
    }
}

fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Build the webhook payload for an alert: marker-prefixed title plus the
/// four labeled fields.
fn build_message(alert: &Alert) -> DiscordMessage {
    let fields = vec![
        DiscordEmbedField {
            name: "🆔 Event ID".to_string(),
            value: format!("`{}`", alert.code),
            inline: true,
        },
        DiscordEmbedField {
            name: "⌚ Time".to_string(),
            value: format!("`{}`", alert.timestamp.to_rfc3339()),
            inline: true,
        },
        DiscordEmbedField {
            name: "💻 Source".to_string(),
            value: format!("`{}`", alert.source),
            inline: true,
        },
        DiscordEmbedField {
            name: "📜 Details".to_string(),
            value: format!("`{}`", alert.detail),
            inline: false,
        },
    ];

    DiscordMessage {
        embeds: vec![DiscordEmbed {
            title: format!("{} {}", alert.marker, alert.title),
            fields,
            color: colors::ALERT,
        }],
    }
}
