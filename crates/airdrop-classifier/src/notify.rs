//! Webhook announcement of detected airdrops
//!
//! Delivery is not wired to the network: the payload is built and logged.

use crate::config::WebhookConfig;
use crate::error::DiscoveryError;
use airdrop_domain::{AirdropRecord, Notifier};
use serde::Serialize;
use tracing::info;

/// Event name carried by every payload
pub const AIRDROP_DETECTED_EVENT: &str = "airdrop.detected";

/// Body that would be posted to the webhook target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    /// Event name
    pub event: String,
    /// Record title
    pub title: String,
    /// Record provenance label
    pub source: String,
    /// Link to the original post
    pub link: String,
    /// Webhook endpoint
    pub target: String,
}

/// Notifier that announces records to a configured webhook URL
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
}

impl WebhookNotifier {
    /// Create a notifier for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Build a notifier when the configuration enables one
    pub fn from_config(config: &WebhookConfig) -> Option<Self> {
        config.target().map(Self::new)
    }

    /// Target URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Payload describing `record`
    pub fn payload(&self, record: &AirdropRecord) -> WebhookPayload {
        WebhookPayload {
            event: AIRDROP_DETECTED_EVENT.to_string(),
            title: record.title.clone(),
            source: record.source.clone(),
            link: record.link.clone(),
            target: self.url.clone(),
        }
    }
}

impl Notifier for WebhookNotifier {
    type Error = DiscoveryError;

    fn notify(&self, record: &AirdropRecord) -> Result<(), Self::Error> {
        let body = serde_json::to_string(&self.payload(record))?;
        info!(
            "Would send webhook notification for airdrop: {} to URL: {}",
            record.title, self.url
        );
        tracing::debug!("Webhook payload: {}", body);
        Ok(())
    }
}
