//! Error types for the discovery service

use thiserror::Error;

/// Errors that can occur while ingesting or listing airdrops
///
/// A text that does not classify is not an error; see
/// [`DiscoveryService::process_tweet`](crate::DiscoveryService::process_tweet).
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Record store error
    #[error("Store error: {0}")]
    Store(String),

    /// Notification error
    #[error("Notification error: {0}")]
    Notify(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DiscoveryError {
    fn from(e: serde_json::Error) -> Self {
        DiscoveryError::Notify(e.to_string())
    }
}
