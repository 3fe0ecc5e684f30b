//! Configuration for webhook notifications

use crate::error::DiscoveryError;
use serde::{Deserialize, Serialize};

/// Webhook settings for announcing detected airdrops
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Announce newly detected airdrops
    #[serde(default)]
    pub webhook_enabled: bool,

    /// Endpoint to announce to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl WebhookConfig {
    /// Enabled configuration targeting `url`
    pub fn enabled(url: impl Into<String>) -> Self {
        Self {
            webhook_enabled: true,
            webhook_url: Some(url.into()),
        }
    }

    /// The target URL when notifications are enabled and a URL is set
    pub fn target(&self) -> Option<&str> {
        if !self.webhook_enabled {
            return None;
        }
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, DiscoveryError> {
        toml::from_str(toml_str)
            .map_err(|e| DiscoveryError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, DiscoveryError> {
        toml::to_string_pretty(self)
            .map_err(|e| DiscoveryError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        let config = WebhookConfig::default();
        assert!(!config.webhook_enabled);
        assert_eq!(config.target(), None);
    }

    #[test]
    fn test_enabled_without_url_has_no_target() {
        let config = WebhookConfig {
            webhook_enabled: true,
            webhook_url: Some("   ".to_string()),
        };
        assert_eq!(config.target(), None);
    }

    #[test]
    fn test_url_ignored_when_disabled() {
        let config = WebhookConfig {
            webhook_enabled: false,
            webhook_url: Some("https://hooks.example.com/a".to_string()),
        };
        assert_eq!(config.target(), None);
    }

    #[test]
    fn test_enabled_target() {
        let config = WebhookConfig::enabled("https://hooks.example.com/a");
        assert_eq!(config.target(), Some("https://hooks.example.com/a"));
    }

    #[test]
    fn test_toml_parsing() {
        let config = WebhookConfig::from_toml(
            r#"
            webhook_enabled = true
            webhook_url = "https://hooks.example.com/b"
            "#,
        )
        .unwrap();
        assert_eq!(config.target(), Some("https://hooks.example.com/b"));

        let parsed = WebhookConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml() {
        let err = WebhookConfig::from_toml("webhook_enabled = \"yes\"").unwrap_err();
        assert!(matches!(err, DiscoveryError::Config(_)));
    }
}
