//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, classification keywords,
//! database location and webhook integration. Every section is optional.

use airdrop_classifier::WebhookConfig;
use airdrop_domain::keywords::{LEGACY_NEGATIVE, LEGACY_POSITIVE};
use airdrop_domain::KeywordConfig;
use airdrop_store::{validate_table_name, DEFAULT_TABLE_NAME};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Field present but unusable
    #[error("Invalid configuration field {0}: {1}")]
    Invalid(String, String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Serve the /airdrops endpoints; when false only /health is served
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Classification keywords
    #[serde(default)]
    pub keywords: KeywordsConfig,

    /// Record storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Webhook integration
    #[serde(default)]
    pub integration: WebhookConfig,
}

/// `[keywords]` section
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsConfig {
    /// Words whose presence signals an airdrop
    #[serde(default = "default_positive")]
    pub positive: Vec<String>,

    /// Words whose presence disqualifies a match
    #[serde(default = "default_negative")]
    pub negative: Vec<String>,
}

/// `[database]` section
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file, or ":memory:"
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Table holding the records
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_positive() -> Vec<String> {
    LEGACY_POSITIVE.iter().map(|s| s.to_string()).collect()
}

fn default_negative() -> Vec<String> {
    LEGACY_NEGATIVE.iter().map(|s| s.to_string()).collect()
}

fn default_database_path() -> String {
    "airdrops.db".to_string()
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            positive: default_positive(),
            negative: default_negative(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            table_name: default_table_name(),
        }
    }
}

impl KeywordsConfig {
    /// Normalized keyword configuration for the classifier
    pub fn to_keyword_config(&self) -> KeywordConfig {
        KeywordConfig::new(self.positive.clone(), self.negative.clone())
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database.path".to_string(),
                "must not be empty".to_string(),
            ));
        }
        validate_table_name(&self.database.table_name).map_err(|e| {
            ConfigError::Invalid("database.table_name".to_string(), e.to_string())
        })?;
        if self.integration.webhook_enabled && self.integration.target().is_none() {
            warn!("Webhook notifications enabled but no webhook_url set; notifications are off");
        }
        if self.keywords.to_keyword_config().positive.is_empty() {
            warn!("No positive keywords configured; no tweet will be classified as an airdrop");
        }
        Ok(())
    }

    /// In-memory configuration used when no config file is given
    pub fn ephemeral() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            enabled: true,
            keywords: KeywordsConfig::default(),
            database: DatabaseConfig {
                path: ":memory:".to_string(),
                table_name: default_table_name(),
            },
            integration: WebhookConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
