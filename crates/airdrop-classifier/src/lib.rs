//! Airdrop Classifier
//!
//! Decides whether a short social-media text announces an airdrop and
//! derives a display title and an action-item list from it.
//!
//! # Overview
//!
//! Classification is a keyword heuristic: a text qualifies when it contains
//! at least one positive keyword and no negative keyword, compared as
//! case-insensitive substrings over the full text. Extraction never fails;
//! text without a usable structure simply yields no tasks.
//!
//! # Architecture
//!
//! ```text
//! Text → classify → (match) → extract_title + extract_tasks
//!      → AirdropRecord → RecordStore::save → Notifier (best-effort)
//! ```
//!
//! # Example Usage
//!
//! ```
//! use airdrop_classifier::{classify, extract_tasks, extract_title};
//! use airdrop_domain::KeywordConfig;
//!
//! let keywords = KeywordConfig::legacy();
//! let text = "Galxe campaign is live\n1. Follow @proj\n2. Mint the badge";
//!
//! assert!(classify(text, &keywords.positive, &keywords.negative));
//! assert_eq!(extract_title(text), "Galxe campaign is live");
//! assert_eq!(
//!     extract_tasks(text, &keywords.positive).as_deref(),
//!     Some("- Follow @proj\n- Mint the badge"),
//! );
//! ```

#![warn(missing_docs)]

mod classify;
mod config;
mod error;
mod extract;
mod notify;
mod service;

#[cfg(test)]
mod tests;

pub use classify::classify;
pub use config::WebhookConfig;
pub use error::DiscoveryError;
pub use extract::{extract_tasks, extract_title, TITLE_MAX_CHARS};
pub use notify::{WebhookNotifier, WebhookPayload, AIRDROP_DETECTED_EVENT};
pub use service::DiscoveryService;
