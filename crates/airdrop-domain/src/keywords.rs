//! Keyword configuration for airdrop classification

/// Positive keywords used when nothing else is configured
pub const LEGACY_POSITIVE: [&str; 5] = ["follow", "mint", "galxe", "zk", "claim"];

/// Negative keywords used when nothing else is configured
pub const LEGACY_NEGATIVE: [&str; 2] = ["scam", "ended"];

/// Positive and negative trigger words
///
/// A text is an airdrop when it contains at least one positive word and none
/// of the negative words (case-insensitive substring match). Both lists keep
/// their configured order; the task extractor walks positive words in this
/// order.
///
/// # Examples
///
/// ```
/// use airdrop_domain::KeywordConfig;
///
/// let config = KeywordConfig::new(vec!["Mint".into(), " ".into()], vec![]);
/// assert_eq!(config.positive, vec!["mint"]);
///
/// let legacy = KeywordConfig::legacy();
/// assert_eq!(legacy.positive.len(), 5);
/// assert_eq!(legacy.negative, vec!["scam", "ended"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordConfig {
    /// Words whose presence signals an airdrop
    pub positive: Vec<String>,

    /// Words whose presence disqualifies a match
    pub negative: Vec<String>,
}

impl KeywordConfig {
    /// Build a configuration, lowercasing entries and dropping blank ones
    ///
    /// An empty keyword is a substring of every text, so keeping one would
    /// turn the positive list into "match everything".
    pub fn new(positive: Vec<String>, negative: Vec<String>) -> Self {
        Self {
            positive: normalize(positive),
            negative: normalize(negative),
        }
    }

    /// The fixed keyword set of the original deployment
    pub fn legacy() -> Self {
        Self {
            positive: LEGACY_POSITIVE.iter().map(|s| s.to_string()).collect(),
            negative: LEGACY_NEGATIVE.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Keywords to apply to the filtered listing
    ///
    /// An empty positive list falls back to [`KeywordConfig::legacy`] rather
    /// than matching every stored record.
    pub fn effective_for_listing(&self) -> KeywordConfig {
        if self.positive.is_empty() {
            Self::legacy()
        } else {
            self.clone()
        }
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self::legacy()
    }
}

fn normalize(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
