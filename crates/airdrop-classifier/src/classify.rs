//! Keyword classification

/// Whether `text` reads as an airdrop announcement
///
/// True when any positive keyword and no negative keyword occurs in the text
/// as a case-insensitive substring. Empty text never matches. Plain substring
/// matching means "zk" also hits "buzzkill"; that is accepted behavior.
///
/// # Examples
///
/// ```
/// use airdrop_classifier::classify;
///
/// assert!(classify("Mint is LIVE", &["mint"], &["scam"]));
/// assert!(!classify("Mint ended yesterday", &["mint"], &["ended"]));
/// assert!(!classify("", &["mint"], &[] as &[&str]));
/// ```
pub fn classify<P, N>(text: &str, positive: &[P], negative: &[N]) -> bool
where
    P: AsRef<str>,
    N: AsRef<str>,
{
    if text.is_empty() {
        return false;
    }

    let haystack = text.to_lowercase();
    let contains = |keyword: &str| haystack.contains(&keyword.to_lowercase());

    positive.iter().any(|k| contains(k.as_ref())) && !negative.iter().any(|k| contains(k.as_ref()))
}
