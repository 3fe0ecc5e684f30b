//! Ingestion and read paths around the classifier

use crate::classify::classify;
use crate::error::DiscoveryError;
use crate::extract::{extract_tasks, extract_title};
use crate::notify::WebhookNotifier;
use airdrop_domain::{AirdropRecord, KeywordConfig, Notifier, RecordStore};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Classifies incoming texts and persists the airdrops among them
pub struct DiscoveryService<S, N = WebhookNotifier>
where
    S: RecordStore,
{
    store: Arc<Mutex<S>>,
    keywords: KeywordConfig,
    notifier: Option<Arc<N>>,
}

impl<S> DiscoveryService<S, WebhookNotifier>
where
    S: RecordStore,
{
    /// Create a service without a notifier
    pub fn new(store: S, keywords: KeywordConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            keywords,
            notifier: None,
        }
    }
}

impl<S, N> DiscoveryService<S, N>
where
    S: RecordStore,
    S::Error: std::fmt::Display,
{
    /// Announce every new airdrop through `notifier`
    pub fn with_notifier<M: Notifier>(self, notifier: M) -> DiscoveryService<S, M> {
        DiscoveryService {
            store: self.store,
            keywords: self.keywords,
            notifier: Some(Arc::new(notifier)),
        }
    }

    /// Keywords this service classifies with
    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    /// Process one text and persist it if it is an airdrop
    ///
    /// Returns `Ok(None)` for empty text and for text that does not classify;
    /// the two cases are deliberately indistinguishable. A store failure is an
    /// error. Notification happens after the record is persisted and its
    /// failure is only logged. Inside a tokio runtime the notifier runs on the
    /// blocking pool and this call does not wait for it; otherwise it runs
    /// inline before returning.
    pub fn process_tweet(
        &self,
        text: &str,
        source: &str,
        link: &str,
    ) -> Result<Option<AirdropRecord>, DiscoveryError>
    where
        N: Notifier + Send + Sync + 'static,
        N::Error: std::fmt::Display,
    {
        if text.is_empty() {
            warn!("Empty tweet text received, skipping processing");
            return Ok(None);
        }

        if !classify(text, &self.keywords.positive, &self.keywords.negative) {
            debug!("Tweet does not appear to be about an airdrop with tasks, skipping");
            return Ok(None);
        }

        let record = AirdropRecord::new(
            extract_title(text),
            source.to_string(),
            link.to_string(),
            extract_tasks(text, &self.keywords.positive),
            text.to_string(),
            now_secs(),
        );

        info!("Saving airdrop tweet: {}", record.title);
        let saved = {
            let mut store = self
                .store
                .lock()
                .map_err(|e| DiscoveryError::Store(format!("Store lock error: {}", e)))?;
            store
                .save(record)
                .map_err(|e| DiscoveryError::Store(e.to_string()))?
        };

        if let Some(notifier) = &self.notifier {
            dispatch_notification(Arc::clone(notifier), saved.clone());
        }

        Ok(Some(saved))
    }

    /// Stored records that satisfy the keyword rule
    ///
    /// With no positive keywords configured the legacy keyword set applies.
    pub fn filtered_airdrops(&self) -> Result<Vec<AirdropRecord>, DiscoveryError> {
        let keywords = self.keywords.effective_for_listing();
        let records = self.with_store(|store| store.find_all())?;

        Ok(records
            .into_iter()
            .filter(|r| classify(&r.raw_text, &keywords.positive, &keywords.negative))
            .collect())
    }

    /// Stored records whose raw text contains `keyword`
    pub fn search_by_keyword(&self, keyword: &str) -> Result<Vec<AirdropRecord>, DiscoveryError> {
        self.with_store(|store| store.find_by_keyword(keyword))
    }

    /// Number of stored records
    pub fn record_count(&self) -> Result<usize, DiscoveryError> {
        self.with_store(|store| store.count())
    }

    fn with_store<T>(
        &self,
        f: impl FnOnce(&S) -> Result<T, S::Error>,
    ) -> Result<T, DiscoveryError> {
        let store = self
            .store
            .lock()
            .map_err(|e| DiscoveryError::Store(format!("Store lock error: {}", e)))?;
        f(&store).map_err(|e| DiscoveryError::Store(e.to_string()))
    }
}

/// Fire-and-forget delivery; errors are logged, never returned
fn dispatch_notification<N>(notifier: Arc<N>, record: AirdropRecord)
where
    N: Notifier + Send + Sync + 'static,
    N::Error: std::fmt::Display,
{
    let send = move || {
        if let Err(e) = notifier.notify(&record) {
            warn!("Webhook notification failed for '{}': {}", record.title, e);
        }
    };

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(send);
        }
        Err(_) => send(),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
