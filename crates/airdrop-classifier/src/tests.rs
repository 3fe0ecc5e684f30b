//! End-to-end tests for the discovery service

#[cfg(test)]
mod tests {
    use crate::{classify, extract_tasks, extract_title, DiscoveryService, WebhookNotifier};
    use airdrop_domain::{AirdropRecord, KeywordConfig, Notifier, RecordId, RecordStore};
    use airdrop_store::SqliteStore;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const SOURCE: &str = "Twitter";
    const LINK: &str = "https://twitter.com/test/status/123";

    /// Store that refuses every write
    struct FailingStore;

    impl RecordStore for FailingStore {
        type Error = String;

        fn save(&mut self, _record: AirdropRecord) -> Result<AirdropRecord, String> {
            Err("disk full".to_string())
        }
        fn get(&self, _id: RecordId) -> Result<Option<AirdropRecord>, String> {
            Ok(None)
        }
        fn find_all(&self) -> Result<Vec<AirdropRecord>, String> {
            Ok(Vec::new())
        }
        fn find_by_keyword(&self, _keyword: &str) -> Result<Vec<AirdropRecord>, String> {
            Ok(Vec::new())
        }
        fn count(&self) -> Result<usize, String> {
            Ok(0)
        }
    }

    /// Notifier that remembers what it was asked to announce
    #[derive(Clone, Default)]
    struct RecordingNotifier {
        seen: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Notifier for RecordingNotifier {
        type Error = String;

        fn notify(&self, record: &AirdropRecord) -> Result<(), String> {
            self.seen.lock().unwrap().push(record.title.clone());
            if self.fail {
                Err("webhook unreachable".to_string())
            } else {
                Ok(())
            }
        }
    }

    /// Notifier that blocks until released, standing in for a slow webhook
    #[derive(Clone)]
    struct GatedNotifier {
        release: Arc<Mutex<mpsc::Receiver<()>>>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl Notifier for GatedNotifier {
        type Error = String;

        fn notify(&self, record: &AirdropRecord) -> Result<(), String> {
            self.release
                .lock()
                .unwrap()
                .recv_timeout(Duration::from_secs(5))
                .map_err(|e| e.to_string())?;
            self.seen.lock().unwrap().push(record.title.clone());
            Ok(())
        }
    }

    fn service() -> DiscoveryService<SqliteStore> {
        let store = SqliteStore::new(":memory:").unwrap();
        DiscoveryService::new(store, KeywordConfig::legacy())
    }

    #[test]
    fn test_airdrop_is_saved() {
        let service = service();
        let text = "New airdrop! Follow us and claim your tokens.";

        let record = service.process_tweet(text, SOURCE, LINK).unwrap().unwrap();

        assert!(record.id.is_some());
        assert_eq!(record.title, text);
        assert_eq!(record.source, SOURCE);
        assert_eq!(record.link, LINK);
        assert_eq!(record.raw_text, text);
        assert!(record.created_at > 0);

        let tasks = record.tasks.unwrap();
        assert!(tasks.contains("- Follow us"));
        assert!(tasks.contains("- claim your tokens"));
        assert_eq!(service.record_count().unwrap(), 1);
    }

    #[test]
    fn test_exclusion_keyword_is_not_saved() {
        let service = service();
        let result = service
            .process_tweet("This airdrop has ended. No more claims accepted.", SOURCE, LINK)
            .unwrap();

        assert!(result.is_none());
        assert_eq!(service.record_count().unwrap(), 0);
    }

    #[test]
    fn test_no_airdrop_keyword_is_not_saved() {
        let service = service();
        let result = service
            .process_tweet("Just a regular tweet with no airdrop related keywords.", SOURCE, LINK)
            .unwrap();

        assert!(result.is_none());
        assert_eq!(service.record_count().unwrap(), 0);
    }

    #[test]
    fn test_empty_text_is_not_saved() {
        let service = service();
        assert!(service.process_tweet("", SOURCE, LINK).unwrap().is_none());
        assert_eq!(service.record_count().unwrap(), 0);
    }

    #[test]
    fn test_structured_list_wins_over_keywords() {
        let service = service();
        let text = "Zk season is here\n1. Follow @x\n2. Retweet\n3. Join Discord";

        let record = service.process_tweet(text, SOURCE, LINK).unwrap().unwrap();

        assert_eq!(record.title, "Zk season is here");
        assert_eq!(
            record.tasks.as_deref(),
            Some("- Follow @x\n- Retweet\n- Join Discord")
        );
    }

    #[test]
    fn test_store_failure_is_an_error() {
        let service = DiscoveryService::new(FailingStore, KeywordConfig::legacy());
        let result = service.process_tweet("mint now", SOURCE, LINK);
        assert!(result.is_err());
    }

    #[test]
    fn test_store_failure_skips_notification() {
        let notifier = RecordingNotifier::default();
        let service = DiscoveryService::new(FailingStore, KeywordConfig::legacy())
            .with_notifier(notifier.clone());

        assert!(service.process_tweet("mint now", SOURCE, LINK).is_err());
        assert!(notifier.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_notifier_called_after_save() {
        let notifier = RecordingNotifier::default();
        let service = service().with_notifier(notifier.clone());

        service.process_tweet("Galxe quest open", SOURCE, LINK).unwrap().unwrap();
        service.process_tweet("nothing here", SOURCE, LINK).unwrap();

        assert_eq!(*notifier.seen.lock().unwrap(), vec!["Galxe quest open".to_string()]);
    }

    #[test]
    fn test_notifier_failure_keeps_record() {
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let service = service().with_notifier(notifier.clone());

        let record = service.process_tweet("Claim window open", SOURCE, LINK).unwrap();

        assert!(record.is_some());
        assert_eq!(service.record_count().unwrap(), 1);
        assert_eq!(notifier.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_notification_does_not_block_ingestion() {
        let (release, gate) = mpsc::channel();
        let notifier = GatedNotifier {
            release: Arc::new(Mutex::new(gate)),
            seen: Arc::default(),
        };
        let service = service().with_notifier(notifier.clone());

        let record = service.process_tweet("Galxe quest open", SOURCE, LINK).unwrap();

        assert!(record.is_some());
        assert_eq!(service.record_count().unwrap(), 1);
        assert!(notifier.seen.lock().unwrap().is_empty());

        release.send(()).unwrap();
        for _ in 0..200 {
            if !notifier.seen.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(*notifier.seen.lock().unwrap(), vec!["Galxe quest open".to_string()]);
    }

    #[test]
    fn test_webhook_notifier_integration() {
        let service = service().with_notifier(WebhookNotifier::new("https://hooks.example.com"));
        let record = service.process_tweet("mint is live", SOURCE, LINK).unwrap();
        assert!(record.is_some());
    }

    #[test]
    fn test_filtered_uses_configured_keywords() {
        let keywords = KeywordConfig::new(vec!["testnet".into(), "mint".into()], vec!["rug".into()]);
        let service = DiscoveryService::new(SqliteStore::new(":memory:").unwrap(), keywords);

        service.process_tweet("Testnet rewards", SOURCE, LINK).unwrap().unwrap();
        service.process_tweet("mint the pass", SOURCE, LINK).unwrap().unwrap();
        service.process_tweet("Unrelated", SOURCE, LINK).unwrap();

        let filtered = service.filtered_airdrops().unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "Testnet rewards");
        assert_eq!(filtered[1].title, "mint the pass");
    }

    #[test]
    fn test_filtered_falls_back_to_legacy_keywords() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        for text in ["follow for rewards", "plain text", "claim is a scam"] {
            store
                .save(AirdropRecord::new(
                    extract_title(text),
                    SOURCE.to_string(),
                    LINK.to_string(),
                    None,
                    text.to_string(),
                    1,
                ))
                .unwrap();
        }

        let service = DiscoveryService::new(store, KeywordConfig::new(vec![], vec![]));
        let filtered = service.filtered_airdrops().unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].raw_text, "follow for rewards");
    }

    #[test]
    fn test_search_by_keyword_ignores_classification() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        for text in ["Bridge to ZkSync", "zk scam alert", "nothing"] {
            store
                .save(AirdropRecord::new(
                    text.to_string(),
                    SOURCE.to_string(),
                    LINK.to_string(),
                    None,
                    text.to_string(),
                    1,
                ))
                .unwrap();
        }

        let service = DiscoveryService::new(store, KeywordConfig::legacy());
        let found = service.search_by_keyword("ZK").unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let keywords = KeywordConfig::legacy();
        let text = "Mint is open. Follow @a and claim before Friday.";

        assert_eq!(extract_title(text), extract_title(text));
        assert_eq!(
            extract_tasks(text, &keywords.positive),
            extract_tasks(text, &keywords.positive)
        );
        assert_eq!(
            classify(text, &keywords.positive, &keywords.negative),
            classify(text, &keywords.positive, &keywords.negative)
        );
    }
}

#[cfg(test)]
mod proptests {
    use crate::{classify, extract_tasks, extract_title, TITLE_MAX_CHARS};
    use proptest::prelude::*;

    fn keyword() -> impl Strategy<Value = String> {
        "[a-z]{1,6}"
    }

    proptest! {
        /// classify agrees with the positive-OR / negative-NOR rule
        #[test]
        fn test_classify_matches_rule(
            text in "[a-zA-Z \n]{0,80}",
            positive in prop::collection::vec(keyword(), 0..4),
            negative in prop::collection::vec(keyword(), 0..3),
        ) {
            let lower = text.to_lowercase();
            let expected = !text.is_empty()
                && positive.iter().any(|k| lower.contains(k.as_str()))
                && !negative.iter().any(|k| lower.contains(k.as_str()));

            prop_assert_eq!(classify(&text, &positive, &negative), expected);
        }

        /// Keyword order never changes the decision
        #[test]
        fn test_classify_order_independent(
            text in "[a-z ]{0,60}",
            positive in prop::collection::vec(keyword(), 0..5),
            negative in prop::collection::vec(keyword(), 0..3),
        ) {
            let mut reversed = positive.clone();
            reversed.reverse();
            prop_assert_eq!(
                classify(&text, &reversed, &negative),
                classify(&text, &positive, &negative)
            );
        }

        /// Titles are non-empty and bounded
        #[test]
        fn test_title_bounds(text in "\\PC{1,300}") {
            let title = extract_title(&text);
            prop_assert!(!title.is_empty());
            prop_assert!(title.chars().count() <= TITLE_MAX_CHARS + 3);
        }

        /// Every extracted task line carries the dash marker
        #[test]
        fn test_tasks_shape(
            text in "[a-z0-9 .*\n-]{0,200}",
            keywords in prop::collection::vec(keyword(), 0..4),
        ) {
            if let Some(tasks) = extract_tasks(&text, &keywords) {
                prop_assert!(!tasks.is_empty());
                prop_assert!(!tasks.ends_with('\n'));
                for line in tasks.lines() {
                    prop_assert!(line.starts_with("- ") || line == "-");
                }
            }
        }
    }
}
