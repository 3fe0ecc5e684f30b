//! Trait definitions for external interactions
//!
//! These traits define the boundaries between classification logic and
//! infrastructure. Implementations live in other crates.

use crate::{AirdropRecord, RecordId};

/// Trait for storing and retrieving airdrop records
///
/// Implemented by the infrastructure layer (airdrop-store)
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Persist a new record, returning it with its assigned identity
    fn save(&mut self, record: AirdropRecord) -> Result<AirdropRecord, Self::Error>;

    /// Get a record by ID
    fn get(&self, id: RecordId) -> Result<Option<AirdropRecord>, Self::Error>;

    /// All stored records, oldest first
    fn find_all(&self) -> Result<Vec<AirdropRecord>, Self::Error>;

    /// Records whose raw text contains `keyword` (case-insensitive substring)
    fn find_by_keyword(&self, keyword: &str) -> Result<Vec<AirdropRecord>, Self::Error>;

    /// Number of stored records
    fn count(&self) -> Result<usize, Self::Error>;
}

/// Trait for announcing newly detected airdrops
///
/// Notification is best-effort: callers log failures and carry on.
pub trait Notifier {
    /// Error type for notification attempts
    type Error;

    /// Announce a persisted record
    fn notify(&self, record: &AirdropRecord) -> Result<(), Self::Error>;
}
