//! Record module - the persisted unit produced by a positive classification

use std::fmt;

/// Unique identifier for a stored record based on UUIDv7
///
/// Assigned by the store on persist. UUIDv7 keeps identifiers sortable by
/// creation time, so "oldest first" listings can order by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use airdrop_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from its hyphenated UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use airdrop_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// let parsed = RecordId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since Unix epoch embedded in the UUIDv7
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// An airdrop announcement detected in a social-media text snippet
///
/// Records are created only from a positive classification and never change
/// afterwards, except for the identity a store assigns on persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirdropRecord {
    /// Store-assigned identity, `None` until persisted
    pub id: Option<RecordId>,

    /// First non-empty line of the text, truncated for display
    pub title: String,

    /// Provenance label supplied by the caller (e.g. "Twitter")
    pub source: String,

    /// Link to the original post
    pub link: String,

    /// Newline-joined action items, `None` when nothing was extracted
    pub tasks: Option<String>,

    /// The unmodified input text
    pub raw_text: String,

    /// Creation time (Unix seconds)
    pub created_at: u64,
}

impl AirdropRecord {
    /// Create a record that has not been persisted yet
    pub fn new(
        title: String,
        source: String,
        link: String,
        tasks: Option<String>,
        raw_text: String,
        created_at: u64,
    ) -> Self {
        Self {
            id: None,
            title,
            source,
            link,
            tasks,
            raw_text,
            created_at,
        }
    }

    /// Return this record with the given identity assigned
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether the store has assigned an identity yet
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
