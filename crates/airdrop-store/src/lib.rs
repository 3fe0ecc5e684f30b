//! Airdrop Storage Layer
//!
//! Implements the RecordStore trait on SQLite.
//!
//! # Examples
//!
//! ```no_run
//! use airdrop_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

use airdrop_domain::{AirdropRecord, RecordId, RecordStore};
use rusqlite::{functions::FunctionFlags, params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// SQL function lowercasing text with Unicode case rules
///
/// SQLite's built-in `LOWER()` only folds ASCII letters.
const UNICODE_LOWER_FN: &str = "unicode_lower";

/// Table used when none is configured
pub const DEFAULT_TABLE_NAME: &str = "airdrop_tweets";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Table name is not a plain SQL identifier
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}

/// SQLite-based implementation of RecordStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store across threads
/// behind a mutex, or give each thread its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
    table: String,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use airdrop_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("airdrops.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::with_table(path, DEFAULT_TABLE_NAME)
    }

    /// Create a store that keeps its records in `table`
    pub fn with_table<P: AsRef<Path>>(path: P, table: &str) -> Result<Self, StoreError> {
        validate_table_name(table)?;
        let conn = Connection::open(path)?;
        register_functions(&conn)?;
        let mut store = Self {
            conn,
            table: table.to_string(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Name of the backing table
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql").replace("{table}", &self.table);
        self.conn.execute_batch(&schema)?;
        Ok(())
    }

    fn select_sql(&self, filter: &str) -> String {
        format!(
            "SELECT id, title, source, link, tasks, raw_text, created_at FROM {} {} \
             ORDER BY created_at, rowid",
            self.table, filter
        )
    }

    /// Convert RecordId to bytes for storage
    fn record_id_to_bytes(id: RecordId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to RecordId
    fn bytes_to_record_id(bytes: &[u8]) -> Result<RecordId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for RecordId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(RecordId::from_value(u128::from_be_bytes(arr)))
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<AirdropRecord> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_record_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        Ok(AirdropRecord {
            id: Some(id),
            title: row.get(1)?,
            source: row.get(2)?,
            link: row.get(3)?,
            tasks: row.get(4)?,
            raw_text: row.get(5)?,
            created_at: row.get::<_, i64>(6)? as u64,
        })
    }
}

impl RecordStore for SqliteStore {
    type Error = StoreError;

    fn save(&mut self, record: AirdropRecord) -> Result<AirdropRecord, Self::Error> {
        // Records are never updated; every save is a fresh row.
        let record = record.with_id(RecordId::new());
        let id = record.id.map(Self::record_id_to_bytes);

        self.conn.execute(
            &format!(
                "INSERT INTO {} (id, title, source, link, tasks, raw_text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                self.table
            ),
            params![
                id,
                &record.title,
                &record.source,
                &record.link,
                &record.tasks,
                &record.raw_text,
                record.created_at as i64,
            ],
        )?;

        debug!("Stored record {:?} in {}", record.id, self.table);
        Ok(record)
    }

    fn get(&self, id: RecordId) -> Result<Option<AirdropRecord>, Self::Error> {
        let record = self
            .conn
            .query_row(
                &self.select_sql("WHERE id = ?1"),
                params![Self::record_id_to_bytes(id)],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    fn find_all(&self) -> Result<Vec<AirdropRecord>, Self::Error> {
        let mut stmt = self.conn.prepare(&self.select_sql(""))?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn find_by_keyword(&self, keyword: &str) -> Result<Vec<AirdropRecord>, Self::Error> {
        let mut stmt = self.conn.prepare(&self.select_sql(&format!(
            "WHERE instr({f}(raw_text), {f}(?1)) > 0",
            f = UNICODE_LOWER_FN
        )))?;
        let records = stmt
            .query_map(params![keyword], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

/// Check that `table` is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`)
///
/// Table names are interpolated into SQL, so nothing else is accepted.
pub fn validate_table_name(table: &str) -> Result<(), StoreError> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(table.to_string()))
    }
}

fn register_functions(conn: &Connection) -> Result<(), StoreError> {
    conn.create_scalar_function(
        UNICODE_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
    )?;
    Ok(())
}
