//! Airdrop Discovery Domain Layer
//!
//! This crate contains the domain model shared by every other crate in the
//! workspace. It performs no I/O and defines the value objects and trait
//! interfaces that the classifier, the store and the HTTP layer depend upon.
//!
//! ## Key Concepts
//!
//! - **AirdropRecord**: a positively classified text snippet with its derived
//!   title and task list
//! - **RecordId**: store-assigned, chronologically sortable identity
//! - **KeywordConfig**: positive/negative trigger words driving classification
//!
//! ## Architecture
//!
//! - Pure domain types only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions (storage, notification)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keywords;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use keywords::KeywordConfig;
pub use record::{AirdropRecord, RecordId};
pub use traits::{Notifier, RecordStore};
