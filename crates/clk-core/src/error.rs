//! Error taxonomy for the entry store and query engine.
//!
//! All failures are surfaced to the immediate caller; the core performs no
//! retries and never writes to a console or terminates the process.

use thiserror::Error;

use crate::entry::Stamp;

/// Failure in the underlying ordered key-value store.
///
/// Covers I/O failures as well as corrupt records (keys or values that no
/// longer parse). Not recoverable locally; surfaced as-is.
#[derive(Debug, Error)]
#[error("storage error: {message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Creates a storage error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a storage error wrapping an underlying backend error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Storage error for a record that no longer parses.
    pub fn corrupt(key: &str, detail: impl std::fmt::Display) -> Self {
        Self::new(format!("corrupt record at {key:?}: {detail}"))
    }
}

/// Errors raised by the entry store and query engine.
#[derive(Debug, Error)]
pub enum Error {
    /// An expression could not be parsed as a date at all.
    #[error("could not make sense of {expr:?} as a date")]
    InvalidDate { expr: String },

    /// An expression parsed, but to a date too far from the present to be
    /// intentional (fuzzy-parser misfire guard).
    #[error("expression {expr:?} was recognised as date {resolved:?} which does not seem to be correct")]
    ImplausibleDate { expr: String, resolved: String },

    /// An update attempted to set a reserved field through the generic path.
    #[error("reserved data key specified: {0}")]
    ReservedKey(String),

    /// Lookup or mutation targeted a key absent from the store.
    #[error("no entry found for id {id:?}")]
    NotFound { id: String },

    /// The store holds no entries at all and no id was given.
    #[error("empty store")]
    EmptyStore,

    /// A rename or add would overwrite an existing distinct entry.
    #[error("there is already another entry with stamp {0}; move, update, or delete it first")]
    Collision(Stamp),

    /// An explicit interval was given with its end before its start.
    #[error("start date {start:?} is greater than end date {end:?}")]
    Ordering { start: String, end: String },

    /// `move` targeted an entry that is still running.
    #[error("no end set for entry {0}; use `set start` to move an open entry")]
    OpenEntry(Stamp),

    /// Underlying store I/O failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
