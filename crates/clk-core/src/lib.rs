//! Entry store and query engine for the `clk` time-tracking ledger.
//!
//! Entries are time intervals keyed by their start timestamp in an ordered
//! key-value namespace. This crate owns:
//! - the key codec (`time!` keys, stamps, range bounds)
//! - the date resolver (absolute, fuzzy, and relative expressions)
//! - entry CRUD with boundary-safe renames
//! - the streaming query engine and day-bucketed aggregation
//!
//! Persistence is abstracted behind [`OrderedStore`]; see `clk-store` for
//! the SQLite implementation and [`MemoryStore`] for an in-memory one.

pub mod date;
pub mod entry;
pub mod error;
pub mod key;
pub mod kv;
pub mod query;
pub mod store;

pub use entry::{Entry, Fields, RESERVED_FIELDS, Stamp, format_elapsed};
pub use error::{Error, StorageError};
pub use kv::{BatchOp, MemoryStore, OrderedStore, ScanIter, ScanRange};
pub use query::{EntryStream, Filter};
pub use store::{EntryStore, Update};
