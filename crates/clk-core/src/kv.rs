//! Ordered key-value store interface.
//!
//! The entry store talks to persistence exclusively through
//! [`OrderedStore`]: point lookups, atomic multi-op batches, and lazy
//! ordered range scans. Scans are pull-based iterators; dropping one
//! aborts the underlying scan, so consumers that stop early never force
//! the whole range to materialize.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde_json::Value;

use crate::error::StorageError;

/// One operation in an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    Put { key: String, value: Value },
    Delete { key: String },
}

impl BatchOp {
    pub fn put(key: impl Into<String>, value: Value) -> Self {
        Self::Put {
            key: key.into(),
            value,
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete { key: key.into() }
    }
}

/// Exclusive key range for a scan, `(gt, lt)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRange {
    pub gt: String,
    pub lt: String,
    /// Stop after this many pairs.
    pub limit: Option<usize>,
    /// Iterate descending instead of ascending.
    pub reverse: bool,
}

/// Lazy sequence of key-value pairs; one pass per range scan.
pub type ScanIter<'a> = Box<dyn Iterator<Item = Result<(String, Value), StorageError>> + 'a>;

/// The persistence contract the entry store requires.
pub trait OrderedStore {
    /// Point lookup.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Inserts or replaces a single record.
    fn put(&mut self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Deletes a single record; deleting an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;

    /// Applies all operations as a single atomic batch.
    fn batch(&mut self, ops: Vec<BatchOp>) -> Result<(), StorageError>;

    /// Ordered range scan over `(range.gt, range.lt)`.
    fn scan<'a>(&'a self, range: &ScanRange) -> ScanIter<'a>;
}

/// `BTreeMap`-backed store. Useful for testing and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl OrderedStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.map.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.map.remove(key);
        Ok(())
    }

    fn batch(&mut self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        for op in ops {
            match op {
                BatchOp::Put { key, value } => {
                    self.map.insert(key, value);
                }
                BatchOp::Delete { key } => {
                    self.map.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn scan<'a>(&'a self, range: &ScanRange) -> ScanIter<'a> {
        // An inverted or empty range matches nothing.
        if range.gt >= range.lt {
            return Box::new(std::iter::empty());
        }
        let bounds = (
            Bound::Excluded(range.gt.clone()),
            Bound::Excluded(range.lt.clone()),
        );
        let mut pairs: Vec<(String, Value)> = self
            .map
            .range(bounds)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if range.reverse {
            pairs.reverse();
        }
        if let Some(limit) = range.limit {
            pairs.truncate(limit);
        }
        Box::new(pairs.into_iter().map(Ok))
    }
}
