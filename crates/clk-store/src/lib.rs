//! SQLite-backed ordered key-value store for the `clk` ledger.
//!
//! Implements [`clk_core::OrderedStore`] over a single `kv` table. Keys are
//! TEXT and compared with SQLite's default BYTE collation, so lexicographic
//! range scans match the ordering the key codec relies on.
//!
//! # Thread safety
//!
//! [`SqliteStore`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`: an instance can move between threads but needs external
//! synchronization to be shared. The ledger is single-user and
//! single-process, so this is not a practical constraint.
//!
//! # Scans
//!
//! Range scans are paged: each pull fetches at most [`PAGE_SIZE`] rows and
//! remembers the last key seen, so a consumer that stops early (or drops
//! the iterator) never forces the rest of the range through SQLite.

use std::collections::VecDeque;
use std::path::Path;

use rusqlite::{Connection, params};
use serde_json::Value;

use clk_core::{BatchOp, OrderedStore, ScanIter, ScanRange, StorageError};

/// Rows fetched per scan page.
const PAGE_SIZE: usize = 256;

/// SQLite-backed implementation of the ordered store interface.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens a store at the given path, creating it if necessary.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)
            .map_err(|err| StorageError::with_source("failed to open database", err))?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Opens an in-memory store, destroyed when dropped. Useful for testing.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|err| StorageError::with_source("failed to open in-memory database", err))?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Idempotent schema setup.
    fn init(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "
                PRAGMA journal_mode = WAL;
                CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                ",
            )
            .map_err(|err| StorageError::with_source("failed to initialize schema", err))
    }
}

fn sql_err(context: &'static str) -> impl Fn(rusqlite::Error) -> StorageError {
    move |err| StorageError::with_source(context, err)
}

impl OrderedStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(sql_err("failed to prepare lookup"))?;
        let mut rows = stmt
            .query(params![key])
            .map_err(sql_err("failed to run lookup"))?;
        match rows.next().map_err(sql_err("failed to read lookup row"))? {
            None => Ok(None),
            Some(row) => {
                let raw: String = row.get(0).map_err(sql_err("failed to decode row"))?;
                let value = serde_json::from_str(&raw)
                    .map_err(|err| StorageError::corrupt(key, err))?;
                Ok(Some(value))
            }
        }
    }

    fn put(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value.to_string()],
            )
            .map_err(sql_err("failed to write record"))?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(sql_err("failed to delete record"))?;
        Ok(())
    }

    fn batch(&mut self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        let tx = self
            .conn
            .transaction()
            .map_err(sql_err("failed to begin batch"))?;
        for op in &ops {
            match op {
                BatchOp::Put { key, value } => {
                    tx.execute(
                        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                        params![key, value.to_string()],
                    )
                    .map_err(sql_err("failed to write batch record"))?;
                }
                BatchOp::Delete { key } => {
                    tx.execute("DELETE FROM kv WHERE key = ?1", params![key])
                        .map_err(sql_err("failed to delete batch record"))?;
                }
            }
        }
        tx.commit().map_err(sql_err("failed to commit batch"))?;
        tracing::debug!(ops = ops.len(), "committed batch");
        Ok(())
    }

    fn scan<'a>(&'a self, range: &ScanRange) -> ScanIter<'a> {
        Box::new(PagedScan {
            conn: &self.conn,
            range: range.clone(),
            cursor: None,
            remaining: range.limit,
            buffer: VecDeque::new(),
            done: false,
        })
    }
}

/// Lazy, resumable range scan over the `kv` table.
struct PagedScan<'a> {
    conn: &'a Connection,
    range: ScanRange,
    /// Last key yielded; the next page starts strictly past it.
    cursor: Option<String>,
    remaining: Option<usize>,
    buffer: VecDeque<(String, String)>,
    done: bool,
}

impl PagedScan<'_> {
    fn fill_page(&mut self) -> Result<(), StorageError> {
        let page = self
            .remaining
            .map_or(PAGE_SIZE, |r| r.min(PAGE_SIZE));
        if page == 0 {
            self.done = true;
            return Ok(());
        }

        let (sql, lower, upper) = if self.range.reverse {
            (
                "SELECT key, value FROM kv WHERE key > ?1 AND key < ?2 ORDER BY key DESC LIMIT ?3",
                self.range.gt.clone(),
                self.cursor.clone().unwrap_or_else(|| self.range.lt.clone()),
            )
        } else {
            (
                "SELECT key, value FROM kv WHERE key > ?1 AND key < ?2 ORDER BY key ASC LIMIT ?3",
                self.cursor.clone().unwrap_or_else(|| self.range.gt.clone()),
                self.range.lt.clone(),
            )
        };

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(sql_err("failed to prepare scan"))?;
        let mut rows = stmt
            .query(params![lower, upper, i64::try_from(page).unwrap_or(i64::MAX)])
            .map_err(sql_err("failed to run scan"))?;

        let mut fetched = 0;
        while let Some(row) = rows.next().map_err(sql_err("failed to read scan row"))? {
            let key: String = row.get(0).map_err(sql_err("failed to decode scan row"))?;
            let value: String = row.get(1).map_err(sql_err("failed to decode scan row"))?;
            self.buffer.push_back((key, value));
            fetched += 1;
        }
        if fetched < page {
            self.done = true;
        }
        Ok(())
    }
}

impl Iterator for PagedScan<'_> {
    type Item = Result<(String, Value), StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            if self.done {
                return None;
            }
            if let Err(err) = self.fill_page() {
                self.done = true;
                self.buffer.clear();
                return Some(Err(err));
            }
        }
        let (key, raw) = self.buffer.pop_front()?;
        self.cursor = Some(key.clone());
        if let Some(remaining) = &mut self.remaining {
            *remaining -= 1;
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Some(Ok((key, value))),
            Err(err) => Some(Err(StorageError::corrupt(&key, err))),
        }
    }
}
