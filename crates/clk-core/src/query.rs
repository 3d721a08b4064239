//! Streaming queries and day-bucketed aggregation.
//!
//! Reads flow through one range scan per query: raw pairs are lazily
//! reconstructed into entries, filter predicates are applied, and the
//! aggregator splits each interval at local midnights so multi-day
//! entries land exactly in their calendar-day buckets.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};
use serde_json::Value;

use crate::date;
use crate::entry::Entry;
use crate::error::{Error, StorageError};
use crate::key;
use crate::kv::{OrderedStore, ScanRange};
use crate::store::EntryStore;

/// Entry filter: date bounds on start plus composable predicates.
///
/// Predicates combine by logical AND, so type equality, pattern matching,
/// and custom tests can be layered without the engine knowing their
/// specifics. Archived entries are excluded unless explicitly included.
#[derive(Default)]
pub struct Filter {
    gt: Option<String>,
    lt: Option<String>,
    include_archived: bool,
    tests: Vec<Box<dyn Fn(&Entry) -> bool>>,
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("gt", &self.gt)
            .field("lt", &self.lt)
            .field("include_archived", &self.include_archived)
            .field("tests", &self.tests.len())
            .finish()
    }
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only entries starting strictly after this expression.
    #[must_use]
    pub fn since(mut self, expr: impl Into<String>) -> Self {
        self.gt = Some(expr.into());
        self
    }

    /// Only entries starting strictly before this expression.
    #[must_use]
    pub fn until(mut self, expr: impl Into<String>) -> Self {
        self.lt = Some(expr.into());
        self
    }

    /// Include entries flagged as archived.
    #[must_use]
    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Only entries whose type equals `type_name`.
    #[must_use]
    pub fn with_type(self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        self.test(move |entry| entry.type_name() == Some(type_name.as_str()))
    }

    /// Adds an arbitrary predicate, ANDed with the existing ones.
    #[must_use]
    pub fn test(mut self, test: impl Fn(&Entry) -> bool + 'static) -> Self {
        self.tests.push(Box::new(test));
        self
    }

    fn matches(&self, entry: &Entry) -> bool {
        if !self.include_archived && entry.is_archived() {
            return false;
        }
        self.tests.iter().all(|test| test(entry))
    }

    /// Resolves the date bounds into a storage key range.
    fn key_range(&self) -> Result<ScanRange, Error> {
        let gt = self.gt.as_deref().map(date::resolve_expr).transpose()?;
        let lt = self.lt.as_deref().map(date::resolve_expr).transpose()?;
        let (gt, lt) = key::range_bounds(gt.as_ref(), lt.as_ref());
        Ok(ScanRange {
            gt,
            lt,
            limit: None,
            reverse: false,
        })
    }
}

/// Lazy sequence of filtered entries, ascending by start.
///
/// One pass per range scan; dropping the stream aborts the scan.
pub struct EntryStream<'a> {
    scan: Box<dyn Iterator<Item = Result<(String, Value), StorageError>> + 'a>,
    filter: &'a Filter,
}

impl Iterator for EntryStream<'_> {
    type Item = Result<Entry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.scan.next()? {
                Ok((pkey, value)) => match Entry::from_record(&pkey, value) {
                    Ok(entry) => entry,
                    Err(err) => return Some(Err(err.into())),
                },
                Err(err) => return Some(Err(err.into())),
            };
            if self.filter.matches(&entry) {
                return Some(Ok(entry));
            }
        }
    }
}

impl<S: OrderedStore> EntryStore<S> {
    /// Streams filtered entries without materializing the whole store.
    pub fn stream<'a>(&'a self, filter: &'a Filter) -> Result<EntryStream<'a>, Error> {
        let range = filter.key_range()?;
        Ok(EntryStream {
            scan: self.backend().scan(&range),
            filter,
        })
    }

    /// Eagerly drains [`EntryStore::stream`].
    pub fn collect(&self, filter: &Filter) -> Result<Vec<Entry>, Error> {
        self.stream(filter)?.collect()
    }

    /// The latest entry matching the filter, or `None`.
    ///
    /// Scans newest-first, so it stops at the first match instead of
    /// walking the whole range.
    pub fn most_recent_matching(&self, filter: &Filter) -> Result<Option<Entry>, Error> {
        let mut range = filter.key_range()?;
        range.reverse = true;
        let mut stream = EntryStream {
            scan: self.backend().scan(&range),
            filter,
        };
        stream.next().transpose()
    }

    /// Total elapsed seconds per local calendar day.
    ///
    /// Each matched interval is split at midnight boundaries; an entry
    /// spanning several days contributes its exact share to each of them.
    pub fn aggregate_by_day(&self, filter: &Filter) -> Result<BTreeMap<NaiveDate, i64>, Error> {
        let mut buckets = BTreeMap::new();
        for entry in self.stream(filter)? {
            split_by_day(&entry?, &mut buckets);
        }
        Ok(buckets)
    }
}

/// Attributes an entry's seconds to calendar days, splitting at local
/// midnights. Negative elapsed is clamped; a zero-length interval still
/// touches its start day.
fn split_by_day(entry: &Entry, buckets: &mut BTreeMap<NaiveDate, i64>) {
    let mut remaining = entry.elapsed.max(0);
    let mut cursor = entry.start;
    loop {
        let day = cursor.date_naive();
        let midnight = next_local_midnight(day);
        let chunk = remaining.min((midnight - cursor).num_seconds());
        *buckets.entry(day).or_insert(0) += chunk;
        remaining -= chunk;
        if remaining <= 0 {
            break;
        }
        cursor = midnight;
    }
}

fn next_local_midnight(day: NaiveDate) -> DateTime<Local> {
    date::from_local((day + Duration::days(1)).and_time(NaiveTime::MIN))
}
