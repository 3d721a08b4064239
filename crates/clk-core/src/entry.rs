//! Entry model: one recorded time interval with associated metadata.

use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::{Map, Value};

use crate::date;
use crate::error::{Error, StorageError};
use crate::key::{self, TIME_FORMAT};

/// Unix epoch seconds derived from an entry's start key; the entry's
/// externally visible identifier.
pub type Stamp = i64;

/// Open mapping of entry metadata (type, message, archive flag, custom
/// properties). Never contains the reserved boundary fields.
pub type Fields = Map<String, Value>;

/// Field names that may never be set through the generic update path;
/// boundary mutation has dedicated operations instead.
pub const RESERVED_FIELDS: [&str; 2] = ["start", "end"];

/// One recorded time interval.
///
/// `end == None` means the entry is open (still running); `elapsed` is
/// derived against `end` or, for open entries, the moment the record was
/// read.
#[derive(Debug, Clone)]
pub struct Entry {
    /// External identifier, derived from `key`.
    pub stamp: Stamp,
    /// Canonical storage key, derived from the start timestamp.
    pub key: String,
    /// Start of the interval (implicit in `key`).
    pub start: DateTime<Local>,
    /// End of the interval; `None` while running.
    pub end: Option<DateTime<Local>>,
    /// Metadata, with the stored `end` field already stripped.
    pub data: Fields,
    /// Whole seconds between `start` and `end`-or-now.
    pub elapsed: i64,
}

impl Entry {
    /// Reconstructs an entry from a raw key-value record.
    pub(crate) fn from_record(key: &str, value: Value) -> Result<Self, StorageError> {
        let start = key::datetime_from_key(key)?;
        let Value::Object(mut data) = value else {
            return Err(StorageError::corrupt(key, "value is not an object"));
        };
        let end = match data.remove("end") {
            None => None,
            Some(Value::String(raw)) => {
                let naive = NaiveDateTime::parse_from_str(&raw, TIME_FORMAT)
                    .map_err(|err| StorageError::corrupt(key, err))?;
                Some(date::from_local(naive))
            }
            Some(other) => {
                return Err(StorageError::corrupt(
                    key,
                    format!("end is not a datetime string: {other}"),
                ));
            }
        };
        let elapsed = (end.unwrap_or_else(Local::now) - start).num_seconds();
        Ok(Self {
            stamp: start.timestamp(),
            key: key.to_string(),
            start,
            end,
            data,
            elapsed,
        })
    }

    /// Whether the entry is still running.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whether the entry carries a truthy `archive` flag.
    pub fn is_archived(&self) -> bool {
        matches!(self.data.get("archive"), Some(Value::Bool(true)))
    }

    /// The entry's free-form type, if set.
    pub fn type_name(&self) -> Option<&str> {
        self.data.get("type").and_then(Value::as_str)
    }

    /// The entry's message, if set.
    pub fn message(&self) -> Option<&str> {
        self.data.get("message").and_then(Value::as_str)
    }
}

/// Formats elapsed seconds as `HH:MM:SS` (hours padded, not capped at 24).
pub fn format_elapsed(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, s / 60 % 60, s % 60)
}

/// Rejects field maps containing reserved boundary keys.
pub(crate) fn validate_fields(fields: &Fields) -> Result<(), Error> {
    for field in fields.keys() {
        if RESERVED_FIELDS.contains(&field.as_str()) {
            return Err(Error::ReservedKey(field.clone()));
        }
    }
    Ok(())
}
