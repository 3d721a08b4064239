//! Key codec: mapping between an entry's identity and its storage key.
//!
//! Primary records live under `"time!" + "%Y-%m-%d %H:%M:%S"` (local time,
//! second precision). The zero-padded, fixed-width format makes
//! lexicographic key order match chronological order, so range scans over
//! the ordered store enumerate entries by start time.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::date;
use crate::entry::Stamp;
use crate::error::StorageError;

/// Prefix of every primary entry record.
pub const KEY_PREFIX: &str = "time!";

/// Prefix of the secondary type-index stubs.
pub const TYPE_KEY_PREFIX: &str = "time-type!";

/// Second-precision local datetime format embedded in keys and `end` fields.
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Key produced for the literal identifier `"NaN"`.
///
/// It can never collide with an encoded timestamp, so every lookup through
/// it reports not-found. Kept as a defined probe for compatibility with the
/// original ledger format.
pub const NAN_KEY: &str = "time!NaN";

/// Upper bound for full-range scans; `~` sorts after every character used
/// in formatted timestamps.
const RANGE_END: &str = "~";

/// Formats a date as its primary storage key.
pub fn encode_key(date: &DateTime<Local>) -> String {
    format!("{KEY_PREFIX}{}", date.format(TIME_FORMAT))
}

/// Parses the local datetime embedded in a primary key.
///
/// Fails with a [`StorageError`] since a malformed key can only come from a
/// corrupt store.
pub fn datetime_from_key(key: &str) -> Result<DateTime<Local>, StorageError> {
    let raw = key
        .strip_prefix(KEY_PREFIX)
        .ok_or_else(|| StorageError::corrupt(key, "missing `time!` prefix"))?;
    let naive = NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|err| StorageError::corrupt(key, err))?;
    Ok(date::from_local(naive))
}

/// Strips the prefix and floors the embedded timestamp to whole seconds.
pub fn stamp_from_key(key: &str) -> Result<Stamp, StorageError> {
    datetime_from_key(key).map(|date| date.timestamp())
}

/// Key for a stamp, when the stamp maps to a representable instant.
pub fn key_from_stamp(stamp: Stamp) -> Option<String> {
    DateTime::from_timestamp(stamp, 0).map(|utc| encode_key(&utc.with_timezone(&Local)))
}

/// Resolves a user-supplied identifier to a storage key.
///
/// All-digit strings are interpreted as Unix epoch seconds; the literal
/// `"NaN"` maps to [`NAN_KEY`]; anything else is prefixed verbatim, which
/// allows direct lookup by an explicit local datetime string.
pub fn identifier_key(id: &str) -> String {
    if id == "NaN" {
        return NAN_KEY.to_string();
    }
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(key) = id.parse::<Stamp>().ok().and_then(key_from_stamp) {
            return key;
        }
    }
    format!("{KEY_PREFIX}{id}")
}

/// Half-open key range covering entries whose start lies in `(gt, lt)`.
///
/// Missing bounds widen to the whole `time!` namespace.
pub fn range_bounds(gt: Option<&DateTime<Local>>, lt: Option<&DateTime<Local>>) -> (String, String) {
    let lower = gt.map_or_else(String::new, |d| d.format(TIME_FORMAT).to_string());
    let upper = lt.map_or_else(|| RANGE_END.to_string(), |d| d.format(TIME_FORMAT).to_string());
    (format!("{KEY_PREFIX}{lower}"), format!("{KEY_PREFIX}{upper}"))
}

/// Key of the secondary type-index stub written alongside a typed entry.
pub fn type_key(type_name: &str, date: &DateTime<Local>) -> String {
    format!("{TYPE_KEY_PREFIX}{type_name}!{}", date.format(TIME_FORMAT))
}
