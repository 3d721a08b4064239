//! Entry CRUD and boundary-safe mutation over an ordered store.
//!
//! Every operation takes an optional identifier; when it is omitted the
//! operation targets the most recent entry (an explicit reverse scan, not
//! hidden global state). Boundary changes (`start`, `end`) go through
//! dedicated paths that re-validate the no-collision invariant and apply
//! renames as a single atomic batch.

use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::Value;

use crate::date;
use crate::entry::{self, Entry, Fields, Stamp};
use crate::error::Error;
use crate::key::{self, TIME_FORMAT};
use crate::kv::{BatchOp, OrderedStore, ScanRange};

/// A named update map for [`EntryStore::set`].
///
/// `start`/`begin` and `end`/`stop` are boundary updates with dedicated
/// semantics; any other name is a plain field assignment, and a
/// `Value::Null` removes the field instead of storing it.
#[derive(Debug, Clone, Default)]
pub struct Update {
    pub(crate) fields: Fields,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a field (or a boundary, for the special names).
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Removes a field from the entry.
    #[must_use]
    pub fn unset(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), Value::Null);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// CRUD operations over time entries in an [`OrderedStore`].
pub struct EntryStore<S> {
    store: S,
}

impl<S: OrderedStore> EntryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consumes the wrapper, returning the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    pub(crate) fn backend(&self) -> &S {
        &self.store
    }

    /// Creates a new open entry and returns its stamp.
    ///
    /// `at` defaults to now and accepts any resolvable date expression.
    /// Fails with [`Error::Collision`] if an entry already starts at the
    /// same second.
    pub fn start(&mut self, data: &Fields, at: Option<&str>) -> Result<Stamp, Error> {
        entry::validate_fields(data)?;
        let start = date::resolve(at)?;
        let pkey = key::encode_key(&start);
        if self.store.get(&pkey)?.is_some() {
            return Err(Error::Collision(key::stamp_from_key(&pkey)?));
        }
        self.put_new(&pkey, &start, data.clone())
    }

    /// Sets the target entry's end to now, merging any extra data first.
    ///
    /// Messages concatenate with a newline rather than overwriting.
    /// Re-stopping an already-stopped entry simply updates its end again.
    pub fn stop(&mut self, id: Option<&str>, data: Option<&Fields>) -> Result<(), Error> {
        let (pkey, mut record) = self.fetch_record(id)?;
        if let Some(update) = data {
            merge_fields(&mut record, update)?;
        }
        let end = Local::now().format(TIME_FORMAT).to_string();
        record.insert("end".to_string(), Value::String(end));
        self.store.put(&pkey, &Value::Object(record))?;
        tracing::debug!(key = %pkey, "stopped entry");
        Ok(())
    }

    /// Starts a fresh entry copying the target's data but not its timing.
    pub fn restart(&mut self, id: Option<&str>) -> Result<Stamp, Error> {
        let entry = self.get(id)?;
        self.start(&entry.data, None)
    }

    /// `"stopped"`, or `"elapsed time: HH:MM:SS"` for a running entry.
    ///
    /// An empty store reads as stopped rather than erroring.
    pub fn status(&self, id: Option<&str>) -> Result<String, Error> {
        let entry = match self.get(id) {
            Ok(entry) => entry,
            Err(Error::EmptyStore) => return Ok("stopped".to_string()),
            Err(err) => return Err(err),
        };
        if entry.is_open() {
            Ok(format!(
                "elapsed time: {}",
                entry::format_elapsed(entry.elapsed)
            ))
        } else {
            Ok("stopped".to_string())
        }
    }

    /// Fetches an entry; the most recent one when `id` is omitted.
    pub fn get(&self, id: Option<&str>) -> Result<Entry, Error> {
        let (pkey, record) = self.fetch_record(id)?;
        Entry::from_record(&pkey, Value::Object(record)).map_err(Into::into)
    }

    /// The entry with the latest start, or [`Error::EmptyStore`].
    pub fn most_recent(&self) -> Result<Entry, Error> {
        self.get(None)
    }

    /// Applies a named update map; returns the (possibly new) stamp.
    ///
    /// A `start`/`begin` update renames the entry: the new key is
    /// re-validated against collisions and the delete+insert happens as a
    /// single atomic batch, so the rename fully succeeds or leaves the
    /// store untouched.
    pub fn set(&mut self, id: Option<&str>, update: &Update) -> Result<Stamp, Error> {
        let (old_key, mut record) = self.fetch_record(id)?;
        let old_start = key::datetime_from_key(&old_key)?;
        let old_type = record.get("type").and_then(Value::as_str).map(str::to_string);

        let mut fields = update.fields.clone();
        // Consume both synonyms so neither leaks into the data map; the
        // primary name wins when both are given.
        let start_value = match (fields.remove("start"), fields.remove("begin")) {
            (Some(value), _) | (None, Some(value)) => Some(value),
            (None, None) => None,
        };
        let end_value = match (fields.remove("end"), fields.remove("stop")) {
            (Some(value), _) | (None, Some(value)) => Some(value),
            (None, None) => None,
        };

        for (field, value) in fields {
            if value.is_null() {
                record.remove(&field);
            } else {
                record.insert(field, value);
            }
        }

        let new_start = match start_value {
            Some(value) => Some(date::update_date(&old_start, expr_str(&value)?)?),
            None => None,
        };

        if let Some(value) = end_value {
            let expr = expr_str(&value)?;
            let fallback = stored_end(&record).unwrap_or(old_start);
            let end = date::update_date(&fallback, expr)?;
            let start = new_start.unwrap_or(old_start);
            if end < start {
                return Err(Error::Ordering {
                    start: start.format(TIME_FORMAT).to_string(),
                    end: expr.to_string(),
                });
            }
            record.insert(
                "end".to_string(),
                Value::String(end.format(TIME_FORMAT).to_string()),
            );
        }

        // A retained end must not precede a new start.
        if let Some(start) = new_start {
            if let Some(end) = stored_end(&record) {
                if end < start {
                    return Err(Error::Ordering {
                        start: start.format(TIME_FORMAT).to_string(),
                        end: end.format(TIME_FORMAT).to_string(),
                    });
                }
            }
        }

        let start = new_start.unwrap_or(old_start);
        let new_key = key::encode_key(&start);
        if new_key != old_key && self.store.get(&new_key)?.is_some() {
            return Err(Error::Collision(key::stamp_from_key(&new_key)?));
        }

        let new_type = record.get("type").and_then(Value::as_str).map(str::to_string);
        let mut ops = Vec::with_capacity(4);
        if new_key != old_key {
            ops.push(BatchOp::delete(old_key.clone()));
        }
        // The type stub tracks both the entry's key and its current type.
        if new_key != old_key || old_type != new_type {
            if let Some(old_type) = &old_type {
                ops.push(BatchOp::delete(key::type_key(old_type, &old_start)));
            }
            if let Some(new_type) = &new_type {
                ops.push(BatchOp::put(key::type_key(new_type, &start), Value::from(0)));
            }
        }
        ops.push(BatchOp::put(new_key.clone(), Value::Object(record)));
        self.store.batch(ops)?;
        if new_key != old_key {
            tracing::debug!(from = %old_key, to = %new_key, "renamed entry");
        }
        key::stamp_from_key(&new_key).map_err(Into::into)
    }

    /// Renames the entry's start, shifting its end by the same delta so
    /// the elapsed duration is preserved.
    ///
    /// Open entries cannot be moved safely; use `set start` for those.
    pub fn move_entry(&mut self, id: Option<&str>, to: &str) -> Result<Stamp, Error> {
        let entry = self.get(id)?;
        let Some(end) = entry.end else {
            return Err(Error::OpenEntry(entry.stamp));
        };
        let new_start = date::update_date(&entry.start, to)?;
        let new_end = new_start + (end - entry.start);
        let update = Update::new()
            .field(
                "start",
                Value::String(new_start.format(TIME_FORMAT).to_string()),
            )
            .field(
                "end",
                Value::String(new_end.format(TIME_FORMAT).to_string()),
            );
        self.set(Some(&entry.stamp.to_string()), &update)
    }

    /// Deletes the target entry (and its type-index stub, if any).
    pub fn remove(&mut self, id: Option<&str>) -> Result<(), Error> {
        let (pkey, record) = self.fetch_record(id)?;
        let start = key::datetime_from_key(&pkey)?;
        let mut ops = vec![BatchOp::delete(pkey.clone())];
        if let Some(type_name) = record.get("type").and_then(Value::as_str) {
            ops.push(BatchOp::delete(key::type_key(type_name, &start)));
        }
        self.store.batch(ops)?;
        tracing::debug!(key = %pkey, "removed entry");
        Ok(())
    }

    /// Backfills a closed entry with explicit boundaries.
    ///
    /// The end expression may be a bare time of day, resolved against the
    /// start's calendar date.
    pub fn add(&mut self, start: &str, end: &str, data: &Fields) -> Result<Stamp, Error> {
        entry::validate_fields(data)?;
        let start_date = date::resolve_expr(start)?;
        let end_date = date::update_date(&start_date, end)?;
        if end_date < start_date {
            return Err(Error::Ordering {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let pkey = key::encode_key(&start_date);
        if self.store.get(&pkey)?.is_some() {
            return Err(Error::Collision(key::stamp_from_key(&pkey)?));
        }
        let mut value = data.clone();
        value.insert(
            "end".to_string(),
            Value::String(end_date.format(TIME_FORMAT).to_string()),
        );
        self.put_new(&pkey, &start_date, value)
    }

    /// Writes a record plus its type-index stub as one atomic batch.
    fn put_new(
        &mut self,
        pkey: &str,
        start: &DateTime<Local>,
        value: Fields,
    ) -> Result<Stamp, Error> {
        let mut ops = Vec::with_capacity(2);
        if let Some(type_name) = value.get("type").and_then(Value::as_str) {
            ops.push(BatchOp::put(key::type_key(type_name, start), Value::from(0)));
        }
        ops.push(BatchOp::put(pkey, Value::Object(value)));
        self.store.batch(ops)?;
        tracing::debug!(key = %pkey, "wrote entry");
        key::stamp_from_key(pkey).map_err(Into::into)
    }

    /// Resolves an optional id to a raw record, defaulting to the most
    /// recently started entry.
    fn fetch_record(&self, id: Option<&str>) -> Result<(String, Fields), Error> {
        let pkey = match id {
            Some(id) => key::identifier_key(id),
            None => self.most_recent_key()?,
        };
        match self.store.get(&pkey)? {
            Some(Value::Object(record)) => Ok((pkey, record)),
            Some(_) => Err(crate::error::StorageError::corrupt(&pkey, "value is not an object").into()),
            None => Err(Error::NotFound {
                id: id.unwrap_or(&pkey).to_string(),
            }),
        }
    }

    fn most_recent_key(&self) -> Result<String, Error> {
        let (gt, lt) = key::range_bounds(None, None);
        let range = ScanRange {
            gt,
            lt,
            limit: Some(1),
            reverse: true,
        };
        let mut scan = self.store.scan(&range);
        match scan.next() {
            Some(Ok((pkey, _))) => Ok(pkey),
            Some(Err(err)) => Err(err.into()),
            None => Err(Error::EmptyStore),
        }
    }
}

/// The formatted `end` field parsed back to an instant, if present.
fn stored_end(record: &Fields) -> Option<DateTime<Local>> {
    let raw = record.get("end")?.as_str()?;
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map(date::from_local)
        .ok()
}

/// Merges update fields into an existing record, rejecting reserved keys.
fn merge_fields(existing: &mut Fields, update: &Fields) -> Result<(), Error> {
    entry::validate_fields(update)?;
    for (field, value) in update {
        if field == "message" {
            let old = existing.get("message").and_then(Value::as_str);
            if let (Some(old), Some(new)) = (old, value.as_str()) {
                existing.insert(field.clone(), Value::String(format!("{old}\n{new}")));
                continue;
            }
        }
        existing.insert(field.clone(), value.clone());
    }
    Ok(())
}

fn expr_str(value: &Value) -> Result<&str, Error> {
    value.as_str().ok_or_else(|| Error::InvalidDate {
        expr: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entry::Fields;
    use crate::kv::MemoryStore;

    fn store() -> EntryStore<MemoryStore> {
        EntryStore::new(MemoryStore::new())
    }

    fn fields(pairs: &[(&str, Value)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn start_then_get_round_trips_data() {
        let mut store = store();
        let data = fields(&[
            ("type", json!("consulting")),
            ("message", json!("kickoff call")),
            ("rate", json!(120)),
        ]);
        let stamp = store.start(&data, Some("2025-03-14 08:00:00")).unwrap();

        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert_eq!(entry.stamp, stamp);
        assert_eq!(entry.data, data);
        assert!(entry.is_open());
    }

    #[test]
    fn start_rejects_reserved_fields() {
        let mut store = store();
        let data = fields(&[("end", json!("2025-03-14 09:00:00"))]);
        assert!(matches!(
            store.start(&data, None),
            Err(Error::ReservedKey(field)) if field == "end"
        ));
        assert!(store.status(None).is_ok());
    }

    #[test]
    fn start_at_occupied_stamp_collides() {
        let mut store = store();
        let data = fields(&[("type", json!("a"))]);
        let stamp = store.start(&data, Some("2025-03-14 08:00:00")).unwrap();

        let err = store
            .start(&fields(&[("type", json!("b"))]), Some("2025-03-14 08:00:00"))
            .unwrap_err();
        assert!(matches!(err, Error::Collision(s) if s == stamp));

        // the original entry is untouched
        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert_eq!(entry.type_name(), Some("a"));
    }

    #[test]
    fn stop_closes_the_most_recent_entry() {
        let mut store = store();
        store.start(&Fields::new(), Some("2025-03-14 08:00:00")).unwrap();
        let stamp = store.start(&Fields::new(), Some("2025-03-14 09:00:00")).unwrap();

        store.stop(None, None).unwrap();
        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert!(!entry.is_open());

        // the earlier entry stays open
        let first = store.get(Some("2025-03-14 08:00:00")).unwrap();
        assert!(first.is_open());
    }

    #[test]
    fn stop_twice_updates_end_without_error() {
        let mut store = store();
        let stamp = store.start(&Fields::new(), Some("2025-03-14 08:00:00")).unwrap();
        store.stop(None, None).unwrap();
        store.stop(None, None).unwrap();

        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert!(!entry.is_open());
        assert_eq!(store.collect(&crate::Filter::new()).unwrap().len(), 1);
    }

    #[test]
    fn stop_concatenates_messages() {
        let mut store = store();
        let data = fields(&[("message", json!("first"))]);
        let stamp = store.start(&data, Some("2025-03-14 08:00:00")).unwrap();

        store
            .stop(None, Some(&fields(&[("message", json!("second"))])))
            .unwrap();
        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert_eq!(entry.message(), Some("first\nsecond"));
    }

    #[test]
    fn stop_on_empty_store_reports_empty() {
        let mut store = store();
        assert!(matches!(store.stop(None, None), Err(Error::EmptyStore)));
    }

    #[test]
    fn status_reports_elapsed_then_stopped() {
        let mut store = store();
        assert_eq!(store.status(None).unwrap(), "stopped");

        store.start(&Fields::new(), Some("1 hour ago")).unwrap();
        let status = store.status(None).unwrap();
        assert!(status.starts_with("elapsed time: 01:00:0"), "{status}");

        store.stop(None, None).unwrap();
        assert_eq!(store.status(None).unwrap(), "stopped");
    }

    #[test]
    fn restart_copies_data_but_not_timing() {
        let mut store = store();
        let data = fields(&[("type", json!("work")), ("message", json!("resume me"))]);
        store.start(&data, Some("2025-03-14 08:00:00")).unwrap();
        store.stop(None, None).unwrap();

        let stamp = store.restart(None).unwrap();
        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert!(entry.is_open());
        assert_eq!(entry.data, data);
        assert!(entry.start > date::resolve_expr("2025-03-14 08:00:00").unwrap());
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = store();
        assert!(matches!(
            store.get(Some("2025-01-01 00:00:00")),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn get_nan_identifier_is_not_found() {
        let mut store = store();
        store.start(&Fields::new(), Some("2025-03-14 08:00:00")).unwrap();
        assert!(matches!(store.get(Some("NaN")), Err(Error::NotFound { .. })));
    }

    #[test]
    fn set_assigns_and_removes_plain_fields() {
        let mut store = store();
        let data = fields(&[("message", json!("old")), ("rate", json!(80))]);
        let stamp = store.start(&data, Some("2025-03-14 08:00:00")).unwrap();

        let update = Update::new()
            .field("message", json!("new"))
            .unset("rate")
            .field("archive", json!(true));
        let same = store.set(Some(&stamp.to_string()), &update).unwrap();
        assert_eq!(same, stamp);

        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert_eq!(entry.message(), Some("new"));
        assert!(!entry.data.contains_key("rate"));
        assert!(entry.is_archived());
    }

    #[test]
    fn set_start_renames_atomically() {
        let mut store = store();
        let data = fields(&[("type", json!("work"))]);
        let stamp = store.start(&data, Some("2025-03-14 08:00:00")).unwrap();

        let update = Update::new().field("start", json!("2025-03-14 07:30:00"));
        let new_stamp = store.set(Some(&stamp.to_string()), &update).unwrap();
        assert_ne!(new_stamp, stamp);

        assert!(matches!(
            store.get(Some(&stamp.to_string())),
            Err(Error::NotFound { .. })
        ));
        let entry = store.get(Some(&new_stamp.to_string())).unwrap();
        assert_eq!(entry.data, data);
        assert_eq!(entry.key, "time!2025-03-14 07:30:00");
    }

    #[test]
    fn set_start_collision_leaves_store_unchanged() {
        let mut store = store();
        let first = store
            .start(&fields(&[("type", json!("a"))]), Some("2025-03-14 08:00:00"))
            .unwrap();
        let second = store
            .start(&fields(&[("type", json!("b"))]), Some("2025-03-14 09:00:00"))
            .unwrap();

        let update = Update::new().field("start", json!("2025-03-14 08:00:00"));
        let err = store.set(Some(&second.to_string()), &update).unwrap_err();
        assert!(matches!(err, Error::Collision(s) if s == first));

        // full failure: both entries intact under their original keys
        assert_eq!(
            store.get(Some(&first.to_string())).unwrap().type_name(),
            Some("a")
        );
        assert_eq!(
            store.get(Some(&second.to_string())).unwrap().type_name(),
            Some("b")
        );
    }

    #[test]
    fn set_consumes_both_boundary_synonyms() {
        let mut store = store();
        let stamp = store.start(&Fields::new(), Some("2025-03-14 08:00:00")).unwrap();

        let update = Update::new()
            .field("start", json!("2025-03-14 07:00:00"))
            .field("begin", json!("2025-03-14 06:00:00"))
            .field("end", json!("2025-03-14 09:00:00"))
            .field("stop", json!("2025-03-14 10:00:00"));
        let new_stamp = store.set(Some(&stamp.to_string()), &update).unwrap();

        // the primary names win; the synonyms never land in the data map
        let entry = store.get(Some(&new_stamp.to_string())).unwrap();
        assert_eq!(entry.key, "time!2025-03-14 07:00:00");
        assert_eq!(entry.elapsed, 2 * 3600);
        assert!(!entry.data.contains_key("begin"));
        assert!(!entry.data.contains_key("stop"));
    }

    #[test]
    fn set_type_moves_the_type_stub() {
        let mut store = store();
        let stamp = store
            .start(&fields(&[("type", json!("a"))]), Some("2025-03-14 08:00:00"))
            .unwrap();

        let update = Update::new().field("type", json!("b"));
        store.set(Some(&stamp.to_string()), &update).unwrap();

        let backend = store.into_inner();
        assert!(backend.get("time-type!a!2025-03-14 08:00:00").unwrap().is_none());
        assert!(backend.get("time-type!b!2025-03-14 08:00:00").unwrap().is_some());
    }

    #[test]
    fn rename_with_type_change_leaves_no_stale_stub() {
        let mut store = store();
        let stamp = store
            .start(&fields(&[("type", json!("a"))]), Some("2025-03-14 08:00:00"))
            .unwrap();

        let update = Update::new()
            .field("start", json!("2025-03-14 07:00:00"))
            .field("type", json!("b"));
        store.set(Some(&stamp.to_string()), &update).unwrap();

        let backend = store.into_inner();
        assert!(backend.get("time-type!a!2025-03-14 08:00:00").unwrap().is_none());
        assert!(backend.get("time-type!b!2025-03-14 07:00:00").unwrap().is_some());
    }

    #[test]
    fn set_end_supports_bare_time_against_entry_day() {
        let mut store = store();
        let stamp = store.start(&Fields::new(), Some("2025-03-14 08:00:00")).unwrap();

        let update = Update::new().field("end", json!("18:00"));
        store.set(Some(&stamp.to_string()), &update).unwrap();

        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert_eq!(entry.elapsed, 10 * 3600);
    }

    #[test]
    fn set_end_before_start_is_rejected() {
        let mut store = store();
        let stamp = store.start(&Fields::new(), Some("2025-03-14 08:00:00")).unwrap();

        let update = Update::new().field("end", json!("2025-03-14 07:00:00"));
        assert!(matches!(
            store.set(Some(&stamp.to_string()), &update),
            Err(Error::Ordering { .. })
        ));
    }

    #[test]
    fn move_preserves_duration() {
        let mut store = store();
        store
            .add("2025-03-14 08:00:00", "2025-03-14 10:00:00", &Fields::new())
            .unwrap();

        let new_stamp = store.move_entry(None, "2025-03-15 09:00:00").unwrap();
        let entry = store.get(Some(&new_stamp.to_string())).unwrap();
        assert_eq!(entry.key, "time!2025-03-15 09:00:00");
        assert_eq!(entry.elapsed, 2 * 3600);
    }

    #[test]
    fn move_refuses_open_entries() {
        let mut store = store();
        let stamp = store.start(&Fields::new(), Some("2025-03-14 08:00:00")).unwrap();
        assert!(matches!(
            store.move_entry(None, "2025-03-15 09:00:00"),
            Err(Error::OpenEntry(s)) if s == stamp
        ));
    }

    #[test]
    fn remove_deletes_entry_and_type_stub() {
        let mut store = store();
        let stamp = store
            .start(&fields(&[("type", json!("work"))]), Some("2025-03-14 08:00:00"))
            .unwrap();

        store.remove(Some(&stamp.to_string())).unwrap();
        assert!(matches!(
            store.get(Some(&stamp.to_string())),
            Err(Error::NotFound { .. })
        ));
        assert!(store.into_inner().is_empty());
    }

    #[test]
    fn add_backfills_a_closed_interval() {
        let mut store = store();
        let stamp = store
            .add(
                "2025-03-14 08:00:00",
                "10:00",
                &fields(&[("type", json!("t1"))]),
            )
            .unwrap();
        let entry = store.get(Some(&stamp.to_string())).unwrap();
        assert!(!entry.is_open());
        assert_eq!(entry.elapsed, 2 * 3600);
    }

    #[test]
    fn add_rejects_inverted_boundaries() {
        let mut store = store();
        assert!(matches!(
            store.add("2025-03-14 10:00:00", "2025-03-14 08:00:00", &Fields::new()),
            Err(Error::Ordering { .. })
        ));
    }

    #[test]
    fn add_at_occupied_stamp_collides() {
        let mut store = store();
        store
            .add("2025-03-14 08:00:00", "2025-03-14 10:00:00", &Fields::new())
            .unwrap();
        assert!(matches!(
            store.add("2025-03-14 08:00:00", "2025-03-14 11:00:00", &Fields::new()),
            Err(Error::Collision(_))
        ));
    }
}
