//! Set command: field assignment and boundary edits.

use std::io::Write;

use anyhow::Result;
use serde_json::Value;

use clk_core::{EntryStore, OrderedStore, Update};

use super::util;

/// Field names routed to the boundary paths; their values are date
/// expressions, never typed JSON.
const BOUNDARY_FIELDS: [&str; 4] = ["start", "begin", "end", "stop"];

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    id: Option<&str>,
    field: &str,
    value: Option<&str>,
) -> Result<()> {
    let update = match value {
        Some(raw) if BOUNDARY_FIELDS.contains(&field) => {
            Update::new().field(field, Value::String(raw.to_string()))
        }
        Some(raw) => Update::new().field(field, util::parse_value(raw)),
        None => Update::new().unset(field),
    };
    let stamp = store.set(id, &update)?;
    writeln!(writer, "updated entry {stamp}")?;
    Ok(())
}
