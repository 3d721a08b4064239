//! Archive commands: hide entries from listings without deleting them.

use std::io::Write;

use anyhow::Result;
use serde_json::Value;

use clk_core::{EntryStore, OrderedStore, Update};

use crate::cli::FilterArgs;

use super::util;

/// Sets or clears the archive flag on one entry, or on every entry the
/// filter matches when no id is given.
pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    id: Option<&str>,
    args: &FilterArgs,
    archived: bool,
) -> Result<()> {
    let update = if archived {
        Update::new().field("archive", Value::Bool(true))
    } else {
        Update::new().unset("archive")
    };
    let verb = if archived { "archived" } else { "unarchived" };

    if let Some(id) = id {
        store.set(Some(id), &update)?;
        writeln!(writer, "{verb} 1 entry")?;
        return Ok(());
    }

    // bulk mode always sees archived entries, so unarchive can find them
    let filter = util::build_filter(args)?.include_archived();
    let mut count = 0;
    for entry in store.collect(&filter)? {
        if entry.is_archived() == archived {
            continue;
        }
        store.set(Some(&entry.stamp.to_string()), &update)?;
        count += 1;
    }
    writeln!(
        writer,
        "{verb} {count} {}",
        if count == 1 { "entry" } else { "entries" }
    )?;
    Ok(())
}
