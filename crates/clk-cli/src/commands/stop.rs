//! Stop command: close a running entry.

use std::io::Write;

use anyhow::{Context, Result};

use clk_core::{EntryStore, Filter, OrderedStore};

use super::util;

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    id: Option<&str>,
    type_name: Option<&str>,
    message: Option<&str>,
) -> Result<()> {
    // --type targets the latest entry of that type instead of a stamp
    let stamp;
    let id = match (id, type_name) {
        (None, Some(type_name)) => {
            let filter = Filter::new().with_type(type_name).include_archived();
            let entry = store
                .most_recent_matching(&filter)?
                .with_context(|| format!("no entry of type {type_name:?}"))?;
            stamp = entry.stamp.to_string();
            Some(stamp.as_str())
        }
        (id, _) => id,
    };
    let data = message.map(|message| util::fields_from(None, Some(message)));
    store.stop(id, data.as_ref())?;
    writeln!(writer, "stopped")?;
    Ok(())
}
