//! Show command: one entry in full.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore, format_elapsed};

use super::util::DISPLAY_FORMAT;

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &EntryStore<S>,
    id: Option<&str>,
) -> Result<()> {
    let entry = store.get(id)?;
    writeln!(writer, "stamp:   {}", entry.stamp)?;
    writeln!(writer, "start:   {}", entry.start.format(DISPLAY_FORMAT))?;
    match entry.end {
        Some(end) => writeln!(writer, "end:     {}", end.format(DISPLAY_FORMAT))?,
        None => writeln!(writer, "end:     NOW")?,
    }
    writeln!(writer, "elapsed: {}", format_elapsed(entry.elapsed))?;
    for (field, value) in &entry.data {
        let value = value.as_str().map_or_else(|| value.to_string(), str::to_string);
        writeln!(writer, "{field}: {value}")?;
    }
    Ok(())
}
