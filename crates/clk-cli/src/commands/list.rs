//! List command: filtered entries, one line each.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore, format_elapsed};

use crate::cli::FilterArgs;

use super::util::{self, DISPLAY_FORMAT};

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &EntryStore<S>,
    args: &FilterArgs,
) -> Result<()> {
    let filter = util::build_filter(args)?;
    let mut total = 0;
    for entry in store.stream(&filter)? {
        let entry = entry?;
        total += entry.elapsed.max(0);
        writeln!(
            writer,
            "{}  {}  {}  {}{}",
            entry.stamp,
            entry.start.format(DISPLAY_FORMAT),
            format_elapsed(entry.elapsed),
            entry.type_name().unwrap_or("-"),
            entry
                .message()
                .map(|m| format!("  {}", m.lines().next().unwrap_or("")))
                .unwrap_or_default(),
        )?;
    }
    writeln!(writer, "total: {}", format_elapsed(total))?;
    Ok(())
}
