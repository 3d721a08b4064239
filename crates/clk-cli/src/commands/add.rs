//! Add command: backfill a closed entry.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore};

use super::util;

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    start: &str,
    end: &str,
    type_name: Option<&str>,
    message: Option<&str>,
) -> Result<()> {
    let data = util::fields_from(type_name, message);
    let stamp = store.add(start, end, &data)?;
    writeln!(writer, "added entry {stamp}")?;
    Ok(())
}
