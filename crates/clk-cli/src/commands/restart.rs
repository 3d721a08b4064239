//! Restart command: start a fresh entry from an existing one's data.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore};

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    id: Option<&str>,
) -> Result<()> {
    let stamp = store.restart(id)?;
    writeln!(writer, "started entry {stamp}")?;
    Ok(())
}
