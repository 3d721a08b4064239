//! Move command: rename an entry's start, duration preserved.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore};

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    id: Option<&str>,
    to: &str,
) -> Result<()> {
    let stamp = store.move_entry(id, to)?;
    writeln!(writer, "moved entry to {stamp}")?;
    Ok(())
}
