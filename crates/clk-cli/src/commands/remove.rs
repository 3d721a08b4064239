//! Remove command: delete an entry.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore};

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    id: Option<&str>,
) -> Result<()> {
    store.remove(id)?;
    writeln!(writer, "removed")?;
    Ok(())
}
