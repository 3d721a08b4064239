//! Start command: begin tracking a new entry.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore};

use super::util;

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    type_name: Option<&str>,
    message: Option<&str>,
    at: Option<&str>,
) -> Result<()> {
    let data = util::fields_from(type_name, message);
    let stamp = store.start(&data, at)?;
    writeln!(writer, "started entry {stamp}")?;
    Ok(())
}
