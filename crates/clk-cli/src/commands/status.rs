//! Status command: whether tracking is running and for how long.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore};

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &EntryStore<S>,
    id: Option<&str>,
) -> Result<()> {
    writeln!(writer, "{}", store.status(id)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clk_core::MemoryStore;

    #[test]
    fn empty_store_reads_stopped() {
        let store = EntryStore::new(MemoryStore::new());
        let mut out = Vec::new();
        run(&mut out, &store, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "stopped\n");
    }
}
