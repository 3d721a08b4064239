//! Report command: elapsed time per day.

use std::io::Write;

use anyhow::Result;

use clk_core::{EntryStore, OrderedStore, format_elapsed};

use crate::cli::FilterArgs;

use super::util;

pub fn run<W: Write, S: OrderedStore>(
    writer: &mut W,
    store: &EntryStore<S>,
    args: &FilterArgs,
) -> Result<()> {
    let filter = util::build_filter(args)?;
    let buckets = store.aggregate_by_day(&filter)?;
    let mut total = 0;
    for (day, seconds) in &buckets {
        total += seconds;
        writeln!(writer, "{day}  {}", format_elapsed(*seconds))?;
    }
    writeln!(writer, "total       {}", format_elapsed(total))?;
    Ok(())
}
