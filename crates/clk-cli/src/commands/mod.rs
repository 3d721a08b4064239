//! CLI command implementations.
//!
//! Every command writes to a caller-provided writer so tests can capture
//! output; all ledger semantics live in `clk-core`.

pub mod add;
pub mod archive;
pub mod list;
pub mod move_entry;
pub mod remove;
pub mod report;
pub mod restart;
pub mod set;
pub mod show;
pub mod start;
pub mod status;
pub mod stop;
pub mod util;
