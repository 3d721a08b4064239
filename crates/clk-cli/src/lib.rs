//! Command-line interface for the `clk` time-tracking ledger.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands, FilterArgs};
pub use config::Config;
