//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Personal time-tracking ledger.
///
/// Records start/stop time intervals tagged with a type and message,
/// queryable for reporting and invoicing. Dates accept fuzzy expressions
/// like "2 hours ago", "yesterday 13:00", or explicit datetimes.
#[derive(Debug, Parser)]
#[command(name = "clk", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start tracking a new entry.
    Start {
        /// Entry type (free-form tag).
        #[arg(short, long)]
        r#type: Option<String>,

        /// Message attached to the entry.
        #[arg(short, long)]
        message: Option<String>,

        /// Start date; defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Stop an entry (the most recent one by default).
    Stop {
        /// Entry stamp or date expression.
        #[arg(short, long)]
        id: Option<String>,

        /// Stop the latest entry of this type instead.
        #[arg(short = 't', long, conflicts_with = "id")]
        r#type: Option<String>,

        /// Message to append to the entry.
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Start a new entry copying an existing entry's data.
    Restart {
        /// Entry stamp or date expression.
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Show whether tracking is running and for how long.
    Status {
        /// Entry stamp or date expression.
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Show one entry in full.
    Show {
        /// Entry stamp or date expression.
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Set a field on an entry; `start` and `end` move its boundaries.
    Set {
        /// Entry stamp or date expression.
        #[arg(short, long)]
        id: Option<String>,

        /// Field name (`start`, `end`, `type`, `message`, or custom).
        field: String,

        /// New value; omit to remove the field.
        value: Option<String>,
    },

    /// Move an entry's start, preserving its duration.
    Move {
        /// Entry stamp or date expression.
        #[arg(short, long)]
        id: Option<String>,

        /// New start date expression.
        to: String,
    },

    /// Backfill a closed entry with explicit boundaries.
    Add {
        /// Start date expression.
        start: String,

        /// End date expression (a bare time lands on the start's day).
        end: String,

        /// Entry type (free-form tag).
        #[arg(short, long)]
        r#type: Option<String>,

        /// Message attached to the entry.
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Delete an entry.
    Remove {
        /// Entry stamp or date expression.
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Archive entries, hiding them from list and report.
    Archive {
        /// Entry stamp or date expression; omit to archive by filter.
        #[arg(short, long)]
        id: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Clear the archive flag on entries.
    Unarchive {
        /// Entry stamp or date expression; omit to unarchive by filter.
        #[arg(short, long)]
        id: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List entries.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Aggregate elapsed time per day.
    Report {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Shared filter flags for `list` and `report`.
#[derive(Debug, clap::Args)]
pub struct FilterArgs {
    /// Only entries starting after this expression.
    #[arg(long)]
    pub since: Option<String>,

    /// Only entries starting before this expression.
    #[arg(long)]
    pub until: Option<String>,

    /// Only entries of this type.
    #[arg(short, long)]
    pub r#type: Option<String>,

    /// Only entries whose message matches this regex.
    #[arg(long)]
    pub matching: Option<String>,

    /// Include archived entries.
    #[arg(long)]
    pub all: bool,
}
