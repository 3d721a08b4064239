//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use clk_core::{Fields, Filter};

use crate::cli::FilterArgs;

/// Datetime format used in human-readable output.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Builds an entry filter from the shared CLI flags.
pub fn build_filter(args: &FilterArgs) -> Result<Filter> {
    let mut filter = Filter::new();
    if let Some(since) = &args.since {
        filter = filter.since(since.clone());
    }
    if let Some(until) = &args.until {
        filter = filter.until(until.clone());
    }
    if let Some(type_name) = &args.r#type {
        filter = filter.with_type(type_name.clone());
    }
    if let Some(pattern) = &args.matching {
        let regex = Regex::new(pattern)
            .with_context(|| format!("invalid message pattern {pattern:?}"))?;
        filter = filter.test(move |entry| {
            entry.message().is_some_and(|message| regex.is_match(message))
        });
    }
    if args.all {
        filter = filter.include_archived();
    }
    Ok(filter)
}

/// Entry data from the common `--type`/`--message` flags.
pub fn fields_from(type_name: Option<&str>, message: Option<&str>) -> Fields {
    let mut fields = Fields::new();
    if let Some(type_name) = type_name {
        fields.insert("type".to_string(), Value::String(type_name.to_string()));
    }
    if let Some(message) = message {
        fields.insert("message".to_string(), Value::String(message.to_string()));
    }
    fields
}

/// Interprets a raw CLI value: booleans and numbers become typed JSON
/// values (so `set archive true` stores a flag), everything else a string.
pub fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Bool(_) | Value::Number(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}
