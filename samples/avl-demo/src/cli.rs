//! Command-line configuration.

use std::num::ParseIntError;

use clap::Parser;
use thiserror::Error;

/// Entries loaded when no `--entry` is given.
pub const CLASSROOM_ENTRIES: [(i64, &str); 10] = [
    (4, "C"),
    (8, "K"),
    (9, "P"),
    (10, "A"),
    (11, "F"),
    (12, "H"),
    (13, "O"),
    (15, "I"),
    (17, "M"),
    (20, "G"),
];

/// Errors raised while parsing a `KEY=VALUE` entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryParseError {
    /// The argument has no `=`.
    #[error("expected KEY=VALUE, got `{0}`")]
    MissingSeparator(String),
    /// The part before `=` is not an integer.
    #[error("invalid key `{key}`: {source}")]
    InvalidKey {
        /// The rejected key text.
        key: String,
        /// Why it failed to parse.
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Parser)]
#[command(name = "avl-demo")]
#[command(about = "Builds a balanced ordered map, prints its shape and runs a closest-key lookup")]
pub struct Cli {
    /// Entry to insert, as KEY=VALUE (repeatable). Defaults to the classroom data set.
    #[arg(long = "entry", value_name = "KEY=VALUE", value_parser = parse_entry)]
    pub entries: Vec<(i64, String)>,

    /// Key to remove once the tree is built (repeatable).
    #[arg(long = "remove", value_name = "KEY", allow_negative_numbers = true)]
    pub removals: Vec<i64>,

    /// Key to look up with the closest-key search.
    #[arg(long, value_name = "KEY", default_value_t = 15, allow_negative_numbers = true)]
    pub closest: i64,
}

impl Cli {
    /// Returns the entries to insert, in insertion order.
    pub fn entries_or_default(&self) -> Vec<(i64, String)> {
        if self.entries.is_empty() {
            CLASSROOM_ENTRIES
                .iter()
                .map(|&(key, value)| (key, value.to_string()))
                .collect()
        } else {
            self.entries.clone()
        }
    }
}

/// Parses a `KEY=VALUE` argument.
///
/// # Errors
///
/// Returns [`EntryParseError`] when the separator is missing or the key is
/// not an integer.
pub fn parse_entry(argument: &str) -> Result<(i64, String), EntryParseError> {
    let (key, value) = argument
        .split_once('=')
        .ok_or_else(|| EntryParseError::MissingSeparator(argument.to_string()))?;
    let key = key.trim();
    let parsed = key.parse().map_err(|source| EntryParseError::InvalidKey {
        key: key.to_string(),
        source,
    })?;
    Ok((parsed, value.to_string()))
}
