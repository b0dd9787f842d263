//! avl-demo - walkthrough of the avl-map balanced ordered map
//!
//! Usage:
//!   avl-demo [--entry KEY=VALUE]... [--remove KEY]... [--closest KEY]
//!
//! Builds the tree (the classroom data set unless entries are given),
//! removes the requested keys, then prints the tree shape, the closest-key
//! lookup result and the in-order listing. Every mutation is followed by an
//! invariant check. Log verbosity follows `RUST_LOG`.

mod cli;

use std::fmt::Write;

use anyhow::Context;
use avl_map::map::AvlTreeMap;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,avl_demo=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    print!("{}", run(&cli)?);
    Ok(())
}

/// Builds the tree described by `cli`, checking invariants after every mutation.
fn build(cli: &Cli) -> anyhow::Result<AvlTreeMap<i64, String>> {
    let mut tree = AvlTreeMap::new();

    for (key, value) in cli.entries_or_default() {
        if let Some(previous) = tree.insert(key, value) {
            tracing::debug!(key, %previous, "replaced existing value");
        }
        tree.validate()
            .with_context(|| format!("tree corrupted after inserting {key}"))?;
    }
    tracing::info!(entries = tree.len(), height = tree.height(), "tree built");

    for &key in &cli.removals {
        match tree.remove(&key) {
            Some(value) => tracing::info!(key, %value, "removed"),
            None => tracing::debug!(key, "key not present, nothing removed"),
        }
        tree.validate()
            .with_context(|| format!("tree corrupted after removing {key}"))?;
    }

    Ok(tree)
}

/// Renders the tree shape, the closest-key result and the in-order listing.
fn run(cli: &Cli) -> anyhow::Result<String> {
    let tree = build(cli)?;
    let mut report = String::new();

    write!(report, "{}", tree.pretty())?;

    match tree.closest_entry(&cli.closest) {
        Some((key, value)) => {
            tracing::debug!(probe = cli.closest, matched = *key, "closest key found");
            writeln!(report, "{value}")?;
        }
        None => writeln!(report, "missing")?,
    }

    writeln!(report, "{tree}")?;
    Ok(report)
}
