/*
 * table.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Table command implementation
 */

//! `texfrag table`: store a tabular in the tabulars folder and write a
//! `table` fragment that inputs it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use texfrag_core::{Artifact, Category, Published, TableContent};
use texfrag_markup::{Table, TabularOptions};

use super::{FragmentFlags, load_config, native_runtime, open_publisher, report};

/// Arguments for the table command
#[derive(Debug)]
pub struct TableArgs {
    /// Ready-made tabular markup
    pub markup: Option<PathBuf>,
    /// Structured table (YAML or JSON)
    pub data: Option<PathBuf>,
    pub name: String,
    pub precision: usize,
    pub escape: bool,
    pub flags: FragmentFlags,
    pub config: Option<PathBuf>,
}

/// Execute the table command
pub fn execute(args: TableArgs) -> Result<()> {
    let json = args.flags.json;
    let published = run(args)?;
    report(&published, json)
}

pub fn run(args: TableArgs) -> Result<Published> {
    let runtime = native_runtime();
    let config = load_config(args.config.as_deref(), runtime.as_ref())?;

    let content = match (&args.markup, &args.data) {
        (Some(path), None) => {
            let markup = runtime
                .file_read_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            TableContent::markup(markup)
        }
        (None, Some(path)) => {
            let text = runtime
                .file_read_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let table: Table = serde_yaml::from_str(&text)
                .with_context(|| format!("Invalid table data in {}", path.display()))?;
            debug!(
                columns = table.columns.len(),
                rows = table.rows.len(),
                "Loaded table data"
            );
            let options = TabularOptions {
                precision: args.precision,
                escape: args.escape,
                ..Default::default()
            };
            TableContent::structured(table, options)
        }
        _ => anyhow::bail!("Exactly one of --markup or --data is required"),
    };

    let mut publisher = open_publisher(Category::Table, &config, runtime, args.flags.json)?;
    let options = args.flags.apply(publisher.options());
    publisher
        .publish(Artifact::table(content), &args.name, &options)
        .with_context(|| format!("Failed to publish table '{}'", args.name))
}
