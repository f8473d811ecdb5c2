//! # Blueprint Discover Command
//!
//! File: cli/src/commands/discover.rs
//!
//! ## Overview
//!
//! This module implements `blueprint discover [DIR]`, which runs the same
//! autodiscovery a build does and prints the result grouped by type. It is
//! the quickest way to check what a blueprint will register and which keys
//! `blueprint eject` accepts.
//!
//! The directory defaults to `[blueprint].dir`. The configured `filter` and
//! `validate` settings apply in both cases.
//!
//! ## Examples
//!
//! ```bash
//! blueprint discover ./blueprints/example
//! ```
//!
//! Example output:
//!
//! ```
//! Blueprint files in './blueprints/example':
//!
//! Type       | File
//! -----------+--------------------------------------------------
//! layouts    | layouts/docs.tmpl.vue
//! plugins    | plugins/my-plugin.$tmpl.js
//! (root)     | theme.css
//!
//! Found 3 file(s) in 3 type(s).
//! ```
//!
use crate::blueprint::discovery::{self, DiscoverOptions};
use crate::blueprint::options::BlueprintOptions;
use crate::blueprint::paths::{FileEntry, FileSet};
use crate::core::config::Config;
use crate::core::error::{BlueprintError, Result};
use anyhow::anyhow;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

/// # Discover Arguments (`DiscoverArgs`)
#[derive(Parser, Debug)]
pub struct DiscoverArgs {
    /// Blueprint directory to scan. Defaults to `[blueprint].dir`.
    dir: Option<PathBuf>,
}

/// # Handle Discover Command (`handle_discover`)
pub async fn handle_discover(args: DiscoverArgs, config: &Config) -> Result<()> {
    let dir = args
        .dir
        .or_else(|| config.blueprint.dir.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            anyhow!(BlueprintError::UserInput(
                "No blueprint directory given and none configured in [blueprint].dir".to_string()
            ))
        })?;
    info!("Discovering blueprint files in {:?}", dir);

    let options = BlueprintOptions::from_config(&config.blueprint)?;
    let files = discovery::discover(
        &dir,
        &DiscoverOptions {
            filter: options.filter,
            validate: options.validate,
        },
    )
    .await?;

    print!("{}", render_table(&files, &dir));
    Ok(())
}

/// Formats the discovered files as a `Type | File` table.
fn render_table(files: &FileSet, dir: &Path) -> String {
    if files.is_empty() {
        return format!(
            "No blueprint files found in '{}'.\n\
             Files are grouped by their top-level directory (plugins/, layouts/, static/, ...).\n",
            dir.display()
        );
    }

    let rows: Vec<(&str, String)> = files
        .iter()
        .flat_map(|(file_type, entries)| {
            let label = if file_type.is_empty() { "(root)" } else { file_type };
            entries.iter().map(move |entry| {
                let file = match entry {
                    FileEntry::Path(path) => path.clone(),
                    FileEntry::Descriptor(d) => d.key(),
                };
                (label, file)
            })
        })
        .collect();

    let type_width = rows
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0)
        .max("Type".len())
        .max(10);

    let mut out = format!("Blueprint files in '{}':\n\n", dir.display());
    out.push_str(&format!("{:<width$} | File\n", "Type", width = type_width));
    out.push_str(&format!("{}-+-{}\n", "-".repeat(type_width), "-".repeat(49)));
    for (label, file) in &rows {
        out.push_str(&format!("{:<width$} | {}\n", label, file, width = type_width));
    }
    out.push_str(&format!(
        "\nFound {} file(s) in {} type(s).\n",
        rows.len(),
        files.len()
    ));
    out
}
