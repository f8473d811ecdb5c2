//! # Blueprint Discovery
//!
//! File: cli/src/blueprint/discovery.rs
//!
//! ## Overview
//!
//! Walks a blueprint directory and groups its files by type, the name of
//! the top-level directory they live in:
//!
//! ```text
//! my-blueprint/
//! ├── layouts/docs.tmpl.vue      -> "layouts"
//! ├── plugins/my-plugin.$tmpl.js -> "plugins"
//! ├── custom-file.log            -> "" (root-level file with extension)
//! └── LICENSE                    -> skipped (no directory, no extension)
//! ```
//!
//! Each kept file becomes a [`FileDescriptor`] with `source = root/path` and
//! `destination = destination_relative = path`. Paths are visited in sorted
//! order so that bucket and entry order do not depend on the platform.
//! The walk itself is blocking and runs on tokio's blocking pool.
//!
use super::filter::{create_file_filter, FileFilter};
use super::paths::{FileDescriptor, FileSet};
use super::utils::{exists, ParsedPath};
use crate::common::fs::walk::{self, PathMatcher, WalkOptions};
use crate::core::error::Result;
use anyhow::Context;
use std::path::Path;
use tracing::{debug, trace};

/// Filters applied during discovery.
#[derive(Debug, Clone, Default)]
pub struct DiscoverOptions {
    pub filter: Option<FileFilter>,
    pub validate: Option<PathMatcher>,
}

/// Groups the files below `root` by type. A missing root yields an empty set.
pub async fn discover(root: &Path, options: &DiscoverOptions) -> Result<FileSet> {
    let mut files_by_type = FileSet::new();
    if !exists(root).await {
        debug!("Discovery root {:?} does not exist", root);
        return Ok(files_by_type);
    }

    let filter = create_file_filter(options.filter.as_ref());
    let walk_root = root.to_path_buf();
    let walk_options = WalkOptions {
        validate: options.validate.clone(),
        ..Default::default()
    };
    let mut files = tokio::task::spawn_blocking(move || walk::walk(&walk_root, &walk_options))
        .await
        .context("Directory walk task failed")??;
    files.sort();

    for file in files {
        if file.as_os_str().is_empty() {
            continue;
        }
        let parsed = ParsedPath::parse(&file);
        let file_type = parsed.top_dir();
        if file_type.is_none() && parsed.ext.is_empty() {
            trace!("Skipping {:?}: no type and no extension", file);
            continue;
        }
        if let Some(filter) = &filter {
            if !filter(&parsed) {
                trace!("Skipping {:?}: rejected by filter", file);
                continue;
            }
        }

        let file_type = file_type.unwrap_or_default();
        files_by_type.push(&file_type, FileDescriptor::new(root.join(&file), file.clone()));
    }

    debug!(
        "Discovered {} type(s) in {:?}: {:?}",
        files_by_type.len(),
        root,
        files_by_type.types().collect::<Vec<_>>()
    );
    Ok(files_by_type)
}
