//! # Blueprint Kit Directory Walker
//!
//! File: cli/src/common/fs/walk.rs
//!
//! ## Overview
//!
//! Recursively lists the files below a root directory. Used by blueprint
//! discovery, which then groups the results by their top-level directory.
//!
//! ## Architecture
//!
//! - Traversal uses `walkdir`. Only files are returned; directories are
//!   traversed but never listed.
//! - `validate` is a [`PathMatcher`] tested against each walked path. Entries
//!   that fail are left out of the result, but the walk still descends into
//!   failing directories: validation filters results, it does not prune.
//! - `slice_root` controls the shape of the returned paths (see [`SliceRoot`]).
//! - The result is fully collected. Order follows `walkdir` and should not be
//!   relied upon across platforms.
//!
//! I/O errors (unreadable directories, vanished entries) abort the walk and
//! propagate with context.
//!
use crate::core::error::Result;
use anyhow::Context;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;
use walkdir::WalkDir;

/// Predicate used by [`PathMatcher::Predicate`].
pub type PathPredicate = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Validation applied to each walked path.
#[derive(Clone)]
pub enum PathMatcher {
    /// The path (as a string) contains this substring.
    Contains(String),
    /// The regex matches somewhere in the path string.
    Pattern(Regex),
    /// Custom predicate over the path.
    Predicate(PathPredicate),
}

impl PathMatcher {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            PathMatcher::Contains(needle) => path.to_string_lossy().contains(needle.as_str()),
            PathMatcher::Pattern(re) => re.is_match(&path.to_string_lossy()),
            PathMatcher::Predicate(f) => f(path),
        }
    }
}

impl fmt::Debug for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMatcher::Contains(s) => f.debug_tuple("Contains").field(s).finish(),
            PathMatcher::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            PathMatcher::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// How walked paths are shaped in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SliceRoot {
    /// Strip the root directory (and the following separator).
    #[default]
    Root,
    /// Return paths as walked (root included).
    Keep,
    /// Strip this literal string prefix instead of the root.
    Prefix(String),
}

/// Options for [`walk`].
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub validate: Option<PathMatcher>,
    pub slice_root: SliceRoot,
}

/// Lists every file below `root`, recursively.
///
/// The caller must make sure `root` exists; a missing root is an I/O error.
pub fn walk(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry =
            entry.with_context(|| format!("Failed to walk directory '{}'", root.display()))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(validate) = &options.validate {
            if !validate.matches(path) {
                trace!("Skipping '{}': validation failed", path.display());
                continue;
            }
        }

        files.push(slice_path(root, path, &options.slice_root));
    }

    Ok(files)
}

fn slice_path(root: &Path, path: &Path, slice_root: &SliceRoot) -> PathBuf {
    match slice_root {
        SliceRoot::Root => path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf()),
        SliceRoot::Keep => path.to_path_buf(),
        SliceRoot::Prefix(prefix) => {
            let full = path.to_string_lossy();
            match full.strip_prefix(prefix.as_str()) {
                Some(rest) => PathBuf::from(rest),
                None => path.to_path_buf(),
            }
        }
    }
}
