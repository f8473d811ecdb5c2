//! # Discovery Filters
//!
//! File: cli/src/blueprint/filter.rs
//!
//! ## Overview
//!
//! Builds the predicates discovery uses to decide which walked files belong
//! in a [`FileSet`](super::paths::FileSet), and the matcher passed to the
//! walker as `validate`.
//!
//! A [`FileFilter`] is one of:
//! - `Pattern`: the regex is tested against the base name (`test.js`).
//! - `Extension`: substring match against the compound extension, so `.js`
//!   matches `test.js` and `test.js.bak` but not `test.bak`.
//! - `Predicate`: any function over a [`ParsedPath`].
//!
use super::utils::ParsedPath;
use crate::common::fs::walk::PathMatcher;
use crate::core::config::FilterConfig;
use crate::core::error::{BlueprintError, Result};
use anyhow::anyhow;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Compiled file filter.
pub type FilterFn = Arc<dyn Fn(&ParsedPath) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum FileFilter {
    Pattern(Regex),
    Extension(String),
    Predicate(FilterFn),
}

impl fmt::Debug for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFilter::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            FileFilter::Extension(s) => f.debug_tuple("Extension").field(s).finish(),
            FileFilter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl FileFilter {
    /// Compiles a configured filter. Plain strings are extension filters.
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        match config {
            FilterConfig::Text(ext) => Ok(FileFilter::Extension(ext.clone())),
            FilterConfig::Pattern { regex } => Ok(FileFilter::Pattern(compile(regex)?)),
        }
    }
}

/// Returns `None` when no filter is configured (everything matches).
pub fn create_file_filter(filter: Option<&FileFilter>) -> Option<FilterFn> {
    match filter? {
        FileFilter::Pattern(re) => {
            let re = re.clone();
            Some(Arc::new(move |parsed: &ParsedPath| re.is_match(&parsed.base)))
        }
        FileFilter::Extension(needle) => {
            let needle = needle.clone();
            Some(Arc::new(move |parsed: &ParsedPath| {
                parsed.compound_ext().contains(needle.as_str())
            }))
        }
        FileFilter::Predicate(f) => Some(Arc::clone(f)),
    }
}

/// Compiles a configured `validate` into a walker matcher. Plain strings are
/// path substrings.
pub fn create_path_matcher(config: &FilterConfig) -> Result<PathMatcher> {
    match config {
        FilterConfig::Text(needle) => Ok(PathMatcher::Contains(needle.clone())),
        FilterConfig::Pattern { regex } => Ok(PathMatcher::Pattern(compile(regex)?)),
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| anyhow!(BlueprintError::from(e)))
}
