//! # Eject Key Selector
//!
//! File: cli/src/blueprint/selector.rs
//!
//! Resolves the key given to `blueprint eject` against a discovered
//! [`FileSet`]. In order of preference:
//!
//! 1. a type name selects the whole bucket (`plugins`);
//! 2. an exact `destination_relative`, optionally prefixed with the blueprint
//!    id, selects that file (`layouts/docs.tmpl.vue`, `docs/layouts/docs.tmpl.vue`);
//! 3. otherwise every file whose key ends with the given key is a candidate
//!    (`docs.tmpl.vue`). The caller decides what to do with several.
//!
use super::paths::{FileDescriptor, FileEntry, FileSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMatch {
    Bucket(Vec<FileDescriptor>),
    Exact(FileDescriptor),
    /// Suffix matches. Empty when the key is unknown.
    Candidates(Vec<FileDescriptor>),
}

/// Strips a leading `./` and surrounding whitespace from a user-supplied key.
pub fn normalize_key(key: &str) -> String {
    let key = key.trim();
    key.strip_prefix("./").unwrap_or(key).to_string()
}

pub fn match_template_key(files: &FileSet, id: &str, key: &str) -> KeyMatch {
    if let Some(entries) = files.get(key) {
        return KeyMatch::Bucket(
            entries
                .iter()
                .filter_map(|entry| match entry {
                    FileEntry::Descriptor(d) => Some(d.clone()),
                    FileEntry::Path(_) => None,
                })
                .collect(),
        );
    }

    let qualified = |d: &FileDescriptor| format!("{}/{}", id, d.key());
    if let Some(exact) = files
        .descriptors()
        .find(|d| d.key() == key || qualified(d) == key)
    {
        return KeyMatch::Exact(exact.clone());
    }

    KeyMatch::Candidates(
        files
            .descriptors()
            .filter(|d| !key.is_empty() && qualified(d).ends_with(key))
            .cloned()
            .collect(),
    )
}
