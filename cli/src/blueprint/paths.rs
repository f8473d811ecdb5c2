//! # File Descriptors and Template Naming
//!
//! File: cli/src/blueprint/paths.rs
//!
//! ## Overview
//!
//! The data model files travel through during resolution, and the pure
//! functions that derive their paths:
//!
//! - [`FileDescriptor`]: `source` (where the content lives), `destination`
//!   (path below the build dir, prefixed with the blueprint id) and
//!   `destination_relative` (the unprefixed key used in the path mapping).
//! - [`FileEntry`]: a descriptor or the shorthand relative path string.
//! - [`FileSet`]: insertion-ordered `type -> entries` buckets.
//! - [`template_paths`]: descriptor for a shorthand path.
//! - [`template_output_name`]: decides whether a file is a template and what
//!   it is called in the build output.
//!
//! Template classification only looks at the source file name and
//! `destination_relative`, never at contents.
//!
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// File-name markers that make a file a template, checked in this order.
pub const TEMPLATE_MARKERS: [&str; 4] = ["tmpl", "$tmpl", "template", "$template"];

/// Final resolved path per `destination_relative`.
pub type PathMapping = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Absent sources are skipped by every handler.
    pub source: Option<PathBuf>,
    pub destination: PathBuf,
    pub destination_relative: PathBuf,
    /// Plugin flags, only read by the `plugins` handler.
    pub ssr: Option<bool>,
    pub mode: Option<String>,
}

impl FileDescriptor {
    /// A descriptor whose destination is also its relative destination.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        let destination = destination.into();
        Self {
            source: Some(source.into()),
            destination_relative: destination.clone(),
            destination,
            ssr: None,
            mode: None,
        }
    }

    /// Mapping key for this descriptor.
    pub fn key(&self) -> String {
        self.destination_relative.to_string_lossy().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEntry {
    /// Relative (or absolute) path, the same below the blueprint dir and the prefix.
    Path(String),
    Descriptor(FileDescriptor),
}

impl From<&str> for FileEntry {
    fn from(path: &str) -> Self {
        FileEntry::Path(path.to_string())
    }
}

impl From<FileDescriptor> for FileEntry {
    fn from(descriptor: FileDescriptor) -> Self {
        FileEntry::Descriptor(descriptor)
    }
}

/// Files grouped by type. Bucket order is the order types were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    buckets: Vec<(String, Vec<FileEntry>)>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FileSet::extend_type`].
    pub fn with<E: Into<FileEntry>>(mut self, file_type: &str, entries: Vec<E>) -> Self {
        self.extend_type(file_type, entries.into_iter().map(Into::into));
        self
    }

    /// Appends one entry, creating the bucket if needed.
    pub fn push(&mut self, file_type: &str, entry: impl Into<FileEntry>) {
        self.bucket_mut(file_type).push(entry.into());
    }

    pub fn extend_type(&mut self, file_type: &str, entries: impl IntoIterator<Item = FileEntry>) {
        self.bucket_mut(file_type).extend(entries);
    }

    fn bucket_mut(&mut self, file_type: &str) -> &mut Vec<FileEntry> {
        let idx = match self.buckets.iter().position(|(t, _)| t == file_type) {
            Some(idx) => idx,
            None => {
                self.buckets.push((file_type.to_string(), Vec::new()));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[idx].1
    }

    pub fn get(&self, file_type: &str) -> Option<&[FileEntry]> {
        self.buckets
            .iter()
            .find(|(t, _)| t == file_type)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Removes and returns a bucket.
    pub fn take(&mut self, file_type: &str) -> Option<Vec<FileEntry>> {
        let idx = self.buckets.iter().position(|(t, _)| t == file_type)?;
        Some(self.buckets.remove(idx).1)
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(t, _)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FileEntry])> {
        self.buckets.iter().map(|(t, e)| (t.as_str(), e.as_slice()))
    }

    /// Every descriptor entry, in bucket order.
    pub fn descriptors(&self) -> impl Iterator<Item = &FileDescriptor> {
        self.buckets.iter().flat_map(|(_, entries)| {
            entries.iter().filter_map(|entry| match entry {
                FileEntry::Descriptor(d) => Some(d),
                FileEntry::Path(_) => None,
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }
}

impl IntoIterator for FileSet {
    type Item = (String, Vec<FileEntry>);
    type IntoIter = std::vec::IntoIter<(String, Vec<FileEntry>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

/// `prefix/path`. Root components of `path` are dropped so an absolute path
/// stays below the prefix: `("docs", "/abs/x.js")` -> `docs/abs/x.js`.
pub fn prefixed(prefix: &str, path: &Path) -> PathBuf {
    let mut out = PathBuf::from(prefix);
    out.extend(
        path.components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_))),
    );
    out
}

/// Descriptor for a shorthand path. Relative paths are joined to `root_dir`.
pub fn template_paths(file_path: &str, root_dir: &Path, prefix: Option<&str>) -> FileDescriptor {
    let relative = PathBuf::from(file_path);
    let source = if relative.is_absolute() {
        relative.clone()
    } else {
        root_dir.join(&relative)
    };
    let destination = match prefix {
        Some(prefix) => prefixed(prefix, &relative),
        None => relative.clone(),
    };
    FileDescriptor {
        source: Some(source),
        destination,
        destination_relative: relative,
        ssr: None,
        mode: None,
    }
}

/// Returns the output name when `descriptor` is a template, `None` for a
/// static file.
///
/// The first marker found as `.<marker>.` in the source file name wins. When
/// the source does not end with `destination_relative` the caller chose a
/// custom destination, which is used as-is. Otherwise the marker is removed
/// from the name and, for `$` markers, `.<id>` is inserted before the
/// extension: `docs.tmpl.vue` -> `docs.vue`, `my-plugin.$tmpl.js` ->
/// `my-plugin.<id>.js`.
pub fn template_output_name(descriptor: &FileDescriptor, id: &str) -> Option<PathBuf> {
    let source = descriptor.source.as_ref()?;
    let file_name = source.file_name()?.to_string_lossy().to_string();
    let marker = TEMPLATE_MARKERS
        .iter()
        .find(|marker| file_name.contains(&format!(".{}.", marker)))?;

    if !source.ends_with(&descriptor.destination_relative) {
        return Some(descriptor.destination.clone());
    }

    let (stem, ext) = match file_name.rfind('.') {
        Some(idx) if idx > 0 => (&file_name[..idx], &file_name[idx..]),
        _ => (file_name.as_str(), ""),
    };
    let suffix = format!(".{}", marker);
    let stem = stem.strip_suffix(suffix.as_str()).unwrap_or(stem);
    let id_infix = if marker.starts_with('$') {
        format!(".{}", id)
    } else {
        String::new()
    };
    let output = format!("{}{}{}", stem, id_infix, ext);
    Some(match descriptor.destination.parent() {
        Some(parent) => parent.join(output),
        None => PathBuf::from(output),
    })
}
