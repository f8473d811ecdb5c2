//! # Blueprint Path Utilities
//!
//! File: cli/src/blueprint/utils.rs
//!
//! Small pure helpers shared by discovery, filtering and registration:
//! type-name casing and a parsed view of a file path.
//!
use std::path::{Path, PathBuf};

pub use crate::common::fs::io::exists;

/// Uppercases the first character and lowercases the rest (`"HELLO"` -> `"Hello"`).
pub fn ucfirst(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A path split into its parts, the record handed to file filters.
///
/// `ext` is the last extension including the dot (`.vue`), `name` is the base
/// name without it. A leading dot does not start an extension (`.gitignore`
/// has no extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub dir: PathBuf,
    pub base: String,
    pub name: String,
    pub ext: String,
    pub path: PathBuf,
}

impl ParsedPath {
    pub fn parse(path: &Path) -> Self {
        let base = path
            .file_name()
            .map(|b| b.to_string_lossy().to_string())
            .unwrap_or_default();
        let (name, ext) = match base.rfind('.') {
            Some(idx) if idx > 0 => (base[..idx].to_string(), base[idx..].to_string()),
            _ => (base.clone(), String::new()),
        };
        Self {
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            base,
            name,
            ext,
            path: path.to_path_buf(),
        }
    }

    /// Every suffix from the first dot of the base name (`test.js.bak` -> `.js.bak`).
    pub fn compound_ext(&self) -> &str {
        let leading = self.base.len() - self.base.trim_start_matches('.').len();
        match self.base[leading..].find('.') {
            Some(idx) => &self.base[leading + idx..],
            None => "",
        }
    }

    /// First component of `dir`, the discovery type.
    pub fn top_dir(&self) -> Option<String> {
        self.dir
            .components()
            .next()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ucfirst() {
        assert_eq!(ucfirst("HELLO"), "Hello");
        assert_eq!(ucfirst("modules"), "Modules");
        assert_eq!(ucfirst(""), "");
    }

    #[test]
    fn test_parse_path() {
        let parsed = ParsedPath::parse(Path::new("layouts/docs.tmpl.vue"));
        assert_eq!(parsed.dir, PathBuf::from("layouts"));
        assert_eq!(parsed.base, "docs.tmpl.vue");
        assert_eq!(parsed.name, "docs.tmpl");
        assert_eq!(parsed.ext, ".vue");
        assert_eq!(parsed.compound_ext(), ".tmpl.vue");
        assert_eq!(parsed.top_dir().as_deref(), Some("layouts"));
    }

    #[test]
    fn test_parse_dotfile_and_bare_name() {
        let dotfile = ParsedPath::parse(Path::new(".eslintrc"));
        assert_eq!(dotfile.ext, "");
        assert_eq!(dotfile.compound_ext(), "");
        assert_eq!(dotfile.top_dir(), None);

        let dotted = ParsedPath::parse(Path::new(".eslintrc.js"));
        assert_eq!(dotted.ext, ".js");
        assert_eq!(dotted.compound_ext(), ".js");

        let bare = ParsedPath::parse(Path::new("LICENSE"));
        assert_eq!(bare.name, "LICENSE");
        assert_eq!(bare.ext, "");
    }

    #[test]
    fn test_parse_nested_top_dir() {
        let parsed = ParsedPath::parse(Path::new("plugins/nested/deep.js"));
        assert_eq!(parsed.top_dir().as_deref(), Some("plugins"));
        assert_eq!(parsed.dir, PathBuf::from("plugins/nested"));
    }
}
