//! # Blueprint Kit Integration Test Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: a command
//! pointing at the compiled `blueprint` binary and a fixture that lays out a
//! small blueprint plus a `blueprint.toml` in a temporary directory.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command for the compiled `blueprint` binary. `RUST_LOG` is cleared so
/// output does not depend on the caller's environment.
pub fn blueprint_cmd() -> Command {
    let mut cmd = Command::cargo_bin("blueprint").expect("Failed to find blueprint binary for testing");
    cmd.env_remove("RUST_LOG").env_remove("BLUEPRINT_CONFIG");
    cmd
}

/// A project directory containing `bp/` (blueprint id `docs`) and a
/// `blueprint.toml` pointing at it.
pub fn project_fixture() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = dir.path();

    write(root, "bp/layouts/docs.tmpl.vue", "<div>{{ id }}</div>");
    write(root, "bp/plugins/my-plugin.$tmpl.js", "export const id = '{{ id }}'");
    write(root, "bp/plugins/other-plugin.js", "export default {}");
    write(root, "bp/static/robots.txt", "User-agent: *");
    write(root, "bp/styles/main.css", "body { margin: 0; }");
    write(root, "bp/theme.css", ":root { --accent: teal; }");
    write(root, "bp/empty.js", "");

    write(
        root,
        "blueprint.toml",
        r#"[host]
build_dir = ".build"

[blueprint]
id = "docs"
dir = "bp"
"#,
    );
    dir
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(path, content).expect("Failed to write fixture file");
}
