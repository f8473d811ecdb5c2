//! # `blueprint eject` Integration Tests
//!
//! File: cli/tests/eject.rs
//!

mod common;
use common::{blueprint_cmd, project_fixture, write};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_eject_requires_key() {
    let project = project_fixture();
    blueprint_cmd()
        .current_dir(project.path())
        .arg("eject")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A template key identifying the template you wish to eject is required",
        ));
}

#[test]
fn test_eject_unknown_named_blueprint() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "blueprint.toml", "[blueprints]\npress = \"press\"\n");
    blueprint_cmd()
        .current_dir(dir.path())
        .args(["eject", "blueprint/key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized blueprint 'blueprint'"));
}

#[test]
fn test_eject_missing_blueprint_dir() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "blueprint.toml", "[blueprint]\ndir = \"nowhere\"\n");
    blueprint_cmd()
        .current_dir(dir.path())
        .args(["eject", "layouts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is empty or does not exists"));
}

#[test]
fn test_eject_unknown_template_key() {
    let project = project_fixture();
    blueprint_cmd()
        .current_dir(project.path())
        .args(["eject", "template-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized template key 'template-key'"));
}

#[test]
fn test_eject_ambiguous_key_without_terminal() {
    let project = project_fixture();
    // Several files end with ".js"; without a terminal nothing is selected.
    blueprint_cmd()
        .current_dir(project.path())
        .args(["eject", ".js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized template key '.js'"));
    assert!(!project.path().join("app/docs/plugins").exists());
}

#[test]
fn test_eject_single_file() {
    let project = project_fixture();
    blueprint_cmd()
        .current_dir(project.path())
        .args(["eject", "./layouts/docs.tmpl.vue"])
        .assert()
        .success();

    let ejected = project.path().join("app/docs/layouts/docs.tmpl.vue");
    assert_eq!(fs::read_to_string(ejected).unwrap(), "<div>{{ id }}</div>");
}

#[test]
fn test_eject_type_bucket() {
    let project = project_fixture();
    blueprint_cmd()
        .current_dir(project.path())
        .args(["eject", "plugins"])
        .assert()
        .success();

    let plugins = project.path().join("app/docs/plugins");
    assert!(plugins.join("my-plugin.$tmpl.js").is_file());
    assert!(plugins.join("other-plugin.js").is_file());
}

#[test]
fn test_eject_empty_file_is_skipped() {
    let project = project_fixture();
    blueprint_cmd()
        .current_dir(project.path())
        .args(["eject", "empty.js"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Reading source template file returned empty content, eject aborted for: bp/empty.js",
        ));
    assert!(project.path().join("app/docs").is_dir());
    assert!(!project.path().join("app/docs/empty.js").exists());
}

#[test]
fn test_eject_theme_appends_to_theme_file() {
    let project = project_fixture();
    write(project.path(), "blueprint.css", "/* site */\n");
    blueprint_cmd()
        .current_dir(project.path())
        .args(["-v", "eject", "theme"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Ejected to ./blueprint.css"));

    assert_eq!(
        fs::read_to_string(project.path().join("blueprint.css")).unwrap(),
        "/* site */\n:root { --accent: teal; }"
    );
}

#[test]
fn test_eject_from_named_blueprint_with_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "press/layouts/post.vue", "<article/>");
    write(
        dir.path(),
        "conf/site.toml",
        "[host]\nroot_dir = \"..\"\n\n[blueprints]\npress = \"../press\"\n",
    );

    blueprint_cmd()
        .current_dir(dir.path())
        .args(["--config", "conf/site.toml", "eject", "press/layouts/post.vue"])
        .assert()
        .success();

    assert!(dir.path().join("app/press/layouts/post.vue").is_file());
}
