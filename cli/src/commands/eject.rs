//! # Blueprint Eject Command
//!
//! File: cli/src/commands/eject.rs
//!
//! ## Overview
//!
//! This module implements `blueprint eject <template-key>`, which copies a
//! blueprint file into the application's override directory
//! (`src_dir/app_dir/<id>/<rel>`). Later builds pick the ejected copy up
//! through override resolution, so the user can customize it freely.
//!
//! ## Architecture
//!
//! 1. Validate the key and pick the blueprint directory: a named blueprint
//!    (`<name>/<key>`, from `[blueprints]`) or the configured `[blueprint]`.
//! 2. `theme` is special: `<dir>/theme.css` is appended to
//!    `root_dir/<eject.theme_file>`.
//! 3. Otherwise the directory is discovered and the key resolved with
//!    `blueprint::selector`. Several candidates open a multi-select prompt.
//! 4. Each selected file is copied; empty sources are skipped with a warning.
//!
//! Every user-input problem is reported before anything is written.
//!
//! ## Examples
//!
//! ```bash
//! # Eject one layout of the configured blueprint
//! blueprint eject layouts/docs.tmpl.vue
//!
//! # Eject all plugins of the named blueprint "press"
//! blueprint eject press/plugins
//!
//! # Append the theme stylesheet to ./blueprint.css
//! blueprint eject theme
//! ```
//!
use crate::blueprint::discovery::{self, DiscoverOptions};
use crate::blueprint::options::BlueprintOptions;
use crate::blueprint::paths::FileDescriptor;
use crate::blueprint::selector::{self, KeyMatch};
use crate::common::fs::io;
use crate::common::ui::prompts;
use crate::core::config::Config;
use crate::core::error::{BlueprintError, Result};
use crate::host::HostOptions;
use anyhow::anyhow;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// # Eject Arguments (`EjectArgs`)
#[derive(Parser, Debug)]
pub struct EjectArgs {
    /// Template key: a type (`plugins`), a file (`layouts/docs.tmpl.vue`),
    /// a file name suffix, `theme`, or any of these prefixed with `<blueprint>/`.
    template_key: Option<String>,
}

/// Where an eject reads from.
#[derive(Debug, PartialEq, Eq)]
struct EjectTarget {
    id: String,
    dir: PathBuf,
    key: String,
    /// Configured blueprint: discovery uses its filters.
    configured: bool,
}

fn user_error(message: String) -> anyhow::Error {
    anyhow!(BlueprintError::UserInput(message))
}

/// # Handle Eject Command (`handle_eject`)
pub async fn handle_eject(args: EjectArgs, config: &Config) -> Result<()> {
    let key = args
        .template_key
        .as_deref()
        .map(selector::normalize_key)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            user_error(
                "A template key identifying the template you wish to eject is required"
                    .to_string(),
            )
        })?;

    let target = resolve_target(config, &key)?;
    if !target.dir.is_dir() {
        return Err(user_error(format!(
            "Blueprint path '{}' is empty or does not exists",
            target.dir.display()
        )));
    }
    debug!("Ejecting '{}' from {:?}", target.key, target.dir);

    let host_options = HostOptions::from_config(&config.host);
    if target.key == "theme" {
        return eject_theme(&host_options, &config.eject.theme_file, &target.dir).await;
    }

    let options = if target.configured {
        let configured = BlueprintOptions::from_config(&config.blueprint)?;
        DiscoverOptions {
            filter: configured.filter,
            validate: configured.validate,
        }
    } else {
        DiscoverOptions::default()
    };
    let files = discovery::discover(&target.dir, &options).await?;
    if files.is_empty() {
        return Err(user_error(format!(
            "Unrecognized blueprint path, autodiscovery failed for '{}'",
            target.dir.display()
        )));
    }

    let templates = match selector::match_template_key(&files, &target.id, &target.key) {
        KeyMatch::Bucket(templates) => templates,
        KeyMatch::Exact(template) => vec![template],
        KeyMatch::Candidates(candidates) if candidates.len() == 1 => candidates,
        KeyMatch::Candidates(candidates) if candidates.is_empty() => Vec::new(),
        KeyMatch::Candidates(candidates) => select_candidates(&target.key, candidates)?,
    };
    if templates.is_empty() {
        return Err(user_error(format!(
            "Unrecognized template key '{}'",
            target.key
        )));
    }

    eject_templates(&host_options, &target.id, &templates).await
}

/// Picks the blueprint an eject key refers to.
///
/// `<name>/<rest>` with a known name selects that named blueprint. Otherwise
/// the configured blueprint is used; without one, a `<name>/` prefix is an
/// unknown blueprint.
fn resolve_target(config: &Config, key: &str) -> Result<EjectTarget> {
    if let Some((name, rest)) = key.split_once('/') {
        if let Some(dir) = config.blueprints.get(name) {
            return Ok(EjectTarget {
                id: name.to_string(),
                dir: PathBuf::from(dir),
                key: rest.to_string(),
                configured: false,
            });
        }
    }

    match &config.blueprint.dir {
        Some(dir) => Ok(EjectTarget {
            id: config
                .blueprint
                .id
                .clone()
                .unwrap_or_else(|| "blueprint".to_string()),
            dir: PathBuf::from(dir),
            key: key.to_string(),
            configured: true,
        }),
        None => match key.split_once('/') {
            Some((name, _)) => Err(user_error(format!("Unrecognized blueprint '{}'", name))),
            None => Err(user_error(
                "Blueprint path '' is empty or does not exists".to_string(),
            )),
        },
    }
}

fn select_candidates(key: &str, candidates: Vec<FileDescriptor>) -> Result<Vec<FileDescriptor>> {
    let labels: Vec<String> = candidates.iter().map(FileDescriptor::key).collect();
    let selected = prompts::select_many(
        &format!("Key '{}' matches several templates, select the ones to eject", key),
        &labels,
    )?;
    Ok(selected
        .into_iter()
        .filter_map(|idx| candidates.get(idx).cloned())
        .collect())
}

/// Appends `<discovery_path>/theme.css` to `root_dir/<theme_file>`.
pub async fn eject_theme(
    host: &HostOptions,
    theme_file: &str,
    discovery_path: &Path,
) -> Result<()> {
    let content = io::read_file(&discovery_path.join("theme.css")).await?;
    if content.is_empty() {
        warn!("Reading from theme.css returned empty content, eject aborted");
        return Ok(());
    }

    io::append_file(&host.root_dir.join(theme_file), &content).await?;
    info!("Ejected to ./{}", theme_file);
    Ok(())
}

/// Ensures the blueprint's app directory and ejects every template into it.
pub async fn eject_templates(
    host: &HostOptions,
    id: &str,
    templates: &[FileDescriptor],
) -> Result<()> {
    let app_root = host.src_dir.join(&host.app_dir).join(id);
    io::ensure_dir(&app_root).await?;

    for template in templates {
        eject_template(host, template, &app_root).await?;
    }
    Ok(())
}

/// Copies one template to `app_root/<destination_relative>`.
pub async fn eject_template(
    host: &HostOptions,
    template: &FileDescriptor,
    app_root: &Path,
) -> Result<()> {
    let Some(source) = &template.source else {
        debug!("Skipping '{}': no source", template.key());
        return Ok(());
    };
    let destination = app_root.join(&template.destination_relative);
    debug!(
        "Ejecting template '{}' to '{}'",
        source.display(),
        destination.display()
    );

    let content = io::read_file(source).await?;
    if content.is_empty() {
        let shown = pathdiff::diff_paths(source, &host.root_dir).unwrap_or_else(|| source.clone());
        warn!(
            "Reading source template file returned empty content, eject aborted for: {}",
            shown.display()
        );
        return Ok(());
    }

    io::write_file(&destination, &content).await?;
    let shown = pathdiff::diff_paths(&destination, &host.src_dir).unwrap_or(destination);
    info!("Ejected {}", shown.display());
    Ok(())
}
