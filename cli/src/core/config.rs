//! # Blueprint Kit Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, expands and validates the TOML configuration
//! that describes the host build layout, the blueprint to resolve and the
//! named blueprints known to `blueprint eject`.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (used alone when given)
//! 2. Project-specific `blueprint.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Project sections replace user sections wholesale; the `[blueprints]` name
//! table is merged key by key. Relative paths are resolved against the
//! directory of the file that declared them, and `~` is expanded.
//!
//! ## Examples
//!
//! ```toml
//! [host]
//! root_dir = "."
//! build_dir = ".build"
//! app_dir = "app"
//!
//! [blueprint]
//! id = "docs"
//! dir = "./blueprints/docs"
//! filter = { regex = "\\.(js|vue|css)$" }
//! webpack_aliases = ["docs", ["docs-theme", "./theme"]]
//! plugins_strategy = "push"
//!
//! [blueprint.variables]
//! background_color = "gold"
//!
//! [blueprints]
//! press = "~/blueprints/press"
//! ```
//!
use crate::core::error::{BlueprintError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the merged configuration.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub host: HostConfig,
    pub blueprint: BlueprintConfig,
    /// Named blueprints for `blueprint eject <name>/<key>`: name -> directory.
    pub blueprints: BTreeMap<String, String>,
    pub eject: EjectConfig,
}

/// On-disk shape of a configuration file. Sections are optional so that a
/// project file only overrides the sections it declares.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    host: Option<HostConfig>,
    blueprint: Option<BlueprintConfig>,
    #[serde(default)]
    blueprints: BTreeMap<String, String>,
    eject: Option<EjectConfig>,
}

/// Layout of the host build system.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Project root. Theme ejection writes here.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
    /// Application sources. Defaults to `root_dir`.
    #[serde(default)]
    pub src_dir: Option<String>,
    /// Build output root. Relative values are resolved against `root_dir`.
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
    /// Name of the app directory below `src_dir` that holds overrides.
    #[serde(default = "default_app_dir")]
    pub app_dir: String,
    /// Serving options for static-file middleware.
    #[serde(default, rename = "static")]
    pub static_files: StaticConfig,
}

/// Options for static-file middleware registered by blueprints.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StaticConfig {
    /// URL path the middleware is mounted at.
    #[serde(default = "default_static_prefix")]
    pub prefix: String,
    /// Serve `index.html` for directory requests.
    #[serde(default = "default_true")]
    pub index: bool,
}

/// Options of the configured blueprint.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BlueprintConfig {
    pub id: Option<String>,
    /// Directory to discover files in and resolve relative paths against.
    pub dir: Option<String>,
    #[serde(default = "default_true")]
    pub autodiscover: bool,
    pub filter: Option<FilterConfig>,
    pub validate: Option<FilterConfig>,
    pub webpack_aliases: Option<WebpackAliases>,
    #[serde(default = "default_plugins_strategy")]
    pub plugins_strategy: String,
    /// Extra template variables.
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

/// A discovery filter or walker validation as written in TOML.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FilterConfig {
    /// Plain string: extension substring (filter) or path substring (validate).
    Text(String),
    /// `{ regex = "..." }`
    Pattern { regex: String },
}

/// Build-config alias wiring.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum WebpackAliases {
    /// `true` aliases the blueprint id to `build_dir/<id>`.
    Enabled(bool),
    /// A single alias to `build_dir/<alias>`.
    Single(String),
    /// Several aliases, each a name or an `[alias, path]` pair.
    List(Vec<AliasEntry>),
}

/// One entry of [`WebpackAliases::List`].
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum AliasEntry {
    Name(String),
    Pair(String, String),
}

/// Options of `blueprint eject`.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct EjectConfig {
    /// File in `root_dir` that theme ejection appends to.
    #[serde(default = "default_theme_file")]
    pub theme_file: String,
}

fn default_root_dir() -> String {
    ".".to_string()
}
fn default_build_dir() -> String {
    ".build".to_string()
}
fn default_app_dir() -> String {
    "app".to_string()
}
fn default_static_prefix() -> String {
    "/".to_string()
}
fn default_true() -> bool {
    true
}
fn default_plugins_strategy() -> String {
    "unshift".to_string()
}
fn default_theme_file() -> String {
    "blueprint.css".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            src_dir: None,
            build_dir: default_build_dir(),
            app_dir: default_app_dir(),
            static_files: StaticConfig::default(),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            prefix: default_static_prefix(),
            index: true,
        }
    }
}

impl Default for BlueprintConfig {
    fn default() -> Self {
        Self {
            id: None,
            dir: None,
            autodiscover: true,
            filter: None,
            validate: None,
            webpack_aliases: None,
            plugins_strategy: default_plugins_strategy(),
            variables: HashMap::new(),
        }
    }
}

impl Default for EjectConfig {
    fn default() -> Self {
        Self {
            theme_file: default_theme_file(),
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = "blueprint.toml";

/// Loads the configuration. With `explicit`, only that file is read.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            let file = load_config_from_path(path)?;
            let base = config_base_dir(path)?;
            merge_configs(None, Some((file, base)))
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config, project_config)
        }
    };
    finalize_host_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<(ConfigFile, PathBuf)>> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "BlueprintKit", "blueprint") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            let file = load_config_from_path(&config_path)?;
            let base = config_base_dir(&config_path)?;
            Ok(Some((file, base)))
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<(ConfigFile, PathBuf)>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            let file = load_config_from_path(&path)?;
            let base = config_base_dir(&path)?;
            Ok(Some((file, base)))
        }
        None => {
            debug!("No project configuration file (blueprint.toml) found; using defaults relative to the current directory.");
            Ok(Some((ConfigFile::default(), current_dir)))
        }
    }
}

/// Walks from `start` up to the filesystem root (or the first `.git` directory)
/// looking for `blueprint.toml`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn config_base_dir(config_path: &Path) -> Result<PathBuf> {
    let parent = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    match parent {
        Some(p) if p.is_absolute() => Ok(p),
        Some(p) => Ok(std::env::current_dir()
            .context("Failed to get current directory")?
            .join(p)),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Merges two files: project sections replace user sections, named blueprints
/// are merged. Relative paths are resolved against the declaring file's directory.
fn merge_configs(
    user: Option<(ConfigFile, PathBuf)>,
    project: Option<(ConfigFile, PathBuf)>,
) -> Config {
    let mut merged = Config::default();
    for (file, base) in [user, project].into_iter().flatten() {
        if let Some(mut host) = file.host {
            host.root_dir = resolve_path(&host.root_dir, &base);
            host.src_dir = host.src_dir.map(|d| resolve_path(&d, &base));
            merged.host = host;
        } else if merged.host.root_dir == default_root_dir() {
            merged.host.root_dir = resolve_path(&merged.host.root_dir, &base);
        }
        if let Some(mut blueprint) = file.blueprint {
            blueprint.dir = blueprint.dir.map(|d| resolve_path(&d, &base));
            if let Some(WebpackAliases::List(entries)) = blueprint.webpack_aliases.as_mut() {
                for entry in entries.iter_mut() {
                    if let AliasEntry::Pair(_, path) = entry {
                        *path = resolve_path(path, &base);
                    }
                }
            }
            merged.blueprint = blueprint;
        }
        for (name, dir) in file.blueprints {
            merged.blueprints.insert(name, resolve_path(&dir, &base));
        }
        if let Some(eject) = file.eject {
            merged.eject = eject;
        }
    }
    merged
}

/// Expands `~` and makes `path` absolute relative to `base`.
fn resolve_path(path: &str, base: &Path) -> String {
    let expanded = shellexpand::tilde(path).into_owned();
    let candidate = PathBuf::from(&expanded);
    if candidate.is_absolute() {
        expanded
    } else {
        base.join(candidate).to_string_lossy().to_string()
    }
}

/// `src_dir` defaults to `root_dir`; `build_dir` is relative to `root_dir`.
fn finalize_host_paths(config: &mut Config) {
    let root = PathBuf::from(&config.host.root_dir);
    if config.host.src_dir.is_none() {
        config.host.src_dir = Some(config.host.root_dir.clone());
    }
    config.host.build_dir = resolve_path(&config.host.build_dir, &root);
    debug!("Resolved build directory: {}", config.host.build_dir);
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(dir) = &config.blueprint.dir {
        let bp_dir = PathBuf::from(dir);
        if !bp_dir.exists() {
            warn!("Configured blueprint directory '{}' does not exist.", dir);
        } else if !bp_dir.is_dir() {
            return Err(anyhow!(BlueprintError::Config(format!(
                "Configured blueprint path '{}' exists but is not a directory.",
                dir
            ))));
        }
    }
    if let Some(id) = &config.blueprint.id {
        if id.is_empty() || id.contains('/') || id.contains('\\') {
            return Err(anyhow!(BlueprintError::Config(format!(
                "Invalid blueprint id '{}': must be a non-empty single path segment.",
                id
            ))));
        }
    }
    for filter in [&config.blueprint.filter, &config.blueprint.validate]
        .into_iter()
        .flatten()
    {
        if let FilterConfig::Pattern { regex } = filter {
            regex::Regex::new(regex).map_err(|e| anyhow!(BlueprintError::from(e)))?;
        }
    }
    if config.host.app_dir.is_empty() {
        return Err(anyhow!(BlueprintError::Config(
            "host.app_dir cannot be empty.".to_string()
        )));
    }
    let theme_file = &config.eject.theme_file;
    if theme_file.is_empty() || theme_file.contains('/') || theme_file.contains('\\') {
        return Err(anyhow!(BlueprintError::Config(format!(
            "eject.theme_file '{}' must be a plain file name.",
            theme_file
        ))));
    }
    Ok(())
}
