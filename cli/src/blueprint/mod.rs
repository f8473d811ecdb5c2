//! # Blueprint Engine (`blueprint`)
//!
//! File: cli/src/blueprint/mod.rs
//!
//! ## Overview
//!
//! A blueprint is a directory of categorized files (plugins, layouts,
//! styles, static files, assets, ...) that gets merged into a host build.
//! This module discovers those files, decides which are templates, copies or
//! registers them with the [`Host`] and keeps the mapping from each file's
//! relative key to its final path below the build directory.
//!
//! ## Architecture
//!
//! - **`utils`**, **`filter`**: path parsing, casing and discovery filters.
//! - **`guard`**: run-once guards for singleton kinds and `setup`.
//! - **`options`**: immutable [`BlueprintOptions`](options::BlueprintOptions).
//! - **`paths`**: descriptors, file sets and template naming.
//! - **`discovery`**: groups a directory's files by type.
//! - **`resolve`**: app overrides, templates and copies.
//! - **`handlers`**: per-type registration with the host.
//! - **`selector`**: key matching for `blueprint eject`.
//!
//! ## Lifecycle
//!
//! ```text
//! Blueprint::new ─► init ─┬─► setup (aliases, once per process)
//!                         ├─► resolve_files(static)  (immediately)
//!                         └─► hook BuilderPrepared
//! Builder::prepare ─► builder_prepared ─► autodiscover + resolve_files(rest)
//! ```
//!
//! ## Examples
//!
//! ```rust
//! let options = BlueprintOptions::with_dir("/srv/blueprints/docs");
//! let mut blueprint = Blueprint::new(BlueprintKind::BASE, options, GuardRegistry::process())?;
//! let files = blueprint.autodiscover(None, None).await?;
//! let mapping = blueprint.resolve_files(&mut host, files, None).await?;
//! ```
//!
pub mod discovery;
pub mod filter;
pub mod guard;
pub mod handlers;
pub mod options;
pub mod paths;
pub mod resolve;
pub mod selector;
pub mod utils;

use crate::core::config::{AliasEntry, WebpackAliases};
use crate::core::error::{BlueprintError, Result};
use crate::host::{BuildConfig, HookEvent, Host};
use anyhow::anyhow;
use discovery::DiscoverOptions;
use guard::GuardRegistry;
use handlers::RegistrationHandler;
use options::{BlueprintOptions, PluginsStrategy};
use paths::{prefixed, template_paths, FileDescriptor, FileEntry, FileSet, PathMapping};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use utils::ucfirst;

/// Guard owner for process-wide, kind-independent steps.
const BASE_GUARD_OWNER: &str = "Blueprint";

/// Describes a blueprint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlueprintKind {
    pub name: &'static str,
    /// Used when the options carry no id.
    pub default_id: Option<&'static str>,
    /// Singleton kinds can be constructed once per guard registry.
    pub singleton: bool,
}

impl BlueprintKind {
    pub const BASE: BlueprintKind = BlueprintKind {
        name: "Blueprint",
        default_id: None,
        singleton: false,
    };
}

#[derive(Debug)]
pub struct Blueprint {
    kind: BlueprintKind,
    id: String,
    options: BlueprintOptions,
    template_vars: HashMap<String, String>,
    /// Cumulative over every `resolve_files` call.
    files_mapping: BTreeMap<String, PathBuf>,
    /// Files waiting for the prepared hook.
    pending: Option<FileSet>,
    guards: Arc<GuardRegistry>,
}

impl Blueprint {
    /// Fails with [`BlueprintError::SingletonViolation`] when a singleton kind
    /// was already constructed with this registry.
    pub fn new(
        kind: BlueprintKind,
        options: BlueprintOptions,
        guards: Arc<GuardRegistry>,
    ) -> Result<Self> {
        if kind.singleton && !guards.run_once(kind.name, "constructed") {
            return Err(anyhow!(BlueprintError::SingletonViolation {
                name: kind.name.to_string()
            }));
        }

        let id = options
            .id
            .clone()
            .or_else(|| kind.default_id.map(str::to_string))
            .unwrap_or_else(|| "blueprint".to_string());

        let mut template_vars = HashMap::new();
        if let Some(dir) = &options.dir {
            template_vars.insert("dir".to_string(), dir.display().to_string());
        }
        template_vars.insert("autodiscover".to_string(), options.autodiscover.to_string());
        if let PluginsStrategy::Named(name) = &options.plugins_strategy {
            template_vars.insert("plugins_strategy".to_string(), name.clone());
        }
        template_vars.extend(options.variables.clone());
        template_vars.insert("id".to_string(), id.clone());

        debug!("{}: constructed with id '{}'", kind.name, id);
        Ok(Self {
            kind,
            id,
            options,
            template_vars,
            files_mapping: BTreeMap::new(),
            pending: None,
            guards,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> BlueprintKind {
        self.kind
    }

    pub fn options(&self) -> &BlueprintOptions {
        &self.options
    }

    pub fn dir(&self) -> Option<&Path> {
        self.options.dir.as_deref()
    }

    /// Wires build aliases. Runs once per process for all blueprints.
    pub fn setup(&self, host: &mut Host) {
        if !self.guards.run_once(BASE_GUARD_OWNER, "setup") {
            return;
        }
        let Some(webpack_aliases) = &self.options.webpack_aliases else {
            return;
        };

        let build_dir = host.build_dir().to_path_buf();
        let aliases: Vec<(String, PathBuf)> = match webpack_aliases {
            WebpackAliases::Enabled(false) => Vec::new(),
            WebpackAliases::Enabled(true) => vec![(self.id.clone(), build_dir.join(&self.id))],
            WebpackAliases::Single(alias) => vec![(alias.clone(), build_dir.join(alias))],
            WebpackAliases::List(entries) => entries
                .iter()
                .map(|entry| match entry {
                    AliasEntry::Name(alias) => (alias.clone(), build_dir.join(alias)),
                    AliasEntry::Pair(alias, path) => (alias.clone(), PathBuf::from(path)),
                })
                .collect(),
        };
        if aliases.is_empty() {
            return;
        }

        debug!("{}: registering {} build alias(es)", self.kind.name, aliases.len());
        host.extend_build(Box::new(move |config: &mut BuildConfig| {
            for (alias, path) in &aliases {
                config.resolve_alias.insert(alias.clone(), path.clone());
            }
        }));
    }

    /// Runs setup, resolves `static` files right away and defers the rest
    /// to the `BuilderPrepared` hook.
    pub async fn init(&mut self, host: &mut Host, files: Option<FileSet>) -> Result<()> {
        self.setup(host);

        let mut files = files;
        if let Some(static_files) = files.as_mut().and_then(|f| f.take("static")) {
            let mut immediate = FileSet::new();
            immediate.extend_type("static", static_files);
            self.resolve_files(host, immediate, None).await?;
        }

        host.hook(HookEvent::BuilderPrepared, &self.id);
        self.pending = files;
        Ok(())
    }

    /// Autodiscovers (when enabled) and resolves, then resolves the files
    /// deferred by `init`. Returns the final mapping.
    pub async fn builder_prepared(&mut self, host: &mut Host) -> Result<PathMapping> {
        info!("{}: resolving files for '{}'", self.kind.name, self.id);
        let mut mapping = self.mapping_snapshot(host.build_dir());

        if self.options.autodiscover {
            let discovered = self.autodiscover(None, None).await?;
            mapping = self.resolve_files(host, discovered, None).await?;
        }

        if let Some(files) = self.pending.take() {
            mapping = self.resolve_files(host, files, None).await?;
        }

        Ok(mapping)
    }

    /// Descriptor for an entry. Descriptors pass through unchanged; paths are
    /// rooted at `root_dir` (default: the blueprint dir) and prefixed.
    pub fn create_template_paths(
        &self,
        entry: FileEntry,
        root_dir: Option<&Path>,
        prefix: Option<&str>,
    ) -> FileDescriptor {
        match entry {
            FileEntry::Descriptor(descriptor) => descriptor,
            FileEntry::Path(path) => {
                let root = root_dir.or(self.dir()).unwrap_or_else(|| Path::new(""));
                template_paths(&path, root, prefix)
            }
        }
    }

    /// Discovers files below `root_dir` (default: the blueprint dir). Filters
    /// fall back to the configured ones. No root yields an empty set.
    pub async fn autodiscover(
        &self,
        root_dir: Option<&Path>,
        options: Option<&DiscoverOptions>,
    ) -> Result<FileSet> {
        let Some(root) = root_dir.or(self.dir()) else {
            return Ok(FileSet::new());
        };
        let options = DiscoverOptions {
            filter: options
                .and_then(|o| o.filter.clone())
                .or_else(|| self.options.filter.clone()),
            validate: options
                .and_then(|o| o.validate.clone())
                .or_else(|| self.options.validate.clone()),
        };
        discovery::discover(root, &options).await
    }

    /// Registers every bucket of `files` with the host, in order, and returns
    /// a snapshot of the cumulative mapping. `prefix` defaults to the id.
    pub async fn resolve_files(
        &mut self,
        host: &mut Host,
        files: FileSet,
        prefix: Option<&str>,
    ) -> Result<PathMapping> {
        let prefix = prefix.unwrap_or(&self.id).to_string();

        for (file_type, entries) in files {
            let descriptors: Vec<FileDescriptor> = entries
                .into_iter()
                .map(|entry| self.normalize_entry(entry, &prefix))
                .collect();
            let descriptors = self.resolve_app_overrides(host, descriptors).await;

            let handler = RegistrationHandler::for_type(&file_type);
            debug!(
                "{}: add{} with {} file(s) via {:?}",
                self.kind.name,
                ucfirst(&file_type),
                descriptors.len(),
                handler
            );
            handler.register(self, host, descriptors).await?;
        }

        Ok(self.mapping_snapshot(host.build_dir()))
    }

    fn normalize_entry(&self, entry: FileEntry, prefix: &str) -> FileDescriptor {
        match entry {
            FileEntry::Path(_) => self.create_template_paths(entry, None, Some(prefix)),
            FileEntry::Descriptor(mut descriptor) => {
                descriptor.destination_relative = descriptor.destination.clone();
                descriptor.destination = prefixed(prefix, &descriptor.destination);
                if let (Some(source), Some(dir)) = (&descriptor.source, self.dir()) {
                    if source.is_relative() {
                        descriptor.source = Some(dir.join(source));
                    }
                }
                descriptor
            }
        }
    }

    pub(crate) fn record(&mut self, key: String, path: PathBuf) {
        self.files_mapping.insert(key, path);
    }

    /// Owned copy of the mapping with absolute paths made relative to `build_dir`.
    pub fn mapping_snapshot(&self, build_dir: &Path) -> PathMapping {
        self.files_mapping
            .iter()
            .map(|(key, path)| {
                let value = if path.is_absolute() {
                    pathdiff::diff_paths(path, build_dir).unwrap_or_else(|| path.clone())
                } else {
                    path.clone()
                };
                (key.clone(), value.to_string_lossy().to_string())
            })
            .collect()
    }

    pub(crate) fn template_vars(&self) -> &HashMap<String, String> {
        &self.template_vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostOptions;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const SINGLETON: BlueprintKind = BlueprintKind {
        name: "SingletonBlueprint",
        default_id: Some("single"),
        singleton: true,
    };

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Layout: `<tmp>/my-blueprint-dir` (blueprint), `<tmp>/site` (root and
    /// src), `<tmp>/site/.build` (build dir).
    fn fixture() -> (TempDir, PathBuf, Host) {
        let tmp = tempdir().unwrap();
        let bp = tmp.path().join("my-blueprint-dir");
        let site = tmp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        let host = Host::new(HostOptions {
            build_dir: tmp.path().join("site/.build"),
            ..HostOptions::new(&site)
        });
        (tmp, bp, host)
    }

    fn blueprint(dir: &Path) -> Blueprint {
        Blueprint::new(
            BlueprintKind::BASE,
            BlueprintOptions::with_dir(dir),
            GuardRegistry::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_id_resolution() {
        let guards = GuardRegistry::new();
        let bp = Blueprint::new(BlueprintKind::BASE, BlueprintOptions::default(), guards.clone())
            .unwrap();
        assert_eq!(bp.id(), "blueprint");

        let bp = Blueprint::new(SINGLETON, BlueprintOptions::default(), guards.clone()).unwrap();
        assert_eq!(bp.id(), "single");

        let options = BlueprintOptions {
            id: Some("docs".into()),
            ..Default::default()
        };
        let bp = Blueprint::new(BlueprintKind::BASE, options, guards).unwrap();
        assert_eq!(bp.id(), "docs");
        assert_eq!(bp.template_vars().get("id").unwrap(), "docs");
    }

    #[test]
    fn test_template_vars_carry_options() {
        let options = BlueprintOptions {
            id: Some("docs".into()),
            plugins_strategy: PluginsStrategy::Named("push".into()),
            variables: HashMap::from([
                ("title".to_string(), "Docs".to_string()),
                ("id".to_string(), "ignored".to_string()),
            ]),
            ..BlueprintOptions::with_dir("/bp")
        };
        let bp = Blueprint::new(BlueprintKind::BASE, options, GuardRegistry::new()).unwrap();
        let vars = bp.template_vars();
        assert_eq!(vars.get("id").map(String::as_str), Some("docs"));
        assert_eq!(vars.get("dir").map(String::as_str), Some("/bp"));
        assert_eq!(vars.get("autodiscover").map(String::as_str), Some("true"));
        assert_eq!(vars.get("plugins_strategy").map(String::as_str), Some("push"));
        assert_eq!(vars.get("title").map(String::as_str), Some("Docs"));
    }

    #[test]
    fn test_singleton_second_construction_fails() {
        let guards = GuardRegistry::new();
        assert!(Blueprint::new(SINGLETON, BlueprintOptions::default(), guards.clone()).is_ok());
        let err = Blueprint::new(SINGLETON, BlueprintOptions::default(), guards.clone())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "SingletonBlueprint: trying to load a singleton blueprint which is already loaded"
        );
        // Non-singleton kinds are unaffected.
        assert!(Blueprint::new(BlueprintKind::BASE, BlueprintOptions::default(), guards).is_ok());
    }

    #[test]
    fn test_create_template_paths_descriptor_unchanged() {
        let bp = blueprint(Path::new("/bp"));
        let descriptor = FileDescriptor {
            source: Some(PathBuf::from("/elsewhere/a.js")),
            destination: PathBuf::from("custom/a.js"),
            destination_relative: PathBuf::from("a.js"),
            ssr: Some(false),
            mode: None,
        };
        let out = bp.create_template_paths(
            FileEntry::Descriptor(descriptor.clone()),
            Some(Path::new("/other")),
            Some("prefix"),
        );
        assert_eq!(out, descriptor);

        let out = bp.create_template_paths("plugins/a.js".into(), None, Some("blueprint"));
        assert_eq!(out.source, Some(PathBuf::from("/bp/plugins/a.js")));
        assert_eq!(out.destination, PathBuf::from("blueprint/plugins/a.js"));
    }

    #[test]
    fn test_setup_registers_aliases_once() {
        let guards = GuardRegistry::new();
        let options = BlueprintOptions {
            id: Some("docs".into()),
            webpack_aliases: Some(WebpackAliases::List(vec![
                AliasEntry::Name("docs".into()),
                AliasEntry::Pair("theme".into(), "/opt/theme".into()),
            ])),
            ..Default::default()
        };
        let bp = Blueprint::new(BlueprintKind::BASE, options, guards).unwrap();
        let mut host = Host::new(HostOptions::new("/site"));

        bp.setup(&mut host);
        bp.setup(&mut host);

        let config = host.build_config();
        assert_eq!(config.resolve_alias.len(), 2);
        assert_eq!(
            config.resolve_alias.get("docs"),
            Some(&PathBuf::from("/site/.build/docs"))
        );
        assert_eq!(
            config.resolve_alias.get("theme"),
            Some(&PathBuf::from("/opt/theme"))
        );
    }

    #[test]
    fn test_setup_alias_true_uses_id() {
        let options = BlueprintOptions {
            id: Some("press".into()),
            webpack_aliases: Some(WebpackAliases::Enabled(true)),
            ..Default::default()
        };
        let bp = Blueprint::new(BlueprintKind::BASE, options, GuardRegistry::new()).unwrap();
        let mut host = Host::new(HostOptions::new("/site"));
        bp.setup(&mut host);
        assert_eq!(
            host.build_config().resolve_alias.get("press"),
            Some(&PathBuf::from("/site/.build/press"))
        );
    }

    #[tokio::test]
    async fn test_resolve_files_end_to_end_mapping() -> Result<()> {
        let (_tmp, bp_dir, mut host) = fixture();
        write(&bp_dir.join("custom-file.log"), "log");
        write(&bp_dir.join("my-file.tmpl.js"), "export default '{{ id }}'");
        write(&bp_dir.join("layouts/docs.tmpl.vue"), "<template/>");
        write(&bp_dir.join("modules/my-module.js"), "module.exports = {}");
        write(&bp_dir.join("plugins/my-plugin.$tmpl.js"), "// {{ id }}");
        write(&bp_dir.join("static/robots.txt"), "User-agent: *");
        write(&bp_dir.join("styles/main.css"), "body {}");

        let mut bp = blueprint(&bp_dir);
        let files = FileSet::new()
            .with("", vec!["custom-file.log"])
            .with(
                "custom",
                vec![FileEntry::Descriptor(FileDescriptor {
                    source: Some(PathBuf::from("my-file.tmpl.js")),
                    destination: PathBuf::from("custom-build-path/file.js"),
                    ..Default::default()
                })],
            )
            .with("layouts", vec!["layouts/docs.tmpl.vue"])
            .with("modules", vec!["modules/my-module.js"])
            .with("plugins", vec!["plugins/my-plugin.$tmpl.js"])
            .with("static", vec!["static/robots.txt"])
            .with("styles", vec!["styles/main.css"])
            .with(
                "skipped",
                vec![FileEntry::Descriptor(FileDescriptor {
                    source: None,
                    destination: PathBuf::from("no-source.js"),
                    ..Default::default()
                })],
            );

        let mapping = bp.resolve_files(&mut host, files, None).await?;

        let expected: PathMapping = [
            ("custom-file.log", "../../my-blueprint-dir/custom-file.log"),
            ("custom-build-path/file.js", "blueprint/custom-build-path/file.js"),
            ("layouts/docs.tmpl.vue", "blueprint/layouts/docs.vue"),
            ("modules/my-module.js", "../../my-blueprint-dir/modules/my-module.js"),
            ("plugins/my-plugin.$tmpl.js", "blueprint/plugins/my-plugin.blueprint.js"),
            ("static/robots.txt", "../../my-blueprint-dir/static/robots.txt"),
            ("styles/main.css", "../../my-blueprint-dir/styles/main.css"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(mapping, expected);

        // Static files were copied byte-for-byte below the build dir.
        let build_dir = host.build_dir().to_path_buf();
        assert_eq!(
            fs::read_to_string(build_dir.join("blueprint/custom-file.log"))?,
            "log"
        );
        assert_eq!(
            host.layouts.get("docs").map(String::as_str),
            Some("./blueprint/layouts/docs.vue")
        );
        assert_eq!(host.modules, vec![bp_dir.join("modules/my-module.js")]);
        assert_eq!(
            host.plugins[0].src,
            build_dir.join("blueprint/plugins/my-plugin.blueprint.js")
        );
        assert_eq!(host.css, vec![bp_dir.join("styles/main.css")]);
        assert_eq!(host.server_middleware.len(), 1);
        assert_eq!(host.server_middleware[0].root, build_dir.join("blueprint/static"));
        assert!(!build_dir.join("no-source.js").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_absolute_entry_is_copied_below_prefix() -> Result<()> {
        let (tmp, bp_dir, mut host) = fixture();
        let shared = tmp.path().join("shared/plugins/abs.js");
        write(&shared, "export default 42");
        let entry = shared.display().to_string();

        let mut bp = blueprint(&bp_dir);
        let mapping = bp
            .resolve_files(&mut host, FileSet::new().with("plugins", vec![entry.as_str()]), None)
            .await?;

        let destination = prefixed("blueprint", &shared);
        assert!(destination.starts_with("blueprint"));
        assert!(destination.is_relative());
        assert_eq!(
            mapping.get(&entry).map(String::as_str),
            Some("../../shared/plugins/abs.js")
        );
        assert_eq!(fs::read_to_string(&shared)?, "export default 42");
        let build_dir = host.build_dir().to_path_buf();
        assert_eq!(host.plugins[0].src, build_dir.join(&destination));
        assert_eq!(
            fs::read_to_string(build_dir.join(&destination))?,
            "export default 42"
        );

        // Descriptor destinations are prefixed the same way.
        let descriptor = FileDescriptor {
            source: Some(shared.clone()),
            destination: shared.clone(),
            ..Default::default()
        };
        let normalized = bp.normalize_entry(descriptor.into(), "blueprint");
        assert_eq!(normalized.destination, destination);
        assert_eq!(normalized.destination_relative, shared);
        Ok(())
    }

    #[tokio::test]
    async fn test_returned_mapping_is_not_altered_by_later_calls() -> Result<()> {
        let (_tmp, bp_dir, mut host) = fixture();
        write(&bp_dir.join("a.js"), "a");
        write(&bp_dir.join("b.js"), "b");

        let mut bp = blueprint(&bp_dir);
        let first = bp
            .resolve_files(&mut host, FileSet::new().with("", vec!["a.js"]), None)
            .await?;
        let second = bp
            .resolve_files(&mut host, FileSet::new().with("", vec!["b.js"]), None)
            .await?;

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert!(second.contains_key("a.js"));
        Ok(())
    }

    #[tokio::test]
    async fn test_plugins_unshift_puts_new_plugin_first() -> Result<()> {
        let (_tmp, bp_dir, mut host) = fixture();
        write(&bp_dir.join("plugins/my-plugin.js"), "plugin");
        host.plugins.push(crate::host::PluginEntry {
            src: PathBuf::from("existing.js"),
            ssr: None,
            mode: None,
        });

        let mut bp = blueprint(&bp_dir);
        bp.resolve_files(
            &mut host,
            FileSet::new().with("plugins", vec!["plugins/my-plugin.js"]),
            None,
        )
        .await?;

        assert_eq!(host.plugins.len(), 2);
        assert_eq!(
            host.plugins[0].src,
            host.build_dir().join("blueprint/plugins/my-plugin.js")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_unsupported_strategy_fails_at_plugin_registration() -> Result<()> {
        let (_tmp, bp_dir, mut host) = fixture();
        write(&bp_dir.join("plugins/my-plugin.js"), "plugin");

        let options = BlueprintOptions {
            plugins_strategy: PluginsStrategy::Named("does-not-exist".into()),
            ..BlueprintOptions::with_dir(&bp_dir)
        };
        // Construction succeeds; the name is checked on use.
        let mut bp = Blueprint::new(BlueprintKind::BASE, options, GuardRegistry::new())?;
        let err = bp
            .resolve_files(
                &mut host,
                FileSet::new().with("plugins", vec!["plugins/my-plugin.js"]),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BlueprintError>(),
            Some(BlueprintError::UnsupportedPluginStrategy(name)) if name == "does-not-exist"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_lifecycle_static_first_then_deferred() -> Result<()> {
        let (_tmp, bp_dir, mut host) = fixture();
        write(&bp_dir.join("static/robots.txt"), "robots");
        write(&bp_dir.join("layouts/default.vue"), "<template/>");
        write(&bp_dir.join("assets/logo.svg"), "<svg/>");

        let mut bp = blueprint(&bp_dir);
        let files = FileSet::new()
            .with("static", vec!["static/robots.txt"])
            .with("app", vec!["app/router.js"]);
        bp.init(&mut host, Some(files)).await?;

        // Static middleware exists before the prepared hook.
        assert_eq!(host.server_middleware.len(), 1);
        assert!(host.layouts.is_empty());
        assert_eq!(host.hooked(HookEvent::BuilderPrepared), vec!["blueprint".to_string()]);

        let mapping = bp.builder_prepared(&mut host).await?;
        assert!(mapping.contains_key("static/robots.txt"));
        assert!(mapping.contains_key("layouts/default.vue"));
        assert_eq!(host.layouts.len(), 1);
        assert_eq!(host.build_plugins.len(), 1);
        assert_eq!(host.build_plugins[0].name, "blueprintBlueprintPlugin");
        // Discovery registered static again, deferred `app` became a raw template.
        assert_eq!(
            host.templates.last().map(|t| t.file_name.clone()),
            Some(PathBuf::from("router.js"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_autodiscover_without_dir_is_empty() -> Result<()> {
        let bp = Blueprint::new(
            BlueprintKind::BASE,
            BlueprintOptions::default(),
            GuardRegistry::new(),
        )?;
        assert!(bp.autodiscover(None, None).await?.is_empty());
        Ok(())
    }
}
