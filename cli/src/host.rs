//! # Host Build System
//!
//! File: cli/src/host.rs
//!
//! ## Overview
//!
//! An in-process model of the build system blueprints register files with.
//! Every registration lands in a plain registry on [`Host`] so that its
//! effect can be inspected, and [`Builder`] turns the registries into files
//! on disk.
//!
//! ## Architecture
//!
//! - **Registries**: modules, plugins, layouts, stylesheets, templates,
//!   static-file middleware, asset emitters, build-config extensions and
//!   lifecycle hooks.
//! - **Templates**: `add_template` records a request and returns the output
//!   name; `render_templates` renders every request into the build dir
//!   through `core::templating`.
//! - **Assets**: [`AssetEmitter`]s read their sources concurrently and insert
//!   the bytes into a [`Compilation`].
//! - **Static serving**: `router` builds an axum `Router` with one
//!   `tower_http::services::ServeDir` per registered middleware.
//! - **Lifecycle**: [`Builder`] runs `init` for each blueprint, fires the
//!   `BuilderPrepared` hook, then writes templates and assets.
//!
//! ## Examples
//!
//! ```rust
//! let mut builder = Builder::new(Host::new(HostOptions::from_config(&config.host)));
//! builder.register(blueprint, None).await?;
//! let report = builder.build().await?;
//! ```
//!
use crate::blueprint::paths::{FileSet, PathMapping};
use crate::blueprint::Blueprint;
use crate::common::fs::io;
use crate::core::config::{HostConfig, StaticConfig};
use crate::core::error::Result;
use crate::core::templating;
use axum::Router;
use futures_util::future::join_all;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, info, warn};

/// Directory layout of the host application.
#[derive(Debug, Clone)]
pub struct HostOptions {
    pub root_dir: PathBuf,
    pub src_dir: PathBuf,
    pub build_dir: PathBuf,
    /// Directory below `src_dir` holding per-blueprint overrides.
    pub app_dir: String,
    pub static_options: StaticConfig,
}

impl HostOptions {
    /// Defaults below `root_dir`: sources in the root, output in `.build`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        Self {
            src_dir: root_dir.clone(),
            build_dir: root_dir.join(".build"),
            root_dir,
            app_dir: "app".to_string(),
            static_options: StaticConfig::default(),
        }
    }

    /// From the `[host]` section. Paths are already absolute after loading.
    pub fn from_config(config: &HostConfig) -> Self {
        let root_dir = PathBuf::from(&config.root_dir);
        Self {
            src_dir: config
                .src_dir
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| root_dir.clone()),
            build_dir: PathBuf::from(&config.build_dir),
            root_dir,
            app_dir: config.app_dir.clone(),
            static_options: config.static_files.clone(),
        }
    }
}

/// A plugin in the host's plugin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    pub src: PathBuf,
    pub ssr: Option<bool>,
    pub mode: Option<String>,
}

/// A template to render into the build dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequest {
    pub src: PathBuf,
    /// Output path relative to the build dir.
    pub file_name: PathBuf,
    /// `None` renders with an empty context.
    pub variables: Option<HashMap<String, String>>,
}

/// Result of registering a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOutput {
    pub dst: PathBuf,
}

/// Static-file middleware mounted at `prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMiddleware {
    pub prefix: String,
    pub root: PathBuf,
    pub index: bool,
}

/// Build-time output: destination -> bytes.
#[derive(Debug, Default)]
pub struct Compilation {
    pub assets: BTreeMap<PathBuf, Vec<u8>>,
}

/// Build plugin copying raw assets into the compilation at emit time.
#[derive(Debug, Clone)]
pub struct AssetEmitter {
    pub name: String,
    /// `(source, destination)` pairs.
    pub assets: Vec<(PathBuf, PathBuf)>,
}

impl AssetEmitter {
    /// Reads every asset concurrently; insertion order is not stable.
    pub async fn emit(&self, compilation: &mut Compilation) -> Result<()> {
        let reads = self.assets.iter().map(|(src, dst)| async move {
            io::read_file(src).await.map(|bytes| (dst.clone(), bytes))
        });
        for result in join_all(reads).await {
            let (dst, bytes) = result?;
            debug!("{}: emitting {} bytes to {:?}", self.name, bytes.len(), dst);
            compilation.assets.insert(dst, bytes);
        }
        Ok(())
    }
}

/// Resolved build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub resolve_alias: BTreeMap<String, PathBuf>,
}

pub type BuildExtension = Box<dyn Fn(&mut BuildConfig) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// Host configuration is final; deferred file resolution runs here.
    BuilderPrepared,
}

pub struct Host {
    options: HostOptions,
    pub modules: Vec<PathBuf>,
    pub plugins: Vec<PluginEntry>,
    pub layouts: BTreeMap<String, String>,
    pub css: Vec<PathBuf>,
    pub templates: Vec<TemplateRequest>,
    pub server_middleware: Vec<ServerMiddleware>,
    pub build_plugins: Vec<AssetEmitter>,
    build_extensions: Vec<BuildExtension>,
    hooks: Vec<(HookEvent, String)>,
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("options", &self.options)
            .field("modules", &self.modules)
            .field("plugins", &self.plugins)
            .field("layouts", &self.layouts)
            .field("css", &self.css)
            .field("templates", &self.templates)
            .field("server_middleware", &self.server_middleware)
            .field("build_plugins", &self.build_plugins)
            .field("build_extensions", &self.build_extensions.len())
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl Host {
    pub fn new(options: HostOptions) -> Self {
        Self {
            options,
            modules: Vec::new(),
            plugins: Vec::new(),
            layouts: BTreeMap::new(),
            css: Vec::new(),
            templates: Vec::new(),
            server_middleware: Vec::new(),
            build_plugins: Vec::new(),
            build_extensions: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    pub fn build_dir(&self) -> &Path {
        &self.options.build_dir
    }

    pub fn add_module(&mut self, path: PathBuf) {
        debug!("Registering module {:?}", path);
        self.modules.push(path);
    }

    pub fn add_template(&mut self, request: TemplateRequest) -> TemplateOutput {
        debug!(
            "Registering template {:?} -> {:?}",
            request.src, request.file_name
        );
        let output = TemplateOutput {
            dst: request.file_name.clone(),
        };
        self.templates.push(request);
        output
    }

    pub fn add_server_middleware(&mut self, middleware: ServerMiddleware) {
        debug!(
            "Registering static middleware at '{}' serving {:?}",
            middleware.prefix, middleware.root
        );
        self.server_middleware.push(middleware);
    }

    pub fn add_build_plugin(&mut self, plugin: AssetEmitter) {
        debug!("Registering build plugin {}", plugin.name);
        self.build_plugins.push(plugin);
    }

    pub fn extend_build(&mut self, extension: BuildExtension) {
        self.build_extensions.push(extension);
    }

    pub fn hook(&mut self, event: HookEvent, owner: &str) {
        debug!("Hook {:?} registered by '{}'", event, owner);
        self.hooks.push((event, owner.to_string()));
    }

    /// Owners that registered for `event`, in registration order.
    pub fn hooked(&self, event: HookEvent) -> Vec<String> {
        self.hooks
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, owner)| owner.clone())
            .collect()
    }

    /// Applies every build extension to a fresh config.
    pub fn build_config(&self) -> BuildConfig {
        let mut config = BuildConfig::default();
        for extension in &self.build_extensions {
            extension(&mut config);
        }
        config
    }

    /// Renders every registered template into the build dir.
    pub fn render_templates(&self) -> Result<Vec<PathBuf>> {
        let empty = HashMap::new();
        let mut written = Vec::with_capacity(self.templates.len());
        for template in &self.templates {
            let target = self.options.build_dir.join(&template.file_name);
            let variables = template.variables.as_ref().unwrap_or(&empty);
            templating::render_template_file(&template.src, &target, variables)?;
            written.push(target);
        }
        Ok(written)
    }

    /// Runs every asset emitter into one compilation.
    pub async fn emit_assets(&self) -> Result<Compilation> {
        let mut compilation = Compilation::default();
        for plugin in &self.build_plugins {
            plugin.emit(&mut compilation).await?;
        }
        Ok(compilation)
    }

    /// Router serving every registered static middleware.
    ///
    /// The first middleware mounted at `/` becomes the fallback; later root
    /// mounts are ignored with a warning.
    pub fn router(&self) -> Router {
        let mut router = Router::new();
        let mut root_mounted = false;
        for middleware in &self.server_middleware {
            let serve_dir = ServeDir::new(&middleware.root)
                .append_index_html_on_directories(middleware.index);
            let prefix = middleware.prefix.trim_end_matches('/');
            if prefix.is_empty() {
                if root_mounted {
                    warn!(
                        "Static middleware for {:?} ignored: '/' is already served",
                        middleware.root
                    );
                    continue;
                }
                router = router.fallback_service(serve_dir);
                root_mounted = true;
            } else {
                router = router.nest_service(prefix, serve_dir);
            }
        }
        router.layer(TraceLayer::new_for_http())
    }
}

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Final path mapping per blueprint id.
    pub mappings: Vec<(String, PathMapping)>,
    pub templates: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
}

/// Drives blueprints through the host lifecycle.
#[derive(Debug)]
pub struct Builder {
    host: Host,
    blueprints: Vec<Blueprint>,
}

impl Builder {
    pub fn new(host: Host) -> Self {
        Self {
            host,
            blueprints: Vec::new(),
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn blueprints(&self) -> &[Blueprint] {
        &self.blueprints
    }

    /// Runs `init` for the blueprint and keeps it for the prepared hook.
    pub async fn register(&mut self, mut blueprint: Blueprint, files: Option<FileSet>) -> Result<()> {
        blueprint.init(&mut self.host, files).await?;
        self.blueprints.push(blueprint);
        Ok(())
    }

    /// Fires `BuilderPrepared` for every blueprint that hooked it.
    pub async fn prepare(&mut self) -> Result<Vec<(String, PathMapping)>> {
        let owners = self.host.hooked(HookEvent::BuilderPrepared);
        let mut mappings = Vec::new();
        for blueprint in self.blueprints.iter_mut() {
            if !owners.iter().any(|owner| owner == blueprint.id()) {
                continue;
            }
            let mapping = blueprint.builder_prepared(&mut self.host).await?;
            mappings.push((blueprint.id().to_string(), mapping));
        }
        Ok(mappings)
    }

    /// Prepares, renders templates and writes emitted assets to the build dir.
    pub async fn build(&mut self) -> Result<BuildReport> {
        let mappings = self.prepare().await?;
        io::ensure_dir(self.host.build_dir()).await?;
        let templates = self.host.render_templates()?;

        let compilation = self.host.emit_assets().await?;
        let mut assets = Vec::with_capacity(compilation.assets.len());
        for (dst, bytes) in &compilation.assets {
            let target = self.host.build_dir().join(dst);
            io::write_file(&target, bytes).await?;
            assets.push(target);
        }

        info!(
            "Build finished: {} template(s), {} asset(s) written to {}",
            templates.len(),
            assets.len(),
            self.host.build_dir().display()
        );
        Ok(BuildReport {
            mappings,
            templates,
            assets,
        })
    }
}
