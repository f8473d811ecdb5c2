//! # Registration Handlers
//!
//! File: cli/src/blueprint/handlers.rs
//!
//! ## Overview
//!
//! Maps a file type to what registering it with the host means. Unknown
//! types fall back to [`RegistrationHandler::Files`], which only copies or
//! templates the files and records them in the mapping.
//!
//! | Type      | Effect on the host                                          |
//! |-----------|-------------------------------------------------------------|
//! | `modules` | `add_module` with the classified path                       |
//! | `plugins` | plugin entries merged with the configured strategy          |
//! | `static`  | one static-file middleware for the shared directory         |
//! | `styles`  | stylesheet appended unless already present                  |
//! | `layouts` | layout named after the file stem, first registration wins   |
//! | `assets`  | one `<id>BlueprintPlugin` asset emitter                     |
//! | `app`     | raw template named after the path below the app dir         |
//! | `store`   | warning only                                                |
//!
use super::paths::FileDescriptor;
use super::Blueprint;
use crate::core::error::{BlueprintError, Result};
use crate::host::{AssetEmitter, Host, PluginEntry, ServerMiddleware, TemplateRequest};
use anyhow::anyhow;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationHandler {
    Modules,
    Plugins,
    Static,
    Styles,
    Layouts,
    Assets,
    App,
    Store,
    Files,
}

impl RegistrationHandler {
    pub fn for_type(file_type: &str) -> Self {
        match file_type {
            "modules" => RegistrationHandler::Modules,
            "plugins" => RegistrationHandler::Plugins,
            "static" => RegistrationHandler::Static,
            "styles" => RegistrationHandler::Styles,
            "layouts" => RegistrationHandler::Layouts,
            "assets" => RegistrationHandler::Assets,
            "app" => RegistrationHandler::App,
            "store" => RegistrationHandler::Store,
            _ => RegistrationHandler::Files,
        }
    }

    pub async fn register(
        self,
        blueprint: &mut Blueprint,
        host: &mut Host,
        files: Vec<FileDescriptor>,
    ) -> Result<()> {
        match self {
            RegistrationHandler::Modules => blueprint.add_modules(host, files),
            RegistrationHandler::Plugins => blueprint.add_plugins(host, files).await?,
            RegistrationHandler::Static => blueprint.add_static(host, files).await?,
            RegistrationHandler::Styles => blueprint.add_styles(host, files),
            RegistrationHandler::Layouts => blueprint.add_layouts(host, files).await,
            RegistrationHandler::Assets => blueprint.add_assets(host, files),
            RegistrationHandler::App => blueprint.add_app(host, files),
            RegistrationHandler::Store => blueprint.add_store(),
            RegistrationHandler::Files => blueprint.add_files(host, files).await,
        }
        Ok(())
    }
}

impl Blueprint {
    fn add_modules(&mut self, host: &mut Host, modules: Vec<FileDescriptor>) {
        for module in &modules {
            if let Some(path) = self.add_template_if_needed(host, module) {
                host.add_module(path);
            }
        }
    }

    async fn add_plugins(&mut self, host: &mut Host, plugins: Vec<FileDescriptor>) -> Result<()> {
        let mut new_plugins = Vec::with_capacity(plugins.len());
        for plugin in &plugins {
            let Some(path) = self.add_template_or_copy(host, plugin).await else {
                continue;
            };
            new_plugins.push(PluginEntry {
                src: host.build_dir().join(path),
                ssr: plugin.ssr,
                mode: plugin.mode.clone(),
            });
        }
        self.options
            .plugins_strategy
            .apply(&mut host.plugins, new_plugins)
    }

    async fn add_static(&mut self, host: &mut Host, static_files: Vec<FileDescriptor>) -> Result<()> {
        let mut resolved = Vec::with_capacity(static_files.len());
        for file in &static_files {
            if let Some(path) = self.add_template_or_copy(host, file).await {
                resolved.push(path);
            }
        }

        let Some(first) = resolved.first() else {
            warn!(
                "{}: no static files could be resolved, static middleware not registered",
                self.kind.name
            );
            return Ok(());
        };
        let static_dir = first.parent().map(Path::to_path_buf).unwrap_or_default();
        if let Some(other) = resolved
            .iter()
            .find(|path| path.parent().unwrap_or_else(|| Path::new("")) != static_dir)
        {
            return Err(anyhow!(BlueprintError::Config(format!(
                "Static files must share one directory, found '{}' and '{}'",
                first.display(),
                other.display()
            ))));
        }

        let static_options = host.options().static_options.clone();
        let root = host.build_dir().join(static_dir);
        host.add_server_middleware(ServerMiddleware {
            prefix: static_options.prefix,
            root,
            index: static_options.index,
        });
        Ok(())
    }

    fn add_styles(&mut self, host: &mut Host, stylesheets: Vec<FileDescriptor>) {
        for stylesheet in &stylesheets {
            let Some(path) = self.add_template_if_needed(host, stylesheet) else {
                continue;
            };
            if !path.as_os_str().is_empty() && !host.css.contains(&path) {
                host.css.push(path);
            }
        }
    }

    async fn add_layouts(&mut self, host: &mut Host, layouts: Vec<FileDescriptor>) {
        for layout in &layouts {
            let Some(layout_path) = self.add_template_or_copy(host, layout).await else {
                continue;
            };
            let layout_name = layout_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default();

            if let Some(existing) = host.layouts.get(&layout_name) {
                warn!(
                    "Duplicate layout registration, \"{}\" has been registered as \"{}\"",
                    layout_name, existing
                );
                continue;
            }
            host.layouts
                .insert(layout_name, format!("./{}", layout_path.display()));
        }
    }

    fn add_assets(&mut self, host: &mut Host, assets: Vec<FileDescriptor>) {
        let assets = assets
            .into_iter()
            .filter_map(|asset| asset.source.map(|source| (source, asset.destination)))
            .collect();
        host.add_build_plugin(AssetEmitter {
            name: format!("{}BlueprintPlugin", self.id),
            assets,
        });
    }

    fn add_app(&mut self, host: &mut Host, app_files: Vec<FileDescriptor>) {
        let app_dir = host.options().app_dir.clone();
        for file in app_files {
            let Some(src) = file.source else {
                continue;
            };
            let file_name = strip_through_segment(&file.destination, &app_dir)
                .unwrap_or(file.destination_relative);
            host.add_template(TemplateRequest {
                src,
                file_name,
                variables: Some(self.template_vars().clone()),
            });
        }
    }

    fn add_store(&self) {
        warn!(
            "{}: adding store modules from blueprints is not (yet) implemented",
            self.kind.name
        );
    }

    async fn add_files(&mut self, host: &mut Host, files: Vec<FileDescriptor>) {
        for file in &files {
            if self.add_template_or_copy(host, file).await.is_none() {
                debug!("{}: nothing registered for '{}'", self.kind.name, file.key());
            }
        }
    }
}

/// Everything after the first `segment` component (`docs/app/router.js` -> `router.js`).
fn strip_through_segment(path: &Path, segment: &str) -> Option<PathBuf> {
    let mut components = path.components();
    components.by_ref().find(|c| matches!(c, Component::Normal(name) if *name == segment))?;
    let rest = components.as_path();
    if rest.as_os_str().is_empty() {
        None
    } else {
        Some(rest.to_path_buf())
    }
}
