//! # Blueprint Options
//!
//! File: cli/src/blueprint/options.rs
//!
//! ## Overview
//!
//! [`BlueprintOptions`] is built once, either in code or from the
//! `[blueprint]` config section, and never changes after the blueprint is
//! constructed. Filters are compiled when the options are built. The plugin
//! strategy name is only checked when the first plugins are registered.
//!
use super::filter::{create_path_matcher, FileFilter};
use crate::common::fs::walk::PathMatcher;
use crate::core::config::{BlueprintConfig, WebpackAliases};
use crate::core::error::{BlueprintError, Result};
use crate::host::PluginEntry;
use anyhow::anyhow;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Custom strategy: receives the host's plugin list and the new entries.
pub type PluginsStrategyFn = Arc<dyn Fn(&mut Vec<PluginEntry>, Vec<PluginEntry>) + Send + Sync>;

/// How new plugins are merged into the host's plugin list.
#[derive(Clone)]
pub enum PluginsStrategy {
    /// `unshift` (prepend) or `push` (append).
    Named(String),
    Custom(PluginsStrategyFn),
}

impl Default for PluginsStrategy {
    fn default() -> Self {
        PluginsStrategy::Named("unshift".to_string())
    }
}

impl fmt::Debug for PluginsStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginsStrategy::Named(name) => f.debug_tuple("Named").field(name).finish(),
            PluginsStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PluginsStrategy {
    /// Adds `new_plugins` to `existing`. New entries keep their relative order.
    pub fn apply(&self, existing: &mut Vec<PluginEntry>, new_plugins: Vec<PluginEntry>) -> Result<()> {
        match self {
            PluginsStrategy::Custom(strategy) => strategy(existing, new_plugins),
            PluginsStrategy::Named(name) => match name.as_str() {
                "unshift" => {
                    existing.splice(0..0, new_plugins);
                }
                "push" => existing.extend(new_plugins),
                other => {
                    return Err(anyhow!(BlueprintError::UnsupportedPluginStrategy(
                        other.to_string()
                    )))
                }
            },
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BlueprintOptions {
    pub id: Option<String>,
    /// Root for discovery and for relative file paths.
    pub dir: Option<PathBuf>,
    pub autodiscover: bool,
    pub filter: Option<FileFilter>,
    pub validate: Option<PathMatcher>,
    pub webpack_aliases: Option<WebpackAliases>,
    pub plugins_strategy: PluginsStrategy,
    /// Extra template variables, on top of `id`.
    pub variables: HashMap<String, String>,
}

impl Default for BlueprintOptions {
    fn default() -> Self {
        Self {
            id: None,
            dir: None,
            autodiscover: true,
            filter: None,
            validate: None,
            webpack_aliases: None,
            plugins_strategy: PluginsStrategy::default(),
            variables: HashMap::new(),
        }
    }
}

impl BlueprintOptions {
    /// Options rooted at `dir`, everything else default.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            ..Default::default()
        }
    }

    pub fn from_config(config: &BlueprintConfig) -> Result<Self> {
        Ok(Self {
            id: config.id.clone(),
            dir: config.dir.as_ref().map(PathBuf::from),
            autodiscover: config.autodiscover,
            filter: config.filter.as_ref().map(FileFilter::from_config).transpose()?,
            validate: config.validate.as_ref().map(create_path_matcher).transpose()?,
            webpack_aliases: config.webpack_aliases.clone(),
            plugins_strategy: PluginsStrategy::Named(config.plugins_strategy.clone()),
            variables: config.variables.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FilterConfig;

    fn plugin(name: &str) -> PluginEntry {
        PluginEntry {
            src: PathBuf::from(name),
            ssr: None,
            mode: None,
        }
    }

    #[test]
    fn test_unshift_keeps_new_plugin_order() -> Result<()> {
        let mut existing = vec![plugin("host.js")];
        PluginsStrategy::default().apply(&mut existing, vec![plugin("a.js"), plugin("b.js")])?;
        assert_eq!(existing, vec![plugin("a.js"), plugin("b.js"), plugin("host.js")]);
        Ok(())
    }

    #[test]
    fn test_push_appends() -> Result<()> {
        let mut existing = vec![plugin("host.js")];
        PluginsStrategy::Named("push".into()).apply(&mut existing, vec![plugin("a.js")])?;
        assert_eq!(existing, vec![plugin("host.js"), plugin("a.js")]);
        Ok(())
    }

    #[test]
    fn test_custom_strategy() -> Result<()> {
        let strategy = PluginsStrategy::Custom(Arc::new(
            |existing: &mut Vec<PluginEntry>, new_plugins: Vec<PluginEntry>| {
                existing.insert(1, new_plugins[0].clone());
            },
        ));
        let mut existing = vec![plugin("first.js"), plugin("last.js")];
        strategy.apply(&mut existing, vec![plugin("middle.js")])?;
        assert_eq!(existing[1], plugin("middle.js"));
        Ok(())
    }

    #[test]
    fn test_unsupported_strategy() {
        let err = PluginsStrategy::Named("does-not-exist".into())
            .apply(&mut Vec::new(), vec![plugin("a.js")])
            .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported plugin strategy does-not-exist");
    }

    #[test]
    fn test_from_config_defers_strategy_check() -> Result<()> {
        let config = BlueprintConfig {
            id: Some("docs".into()),
            dir: Some("/bp".into()),
            filter: Some(FilterConfig::Text(".js".into())),
            plugins_strategy: "does-not-exist".into(),
            ..Default::default()
        };
        let options = BlueprintOptions::from_config(&config)?;
        assert_eq!(options.id.as_deref(), Some("docs"));
        assert_eq!(options.dir, Some(PathBuf::from("/bp")));
        assert!(options.autodiscover);
        assert!(matches!(options.filter, Some(FileFilter::Extension(_))));
        assert!(matches!(options.plugins_strategy, PluginsStrategy::Named(ref n) if n == "does-not-exist"));
        Ok(())
    }
}
