//! # Blueprint Kit Template Rendering
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module is the templating capability the resolution engine delegates
//! to. The engine only decides *which* files are templates and *what* they
//! are called in the build output; rendering a registered template into the
//! build directory happens here.
//!
//! ## Architecture
//!
//! Rendering uses the Tera templating engine:
//! 1. Read the template source.
//! 2. Build a `tera::Context` from the blueprint's template variables.
//! 3. Render with `Tera::one_off` (no autoescaping, output is source code).
//! 4. Write the result to the target path, creating parent directories.
//!
//! ## Examples
//!
//! ```rust
//! let mut vars = HashMap::new();
//! vars.insert("id".to_string(), "docs".to_string());
//! templating::render_template_file(&source, &build_dir.join("docs/layouts/docs.vue"), &vars)?;
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{BlueprintError, Result};
use anyhow::{anyhow, Context};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Builds a Tera context from a flat string map.
pub fn build_context(variables: &HashMap<String, String>) -> Result<tera::Context> {
    tera::Context::from_serialize(variables).map_err(|e| {
        anyhow!(BlueprintError::Template { source: e })
            .context("Failed to create Tera context from map")
    })
}

/// Renders the template at `source` into `target` using `variables`.
pub fn render_template_file(
    source: &Path,
    target: &Path,
    variables: &HashMap<String, String>,
) -> Result<()> {
    debug!(
        "Rendering template '{}' to '{}'",
        source.display(),
        target.display()
    );
    let template_content = fs::read_to_string(source)
        .with_context(|| format!("Failed to read template file '{}'", source.display()))?;
    let context = build_context(variables)?;
    let rendered = Tera::one_off(&template_content, &context, false).map_err(|e| {
        anyhow!(BlueprintError::Template { source: e }).context(format!(
            "Tera rendering failed for template file '{}'",
            source.display()
        ))
    })?;
    io::write_string_to_file(target, &rendered)
}
