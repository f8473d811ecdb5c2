//! # Blueprint Build Command
//!
//! File: cli/src/commands/build.rs
//!
//! ## Overview
//!
//! This module implements `blueprint build`, which runs the configured
//! blueprint through the host lifecycle and writes the result into the build
//! directory:
//!
//! 1. Construct a [`Host`] from `[host]` and a base [`Blueprint`] from `[blueprint]`.
//! 2. `Builder::register` runs `init` (static files are resolved right away).
//! 3. `Builder::build` fires the prepared hook (autodiscovery and the
//!    remaining types), renders templates and writes emitted assets.
//! 4. The final path mapping is printed, one `key -> path` line per file.
//!
//! With `--serve <PORT>` the registered static-file middleware is served on
//! `127.0.0.1:<PORT>` until Ctrl+C.
//!
//! ## Examples
//!
//! ```bash
//! blueprint build
//! blueprint build --dir ./blueprints/example --id docs
//! blueprint -v build --serve 8000
//! ```
//!
use crate::blueprint::guard::GuardRegistry;
use crate::blueprint::options::BlueprintOptions;
use crate::blueprint::paths::PathMapping;
use crate::blueprint::{Blueprint, BlueprintKind};
use crate::core::config::Config;
use crate::core::error::{BlueprintError, Result};
use crate::host::{BuildReport, Builder, Host, HostOptions};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// # Build Arguments (`BuildArgs`)
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Blueprint directory. Overrides `[blueprint].dir`.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Blueprint id. Overrides `[blueprint].id`.
    #[arg(long)]
    id: Option<String>,

    /// Serve the registered static files on this port after building.
    #[arg(long, value_name = "PORT")]
    serve: Option<u16>,
}

/// # Handle Build Command (`handle_build`)
pub async fn handle_build(args: BuildArgs, config: &Config) -> Result<()> {
    let mut options = BlueprintOptions::from_config(&config.blueprint)?;
    if let Some(dir) = args.dir {
        options.dir = Some(dir);
    }
    if let Some(id) = args.id {
        options.id = Some(id);
    }
    if options.dir.is_none() {
        return Err(anyhow!(BlueprintError::UserInput(
            "No blueprint directory given and none configured in [blueprint].dir".to_string()
        )));
    }

    let host = Host::new(HostOptions::from_config(&config.host));
    let blueprint = Blueprint::new(BlueprintKind::BASE, options, GuardRegistry::process())?;
    info!(
        "Building blueprint '{}' into {}",
        blueprint.id(),
        host.build_dir().display()
    );

    let mut builder = Builder::new(host);
    builder.register(blueprint, None).await?;
    let report = builder.build().await?;
    print!("{}", render_report(&report));

    if let Some(port) = args.serve {
        serve(builder.host(), port).await?;
    }
    Ok(())
}

fn render_mapping(id: &str, mapping: &PathMapping) -> String {
    let mut out = format!("[{}]\n", id);
    if mapping.is_empty() {
        out.push_str("  (no files)\n");
    }
    for (key, path) in mapping {
        out.push_str(&format!("  {} -> {}\n", key, path));
    }
    out
}

fn render_report(report: &BuildReport) -> String {
    let mut out = String::new();
    for (id, mapping) in &report.mappings {
        out.push_str(&render_mapping(id, mapping));
    }
    out.push_str(&format!(
        "\nRendered {} template(s), emitted {} asset(s).\n",
        report.templates.len(),
        report.assets.len()
    ));
    out
}

async fn serve(host: &Host, port: u16) -> Result<()> {
    if host.server_middleware.is_empty() {
        warn!("No static-file middleware registered, nothing to serve");
        return Ok(());
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;
    println!("Serving static files on http://{}/ (Ctrl+C to stop)", addr);

    axum::serve(listener, host.router().into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
    }
    info!("Shutdown signal received");
}
