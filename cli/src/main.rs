//! # Blueprint Kit Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point of the `blueprint` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the layered configuration (user file, project `blueprint.toml`)
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! blueprint --help
//!
//! # Eject a layout with info-level logging
//! blueprint -v eject layouts/docs.tmpl.vue
//!
//! # Use an explicit configuration file
//! blueprint --config ./site/blueprint.toml build
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration
//! 4. Route to the command handler
//! 5. Format and display any errors that occur
//!
use blueprint_kit::commands;
use blueprint_kit::core::config;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "blueprint",
    about = "Blueprint Kit: discover, build and eject framework blueprints",
    long_about = "Merge blueprint directories (plugins, layouts, styles, static files, assets)\n\
                  into a host build, and eject blueprint files for local customization.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of the discovered `blueprint.toml`.
    #[arg(long, global = true, env = "BLUEPRINT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Copy blueprint files into the app directory for customization.
    #[command(alias = "e")]
    Eject(commands::eject::EjectArgs),
    /// List the files a blueprint directory would register.
    #[command(alias = "d")]
    Discover(commands::discover::DiscoverArgs),
    /// Resolve the configured blueprint into the build directory.
    #[command(alias = "b")]
    Build(commands::build::BuildArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => match cli.command {
            Commands::Eject(args) => commands::eject::handle_eject(args, &cfg).await,
            Commands::Discover(args) => commands::discover::handle_discover(args, &cfg).await,
            Commands::Build(args) => commands::build::handle_build(args, &cfg).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
