//! # Blueprint Kit Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the `blueprint` CLI. Each
//! command defines its own `clap` arguments struct and an async `handle_*`
//! function that receives the parsed arguments and the loaded [`Config`].
//!
//! ## Commands
//!
//! - `eject`: copies blueprint files into the app override directory.
//! - `discover`: prints the files a blueprint directory would register.
//! - `build`: runs the configured blueprint through the host lifecycle.
//!
//! [`Config`]: crate::core::config::Config
//!

/// `blueprint build`: resolve, render and write the configured blueprint.
pub mod build;
/// `blueprint discover`: list a blueprint's files grouped by type.
pub mod discover;
/// `blueprint eject`: copy templates into `src_dir/app_dir/<id>`.
pub mod eject;
