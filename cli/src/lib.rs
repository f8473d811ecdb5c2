//! # Blueprint Kit Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! Blueprint Kit merges "blueprints" (directories of plugins, layouts,
//! styles, static files and assets) into a host build. The library exposes
//! the discovery and resolution engine, the in-process host model it
//! registers with, and the command handlers used by the `blueprint` binary.
//!
//! ## Architecture
//!
//! - **`blueprint`**: discovery, override resolution, templates, per-type
//!   registration and the eject key selector.
//! - **`host`**: the build system blueprints register with, plus `Builder`.
//! - **`commands`**: `eject`, `discover` and `build`.
//! - **`common`**: filesystem and prompt helpers.
//! - **`core`**: configuration, errors and template rendering.
//!

pub mod blueprint;
pub mod commands;
pub mod common;
pub mod core;
pub mod host;
