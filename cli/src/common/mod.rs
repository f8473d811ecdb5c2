//! # Blueprint Kit Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared, domain-agnostic utilities used by the blueprint engine and the
//! command handlers. Keeping them under `common::` separates the filesystem
//! and terminal plumbing from blueprint semantics (`blueprint::`) and from
//! the core infrastructure (`core::`).
//!
//! ## Architecture
//!
//! - **`fs`**: the filesystem capability (walk, exists, read, copy, write).
//! - **`ui`**: terminal prompts.
//!

/// Filesystem operations (walking, I/O, copying).
pub mod fs;
/// Terminal user interface helpers (prompts).
pub mod ui;
