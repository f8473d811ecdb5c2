//! # Blueprint Kit UI Utilities (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal interaction helpers for the `blueprint` command. Currently this is
//! the multi-select prompt used by `blueprint eject` when a template key
//! matches more than one file.
//!

/// Interactive prompts built on `dialoguer`.
pub mod prompts;
