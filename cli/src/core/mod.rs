//! # Blueprint Kit Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components shared by the
//! blueprint engine, the host model and the command handlers.
//!
//! ## Architecture
//!
//! The core infrastructure consists of three key components:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//! - `templating`: Tera rendering of registered templates
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{BlueprintError, Result}; // For error handling
//! use crate::core::templating; // For template rendering
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
