//! # Blueprint Kit Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Blueprint Kit. It
//! follows a two-layer approach:
//! - `BlueprintError`: a `thiserror` enum naming the failures callers may want
//!   to match on (singleton violations, configuration problems, user input).
//! - `Result<T>`: an alias for `anyhow::Result<T>` so that I/O boundaries can
//!   attach context with `.context(...)`.
//!
//! ## Error Taxonomy
//!
//! - **Construction**: a singleton blueprint constructed twice in one process.
//! - **Configuration**: unsupported plugin strategy, invalid filters, static
//!   files spread over several directories.
//! - **Filesystem**: paths that exist with the wrong kind, unreadable sources.
//! - **Template**: Tera rendering failures.
//! - **User input**: CLI-level errors reported by `blueprint eject`.
//!
//! Per-file copy failures are *not* represented here: they are logged and
//! isolated at the copy boundary (see `blueprint::resolve`).
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! return Err(BlueprintError::UnsupportedPluginStrategy(name.to_string()).into());
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<BlueprintError>(), Some(BlueprintError::SingletonViolation { .. })) => {
//!         // already constructed
//!     }
//!     _ => {}
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for Blueprint Kit.
#[derive(Error, Debug)]
pub enum BlueprintError {
    #[error("{name}: trying to load a singleton blueprint which is already loaded")]
    SingletonViolation { name: String },

    #[error("Unsupported plugin strategy {0}")]
    UnsupportedPluginStrategy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Invalid filter pattern: {source}")]
    InvalidPattern {
        #[from]
        source: regex::Error,
    },

    #[error("{0}")]
    UserInput(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
