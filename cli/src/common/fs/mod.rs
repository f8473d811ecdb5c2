//! # Blueprint Kit Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! This module is the filesystem capability the resolution engine consumes:
//! existence checks, recursive listing, reads, copies and idempotent
//! directory creation.
//!
//! ## Architecture
//!
//! - **`copy`**: byte-for-byte file copies into the build directory (`copy_file`).
//! - **`io`**: existence checks, directory creation, reads, writes and appends.
//! - **`walk`**: recursive file listing with validation and root slicing.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{copy, io, walk};
//!
//! let files = walk::walk(&blueprint_dir, &walk::WalkOptions::default())?;
//! if io::exists(&override_path).await { /* ... */ }
//! copy::copy_file(&source, &target).await?;
//! ```
//!

/// File copies (`copy_file`).
pub mod copy;
/// Basic file I/O (`exists`, `ensure_dir`, `read_file`, `write_file`, `append_file`).
pub mod io;
/// Recursive directory listing (`walk`, `WalkOptions`, `PathMatcher`, `SliceRoot`).
pub mod walk;
