//! # Blueprint Kit Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem capability used by the resolution
//! engine and the eject command: existence checks, idempotent recursive
//! directory creation, whole-file reads, writes and appends.
//!
//! ## Architecture
//!
//! - **`exists`**: async existence check. Permission errors count as "does
//!   not exist", matching an access-based check.
//! - **`ensure_dir_exists`** / **`ensure_dir`**: create a directory and its
//!   parents (sync and async variants). A path that exists as a file is an error.
//! - **`read_file`**: whole-file reads with context.
//! - **`write_string_to_file`**, **`write_file`**, **`append_file`**: writes that
//!   create the parent directory first.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! if io::exists(&app_dir).await {
//!     let bytes = io::read_file(&source).await?;
//!     io::write_file(&target, &bytes).await?;
//! }
//! ```
//!
use crate::core::error::{BlueprintError, Result}; // Use standard Result and custom Error types
use anyhow::Context; // For adding context to errors
use std::fs; // Standard filesystem module
use std::path::Path; // Filesystem path type
use tokio::io::AsyncWriteExt;
use tracing::debug; // Logging utilities

/// Returns `true` if `path` exists and is accessible.
pub async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, the directory and any missing parents are
/// created (like `mkdir -p`). If the path exists but is not a directory, a
/// `BlueprintError::FileSystem` error is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        debug!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(BlueprintError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Async variant of [`ensure_dir_exists`]. Creating an existing directory is a no-op.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory {:?}", path))
}

/// Reads the raw bytes of a file.
pub async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to `path`, creating the parent directory and
/// overwriting any existing file.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Writes raw bytes to `path`, creating the parent directory first.
pub async fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write to file {:?}", path))
}

/// Appends `content` to `path`, creating the file when it does not exist.
pub async fn append_file(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {:?} for appending", path))?;
    file.write_all(content)
        .await
        .with_context(|| format!("Failed to append to file {:?}", path))?;
    file.flush()
        .await
        .with_context(|| format!("Failed to flush {:?}", path))
}
