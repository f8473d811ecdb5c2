//! # Blueprint Kit Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Byte-for-byte file copies used when a blueprint file is static (not a
//! template) and must be placed into the build directory.
//!
//! ## Architecture
//!
//! `copy_file` creates the destination's parent directories and then copies
//! with `tokio::fs::copy`, which runs `std::fs::copy` on the blocking pool.
//! On macOS that clones the file (`fclonefileat`) when the volume supports
//! it; on Linux it goes through `copy_file_range`, which reflinks on
//! filesystems such as Btrfs and XFS. Everywhere else a full copy happens.
//!
//! Errors carry context here; deciding whether a failure is fatal is the
//! caller's job (the resolver logs and isolates per-file failures).
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::copy;
//!
//! copy::copy_file(&source, &build_dir.join("docs/plugins/my-plugin.js")).await?;
//! ```
//!
use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use std::path::Path;
use tracing::debug;

/// Copies `source` to `target`, creating `target`'s parent directories.
///
/// Returns the number of bytes copied.
pub async fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        io::ensure_dir(parent).await?;
    }
    let bytes = tokio::fs::copy(source, target)
        .await
        .with_context(|| format!("Failed to copy {:?} to {:?}", source, target))?;
    debug!("Copied {} bytes from {:?} to {:?}", bytes, source, target);
    Ok(bytes)
}
