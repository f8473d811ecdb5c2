//! # Blueprint Kit Prompts
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! Multi-select prompt for choosing among several candidate files. Prompting
//! only happens when stdin is a terminal; otherwise the caller gets an empty
//! selection and reports the ambiguity.
//!
use crate::core::error::Result;
use anyhow::Context;
use dialoguer::MultiSelect;
use std::io::IsTerminal;
use tracing::debug;

/// Returns `true` if prompts can be shown.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Shows a multi-select prompt and returns the selected indices into `items`.
///
/// Returns an empty selection without prompting when stdin is not a terminal.
pub fn select_many(prompt: &str, items: &[String]) -> Result<Vec<usize>> {
    if !is_interactive() {
        debug!("stdin is not a terminal, skipping prompt '{}'", prompt);
        return Ok(Vec::new());
    }

    MultiSelect::new()
        .with_prompt(prompt)
        .items(items)
        .interact()
        .context("Failed to read selection from prompt")
}
