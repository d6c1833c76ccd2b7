//! # License Module
//!
//! Loads the license text that goes inside every header block.
//!
//! The text is taken literally: no template variables, no trimming, no
//! re-wrapping. It is read once per run and shared read-only by every file
//! rewrite.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// The license text loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseText {
  text: String,
}

impl LicenseText {
  /// Reads the license file at `path`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8.
  pub fn load(path: &Path) -> Result<Self> {
    let text =
      fs::read_to_string(path).with_context(|| format!("Failed to read license file: {}", path.display()))?;

    debug!("Loaded license text from {} ({} bytes)", path.display(), text.len());

    Ok(Self { text })
  }

  /// Wraps an in-memory license text.
  pub fn from_text(text: impl Into<String>) -> Self {
    Self { text: text.into() }
  }

  /// The raw text, exactly as loaded.
  pub fn as_str(&self) -> &str {
    &self.text
  }

  /// Iterates over the lines of the license text.
  ///
  /// Lines are split on `\n` and `\r\n`, and a trailing line break does not
  /// produce a trailing empty line. An empty text yields no lines.
  pub fn lines(&self) -> std::str::Lines<'_> {
    self.text.lines()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }
}
