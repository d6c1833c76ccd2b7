//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Files are read and rewritten whole; no handle outlives a single call.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be opened or is not valid UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Overwrite a file with `content`.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
