#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub const LICENSE_TEXT: &str = "Copyright (c) Acme Corp\nAll rights reserved.\n";

/// Returns the marker line for a comment prefix, without a terminator.
pub fn marker(prefix: &str) -> String {
  format!("{}{}", prefix, "=".repeat(77))
}

/// Renders the header block `license` produces with `prefix`, LF endings.
pub fn rendered_header(license: &str, prefix: &str) -> String {
  let marker = marker(prefix);
  let mut out = format!("{marker}\n");
  for line in license.lines() {
    out.push_str(prefix);
    out.push_str(line);
    out.push('\n');
  }
  out.push_str(&marker);
  out.push('\n');
  out
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

pub fn read_file(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Creates a project laid out the way a default run expects: a license at
/// `misc/licence.header.md` and sources under `src/`.
pub fn setup_default_project() -> Result<TempDir> {
  let temp_dir = tempfile::tempdir()?;
  let root = temp_dir.path();

  write_file(root, "misc/licence.header.md", LICENSE_TEXT)?;
  write_file(root, "src/a.ts", "export const a = 1;\n")?;
  write_file(root, "src/nested/b.ts", "export const b = 2;\n")?;
  write_file(root, "src/readme.md", "# not touched\n")?;

  Ok(temp_dir)
}
