//! # File Collector Module
//!
//! This module collects candidate files under the root directory and
//! provides path normalization helpers.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// File collector for directory traversal.
pub struct FileCollector {
  /// Directory the traversal starts from
  root_dir: PathBuf,
}

impl FileCollector {
  pub const fn new(root_dir: PathBuf) -> Self {
    Self { root_dir }
  }

  pub fn root_dir(&self) -> &Path {
    &self.root_dir
  }

  /// Traverses the root directory recursively and collects all regular files.
  ///
  /// Entries are visited in file-name order so runs are deterministic.
  /// Symlinks are neither followed nor collected.
  ///
  /// # Errors
  ///
  /// Returns an error if the root does not exist or is not a directory, or if
  /// any directory entry cannot be read.
  pub fn traverse(&self) -> Result<Vec<PathBuf>> {
    if !self.root_dir.is_dir() {
      anyhow::bail!("Root directory does not exist: {}", self.root_dir.display());
    }

    debug!("Scanning directory: {}", self.root_dir.display());
    let start_time = std::time::Instant::now();

    let mut all_files = Vec::new();
    for entry in WalkDir::new(&self.root_dir).follow_links(false).sort_by_file_name() {
      let entry = entry.with_context(|| format!("Failed to traverse {}", self.root_dir.display()))?;

      if entry.path_is_symlink() {
        trace!("Skipping: {} (symlink)", entry.path().display());
        continue;
      }
      if entry.file_type().is_file() {
        all_files.push(entry.into_path());
      }
    }

    debug!(
      "Found {} files in {}ms",
      all_files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(all_files)
  }
}

/// Normalizes a path to be relative to `base`.
///
/// Paths under `base` lose that prefix; other absolute paths are expressed
/// with `..` segments. `.` components are dropped, and an empty result
/// becomes `.`.
pub fn normalize_relative_path(path: &Path, base: &Path) -> PathBuf {
  if let Ok(stripped) = path.strip_prefix(base) {
    return strip_cur_dir(stripped);
  }

  if path.is_absolute()
    && base.is_absolute()
    && let Some(rel_path) = pathdiff::diff_paths(path, base)
  {
    return rel_path;
  }

  strip_cur_dir(path)
}

fn strip_cur_dir(path: &Path) -> PathBuf {
  let normalized: PathBuf = path
    .components()
    .filter(|component| !matches!(component, Component::CurDir))
    .collect();

  if normalized.as_os_str().is_empty() {
    PathBuf::from(".")
  } else {
    normalized
  }
}
