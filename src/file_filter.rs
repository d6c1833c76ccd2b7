//! # File Filter Module
//!
//! This module contains components for filtering collected files based on
//! ignore patterns and file extensions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::ExtensionConfig;
use crate::processor::normalize_relative_path;
use crate::verbose_log;

/// Result of a file filtering operation.
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> Result<FilterResult>;
}

/// Filter that excludes files matching glob ignore patterns.
///
/// Patterns are matched against the path relative to the root directory, so
/// `generated/**` skips everything under `<root>/generated`.
pub struct IgnoreFilter {
  root_dir: PathBuf,
  patterns: Vec<glob::Pattern>,
}

impl IgnoreFilter {
  /// Creates a new IgnoreFilter from a list of glob patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not a valid glob.
  pub fn from_patterns(root_dir: &Path, patterns: &[String]) -> Result<Self> {
    let patterns = patterns
      .iter()
      .map(|pattern| glob::Pattern::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern)))
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      root_dir: root_dir.to_path_buf(),
      patterns,
    })
  }

  fn is_ignored(&self, path: &Path) -> bool {
    let relative = normalize_relative_path(path, &self.root_dir);
    self
      .patterns
      .iter()
      .any(|pattern| pattern.matches_path(&relative) || pattern.matches_path(path))
  }
}

impl FileFilter for IgnoreFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    if self.is_ignored(path) {
      verbose_log!("Skipping: {} (matches ignore pattern)", path.display());
      Ok(FilterResult::skip("Matches ignore pattern"))
    } else {
      Ok(FilterResult::process())
    }
  }
}

/// Filter that selects files by extension.
///
/// Extensions are compared case-insensitively against the end of the file
/// name, so compound extensions such as `d.ts` work. `exclude` takes
/// precedence over `include`; with no `include` list every extension not
/// excluded passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
  include: Option<Vec<String>>,
  exclude: Vec<String>,
}

impl ExtensionFilter {
  /// Creates a filter from the `[extensions]` section of a config file.
  pub fn new(config: &ExtensionConfig) -> Self {
    Self {
      include: config.include.as_ref().map(|exts| normalize_extensions(exts)),
      exclude: normalize_extensions(&config.exclude),
    }
  }

  /// Creates a filter from command-line lists. An empty include list means
  /// "no include restriction".
  pub fn from_cli(include: Vec<String>, exclude: Vec<String>) -> Self {
    Self {
      include: if include.is_empty() {
        None
      } else {
        Some(normalize_extensions(&include))
      },
      exclude: normalize_extensions(&exclude),
    }
  }

  /// Merges command-line lists into this filter. A non-empty CLI include list
  /// replaces the configured one; CLI excludes are added.
  pub fn merge_cli(&mut self, include: Vec<String>, exclude: Vec<String>) {
    if !include.is_empty() {
      self.include = Some(normalize_extensions(&include));
    }
    for ext in normalize_extensions(&exclude) {
      if !self.exclude.contains(&ext) {
        self.exclude.push(ext);
      }
    }
  }

  /// Sets the include list if none is configured yet.
  pub fn include_by_default(&mut self, extensions: &[&str]) {
    if self.include.is_none() {
      let defaults: Vec<String> = extensions.iter().map(|ext| ext.to_string()).collect();
      self.include = Some(normalize_extensions(&defaults));
    }
  }

  pub const fn is_active(&self) -> bool {
    self.include.is_some() || !self.exclude.is_empty()
  }

  pub fn include(&self) -> Option<&[String]> {
    self.include.as_deref()
  }

  fn matches(file_name: &str, ext: &str) -> bool {
    file_name.len() > ext.len() + 1 && file_name.ends_with(&format!(".{ext}"))
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    let file_name = path
      .file_name()
      .and_then(|name| name.to_str())
      .unwrap_or("")
      .to_lowercase();

    if self.exclude.iter().any(|ext| Self::matches(&file_name, ext)) {
      return Ok(FilterResult::skip("Excluded extension"));
    }

    if let Some(ref include) = self.include
      && !include.iter().any(|ext| Self::matches(&file_name, ext))
    {
      return Ok(FilterResult::skip("Extension not included"));
    }

    Ok(FilterResult::process())
  }
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
  extensions
    .iter()
    .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
    .filter(|ext| !ext.is_empty())
    .collect()
}

/// Filter that combines multiple filters.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    for filter in &self.filters {
      let result = filter.should_process(path)?;
      if !result.should_process {
        return Ok(result);
      }
    }
    Ok(FilterResult::process())
  }
}

/// Constructs the filter chain used by the processor: ignore patterns first,
/// then the extension filter.
pub fn create_default_filter(
  root_dir: &Path,
  ignore_patterns: &[String],
  extension_filter: ExtensionFilter,
) -> Result<CompositeFilter> {
  let mut composite = CompositeFilter::new(vec![Box::new(IgnoreFilter::from_patterns(root_dir, ignore_patterns)?)]);
  if extension_filter.is_active() {
    composite.add_filter(Box::new(extension_filter));
  }
  Ok(composite)
}
