//! # Processor Module
//!
//! This module contains the core functionality for walking the root
//! directory and splicing header blocks into every qualifying file.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - Whole-file reading and writing
//! - [`file_collector`] - Directory traversal and path normalization
//! - [`splicer`] - Header insertion and replacement
//!
//! The [`Processor`] struct is the main entry point for all file operations.
//! Files are handled one at a time in sorted order, and the first failure
//! aborts the run. Files rewritten before the failure stay rewritten.

mod file_collector;
mod file_io;
pub mod splicer;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
pub use file_collector::{FileCollector, normalize_relative_path};
pub use file_io::FileIO;
pub use splicer::{HeaderSpan, SpliceKind, Spliced, find_header_span, splice, split_lines};
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::file_filter::{CompositeFilter, ExtensionFilter, FileFilter, create_default_filter};
use crate::header::{BuiltinResolver, CommentSyntax, CommentSyntaxResolver, HeaderBlock};
use crate::info_log;
use crate::license::LicenseText;
use crate::report::{FileAction, FileReport};

/// Reason recorded for files whose type has no line-comment syntax.
pub const NO_COMMENT_SYNTAX_REASON: &str = "No line comment syntax for file type";

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub license: LicenseText,
  pub root_dir: PathBuf,

  /// Only report what would change; never write
  pub check_only: bool,

  pub ignore_patterns: Vec<String>,
  pub extension_filter: ExtensionFilter,
  pub resolver: Box<dyn CommentSyntaxResolver>,
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(license, root_dir)
  /// }
  /// ```
  pub fn new(license: LicenseText, root_dir: PathBuf) -> Self {
    Self {
      license,
      root_dir,
      check_only: false,
      ignore_patterns: Vec::new(),
      extension_filter: ExtensionFilter::default(),
      resolver: Box::new(BuiltinResolver),
      diff_manager: None,
    }
  }
}

/// Processor for splicing header blocks into files.
///
/// The `Processor` is responsible for:
/// - Collecting files under the root directory
/// - Filtering them by ignore patterns, extension and comment syntax
/// - Inserting or replacing the fenced header in each file
/// - Showing diffs of the changes when requested
/// - Reporting what happened to each file
pub struct Processor {
  license: LicenseText,

  /// Whether to only check without modifying files
  check_only: bool,

  file_filter: CompositeFilter,

  resolver: Box<dyn CommentSyntaxResolver>,

  diff_manager: DiffManager,

  file_collector: FileCollector,

  /// Header blocks built so far, one per comment syntax
  headers: HashMap<CommentSyntax, HeaderBlock>,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns are invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let file_filter = create_default_filter(&config.root_dir, &config.ignore_patterns, config.extension_filter)?;

    Ok(Self {
      license: config.license,
      check_only: config.check_only,
      file_filter,
      resolver: config.resolver,
      diff_manager: config.diff_manager.unwrap_or_default(),
      file_collector: FileCollector::new(config.root_dir),
      headers: HashMap::new(),
    })
  }

  pub fn root_dir(&self) -> &Path {
    self.file_collector.root_dir()
  }

  pub const fn is_check_only(&self) -> bool {
    self.check_only
  }

  /// Collects every file under the root directory, sorted, before
  /// filtering.
  pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
    self.file_collector.traverse()
  }

  /// Collects and filters the files that will be spliced.
  ///
  /// Returns the files to process and reports for the skipped ones.
  pub fn plan(&self) -> Result<(Vec<PathBuf>, Vec<FileReport>)> {
    let mut selected = Vec::new();
    let mut skipped = Vec::new();

    for path in self.collect_files()? {
      let result = self.file_filter.should_process(&path)?;
      if !result.should_process {
        let reason = result.reason.unwrap_or_else(|| "Filtered".to_string());
        trace!("Skipping: {} ({})", path.display(), reason);
        skipped.push(FileReport::skipped(&path, reason));
        continue;
      }

      if self.resolver.resolve(&path).is_none() {
        trace!("Skipping: {} ({})", path.display(), NO_COMMENT_SYNTAX_REASON);
        skipped.push(FileReport::skipped(&path, NO_COMMENT_SYNTAX_REASON));
        continue;
      }

      selected.push(path);
    }

    debug!("Selected {} files, skipped {}", selected.len(), skipped.len());
    Ok((selected, skipped))
  }

  /// Processes every qualifying file under the root directory.
  ///
  /// Returns one report per collected file, skipped files included, sorted
  /// by path.
  ///
  /// # Errors
  ///
  /// Returns the first read, write or traversal error. Processing stops at
  /// that file; no earlier change is rolled back.
  pub fn process(&mut self) -> Result<Vec<FileReport>> {
    let (files, skipped) = self.plan()?;
    self.process_files(&files, skipped)
  }

  /// Processes an already planned file list, appending to `reports`.
  pub fn process_files(&mut self, files: &[PathBuf], mut reports: Vec<FileReport>) -> Result<Vec<FileReport>> {
    reports.reserve(files.len());

    for path in files {
      let report = self.process_file(path)?;
      reports.push(report);
    }

    reports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(reports)
  }

  /// Splices the header into a single file.
  ///
  /// The file is read whole, spliced, and written back whole if its content
  /// changed. In check mode nothing is written.
  pub fn process_file(&mut self, path: &Path) -> Result<FileReport> {
    let Some(syntax) = self.resolver.resolve(path) else {
      return Ok(FileReport::skipped(path, NO_COMMENT_SYNTAX_REASON));
    };

    let content = FileIO::read_full_content(path)?;
    let spliced = splice(&content, self.header_for(syntax));

    if !spliced.changed(&content) {
      trace!("Header up to date: {}", path.display());
      return Ok(FileReport::new(path, FileAction::Unchanged));
    }

    let action = match spliced.kind {
      SpliceKind::Inserted => FileAction::Inserted,
      SpliceKind::Replaced => FileAction::Replaced,
    };

    self
      .diff_manager
      .display_diff(path, &content, &spliced.content)
      .with_context(|| format!("Failed to record diff for {}", path.display()))?;

    if !self.check_only {
      FileIO::write_file(path, &spliced.content)?;
      match action {
        FileAction::Inserted => info_log!("Inserted header into: {}", path.display()),
        _ => info_log!("Replaced header in: {}", path.display()),
      }
    }

    Ok(FileReport::new(path, action))
  }

  /// Returns the header for `syntax`, building it on first use.
  fn header_for(&mut self, syntax: CommentSyntax) -> &HeaderBlock {
    let license = &self.license;
    self
      .headers
      .entry(syntax)
      .or_insert_with_key(|syntax| HeaderBlock::new(license, syntax))
  }
}
