//! # Output Module
//!
//! This module centralizes all user-facing output for the headerfence tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show actionable information without requiring flags
//! - **Scannable**: Use formatting to make output easy to parse visually
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: Keep stdout predictable for piping/automation

use std::path::Path;

use headerfence::logging::{is_quiet, is_verbose};
use headerfence::processor::normalize_relative_path;
use headerfence::report::{FileReport, ProcessingSummary};
use owo_colors::{OwoColorize, Stream};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header missing
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header replaced / outdated
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Kind of file list being printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
  /// Check mode: files with no header
  Missing,
  /// Check mode: files with an outdated header
  Outdated,
  /// Modify mode: files that received a header
  Inserted,
  /// Modify mode: files whose header was replaced
  Replaced,
}

impl ListKind {
  fn heading(self, count: usize) -> String {
    let files_word = if count == 1 { "file" } else { "files" };
    match self {
      ListKind::Missing => format!(
        "{} {} {} missing a license header:",
        symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
        count,
        files_word
      ),
      ListKind::Outdated => format!(
        "{} {} {} with an outdated license header:",
        symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
        count,
        files_word
      ),
      ListKind::Inserted => format!(
        "{} Inserted header into {} {}:",
        symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
        count,
        files_word
      ),
      ListKind::Replaced => format!(
        "{} Replaced header in {} {}:",
        symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.green()),
        count,
        files_word
      ),
    }
  }

  /// Check-mode lists are still printed in quiet mode, as bare paths.
  const fn shown_when_quiet(self) -> bool {
    matches!(self, ListKind::Missing | ListKind::Outdated)
  }
}

/// Print the initial "Checking N files..." or "Processing N files..." message.
pub fn print_start_message(file_count: usize, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if modify_mode { "Processing" } else { "Checking" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print a list of files under a heading.
///
/// Files are sorted by path. Shows up to `limit` files (or
/// `DEFAULT_FILE_LIST_LIMIT` if None); verbose mode shows all of them.
pub fn print_file_list(kind: ListKind, files: &[&FileReport], base: &Path, limit: Option<usize>) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files: Vec<_> = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  if is_quiet() {
    if kind.shown_when_quiet() {
      for file in &sorted_files {
        println!("{}", make_relative_path(&file.path, base));
      }
    }
    return;
  }

  let count = sorted_files.len();
  println!("{}", kind.heading(count));

  let show_all = is_verbose();
  let effective_limit = if show_all {
    count
  } else {
    limit.unwrap_or(DEFAULT_FILE_LIST_LIMIT)
  };

  for file in sorted_files.iter().take(effective_limit) {
    println!("  {}", make_relative_path(&file.path, base));
  }

  if !show_all && count > effective_limit {
    let remaining = count - effective_limit;
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      remaining
    );
  }
}

/// Print the success message shown when nothing needs changing.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }
  println!(
    "{} All files have an up-to-date license header",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the one-line summary of the run.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let (inserted_word, replaced_word) = if check_only {
    ("missing", "outdated")
  } else {
    ("inserted", "replaced")
  };

  let mut line = format!(
    "{} {}, {} {}, {} up to date",
    summary.inserted, inserted_word, summary.replaced, replaced_word, summary.unchanged
  );
  if summary.skipped > 0 {
    line.push_str(&format!(", {} skipped", summary.skipped));
  }
  line.push_str(&format!(" ({}ms)", summary.elapsed_ms));

  println!("{}", line.if_supports_color(Stream::Stdout, |s| s.dimmed()));
}

/// Print a hint line.
pub fn print_hint(hint: &str) {
  if is_quiet() {
    return;
  }
  println!("{}", format!("hint: {hint}").if_supports_color(Stream::Stdout, |s| s.cyan()));
}

/// Display `path` relative to `base` when possible.
pub fn make_relative_path(path: &Path, base: &Path) -> String {
  normalize_relative_path(path, base).display().to_string()
}
