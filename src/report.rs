//! # Report Module
//!
//! Captures what happened to each collected file and writes an optional JSON
//! report of the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// What was (or, in check mode, would be) done to the file
  pub action: FileAction,
  /// Reason the file was skipped, if applicable
  #[serde(skip_serializing_if = "Option::is_none")]
  pub skipped_reason: Option<String>,
}

impl FileReport {
  pub fn new(path: &Path, action: FileAction) -> Self {
    Self {
      path: path.to_path_buf(),
      action,
      skipped_reason: None,
    }
  }

  pub fn skipped(path: &Path, reason: impl Into<String>) -> Self {
    Self {
      path: path.to_path_buf(),
      action: FileAction::Skipped,
      skipped_reason: Some(reason.into()),
    }
  }
}

/// Possible actions taken on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// A header was prepended to a file that had none
  Inserted,
  /// An outdated header was replaced in place
  Replaced,
  /// The header was already up to date
  Unchanged,
  /// The file was filtered out
  Skipped,
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary of processing results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
  pub total: usize,
  pub inserted: usize,
  pub replaced: usize,
  pub unchanged: usize,
  pub skipped: usize,
  /// Wall-clock time of the run in milliseconds
  pub elapsed_ms: u64,
}

impl ProcessingSummary {
  pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
    let mut summary = Self {
      total: reports.len(),
      elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
      ..Self::default()
    };

    for report in reports {
      match report.action {
        FileAction::Inserted => summary.inserted += 1,
        FileAction::Replaced => summary.replaced += 1,
        FileAction::Unchanged => summary.unchanged += 1,
        FileAction::Skipped => summary.skipped += 1,
      }
    }

    summary
  }

  /// Number of files whose content changed (or would change).
  pub const fn changed(&self) -> usize {
    self.inserted + self.replaced
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  check_only: bool,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Writes the run's reports as pretty-printed JSON to `output_path`.
pub fn write_json_report(
  output_path: &Path,
  files: &[FileReport],
  summary: &ProcessingSummary,
  check_only: bool,
) -> Result<()> {
  let report = JsonReport {
    check_only,
    summary,
    files,
  };
  let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
  fs::write(output_path, json).with_context(|| format!("Failed to write report: {}", output_path.display()))
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn sample_reports() -> Vec<FileReport> {
    vec![
      FileReport::new(Path::new("src/a.ts"), FileAction::Inserted),
      FileReport::new(Path::new("src/b.ts"), FileAction::Replaced),
      FileReport::new(Path::new("src/c.ts"), FileAction::Unchanged),
      FileReport::skipped(Path::new("src/d.css"), "Extension not included"),
    ]
  }

  #[test]
  fn test_summary_counts() {
    let summary = ProcessingSummary::from_reports(&sample_reports(), Duration::from_millis(12));

    assert_eq!(summary.total, 4);
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.replaced, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.changed(), 2);
    assert_eq!(summary.elapsed_ms, 12);
  }

  #[test]
  fn test_json_report() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let output = temp_dir.path().join("report.json");
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::ZERO);

    write_json_report(&output, &reports, &summary, true).expect("write report");

    let value: serde_json::Value =
      serde_json::from_str(&std::fs::read_to_string(&output).expect("read report")).expect("valid json");
    assert_eq!(value["check_only"], true);
    assert_eq!(value["summary"]["inserted"], 1);
    assert_eq!(value["files"][0]["path"], "src/a.ts");
    assert_eq!(value["files"][0]["action"], "inserted");
    assert!(value["files"][0].get("skipped_reason").is_none());
    assert_eq!(value["files"][3]["skipped_reason"], "Extension not included");
  }
}
