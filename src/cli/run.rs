//! # Run Command
//!
//! Resolves settings, loads the license, and splices headers into every
//! qualifying file under the root directory.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use headerfence::config::{CliOverrides, Settings, load_config};
use headerfence::diff::DiffManager;
use headerfence::header::create_resolver;
use headerfence::info_log;
use headerfence::license::LicenseText;
use headerfence::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use headerfence::processor::{Processor, ProcessorConfig};
use headerfence::report::{FileAction, FileReport, ProcessingSummary, write_json_report};
use tracing::debug;

use crate::output::{
  ListKind, print_all_files_ok, print_blank_line, print_file_list, print_hint, print_start_message, print_summary,
};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Directory to scan recursively [default: src]
  #[arg(value_name = "ROOT_DIR")]
  pub root_dir: Option<PathBuf>,

  /// File containing the license text [default: misc/licence.header.md]
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Only process files with these extensions (repeatable, case-insensitive)
  /// [default: ts]
  #[arg(long = "ext", value_name = "EXT")]
  pub include_ext: Vec<String>,

  /// Exclude files with these extensions (repeatable, case-insensitive)
  #[arg(long, value_name = "EXT")]
  pub exclude_ext: Vec<String>,

  /// Glob patterns, relative to the root, of files to skip (repeatable)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Override the line-comment prefix for an extension (repeatable, format:
  /// EXT:PREFIX). Example: --comment-prefix "sql:-- "
  #[arg(long, value_name = "EXT:PREFIX")]
  pub comment_prefix: Vec<String>,

  /// Path to config file (default: .headerfence.toml in the current
  /// directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Check mode: report files whose header is missing or outdated without
  /// modifying them. Exits with status 1 if any are found.
  #[arg(long)]
  pub check: bool,

  /// Print a diff of every change to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Append a diff of every change to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl RunArgs {
  fn overrides(&self) -> Result<CliOverrides> {
    let comment_prefixes = CliOverrides::parse_comment_prefixes(&self.comment_prefix)?;

    Ok(CliOverrides {
      root_dir: self.root_dir.clone(),
      license_file: self.license_file.clone(),
      include_ext: self.include_ext.clone(),
      exclude_ext: self.exclude_ext.clone(),
      ignore: self.ignore.clone(),
      comment_prefixes,
    })
  }
}

/// Run headerfence with the given arguments
pub fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;
  let config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;
  if config.is_some() {
    debug!("Using configuration file");
  }

  let settings = Settings::resolve(config, args.overrides()?);
  debug!("Root directory: {}", settings.root_dir.display());
  debug!("License file: {}", settings.license_file.display());

  // Nothing is touched unless the license loads
  let license = LicenseText::load(&settings.license_file)?;

  let check_only = args.check;

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  let mut processor = Processor::new(ProcessorConfig {
    check_only,
    ignore_patterns: settings.ignore,
    extension_filter: settings.extension_filter,
    resolver: create_resolver(settings.comment_prefixes),
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(license, settings.root_dir)
  })?;

  let (files, skipped) = processor.plan()?;

  print_start_message(files.len(), !check_only);

  let start_time = Instant::now();
  let file_reports = processor.process_files(&files, skipped)?;
  let elapsed = start_time.elapsed();

  let summary = ProcessingSummary::from_reports(&file_reports, elapsed);

  let inserted = reports_with(&file_reports, FileAction::Inserted);
  let replaced = reports_with(&file_reports, FileAction::Replaced);
  let base = current_dir.as_path();

  print_blank_line();

  if inserted.is_empty() && replaced.is_empty() {
    print_all_files_ok();
  } else {
    let (inserted_kind, replaced_kind) = if check_only {
      (ListKind::Missing, ListKind::Outdated)
    } else {
      (ListKind::Inserted, ListKind::Replaced)
    };

    // Split the limit between lists if both have content
    let limit = if !inserted.is_empty() && !replaced.is_empty() {
      Some(10)
    } else {
      None
    };

    print_file_list(inserted_kind, &inserted, base, limit);
    if !inserted.is_empty() && !replaced.is_empty() {
      print_blank_line();
    }
    print_file_list(replaced_kind, &replaced, base, limit);
  }

  print_blank_line();
  print_summary(&summary, check_only);

  if let Some(ref output_path) = args.report_json {
    write_json_report(output_path, &file_reports, &summary, check_only)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  if check_only && summary.changed() > 0 {
    print_blank_line();
    print_hint("Run without --check to insert or refresh the headers.");
    process::exit(1);
  }

  Ok(())
}

fn reports_with(reports: &[FileReport], action: FileAction) -> Vec<&FileReport> {
  reports.iter().filter(|report| report.action == action).collect()
}
