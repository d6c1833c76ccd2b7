mod common;

use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{LICENSE_TEXT, marker, read_file, rendered_header, setup_default_project, write_file};
use predicates::prelude::*;

fn headerfence() -> Result<Command> {
  let mut cmd = Command::cargo_bin("headerfence")?;
  cmd.env_remove("HEADERFENCE_CONFIG").env_remove("RUST_LOG");
  cmd.arg("--colors=never");
  Ok(cmd)
}

#[test]
fn test_default_invocation_updates_ts_files_under_src() -> Result<()> {
  let temp_dir = setup_default_project()?;
  let root = temp_dir.path();

  headerfence()?
    .current_dir(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("Inserted header into 2 files"));

  let header = rendered_header(LICENSE_TEXT, "// ");
  assert_eq!(
    read_file(&root.join("src/a.ts"))?,
    format!("{header}\nexport const a = 1;\n")
  );
  assert_eq!(
    read_file(&root.join("src/nested/b.ts"))?,
    format!("{header}\nexport const b = 2;\n")
  );
  assert_eq!(read_file(&root.join("src/readme.md"))?, "# not touched\n");

  Ok(())
}

#[test]
fn test_rerun_reports_everything_up_to_date() -> Result<()> {
  let temp_dir = setup_default_project()?;

  headerfence()?.current_dir(temp_dir.path()).assert().success();
  let first = read_file(&temp_dir.path().join("src/a.ts"))?;

  headerfence()?
    .current_dir(temp_dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("All files have an up-to-date license header"));
  assert_eq!(read_file(&temp_dir.path().join("src/a.ts"))?, first);

  Ok(())
}

#[test]
fn test_check_mode_exits_nonzero_without_writing() -> Result<()> {
  let temp_dir = setup_default_project()?;

  headerfence()?
    .current_dir(temp_dir.path())
    .arg("--check")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("missing a license header"))
    .stdout(predicate::str::contains("hint:"));

  assert_eq!(
    read_file(&temp_dir.path().join("src/a.ts"))?,
    "export const a = 1;\n"
  );

  Ok(())
}

#[test]
fn test_check_mode_passes_once_headers_are_current() -> Result<()> {
  let temp_dir = setup_default_project()?;

  headerfence()?.current_dir(temp_dir.path()).assert().success();
  headerfence()?
    .current_dir(temp_dir.path())
    .arg("--check")
    .assert()
    .success();

  Ok(())
}

#[test]
fn test_quiet_check_lists_bare_paths() -> Result<()> {
  let temp_dir = setup_default_project()?;

  headerfence()?
    .current_dir(temp_dir.path())
    .args(["--check", "--quiet"])
    .assert()
    .code(1)
    .stdout(predicate::str::contains("src/a.ts"))
    .stdout(predicate::str::contains("Checking").not());

  Ok(())
}

#[test]
fn test_missing_license_fails_before_touching_files() -> Result<()> {
  let temp_dir = setup_default_project()?;
  std::fs::remove_file(temp_dir.path().join("misc/licence.header.md"))?;

  headerfence()?
    .current_dir(temp_dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to read license file"));

  assert_eq!(
    read_file(&temp_dir.path().join("src/a.ts"))?,
    "export const a = 1;\n"
  );

  Ok(())
}

#[test]
fn test_missing_root_directory_fails() -> Result<()> {
  let temp_dir = setup_default_project()?;

  headerfence()?
    .current_dir(temp_dir.path())
    .arg("does-not-exist")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Root directory does not exist"));

  Ok(())
}

#[test]
fn test_cli_flags_override_defaults() -> Result<()> {
  let temp_dir = tempfile::tempdir()?;
  let root = temp_dir.path();
  write_file(root, "LICENSE.header", "MIT\n")?;
  let py = write_file(root, "lib/tool.py", "print(1)\n")?;
  let ts = write_file(root, "lib/a.ts", "let a = 1;\n")?;

  headerfence()?
    .current_dir(root)
    .args(["lib", "-f", "LICENSE.header", "--ext", "py"])
    .assert()
    .success();

  assert_eq!(read_file(&py)?, format!("{}\nprint(1)\n", rendered_header("MIT\n", "# ")));
  assert_eq!(read_file(&ts)?, "let a = 1;\n");

  Ok(())
}

#[test]
fn test_config_file_is_honored() -> Result<()> {
  let temp_dir = tempfile::tempdir()?;
  let root = temp_dir.path();
  write_file(root, "legal/header.txt", "Proprietary\n")?;
  let sql = write_file(root, "db/schema.sql", "select 1;\n")?;
  let skipped = write_file(root, "db/generated/out.sql", "select 2;\n")?;
  write_file(
    root,
    ".headerfence.toml",
    r#"root-dir = "db"
license-file = "legal/header.txt"
ignore = ["generated/**"]

[extensions]
include = ["sql"]

[comment-prefixes]
sql = "--- "
"#,
  )?;

  headerfence()?.current_dir(root).assert().success();

  assert_eq!(
    read_file(&sql)?,
    format!("{}\nselect 1;\n", rendered_header("Proprietary\n", "--- "))
  );
  assert_eq!(read_file(&skipped)?, "select 2;\n");

  Ok(())
}

#[test]
fn test_no_config_ignores_config_file() -> Result<()> {
  let temp_dir = setup_default_project()?;
  write_file(temp_dir.path(), ".headerfence.toml", "root-dir = \"elsewhere\"\n")?;

  headerfence()?
    .current_dir(temp_dir.path())
    .arg("--no-config")
    .assert()
    .success();

  assert!(read_file(&temp_dir.path().join("src/a.ts"))?.starts_with(&marker("// ")));

  Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
  let temp_dir = setup_default_project()?;
  write_file(temp_dir.path(), ".headerfence.toml", "unknown-key = true\n")?;

  headerfence()?.current_dir(temp_dir.path()).assert().failure();

  assert_eq!(
    read_file(&temp_dir.path().join("src/a.ts"))?,
    "export const a = 1;\n"
  );

  Ok(())
}

#[test]
fn test_malformed_comment_prefix_is_rejected() -> Result<()> {
  let temp_dir = setup_default_project()?;

  headerfence()?
    .current_dir(temp_dir.path())
    .args(["--comment-prefix", "no-separator"])
    .assert()
    .failure();

  Ok(())
}

#[test]
fn test_json_report_is_written() -> Result<()> {
  let temp_dir = setup_default_project()?;
  let report_path = temp_dir.path().join("report.json");

  headerfence()?
    .current_dir(temp_dir.path())
    .arg("--report-json")
    .arg(&report_path)
    .assert()
    .success();

  let report: serde_json::Value = serde_json::from_str(&read_file(&report_path)?)?;
  assert_eq!(report["check_only"], false);
  assert_eq!(report["summary"]["inserted"], 2);
  assert_eq!(report["summary"]["skipped"], 1);
  assert_eq!(report["files"].as_array().map(Vec::len), Some(3));

  Ok(())
}

#[test]
fn test_save_diff_writes_unified_diff() -> Result<()> {
  let temp_dir = setup_default_project()?;
  let diff_path = temp_dir.path().join("changes.diff");

  headerfence()?
    .current_dir(temp_dir.path())
    .arg("--check")
    .arg("--save-diff")
    .arg(&diff_path)
    .assert()
    .code(1);

  let diff = read_file(&diff_path)?;
  assert!(diff.contains("a.ts"));
  assert!(diff.contains(&format!("+{}", marker("// "))));

  Ok(())
}
