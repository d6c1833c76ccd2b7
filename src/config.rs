//! # Configuration Module
//!
//! This module provides configuration support for headerfence: the traversal
//! root, the license file, extension filtering, ignore patterns, and
//! per-extension comment prefixes.
//!
//! Configuration can be specified in a `.headerfence.toml` file or via the
//! `HEADERFENCE_CONFIG` environment variable. Values resolve as built-in
//! defaults, then the config file, then command-line flags.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::file_filter::ExtensionFilter;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerfence.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERFENCE_CONFIG";

/// Traversal root used when neither config nor CLI set one.
pub const DEFAULT_ROOT_DIR: &str = "src";

/// License file used when neither config nor CLI set one.
pub const DEFAULT_LICENSE_FILE: &str = "misc/licence.header.md";

/// Extensions processed when no include list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts"];

/// Configuration for extension-based file filtering.
///
/// If `include` is specified, only files with those extensions will be
/// processed. Extensions in `exclude` are always skipped.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtensionConfig {
  #[serde(default)]
  pub include: Option<Vec<String>>,

  #[serde(default)]
  pub exclude: Vec<String>,
}

/// Contents of a `.headerfence.toml` file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Directory to traverse
  #[serde(default)]
  pub root_dir: Option<PathBuf>,

  /// File holding the license text
  #[serde(default)]
  pub license_file: Option<PathBuf>,

  /// Glob patterns (relative to the root) for files to skip
  #[serde(default)]
  pub ignore: Vec<String>,

  #[serde(default)]
  pub extensions: ExtensionConfig,

  /// Line-comment prefix overrides keyed by extension without the leading
  /// dot (e.g. `ts = "/// "`).
  #[serde(default)]
  pub comment_prefixes: HashMap<String, String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A configured value is invalid.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    let config = config.normalize();

    verbose_log!("Loaded {} comment prefix overrides", config.comment_prefixes.len());

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Comment prefixes are non-empty and single-line
  /// - Extension keys and filter entries don't include the leading dot
  fn validate(&self) -> Result<(), ConfigError> {
    for (ext, prefix) in &self.comment_prefixes {
      validate_extension("comment-prefixes", ext)?;
      validate_prefix(ext, prefix)?;
    }

    if let Some(ref include) = self.extensions.include {
      for ext in include {
        validate_extension("extensions.include", ext)?;
      }
    }

    for ext in &self.extensions.exclude {
      validate_extension("extensions.exclude", ext)?;
    }

    Ok(())
  }

  /// Normalize extension keys to lowercase for case-insensitive matching.
  fn normalize(self) -> Self {
    let comment_prefixes = self
      .comment_prefixes
      .into_iter()
      .map(|(k, v)| (k.to_lowercase(), v))
      .collect();

    Self {
      comment_prefixes,
      ..self
    }
  }
}

fn validate_extension(key: &str, ext: &str) -> Result<(), ConfigError> {
  if ext.starts_with('.') {
    return Err(ConfigError::InvalidValue {
      key: key.to_string(),
      message: format!("extension '{ext}' should not include leading dot"),
    });
  }
  if ext.is_empty() {
    return Err(ConfigError::InvalidValue {
      key: key.to_string(),
      message: "extension cannot be empty".to_string(),
    });
  }
  Ok(())
}

fn validate_prefix(ext: &str, prefix: &str) -> Result<(), ConfigError> {
  if prefix.is_empty() {
    return Err(ConfigError::InvalidValue {
      key: format!("comment-prefixes.{ext}"),
      message: "prefix cannot be empty".to_string(),
    });
  }
  if prefix.contains(['\n', '\r']) {
    return Err(ConfigError::InvalidValue {
      key: format!("comment-prefixes.{ext}"),
      message: "prefix must fit on one line".to_string(),
    });
  }
  Ok(())
}

/// Settings given on the command line. `None`/empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub root_dir: Option<PathBuf>,
  pub license_file: Option<PathBuf>,
  pub include_ext: Vec<String>,
  pub exclude_ext: Vec<String>,
  pub ignore: Vec<String>,
  pub comment_prefixes: HashMap<String, String>,
}

impl CliOverrides {
  /// Parses `--comment-prefix` values of the form `EXT:PREFIX`.
  ///
  /// Only the first `:` separates, so prefixes may contain colons.
  pub fn parse_comment_prefixes(args: &[String]) -> Result<HashMap<String, String>, ConfigError> {
    let mut prefixes = HashMap::with_capacity(args.len());

    for arg in args {
      let Some((ext, prefix)) = arg.split_once(':') else {
        return Err(ConfigError::InvalidValue {
          key: "--comment-prefix".to_string(),
          message: format!("expected EXT:PREFIX, got '{arg}'"),
        });
      };
      let ext = ext.trim().to_lowercase();
      validate_extension("--comment-prefix", &ext)?;
      validate_prefix(&ext, prefix)?;
      prefixes.insert(ext, prefix.to_string());
    }

    Ok(prefixes)
  }
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone)]
pub struct Settings {
  pub root_dir: PathBuf,
  pub license_file: PathBuf,
  pub extension_filter: ExtensionFilter,
  pub ignore: Vec<String>,
  pub comment_prefixes: HashMap<String, String>,
}

impl Settings {
  /// Layers CLI overrides over an optional config file over the defaults.
  pub fn resolve(config: Option<Config>, cli: CliOverrides) -> Self {
    let config = config.unwrap_or_default();

    let root_dir = cli
      .root_dir
      .or(config.root_dir)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR));

    let license_file = cli
      .license_file
      .or(config.license_file)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_LICENSE_FILE));

    let mut extension_filter = ExtensionFilter::new(&config.extensions);
    extension_filter.merge_cli(cli.include_ext, cli.exclude_ext);
    extension_filter.include_by_default(DEFAULT_EXTENSIONS);

    let mut ignore = config.ignore;
    ignore.extend(cli.ignore);

    let mut comment_prefixes = config.comment_prefixes;
    comment_prefixes.extend(cli.comment_prefixes);

    Self {
      root_dir,
      license_file,
      extension_filter,
      ignore,
      comment_prefixes,
    }
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERFENCE_CONFIG` environment variable
/// 3. `.headerfence.toml` in `search_dir`
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, if any.
///
/// An explicit path that does not exist is an error; a missing default file
/// is not.
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, search_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
