//! # Header Module
//!
//! This module builds the fenced header block that gets spliced into source
//! files, and resolves which line-comment syntax a file uses.
//!
//! The module includes:
//! - [`CommentSyntax`] for the line-comment prefix of a file type
//! - [`HeaderBlock`] for the marker-fenced, commented license text
//! - [`LineEnding`] for rendering the block with a file's own line breaks
//! - [`CommentSyntaxResolver`] implementations mapping paths to syntaxes
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use headerfence::header::{BuiltinResolver, CommentSyntaxResolver, HeaderBlock, LineEnding};
//! use headerfence::license::LicenseText;
//!
//! let license = LicenseText::from_text("Copyright 2024\nAll rights reserved");
//! let syntax = BuiltinResolver.resolve(Path::new("src/index.ts")).expect("ts has line comments");
//! let header = HeaderBlock::new(&license, &syntax);
//!
//! let rendered = header.render(LineEnding::Lf);
//! assert!(rendered.starts_with("// ====="));
//! assert!(rendered.contains("// Copyright 2024\n// All rights reserved\n"));
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::license::LicenseText;
use crate::verbose_log;

/// Number of `=` characters following the comment prefix in a marker line.
pub const MARKER_WIDTH: usize = 77;

/// Character repeated to form the marker line.
pub const MARKER_FILL: char = '=';

/// The line-comment syntax of a file type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentSyntax {
  /// Prefix written before every header line (e.g. "// " or "# ")
  prefix: String,
}

impl CommentSyntax {
  pub fn line(prefix: &str) -> Self {
    Self {
      prefix: prefix.to_string(),
    }
  }

  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  /// The marker line text without a line terminator.
  pub fn marker(&self) -> String {
    let mut marker = String::with_capacity(self.prefix.len() + MARKER_WIDTH);
    marker.push_str(&self.prefix);
    marker.extend(std::iter::repeat_n(MARKER_FILL, MARKER_WIDTH));
    marker
  }
}

/// Line terminator used when rendering a header into a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
  #[default]
  Lf,
  CrLf,
}

impl LineEnding {
  /// Detects the line ending from the first line of `content`.
  ///
  /// Content without any line break is treated as `\n`.
  pub fn detect(content: &str) -> Self {
    match content.find('\n') {
      Some(idx) if content[..idx].ends_with('\r') => LineEnding::CrLf,
      _ => LineEnding::Lf,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      LineEnding::Lf => "\n",
      LineEnding::CrLf => "\r\n",
    }
  }
}

/// A header block: marker line, commented license lines, marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
  marker: String,
  commented_lines: Vec<String>,
}

impl HeaderBlock {
  /// Builds the header for `license` in the given comment syntax.
  ///
  /// Every license line is prefixed verbatim, blank lines included. An empty
  /// license yields a block of two adjacent marker lines.
  pub fn new(license: &LicenseText, syntax: &CommentSyntax) -> Self {
    let commented_lines = license
      .lines()
      .map(|line| format!("{}{}", syntax.prefix(), line))
      .collect();

    Self {
      marker: syntax.marker(),
      commented_lines,
    }
  }

  pub fn marker(&self) -> &str {
    &self.marker
  }

  pub fn commented_lines(&self) -> &[String] {
    &self.commented_lines
  }

  /// Number of lines in the rendered block, both markers included.
  pub fn line_count(&self) -> usize {
    self.commented_lines.len() + 2
  }

  /// Returns `true` if `line` is exactly the marker followed by a line break.
  ///
  /// `line` must carry its terminator; a final unterminated line never counts
  /// as a marker.
  pub fn is_marker(&self, line: &str) -> bool {
    let Some(body) = line.strip_suffix('\n') else {
      return false;
    };
    let body = body.strip_suffix('\r').unwrap_or(body);
    body == self.marker
  }

  /// Renders the block with every line terminated by `ending`.
  pub fn render(&self, ending: LineEnding) -> String {
    let eol = ending.as_str();
    let mut out = String::new();

    out.push_str(&self.marker);
    out.push_str(eol);
    for line in &self.commented_lines {
      out.push_str(line);
      out.push_str(eol);
    }
    out.push_str(&self.marker);
    out.push_str(eol);

    out
  }
}

/// Trait for resolving the comment syntax of a file path.
///
/// Returns `None` when the file type has no line-comment syntax, in which case
/// the file is skipped.
pub trait CommentSyntaxResolver: Send + Sync {
  fn resolve(&self, path: &Path) -> Option<CommentSyntax>;
}

/// Resolver backed by the built-in extension table.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl CommentSyntaxResolver for BuiltinResolver {
  fn resolve(&self, path: &Path) -> Option<CommentSyntax> {
    builtin_syntax_for_file(path)
  }
}

/// Resolver that checks user-configured prefixes first, then falls back to
/// the built-in table.
#[derive(Debug)]
pub struct ConfigurableResolver {
  /// Lowercased extension -> line-comment prefix
  prefixes: HashMap<String, String>,
}

impl ConfigurableResolver {
  pub fn new(prefixes: HashMap<String, String>) -> Self {
    let prefixes = prefixes.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect();
    Self { prefixes }
  }
}

impl CommentSyntaxResolver for ConfigurableResolver {
  fn resolve(&self, path: &Path) -> Option<CommentSyntax> {
    let file_name = lowercase_file_name(path);

    // Longest configured extension wins so "d.ts" beats "ts"
    let configured = self
      .prefixes
      .iter()
      .filter(|(ext, _)| file_name.ends_with(&format!(".{ext}")))
      .max_by_key(|(ext, _)| ext.len());

    if let Some((ext, prefix)) = configured {
      verbose_log!("Using configured comment prefix for .{}: {:?}", ext, prefix);
      return Some(CommentSyntax::line(prefix));
    }

    builtin_syntax_for_file(path)
  }
}

/// Creates a resolver for the given prefix overrides.
///
/// With no overrides the plain [`BuiltinResolver`] is used.
pub fn create_resolver(prefixes: HashMap<String, String>) -> Box<dyn CommentSyntaxResolver> {
  if prefixes.is_empty() {
    Box::new(BuiltinResolver)
  } else {
    Box::new(ConfigurableResolver::new(prefixes))
  }
}

fn lowercase_file_name(path: &Path) -> String {
  path
    .file_name()
    .and_then(|name| name.to_str())
    .unwrap_or("")
    .to_lowercase()
}

/// Looks up the line-comment syntax for a file from its extension, or from
/// its file name for extensionless build files.
///
/// File types that only have block comments (HTML, CSS, XML, ...) resolve to
/// `None`.
fn builtin_syntax_for_file(path: &Path) -> Option<CommentSyntax> {
  let file_name = lowercase_file_name(path);

  let extension = path
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or("")
    .to_lowercase();

  match extension.as_str() {
    "ts" | "tsx" | "mts" | "cts" | "js" | "jsx" | "mjs" | "cjs" | "rs" | "go" | "c" | "h" | "cc" | "cpp" | "hh"
    | "hpp" | "cs" | "java" | "kt" | "kts" | "scala" | "swift" | "dart" | "groovy" | "proto" | "php" | "m" | "mm"
    | "v" | "sv" | "hcl" => Some(CommentSyntax::line("// ")),
    "py" | "sh" | "bash" | "zsh" | "rb" | "pl" | "yaml" | "yml" | "toml" | "tf" | "bzl" | "r" | "ps1" | "cmake" => {
      Some(CommentSyntax::line("# "))
    }
    "sql" | "hs" | "lua" | "sdl" => Some(CommentSyntax::line("-- ")),
    "el" | "lisp" | "clj" => Some(CommentSyntax::line(";; ")),
    "erl" | "tex" => Some(CommentSyntax::line("% ")),
    _ => {
      if file_name == "dockerfile" || file_name == "makefile" || file_name == "cmakelists.txt" {
        Some(CommentSyntax::line("# "))
      } else {
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn slashes() -> CommentSyntax {
    CommentSyntax::line("// ")
  }

  #[test]
  fn test_marker_line() {
    let marker = slashes().marker();
    assert_eq!(
      marker,
      "// ============================================================================="
    );
    assert_eq!(marker.len(), 3 + MARKER_WIDTH);
  }

  #[test]
  fn test_header_lines_are_prefixed_in_order() {
    let license = LicenseText::from_text("Copyright 2024\nAll rights reserved");
    let header = HeaderBlock::new(&license, &slashes());

    assert_eq!(header.commented_lines(), ["// Copyright 2024", "// All rights reserved"]);
    assert_eq!(header.line_count(), 4);
  }

  #[test]
  fn test_blank_license_line_keeps_prefix() {
    let license = LicenseText::from_text("a\n\nb");
    let header = HeaderBlock::new(&license, &slashes());
    assert_eq!(header.commented_lines(), ["// a", "// ", "// b"]);
  }

  #[test]
  fn test_empty_license_renders_adjacent_markers() {
    let header = HeaderBlock::new(&LicenseText::from_text(""), &slashes());
    let marker = slashes().marker();
    assert_eq!(header.render(LineEnding::Lf), format!("{marker}\n{marker}\n"));
  }

  #[test]
  fn test_render_crlf() {
    let header = HeaderBlock::new(&LicenseText::from_text("x"), &CommentSyntax::line("# "));
    let rendered = header.render(LineEnding::CrLf);
    assert!(rendered.contains("\r\n# x\r\n"));
    assert!(rendered.ends_with("\r\n"));
    assert!(!rendered.replace("\r\n", "").contains('\n'));
  }

  #[test]
  fn test_is_marker() {
    let header = HeaderBlock::new(&LicenseText::from_text("x"), &slashes());
    let marker = header.marker().to_string();

    assert!(header.is_marker(&format!("{marker}\n")));
    assert!(header.is_marker(&format!("{marker}\r\n")));
    // Unterminated, padded, or differently sized lines are not markers
    assert!(!header.is_marker(&marker));
    assert!(!header.is_marker(&format!(" {marker}\n")));
    assert!(!header.is_marker(&format!("{marker}=\n")));
    assert!(!header.is_marker(&format!("{marker} \n")));
  }

  #[test]
  fn test_detect_line_ending() {
    assert_eq!(LineEnding::detect("a\r\nb\n"), LineEnding::CrLf);
    assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
    assert_eq!(LineEnding::detect("no newline"), LineEnding::Lf);
    assert_eq!(LineEnding::detect(""), LineEnding::Lf);
  }

  #[test]
  fn test_builtin_resolver() {
    let resolver = BuiltinResolver;
    assert_eq!(resolver.resolve(Path::new("src/index.ts")), Some(slashes()));
    assert_eq!(resolver.resolve(Path::new("main.RS")), Some(slashes()));
    assert_eq!(resolver.resolve(Path::new("tool.py")), Some(CommentSyntax::line("# ")));
    assert_eq!(resolver.resolve(Path::new("Dockerfile")), Some(CommentSyntax::line("# ")));
    assert_eq!(resolver.resolve(Path::new("query.sql")), Some(CommentSyntax::line("-- ")));
    assert_eq!(resolver.resolve(Path::new("index.html")), None);
    assert_eq!(resolver.resolve(Path::new("README")), None);
  }

  #[test]
  fn test_configurable_resolver_overrides_and_falls_back() {
    let mut prefixes = HashMap::new();
    prefixes.insert("TS".to_string(), "/// ".to_string());
    prefixes.insert("d.ts".to_string(), "//! ".to_string());
    prefixes.insert("css".to_string(), "/* ".to_string());
    let resolver = ConfigurableResolver::new(prefixes);

    assert_eq!(resolver.resolve(Path::new("a.ts")), Some(CommentSyntax::line("/// ")));
    assert_eq!(resolver.resolve(Path::new("types.d.ts")), Some(CommentSyntax::line("//! ")));
    assert_eq!(resolver.resolve(Path::new("site.css")), Some(CommentSyntax::line("/* ")));
    assert_eq!(resolver.resolve(Path::new("tool.py")), Some(CommentSyntax::line("# ")));
  }
}
