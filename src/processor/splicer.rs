//! # Splicer Module
//!
//! Inserts or replaces the fenced header at the top of file content.
//!
//! The existing header is located by scanning for the first two marker lines.
//! Everything between them (both markers included) is replaced; everything
//! outside is carried over byte for byte. With fewer than two markers the new
//! header and one blank line are prepended instead. A single stray marker is
//! left where it is.

use crate::header::{HeaderBlock, LineEnding};

/// Line indices of the first and second marker lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
  pub start: usize,
  pub end: usize,
}

/// How the header ended up in the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceKind {
  /// No existing header; a new one was prepended
  Inserted,
  /// An existing header span was replaced in place
  Replaced,
}

/// Result of splicing a header into content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
  pub content: String,
  pub kind: SpliceKind,
}

impl Spliced {
  /// Whether the spliced content differs from `original`.
  pub fn changed(&self, original: &str) -> bool {
    self.content != original
  }
}

/// Splits content into lines, each keeping its terminator.
///
/// Only `\n` ends a line, so `\r\n` terminators stay attached to their line.
/// A final line without a terminator is returned as-is.
pub fn split_lines(content: &str) -> Vec<&str> {
  content.split_inclusive('\n').collect()
}

/// Finds the first two marker lines.
///
/// Scanning stops at the second marker; marker lines further down are never
/// looked at.
pub fn find_header_span(lines: &[&str], header: &HeaderBlock) -> Option<HeaderSpan> {
  let mut start = None;

  for (idx, line) in lines.iter().enumerate() {
    if !header.is_marker(line) {
      continue;
    }
    match start {
      None => start = Some(idx),
      Some(first) => return Some(HeaderSpan { start: first, end: idx }),
    }
  }

  None
}

/// Splices `header` into `content`.
///
/// The header is rendered with the line ending detected from `content`.
pub fn splice(content: &str, header: &HeaderBlock) -> Spliced {
  let ending = LineEnding::detect(content);
  let rendered = header.render(ending);
  let lines = split_lines(content);

  match find_header_span(&lines, header) {
    Some(span) => {
      let mut out = String::with_capacity(content.len() + rendered.len());
      out.extend(lines[..span.start].iter().copied());
      out.push_str(&rendered);
      out.extend(lines[span.end + 1..].iter().copied());

      Spliced {
        content: out,
        kind: SpliceKind::Replaced,
      }
    }
    None => {
      let mut out = String::with_capacity(content.len() + rendered.len() + 2);
      out.push_str(&rendered);
      out.push_str(ending.as_str());
      out.push_str(content);

      Spliced {
        content: out,
        kind: SpliceKind::Inserted,
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::header::CommentSyntax;
  use crate::license::LicenseText;

  fn header_for(text: &str) -> HeaderBlock {
    HeaderBlock::new(&LicenseText::from_text(text), &CommentSyntax::line("// "))
  }

  fn marker() -> String {
    CommentSyntax::line("// ").marker()
  }

  #[test]
  fn test_split_lines_keeps_terminators() {
    assert_eq!(split_lines("a\nb\r\nc"), vec!["a\n", "b\r\n", "c"]);
    assert_eq!(split_lines("a\n\n"), vec!["a\n", "\n"]);
    assert!(split_lines("").is_empty());
  }

  #[test]
  fn test_insert_into_file_without_header() {
    let header = header_for("Copyright 2024\nAll rights reserved");
    let result = splice("console.log('hi');\n", &header);

    let m = marker();
    assert_eq!(result.kind, SpliceKind::Inserted);
    assert_eq!(
      result.content,
      format!("{m}\n// Copyright 2024\n// All rights reserved\n{m}\n\nconsole.log('hi');\n")
    );
  }

  #[test]
  fn test_replace_old_header_without_extra_blank_line() {
    let m = marker();
    let old = format!("{m}\n// Old notice\n{m}\n\nconsole.log('hi');\n");
    let header = header_for("Copyright 2024\nAll rights reserved");

    let result = splice(&old, &header);
    assert_eq!(result.kind, SpliceKind::Replaced);
    assert_eq!(
      result.content,
      format!("{m}\n// Copyright 2024\n// All rights reserved\n{m}\n\nconsole.log('hi');\n")
    );
  }

  #[test]
  fn test_replace_keeps_code_directly_after_closing_marker() {
    let m = marker();
    let old = format!("{m}\n// Old notice\n{m}\nconsole.log('hi');\n");
    let result = splice(&old, &header_for("New notice"));
    assert_eq!(result.content, format!("{m}\n// New notice\n{m}\nconsole.log('hi');\n"));
  }

  #[test]
  fn test_splice_is_idempotent() {
    let header = header_for("Copyright 2024\nAll rights reserved");
    let original = "import x from 'y';\n\nexport const a = 1;\n";

    let once = splice(original, &header);
    let twice = splice(&once.content, &header);

    assert_eq!(twice.kind, SpliceKind::Replaced);
    assert_eq!(twice.content, once.content);
    assert!(!twice.changed(&once.content));
  }

  #[test]
  fn test_content_around_span_is_preserved() {
    let m = marker();
    let old = format!("#!/usr/bin/env node\n{m}\n// stale\n// lines\n{m}\nbody();\n");
    let result = splice(&old, &header_for("fresh"));
    assert_eq!(result.content, format!("#!/usr/bin/env node\n{m}\n// fresh\n{m}\nbody();\n"));
  }

  #[test]
  fn test_single_marker_is_not_a_header() {
    let m = marker();
    let old = format!("{m}\nconst a = 1;\n");
    let result = splice(&old, &header_for("L"));

    assert_eq!(result.kind, SpliceKind::Inserted);
    assert_eq!(result.content, format!("{m}\n// L\n{m}\n\n{m}\nconst a = 1;\n"));
  }

  #[test]
  fn test_markers_after_the_second_are_inert() {
    let m = marker();
    let old = format!("{m}\n// old\n{m}\ncode();\n{m}\n// unrelated\n{m}\n");
    let result = splice(&old, &header_for("new"));
    assert_eq!(result.content, format!("{m}\n// new\n{m}\ncode();\n{m}\n// unrelated\n{m}\n"));
  }

  #[test]
  fn test_find_header_span() {
    let header = header_for("x");
    let m = format!("{}\n", marker());
    let lines = vec!["a\n", m.as_str(), "b\n", m.as_str(), "c\n", m.as_str()];
    assert_eq!(find_header_span(&lines, &header), Some(HeaderSpan { start: 1, end: 3 }));

    let lines = vec!["a\n", m.as_str(), "b\n"];
    assert_eq!(find_header_span(&lines, &header), None);
  }

  #[test]
  fn test_unterminated_final_marker_does_not_close_header() {
    let m = marker();
    let old = format!("{m}\n// old\n{m}");
    let result = splice(&old, &header_for("new"));
    assert_eq!(result.kind, SpliceKind::Inserted);
  }

  #[test]
  fn test_empty_file_gets_header_and_blank_line() {
    let m = marker();
    let result = splice("", &header_for("L"));
    assert_eq!(result.content, format!("{m}\n// L\n{m}\n\n"));
  }

  #[test]
  fn test_empty_license_produces_adjacent_markers() {
    let m = marker();
    let result = splice("x\n", &header_for(""));
    assert_eq!(result.content, format!("{m}\n{m}\n\nx\n"));

    let again = splice(&result.content, &header_for(""));
    assert_eq!(again.content, result.content);
  }

  #[test]
  fn test_crlf_content_stays_crlf_and_idempotent() {
    let header = header_for("Copyright 2024");
    let original = "let a = 1;\r\nlet b = 2;\r\n";

    let once = splice(original, &header);
    let m = marker();
    assert_eq!(
      once.content,
      format!("{m}\r\n// Copyright 2024\r\n{m}\r\n\r\nlet a = 1;\r\nlet b = 2;\r\n")
    );

    let twice = splice(&once.content, &header);
    assert_eq!(twice.content, once.content);
  }

  #[test]
  fn test_license_change_replaces_in_place() {
    let first = splice("body();\n", &header_for("v1 line a\nv1 line b\nv1 line c"));
    let second = splice(&first.content, &header_for("v2"));

    let m = marker();
    assert_eq!(second.kind, SpliceKind::Replaced);
    assert_eq!(second.content, format!("{m}\n// v2\n{m}\n\nbody();\n"));
  }
}
