//! Shared diagnostics model and rendering utilities.
//!
//! The data structures here are intentionally minimal and deterministic so
//! they can be reused across tree building, binding, resolution, and flow
//! analysis without pulling in any heavy dependencies.
//!
//! ```
//! use diagnostics::render::{render_diagnostic, SourceProvider};
//! use diagnostics::{Diagnostic, FileId, Span, TextRange};
//!
//! struct SingleFile {
//!   name: String,
//!   text: String,
//! }
//!
//! impl SourceProvider for SingleFile {
//!   fn file_name(&self, _file: FileId) -> &str {
//!     &self.name
//!   }
//!
//!   fn file_text(&self, _file: FileId) -> &str {
//!     &self.text
//!   }
//! }
//!
//! let file = FileId(0);
//! let provider = SingleFile {
//!   name: "example.js".into(),
//!   text: "let x = 1;".into(),
//! };
//! let diag = Diagnostic::error(
//!   "TEST0001",
//!   "an example error",
//!   Span {
//!     file,
//!     range: TextRange::new(4, 5),
//!   },
//! );
//!
//! let rendered = render_diagnostic(&provider, &diag);
//! assert!(rendered.contains("TEST0001"));
//! assert!(rendered.contains("--> example.js:1:5"));
//! ```

pub mod render;

use std::fmt::Display;
use std::fmt::Formatter;

/// A stable identifier for a file in a program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// A byte range in a file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TextRange {
  pub start: u32,
  pub end: u32,
}

impl TextRange {
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  pub fn len(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }
}

/// A span across a specific file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Span {
  pub file: FileId,
  pub range: TextRange,
}

impl Span {
  pub const fn new(file: FileId, range: TextRange) -> Self {
    Self { file, range }
  }
}

/// Diagnostic severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
  Error,
  Warning,
  Note,
  Help,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
      Severity::Help => "help",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A label attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
  pub span: Span,
  pub message: String,
  pub is_primary: bool,
}

impl Label {
  pub fn new(span: Span, message: impl Into<String>, is_primary: bool) -> Self {
    Self {
      span,
      message: message.into(),
      is_primary,
    }
  }

  pub fn primary(span: Span, message: impl Into<String>) -> Self {
    Self::new(span, message, true)
  }

  pub fn secondary(span: Span, message: impl Into<String>) -> Self {
    Self::new(span, message, false)
  }
}

/// A user-facing diagnostic with optional labels and notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  pub primary: Span,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    code: &'static str,
    message: impl Into<String>,
    primary: Span,
  ) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      primary,
      labels: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn error(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Error, code, message, primary)
  }

  pub fn warning(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Warning, code, message, primary)
  }

  pub fn note(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Note, code, message, primary)
  }

  pub fn help(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Help, code, message, primary)
  }

  pub fn with_label(mut self, label: Label) -> Self {
    self.labels.push(label);
    self
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }

  pub fn push_note(&mut self, note: impl Into<String>) {
    self.notes.push(note.into());
  }
}

/// Sort diagnostics into a stable, user-friendly order: by file, then start
/// offset, then end offset, then code, then message.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
  diagnostics.sort_by(|a, b| {
    a.primary
      .file
      .cmp(&b.primary.file)
      .then(a.primary.range.start.cmp(&b.primary.range.start))
      .then(a.primary.range.end.cmp(&b.primary.range.end))
      .then(a.code.cmp(b.code))
      .then(a.message.cmp(&b.message))
  });
}

/// Sort labels so primary labels come first, then by span.
pub fn sort_labels(labels: &mut [Label]) {
  labels.sort_by(|a, b| {
    b.is_primary
      .cmp(&a.is_primary)
      .then(a.span.file.cmp(&b.span.file))
      .then(a.span.range.start.cmp(&b.span.range.start))
      .then(a.span.range.end.cmp(&b.span.range.end))
      .then(a.message.cmp(&b.message))
  });
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_range_len_and_emptiness() {
    assert_eq!(TextRange::new(2, 5).len(), 3);
    assert!(!TextRange::new(2, 5).is_empty());
    assert!(TextRange::new(5, 5).is_empty());
    assert_eq!(TextRange::new(5, 2).len(), 0);
  }

  #[test]
  fn sorts_diagnostics_deterministically() {
    let span = |file, start, end| Span::new(FileId(file), TextRange::new(start, end));
    let mut diags = vec![
      Diagnostic::error("B0002", "b", span(0, 4, 5)),
      Diagnostic::error("A0001", "a", span(0, 4, 5)),
      Diagnostic::error("A0001", "a", span(0, 1, 2)),
      Diagnostic::error("A0001", "a", span(1, 0, 1)),
    ];
    sort_diagnostics(&mut diags);
    let order: Vec<_> = diags
      .iter()
      .map(|d| (d.primary.file.0, d.primary.range.start, d.code))
      .collect();
    assert_eq!(order, vec![
      (0, 1, "A0001"),
      (0, 4, "A0001"),
      (0, 4, "B0002"),
      (1, 0, "A0001"),
    ]);
  }

  #[test]
  fn sorts_labels_primary_first() {
    let span = |start, end| Span::new(FileId(0), TextRange::new(start, end));
    let mut labels = vec![
      Label::secondary(span(0, 1), "s"),
      Label::primary(span(9, 10), "p"),
    ];
    sort_labels(&mut labels);
    assert!(labels[0].is_primary);
  }
}
