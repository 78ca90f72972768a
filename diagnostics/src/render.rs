use crate::Diagnostic;
use crate::FileId;
use crate::Label;
use crate::TextRange;
use std::fmt::Write;

/// Provides access to source text for rendering diagnostics. Every `FileId`
/// handed to a renderer must have been registered with the provider.
pub trait SourceProvider {
  fn file_name(&self, file: FileId) -> &str;
  fn file_text(&self, file: FileId) -> &str;
}

/// Render a diagnostic into a human-readable string with caret highlighting.
///
/// Format:
///
/// ```text
/// error[FA0001]: unreachable code
///  --> demo.js:3:5
///   |
/// 3 |     x = 1;
///   |     ^^^^^^ unreachable code
/// = note: ...
/// ```
pub fn render_diagnostic(provider: &dyn SourceProvider, diagnostic: &Diagnostic) -> String {
  let mut output = String::new();

  let mut labels = Vec::with_capacity(diagnostic.labels.len() + 1);
  labels.push(Label {
    span: diagnostic.primary,
    message: diagnostic.message.clone(),
    is_primary: true,
  });
  labels.extend(diagnostic.labels.iter().cloned());
  crate::sort_labels(&mut labels);

  writeln!(
    output,
    "{}[{}]: {}",
    diagnostic.severity, diagnostic.code, diagnostic.message
  )
  .unwrap();

  for label in &labels {
    render_label(provider, &mut output, label);
  }

  for note in &diagnostic.notes {
    writeln!(output, "= note: {}", note).unwrap();
  }

  output
}

/// Render a batch of diagnostics, separated by blank lines.
pub fn render_diagnostics(provider: &dyn SourceProvider, diagnostics: &[Diagnostic]) -> String {
  let mut output = String::new();
  for (i, diagnostic) in diagnostics.iter().enumerate() {
    if i > 0 {
      output.push('\n');
    }
    output.push_str(&render_diagnostic(provider, diagnostic));
  }
  output
}

fn render_label(provider: &dyn SourceProvider, output: &mut String, label: &Label) {
  let name = provider.file_name(label.span.file);
  let text = provider.file_text(label.span.file);
  let cache = LineCache::new(text);

  let (start, end) = clamp_range(text, label.span.range);
  let start_line = cache.line_index_at_offset(start);
  let (line, col) = cache.line_and_column(start);
  writeln!(output, " --> {}:{}:{}", name, line, col).unwrap();

  let gutter_width = (start_line + 1).to_string().len();
  let (line_start, line_end) = cache.line_bounds(start_line);
  let line_text = &text[line_start..line_end];

  writeln!(output, "{:>width$} |", "", width = gutter_width).unwrap();
  writeln!(
    output,
    "{} | {}",
    start_line + 1,
    line_text
  )
  .unwrap();

  // The underline only covers the portion of the span on its first line.
  let local_start = start - line_start;
  let local_end = end.clamp(start, line_end) - line_start;
  let start_col = char_column(line_text, local_start);
  let end_col = char_column(line_text, local_end);
  let underline_len = (end_col - start_col).max(1);
  let marker = if label.is_primary { '^' } else { '-' };

  let mut underline = String::new();
  write!(underline, "{:>width$} | ", "", width = gutter_width).unwrap();
  underline.push_str(&" ".repeat(start_col));
  underline.extend(std::iter::repeat(marker).take(underline_len));
  if !label.message.is_empty() {
    underline.push(' ');
    underline.push_str(&label.message);
  }
  output.push_str(&underline);
  output.push('\n');
}

fn clamp_range(text: &str, range: TextRange) -> (usize, usize) {
  let start = clamp_offset(text, range.start as usize);
  let end = clamp_offset(text, range.end as usize).max(start);
  (start, end)
}

fn clamp_offset(text: &str, offset: usize) -> usize {
  let mut offset = offset.min(text.len());
  while offset > 0 && !text.is_char_boundary(offset) {
    offset -= 1;
  }
  offset
}

fn char_column(line_text: &str, offset_in_line: usize) -> usize {
  line_text[..offset_in_line.min(line_text.len())].chars().count()
}

struct LineCache<'a> {
  text: &'a str,
  starts: Vec<usize>,
}

impl<'a> LineCache<'a> {
  fn new(text: &'a str) -> Self {
    let mut starts = vec![0];
    for (idx, ch) in text.char_indices() {
      if ch == '\n' {
        starts.push(idx + 1);
      }
    }
    Self { text, starts }
  }

  fn line_bounds(&self, line_idx: usize) -> (usize, usize) {
    let start = *self.starts.get(line_idx).unwrap_or(&self.text.len());
    let end = if line_idx + 1 < self.starts.len() {
      self.starts[line_idx + 1].saturating_sub(1)
    } else {
      self.text.len()
    };
    (start, end.max(start))
  }

  fn line_index_at_offset(&self, offset: usize) -> usize {
    let clamped = offset.min(self.text.len());
    match self.starts.binary_search(&clamped) {
      Ok(idx) => idx,
      Err(idx) => idx - 1,
    }
  }

  fn line_and_column(&self, offset: usize) -> (usize, usize) {
    let line_idx = self.line_index_at_offset(offset);
    let (line_start, line_end) = self.line_bounds(line_idx);
    let col = char_column(&self.text[line_start..line_end], offset - line_start);
    (line_idx + 1, col + 1)
  }
}
