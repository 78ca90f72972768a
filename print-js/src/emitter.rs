//! Boundary-aware output buffer used by the printers.
//!
//! The core contract: when callers emit token-like fragments (keywords,
//! identifiers, numbers, punctuation), the [`Emitter`] automatically inserts
//! the minimal whitespace required to stop the concatenation from lexing as
//! a different token (`returnx`, or `a - -b` collapsing to `a--b`). Prefer
//! the typed helpers like [`Emitter::write_keyword`],
//! [`Emitter::write_identifier`], and [`Emitter::write_punct`] so fragments
//! get classified; reserve [`Emitter::write_str`] for a single lexical token
//! or whitespace-only text.

use syntax_js::loc::Loc;

/// Controls how the emitter lays out output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitMode {
  /// One line; spaces appear only where the token stream demands them.
  Compact,
  /// Newlines, two-space indentation, and spacing around operators.
  Pretty,
}

/// Options for configuring output.
#[derive(Clone, Copy, Debug)]
pub struct EmitOptions {
  pub mode: EmitMode,
}

impl Default for EmitOptions {
  fn default() -> Self {
    EmitOptions {
      mode: EmitMode::Pretty,
    }
  }
}

#[derive(Debug)]
pub enum EmitErrorKind {
  /// The output buffer was not valid UTF-8. The typed writers only accept
  /// `&str`, so this can only arise through raw byte writes.
  NonUtf8,
}

#[derive(Debug)]
pub struct EmitError {
  pub kind: EmitErrorKind,
  pub loc: Option<Loc>,
}

impl EmitError {
  pub(crate) fn non_utf8() -> Self {
    Self {
      kind: EmitErrorKind::NonUtf8,
      loc: None,
    }
  }
}

#[derive(Debug, Clone)]
pub struct Emitter {
  out: Vec<u8>,
  opts: EmitOptions,
  trailing: Boundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
  None,
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leading {
  None,
  Word,
  Number,
  Plus,
  Minus,
  Slash,
  Star,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Other,
}

#[derive(Debug, Clone, Copy)]
struct FragmentBoundary {
  leading: Leading,
  trailing: Boundary,
}

impl Emitter {
  pub fn new(opts: EmitOptions) -> Self {
    Emitter {
      out: Vec::new(),
      opts,
      trailing: Boundary::None,
    }
  }

  /// Returns the configured emit mode.
  pub fn mode(&self) -> EmitMode {
    self.opts.mode
  }

  /// Returns a read-only view of the buffer.
  pub fn as_bytes(&self) -> &[u8] {
    &self.out
  }

  /// Consumes the emitter, returning the underlying buffer.
  pub fn into_bytes(self) -> Vec<u8> {
    self.out
  }

  /// Writes a single byte, updating boundary tracking.
  pub fn write_byte(&mut self, byte: u8) {
    let boundary = classify_byte(byte);
    self.insert_boundary(boundary.leading);
    self.out.push(byte);
    self.trailing = boundary.trailing;
  }

  /// Writes an arbitrary string fragment, automatically inserting a space if
  /// it would otherwise merge with the previous token. Only for single-token
  /// fragments or whitespace-only text.
  pub fn write_str(&mut self, text: &str) {
    if text.is_empty() {
      return;
    }
    let boundaries = classify_fragment(text.as_bytes());
    self.insert_boundary(boundaries.leading);
    self.out.extend_from_slice(text.as_bytes());
    self.trailing = boundaries.trailing;
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.write_with_kind(keyword, TokenKind::Word);
  }

  /// Emits an identifier.
  pub fn write_identifier(&mut self, identifier: &str) {
    self.write_with_kind(identifier, TokenKind::Word);
  }

  /// Emits a numeric literal.
  pub fn write_number(&mut self, number: &str) {
    self.write_with_kind(number, TokenKind::Number);
  }

  /// Emits punctuation or operators.
  pub fn write_punct(&mut self, punct: &str) {
    let kind = match punct {
      "+" => TokenKind::Plus,
      "++" => TokenKind::PlusPlus,
      "-" => TokenKind::Minus,
      "--" => TokenKind::MinusMinus,
      _ => TokenKind::Other,
    };
    self.write_with_kind(punct, kind);
  }

  pub fn write_space(&mut self) {
    self.out.push(b' ');
    self.trailing = Boundary::None;
  }

  /// Emits a newline and clears boundary tracking.
  pub fn write_newline(&mut self) {
    self.out.push(b'\n');
    self.trailing = Boundary::None;
  }

  /// Emits a comma, respecting token boundaries.
  pub fn write_comma(&mut self) {
    self.write_punct(",");
  }

  /// Emits a semicolon, respecting token boundaries.
  pub fn write_semicolon(&mut self) {
    self.write_punct(";");
  }

  /// A single space in pretty mode; compact output relies on boundary
  /// insertion alone.
  pub fn write_pad(&mut self) {
    if self.opts.mode == EmitMode::Pretty {
      self.write_space();
    }
  }

  /// Starts a fresh line indented to `depth` in pretty mode; no-op in
  /// compact mode.
  pub fn write_line_break(&mut self, depth: usize) {
    if self.opts.mode == EmitMode::Pretty {
      self.write_newline();
      for _ in 0..depth {
        self.out.extend_from_slice(b"  ");
      }
    }
  }

  /// Emits `items` with `write_sep` between consecutive elements.
  pub fn write_list<T>(
    &mut self,
    items: &[T],
    mut write_sep: impl FnMut(&mut Self),
    mut write_item: impl FnMut(&mut Self, &T),
  ) {
    for (idx, item) in items.iter().enumerate() {
      if idx > 0 {
        write_sep(self);
      }
      write_item(self, item);
    }
  }

  fn write_with_kind(&mut self, text: &str, kind: TokenKind) {
    if text.is_empty() {
      return;
    }
    let boundaries = classify_fragment_with_kind(text.as_bytes(), kind);
    self.insert_boundary(boundaries.leading);
    self.out.extend_from_slice(text.as_bytes());
    self.trailing = boundaries.trailing;
  }

  fn insert_boundary(&mut self, next: Leading) {
    if next == Leading::None {
      return;
    }
    if needs_space(self.trailing, next) {
      self.out.push(b' ');
      self.trailing = Boundary::None;
    }
  }
}

impl Default for Emitter {
  fn default() -> Self {
    Emitter::new(EmitOptions::default())
  }
}

fn needs_space(prev: Boundary, next: Leading) -> bool {
  match (prev, next) {
    (Boundary::Word, Leading::Word)
    | (Boundary::Word, Leading::Number)
    | (Boundary::Number, Leading::Word)
    | (Boundary::Number, Leading::Number) => true,
    (Boundary::Plus, Leading::Plus)
    | (Boundary::PlusPlus, Leading::Plus)
    | (Boundary::Minus, Leading::Minus)
    | (Boundary::MinusMinus, Leading::Minus)
    | (Boundary::Slash, Leading::Slash)
    | (Boundary::Slash, Leading::Star) => true,
    _ => false,
  }
}

fn classify_fragment(bytes: &[u8]) -> FragmentBoundary {
  let Some((leading_idx, &leading_char)) = bytes
    .iter()
    .enumerate()
    .find(|(_, b)| !b.is_ascii_whitespace())
  else {
    return FragmentBoundary {
      leading: Leading::None,
      trailing: Boundary::None,
    };
  };

  let leading = if leading_idx == 0 {
    classify_leading_char(leading_char)
  } else {
    Leading::None
  };

  let Some((trailing_idx, _)) = bytes
    .iter()
    .enumerate()
    .rev()
    .find(|(_, b)| !b.is_ascii_whitespace())
  else {
    return FragmentBoundary {
      leading,
      trailing: Boundary::None,
    };
  };

  let trailing = if trailing_idx + 1 == bytes.len() {
    classify_trailing_char(bytes, trailing_idx)
  } else {
    Boundary::None
  };

  FragmentBoundary { leading, trailing }
}

fn classify_fragment_with_kind(bytes: &[u8], kind: TokenKind) -> FragmentBoundary {
  let Some((leading_idx, _)) = bytes
    .iter()
    .enumerate()
    .find(|(_, b)| !b.is_ascii_whitespace())
  else {
    return FragmentBoundary {
      leading: Leading::None,
      trailing: Boundary::None,
    };
  };

  let leading = if leading_idx == 0 {
    match kind {
      TokenKind::Other => match bytes[leading_idx] {
        b'/' => Leading::Slash,
        b'*' => Leading::Star,
        _ => Leading::Other,
      },
      _ => kind.leading(),
    }
  } else {
    Leading::None
  };

  let Some((trailing_idx, _)) = bytes
    .iter()
    .enumerate()
    .rev()
    .find(|(_, b)| !b.is_ascii_whitespace())
  else {
    return FragmentBoundary {
      leading,
      trailing: Boundary::None,
    };
  };

  let trailing = if trailing_idx + 1 == bytes.len() {
    kind.trailing(bytes, trailing_idx)
  } else {
    Boundary::None
  };

  FragmentBoundary { leading, trailing }
}

fn classify_byte(byte: u8) -> FragmentBoundary {
  if byte.is_ascii_whitespace() {
    return FragmentBoundary {
      leading: Leading::None,
      trailing: Boundary::None,
    };
  }
  let leading = classify_leading_char(byte);
  let trailing = classify_trailing_char(&[byte], 0);
  FragmentBoundary { leading, trailing }
}

fn classify_leading_char(ch: u8) -> Leading {
  match ch {
    b'0'..=b'9' => Leading::Number,
    b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => Leading::Word,
    b'+' => Leading::Plus,
    b'-' => Leading::Minus,
    b'/' => Leading::Slash,
    b'*' => Leading::Star,
    _ => Leading::Other,
  }
}

fn classify_trailing_char(bytes: &[u8], idx: usize) -> Boundary {
  let ch = bytes[idx];
  match ch {
    b'0'..=b'9' => Boundary::Number,
    b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => Boundary::Word,
    b'+' => {
      if idx >= 1 && bytes[idx - 1] == b'+' {
        Boundary::PlusPlus
      } else {
        Boundary::Plus
      }
    }
    b'-' => {
      if idx >= 1 && bytes[idx - 1] == b'-' {
        Boundary::MinusMinus
      } else {
        Boundary::Minus
      }
    }
    b'/' => Boundary::Slash,
    _ => Boundary::None,
  }
}

impl TokenKind {
  fn leading(self) -> Leading {
    match self {
      TokenKind::Word => Leading::Word,
      TokenKind::Number => Leading::Number,
      TokenKind::Plus | TokenKind::PlusPlus => Leading::Plus,
      TokenKind::Minus | TokenKind::MinusMinus => Leading::Minus,
      TokenKind::Other => Leading::Other,
    }
  }

  fn trailing(self, bytes: &[u8], trailing_idx: usize) -> Boundary {
    match self {
      TokenKind::PlusPlus => Boundary::PlusPlus,
      TokenKind::MinusMinus => Boundary::MinusMinus,
      TokenKind::Plus => Boundary::Plus,
      TokenKind::Minus => Boundary::Minus,
      TokenKind::Word => Boundary::Word,
      TokenKind::Number => Boundary::Number,
      TokenKind::Other => classify_trailing_char(bytes, trailing_idx),
    }
  }
}
