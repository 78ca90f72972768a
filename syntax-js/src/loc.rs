use diagnostics::FileId;
use diagnostics::Span;
use diagnostics::TextRange;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A location within the current source file expressed as UTF-8 byte offsets.
///
/// A location is best-effort: programmatically built nodes may carry `Loc(0,
/// 0)` or an approximate range copied from a nearby node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }

  /// Converts this location into a `diagnostics::TextRange`, clamping each
  /// offset to `u32::MAX`.
  pub fn as_range(&self) -> TextRange {
    TextRange::new(clamp_to_u32(self.0), clamp_to_u32(self.1))
  }

  /// Converts this location into a `diagnostics::Span` tied to the given file.
  pub fn span(&self, file: FileId) -> Span {
    Span::new(file, self.as_range())
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

fn clamp_to_u32(value: usize) -> u32 {
  value.try_into().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extend_covers_both_ranges() {
    let mut loc = Loc(4, 10);
    loc.extend(Loc(2, 6));
    assert_eq!(loc, Loc(2, 10));
    assert_eq!(Loc(1, 2) + Loc(5, 6), Loc(1, 6));
  }

  #[test]
  fn span_clamps_on_overflow() {
    let span = Loc(usize::MAX, usize::MAX).span(FileId(3));
    assert_eq!(span.file, FileId(3));
    assert_eq!(span.range, TextRange::new(u32::MAX, u32::MAX));
  }
}
