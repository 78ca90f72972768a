//! Registry of diagnostic codes emitted by `flow-js`.
//!
//! Each [`Code`] documents the expected shape of diagnostics the analysis
//! emits: the short description, where the primary span should point, and any
//! notes that accompany the diagnostic.

use diagnostics::{sort_diagnostics, sort_labels, Diagnostic, Span};

/// Metadata describing a diagnostic code.
#[derive(Clone, Copy, Debug)]
pub struct Code {
  /// Stable string identifier, e.g. `FA0001`.
  pub id: &'static str,
  /// Short description of what the diagnostic reports.
  pub description: &'static str,
  /// Guidance for where the primary span should be anchored.
  pub primary_span: &'static str,
  /// Expected notes automatically added to the diagnostic.
  pub notes: &'static [&'static str],
}

impl Code {
  pub const fn new(
    id: &'static str,
    description: &'static str,
    primary_span: &'static str,
    notes: &'static [&'static str],
  ) -> Self {
    Code {
      id,
      description,
      primary_span,
      notes,
    }
  }

  /// Identifier as a plain string (useful for comparisons in tests).
  pub const fn as_str(&self) -> &'static str {
    self.id
  }

  /// Construct an error diagnostic tagged with this code and its expected
  /// notes.
  pub fn error(&self, message: impl Into<String>, primary: Span) -> Diagnostic {
    let mut diagnostic = Diagnostic::error(self.id, message, primary);
    for note in self.notes {
      diagnostic.push_note(*note);
    }
    diagnostic
  }

  /// Construct a warning diagnostic tagged with this code and its expected
  /// notes.
  pub fn warning(&self, message: impl Into<String>, primary: Span) -> Diagnostic {
    let mut diagnostic = Diagnostic::warning(self.id, message, primary);
    for note in self.notes {
      diagnostic.push_note(*note);
    }
    diagnostic
  }
}

/// Sort labels inside each diagnostic and then the diagnostics themselves to
/// keep outputs deterministic regardless of traversal order.
pub fn normalize_diagnostics(diagnostics: &mut Vec<Diagnostic>) {
  for diagnostic in diagnostics.iter_mut() {
    sort_labels(&mut diagnostic.labels);
    diagnostic.notes.sort();
  }
  sort_diagnostics(diagnostics);
}

/// FA0001: Statement can never be reached.
///
/// - Primary span: the first statement of the unreachable run; later
///   statements in the same run are not reported again.
pub const UNREACHABLE_CODE: Code = Code::new(
  "FA0001",
  "unreachable code",
  "first statement of the unreachable run",
  &[],
);

/// FA0002: A local is read on a path where it may not have been assigned.
///
/// - Primary span: the identifier being read.
pub const MAY_NOT_BE_INITIALIZED: Code = Code::new(
  "FA0002",
  "variable may not have been initialized",
  "the identifier being read",
  &[],
);

/// FA0003: A single-assignment local may already have been assigned on some
/// path. Driven by the potential-assignment lattice only; never a hard error.
pub const MAY_ALREADY_BE_ASSIGNED: Code = Code::new(
  "FA0003",
  "variable may already have been assigned",
  "the assignment target",
  &[],
);

/// FA0004: A break/continue names a label with no enclosing match, or appears
/// outside any breakable construct.
pub const UNDEFINED_LABEL: Code = Code::new(
  "FA0004",
  "undefined label",
  "the break or continue statement",
  &[],
);

/// FA0005: More than one `default` branch in a switch. The last default wins
/// for dispatch.
pub const DUPLICATE_DEFAULT: Code = Code::new(
  "FA0005",
  "duplicate default case",
  "the second default branch",
  &[],
);

/// FA0006: A case expression's constant is not compatible with the switch's
/// governing type. Sibling cases are still resolved.
pub const CASE_TYPE_MISMATCH: Code = Code::new(
  "FA0006",
  "case expression incompatible with switch expression type",
  "the offending case expression",
  &[],
);

/// FA0007: An operator applied to operand types it is not defined for.
pub const INVALID_OPERANDS: Code = Code::new(
  "FA0007",
  "invalid operand types for operator",
  "the whole operator expression",
  &[],
);

/// FA0008: A numeric literal whose raw text cannot be parsed.
pub const MALFORMED_NUMERIC_LITERAL: Code = Code::new(
  "FA0008",
  "malformed numeric literal",
  "the literal",
  &[],
);

/// FA0009: A name (variable or type) that resolves to nothing. Resolution
/// continues with the unknown type.
pub const UNRESOLVED_NAME: Code = Code::new(
  "FA0009",
  "unresolved name",
  "the identifier or type reference",
  &[],
);

/// FA0010: Assignment to a `const` local that is definitely already assigned,
/// or to a target that is not assignable at all.
pub const ASSIGNMENT_TO_CONSTANT: Code = Code::new(
  "FA0010",
  "assignment to constant",
  "the assignment target",
  &[],
);

/// FA0011: A label that is already in use by an enclosing labeled statement.
pub const DUPLICATE_LABEL: Code = Code::new(
  "FA0011",
  "duplicate label",
  "the inner labeled statement",
  &[],
);

/// FA0012: Redeclaration of a name in the same scope, or a declaration hiding
/// an outer one. Reported during binding (see `scope-js`).
pub const REDECLARATION: Code = Code::new(
  "FA0012",
  "redeclaration or hiding of a declaration",
  "the later declaration",
  &[],
);

/// FA0013: Analysis of one declaration hit an internal inconsistency and was
/// skipped; sibling declarations proceed.
pub const INTERNAL_ANALYSIS_FAILURE: Code = Code::new(
  "FA0013",
  "internal analysis failure; declaration skipped",
  "the degraded declaration",
  &[],
);
