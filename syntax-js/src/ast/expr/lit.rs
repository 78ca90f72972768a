use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use crate::ast::node::Node;

use super::Expr;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNullExpr {}

/// A numeric literal, kept as raw source text. Resolution parses it; a
/// malformed form is a resolution-time diagnostic, not a construction error.
///
/// `parenthesized` records whether the literal was wrapped in parentheses in
/// the source; `2147483648` may only fold as the negated minimum int value
/// when it was not.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub raw: String,
  #[drive(skip)]
  pub parenthesized: bool,
}

impl LitNumExpr {
  /// Whether this literal is the textual magnitude of the minimum 32-bit int,
  /// which only has a value when negated. Parenthesization breaks the direct
  /// negation context.
  pub fn may_represent_min_value(&self) -> bool {
    !self.parenthesized && self.raw == "2147483648"
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitRegexExpr {
  // Including delimiter slashes and any flags.
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitUndefinedExpr {}
