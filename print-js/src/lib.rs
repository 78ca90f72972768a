//! Source printing for `syntax-js` trees.
//!
//! Renders any tree back to source text, inserting parentheses where
//! operator precedence demands them and the minimal whitespace the token
//! stream needs. Output feeds error messages and debugging; byte-identical
//! round trips are not a goal.

use emitter::EmitError;
use emitter::Emitter;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;

pub mod emitter;
mod js_expr;
mod js_stmt;
pub mod precedence;

pub use emitter::EmitMode;
pub use emitter::EmitOptions;

/// Prints a whole program.
pub fn print_top_level(top: &Node<TopLevel>, opts: EmitOptions) -> Result<String, EmitError> {
  let mut em = Emitter::new(opts);
  js_stmt::emit_top_level(&mut em, top);
  finish(em)
}

/// Prints a single statement, starting at indentation zero.
pub fn print_stmt(stmt: &Node<Stmt>, opts: EmitOptions) -> Result<String, EmitError> {
  let mut em = Emitter::new(opts);
  js_stmt::emit_stmt(&mut em, 0, stmt);
  finish(em)
}

/// Prints a single expression.
pub fn print_expr(expr: &Node<Expr>, opts: EmitOptions) -> Result<String, EmitError> {
  let mut em = Emitter::new(opts);
  js_expr::emit_expr(&mut em, 0, expr, precedence::Prec::LOWEST);
  finish(em)
}

fn finish(em: Emitter) -> Result<String, EmitError> {
  String::from_utf8(em.into_bytes()).map_err(|_| EmitError::non_utf8())
}
