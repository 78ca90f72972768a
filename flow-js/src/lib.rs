//! Semantic resolution and flow analysis over `syntax-js` trees.
//!
//! [`analyze_program`] runs the full pipeline: `scope-js` binding, the
//! [`resolve`] pass (symbols, types, constants, operator checks), and the
//! [`analyze`] pass (reachability and definite assignment). Diagnostics from
//! all three accumulate into one normalized list.

use analyze::FlowAnalyzer;
use codes::normalize_diagnostics;
use derive_visitor::DriveMut;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use resolve::Resolver;
use scope_js::bind_locals;
use scope_js::symbol::Scope;
use scope_js::BindOutcome;
pub use scope_js::TopLevelMode;
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;

pub mod analyze;
pub mod codes;
pub mod consts;
pub mod flow;
pub mod resolve;

/// The outcome of analyzing one program.
pub struct ProgramAnalysis {
  /// The program's root scope, for callers that inspect symbols afterwards.
  pub scope: Scope,
  /// All diagnostics, sorted and deduplicated into a stable order.
  pub diagnostics: Vec<Diagnostic>,
  /// True when some declaration hit an internal failure and was skipped; its
  /// diagnostics are incomplete but everything reported is still valid.
  pub degraded: bool,
}

impl ProgramAnalysis {
  pub fn has_errors(&self) -> bool {
    self
      .diagnostics
      .iter()
      .any(|d| d.severity == diagnostics::Severity::Error)
  }
}

/// Binds, resolves, and flow-analyzes a program.
pub fn analyze_program(
  top_level_node: &mut Node<TopLevel>,
  top_level_mode: TopLevelMode,
  file: FileId,
) -> ProgramAnalysis {
  let BindOutcome {
    scope,
    diagnostics: mut all,
  } = bind_locals(top_level_node, top_level_mode, file);

  let mut resolver = Resolver::new(file);
  top_level_node.drive_mut(&mut resolver);
  all.append(&mut resolver.diagnostics);

  let mut analyzer = FlowAnalyzer::new(file, scope.hoist_scope());
  analyzer.run_top_level(top_level_node);
  let degraded = analyzer.degraded;
  all.append(&mut analyzer.diagnostics);

  normalize_diagnostics(&mut all);
  ProgramAnalysis {
    scope,
    diagnostics: all,
    degraded,
  }
}
