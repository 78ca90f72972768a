use derive_visitor::DriveMut;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use symbol::Scope;
use symbol::ScopeType;
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;
use visitor::DeclVisitor;

pub mod symbol;
pub mod types;
pub mod visitor;

/// Code shared with the analysis registry; declarations are bound before
/// analysis runs, so this crate reports it directly.
pub const CODE_REDECLARATION: &str = "FA0012";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TopLevelMode {
  Global,
  Module,
}

pub struct BindOutcome {
  pub scope: Scope,
  pub diagnostics: Vec<Diagnostic>,
}

/// Builds the scope tree for a program: creates scopes, declares symbols,
/// allocates local slots, and attaches `Scope`/`Symbol` assoc data to every
/// identifier node for later passes to read.
pub fn bind_locals(
  top_level_node: &mut Node<TopLevel>,
  top_level_mode: TopLevelMode,
  file: FileId,
) -> BindOutcome {
  let top_level_scope = Scope::new_root(match top_level_mode {
    TopLevelMode::Global => ScopeType::Global,
    TopLevelMode::Module => ScopeType::Module,
  });
  let mut visitor = DeclVisitor::new(top_level_scope.clone(), file);
  top_level_node.drive_mut(&mut visitor);
  BindOutcome {
    scope: top_level_scope,
    diagnostics: visitor.diagnostics,
  }
}
