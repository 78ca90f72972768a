use diagnostics::FileId;
use diagnostics::Severity;
use scope_js::bind_locals;
use scope_js::symbol::DeclKind;
use scope_js::symbol::Scope;
use scope_js::symbol::ScopeType;
use scope_js::symbol::Symbol;
use scope_js::TopLevelMode;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::build;

fn bind(top: &mut Node<TopLevel>) -> scope_js::BindOutcome {
  bind_locals(top, TopLevelMode::Global, FileId(0))
}

fn func_scope(top: &Node<TopLevel>, index: usize) -> Scope {
  match top.body_stmt(index) {
    Stmt::FunctionDecl(decl) => decl.stx.func.assoc.get::<Scope>().unwrap().clone(),
    _ => panic!("expected function declaration"),
  }
}

trait TopLevelExt {
  fn body_stmt(&self, index: usize) -> &Stmt;
}

impl TopLevelExt for Node<TopLevel> {
  fn body_stmt(&self, index: usize) -> &Stmt {
    &self.stx.body[index].stx
  }
}

#[test]
fn declares_locals_with_dense_slots() {
  let mut top = build::top_level(vec![build::func_decl("f", vec!["a"], vec![
    build::let_decl("b", None),
    build::let_decl("c", Some(build::id("a"))),
  ])]);
  let outcome = bind(&mut top);
  assert!(outcome.diagnostics.is_empty());

  let f = func_scope(&top, 0);
  let a = f.find_symbol("a").unwrap();
  let b = f.find_symbol("b").unwrap();
  let c = f.find_symbol("c").unwrap();
  assert_eq!(f.symbol_data(a).slot, 0);
  assert_eq!(f.symbol_data(b).slot, 1);
  assert_eq!(f.symbol_data(c).slot, 2);
  assert_eq!(f.symbol_data(a).kind, DeclKind::Param);
  assert_eq!(f.local_count(), 3);
}

#[test]
fn attaches_scope_to_identifier_usages() {
  let mut top = build::top_level(vec![
    build::let_decl("x", None),
    build::expr_stmt(build::id("x")),
  ]);
  let outcome = bind(&mut top);
  let Stmt::Expr(expr_stmt) = top.body_stmt(1) else {
    panic!("expected expression statement");
  };
  let Expr::Id(id) = expr_stmt.stx.expr.stx.as_ref() else {
    panic!("expected identifier");
  };
  let usage_scope = id.assoc.get::<Scope>().unwrap();
  let found = usage_scope.find_symbol("x").unwrap();
  assert_eq!(outcome.scope.find_symbol("x"), Some(found));
}

#[test]
fn var_hoists_out_of_blocks_but_let_does_not() {
  let mut top = build::top_level(vec![build::func_decl("f", vec![], vec![build::block(vec![
    build::var_decl_stmt(
      syntax_js::ast::stmt::decl::VarDeclMode::Var,
      vec![build::declarator("v", None, None)],
    ),
    build::let_decl("l", None),
  ])])]);
  let outcome = bind(&mut top);
  assert!(outcome.diagnostics.is_empty());

  let f = func_scope(&top, 0);
  assert_eq!(f.data().typ(), ScopeType::Closure);
  assert!(f.data().get_symbol("v").is_some());
  // The let lives in the block child, not the closure scope itself.
  assert!(f.data().get_symbol("l").is_none());
  assert!(f.find_symbol("l").is_none());
  let block = f.data().children()[0].clone();
  assert!(block.data().get_symbol("l").is_some());
}

#[test]
fn duplicate_let_is_an_error() {
  let mut top = build::top_level(vec![
    build::let_decl("x", None),
    build::let_decl("x", None),
  ]);
  let outcome = bind(&mut top);
  assert_eq!(outcome.diagnostics.len(), 1);
  let diag = &outcome.diagnostics[0];
  assert_eq!(diag.code, "FA0012");
  assert_eq!(diag.severity, Severity::Error);
}

#[test]
fn duplicate_var_is_benign() {
  let mut top = build::top_level(vec![
    build::var_decl_stmt(
      syntax_js::ast::stmt::decl::VarDeclMode::Var,
      vec![build::declarator("x", None, None)],
    ),
    build::var_decl_stmt(
      syntax_js::ast::stmt::decl::VarDeclMode::Var,
      vec![build::declarator("x", None, None)],
    ),
  ]);
  let outcome = bind(&mut top);
  assert!(outcome.diagnostics.is_empty());
}

#[test]
fn shadowing_warns_but_creates_distinct_symbols() {
  let mut top = build::top_level(vec![
    build::let_decl("x", None),
    build::func_decl("f", vec![], vec![build::let_decl("x", None)]),
  ]);
  let outcome = bind(&mut top);
  assert_eq!(outcome.diagnostics.len(), 1);
  assert_eq!(outcome.diagnostics[0].code, "FA0012");
  assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);

  let outer: Symbol = outcome.scope.find_symbol("x").unwrap();
  let f = func_scope(&top, 1);
  let inner = f.find_symbol("x").unwrap();
  assert_ne!(outer, inner);
}

#[test]
fn catch_parameter_scopes_to_the_catch_body() {
  let mut top = build::top_level(vec![build::try_stmt(
    vec![build::empty()],
    Some(build::catch_block(Some("e"), vec![build::expr_stmt(
      build::id("e"),
    )])),
    None,
  )]);
  let outcome = bind(&mut top);
  assert!(outcome.diagnostics.is_empty());
  assert!(outcome.scope.find_symbol("e").is_none());
  let catch_scope = outcome.scope.data().children()[0].clone();
  assert!(catch_scope.data().get_symbol("e").is_some());
}
