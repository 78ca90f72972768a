use crate::symbol::DeclKind;
use crate::symbol::Declared;
use crate::symbol::Scope;
use crate::symbol::ScopeType;
use crate::CODE_REDECLARATION;
use derive_visitor::VisitorMut;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use diagnostics::Label;
use syntax_js::ast::func::Func;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::FuncDecl;
use syntax_js::ast::stmt::decl::IdPat;
use syntax_js::ast::stmt::decl::ParamDecl;
use syntax_js::ast::stmt::decl::VarDecl;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::BlockStmt;
use syntax_js::ast::stmt::CatchBlock;
use syntax_js::ast::stmt::ForInStmt;
use syntax_js::ast::stmt::WithStmt;
use syntax_js::ast::expr::IdExpr;

type BlockStmtNode = Node<BlockStmt>;
type CatchBlockNode = Node<CatchBlock>;
type ForInStmtNode = Node<ForInStmt>;
type FuncDeclNode = Node<FuncDecl>;
type FuncNode = Node<Func>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type ParamDeclNode = Node<ParamDecl>;
type VarDeclNode = Node<VarDecl>;
type WithStmtNode = Node<WithStmt>;

/// Creates scopes, declares symbols, and attaches `Scope`/`Symbol` assoc data
/// to every identifier node. Declaration diagnostics (redeclaration, hiding)
/// accumulate on the visitor.
#[derive(VisitorMut)]
#[visitor(
  BlockStmtNode,
  CatchBlockNode,
  ForInStmtNode,
  FuncDeclNode,
  FuncNode,
  IdExprNode(enter),
  IdPatNode(enter),
  ParamDeclNode,
  VarDeclNode,
  WithStmtNode
)]
pub struct DeclVisitor {
  file: FileId,
  scope_stack: Vec<Scope>,
  decl_kind_stack: Vec<DeclKind>,
  pub diagnostics: Vec<Diagnostic>,
}

impl DeclVisitor {
  pub fn new(top_scope: Scope, file: FileId) -> Self {
    Self {
      file,
      scope_stack: vec![top_scope],
      decl_kind_stack: Vec::new(),
      diagnostics: Vec::new(),
    }
  }

  fn scope(&self) -> &Scope {
    self.scope_stack.last().unwrap()
  }

  fn push_scope(&mut self, typ: ScopeType) {
    let child = self.scope().create_child(typ);
    self.scope_stack.push(child);
  }

  fn pop_scope(&mut self) {
    self.scope_stack.pop();
  }

  fn enter_block_stmt_node(&mut self, _node: &mut BlockStmtNode) {
    self.push_scope(ScopeType::Block);
  }

  fn exit_block_stmt_node(&mut self, _node: &mut BlockStmtNode) {
    self.pop_scope();
  }

  fn enter_catch_block_node(&mut self, _node: &mut CatchBlockNode) {
    // The catch parameter scopes with the body, so the scope opens before it.
    self.push_scope(ScopeType::Block);
    self.decl_kind_stack.push(DeclKind::Param);
  }

  fn exit_catch_block_node(&mut self, _node: &mut CatchBlockNode) {
    self.decl_kind_stack.pop();
    self.pop_scope();
  }

  fn enter_for_in_stmt_node(&mut self, _node: &mut ForInStmtNode) {
    // A let/const loop variable scopes to the loop, not the surrounding block.
    self.push_scope(ScopeType::Block);
  }

  fn exit_for_in_stmt_node(&mut self, _node: &mut ForInStmtNode) {
    self.pop_scope();
  }

  fn enter_func_decl_node(&mut self, _node: &mut FuncDeclNode) {
    self.decl_kind_stack.push(DeclKind::Function);
  }

  fn exit_func_decl_node(&mut self, _node: &mut FuncDeclNode) {
    self.decl_kind_stack.pop();
  }

  fn enter_func_node(&mut self, node: &mut FuncNode) {
    self.push_scope(ScopeType::Closure);
    node.assoc.set(self.scope().clone());
  }

  fn exit_func_node(&mut self, _node: &mut FuncNode) {
    self.pop_scope();
  }

  fn enter_param_decl_node(&mut self, _node: &mut ParamDeclNode) {
    self.decl_kind_stack.push(DeclKind::Param);
  }

  fn exit_param_decl_node(&mut self, _node: &mut ParamDeclNode) {
    self.decl_kind_stack.pop();
  }

  fn enter_var_decl_node(&mut self, node: &mut VarDeclNode) {
    self.decl_kind_stack.push(match node.stx.mode {
      VarDeclMode::Var => DeclKind::Var,
      VarDeclMode::Let => DeclKind::Let,
      VarDeclMode::Const => DeclKind::Const,
    });
  }

  fn exit_var_decl_node(&mut self, _node: &mut VarDeclNode) {
    self.decl_kind_stack.pop();
  }

  fn enter_with_stmt_node(&mut self, _node: &mut WithStmtNode) {
    self.push_scope(ScopeType::With);
  }

  fn exit_with_stmt_node(&mut self, _node: &mut WithStmtNode) {
    self.pop_scope();
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    node.assoc.set(self.scope().clone());
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    // A function declaration's name lands in the enclosing scope; by the time
    // we see its IdPat we are still outside the Func node's closure scope.
    let kind = self.decl_kind_stack.last().copied().unwrap_or(DeclKind::Var);
    let scope = self.scope().clone();
    let name = node.stx.name.clone();
    match scope.declare(&name, kind, node.loc) {
      Declared::New(symbol) => {
        // Shadowing an outer declaration is legal but suspect. Search from the
        // parent of the scope the name actually landed in.
        let target = if kind.hoists() {
          scope.hoist_scope()
        } else {
          scope.clone()
        };
        let parent = target.data().parent().cloned();
        let above = parent.and_then(|p| p.find_symbol_up_to_with_scope(&name, |_| false));
        if let Some((_, hidden)) = above {
          let hidden_loc = scope.symbol_data(hidden).decl_loc;
          self.diagnostics.push(
            Diagnostic::warning(
              CODE_REDECLARATION,
              format!("declaration of {} hides an earlier declaration", name),
              node.loc.span(self.file),
            )
            .with_label(Label::secondary(
              hidden_loc.span(self.file),
              "earlier declaration is here",
            )),
          );
        }
        node.assoc.set(symbol);
      }
      Declared::Existing(symbol) => {
        let existing_kind = scope.symbol_data(symbol).kind;
        let benign = kind.hoists() && existing_kind.hoists();
        if !benign {
          let existing_loc = scope.symbol_data(symbol).decl_loc;
          self.diagnostics.push(
            Diagnostic::error(
              CODE_REDECLARATION,
              format!("{} has already been declared", name),
              node.loc.span(self.file),
            )
            .with_label(Label::secondary(
              existing_loc.span(self.file),
              "first declared here",
            )),
          );
        }
        node.assoc.set(symbol);
      }
    }
    node.assoc.set(scope);
  }
}
