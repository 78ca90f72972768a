//! Statement printing.

use syntax_js::ast::expr::Expr;
use syntax_js::ast::func::Func;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::FuncDecl;
use syntax_js::ast::stmt::decl::VarDecl;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::CatchBlock;
use syntax_js::ast::stmt::ForInLhs;
use syntax_js::ast::stmt::IfStmt;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stmt::SwitchStmt;
use syntax_js::ast::stmt::TryStmt;
use syntax_js::ast::stx::TopLevel;

use crate::emitter::EmitMode;
use crate::emitter::Emitter;
use crate::js_expr::emit_expr;
use crate::js_expr::emit_type;
use crate::precedence::Prec;
use crate::precedence::ASSIGNMENT_PRECEDENCE;

pub(crate) fn emit_top_level(em: &mut Emitter, top: &Node<TopLevel>) {
  for (idx, stmt) in top.stx.body.iter().enumerate() {
    if idx > 0 {
      em.write_line_break(0);
    }
    emit_stmt(em, 0, stmt);
  }
  if em.mode() == EmitMode::Pretty && !top.stx.body.is_empty() {
    em.write_newline();
  }
}

/// Emits each statement on its own line at `depth`.
fn emit_stmts(em: &mut Emitter, depth: usize, stmts: &[Node<Stmt>]) {
  for stmt in stmts {
    em.write_line_break(depth);
    emit_stmt(em, depth, stmt);
  }
}

/// Emits a brace-delimited statement list.
fn emit_braces(em: &mut Emitter, depth: usize, body: &[Node<Stmt>]) {
  em.write_punct("{");
  if body.is_empty() {
    em.write_punct("}");
    return;
  }
  emit_stmts(em, depth + 1, body);
  em.write_line_break(depth);
  em.write_punct("}");
}

/// Emits the body of a control statement after its header: blocks open on
/// the same line, any other statement continues inline.
fn emit_attached(em: &mut Emitter, depth: usize, stmt: &Node<Stmt>) {
  match stmt.stx.as_ref() {
    Stmt::Empty(_) => em.write_semicolon(),
    _ => {
      em.write_pad();
      emit_stmt(em, depth, stmt);
    }
  }
}

pub(crate) fn emit_stmt(em: &mut Emitter, depth: usize, node: &Node<Stmt>) {
  match node.stx.as_ref() {
    Stmt::Block(block) => emit_braces(em, depth, &block.stx.body),
    Stmt::Break(brk) => {
      em.write_keyword("break");
      if let Some(label) = &brk.stx.label {
        em.write_identifier(label);
      }
      em.write_semicolon();
    }
    Stmt::Continue(cont) => {
      em.write_keyword("continue");
      if let Some(label) = &cont.stx.label {
        em.write_identifier(label);
      }
      em.write_semicolon();
    }
    Stmt::Debugger(_) => {
      em.write_keyword("debugger");
      em.write_semicolon();
    }
    Stmt::DoWhile(stmt) => {
      em.write_keyword("do");
      emit_attached(em, depth, &stmt.stx.body);
      em.write_pad();
      em.write_keyword("while");
      em.write_pad();
      em.write_punct("(");
      emit_expr(em, depth, &stmt.stx.condition, Prec::LOWEST);
      em.write_punct(")");
      em.write_semicolon();
    }
    Stmt::Empty(_) => em.write_semicolon(),
    Stmt::Expr(stmt) => {
      // A statement may not start with `function`; wrap the expression.
      if starts_with_func(&stmt.stx.expr) {
        em.write_punct("(");
        emit_expr(em, depth, &stmt.stx.expr, Prec::LOWEST);
        em.write_punct(")");
      } else {
        emit_expr(em, depth, &stmt.stx.expr, Prec::LOWEST);
      }
      em.write_semicolon();
    }
    Stmt::ForIn(stmt) => {
      em.write_keyword("for");
      em.write_pad();
      em.write_punct("(");
      match &stmt.stx.lhs {
        ForInLhs::Id(id) => em.write_identifier(&id.stx.name),
        ForInLhs::Decl(decl) => emit_var_decl(em, depth, decl),
      }
      em.write_keyword("in");
      emit_expr(em, depth, &stmt.stx.rhs, ASSIGNMENT_PRECEDENCE);
      em.write_punct(")");
      emit_attached(em, depth, &stmt.stx.body);
    }
    Stmt::If(stmt) => emit_if(em, depth, stmt),
    Stmt::Label(stmt) => {
      em.write_identifier(&stmt.stx.name);
      em.write_punct(":");
      emit_attached(em, depth, &stmt.stx.statement);
    }
    Stmt::Return(stmt) => {
      em.write_keyword("return");
      if let Some(value) = &stmt.stx.value {
        em.write_pad();
        emit_expr(em, depth, value, Prec::LOWEST);
      }
      em.write_semicolon();
    }
    Stmt::Switch(stmt) => emit_switch(em, depth, stmt),
    Stmt::Throw(stmt) => {
      em.write_keyword("throw");
      em.write_pad();
      emit_expr(em, depth, &stmt.stx.value, Prec::LOWEST);
      em.write_semicolon();
    }
    Stmt::Try(stmt) => emit_try(em, depth, stmt),
    Stmt::While(stmt) => {
      em.write_keyword("while");
      em.write_pad();
      em.write_punct("(");
      emit_expr(em, depth, &stmt.stx.condition, Prec::LOWEST);
      em.write_punct(")");
      emit_attached(em, depth, &stmt.stx.body);
    }
    Stmt::With(stmt) => {
      em.write_keyword("with");
      em.write_pad();
      em.write_punct("(");
      emit_expr(em, depth, &stmt.stx.object, Prec::LOWEST);
      em.write_punct(")");
      emit_attached(em, depth, &stmt.stx.body);
    }
    Stmt::FunctionDecl(decl) => emit_func_decl(em, depth, decl),
    Stmt::VarDecl(decl) => {
      emit_var_decl(em, depth, decl);
      em.write_semicolon();
    }
  }
}

fn emit_if(em: &mut Emitter, depth: usize, node: &Node<IfStmt>) {
  em.write_keyword("if");
  em.write_pad();
  em.write_punct("(");
  emit_expr(em, depth, &node.stx.test, Prec::LOWEST);
  em.write_punct(")");
  // A non-block consequent could capture this statement's `else`, so brace
  // it whenever an alternate follows.
  let force_braces =
    node.stx.alternate.is_some() && !matches!(node.stx.consequent.stx.as_ref(), Stmt::Block(_));
  if force_braces {
    em.write_pad();
    emit_braces(em, depth, std::slice::from_ref(&node.stx.consequent));
  } else {
    emit_attached(em, depth, &node.stx.consequent);
  }
  if let Some(alternate) = &node.stx.alternate {
    em.write_pad();
    em.write_keyword("else");
    emit_attached(em, depth, alternate);
  }
}

fn emit_switch(em: &mut Emitter, depth: usize, node: &Node<SwitchStmt>) {
  em.write_keyword("switch");
  em.write_pad();
  em.write_punct("(");
  emit_expr(em, depth, &node.stx.test, Prec::LOWEST);
  em.write_punct(")");
  em.write_pad();
  em.write_punct("{");
  for branch in &node.stx.branches {
    em.write_line_break(depth + 1);
    match &branch.stx.case {
      Some(case) => {
        em.write_keyword("case");
        em.write_pad();
        emit_expr(em, depth + 1, case, Prec::LOWEST);
        em.write_punct(":");
      }
      None => {
        em.write_keyword("default");
        em.write_punct(":");
      }
    }
    emit_stmts(em, depth + 2, &branch.stx.body);
  }
  em.write_line_break(depth);
  em.write_punct("}");
}

fn emit_try(em: &mut Emitter, depth: usize, node: &Node<TryStmt>) {
  em.write_keyword("try");
  em.write_pad();
  emit_braces(em, depth, &node.stx.wrapped);
  if let Some(catch) = &node.stx.catch {
    em.write_pad();
    em.write_keyword("catch");
    emit_catch_clause(em, catch);
    em.write_pad();
    emit_braces(em, depth, &catch.stx.body);
  }
  if let Some(finally) = &node.stx.finally {
    em.write_pad();
    em.write_keyword("finally");
    em.write_pad();
    emit_braces(em, depth, &finally.stx.body);
  }
}

fn emit_catch_clause(em: &mut Emitter, catch: &Node<CatchBlock>) {
  let Some(parameter) = &catch.stx.parameter else {
    return;
  };
  em.write_pad();
  em.write_punct("(");
  em.write_identifier(&parameter.stx.name);
  if let Some(exception_type) = &catch.stx.exception_type {
    em.write_punct(":");
    em.write_pad();
    emit_type(em, &exception_type.stx);
  }
  em.write_punct(")");
}

fn emit_func_decl(em: &mut Emitter, depth: usize, node: &Node<FuncDecl>) {
  em.write_keyword("function");
  em.write_identifier(&node.stx.name.stx.name);
  emit_func_tail(em, depth, &node.stx.func);
}

/// Emits a function's parameter list and body, shared by declarations and
/// function expressions.
pub(crate) fn emit_func_tail(em: &mut Emitter, depth: usize, func: &Node<Func>) {
  em.write_punct("(");
  em.write_list(
    &func.stx.parameters,
    |em| {
      em.write_comma();
      em.write_pad();
    },
    |em, parameter| {
      em.write_identifier(&parameter.stx.name.stx.name);
      if let Some(type_annotation) = &parameter.stx.type_annotation {
        em.write_punct(":");
        em.write_pad();
        emit_type(em, &type_annotation.stx);
      }
    },
  );
  em.write_punct(")");
  em.write_pad();
  emit_braces(em, depth, &func.stx.body);
}

fn emit_var_decl(em: &mut Emitter, depth: usize, node: &Node<VarDecl>) {
  let keyword = match node.stx.mode {
    VarDeclMode::Var => "var",
    VarDeclMode::Let => "let",
    VarDeclMode::Const => "const",
  };
  em.write_keyword(keyword);
  em.write_list(
    &node.stx.declarators,
    |em| {
      em.write_comma();
      em.write_pad();
    },
    |em, declarator| {
      em.write_identifier(&declarator.stx.name.stx.name);
      if let Some(type_annotation) = &declarator.stx.type_annotation {
        em.write_punct(":");
        em.write_pad();
        emit_type(em, &type_annotation.stx);
      }
      if let Some(initializer) = &declarator.stx.initializer {
        em.write_pad();
        em.write_punct("=");
        em.write_pad();
        emit_expr(em, depth, initializer, ASSIGNMENT_PRECEDENCE);
      }
    },
  );
}

/// Whether the expression's leftmost token would be `function`, which is not
/// allowed to start an expression statement.
fn starts_with_func(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Func(_) => true,
    Expr::Binary(binary) => starts_with_func(&binary.stx.left),
    Expr::Call(call) => starts_with_func(&call.stx.callee),
    Expr::Member(member) => starts_with_func(&member.stx.left),
    Expr::ComputedMember(member) => starts_with_func(&member.stx.object),
    Expr::Cond(cond) => starts_with_func(&cond.stx.test),
    Expr::UnaryPostfix(unary) => starts_with_func(&unary.stx.argument),
    _ => false,
  }
}
