//! Enter/exit traversal over the AST.
//!
//! `AstVisitor` hooks are called around each node; returning `false` from a
//! `visit_*` hook skips that node's children (its `end_visit_*` hook still
//! runs). The `walk_*` drivers own the traversal order: source order, depth
//! first, children between enter and exit.
//!
//! For structural passes that don't need the skip-children contract,
//! `derive_visitor`'s `Drive`/`DriveMut` (derived on every AST type) is the
//! lighter option.

use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::stmt::decl::{FuncDecl, VarDecl};
use crate::ast::stmt::{ForInLhs, Stmt};
use crate::ast::stx::TopLevel;

#[allow(unused_variables)]
pub trait AstVisitor {
  fn visit_top_level(&mut self, node: &Node<TopLevel>) -> bool {
    true
  }
  fn end_visit_top_level(&mut self, node: &Node<TopLevel>) {}

  fn visit_stmt(&mut self, node: &Node<Stmt>) -> bool {
    true
  }
  fn end_visit_stmt(&mut self, node: &Node<Stmt>) {}

  fn visit_expr(&mut self, node: &Node<Expr>) -> bool {
    true
  }
  fn end_visit_expr(&mut self, node: &Node<Expr>) {}

  fn visit_func(&mut self, node: &Node<Func>) -> bool {
    true
  }
  fn end_visit_func(&mut self, node: &Node<Func>) {}
}

pub fn walk_top_level<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Node<TopLevel>) {
  if visitor.visit_top_level(node) {
    for stmt in &node.stx.body {
      walk_stmt(visitor, stmt);
    }
  }
  visitor.end_visit_top_level(node);
}

pub fn walk_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Node<Stmt>) {
  if visitor.visit_stmt(node) {
    match node.stx.as_ref() {
      Stmt::Block(n) => {
        for stmt in &n.stx.body {
          walk_stmt(visitor, stmt);
        }
      }
      Stmt::Break(_) | Stmt::Continue(_) | Stmt::Debugger(_) | Stmt::Empty(_) => {}
      Stmt::DoWhile(n) => {
        walk_stmt(visitor, &n.stx.body);
        walk_expr(visitor, &n.stx.condition);
      }
      Stmt::Expr(n) => walk_expr(visitor, &n.stx.expr),
      Stmt::ForIn(n) => {
        if let ForInLhs::Decl(decl) = &n.stx.lhs {
          walk_var_decl(visitor, decl);
        }
        walk_expr(visitor, &n.stx.rhs);
        walk_stmt(visitor, &n.stx.body);
      }
      Stmt::If(n) => {
        walk_expr(visitor, &n.stx.test);
        walk_stmt(visitor, &n.stx.consequent);
        if let Some(alternate) = &n.stx.alternate {
          walk_stmt(visitor, alternate);
        }
      }
      Stmt::Label(n) => walk_stmt(visitor, &n.stx.statement),
      Stmt::Return(n) => {
        if let Some(value) = &n.stx.value {
          walk_expr(visitor, value);
        }
      }
      Stmt::Switch(n) => {
        walk_expr(visitor, &n.stx.test);
        for branch in &n.stx.branches {
          if let Some(case) = &branch.stx.case {
            walk_expr(visitor, case);
          }
          for stmt in &branch.stx.body {
            walk_stmt(visitor, stmt);
          }
        }
      }
      Stmt::Throw(n) => walk_expr(visitor, &n.stx.value),
      Stmt::Try(n) => {
        for stmt in &n.stx.wrapped {
          walk_stmt(visitor, stmt);
        }
        if let Some(catch) = &n.stx.catch {
          for stmt in &catch.stx.body {
            walk_stmt(visitor, stmt);
          }
        }
        if let Some(finally) = &n.stx.finally {
          for stmt in &finally.stx.body {
            walk_stmt(visitor, stmt);
          }
        }
      }
      Stmt::While(n) => {
        walk_expr(visitor, &n.stx.condition);
        walk_stmt(visitor, &n.stx.body);
      }
      Stmt::With(n) => {
        walk_expr(visitor, &n.stx.object);
        walk_stmt(visitor, &n.stx.body);
      }
      Stmt::FunctionDecl(n) => walk_func_decl(visitor, n),
      Stmt::VarDecl(n) => walk_var_decl(visitor, n),
    }
  }
  visitor.end_visit_stmt(node);
}

pub fn walk_expr<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Node<Expr>) {
  if visitor.visit_expr(node) {
    match node.stx.as_ref() {
      Expr::ArrAlloc(n) => {
        for dim in n.stx.dims.iter().flatten() {
          walk_expr(visitor, dim);
        }
        if let Some(init) = &n.stx.initializer {
          for element in &init.stx.elements {
            walk_expr(visitor, element);
          }
        }
      }
      Expr::Binary(n) => {
        walk_expr(visitor, &n.stx.left);
        walk_expr(visitor, &n.stx.right);
      }
      Expr::Call(n) => {
        walk_expr(visitor, &n.stx.callee);
        for arg in &n.stx.arguments {
          walk_expr(visitor, arg);
        }
      }
      Expr::ComputedMember(n) => {
        walk_expr(visitor, &n.stx.object);
        walk_expr(visitor, &n.stx.member);
      }
      Expr::Cond(n) => {
        walk_expr(visitor, &n.stx.test);
        walk_expr(visitor, &n.stx.consequent);
        walk_expr(visitor, &n.stx.alternate);
      }
      Expr::Func(n) => walk_func(visitor, &n.stx.func),
      Expr::Id(_) => {}
      Expr::Member(n) => walk_expr(visitor, &n.stx.left),
      Expr::Unary(n) => walk_expr(visitor, &n.stx.argument),
      Expr::UnaryPostfix(n) => walk_expr(visitor, &n.stx.argument),
      Expr::LitArr(n) => {
        for element in &n.stx.elements {
          walk_expr(visitor, element);
        }
      }
      Expr::LitBool(_)
      | Expr::LitNull(_)
      | Expr::LitNum(_)
      | Expr::LitRegex(_)
      | Expr::LitStr(_)
      | Expr::LitUndefined(_) => {}
    }
  }
  visitor.end_visit_expr(node);
}

pub fn walk_func<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Node<Func>) {
  if visitor.visit_func(node) {
    for stmt in &node.stx.body {
      walk_stmt(visitor, stmt);
    }
  }
  visitor.end_visit_func(node);
}

fn walk_func_decl<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Node<FuncDecl>) {
  walk_func(visitor, &node.stx.func);
}

fn walk_var_decl<V: AstVisitor + ?Sized>(visitor: &mut V, node: &Node<VarDecl>) {
  for declarator in &node.stx.declarators {
    if let Some(init) = &declarator.stx.initializer {
      walk_expr(visitor, init);
    }
  }
}
