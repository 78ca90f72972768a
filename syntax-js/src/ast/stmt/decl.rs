use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use crate::ast::{expr::Expr, func::Func, node::Node, type_expr::TypeExpr};

/// A binding name at a declaration site. Kept as its own node (not an
/// `IdExpr`) so that a declaration never looks like a variable usage, and so
/// binding can attach symbol data to it.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum VarDeclMode {
  Var,
  Let,
  Const,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  pub name: Node<IdPat>,
  pub type_annotation: Option<Node<TypeExpr>>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub mode: VarDeclMode,
  pub declarators: Vec<Node<VarDeclarator>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ParamDecl {
  pub name: Node<IdPat>,
  pub type_annotation: Option<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  pub name: Node<IdPat>,
  pub func: Node<Func>,
}
