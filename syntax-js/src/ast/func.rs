use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::Stmt;

// One common type for function declarations and function expressions, as one
// type is easier to match on and wrangle than many.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: Vec<Node<Stmt>>,
}
