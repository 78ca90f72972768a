use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// A type annotation: a (possibly dotted) name plus zero or more array
/// suffixes. `Number[][]` is `{ name: ["Number"], array_dims: 2 }`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeExpr {
  #[drive(skip)]
  pub name: Vec<String>,
  #[drive(skip)]
  pub array_dims: usize,
}

impl TypeExpr {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: vec![name.into()],
      array_dims: 0,
    }
  }

  pub fn array_of(name: impl Into<String>, array_dims: usize) -> Self {
    Self {
      name: vec![name.into()],
      array_dims,
    }
  }

  pub fn dotted_name(&self) -> String {
    self.name.join(".")
  }
}
