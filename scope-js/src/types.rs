use serde::Serialize;

/// The closed set of types annotations can resolve to. `Any` is the fault-
/// tolerance fallback: every failed lookup degrades to it so analysis can
/// continue.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum TypeBinding {
  Any,
  Undefined,
  Null,
  Boolean,
  Number,
  String,
  Object,
  Array(Box<TypeBinding>),
  Function,
  Named(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeNotFound {
  pub name: String,
}

impl TypeBinding {
  /// Resolves an annotation name to a binding. Unknown names are an error;
  /// callers degrade to `Any` after reporting.
  pub fn resolve(name: &str, array_dims: usize) -> Result<TypeBinding, TypeNotFound> {
    let base = match name {
      "Any" | "any" => TypeBinding::Any,
      "Undefined" | "undefined" => TypeBinding::Undefined,
      "Null" | "null" => TypeBinding::Null,
      "Boolean" | "boolean" => TypeBinding::Boolean,
      "Number" | "number" => TypeBinding::Number,
      "String" | "string" => TypeBinding::String,
      "Object" | "object" => TypeBinding::Object,
      "Array" => TypeBinding::Array(Box::new(TypeBinding::Any)),
      "Function" => TypeBinding::Function,
      _ => return Err(TypeNotFound { name: name.to_string() }),
    };
    Ok(Self::wrap_array(base, array_dims))
  }

  fn wrap_array(base: TypeBinding, dims: usize) -> TypeBinding {
    let mut t = base;
    for _ in 0..dims {
      t = TypeBinding::Array(Box::new(t));
    }
    t
  }

  pub fn is_any(&self) -> bool {
    matches!(self, TypeBinding::Any)
  }

  pub fn is_numeric(&self) -> bool {
    matches!(self, TypeBinding::Number)
  }

  /// Display name for messages.
  pub fn name(&self) -> String {
    match self {
      TypeBinding::Any => "Any".to_string(),
      TypeBinding::Undefined => "Undefined".to_string(),
      TypeBinding::Null => "Null".to_string(),
      TypeBinding::Boolean => "Boolean".to_string(),
      TypeBinding::Number => "Number".to_string(),
      TypeBinding::String => "String".to_string(),
      TypeBinding::Object => "Object".to_string(),
      TypeBinding::Array(elem) => format!("{}[]", elem.name()),
      TypeBinding::Function => "Function".to_string(),
      TypeBinding::Named(name) => name.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_builtins_and_array_suffixes() {
    assert_eq!(TypeBinding::resolve("Number", 0), Ok(TypeBinding::Number));
    assert_eq!(
      TypeBinding::resolve("String", 2),
      Ok(TypeBinding::Array(Box::new(TypeBinding::Array(Box::new(
        TypeBinding::String
      )))))
    );
    assert!(TypeBinding::resolve("Widget", 0).is_err());
  }

  #[test]
  fn names_render_array_suffixes() {
    let t = TypeBinding::Array(Box::new(TypeBinding::Number));
    assert_eq!(t.name(), "Number[]");
  }
}
