use ahash::HashMap;
use ahash::HashMapExt;
use serde::Serialize;
use std::cell::Ref;
use std::cell::RefCell;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::rc::Rc;
use syntax_js::loc::Loc;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum ScopeType {
  Global,
  Module,
  Closure,
  Block,
  With,
}

impl ScopeType {
  /// Whether `var` and function declarations hoist past this scope.
  pub fn is_hoist_target(&self) -> bool {
    matches!(self, ScopeType::Global | ScopeType::Module | ScopeType::Closure)
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum DeclKind {
  Var,
  Let,
  Const,
  Function,
  Param,
}

impl DeclKind {
  pub fn hoists(&self) -> bool {
    matches!(self, DeclKind::Var | DeclKind::Function)
  }

  pub fn is_const(&self) -> bool {
    matches!(self, DeclKind::Const)
  }
}

/// An opaque handle to a declared variable. Symbols are unique across one
/// binding run, so shadowing declarations of the same name stay distinct.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct Symbol(u64);

#[derive(Clone, Debug)]
pub struct SymbolData {
  pub name: String,
  pub kind: DeclKind,
  pub decl_loc: Loc,
  /// Index into the enclosing function's locals, dense from zero. This is the
  /// key flow analysis uses in its assignment bitsets.
  pub slot: usize,
}

struct SymbolStore {
  symbols: Vec<SymbolData>,
}

impl SymbolStore {
  fn data(&self, symbol: Symbol) -> &SymbolData {
    &self.symbols[symbol.0 as usize]
  }
}

pub struct ScopeData {
  typ: ScopeType,
  parent: Option<Scope>,
  children: Vec<Scope>,
  symbols: HashMap<String, Symbol>,
  declaration_order: Vec<Symbol>,
  // Dense local slot counter; only used on hoist-target scopes.
  next_slot: usize,
}

impl ScopeData {
  pub fn typ(&self) -> ScopeType {
    self.typ
  }

  pub fn parent(&self) -> Option<&Scope> {
    self.parent.as_ref()
  }

  pub fn children(&self) -> &[Scope] {
    &self.children
  }

  pub fn get_symbol(&self, name: &str) -> Option<Symbol> {
    self.symbols.get(name).copied()
  }

  pub fn symbol_count(&self) -> usize {
    self.symbols.len()
  }

  pub fn declaration_order(&self) -> &[Symbol] {
    &self.declaration_order
  }
}

/// A clonable handle to one lexical scope. Equality is identity.
#[derive(Clone)]
pub struct Scope {
  data: Rc<RefCell<ScopeData>>,
  store: Rc<RefCell<SymbolStore>>,
}

impl PartialEq for Scope {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.data, &other.data)
  }
}

impl Eq for Scope {}

impl Debug for Scope {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let data = self.data();
    write!(f, "Scope({:?}, {} symbols)", data.typ, data.symbol_count())
  }
}

/// The result of a `declare` call.
pub enum Declared {
  New(Symbol),
  /// The name was already declared in the exact target scope. For `var`
  /// re-declarations the existing symbol is reused.
  Existing(Symbol),
}

impl Declared {
  pub fn symbol(&self) -> Symbol {
    match self {
      Declared::New(s) | Declared::Existing(s) => *s,
    }
  }
}

impl Scope {
  pub fn new_root(typ: ScopeType) -> Scope {
    Scope {
      data: Rc::new(RefCell::new(ScopeData {
        typ,
        parent: None,
        children: Vec::new(),
        symbols: HashMap::new(),
        declaration_order: Vec::new(),
        next_slot: 0,
      })),
      store: Rc::new(RefCell::new(SymbolStore {
        symbols: Vec::new(),
      })),
    }
  }

  pub fn create_child(&self, typ: ScopeType) -> Scope {
    let child = Scope {
      data: Rc::new(RefCell::new(ScopeData {
        typ,
        parent: Some(self.clone()),
        children: Vec::new(),
        symbols: HashMap::new(),
        declaration_order: Vec::new(),
        next_slot: 0,
      })),
      store: self.store.clone(),
    };
    self.data.borrow_mut().children.push(child.clone());
    child
  }

  pub fn data(&self) -> Ref<'_, ScopeData> {
    self.data.borrow()
  }

  pub fn symbol_data(&self, symbol: Symbol) -> Ref<'_, SymbolData> {
    Ref::map(self.store.borrow(), |store| store.data(symbol))
  }

  /// The scope `var`/function declarations land in: the nearest self-or-
  /// ancestor hoist target. Roots are always hoist targets.
  pub fn hoist_scope(&self) -> Scope {
    if self.data().typ.is_hoist_target() {
      return self.clone();
    }
    match self.data().parent.clone() {
      Some(parent) => parent.hoist_scope(),
      None => self.clone(),
    }
  }

  /// Declares `name` in this scope (or the hoist scope for hoisting kinds),
  /// allocating a local slot from the enclosing function.
  pub fn declare(&self, name: &str, kind: DeclKind, decl_loc: Loc) -> Declared {
    let target = if kind.hoists() {
      self.hoist_scope()
    } else {
      self.clone()
    };
    if let Some(existing) = target.data().get_symbol(name) {
      return Declared::Existing(existing);
    }
    let slot_scope = target.hoist_scope();
    let slot = {
      let mut data = slot_scope.data.borrow_mut();
      let slot = data.next_slot;
      data.next_slot += 1;
      slot
    };
    let symbol = {
      let mut store = self.store.borrow_mut();
      let symbol = Symbol(store.symbols.len() as u64);
      store.symbols.push(SymbolData {
        name: name.to_string(),
        kind,
        decl_loc,
        slot,
      });
      symbol
    };
    let mut data = target.data.borrow_mut();
    data.symbols.insert(name.to_string(), symbol);
    data.declaration_order.push(symbol);
    Declared::New(symbol)
  }

  pub fn find_symbol(&self, name: &str) -> Option<Symbol> {
    self
      .find_symbol_up_to_with_scope(name, |_| false)
      .map(|(_, symbol)| symbol)
  }

  /// Walks this scope and its ancestors for `name`, stopping (exclusive) at
  /// the first scope for which `stop` returns true. Returns the declaring
  /// scope alongside the symbol.
  pub fn find_symbol_up_to_with_scope<F: Fn(&Scope) -> bool>(
    &self,
    name: &str,
    stop: F,
  ) -> Option<(Scope, Symbol)> {
    let mut current = self.clone();
    loop {
      if stop(&current) {
        return None;
      }
      // End the data() borrow before `current` moves into the return value.
      let found = current.data().get_symbol(name);
      if let Some(symbol) = found {
        return Some((current, symbol));
      }
      let parent = current.data().parent.clone();
      match parent {
        Some(parent) => current = parent,
        None => return None,
      }
    }
  }

  /// The number of local slots allocated in this function scope so far.
  pub fn local_count(&self) -> usize {
    self.hoist_scope().data().next_slot
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn var_hoists_to_closure_scope() {
    let root = Scope::new_root(ScopeType::Global);
    let closure = root.create_child(ScopeType::Closure);
    let block = closure.create_child(ScopeType::Block);
    let declared = block.declare("x", DeclKind::Var, Loc(0, 0));
    let symbol = declared.symbol();
    assert!(block.data().get_symbol("x").is_none());
    assert_eq!(closure.data().get_symbol("x"), Some(symbol));
    assert_eq!(block.find_symbol("x"), Some(symbol));
  }

  #[test]
  fn let_stays_in_block_and_shadows() {
    let root = Scope::new_root(ScopeType::Global);
    let outer = root.declare("x", DeclKind::Let, Loc(0, 1)).symbol();
    let block = root.create_child(ScopeType::Block);
    let inner = block.declare("x", DeclKind::Let, Loc(5, 6)).symbol();
    assert_ne!(outer, inner);
    assert_eq!(block.find_symbol("x"), Some(inner));
    assert_eq!(root.find_symbol("x"), Some(outer));
    let (decl_scope, found) = block.find_symbol_up_to_with_scope("x", |_| false).unwrap();
    assert_eq!(found, inner);
    assert_eq!(decl_scope, block);
  }

  #[test]
  fn slots_are_dense_per_function() {
    let root = Scope::new_root(ScopeType::Global);
    let f = root.create_child(ScopeType::Closure);
    let block = f.create_child(ScopeType::Block);
    let a = f.declare("a", DeclKind::Param, Loc(0, 0)).symbol();
    let b = block.declare("b", DeclKind::Let, Loc(0, 0)).symbol();
    let c = block.declare("c", DeclKind::Var, Loc(0, 0)).symbol();
    assert_eq!(f.symbol_data(a).slot, 0);
    assert_eq!(f.symbol_data(b).slot, 1);
    assert_eq!(f.symbol_data(c).slot, 2);
    assert_eq!(f.local_count(), 3);
    // A sibling function starts again from zero.
    let g = root.create_child(ScopeType::Closure);
    let d = g.declare("d", DeclKind::Let, Loc(0, 0)).symbol();
    assert_eq!(g.symbol_data(d).slot, 0);
  }

  #[test]
  fn redeclaration_returns_existing_symbol() {
    let root = Scope::new_root(ScopeType::Global);
    let first = root.declare("x", DeclKind::Var, Loc(0, 0)).symbol();
    match root.declare("x", DeclKind::Var, Loc(9, 10)) {
      Declared::Existing(symbol) => assert_eq!(symbol, first),
      Declared::New(_) => panic!("expected existing symbol"),
    }
  }
}
