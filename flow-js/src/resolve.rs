//! Resolution: a post-order pass over bound trees that links identifier uses
//! to symbols, resolves type annotations, folds constants, and checks
//! operator applicability. The facts it computes are attached to each
//! `Node<Expr>` as [`ExprFacts`] for flow analysis to read.
//!
//! Resolution is fault tolerant: every failed lookup degrades to `Any` or
//! `NotAConstant` after reporting, so one bad expression never hides later
//! diagnostics.

use crate::codes::CASE_TYPE_MISMATCH;
use crate::codes::DUPLICATE_DEFAULT;
use crate::codes::INVALID_OPERANDS;
use crate::codes::MALFORMED_NUMERIC_LITERAL;
use crate::codes::UNRESOLVED_NAME;
use crate::consts::fold_binary;
use crate::consts::fold_unary;
use crate::consts::Constant;
use ahash::HashMap;
use ahash::HashMapExt;
use derive_visitor::VisitorMut;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use scope_js::symbol::Scope;
use scope_js::symbol::Symbol;
use scope_js::types::TypeBinding;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::ParamDecl;
use syntax_js::ast::stmt::decl::VarDeclarator;
use syntax_js::ast::stmt::SwitchStmt;
use syntax_js::ast::type_expr::TypeExpr;
use syntax_js::loc::Loc;
use syntax_js::num::parse_numeric_literal;
use syntax_js::operator::OperatorName;

type ExprNode = Node<Expr>;
type IdExprNode = Node<IdExpr>;
type ParamDeclNode = Node<ParamDecl>;
type SwitchStmtNode = Node<SwitchStmt>;
type VarDeclaratorNode = Node<VarDeclarator>;

/// Facts attached to every expression node by resolution.
#[derive(Clone, Debug)]
pub struct ExprFacts {
  /// The folded compile-time value, or `NotAConstant`.
  pub constant: Constant,
  /// The statically known boolean outcome, when there is one. Conditions
  /// carrying `Some` drive branch elimination in flow analysis.
  pub optimized_boolean: Option<bool>,
  /// The resolved static type. `Any` wherever nothing better is known.
  pub typ: TypeBinding,
}

impl ExprFacts {
  fn new(constant: Constant, typ: TypeBinding) -> ExprFacts {
    let optimized_boolean = constant.boolean_value();
    ExprFacts {
      constant,
      optimized_boolean,
      typ,
    }
  }

  /// Reads the facts resolution attached to an expression node.
  pub fn of(node: &Node<Expr>) -> Option<&ExprFacts> {
    node.assoc.get::<ExprFacts>()
  }
}

/// Whether an expression can appear on the left of an assignment.
pub fn is_assignment_target(expr: &Node<Expr>) -> bool {
  matches!(
    &*expr.stx,
    Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_)
  )
}

#[derive(VisitorMut)]
#[visitor(
  ExprNode(exit),
  IdExprNode(exit),
  ParamDeclNode(exit),
  SwitchStmtNode(exit),
  VarDeclaratorNode(exit)
)]
pub struct Resolver {
  file: FileId,
  // Resolved annotation types per declared symbol. Line comment only: the
  // derive-visitor derive rejects doc attributes on fields.
  types: HashMap<Symbol, TypeBinding>,
  pub diagnostics: Vec<Diagnostic>,
}

impl Resolver {
  pub fn new(file: FileId) -> Resolver {
    Resolver {
      file,
      types: HashMap::new(),
      diagnostics: Vec::new(),
    }
  }

  pub fn symbol_type(&self, symbol: Symbol) -> TypeBinding {
    self.types.get(&symbol).cloned().unwrap_or(TypeBinding::Any)
  }

  fn facts_of(expr: &Node<Expr>) -> ExprFacts {
    ExprFacts::of(expr)
      .cloned()
      .unwrap_or_else(|| ExprFacts::new(Constant::NotAConstant, TypeBinding::Any))
  }

  fn resolve_type_expr(&mut self, node: &Node<TypeExpr>) -> TypeBinding {
    let name = node.stx.name.join(".");
    match TypeBinding::resolve(&name, node.stx.array_dims) {
      Ok(typ) => typ,
      Err(err) => {
        self.diagnostics.push(UNRESOLVED_NAME.error(
          format!("cannot resolve type {}", err.name),
          node.loc.span(self.file),
        ));
        TypeBinding::Any
      }
    }
  }

  fn require_numeric(&mut self, op: OperatorName, facts: &ExprFacts, loc: Loc) {
    if !facts.typ.is_numeric() && !facts.typ.is_any() {
      self.diagnostics.push(INVALID_OPERANDS.error(
        format!(
          "operator {} cannot be applied to {}",
          op.symbol(),
          facts.typ.name()
        ),
        loc.span(self.file),
      ));
    }
  }

  fn check_binary_operands(&mut self, op: OperatorName, left: &ExprFacts, right: &ExprFacts, loc: Loc) {
    use OperatorName::*;
    let numeric = |f: &ExprFacts| f.typ.is_numeric() || f.typ.is_any();
    let stringy = |f: &ExprFacts| matches!(f.typ, TypeBinding::String | TypeBinding::Any);
    let ok = match op {
      // String concatenation is defined for any right operand; otherwise
      // addition is numeric.
      Addition => stringy(left) || stringy(right) || (numeric(left) && numeric(right)),
      Subtraction | Multiplication | Division | Remainder | BitwiseAnd | BitwiseOr | BitwiseXor
      | BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => {
        numeric(left) && numeric(right)
      }
      LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => {
        (numeric(left) && numeric(right)) || (stringy(left) && stringy(right))
      }
      _ => true,
    };
    if !ok {
      self.diagnostics.push(INVALID_OPERANDS.error(
        format!(
          "operator {} cannot be applied to {} and {}",
          op.symbol(),
          left.typ.name(),
          right.typ.name()
        ),
        loc.span(self.file),
      ));
    }
  }

  fn require_assignment_target(&mut self, target: &Node<Expr>) {
    if !is_assignment_target(target) {
      self.diagnostics.push(
        crate::codes::ASSIGNMENT_TO_CONSTANT.error(
          "invalid assignment target",
          target.loc.span(self.file),
        ),
      );
    }
  }

  fn numeric_literal_facts(&mut self, node: &Node<syntax_js::ast::expr::lit::LitNumExpr>) -> ExprFacts {
    if node.stx.may_represent_min_value() {
      // Only has a value when directly negated; the Neg case folds it.
      return ExprFacts::new(Constant::NotAConstant, TypeBinding::Number);
    }
    match parse_numeric_literal(&node.stx.raw) {
      None => {
        self.diagnostics.push(MALFORMED_NUMERIC_LITERAL.error(
          format!("malformed numeric literal {}", node.stx.raw),
          node.loc.span(self.file),
        ));
        ExprFacts::new(Constant::NotAConstant, TypeBinding::Number)
      }
      Some(value) => {
        let v = value.0;
        let constant = if v.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(&v) {
          Constant::Int(v as i32)
        } else {
          Constant::Double(v)
        };
        ExprFacts::new(constant, TypeBinding::Number)
      }
    }
  }

  fn unary_facts(&mut self, node: &Node<syntax_js::ast::expr::UnaryExpr>) -> ExprFacts {
    use OperatorName::*;
    let op = node.stx.operator;
    let arg = &node.stx.argument;
    let arg_facts = Self::facts_of(arg);
    match op {
      LogicalNot => {
        let mut facts = ExprFacts::new(fold_unary(op, &arg_facts.constant), TypeBinding::Boolean);
        // `!x` has a known outcome whenever `x` does, constant or not.
        if facts.optimized_boolean.is_none() {
          facts.optimized_boolean = arg_facts.optimized_boolean.map(|known| !known);
        }
        facts
      }
      Neg => {
        self.require_numeric(op, &arg_facts, node.loc);
        let constant = match &*arg.stx {
          Expr::LitNum(lit) if lit.stx.may_represent_min_value() => Constant::Int(i32::MIN),
          _ => fold_unary(op, &arg_facts.constant),
        };
        ExprFacts::new(constant, TypeBinding::Number)
      }
      Pos | BitwiseNot => {
        self.require_numeric(op, &arg_facts, node.loc);
        ExprFacts::new(fold_unary(op, &arg_facts.constant), TypeBinding::Number)
      }
      Typeof => ExprFacts::new(Constant::NotAConstant, TypeBinding::String),
      Void => ExprFacts::new(Constant::NotAConstant, TypeBinding::Undefined),
      Delete => ExprFacts::new(Constant::NotAConstant, TypeBinding::Boolean),
      PrefixIncrement | PrefixDecrement => {
        self.require_assignment_target(arg);
        self.require_numeric(op, &arg_facts, node.loc);
        ExprFacts::new(Constant::NotAConstant, TypeBinding::Number)
      }
      _ => ExprFacts::new(Constant::NotAConstant, TypeBinding::Any),
    }
  }

  fn binary_facts(&mut self, node: &Node<syntax_js::ast::expr::BinaryExpr>) -> ExprFacts {
    use OperatorName::*;
    let op = node.stx.operator;
    let left = Self::facts_of(&node.stx.left);
    let right = Self::facts_of(&node.stx.right);
    if op.is_assignment() {
      self.require_assignment_target(&node.stx.left);
      return match op.compound_base() {
        Some(base) => {
          self.check_binary_operands(base, &left, &right, node.loc);
          ExprFacts::new(Constant::NotAConstant, Self::binary_result_type(base, &left, &right))
        }
        None => ExprFacts::new(Constant::NotAConstant, right.typ),
      };
    }
    self.check_binary_operands(op, &left, &right, node.loc);
    let constant = fold_binary(op, &left.constant, &right.constant);
    let typ = match op {
      Comma => right.typ.clone(),
      _ => Self::binary_result_type(op, &left, &right),
    };
    let mut facts = ExprFacts::new(constant, typ);
    // Short-circuit operators can have a statically known boolean outcome
    // even when the whole expression is not a constant: `x || true` is
    // always true. That outcome drives branch elimination downstream.
    match op {
      LogicalAnd => {
        facts.optimized_boolean =
          optimized_and(left.optimized_boolean, right.optimized_boolean);
      }
      LogicalOr => {
        facts.optimized_boolean =
          optimized_or(left.optimized_boolean, right.optimized_boolean);
      }
      _ => {}
    }
    facts
  }

  fn binary_result_type(op: OperatorName, left: &ExprFacts, right: &ExprFacts) -> TypeBinding {
    use OperatorName::*;
    match op {
      Addition => {
        if matches!(left.typ, TypeBinding::String) || matches!(right.typ, TypeBinding::String) {
          TypeBinding::String
        } else {
          TypeBinding::Number
        }
      }
      Subtraction | Multiplication | Division | Remainder | BitwiseAnd | BitwiseOr | BitwiseXor
      | BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => TypeBinding::Number,
      LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual | Equality | Inequality
      | StrictEquality | StrictInequality | LogicalAnd | LogicalOr | In | Instanceof => {
        TypeBinding::Boolean
      }
      Comma => right.typ.clone(),
      _ => TypeBinding::Any,
    }
  }

  fn expr_facts(&mut self, node: &Node<Expr>) -> ExprFacts {
    match &*node.stx {
      Expr::LitBool(lit) => ExprFacts::new(Constant::Bool(lit.stx.value), TypeBinding::Boolean),
      Expr::LitNum(lit) => self.numeric_literal_facts(lit),
      Expr::LitStr(lit) => ExprFacts::new(
        Constant::String(lit.stx.value.clone()),
        TypeBinding::String,
      ),
      Expr::LitNull(_) => ExprFacts::new(Constant::NotAConstant, TypeBinding::Null),
      Expr::LitUndefined(_) => ExprFacts::new(Constant::NotAConstant, TypeBinding::Undefined),
      Expr::LitRegex(_) => ExprFacts::new(Constant::NotAConstant, TypeBinding::Object),
      Expr::LitArr(_) => ExprFacts::new(
        Constant::NotAConstant,
        TypeBinding::Array(Box::new(TypeBinding::Any)),
      ),
      Expr::Id(id) => {
        let typ = id
          .assoc
          .get::<Symbol>()
          .map(|symbol| self.symbol_type(*symbol))
          .unwrap_or(TypeBinding::Any);
        ExprFacts::new(Constant::NotAConstant, typ)
      }
      Expr::Member(_) | Expr::ComputedMember(_) | Expr::Call(_) => {
        ExprFacts::new(Constant::NotAConstant, TypeBinding::Any)
      }
      Expr::Func(_) => ExprFacts::new(Constant::NotAConstant, TypeBinding::Function),
      Expr::Unary(unary) => self.unary_facts(unary),
      Expr::UnaryPostfix(postfix) => {
        self.require_assignment_target(&postfix.stx.argument);
        let arg_facts = Self::facts_of(&postfix.stx.argument);
        self.require_numeric(postfix.stx.operator, &arg_facts, postfix.loc);
        ExprFacts::new(Constant::NotAConstant, TypeBinding::Number)
      }
      Expr::Binary(binary) => self.binary_facts(binary),
      Expr::Cond(cond) => {
        let test = Self::facts_of(&cond.stx.test);
        let consequent = Self::facts_of(&cond.stx.consequent);
        let alternate = Self::facts_of(&cond.stx.alternate);
        let constant = match test.optimized_boolean {
          Some(true) => consequent.constant.clone(),
          Some(false) => alternate.constant.clone(),
          None => Constant::NotAConstant,
        };
        let typ = if consequent.typ == alternate.typ {
          consequent.typ.clone()
        } else {
          TypeBinding::Any
        };
        ExprFacts::new(constant, typ)
      }
      Expr::ArrAlloc(alloc) => {
        for dim in node_arr_alloc_dims(alloc) {
          let dim_facts = Self::facts_of(dim);
          if !dim_facts.typ.is_numeric() && !dim_facts.typ.is_any() {
            self.diagnostics.push(INVALID_OPERANDS.error(
              format!("array dimension must be a number, found {}", dim_facts.typ.name()),
              dim.loc.span(self.file),
            ));
          }
        }
        let element = self.resolve_type_expr(&alloc.stx.type_expr);
        let mut typ = element;
        for _ in 0..alloc.stx.dims.len() {
          typ = TypeBinding::Array(Box::new(typ));
        }
        ExprFacts::new(Constant::NotAConstant, typ)
      }
    }
  }

  fn exit_expr_node(&mut self, node: &mut ExprNode) {
    let facts = self.expr_facts(node);
    node.assoc.set(facts);
  }


  fn exit_id_expr_node(&mut self, node: &mut IdExprNode) {
    // The binder attaches the lexical scope; an unbound tree stays unlinked
    // and the analyzer degrades.
    let Some(scope) = node.assoc.get::<Scope>().cloned() else {
      return;
    };
    match scope.find_symbol(&node.stx.name) {
      Some(symbol) => node.assoc.set(symbol),
      None => self.diagnostics.push(UNRESOLVED_NAME.error(
        format!("cannot resolve name {}", node.stx.name),
        node.loc.span(self.file),
      )),
    }
  }


  fn exit_param_decl_node(&mut self, node: &mut ParamDeclNode) {
    let Some(symbol) = node.stx.name.assoc.get::<Symbol>().copied() else {
      return;
    };
    if let Some(annotation) = &node.stx.type_annotation {
      let typ = self.resolve_type_expr(annotation);
      self.types.insert(symbol, typ);
    }
  }


  fn exit_var_declarator_node(&mut self, node: &mut VarDeclaratorNode) {
    let Some(symbol) = node.stx.name.assoc.get::<Symbol>().copied() else {
      return;
    };
    if let Some(annotation) = &node.stx.type_annotation {
      let typ = self.resolve_type_expr(annotation);
      self.types.insert(symbol, typ);
    }
  }


  fn exit_switch_stmt_node(&mut self, node: &mut SwitchStmtNode) {
    let switch_typ = Self::facts_of(&node.stx.test).typ;
    let mut default_seen = false;
    let mut extra_default_reported = false;
    for branch in &node.stx.branches {
      match &branch.stx.case {
        None => {
          // The later default wins for dispatch; report the duplication once.
          if default_seen && !extra_default_reported {
            self.diagnostics.push(DUPLICATE_DEFAULT.error(
              "duplicate default case",
              branch.loc.span(self.file),
            ));
            extra_default_reported = true;
          }
          default_seen = true;
        }
        Some(case) => {
          let case_facts = Self::facts_of(case);
          if !case_compatible(&switch_typ, &case_facts.typ) {
            // Siblings are still resolved after a mismatch.
            self.diagnostics.push(CASE_TYPE_MISMATCH.error(
              format!(
                "case of type {} is not comparable to switch expression of type {}",
                case_facts.typ.name(),
                switch_typ.name()
              ),
              case.loc.span(self.file),
            ));
          }
        }
      }
    }
  }

}

fn node_arr_alloc_dims(
  alloc: &Node<syntax_js::ast::expr::ArrAllocExpr>,
) -> impl Iterator<Item = &Node<Expr>> {
  alloc.stx.dims.iter().flatten()
}

/// `&&` is decided by any statically false side; otherwise both sides must
/// be known.
fn optimized_and(left: Option<bool>, right: Option<bool>) -> Option<bool> {
  match (left, right) {
    (Some(false), _) | (_, Some(false)) => Some(false),
    (Some(true), other) | (other, Some(true)) => other,
    (None, None) => None,
  }
}

/// `||` is decided by any statically true side; otherwise both sides must
/// be known.
fn optimized_or(left: Option<bool>, right: Option<bool>) -> Option<bool> {
  match (left, right) {
    (Some(true), _) | (_, Some(true)) => Some(true),
    (Some(false), other) | (other, Some(false)) => other,
    (None, None) => None,
  }
}

fn case_compatible(switch_typ: &TypeBinding, case_typ: &TypeBinding) -> bool {
  if switch_typ.is_any() || case_typ.is_any() {
    return true;
  }
  match switch_typ {
    TypeBinding::Number => case_typ.is_numeric(),
    TypeBinding::String => matches!(case_typ, TypeBinding::String),
    TypeBinding::Boolean => matches!(case_typ, TypeBinding::Boolean),
    _ => true,
  }
}
