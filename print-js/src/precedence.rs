//! Operator precedence, used to decide where printing must parenthesize.

use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::operator::OperatorName;

/// Wrapper around a precedence value with total ordering. Higher binds
/// tighter.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Prec(u8);

impl Prec {
  pub const LOWEST: Prec = Prec(0);

  pub const fn new(value: u8) -> Self {
    Prec(value)
  }

  pub const fn tighter(self) -> Self {
    Prec(self.0 + 1)
  }
}

pub const COMMA_PRECEDENCE: Prec = Prec::new(1);
pub const ASSIGNMENT_PRECEDENCE: Prec = Prec::new(2);
pub const CONDITIONAL_PRECEDENCE: Prec = Prec::new(3);
pub const UNARY_PRECEDENCE: Prec = Prec::new(14);
pub const POSTFIX_PRECEDENCE: Prec = Prec::new(15);
/// Member access, computed member access, calls, and `new` allocations.
pub const CALL_MEMBER_PRECEDENCE: Prec = Prec::new(17);
/// Atomic expressions: identifiers and literals.
pub const PRIMARY_PRECEDENCE: Prec = Prec::new(19);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Clone, Copy, Debug)]
pub enum Side {
  Left,
  Right,
}

pub fn needs_parens(child_prec: Prec, min_prec: Prec) -> bool {
  child_prec < min_prec
}

/// Precedence and associativity of a binary operator.
pub fn binary_info(op: OperatorName) -> (Prec, Associativity) {
  use Associativity::*;
  use OperatorName::*;
  match op {
    Comma => (COMMA_PRECEDENCE, Left),
    Assignment
    | AdditionAssign
    | SubtractionAssign
    | MultiplicationAssign
    | DivisionAssign
    | RemainderAssign
    | BitwiseAndAssign
    | BitwiseOrAssign
    | BitwiseXorAssign
    | BitwiseLeftShiftAssign
    | BitwiseRightShiftAssign
    | BitwiseUnsignedRightShiftAssign => (ASSIGNMENT_PRECEDENCE, Right),
    LogicalOr => (Prec::new(4), Left),
    LogicalAnd => (Prec::new(5), Left),
    BitwiseOr => (Prec::new(6), Left),
    BitwiseXor => (Prec::new(7), Left),
    BitwiseAnd => (Prec::new(8), Left),
    Equality | Inequality | StrictEquality | StrictInequality => (Prec::new(9), Left),
    LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual | In | Instanceof => {
      (Prec::new(10), Left)
    }
    BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => (Prec::new(11), Left),
    Addition | Subtraction => (Prec::new(12), Left),
    Multiplication | Division | Remainder => (Prec::new(13), Left),
    // Unary operators never appear in Binary nodes.
    LogicalNot | BitwiseNot | Neg | Pos | Typeof | Void | Delete | PrefixIncrement
    | PrefixDecrement | PostfixIncrement | PostfixDecrement => (UNARY_PRECEDENCE, Right),
  }
}

/// The minimum precedence an operand of `op` must have to print without
/// parentheses.
pub fn child_min_prec(op: OperatorName, side: Side) -> Prec {
  let (prec, assoc) = binary_info(op);
  match (assoc, side) {
    (Associativity::Left, Side::Left) | (Associativity::Right, Side::Right) => prec,
    (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left) => prec.tighter(),
  }
}

/// Returns the precedence of an expression kind, for deciding whether an
/// occurrence as an operand needs parentheses.
pub fn expr_prec(expr: &Node<Expr>) -> Prec {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => binary_info(binary.stx.operator).0,
    Expr::Cond(_) => CONDITIONAL_PRECEDENCE,
    Expr::Unary(_) => UNARY_PRECEDENCE,
    Expr::UnaryPostfix(_) => POSTFIX_PRECEDENCE,
    Expr::ArrAlloc(_) | Expr::Call(_) | Expr::Member(_) | Expr::ComputedMember(_) => {
      CALL_MEMBER_PRECEDENCE
    }
    Expr::Func(_)
    | Expr::Id(_)
    | Expr::LitArr(_)
    | Expr::LitBool(_)
    | Expr::LitNull(_)
    | Expr::LitNum(_)
    | Expr::LitRegex(_)
    | Expr::LitStr(_)
    | Expr::LitUndefined(_) => PRIMARY_PRECEDENCE,
  }
}
