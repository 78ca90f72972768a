use serde::Serialize;

/// Operators that can appear in `Binary`, `Unary`, and `UnaryPostfix` nodes.
///
/// Assignment operators are binary; `Assignment` is plain `=` and the
/// `*Assign` variants are the compound forms. `Neg`/`Pos` are the unary sign
/// operators, distinct from binary `Subtraction`/`Addition`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum OperatorName {
  // Binary arithmetic.
  Addition,
  Subtraction,
  Multiplication,
  Division,
  Remainder,
  // Comparison and equality.
  LessThan,
  LessThanOrEqual,
  GreaterThan,
  GreaterThanOrEqual,
  Equality,
  Inequality,
  StrictEquality,
  StrictInequality,
  // Logical.
  LogicalAnd,
  LogicalOr,
  LogicalNot,
  // Bitwise and shifts.
  BitwiseAnd,
  BitwiseOr,
  BitwiseXor,
  BitwiseNot,
  BitwiseLeftShift,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  // Unary.
  Neg,
  Pos,
  Typeof,
  Void,
  Delete,
  PrefixIncrement,
  PrefixDecrement,
  PostfixIncrement,
  PostfixDecrement,
  // Assignment.
  Assignment,
  AdditionAssign,
  SubtractionAssign,
  MultiplicationAssign,
  DivisionAssign,
  RemainderAssign,
  BitwiseAndAssign,
  BitwiseOrAssign,
  BitwiseXorAssign,
  BitwiseLeftShiftAssign,
  BitwiseRightShiftAssign,
  BitwiseUnsignedRightShiftAssign,
  // Other.
  Comma,
  In,
  Instanceof,
}

impl OperatorName {
  /// Whether this operator writes to its left operand.
  pub fn is_assignment(&self) -> bool {
    use OperatorName::*;
    matches!(
      self,
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
        | BitwiseUnsignedRightShiftAssign
    )
  }

  /// For compound assignments, the underlying binary operator.
  pub fn compound_base(&self) -> Option<OperatorName> {
    use OperatorName::*;
    Some(match self {
      AdditionAssign => Addition,
      SubtractionAssign => Subtraction,
      MultiplicationAssign => Multiplication,
      DivisionAssign => Division,
      RemainderAssign => Remainder,
      BitwiseAndAssign => BitwiseAnd,
      BitwiseOrAssign => BitwiseOr,
      BitwiseXorAssign => BitwiseXor,
      BitwiseLeftShiftAssign => BitwiseLeftShift,
      BitwiseRightShiftAssign => BitwiseRightShift,
      BitwiseUnsignedRightShiftAssign => BitwiseUnsignedRightShift,
      _ => return None,
    })
  }

  /// Whether prefix/postfix increment or decrement, which both read and write
  /// the operand.
  pub fn is_increment_or_decrement(&self) -> bool {
    use OperatorName::*;
    matches!(
      self,
      PrefixIncrement | PrefixDecrement | PostfixIncrement | PostfixDecrement
    )
  }

  /// Source text of the operator, for printing and messages.
  pub fn symbol(&self) -> &'static str {
    use OperatorName::*;
    match self {
      Addition => "+",
      Subtraction => "-",
      Multiplication => "*",
      Division => "/",
      Remainder => "%",
      LessThan => "<",
      LessThanOrEqual => "<=",
      GreaterThan => ">",
      GreaterThanOrEqual => ">=",
      Equality => "==",
      Inequality => "!=",
      StrictEquality => "===",
      StrictInequality => "!==",
      LogicalAnd => "&&",
      LogicalOr => "||",
      LogicalNot => "!",
      BitwiseAnd => "&",
      BitwiseOr => "|",
      BitwiseXor => "^",
      BitwiseNot => "~",
      BitwiseLeftShift => "<<",
      BitwiseRightShift => ">>",
      BitwiseUnsignedRightShift => ">>>",
      Neg => "-",
      Pos => "+",
      Typeof => "typeof",
      Void => "void",
      Delete => "delete",
      PrefixIncrement | PostfixIncrement => "++",
      PrefixDecrement | PostfixDecrement => "--",
      Assignment => "=",
      AdditionAssign => "+=",
      SubtractionAssign => "-=",
      MultiplicationAssign => "*=",
      DivisionAssign => "/=",
      RemainderAssign => "%=",
      BitwiseAndAssign => "&=",
      BitwiseOrAssign => "|=",
      BitwiseXorAssign => "^=",
      BitwiseLeftShiftAssign => "<<=",
      BitwiseRightShiftAssign => ">>=",
      BitwiseUnsignedRightShiftAssign => ">>>=",
      Comma => ",",
      In => "in",
      Instanceof => "instanceof",
    }
  }
}
