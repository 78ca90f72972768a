//! Compile-time constant values and folding.
//!
//! Constants are produced during resolution and consumed by flow analysis for
//! dead-branch detection. Folding is deliberately conservative: any operand
//! that is `NotAConstant`, any undefined operator/kind combination, and any
//! operation whose result would be wrong to guess (integer division by zero)
//! yields `NotAConstant`.

use syntax_js::operator::OperatorName;

/// A compile-time value. `NotAConstant` is the sentinel for "no static
/// value"; check it with [`Constant::is_not_a_constant`], never by comparing
/// payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
  Bool(bool),
  Int(i32),
  Long(i64),
  Float(f32),
  Double(f64),
  // Qualified: the glob import below makes a bare `String` mean the variant.
  String(std::string::String),
  Char(char),
  NotAConstant,
}

use Constant::*;

impl Constant {
  pub fn is_not_a_constant(&self) -> bool {
    matches!(self, NotAConstant)
  }

  /// The value in boolean context, if statically known.
  pub fn boolean_value(&self) -> Option<bool> {
    match self {
      Bool(v) => Some(*v),
      _ => None,
    }
  }

  fn as_double(&self) -> Option<f64> {
    Some(match self {
      Int(v) => *v as f64,
      Long(v) => *v as f64,
      Float(v) => *v as f64,
      Double(v) => *v,
      Char(v) => *v as u32 as f64,
      _ => return None,
    })
  }

  fn as_long(&self) -> Option<i64> {
    Some(match self {
      Int(v) => *v as i64,
      Long(v) => *v,
      Char(v) => *v as u32 as i64,
      _ => return None,
    })
  }

  fn is_integral(&self) -> bool {
    matches!(self, Int(_) | Long(_) | Char(_))
  }

  fn is_numeric(&self) -> bool {
    matches!(self, Int(_) | Long(_) | Float(_) | Double(_) | Char(_))
  }

  /// Kind name for messages.
  pub fn kind_name(&self) -> &'static str {
    match self {
      Bool(_) => "boolean",
      Int(_) => "int",
      Long(_) => "long",
      Float(_) => "float",
      Double(_) => "double",
      String(_) => "string",
      Char(_) => "char",
      NotAConstant => "not a constant",
    }
  }

  fn to_display_string(&self) -> Option<std::string::String> {
    Some(match self {
      Bool(v) => v.to_string(),
      Int(v) => v.to_string(),
      Long(v) => v.to_string(),
      Float(v) => v.to_string(),
      Double(v) => v.to_string(),
      String(v) => v.clone(),
      Char(v) => v.to_string(),
      NotAConstant => return None,
    })
  }
}

/// Whether both operands are kept in the integral domain for `op`, so the
/// result stays `Int`/`Long` rather than widening to `Double`.
fn integral_pair(left: &Constant, right: &Constant) -> bool {
  left.is_integral() && right.is_integral()
}

fn widen_integral(left: &Constant, right: &Constant, value: i64) -> Constant {
  if matches!(left, Long(_)) || matches!(right, Long(_)) {
    Long(value)
  } else {
    match i32::try_from(value) {
      Ok(v) => Int(v),
      Err(_) => Long(value),
    }
  }
}

fn widen_float(left: &Constant, right: &Constant, value: f64) -> Constant {
  if matches!(left, Double(_)) || matches!(right, Double(_)) {
    Double(value)
  } else {
    Float(value as f32)
  }
}

/// Folds a binary operation over two constants. Returns `NotAConstant` when
/// either side is not constant or the combination is undefined.
pub fn fold_binary(op: OperatorName, left: &Constant, right: &Constant) -> Constant {
  use OperatorName::*;
  if left.is_not_a_constant() || right.is_not_a_constant() {
    return NotAConstant;
  }
  match op {
    Addition => fold_addition(left, right),
    Subtraction | Multiplication | Division | Remainder => fold_arithmetic(op, left, right),
    LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => {
      fold_comparison(op, left, right)
    }
    Equality | StrictEquality => fold_equality(left, right),
    Inequality | StrictInequality => match fold_equality(left, right) {
      Bool(v) => Bool(!v),
      other => other,
    },
    LogicalAnd => match (left, right) {
      (Bool(a), Bool(b)) => Bool(*a && *b),
      _ => NotAConstant,
    },
    LogicalOr => match (left, right) {
      (Bool(a), Bool(b)) => Bool(*a || *b),
      _ => NotAConstant,
    },
    BitwiseAnd | BitwiseOr | BitwiseXor => fold_bitwise(op, left, right),
    BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => {
      fold_shift(op, left, right)
    }
    _ => NotAConstant,
  }
}

fn fold_addition(left: &Constant, right: &Constant) -> Constant {
  if let (String(_), _) | (_, String(_)) = (left, right) {
    return match (left.to_display_string(), right.to_display_string()) {
      (Some(a), Some(b)) => String(a + &b),
      _ => NotAConstant,
    };
  }
  fold_arithmetic(OperatorName::Addition, left, right)
}

fn fold_arithmetic(op: OperatorName, left: &Constant, right: &Constant) -> Constant {
  use OperatorName::*;
  if !left.is_numeric() || !right.is_numeric() {
    return NotAConstant;
  }
  if integral_pair(left, right) {
    let (a, b) = (left.as_long().unwrap(), right.as_long().unwrap());
    let value = match op {
      Addition => a.checked_add(b),
      Subtraction => a.checked_sub(b),
      Multiplication => a.checked_mul(b),
      // Integer division by zero has no value; it is a runtime error in the
      // source language this models.
      Division => a.checked_div(b),
      Remainder => a.checked_rem(b),
      _ => None,
    };
    return match value {
      Some(v) => widen_integral(left, right, v),
      None => NotAConstant,
    };
  }
  let (a, b) = (left.as_double().unwrap(), right.as_double().unwrap());
  let value = match op {
    Addition => a + b,
    Subtraction => a - b,
    Multiplication => a * b,
    Division => a / b,
    Remainder => a % b,
    _ => return NotAConstant,
  };
  widen_float(left, right, value)
}

fn fold_comparison(op: OperatorName, left: &Constant, right: &Constant) -> Constant {
  use OperatorName::*;
  let ordering = if let (String(a), String(b)) = (left, right) {
    a.partial_cmp(b)
  } else {
    match (left.as_double(), right.as_double()) {
      (Some(a), Some(b)) => a.partial_cmp(&b),
      _ => return NotAConstant,
    }
  };
  let Some(ordering) = ordering else {
    return NotAConstant;
  };
  Bool(match op {
    LessThan => ordering.is_lt(),
    LessThanOrEqual => ordering.is_le(),
    GreaterThan => ordering.is_gt(),
    GreaterThanOrEqual => ordering.is_ge(),
    _ => return NotAConstant,
  })
}

fn fold_equality(left: &Constant, right: &Constant) -> Constant {
  match (left, right) {
    (Bool(a), Bool(b)) => Bool(a == b),
    (String(a), String(b)) => Bool(a == b),
    _ => match (left.as_double(), right.as_double()) {
      (Some(a), Some(b)) => Bool(a == b),
      _ => NotAConstant,
    },
  }
}

fn fold_bitwise(op: OperatorName, left: &Constant, right: &Constant) -> Constant {
  use OperatorName::*;
  if !integral_pair(left, right) {
    return NotAConstant;
  }
  let (a, b) = (left.as_long().unwrap(), right.as_long().unwrap());
  let value = match op {
    BitwiseAnd => a & b,
    BitwiseOr => a | b,
    BitwiseXor => a ^ b,
    _ => return NotAConstant,
  };
  widen_integral(left, right, value)
}

fn fold_shift(op: OperatorName, left: &Constant, right: &Constant) -> Constant {
  use OperatorName::*;
  if !integral_pair(left, right) {
    return NotAConstant;
  }
  let Some(shift) = right.as_long().unwrap().try_into().ok().filter(|s| *s < 64u32) else {
    return NotAConstant;
  };
  match left {
    Long(a) => Long(match op {
      BitwiseLeftShift => a.wrapping_shl(shift),
      BitwiseRightShift => a.wrapping_shr(shift),
      BitwiseUnsignedRightShift => ((*a as u64).wrapping_shr(shift)) as i64,
      _ => return NotAConstant,
    }),
    _ => {
      let a = left.as_long().unwrap() as i32;
      let shift = shift % 32;
      Int(match op {
        BitwiseLeftShift => a.wrapping_shl(shift),
        BitwiseRightShift => a.wrapping_shr(shift),
        BitwiseUnsignedRightShift => ((a as u32).wrapping_shr(shift)) as i32,
        _ => return NotAConstant,
      })
    }
  }
}

/// Folds a unary operation. The `-2147483648` minimum-value literal is not
/// handled here; resolution special-cases it before calling (see
/// `LitNumExpr::may_represent_min_value`).
pub fn fold_unary(op: OperatorName, operand: &Constant) -> Constant {
  use OperatorName::*;
  if operand.is_not_a_constant() {
    return NotAConstant;
  }
  match (op, operand) {
    (LogicalNot, Bool(v)) => Bool(!*v),
    (Neg, Int(v)) => match v.checked_neg() {
      Some(n) => Int(n),
      None => NotAConstant,
    },
    (Neg, Long(v)) => match v.checked_neg() {
      Some(n) => Long(n),
      None => NotAConstant,
    },
    (Neg, Float(v)) => Float(-*v),
    (Neg, Double(v)) => Double(-*v),
    (Pos, c) if c.is_numeric() => c.clone(),
    (BitwiseNot, Int(v)) => Int(!*v),
    (BitwiseNot, Long(v)) => Long(!*v),
    (BitwiseNot, Char(v)) => Int(!(*v as u32 as i32)),
    _ => NotAConstant,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use OperatorName::*;

  #[test]
  fn arithmetic_stays_integral_and_widens() {
    assert_eq!(fold_binary(Addition, &Int(2), &Int(3)), Int(5));
    assert_eq!(fold_binary(Multiplication, &Int(2), &Long(3)), Long(6));
    assert_eq!(fold_binary(Division, &Int(7), &Int(2)), Int(3));
    assert_eq!(fold_binary(Division, &Double(7.0), &Int(2)), Double(3.5));
    assert_eq!(
      fold_binary(Addition, &Int(i32::MAX), &Int(1)),
      Long(i32::MAX as i64 + 1)
    );
  }

  #[test]
  fn integer_division_by_zero_is_not_a_constant() {
    assert_eq!(fold_binary(Division, &Int(1), &Int(0)), NotAConstant);
    assert_eq!(fold_binary(Remainder, &Int(1), &Int(0)), NotAConstant);
    // Float division by zero has a defined value.
    assert_eq!(
      fold_binary(Division, &Double(1.0), &Double(0.0)),
      Double(f64::INFINITY)
    );
  }

  #[test]
  fn string_concatenation_and_comparison() {
    assert_eq!(
      fold_binary(Addition, &String("a".into()), &Int(1)),
      String("a1".into())
    );
    assert_eq!(
      fold_binary(LessThan, &String("a".into()), &String("b".into())),
      Bool(true)
    );
    assert_eq!(
      fold_binary(Subtraction, &String("a".into()), &Int(1)),
      NotAConstant
    );
  }

  #[test]
  fn not_a_constant_poisons_everything() {
    assert_eq!(fold_binary(Addition, &NotAConstant, &Int(1)), NotAConstant);
    assert_eq!(fold_unary(Neg, &NotAConstant), NotAConstant);
  }

  #[test]
  fn equality_and_logic() {
    assert_eq!(fold_binary(Equality, &Int(1), &Double(1.0)), Bool(true));
    assert_eq!(fold_binary(StrictInequality, &Bool(true), &Bool(true)), Bool(false));
    assert_eq!(fold_binary(LogicalAnd, &Bool(true), &Bool(false)), Bool(false));
    assert_eq!(fold_binary(LogicalOr, &Bool(false), &Bool(true)), Bool(true));
  }

  #[test]
  fn shifts_and_bitwise() {
    assert_eq!(fold_binary(BitwiseLeftShift, &Int(1), &Int(4)), Int(16));
    assert_eq!(fold_binary(BitwiseAnd, &Int(6), &Int(3)), Int(2));
    assert_eq!(
      fold_binary(BitwiseUnsignedRightShift, &Int(-1), &Int(28)),
      Int(15)
    );
  }

  #[test]
  fn unary_negation_respects_overflow() {
    assert_eq!(fold_unary(Neg, &Int(5)), Int(-5));
    assert_eq!(fold_unary(Neg, &Int(i32::MIN)), NotAConstant);
    assert_eq!(fold_unary(LogicalNot, &Bool(false)), Bool(true));
  }
}
