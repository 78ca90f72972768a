//! Expression printing with precedence-derived parenthesization.

use syntax_js::ast::expr::ArrAllocExpr;
use syntax_js::ast::expr::BinaryExpr;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::type_expr::TypeExpr;
use syntax_js::operator::OperatorName;

use crate::emitter::Emitter;
use crate::js_stmt::emit_func_tail;
use crate::precedence::child_min_prec;
use crate::precedence::expr_prec;
use crate::precedence::needs_parens;
use crate::precedence::Prec;
use crate::precedence::Side;
use crate::precedence::ASSIGNMENT_PRECEDENCE;
use crate::precedence::CALL_MEMBER_PRECEDENCE;
use crate::precedence::CONDITIONAL_PRECEDENCE;
use crate::precedence::POSTFIX_PRECEDENCE;
use crate::precedence::UNARY_PRECEDENCE;

/// Emits `node`, parenthesizing it if its own precedence is looser than
/// `min_prec`. `depth` is the current pretty-printing indentation, needed by
/// function expression bodies.
pub(crate) fn emit_expr(em: &mut Emitter, depth: usize, node: &Node<Expr>, min_prec: Prec) {
  let parens = needs_parens(expr_prec(node), min_prec);
  if parens {
    em.write_punct("(");
  }
  match node.stx.as_ref() {
    Expr::ArrAlloc(alloc) => emit_arr_alloc(em, depth, alloc),
    Expr::Binary(binary) => emit_binary(em, depth, binary),
    Expr::Call(call) => {
      emit_expr(em, depth, &call.stx.callee, CALL_MEMBER_PRECEDENCE);
      em.write_punct("(");
      emit_arguments(em, depth, &call.stx.arguments);
      em.write_punct(")");
    }
    Expr::ComputedMember(member) => {
      emit_expr(em, depth, &member.stx.object, CALL_MEMBER_PRECEDENCE);
      em.write_punct("[");
      emit_expr(em, depth, &member.stx.member, Prec::LOWEST);
      em.write_punct("]");
    }
    Expr::Cond(cond) => {
      emit_expr(em, depth, &cond.stx.test, CONDITIONAL_PRECEDENCE.tighter());
      em.write_pad();
      em.write_punct("?");
      em.write_pad();
      emit_expr(em, depth, &cond.stx.consequent, ASSIGNMENT_PRECEDENCE);
      em.write_pad();
      em.write_punct(":");
      em.write_pad();
      emit_expr(em, depth, &cond.stx.alternate, ASSIGNMENT_PRECEDENCE);
    }
    Expr::Func(func) => {
      em.write_keyword("function");
      if let Some(name) = &func.stx.name {
        em.write_identifier(name);
      }
      emit_func_tail(em, depth, &func.stx.func);
    }
    Expr::Id(id) => em.write_identifier(&id.stx.name),
    Expr::Member(member) => {
      // A dot straight after a number literal lexes into the number.
      let guard = matches!(
        member.stx.left.stx.as_ref(),
        Expr::LitNum(num) if !num.stx.parenthesized
      );
      if guard {
        em.write_punct("(");
      }
      emit_expr(em, depth, &member.stx.left, CALL_MEMBER_PRECEDENCE);
      if guard {
        em.write_punct(")");
      }
      em.write_punct(".");
      em.write_identifier(&member.stx.right);
    }
    Expr::Unary(unary) => {
      let op = unary.stx.operator;
      match op {
        OperatorName::Typeof | OperatorName::Void | OperatorName::Delete => {
          em.write_keyword(op.symbol())
        }
        _ => em.write_punct(op.symbol()),
      }
      emit_expr(em, depth, &unary.stx.argument, UNARY_PRECEDENCE);
    }
    Expr::UnaryPostfix(unary) => {
      emit_expr(em, depth, &unary.stx.argument, POSTFIX_PRECEDENCE);
      em.write_punct(unary.stx.operator.symbol());
    }
    Expr::LitArr(arr) => {
      em.write_punct("[");
      emit_arguments(em, depth, &arr.stx.elements);
      em.write_punct("]");
    }
    Expr::LitBool(lit) => em.write_keyword(if lit.stx.value { "true" } else { "false" }),
    Expr::LitNull(_) => em.write_keyword("null"),
    Expr::LitNum(lit) => {
      // Parenthesization is significant for `2147483648`, so reprint it.
      if lit.stx.parenthesized {
        em.write_punct("(");
        em.write_number(&lit.stx.raw);
        em.write_punct(")");
      } else {
        em.write_number(&lit.stx.raw);
      }
    }
    Expr::LitRegex(lit) => em.write_str(&lit.stx.value),
    Expr::LitStr(lit) => {
      let quoted = quote_string(&lit.stx.value);
      em.write_str(&quoted);
    }
    Expr::LitUndefined(_) => em.write_keyword("undefined"),
  }
  if parens {
    em.write_punct(")");
  }
}

fn emit_binary(em: &mut Emitter, depth: usize, node: &Node<BinaryExpr>) {
  let op = node.stx.operator;
  emit_expr(em, depth, &node.stx.left, child_min_prec(op, Side::Left));
  match op {
    OperatorName::Comma => {
      em.write_comma();
      em.write_pad();
    }
    OperatorName::In | OperatorName::Instanceof => {
      em.write_pad();
      em.write_keyword(op.symbol());
      em.write_pad();
    }
    _ => {
      em.write_pad();
      em.write_punct(op.symbol());
      em.write_pad();
    }
  }
  emit_expr(em, depth, &node.stx.right, child_min_prec(op, Side::Right));
}

fn emit_arr_alloc(em: &mut Emitter, depth: usize, node: &Node<ArrAllocExpr>) {
  em.write_keyword("new");
  let type_expr = &node.stx.type_expr.stx;
  em.write_identifier(&type_expr.dotted_name());
  for dim in &node.stx.dims {
    em.write_punct("[");
    if let Some(size) = dim {
      emit_expr(em, depth, size, Prec::LOWEST);
    }
    em.write_punct("]");
  }
  // The annotation may carry more dimensions than the dims list sizes.
  for _ in node.stx.dims.len()..type_expr.array_dims {
    em.write_punct("[");
    em.write_punct("]");
  }
  if let Some(initializer) = &node.stx.initializer {
    em.write_punct("{");
    emit_arguments(em, depth, &initializer.stx.elements);
    em.write_punct("}");
  }
}

/// Emits a comma-separated expression list. Elements sit above the comma
/// operator so a comma expression element gets parenthesized.
pub(crate) fn emit_arguments(em: &mut Emitter, depth: usize, arguments: &[Node<Expr>]) {
  em.write_list(
    arguments,
    |em| {
      em.write_comma();
      em.write_pad();
    },
    |em, argument| emit_expr(em, depth, argument, ASSIGNMENT_PRECEDENCE),
  );
}

/// Emits a type annotation: a dotted name plus `[]` per array dimension.
pub(crate) fn emit_type(em: &mut Emitter, type_expr: &TypeExpr) {
  em.write_identifier(&type_expr.dotted_name());
  for _ in 0..type_expr.array_dims {
    em.write_punct("[");
    em.write_punct("]");
  }
}

fn quote_string(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for ch in value.chars() {
    match ch {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      ch if (ch as u32) < 0x20 => {
        out.push_str(&format!("\\u{:04x}", ch as u32));
      }
      ch => out.push(ch),
    }
  }
  out.push('"');
  out
}
