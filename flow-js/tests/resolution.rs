//! Resolution-level diagnostics: names, types, operators, literals, and
//! switch case checking.

use diagnostics::FileId;
use diagnostics::Severity;
use flow_js::analyze_program;
use flow_js::ProgramAnalysis;
use flow_js::TopLevelMode;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::type_expr::TypeExpr;
use syntax_js::build::*;
use syntax_js::operator::OperatorName::*;

fn analyze(body: Vec<Node<Stmt>>) -> ProgramAnalysis {
  let mut top = top_level(body);
  analyze_program(&mut top, TopLevelMode::Global, FileId(0))
}

fn codes(analysis: &ProgramAnalysis) -> Vec<&'static str> {
  analysis.diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn unresolved_names_are_reported_once_and_degrade_to_any() {
  let analysis = analyze(vec![expr_stmt(assign(id("ghost"), num("1")))]);
  assert_eq!(codes(&analysis), vec!["FA0009"]);
  assert!(analysis.has_errors());
}

#[test]
fn unresolved_type_annotations_degrade_to_any() {
  let analysis = analyze(vec![
    typed_let_decl("w", TypeExpr::named("Widget"), Some(num("1"))),
    // No operator complaints follow: w degraded to Any.
    expr_stmt(binary(Subtraction, id("w"), num("1"))),
  ]);
  assert_eq!(codes(&analysis), vec!["FA0009"]);
}

#[test]
fn arithmetic_on_a_string_typed_local_is_invalid() {
  let analysis = analyze(vec![
    typed_let_decl("s", TypeExpr::named("String"), Some(str_lit("a"))),
    expr_stmt(binary(Subtraction, id("s"), num("1"))),
  ]);
  assert_eq!(codes(&analysis), vec!["FA0007"]);

  // String concatenation is fine.
  let analysis = analyze(vec![
    typed_let_decl("s", TypeExpr::named("String"), Some(str_lit("a"))),
    expr_stmt(binary(Addition, id("s"), num("1"))),
  ]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn unary_sign_requires_a_numeric_operand() {
  let analysis = analyze(vec![
    typed_let_decl("s", TypeExpr::named("String"), Some(str_lit("a"))),
    expr_stmt(unary(Neg, id("s"))),
  ]);
  assert_eq!(codes(&analysis), vec!["FA0007"]);
}

#[test]
fn malformed_numeric_literals_are_reported() {
  let analysis = analyze(vec![expr_stmt(num("0x"))]);
  assert_eq!(codes(&analysis), vec!["FA0008"]);

  let analysis = analyze(vec![expr_stmt(num("1.2.3"))]);
  assert_eq!(codes(&analysis), vec!["FA0008"]);
}

#[test]
fn assignment_to_a_non_reference_is_reported() {
  let analysis = analyze(vec![expr_stmt(assign(num("1"), num("2")))]);
  assert_eq!(codes(&analysis), vec!["FA0010"]);
}

#[test]
fn duplicate_default_cases_are_reported_once() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![switch_stmt(
    id("c"),
    vec![
      default_branch(vec![]),
      default_branch(vec![]),
      default_branch(vec![]),
    ],
  )])]);
  assert_eq!(codes(&analysis), vec!["FA0005"]);
}

#[test]
fn case_type_mismatches_do_not_stop_sibling_cases() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    typed_let_decl("n", TypeExpr::named("Number"), Some(num("1"))),
    switch_stmt(id("n"), vec![
      case_branch(str_lit("a"), vec![break_stmt(None)]),
      case_branch(bool_lit(true), vec![break_stmt(None)]),
      case_branch(num("2"), vec![break_stmt(None)]),
    ]),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0006", "FA0006"]);
}

#[test]
fn array_dimensions_must_be_numeric() {
  let analysis = analyze(vec![expr_stmt(arr_alloc(
    "Number",
    vec![Some(str_lit("a")), Some(num("2")), None],
    None,
  ))]);
  assert_eq!(codes(&analysis), vec!["FA0007"]);
}

#[test]
fn trailing_unsized_dimensions_are_unchecked() {
  let analysis = analyze(vec![expr_stmt(arr_alloc(
    "Number",
    vec![Some(num("2")), None, None],
    None,
  ))]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn diagnostics_come_out_sorted_and_labeled() {
  let analysis = analyze(vec![
    expr_stmt(id("ghost")),
    expr_stmt(num("0x")),
  ]);
  // All synthetic nodes share a span, so order falls back to code.
  assert_eq!(codes(&analysis), vec!["FA0008", "FA0009"]);
  for diagnostic in &analysis.diagnostics {
    assert_eq!(diagnostic.severity, Severity::Error);
  }
}
