//! End-to-end reachability and definite-assignment scenarios, built with the
//! `syntax-js` tree constructors and run through the whole pipeline.

use diagnostics::FileId;
use flow_js::analyze_program;
use flow_js::ProgramAnalysis;
use flow_js::TopLevelMode;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::Stmt;
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
fn assignment_on_all_branches_is_definite() {
  let analysis = analyze(vec![func_decl("check", vec!["c"], vec![
    let_decl("x", None),
    if_else(
      id("c"),
      expr_stmt(assign(id("x"), num("1"))),
      expr_stmt(assign(id("x"), num("2"))),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn assignment_on_one_branch_is_only_potential() {
  let analysis = analyze(vec![func_decl("check", vec!["c"], vec![
    let_decl("x", None),
    if_stmt(id("c"), expr_stmt(assign(id("x"), num("1")))),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);
}

#[test]
fn nested_branches_join_pairwise() {
  let analysis = analyze(vec![func_decl("check", vec!["a", "b"], vec![
    let_decl("x", None),
    if_else(
      id("a"),
      if_else(
        id("b"),
        expr_stmt(assign(id("x"), num("1"))),
        expr_stmt(assign(id("x"), num("2"))),
      ),
      expr_stmt(assign(id("x"), num("3"))),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn only_the_first_unreachable_statement_is_reported() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    return_stmt(None),
    expr_stmt(num("1")),
    expr_stmt(num("2")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0001"]);
}

#[test]
fn return_behind_a_statically_true_condition_keeps_the_rest_reachable() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    if_stmt(bool_lit(true), return_stmt(None)),
    expr_stmt(num("1")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn returning_on_both_branches_dead_ends() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    if_else(id("c"), return_stmt(None), return_stmt(None)),
    expr_stmt(num("1")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0001"]);
}

#[test]
fn do_loop_with_statically_taken_break_completes() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("blank", None),
    do_while(
      block(vec![if_else(
        bool_lit(true),
        break_stmt(None),
        expr_stmt(assign(id("blank"), num("0"))),
      )]),
      bool_lit(false),
    ),
    expr_stmt(assign(id("blank"), num("1"))),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn while_true_without_break_dead_ends() {
  let analysis = analyze(vec![
    while_stmt(bool_lit(true), block(vec![])),
    expr_stmt(num("1")),
  ]);
  assert_eq!(codes(&analysis), vec!["FA0001"]);
}

#[test]
fn while_true_with_break_completes() {
  let analysis = analyze(vec![
    while_stmt(bool_lit(true), block(vec![break_stmt(None)])),
    expr_stmt(num("1")),
  ]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn loop_body_assignment_is_only_potential_on_exit() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    let_decl("x", None),
    while_stmt(id("c"), block(vec![expr_stmt(assign(id("x"), num("1")))])),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);
}

#[test]
fn labeled_break_resumes_after_the_label() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    label(
      "out",
      block(vec![
        expr_stmt(assign(id("x"), num("1"))),
        break_stmt(Some("out")),
      ]),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn break_past_an_assignment_keeps_it_potential() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    let_decl("x", None),
    label(
      "out",
      block(vec![
        if_stmt(id("c"), break_stmt(Some("out"))),
        expr_stmt(assign(id("x"), num("1"))),
      ]),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);
}

#[test]
fn undefined_labels_are_reported() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![while_stmt(
    id("c"),
    block(vec![break_stmt(Some("nope"))]),
  )])]);
  assert_eq!(codes(&analysis), vec!["FA0004"]);
}

#[test]
fn break_outside_any_loop_is_reported() {
  let analysis = analyze(vec![break_stmt(None)]);
  assert_eq!(codes(&analysis), vec!["FA0004"]);
}

#[test]
fn reusing_an_enclosing_label_is_reported() {
  let analysis = analyze(vec![label(
    "a",
    block(vec![label(
      "a",
      while_stmt(bool_lit(false), block(vec![])),
    )]),
  )]);
  assert_eq!(codes(&analysis), vec!["FA0011"]);
}

#[test]
fn labeled_continue_targets_the_outer_loop() {
  let analysis = analyze(vec![func_decl("f", vec!["c", "d"], vec![label(
    "outer",
    while_stmt(
      id("c"),
      block(vec![while_stmt(
        id("d"),
        block(vec![continue_stmt(Some("outer"))]),
      )]),
    ),
  )])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn switch_assigning_on_every_branch_is_definite() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    let_decl("x", None),
    switch_stmt(id("c"), vec![
      case_branch(num("1"), vec![
        expr_stmt(assign(id("x"), num("1"))),
        break_stmt(None),
      ]),
      case_branch(num("2"), vec![
        expr_stmt(assign(id("x"), num("2"))),
        break_stmt(None),
      ]),
      default_branch(vec![expr_stmt(assign(id("x"), num("3")))]),
    ]),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn switch_without_default_may_skip_every_branch() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    let_decl("x", None),
    switch_stmt(id("c"), vec![case_branch(num("1"), vec![
      expr_stmt(assign(id("x"), num("1"))),
      break_stmt(None),
    ])]),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);
}

#[test]
fn typeof_comparison_narrows_the_proven_branch() {
  // typeof x != "undefined" proves a value on the true branch.
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    if_stmt(
      binary(Inequality, typeof_(id("x")), str_lit("undefined")),
      expr_stmt(id("x")),
    ),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());

  // typeof x == "undefined" proves a value on the false branch, and the
  // operand order does not matter.
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    if_else(
      binary(StrictEquality, str_lit("undefined"), typeof_(id("x"))),
      empty(),
      expr_stmt(id("x")),
    ),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());

  // Matching a concrete type string proves a value on the true branch.
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    if_stmt(
      binary(Equality, typeof_(id("x")), str_lit("number")),
      expr_stmt(id("x")),
    ),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());

  // Failing to match a concrete type string proves nothing.
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    if_stmt(
      binary(Inequality, typeof_(id("x")), str_lit("number")),
      expr_stmt(id("x")),
    ),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);
}

#[test]
fn short_circuit_assignment_is_conditional() {
  // An assignment on the right of && holds only where the whole condition
  // was true.
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    let_decl("x", None),
    if_stmt(
      and(id("c"), assign(id("x"), num("1"))),
      expr_stmt(id("x")),
    ),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());

  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    let_decl("x", None),
    expr_stmt(and(id("c"), assign(id("x"), num("1")))),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);
}

#[test]
fn statically_true_left_operand_makes_the_right_unconditional() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    if_stmt(and(bool_lit(true), assign(id("x"), num("1"))), empty()),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn const_reassignment_is_an_error() {
  let analysis = analyze(vec![
    const_decl("k", num("1")),
    expr_stmt(assign(id("k"), num("2"))),
  ]);
  assert_eq!(codes(&analysis), vec!["FA0010"]);
}

#[test]
fn potentially_assigned_const_warns() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    var_decl_stmt(VarDeclMode::Const, vec![declarator("k", None, None)]),
    if_stmt(id("c"), expr_stmt(assign(id("k"), num("1")))),
    expr_stmt(assign(id("k"), num("2"))),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0003"]);
}

#[test]
fn for_in_may_iterate_zero_times() {
  let analysis = analyze(vec![func_decl("f", vec!["o"], vec![
    for_in_decl(VarDeclMode::Var, "x", id("o"), block(vec![])),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);

  // Inside the body the loop variable is always assigned.
  let analysis = analyze(vec![func_decl("f", vec!["o"], vec![for_in_decl(
    VarDeclMode::Var,
    "x",
    id("o"),
    block(vec![expr_stmt(id("x"))]),
  )])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn catch_path_must_also_assign() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    try_stmt(
      vec![expr_stmt(assign(id("x"), num("1")))],
      Some(catch_block(Some("e"), vec![expr_stmt(assign(id("x"), num("2")))])),
      None,
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());

  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    try_stmt(
      vec![expr_stmt(assign(id("x"), num("1")))],
      Some(catch_block(Some("e"), vec![])),
      None,
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);
}

#[test]
fn finally_assignments_are_definite() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    try_stmt(
      vec![],
      Some(catch_block(Some("e"), vec![])),
      Some(vec![expr_stmt(assign(id("x"), num("1")))]),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn nested_functions_have_isolated_locals() {
  let analysis = analyze(vec![
    let_decl("x", None),
    func_decl("inner", vec![], vec![
      let_decl("y", None),
      expr_stmt(id("y")),
    ]),
    expr_stmt(assign(id("x"), num("1"))),
  ]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);

  // Reads of captured outer locals are not tracked.
  let analysis = analyze(vec![
    let_decl("x", None),
    func_decl("inner", vec![], vec![expr_stmt(id("x"))]),
  ]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn min_value_literal_only_folds_when_directly_negated() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    if_stmt(
      binary(LessThan, unary(Neg, num("2147483648")), num("0")),
      expr_stmt(assign(id("x"), num("1"))),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());

  // A parenthesized magnitude is no longer a direct negation, so the
  // condition is not statically decided and the branch stays conditional.
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    if_stmt(
      binary(LessThan, unary(Neg, num_parenthesized("2147483648")), num("0")),
      expr_stmt(assign(id("x"), num("1"))),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0002"]);
}

#[test]
fn folded_hex_comparison_eliminates_the_untaken_branch() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    if_else(
      binary(GreaterThan, num("0x10"), num("15")),
      expr_stmt(assign(id("x"), num("1"))),
      empty(),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn analysis_of_an_unresolved_tree_degrades_instead_of_panicking() {
  use flow_js::analyze::FlowAnalyzer;
  use scope_js::symbol::{Scope, ScopeType};

  // Run the analyzer directly, skipping binding and resolution, so the
  // condition has no resolved facts.
  let top = top_level(vec![if_stmt(bool_lit(true), empty())]);
  let mut analyzer = FlowAnalyzer::new(FileId(0), Scope::new_root(ScopeType::Global));
  analyzer.run_top_level(&top);
  assert!(analyzer.degraded);
  assert_eq!(
    analyzer.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
    vec!["FA0013"]
  );
}

#[test]
fn reads_in_unreachable_code_are_not_checked() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    let_decl("x", None),
    return_stmt(None),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0001"]);
}

#[test]
fn disjunction_with_a_true_side_decides_the_condition() {
  // `c || true` is statically true without being a constant: the loop never
  // exits through its condition, so the statement after it is unreachable.
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    while_stmt(or(id("c"), bool_lit(true)), block(vec![])),
    expr_stmt(num("1")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0001"]);
}

#[test]
fn conjunction_with_a_false_side_eliminates_the_then_branch() {
  // `c && false` is statically false, so only the else branch joins and its
  // assignment is definite.
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    let_decl("x", None),
    if_else(
      and(id("c"), bool_lit(false)),
      empty(),
      expr_stmt(assign(id("x"), num("1"))),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn negation_inverts_a_short_circuit_outcome() {
  // `!(c && false)` is statically true, so the then branch always runs.
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    let_decl("x", None),
    if_stmt(
      not(and(id("c"), bool_lit(false))),
      expr_stmt(assign(id("x"), num("1"))),
    ),
    expr_stmt(id("x")),
  ])]);
  assert_eq!(codes(&analysis), Vec::<&str>::new());
}

#[test]
fn unreachable_run_spanning_a_nested_block_is_reported_once() {
  let analysis = analyze(vec![func_decl("f", vec![], vec![
    return_stmt(None),
    block(vec![expr_stmt(num("1")), expr_stmt(num("2"))]),
    expr_stmt(num("3")),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0001"]);
}

#[test]
fn separate_unreachable_runs_are_each_reported() {
  let analysis = analyze(vec![func_decl("f", vec!["c"], vec![
    if_else(
      id("c"),
      block(vec![return_stmt(None), expr_stmt(num("1"))]),
      block(vec![return_stmt(None), expr_stmt(num("2"))]),
    ),
  ])]);
  assert_eq!(codes(&analysis), vec!["FA0001", "FA0001"]);
}
