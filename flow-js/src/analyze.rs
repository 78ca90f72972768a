//! Definite-assignment and reachability analysis.
//!
//! The analyzer walks resolved trees carrying an [`UncondFlow`] by value,
//! forking it at branches and joining at merge points. Boolean-valued
//! subexpressions may yield a [`FlowInfo::Cond`] split so conditions can
//! contribute different facts to each branch (short-circuit operators,
//! `typeof` comparisons).
//!
//! Analysis only tracks locals of the function being analyzed; reads and
//! writes of captured outer locals and of globals pass through unchecked.

use crate::codes::ASSIGNMENT_TO_CONSTANT;
use crate::codes::DUPLICATE_LABEL;
use crate::codes::INTERNAL_ANALYSIS_FAILURE;
use crate::codes::MAY_ALREADY_BE_ASSIGNED;
use crate::codes::MAY_NOT_BE_INITIALIZED;
use crate::codes::UNDEFINED_LABEL;
use crate::codes::UNREACHABLE_CODE;
use crate::flow::context::FlowContextStack;
use crate::flow::info::merged_optimized_branches;
use crate::flow::info::FlowInfo;
use crate::flow::info::ReachMode;
use crate::flow::info::UncondFlow;
use crate::resolve::ExprFacts;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use scope_js::symbol::DeclKind;
use scope_js::symbol::Scope;
use scope_js::symbol::Symbol;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::func::Func;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::IdPat;
use syntax_js::ast::stmt::decl::VarDecl;
use syntax_js::ast::stmt::ForInLhs;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::operator::OperatorName;

/// An internal inconsistency (missing binding or resolution data) that makes
/// further analysis of the current declaration meaningless. The caller
/// reports it and skips the declaration; siblings proceed.
#[derive(Debug)]
pub struct FatalAnalysisError {
  pub detail: &'static str,
}

impl FatalAnalysisError {
  fn new(detail: &'static str) -> FatalAnalysisError {
    FatalAnalysisError { detail }
  }
}

type Flow<T> = Result<T, FatalAnalysisError>;

/// The outcome of analyzing one function body.
pub struct FunctionAnalysis {
  /// Whether execution can fall off the end of the body.
  pub completes_normally: bool,
  /// The join of all flow states at `return` statements and the fall-off-end
  /// state.
  pub inits_on_return: UncondFlow,
}

pub struct FlowAnalyzer {
  file: FileId,
  /// The hoist scope of the function being analyzed; slot indices in the
  /// bitsets are only meaningful relative to it.
  function_scope: Scope,
  ctx: FlowContextStack,
  /// Label waiting to be claimed by a directly labeled loop.
  pending_label: Option<String>,
  /// Whether the current unreachable run has already been reported. Lives on
  /// the analyzer so a run that descends into nested statement lists still
  /// counts as one run.
  unreachable_complained: bool,
  pub diagnostics: Vec<Diagnostic>,
  pub degraded: bool,
}

impl FlowAnalyzer {
  pub fn new(file: FileId, function_scope: Scope) -> FlowAnalyzer {
    FlowAnalyzer {
      file,
      function_scope,
      ctx: FlowContextStack::new(),
      pending_label: None,
      unreachable_complained: false,
      diagnostics: Vec::new(),
      degraded: false,
    }
  }

  /// Analyzes a whole program body as one implicit method.
  pub fn run_top_level(&mut self, top: &Node<TopLevel>) {
    self.ctx.push_method();
    let result = self.analyze_stmts(&top.stx.body, UncondFlow::start());
    self.ctx = FlowContextStack::new();
    if let Err(err) = result {
      self.degraded = true;
      self.diagnostics.push(INTERNAL_ANALYSIS_FAILURE.warning(
        format!("analysis failed: {}; program body skipped", err.detail),
        top.loc.span(self.file),
      ));
    }
  }

  fn facts<'a>(&self, expr: &'a Node<Expr>) -> Flow<&'a ExprFacts> {
    ExprFacts::of(expr).ok_or_else(|| FatalAnalysisError::new("expression was never resolved"))
  }

  fn optimized_boolean(&self, expr: &Node<Expr>) -> Flow<Option<bool>> {
    Ok(self.facts(expr)?.optimized_boolean)
  }

  /// The slot of an identifier use, when it names a local of the current
  /// function. Shadowed, captured, and unresolved names yield `None`.
  fn local_slot(&self, id: &Node<IdExpr>) -> Option<(Symbol, usize)> {
    let symbol = *id.assoc.get::<Symbol>()?;
    let scope = id.assoc.get::<Scope>()?;
    let (decl_scope, found) = scope.find_symbol_up_to_with_scope(&id.stx.name, |_| false)?;
    if found != symbol || decl_scope.hoist_scope() != self.function_scope {
      return None;
    }
    // The borrow must end before `decl_scope` drops at the block's tail.
    let slot = decl_scope.symbol_data(symbol).slot;
    Some((symbol, slot))
  }

  /// The slot of a declaration name, when it belongs to the current function.
  fn pat_slot(&self, pat: &Node<IdPat>) -> Option<(Symbol, usize)> {
    let symbol = *pat.assoc.get::<Symbol>()?;
    let scope = pat.assoc.get::<Scope>()?;
    let target = if scope.symbol_data(symbol).kind.hoists() {
      scope.hoist_scope()
    } else {
      scope.clone()
    };
    if target.hoist_scope() != self.function_scope {
      return None;
    }
    Some((symbol, scope.symbol_data(symbol).slot))
  }

  fn check_read(&mut self, id: &Node<IdExpr>, flow: &mut UncondFlow) {
    let Some((symbol, slot)) = self.local_slot(id) else {
      return;
    };
    // Hoisted function declarations are callable before their statement.
    if self.function_scope.symbol_data(symbol).kind == DeclKind::Function {
      return;
    }
    if flow.reach.is_reachable() && !flow.is_definitely_assigned(slot) {
      self.diagnostics.push(MAY_NOT_BE_INITIALIZED.warning(
        format!("variable {} may not have been initialized", id.stx.name),
        id.loc.span(self.file),
      ));
      // Complain once per path, not on every later read.
      flow.mark_assigned(slot);
    }
  }

  fn record_assignment(&mut self, symbol: Symbol, slot: usize, name: &str, loc: syntax_js::loc::Loc, flow: &mut UncondFlow) {
    let kind = self.function_scope.symbol_data(symbol).kind;
    if kind.is_const() && flow.reach.is_reachable() {
      if flow.is_definitely_assigned(slot) {
        self.diagnostics.push(ASSIGNMENT_TO_CONSTANT.error(
          format!("assignment to constant {}", name),
          loc.span(self.file),
        ));
      } else if flow.is_potentially_assigned(slot) {
        self.diagnostics.push(MAY_ALREADY_BE_ASSIGNED.warning(
          format!("variable {} may already have been assigned", name),
          loc.span(self.file),
        ));
      }
    }
    flow.mark_assigned(slot);
  }

  fn assign_id(&mut self, id: &Node<IdExpr>, flow: &mut UncondFlow) {
    if let Some((symbol, slot)) = self.local_slot(id) {
      self.record_assignment(symbol, slot, &id.stx.name, id.loc, flow);
    }
  }

  fn assign_pat(&mut self, pat: &Node<IdPat>, flow: &mut UncondFlow) {
    if let Some((symbol, slot)) = self.pat_slot(pat) {
      self.record_assignment(symbol, slot, &pat.stx.name, pat.loc, flow);
    }
  }

  // Statements.

  fn analyze_stmts(&mut self, stmts: &[Node<Stmt>], mut flow: UncondFlow) -> Flow<UncondFlow> {
    for stmt in stmts {
      if flow.reach.is_reachable() {
        self.unreachable_complained = false;
      } else if !self.unreachable_complained {
        // Only the first statement of a maximal unreachable run is reported,
        // even when the run descends into a nested block.
        self.diagnostics.push(
          UNREACHABLE_CODE.warning("unreachable code", stmt.loc.span(self.file)),
        );
        self.unreachable_complained = true;
      }
      flow = self.analyze_stmt(stmt, flow)?;
    }
    Ok(flow)
  }

  fn analyze_stmt(&mut self, stmt: &Node<Stmt>, flow: UncondFlow) -> Flow<UncondFlow> {
    // A label is only transferred onto a loop it directly wraps.
    if !matches!(
      &*stmt.stx,
      Stmt::While(_) | Stmt::DoWhile(_) | Stmt::ForIn(_)
    ) {
      self.pending_label = None;
    }
    match &*stmt.stx {
      Stmt::Block(block) => self.analyze_stmts(&block.stx.body, flow),
      Stmt::Empty(_) | Stmt::Debugger(_) => Ok(flow),
      Stmt::Expr(expr_stmt) => {
        Ok(self.analyze_expr(&expr_stmt.stx.expr, flow)?.unconditional_copy())
      }
      Stmt::VarDecl(decl) => self.analyze_var_decl(decl, flow),
      Stmt::FunctionDecl(decl) => {
        let mut flow = flow;
        self.assign_pat(&decl.stx.name, &mut flow);
        self.analyze_nested_function(&decl.stx.func);
        Ok(flow)
      }
      Stmt::If(stmt) => self.analyze_if(stmt, flow),
      Stmt::While(stmt) => self.analyze_while(stmt, flow),
      Stmt::DoWhile(stmt) => self.analyze_do_while(stmt, flow),
      Stmt::ForIn(stmt) => self.analyze_for_in(stmt, flow),
      Stmt::Switch(stmt) => self.analyze_switch(stmt, flow),
      Stmt::Label(stmt) => self.analyze_label(stmt, flow),
      Stmt::Break(stmt) => {
        let found = self.ctx.record_break(stmt.stx.label.as_deref(), &flow);
        if !found {
          let message = match &stmt.stx.label {
            Some(label) => format!("undefined label {}", label),
            None => "break outside of a loop or switch".to_string(),
          };
          self
            .diagnostics
            .push(UNDEFINED_LABEL.error(message, stmt.loc.span(self.file)));
        }
        Ok(dead_end_after(flow))
      }
      Stmt::Continue(stmt) => {
        let found = self.ctx.record_continue(stmt.stx.label.as_deref(), &flow);
        if !found {
          let message = match &stmt.stx.label {
            Some(label) => format!("undefined label {}", label),
            None => "continue outside of a loop".to_string(),
          };
          self
            .diagnostics
            .push(UNDEFINED_LABEL.error(message, stmt.loc.span(self.file)));
        }
        Ok(dead_end_after(flow))
      }
      Stmt::Return(stmt) => {
        let mut flow = flow;
        if let Some(value) = &stmt.stx.value {
          flow = self.analyze_expr(value, flow)?.unconditional_copy();
        }
        self.ctx.record_return(&flow);
        Ok(dead_end_after(flow))
      }
      Stmt::Throw(stmt) => {
        let flow = self.analyze_expr(&stmt.stx.value, flow)?.unconditional_copy();
        Ok(dead_end_after(flow))
      }
      Stmt::Try(stmt) => self.analyze_try(stmt, flow),
      Stmt::With(stmt) => {
        let flow = self.analyze_expr(&stmt.stx.object, flow)?.unconditional_copy();
        self.analyze_stmt(&stmt.stx.body, flow)
      }
    }
  }

  fn analyze_var_decl(&mut self, decl: &Node<VarDecl>, mut flow: UncondFlow) -> Flow<UncondFlow> {
    for declarator in &decl.stx.declarators {
      if let Some(init) = &declarator.stx.initializer {
        flow = self.analyze_expr(init, flow)?.unconditional_copy();
        self.assign_pat(&declarator.stx.name, &mut flow);
      }
    }
    Ok(flow)
  }

  fn analyze_if(&mut self, stmt: &Node<syntax_js::ast::stmt::IfStmt>, flow: UncondFlow) -> Flow<UncondFlow> {
    let cond = self.analyze_expr(&stmt.stx.test, flow)?;
    let opt = self.optimized_boolean(&stmt.stx.test)?;
    let then_out = self.analyze_stmt(&stmt.stx.consequent, cond.inits_when_true())?;
    let else_out = match &stmt.stx.alternate {
      Some(alternate) => self.analyze_stmt(alternate, cond.inits_when_false())?,
      None => cond.inits_when_false(),
    };
    // A statically decided condition removes the untaken branch from the
    // join; the fake-reachable promotion keeps code after `if (true) return;`
    // analyzable without an unreachable-code cascade.
    Ok(merged_optimized_branches(
      then_out,
      opt == Some(false),
      else_out,
      opt == Some(true),
      opt.is_some(),
    ))
  }

  fn analyze_while(&mut self, stmt: &Node<syntax_js::ast::stmt::WhileStmt>, flow: UncondFlow) -> Flow<UncondFlow> {
    let label = self.pending_label.take();
    let cond = self.analyze_expr(&stmt.stx.condition, flow)?;
    let opt = self.optimized_boolean(&stmt.stx.condition)?;
    self.ctx.push_loop(label);
    let body_out = self.analyze_stmt(&stmt.stx.body, cond.inits_when_true())?;
    let frame = self.ctx.pop();
    // The normal exit is the condition-false branch; it may come after any
    // number of iterations, so body and continue effects are potential there.
    let mut exit = cond.inits_when_false();
    exit.add_potential_initializations_from(&body_out);
    exit.add_potential_initializations_from(&frame.inits_on_continue);
    Ok(merged_optimized_branches(
      frame.inits_on_break,
      false,
      exit,
      opt == Some(true),
      false,
    ))
  }

  fn analyze_do_while(&mut self, stmt: &Node<syntax_js::ast::stmt::DoWhileStmt>, flow: UncondFlow) -> Flow<UncondFlow> {
    let label = self.pending_label.take();
    let entry_reach = flow.reach;
    self.ctx.push_loop(label);
    let body_out = self.analyze_stmt(&stmt.stx.body, flow)?;
    let frame = self.ctx.pop();
    // The condition runs after the body; a continue re-reaches it even when
    // the body itself cannot complete, in which case the reach mode resets to
    // the loop entry's.
    let mut cond_in = body_out;
    if !frame.inits_on_continue.is_dead_end() {
      cond_in = cond_in.merged_with(&frame.inits_on_continue);
      cond_in.set_reach_mode(entry_reach);
    }
    let cond = self.analyze_expr(&stmt.stx.condition, cond_in)?;
    let opt = self.optimized_boolean(&stmt.stx.condition)?;
    Ok(merged_optimized_branches(
      frame.inits_on_break,
      false,
      cond.inits_when_false(),
      opt == Some(true),
      false,
    ))
  }

  fn analyze_for_in(&mut self, stmt: &Node<syntax_js::ast::stmt::ForInStmt>, flow: UncondFlow) -> Flow<UncondFlow> {
    let label = self.pending_label.take();
    let rhs_out = self.analyze_expr(&stmt.stx.rhs, flow)?.unconditional_copy();
    self.ctx.push_loop(label);
    let mut body_in = rhs_out.clone();
    match &stmt.stx.lhs {
      ForInLhs::Id(id) => self.assign_id(id, &mut body_in),
      ForInLhs::Decl(decl) => {
        for declarator in &decl.stx.declarators {
          self.assign_pat(&declarator.stx.name, &mut body_in);
        }
      }
    }
    let body_out = self.analyze_stmt(&stmt.stx.body, body_in.clone())?;
    let frame = self.ctx.pop();
    // The loop may iterate zero times, so even the loop variable's assignment
    // is only potential on exit.
    let mut exit = rhs_out;
    exit.add_potential_initializations_from(&body_in);
    exit.add_potential_initializations_from(&body_out);
    exit.add_potential_initializations_from(&frame.inits_on_continue);
    Ok(exit.merged_with(&frame.inits_on_break))
  }

  fn analyze_switch(&mut self, stmt: &Node<syntax_js::ast::stmt::SwitchStmt>, flow: UncondFlow) -> Flow<UncondFlow> {
    let test_out = self.analyze_expr(&stmt.stx.test, flow)?.unconditional_copy();
    self.ctx.push_switch();
    let mut has_default = false;
    let mut case_flow = UncondFlow::dead_end();
    for branch in &stmt.stx.branches {
      match &branch.stx.case {
        None => has_default = true,
        Some(case) => {
          // Case expressions are constants; analyzed only for reads.
          self.analyze_expr(case, test_out.clone())?;
        }
      }
      // A branch is entered by dispatch or by falling through its
      // predecessor.
      case_flow = case_flow.merged_with(&test_out);
      case_flow = self.analyze_stmts(&branch.stx.body, case_flow)?;
    }
    let frame = self.ctx.pop();
    let mut out = case_flow.merged_with(&frame.inits_on_break);
    if !has_default {
      // Dispatch may match no case at all.
      out = out.merged_with(&test_out);
    }
    Ok(out)
  }

  fn analyze_label(&mut self, stmt: &Node<syntax_js::ast::stmt::LabelStmt>, flow: UncondFlow) -> Flow<UncondFlow> {
    let name = &stmt.stx.name;
    if self.ctx.label_in_use(name) {
      self.diagnostics.push(DUPLICATE_LABEL.error(
        format!("label {} is already in use", name),
        stmt.loc.span(self.file),
      ));
    }
    if matches!(
      &*stmt.stx.statement.stx,
      Stmt::While(_) | Stmt::DoWhile(_) | Stmt::ForIn(_)
    ) {
      // The loop's own frame claims the label, so break/continue to it both
      // resolve to the loop.
      self.pending_label = Some(name.clone());
      return self.analyze_stmt(&stmt.stx.statement, flow);
    }
    self.ctx.push_label(name.clone());
    let body_out = self.analyze_stmt(&stmt.stx.statement, flow)?;
    let frame = self.ctx.pop();
    // A break to the label resumes here even when the body itself dead-ends.
    Ok(body_out.merged_with(&frame.inits_on_break))
  }

  fn analyze_try(&mut self, stmt: &Node<syntax_js::ast::stmt::TryStmt>, flow: UncondFlow) -> Flow<UncondFlow> {
    let wrapped_out = self.analyze_stmts(&stmt.stx.wrapped, flow.clone())?;
    let mut merged = wrapped_out.clone();
    if let Some(catch) = &stmt.stx.catch {
      // An exception can interrupt the try body anywhere, so only its
      // potential assignments hold on catch entry.
      let mut catch_in = flow.clone();
      catch_in.add_potential_initializations_from(&wrapped_out);
      if let Some(parameter) = &catch.stx.parameter {
        self.assign_pat(parameter, &mut catch_in);
      }
      let catch_out = self.analyze_stmts(&catch.stx.body, catch_in)?;
      merged = merged.merged_with(&catch_out);
    }
    if let Some(finally) = &stmt.stx.finally {
      let mut finally_in = flow;
      finally_in.add_potential_initializations_from(&merged);
      let finally_out = self.analyze_stmts(&finally.stx.body, finally_in)?;
      if finally_out.reach.is_unreachable() {
        // The finally block itself never completes; nothing after the try
        // runs.
        return Ok(finally_out);
      }
      merged.add_initializations_from(&finally_out);
    }
    Ok(merged)
  }

  // Expressions.

  fn analyze_expr(&mut self, expr: &Node<Expr>, flow: UncondFlow) -> Flow<FlowInfo> {
    match &*expr.stx {
      Expr::LitBool(_)
      | Expr::LitNull(_)
      | Expr::LitNum(_)
      | Expr::LitRegex(_)
      | Expr::LitStr(_)
      | Expr::LitUndefined(_) => Ok(flow.into()),
      Expr::LitArr(lit) => {
        let mut flow = flow;
        for element in &lit.stx.elements {
          flow = self.analyze_expr(element, flow)?.unconditional_copy();
        }
        Ok(flow.into())
      }
      Expr::Id(id) => {
        let mut flow = flow;
        self.check_read(id, &mut flow);
        Ok(flow.into())
      }
      Expr::Member(member) => {
        let flow = self.analyze_expr(&member.stx.left, flow)?.unconditional_copy();
        Ok(flow.into())
      }
      Expr::ComputedMember(member) => {
        let flow = self.analyze_expr(&member.stx.object, flow)?.unconditional_copy();
        let flow = self.analyze_expr(&member.stx.member, flow)?.unconditional_copy();
        Ok(flow.into())
      }
      Expr::Call(call) => {
        let mut flow = self.analyze_expr(&call.stx.callee, flow)?.unconditional_copy();
        for argument in &call.stx.arguments {
          flow = self.analyze_expr(argument, flow)?.unconditional_copy();
        }
        Ok(flow.into())
      }
      Expr::Func(func_expr) => {
        self.analyze_nested_function(&func_expr.stx.func);
        Ok(flow.into())
      }
      Expr::ArrAlloc(alloc) => {
        let mut flow = flow;
        for dim in alloc.stx.dims.iter().flatten() {
          flow = self.analyze_expr(dim, flow)?.unconditional_copy();
        }
        if let Some(initializer) = &alloc.stx.initializer {
          for element in &initializer.stx.elements {
            flow = self.analyze_expr(element, flow)?.unconditional_copy();
          }
        }
        Ok(flow.into())
      }
      Expr::Unary(unary) => self.analyze_unary(unary, flow),
      Expr::UnaryPostfix(postfix) => self.analyze_write_target(&postfix.stx.argument, flow),
      Expr::Binary(binary) => self.analyze_binary(binary, flow),
      Expr::Cond(cond) => self.analyze_cond(cond, flow),
    }
  }

  fn analyze_unary(&mut self, node: &Node<syntax_js::ast::expr::UnaryExpr>, flow: UncondFlow) -> Flow<FlowInfo> {
    use OperatorName::*;
    let argument = &node.stx.argument;
    match node.stx.operator {
      // `typeof x` is defined for an unassigned x; the read is not checked.
      Typeof if matches!(&*argument.stx, Expr::Id(_)) => Ok(flow.into()),
      LogicalNot => Ok(self.analyze_expr(argument, flow)?.negated()),
      PrefixIncrement | PrefixDecrement => self.analyze_write_target(argument, flow),
      _ => {
        let flow = self.analyze_expr(argument, flow)?.unconditional_copy();
        Ok(flow.into())
      }
    }
  }

  /// Increment/decrement targets: a read followed by a write.
  fn analyze_write_target(&mut self, target: &Node<Expr>, flow: UncondFlow) -> Flow<FlowInfo> {
    match &*target.stx {
      Expr::Id(id) => {
        let mut flow = flow;
        self.check_read(id, &mut flow);
        self.assign_id(id, &mut flow);
        Ok(flow.into())
      }
      _ => {
        let flow = self.analyze_expr(target, flow)?.unconditional_copy();
        Ok(flow.into())
      }
    }
  }

  fn analyze_binary(&mut self, node: &Node<syntax_js::ast::expr::BinaryExpr>, flow: UncondFlow) -> Flow<FlowInfo> {
    use OperatorName::*;
    let op = node.stx.operator;
    let left = &node.stx.left;
    let right = &node.stx.right;
    if op == Assignment {
      // The right side evaluates before the write, so a self-reference there
      // is still a read of the unassigned local.
      let mut flow = self.analyze_expr(right, flow)?.unconditional_copy();
      match &*left.stx {
        Expr::Id(id) => self.assign_id(id, &mut flow),
        _ => flow = self.analyze_expr(left, flow)?.unconditional_copy(),
      }
      return Ok(flow.into());
    }
    if op.is_assignment() {
      // Compound assignment reads the target first.
      let mut flow = flow;
      match &*left.stx {
        Expr::Id(id) => {
          self.check_read(id, &mut flow);
          flow = self.analyze_expr(right, flow)?.unconditional_copy();
          self.assign_id(id, &mut flow);
        }
        _ => {
          flow = self.analyze_expr(left, flow)?.unconditional_copy();
          flow = self.analyze_expr(right, flow)?.unconditional_copy();
        }
      }
      return Ok(flow.into());
    }
    match op {
      LogicalAnd => {
        let left_info = self.analyze_expr(left, flow)?;
        if self.optimized_boolean(left)? == Some(true) {
          // The right side unconditionally evaluates; splitting on the left
          // would wrongly route its inits through a vacuous false branch.
          let right_info = self.analyze_expr(right, left_info.unconditional_copy())?;
          return Ok(FlowInfo::split(
            right_info.inits_when_true(),
            right_info.inits_when_false(),
          ));
        }
        let right_info = self.analyze_expr(right, left_info.inits_when_true())?;
        Ok(FlowInfo::split(
          right_info.inits_when_true(),
          left_info
            .inits_when_false()
            .merged_with(&right_info.inits_when_false()),
        ))
      }
      LogicalOr => {
        let left_info = self.analyze_expr(left, flow)?;
        if self.optimized_boolean(left)? == Some(false) {
          let right_info = self.analyze_expr(right, left_info.unconditional_copy())?;
          return Ok(FlowInfo::split(
            right_info.inits_when_true(),
            right_info.inits_when_false(),
          ));
        }
        let right_info = self.analyze_expr(right, left_info.inits_when_false())?;
        Ok(FlowInfo::split(
          left_info
            .inits_when_true()
            .merged_with(&right_info.inits_when_true()),
          right_info.inits_when_false(),
        ))
      }
      Equality | Inequality | StrictEquality | StrictInequality => {
        let flow = self.analyze_expr(left, flow)?.unconditional_copy();
        let flow = self.analyze_expr(right, flow)?.unconditional_copy();
        if let Some((id, literal)) = typeof_comparison(left, right) {
          let negated = matches!(op, Inequality | StrictInequality);
          return Ok(self.narrow_typeof(id, literal, negated, flow));
        }
        Ok(flow.into())
      }
      _ => {
        let flow = self.analyze_expr(left, flow)?.unconditional_copy();
        let flow = self.analyze_expr(right, flow)?.unconditional_copy();
        Ok(flow.into())
      }
    }
  }

  /// Splits flow on a `typeof x ==/!= "literal"` comparison: the branch on
  /// which the comparison proves x holds a value treats it as assigned.
  fn narrow_typeof(&self, id: &Node<IdExpr>, literal: &str, negated: bool, flow: UncondFlow) -> FlowInfo {
    let Some((_, slot)) = self.local_slot(id) else {
      return flow.into();
    };
    let mut when_true = flow.clone();
    let mut when_false = flow;
    if literal == "undefined" {
      // Equality with "undefined" proves a value on the *false* branch.
      if negated {
        when_true.mark_assigned(slot);
      } else {
        when_false.mark_assigned(slot);
      }
    } else if !negated {
      // Matching any concrete type string proves a value; failing to match
      // proves nothing.
      when_true.mark_assigned(slot);
    } else {
      return when_true.into();
    }
    FlowInfo::split(when_true, when_false)
  }

  fn analyze_cond(&mut self, node: &Node<syntax_js::ast::expr::CondExpr>, flow: UncondFlow) -> Flow<FlowInfo> {
    let test = self.analyze_expr(&node.stx.test, flow)?;
    let opt = self.optimized_boolean(&node.stx.test)?;
    let consequent = self.analyze_expr(&node.stx.consequent, test.inits_when_true())?;
    let alternate = self.analyze_expr(&node.stx.alternate, test.inits_when_false())?;
    let when_true = merged_optimized_branches(
      consequent.inits_when_true(),
      opt == Some(false),
      alternate.inits_when_true(),
      opt == Some(true),
      false,
    );
    let when_false = merged_optimized_branches(
      consequent.inits_when_false(),
      opt == Some(false),
      alternate.inits_when_false(),
      opt == Some(true),
      false,
    );
    Ok(FlowInfo::split(when_true, when_false))
  }

  // Nested functions.

  /// Analyzes a nested function in isolation: its own context stack, its own
  /// slot space, and its own degradation boundary.
  fn analyze_nested_function(&mut self, node: &Node<Func>) {
    if let Err(err) = self.analyze_function(node) {
      self.degraded = true;
      self.diagnostics.push(INTERNAL_ANALYSIS_FAILURE.warning(
        format!("analysis failed: {}; declaration skipped", err.detail),
        node.loc.span(self.file),
      ));
    }
  }

  pub fn analyze_function(&mut self, node: &Node<Func>) -> Flow<FunctionAnalysis> {
    let scope = node
      .assoc
      .get::<Scope>()
      .cloned()
      .ok_or_else(|| FatalAnalysisError::new("function has no bound scope"))?;
    let saved_scope = std::mem::replace(&mut self.function_scope, scope);
    let saved_ctx = std::mem::replace(&mut self.ctx, FlowContextStack::new());
    let saved_label = self.pending_label.take();
    // Analyzing a nested body must not interrupt the enclosing run's dedup.
    let saved_complained = std::mem::replace(&mut self.unreachable_complained, false);
    self.ctx.push_method();
    let mut entry = UncondFlow::start();
    for parameter in &node.stx.parameters {
      if let Some((_, slot)) = self.pat_slot(&parameter.stx.name) {
        entry.mark_assigned(slot);
      }
    }
    let result = self.analyze_stmts(&node.stx.body, entry).map(|body_out| {
      let frame = self.ctx.pop();
      FunctionAnalysis {
        completes_normally: body_out.reach.is_reachable(),
        inits_on_return: frame.inits_on_break.merged_with(&body_out),
      }
    });
    self.function_scope = saved_scope;
    self.ctx = saved_ctx;
    self.pending_label = saved_label;
    self.unreachable_complained = saved_complained;
    result
  }
}

fn dead_end_after(mut flow: UncondFlow) -> UncondFlow {
  flow.set_reach_mode(ReachMode::DeadEnd);
  flow
}

fn typeof_comparison<'a>(left: &'a Node<Expr>, right: &'a Node<Expr>) -> Option<(&'a Node<IdExpr>, &'a str)> {
  fn pick<'a>(a: &'a Node<Expr>, b: &'a Node<Expr>) -> Option<(&'a Node<IdExpr>, &'a str)> {
    let Expr::Unary(unary) = &*a.stx else {
      return None;
    };
    if unary.stx.operator != OperatorName::Typeof {
      return None;
    }
    let Expr::Id(id) = &*unary.stx.argument.stx else {
      return None;
    };
    let Expr::LitStr(lit) = &*b.stx else {
      return None;
    };
    Some((id, lit.stx.value.as_str()))
  }
  pick(left, right).or_else(|| pick(right, left))
}
