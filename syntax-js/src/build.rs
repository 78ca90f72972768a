//! Ergonomic constructors for programmatically built trees.
//!
//! Front-ends embedding the analyzer, and tests, assemble trees with these
//! instead of spelling out every `Node::new`. All nodes carry the empty
//! location `Loc(0, 0)`; set `loc` afterwards where a real range is known.

use crate::ast::expr::lit::*;
use crate::ast::expr::*;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::stmt::decl::*;
use crate::ast::stmt::*;
use crate::ast::stx::TopLevel;
use crate::ast::type_expr::TypeExpr;
use crate::loc::Loc;
use crate::operator::OperatorName;

pub const SYNTHETIC: Loc = Loc(0, 0);

fn node<S: derive_visitor::Drive + derive_visitor::DriveMut>(stx: S) -> Node<S> {
  Node::new(SYNTHETIC, stx)
}

// Expressions.

pub fn id(name: impl Into<String>) -> Node<Expr> {
  node(Expr::Id(node(IdExpr { name: name.into() })))
}

pub fn num(raw: impl Into<String>) -> Node<Expr> {
  node(Expr::LitNum(node(LitNumExpr {
    raw: raw.into(),
    parenthesized: false,
  })))
}

pub fn num_parenthesized(raw: impl Into<String>) -> Node<Expr> {
  node(Expr::LitNum(node(LitNumExpr {
    raw: raw.into(),
    parenthesized: true,
  })))
}

pub fn str_lit(value: impl Into<String>) -> Node<Expr> {
  node(Expr::LitStr(node(LitStrExpr {
    value: value.into(),
  })))
}

pub fn bool_lit(value: bool) -> Node<Expr> {
  node(Expr::LitBool(node(LitBoolExpr { value })))
}

pub fn null_lit() -> Node<Expr> {
  node(Expr::LitNull(node(LitNullExpr {})))
}

pub fn undefined_lit() -> Node<Expr> {
  node(Expr::LitUndefined(node(LitUndefinedExpr {})))
}

pub fn arr_lit(elements: Vec<Node<Expr>>) -> Node<Expr> {
  node(Expr::LitArr(node(LitArrExpr { elements })))
}

pub fn binary(operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  node(Expr::Binary(node(BinaryExpr {
    operator,
    left,
    right,
  })))
}

pub fn assign(target: Node<Expr>, value: Node<Expr>) -> Node<Expr> {
  binary(OperatorName::Assignment, target, value)
}

pub fn unary(operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
  node(Expr::Unary(node(UnaryExpr { operator, argument })))
}

pub fn unary_postfix(operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
  node(Expr::UnaryPostfix(node(UnaryPostfixExpr {
    operator,
    argument,
  })))
}

pub fn not(argument: Node<Expr>) -> Node<Expr> {
  unary(OperatorName::LogicalNot, argument)
}

pub fn typeof_(argument: Node<Expr>) -> Node<Expr> {
  unary(OperatorName::Typeof, argument)
}

pub fn and(left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  binary(OperatorName::LogicalAnd, left, right)
}

pub fn or(left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  binary(OperatorName::LogicalOr, left, right)
}

pub fn cond(test: Node<Expr>, consequent: Node<Expr>, alternate: Node<Expr>) -> Node<Expr> {
  node(Expr::Cond(node(CondExpr {
    test,
    consequent,
    alternate,
  })))
}

pub fn call(callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  node(Expr::Call(node(CallExpr { callee, arguments })))
}

pub fn member(left: Node<Expr>, right: impl Into<String>) -> Node<Expr> {
  node(Expr::Member(node(MemberExpr {
    left,
    right: right.into(),
  })))
}

pub fn computed_member(object: Node<Expr>, member: Node<Expr>) -> Node<Expr> {
  node(Expr::ComputedMember(node(ComputedMemberExpr {
    object,
    member,
  })))
}

pub fn func_expr(name: Option<String>, parameters: Vec<&str>, body: Vec<Node<Stmt>>) -> Node<Expr> {
  node(Expr::Func(node(FuncExpr {
    name,
    func: func(parameters, body),
  })))
}

pub fn arr_alloc(
  elem_type: impl Into<String>,
  dims: Vec<Option<Node<Expr>>>,
  initializer: Option<Vec<Node<Expr>>>,
) -> Node<Expr> {
  let array_dims = dims.len();
  node(Expr::ArrAlloc(node(ArrAllocExpr {
    type_expr: node(TypeExpr::array_of(elem_type, array_dims)),
    dims,
    initializer: initializer.map(|elements| node(LitArrExpr { elements })),
  })))
}

// Statements.

pub fn top_level(body: Vec<Node<Stmt>>) -> Node<TopLevel> {
  node(TopLevel { body })
}

pub fn expr_stmt(expr: Node<Expr>) -> Node<Stmt> {
  node(Stmt::Expr(node(ExprStmt { expr })))
}

pub fn block(body: Vec<Node<Stmt>>) -> Node<Stmt> {
  node(Stmt::Block(node(BlockStmt { body })))
}

pub fn empty() -> Node<Stmt> {
  node(Stmt::Empty(node(EmptyStmt {})))
}

pub fn debugger() -> Node<Stmt> {
  node(Stmt::Debugger(node(DebuggerStmt {})))
}

pub fn if_stmt(test: Node<Expr>, consequent: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::If(node(IfStmt {
    test,
    consequent,
    alternate: None,
  })))
}

pub fn if_else(test: Node<Expr>, consequent: Node<Stmt>, alternate: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::If(node(IfStmt {
    test,
    consequent,
    alternate: Some(alternate),
  })))
}

pub fn while_stmt(condition: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::While(node(WhileStmt { condition, body })))
}

pub fn do_while(body: Node<Stmt>, condition: Node<Expr>) -> Node<Stmt> {
  node(Stmt::DoWhile(node(DoWhileStmt { body, condition })))
}

pub fn for_in(lhs: ForInLhs, rhs: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::ForIn(node(ForInStmt { lhs, rhs, body })))
}

pub fn for_in_decl(
  mode: VarDeclMode,
  name: impl Into<String>,
  rhs: Node<Expr>,
  body: Node<Stmt>,
) -> Node<Stmt> {
  for_in(
    ForInLhs::Decl(var_decl(mode, vec![declarator(name, None, None)])),
    rhs,
    body,
  )
}

pub fn label(name: impl Into<String>, statement: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::Label(node(LabelStmt {
    name: name.into(),
    statement,
  })))
}

pub fn break_stmt(label: Option<&str>) -> Node<Stmt> {
  node(Stmt::Break(node(BreakStmt {
    label: label.map(String::from),
  })))
}

pub fn continue_stmt(label: Option<&str>) -> Node<Stmt> {
  node(Stmt::Continue(node(ContinueStmt {
    label: label.map(String::from),
  })))
}

pub fn return_stmt(value: Option<Node<Expr>>) -> Node<Stmt> {
  node(Stmt::Return(node(ReturnStmt { value })))
}

pub fn throw_stmt(value: Node<Expr>) -> Node<Stmt> {
  node(Stmt::Throw(node(ThrowStmt { value })))
}

pub fn switch_stmt(test: Node<Expr>, branches: Vec<Node<SwitchBranch>>) -> Node<Stmt> {
  node(Stmt::Switch(node(SwitchStmt { test, branches })))
}

pub fn case_branch(case: Node<Expr>, body: Vec<Node<Stmt>>) -> Node<SwitchBranch> {
  node(SwitchBranch {
    case: Some(case),
    body,
  })
}

pub fn default_branch(body: Vec<Node<Stmt>>) -> Node<SwitchBranch> {
  node(SwitchBranch { case: None, body })
}

pub fn try_stmt(
  wrapped: Vec<Node<Stmt>>,
  catch: Option<Node<CatchBlock>>,
  finally: Option<Vec<Node<Stmt>>>,
) -> Node<Stmt> {
  node(Stmt::Try(node(TryStmt {
    wrapped,
    catch,
    finally: finally.map(|body| node(BlockStmt { body })),
  })))
}

pub fn catch_block(parameter: Option<&str>, body: Vec<Node<Stmt>>) -> Node<CatchBlock> {
  node(CatchBlock {
    parameter: parameter.map(|name| id_pat(name)),
    exception_type: None,
    body,
  })
}

pub fn with_stmt(object: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  node(Stmt::With(node(WithStmt { object, body })))
}

// Declarations.

pub fn id_pat(name: impl Into<String>) -> Node<IdPat> {
  node(IdPat { name: name.into() })
}

pub fn declarator(
  name: impl Into<String>,
  type_annotation: Option<Node<TypeExpr>>,
  initializer: Option<Node<Expr>>,
) -> Node<VarDeclarator> {
  node(VarDeclarator {
    name: id_pat(name),
    type_annotation,
    initializer,
  })
}

pub fn var_decl(mode: VarDeclMode, declarators: Vec<Node<VarDeclarator>>) -> Node<VarDecl> {
  node(VarDecl { mode, declarators })
}

pub fn var_decl_stmt(mode: VarDeclMode, declarators: Vec<Node<VarDeclarator>>) -> Node<Stmt> {
  node(Stmt::VarDecl(var_decl(mode, declarators)))
}

pub fn let_decl(name: impl Into<String>, initializer: Option<Node<Expr>>) -> Node<Stmt> {
  var_decl_stmt(VarDeclMode::Let, vec![declarator(name, None, initializer)])
}

pub fn const_decl(name: impl Into<String>, initializer: Node<Expr>) -> Node<Stmt> {
  var_decl_stmt(VarDeclMode::Const, vec![declarator(
    name,
    None,
    Some(initializer),
  )])
}

pub fn typed_let_decl(
  name: impl Into<String>,
  type_expr: TypeExpr,
  initializer: Option<Node<Expr>>,
) -> Node<Stmt> {
  var_decl_stmt(VarDeclMode::Let, vec![declarator(
    name,
    Some(node(type_expr)),
    initializer,
  )])
}

pub fn func(parameters: Vec<&str>, body: Vec<Node<Stmt>>) -> Node<Func> {
  node(Func {
    parameters: parameters
      .into_iter()
      .map(|name| {
        node(ParamDecl {
          name: id_pat(name),
          type_annotation: None,
        })
      })
      .collect(),
    body,
  })
}

pub fn func_decl(
  name: impl Into<String>,
  parameters: Vec<&str>,
  body: Vec<Node<Stmt>>,
) -> Node<Stmt> {
  node(Stmt::FunctionDecl(node(FuncDecl {
    name: id_pat(name),
    func: func(parameters, body),
  })))
}
