use crate::ast::{self, Binop, Unop};
use crate::message::semant as codes;
use crate::message::{SemanticError, Span};

use super::{analyze, Analyzer, Env, Expr, ExprNode, Stmt, StmtNode, Type};

fn sp() -> Span {
    Span::new(0, 0, 0)
}

fn ex(node: ast::ExprNode) -> ast::Expr {
    ast::Expr { node, span: sp() }
}

fn int(v: i64) -> ast::Expr {
    ex(ast::ExprNode::Int(v))
}

fn float(v: f64) -> ast::Expr {
    ex(ast::ExprNode::Float(v))
}

fn string(v: &str) -> ast::Expr {
    ex(ast::ExprNode::Str(v.to_string()))
}

fn boolean(v: bool) -> ast::Expr {
    ex(ast::ExprNode::Bool(v))
}

fn name(id: &str) -> ast::Expr {
    ex(ast::ExprNode::Name(id.to_string()))
}

fn assign(id: &str, rhs: ast::Expr) -> ast::Expr {
    ex(ast::ExprNode::Assign(id.to_string(), Box::new(rhs)))
}

fn unop(op: Unop, inner: ast::Expr) -> ast::Expr {
    ex(ast::ExprNode::Unop(op, Box::new(inner)))
}

fn binop(lhs: ast::Expr, op: Binop, rhs: ast::Expr) -> ast::Expr {
    ex(ast::ExprNode::Binop(Box::new(lhs), op, Box::new(rhs)))
}

fn call(fun: ast::Expr, args: Vec<ast::Expr>) -> ast::Expr {
    ex(ast::ExprNode::Call(Box::new(fun), args))
}

fn list(items: Vec<ast::Expr>) -> ast::Expr {
    ex(ast::ExprNode::List(items))
}

fn cond(c: ast::Expr, then: ast::Expr, otherwise: ast::Expr) -> ast::Expr {
    ex(ast::ExprNode::If(
        Box::new(c),
        Box::new(then),
        Box::new(otherwise),
    ))
}

fn lambda(params: &[&str], body: Vec<ast::Stmt>, ret: ast::Expr) -> ast::Expr {
    ex(ast::ExprNode::Fdecl(ast::Fdecl {
        params: params.iter().map(|p| p.to_string()).collect(),
        body,
        ret: Box::new(ret),
    }))
}

fn stmt(ex: ast::Expr) -> ast::Stmt {
    ast::Stmt {
        node: ast::StmtNode::Do(ex),
        span: sp(),
    }
}

/// Analyze a program built from the given statements and expect it to
/// be accepted.
fn check(stmts: Vec<ast::Stmt>) -> Vec<Stmt> {
    analyze(ast::Program { stmts }).expect("program should be accepted")
}

/// Analyze a program and expect it to be rejected.
fn check_error(stmts: Vec<ast::Stmt>) -> SemanticError {
    analyze(ast::Program { stmts }).expect_err("program should be rejected")
}

fn typed(stmt: &Stmt) -> &Expr {
    let StmtNode::Do(ex) = &stmt.node;
    ex
}

fn counter(uname: &str) -> usize {
    uname.rsplit_once('_').unwrap().1.parse().unwrap()
}

#[test]
fn literals_have_ground_types() {
    let stmts = check(vec![
        stmt(int(1)),
        stmt(float(2.5)),
        stmt(string("hi")),
        stmt(boolean(true)),
        stmt(ex(ast::ExprNode::Void)),
    ]);

    let tys: Vec<_> = stmts.iter().map(|s| typed(s).ty.clone()).collect();
    assert_eq!(
        tys,
        vec![
            Type::Num,
            Type::Num,
            Type::String,
            Type::Bool,
            Type::Void
        ]
    );
}

#[test]
fn arithmetic_yields_num() {
    let stmts = check(vec![stmt(binop(int(1), Binop::Add, int(2)))]);
    assert_eq!(typed(&stmts[0]).ty, Type::Num);

    let stmts = check(vec![stmt(binop(float(1.5), Binop::Pow, int(2)))]);
    assert_eq!(typed(&stmts[0]).ty, Type::Num);
}

#[test]
fn comparisons_yield_bool() {
    let stmts = check(vec![
        stmt(binop(int(1), Binop::Lt, int(2))),
        stmt(binop(boolean(true), Binop::And, boolean(false))),
        stmt(unop(Unop::Not, boolean(true))),
        stmt(unop(Unop::Neg, int(3))),
    ]);

    assert_eq!(typed(&stmts[0]).ty, Type::Bool);
    assert_eq!(typed(&stmts[1]).ty, Type::Bool);
    assert_eq!(typed(&stmts[2]).ty, Type::Bool);
    assert_eq!(typed(&stmts[3]).ty, Type::Num);
}

#[test]
fn equality_is_heterogeneous() {
    let stmts = check(vec![stmt(binop(int(1), Binop::Eq, string("one")))]);
    assert_eq!(typed(&stmts[0]).ty, Type::Bool);

    let stmts = check(vec![stmt(binop(boolean(true), Binop::Neq, int(0)))]);
    assert_eq!(typed(&stmts[0]).ty, Type::Bool);
}

#[test]
fn operand_type_errors() {
    let err = check_error(vec![stmt(unop(Unop::Not, int(1)))]);
    assert_eq!(err.code(), codes::UNOP_TYPE);

    let err = check_error(vec![stmt(unop(Unop::Neg, boolean(true)))]);
    assert_eq!(err.code(), codes::UNOP_TYPE);

    let err = check_error(vec![stmt(binop(int(1), Binop::Add, string("x")))]);
    assert_eq!(err.code(), codes::BINOP_TYPE);

    let err = check_error(vec![stmt(binop(int(1), Binop::Or, int(2)))]);
    assert_eq!(err.code(), codes::BINOP_TYPE);
}

#[test]
fn undefined_variables_are_rejected() {
    let err = check_error(vec![stmt(name("nope"))]);
    assert_eq!(err.code(), codes::UNDEFINED_VARIABLE);
}

#[test]
fn builtins_are_in_scope() {
    let stmts = check(vec![
        stmt(assign("n", binop(name("EUL"), Binop::Mul, int(2)))),
        stmt(name("PI")),
    ]);

    assert_eq!(typed(&stmts[0]).ty, Type::Num);

    let pi = typed(&stmts[1]);
    assert_eq!(pi.ty, Type::Num);
    match &pi.node {
        ExprNode::Name(uname) => assert!(uname.starts_with("PI_")),
        node => panic!("expected a name, got {node:?}"),
    }
}

#[test]
fn assignment_binds_and_renames() {
    let stmts = check(vec![
        stmt(assign("x", int(1))),
        stmt(assign("x", string("s"))),
        stmt(name("x")),
    ]);

    let first = match &typed(&stmts[0]).node {
        ExprNode::Assign(uname, _) => uname.clone(),
        node => panic!("expected an assignment, got {node:?}"),
    };
    let second = match &typed(&stmts[1]).node {
        ExprNode::Assign(uname, _) => uname.clone(),
        node => panic!("expected an assignment, got {node:?}"),
    };

    assert!(first.starts_with("x_"));
    assert!(second.starts_with("x_"));
    assert_ne!(first, second);
    assert!(counter(&first) < counter(&second));

    // The later binding shadows the earlier one.
    assert_eq!(typed(&stmts[2]).ty, Type::String);
}

#[test]
fn assigning_void_is_rejected() {
    let err = check_error(vec![stmt(assign("p", call(name("print"), vec![string("hi")])))]);
    assert_eq!(err.code(), codes::ASSIGN_TO_VOID);
}

#[test]
fn print_accepts_any_argument() {
    let stmts = check(vec![
        stmt(call(name("print"), vec![string("hi")])),
        stmt(call(name("print"), vec![int(1)])),
        stmt(call(name("print"), vec![list(vec![int(1), int(2)])])),
    ]);

    for stmt in &stmts {
        assert_eq!(typed(stmt).ty, Type::Void);
    }
}

#[test]
fn homogeneous_lists_are_accepted() {
    let stmts = check(vec![stmt(list(vec![int(1), int(2), int(3)]))]);
    assert_eq!(typed(&stmts[0]).ty, Type::list(Type::Num));
}

#[test]
fn empty_lists_stay_open() {
    let stmts = check(vec![stmt(assign("l", list(vec![])))]);
    assert_eq!(typed(&stmts[0]).ty, Type::list(Type::Unconst));
}

#[test]
fn mixed_lists_are_rejected() {
    let err = check_error(vec![stmt(assign(
        "l",
        list(vec![int(1), int(2), boolean(true)]),
    ))]);
    assert_eq!(err.code(), codes::LIST_ELEMENT);
}

#[test]
fn list_elements_constrain_open_parameters() {
    let stmts = check(vec![stmt(assign(
        "f",
        lambda(&["x"], vec![], list(vec![name("x"), int(1)])),
    ))]);

    assert_eq!(
        typed(&stmts[0]).ty,
        Type::func(vec![Type::Num], Type::list(Type::Num))
    );
}

#[test]
fn conditionals_need_boolean_conditions() {
    let stmts = check(vec![stmt(cond(boolean(true), int(1), int(2)))]);
    assert_eq!(typed(&stmts[0]).ty, Type::Num);

    let err = check_error(vec![stmt(cond(int(1), int(2), int(3)))]);
    assert_eq!(err.code(), codes::EXPECTED_BOOL);
}

#[test]
fn conditional_branches_meet() {
    // An open branch gives in to the constrained one.
    let stmts = check(vec![stmt(assign(
        "f",
        lambda(&["x"], vec![], cond(boolean(true), name("x"), int(5))),
    ))]);

    assert_eq!(
        typed(&stmts[0]).ty,
        Type::func(vec![Type::Num], Type::Num)
    );
}

#[test]
fn conditions_constrain_open_parameters() {
    let stmts = check(vec![stmt(assign(
        "f",
        lambda(&["x"], vec![], cond(name("x"), int(1), int(2))),
    ))]);

    assert_eq!(
        typed(&stmts[0]).ty,
        Type::func(vec![Type::Bool], Type::Num)
    );
}

#[test]
fn fully_open_conditionals_are_rejected() {
    let err = check_error(vec![stmt(assign(
        "f",
        lambda(&["a"], vec![], cond(boolean(true), name("a"), name("a"))),
    ))]);
    assert_eq!(err.code(), codes::UNCONSTRAINED_IF);
}

#[test]
fn disagreeing_branches_are_rejected() {
    let err = check_error(vec![stmt(assign(
        "f",
        lambda(&["x"], vec![], cond(name("x"), int(1), string("two"))),
    ))]);
    assert_eq!(err.code(), codes::IF_BRANCH_MISMATCH);
}

#[test]
fn calling_a_non_function_is_rejected() {
    let err = check_error(vec![stmt(call(name("EUL"), vec![int(1)]))]);
    assert_eq!(err.code(), codes::CALL_NON_FUNCTION);
}

#[test]
fn arity_mismatches_are_rejected() {
    let err = check_error(vec![stmt(call(name("print"), vec![]))]);
    assert_eq!(err.code(), codes::CALL_ARITY);
}

#[test]
fn argument_type_mismatches_are_rejected() {
    let err = check_error(vec![
        stmt(assign(
            "f",
            lambda(&["x"], vec![], binop(name("x"), Binop::Add, int(1))),
        )),
        stmt(call(name("f"), vec![boolean(true)])),
    ]);
    assert_eq!(err.code(), codes::CALL_ARG_TYPE);
}

#[test]
fn body_constraints_flow_into_parameters() {
    // do foo = (x) -> do y = x + 1 return y
    let stmts = check(vec![stmt(assign(
        "foo",
        lambda(
            &["x"],
            vec![stmt(assign("y", binop(name("x"), Binop::Add, int(1))))],
            name("y"),
        ),
    ))]);

    let foo = typed(&stmts[0]);
    assert_eq!(foo.ty, Type::func(vec![Type::Num], Type::Num));

    match &foo.node {
        ExprNode::Fdecl(fdecl) => {
            assert!(fdecl.uname.starts_with("foo_"));
            assert!(fdecl.params[0].starts_with("x_"));
            assert!(!fdecl.is_anon);
        }
        node => panic!("expected a function declaration, got {node:?}"),
    }
}

#[test]
fn unused_parameters_leave_the_return_unconstrained() {
    // do id = (x) -> return x
    let err = check_error(vec![stmt(assign("id", lambda(&["x"], vec![], name("x"))))]);
    assert_eq!(err.code(), codes::UNCONSTRAINED_RETURN);
}

#[test]
fn open_list_returns_are_rejected() {
    let err = check_error(vec![stmt(assign("f", lambda(&["x"], vec![], list(vec![]))))]);
    assert_eq!(err.code(), codes::UNCONSTRAINED_RETURN);
}

#[test]
fn nested_open_returns_are_rejected() {
    // do f = () -> return [[]]
    let err = check_error(vec![stmt(assign(
        "f",
        lambda(&[], vec![], list(vec![list(vec![])])),
    ))]);
    assert_eq!(err.code(), codes::UNCONSTRAINED_RETURN);
}

#[test]
fn recursion_resolves_through_preregistration() {
    // do g = (x) -> return g(x) + 1
    let stmts = check(vec![stmt(assign(
        "g",
        lambda(
            &["x"],
            vec![],
            binop(call(name("g"), vec![name("x")]), Binop::Add, int(1)),
        ),
    ))]);

    assert_eq!(
        typed(&stmts[0]).ty,
        Type::func(vec![Type::Num], Type::Num)
    );
}

#[test]
fn recursive_returns_must_settle() {
    // do f = (x) -> return f(x)
    let err = check_error(vec![stmt(assign(
        "f",
        lambda(&["x"], vec![], call(name("f"), vec![name("x")])),
    ))]);
    assert_eq!(err.code(), codes::UNCONSTRAINED_RETURN);
}

#[test]
fn recursive_use_conflicts_are_rejected() {
    // do g = (x) -> do q = x && true return g(1)
    let err = check_error(vec![stmt(assign(
        "g",
        lambda(
            &["x"],
            vec![stmt(assign(
                "q",
                binop(name("x"), Binop::And, boolean(true)),
            ))],
            call(name("g"), vec![int(1)]),
        ),
    ))]);
    assert_eq!(err.code(), codes::RECURSIVE_TYPE);
}

#[test]
fn in_progress_functions_cannot_be_redefined() {
    // do f = (x) -> do f = (y) -> return y + 1 return x + 1
    let err = check_error(vec![stmt(assign(
        "f",
        lambda(
            &["x"],
            vec![stmt(assign(
                "f",
                lambda(&["y"], vec![], binop(name("y"), Binop::Add, int(1))),
            ))],
            binop(name("x"), Binop::Add, int(1)),
        ),
    ))]);
    assert_eq!(err.code(), codes::FDECL_REASSIGN);
}

#[test]
fn finished_functions_can_be_shadowed() {
    let double = |param: &str| {
        lambda(
            &[param],
            vec![],
            binop(name(param), Binop::Mul, int(2)),
        )
    };

    let stmts = check(vec![
        stmt(assign("f", double("x"))),
        stmt(assign("f", double("y"))),
    ]);
    assert_eq!(stmts.len(), 2);
}

#[test]
fn anonymous_functions_are_named_anon() {
    let stmts = check(vec![stmt(lambda(
        &["x"],
        vec![],
        binop(name("x"), Binop::Add, int(1)),
    ))]);

    let anon = typed(&stmts[0]);
    assert_eq!(anon.ty, Type::func(vec![Type::Num], Type::Num));

    match &anon.node {
        ExprNode::Fdecl(fdecl) => {
            assert!(fdecl.uname.starts_with("anon_"));
            assert!(fdecl.is_anon);
        }
        node => panic!("expected a function declaration, got {node:?}"),
    }
}

#[test]
fn anonymous_functions_can_be_called_in_place() {
    let stmts = check(vec![stmt(call(
        lambda(&["x"], vec![], binop(name("x"), Binop::Mul, int(2))),
        vec![int(4)],
    ))]);
    assert_eq!(typed(&stmts[0]).ty, Type::Num);
}

#[test]
fn function_parameters_can_be_functions() {
    // do apply = (f) -> return f(1) + 2
    let stmts = check(vec![stmt(assign(
        "apply",
        lambda(
            &["f"],
            vec![],
            binop(call(name("f"), vec![int(1)]), Binop::Add, int(2)),
        ),
    ))]);

    assert_eq!(
        typed(&stmts[0]).ty,
        Type::func(
            vec![Type::func(vec![Type::Num], Type::Num)],
            Type::Num
        )
    );
}

#[test]
fn late_constraints_reach_earlier_uses() {
    // do f = (x) -> do y = x return x + 1
    //
    // The body's use of `x` is emitted before `x` is known to be a
    // number; the finished tree still shows it as one.
    let stmts = check(vec![stmt(assign(
        "f",
        lambda(
            &["x"],
            vec![stmt(assign("y", name("x")))],
            binop(name("x"), Binop::Add, int(1)),
        ),
    ))]);

    let f = typed(&stmts[0]);
    assert_eq!(f.ty, Type::func(vec![Type::Num], Type::Num));

    let body = match &f.node {
        ExprNode::Fdecl(fdecl) => &fdecl.body,
        node => panic!("expected a function declaration, got {node:?}"),
    };
    let rhs = match &typed(&body[0]).node {
        ExprNode::Assign(_, rhs) => rhs,
        node => panic!("expected an assignment, got {node:?}"),
    };
    assert_eq!(rhs.ty, Type::Num);
}

#[test]
fn minted_names_stay_unique_and_ordered() {
    let stmts = check(vec![
        stmt(assign("a", int(1))),
        stmt(assign("b", int(2))),
        stmt(assign("a", int(3))),
    ]);

    let unames: Vec<_> = stmts
        .iter()
        .map(|s| match &typed(s).node {
            ExprNode::Assign(uname, _) => uname.clone(),
            node => panic!("expected an assignment, got {node:?}"),
        })
        .collect();

    assert_eq!(unames.len(), 3);
    assert!(counter(&unames[0]) < counter(&unames[1]));
    assert!(counter(&unames[1]) < counter(&unames[2]));
}

#[test]
fn constraining_a_settled_type_conflicts() {
    let analyzer = Analyzer::new();
    let env = Env::default();

    let te = Expr {
        node: ExprNode::Bool(true),
        span: sp(),
        ty: Type::Bool,
    };
    let err = analyzer.constrain(&env, te, Type::Num).unwrap_err();
    assert_eq!(err.code(), codes::CONSTRAIN_CONFLICT);
}
