use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codespan_reporting::term::{self, Config};
use simple_logger::SimpleLogger;

use odds::ast::{Binop, Expr, ExprNode, Fdecl, Program, Stmt, StmtNode};
use odds::message::Span;

fn main() {
    SimpleLogger::new().init().unwrap();

    let src = "do half = (x) -> do h = x / 2 return h\ndo print(half(PI))\n";

    let mut files = SimpleFiles::new();
    let file = files.add("main.odds".to_string(), src.to_string());

    match odds::analyze(demo_program(file, src)) {
        Ok(stmts) => println!("{stmts:#?}"),
        Err(error) => {
            let writer = StandardStream::stderr(ColorChoice::Auto);
            let config = Config::default();
            term::emit(
                &mut writer.lock(),
                &config,
                &files,
                &error.into_diagnostic(),
            )
            .unwrap();
        }
    }
}

/// The AST the parser would produce for `src`, spans included.
fn demo_program(file: usize, src: &str) -> Program {
    let span = |pat: &str, len: usize| {
        let start = src.find(pat).expect("demo pattern");
        Span::new(file, start, start + len)
    };
    let at = |pat: &str| span(pat, pat.len());

    // do half = (x) -> do h = x / 2 return h
    let halved = Expr {
        node: ExprNode::Binop(
            Box::new(Expr {
                node: ExprNode::Name("x".to_string()),
                span: span("x / 2", 1),
            }),
            Binop::Div,
            Box::new(Expr {
                node: ExprNode::Int(2),
                span: span("2 return", 1),
            }),
        ),
        span: at("x / 2"),
    };
    let body = vec![Stmt {
        node: StmtNode::Do(Expr {
            node: ExprNode::Assign("h".to_string(), Box::new(halved)),
            span: at("h = x / 2"),
        }),
        span: at("do h = x / 2"),
    }];
    let function = Expr {
        node: ExprNode::Fdecl(Fdecl {
            params: vec!["x".to_string()],
            body,
            ret: Box::new(Expr {
                node: ExprNode::Name("h".to_string()),
                span: span("h\ndo", 1),
            }),
        }),
        span: at("(x) -> do h = x / 2 return h"),
    };
    let declare = Stmt {
        node: StmtNode::Do(Expr {
            node: ExprNode::Assign("half".to_string(), Box::new(function)),
            span: at("half = (x) -> do h = x / 2 return h"),
        }),
        span: at("do half = (x) -> do h = x / 2 return h"),
    };

    // do print(half(PI))
    let halved_pi = Expr {
        node: ExprNode::Call(
            Box::new(Expr {
                node: ExprNode::Name("half".to_string()),
                span: span("half(PI)", 4),
            }),
            vec![Expr {
                node: ExprNode::Name("PI".to_string()),
                span: at("PI"),
            }],
        ),
        span: at("half(PI)"),
    };
    let printed = Stmt {
        node: StmtNode::Do(Expr {
            node: ExprNode::Call(
                Box::new(Expr {
                    node: ExprNode::Name("print".to_string()),
                    span: at("print"),
                }),
                vec![halved_pi],
            ),
            span: at("print(half(PI))"),
        }),
        span: at("do print(half(PI))"),
    };

    Program {
        stmts: vec![declare, printed],
    }
}
