use crate::ast::{Binop, Unop};
use crate::message::Span;

use super::types::Type;

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub node: StmtNode,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtNode {
    Do(Expr),
}

/// A checked expression. Every node carries its resolved type, and
/// every identifier is the minted, globally unique spelling.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub node: ExprNode,
    pub span: Span,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprNode {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Void,

    Name(String),
    Unop(Unop, Box<Expr>),
    Binop(Box<Expr>, Binop, Box<Expr>),
    Assign(String, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    List(Vec<Expr>),
    Fdecl(Fdecl),
    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

/// A finished function declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Fdecl {
    pub uname: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub ret: Box<Expr>,
    pub is_anon: bool,
}
