use std::fmt;

use crate::message::Span;

/// A parsed program: an ordered sequence of statements.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub node: StmtNode,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtNode {
    Do(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub node: ExprNode,
    pub span: Span,
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
    If(Box<Expr>, Box<Expr>, Box<Expr>),
}

/// A function literal. The binding name, if any, comes from the
/// enclosing assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct Fdecl {
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub ret: Box<Expr>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Unop {
    Not,
    Neg,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Binop {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Neq,
    And,
    Or,
}

impl fmt::Display for Unop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            Unop::Not => "!",
            Unop::Neg => "-",
        };
        write!(f, "{symbol}")
    }
}

impl fmt::Display for Binop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            Binop::Add => "+",
            Binop::Sub => "-",
            Binop::Mul => "*",
            Binop::Div => "/",
            Binop::Mod => "%",
            Binop::Pow => "**",
            Binop::Lt => "<",
            Binop::Le => "<=",
            Binop::Gt => ">",
            Binop::Ge => ">=",
            Binop::Eq => "==",
            Binop::Neq => "!=",
            Binop::And => "&&",
            Binop::Or => "||",
        };
        write!(f, "{symbol}")
    }
}
