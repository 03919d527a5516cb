pub mod tree;

mod call;
mod constrain;
mod env;
mod expr;
mod fdecl;
mod finalize;
mod names;
mod types;

#[cfg(test)]
mod tests;

pub use env::{Env, Var, VarRef};
pub use names::Names;
pub use tree::{Expr, ExprNode, Fdecl, Stmt, StmtNode};
pub use types::{generalize, meet, Type};

use log::{info, trace};

use crate::ast;
use crate::message::SemanticError;

/// Resolve and type a parsed program. Returns the alpha-renamed, typed
/// statements, or the first semantic error encountered.
pub fn analyze(program: ast::Program) -> Result<Vec<Stmt>, SemanticError> {
    info!("analyzing program with {} statements", program.stmts.len());

    let mut analyzer = Analyzer::new();
    let mut env = Env::root(&mut analyzer.names);

    let mut stmts = Vec::with_capacity(program.stmts.len());
    for stmt in program.stmts {
        let (next, stmt) = analyzer.stmt(env, stmt)?;
        env = next;
        stmts.push(stmt);
    }

    let stmts = analyzer.finalize(stmts);

    trace!("done analyzing");

    Ok(stmts)
}

#[derive(Debug, Default)]
struct Analyzer {
    names: Names,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            names: Names::new(),
        }
    }

    pub fn stmt(&mut self, env: Env, stmt: ast::Stmt) -> Result<(Env, Stmt), SemanticError> {
        match stmt.node {
            ast::StmtNode::Do(ex) => {
                let (env, ex) = self.expr(env, ex)?;
                Ok((
                    env,
                    Stmt {
                        node: StmtNode::Do(ex),
                        span: stmt.span,
                    },
                ))
            }
        }
    }
}
