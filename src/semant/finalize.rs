use super::{Analyzer, Expr, ExprNode, Fdecl, Stmt, StmtNode};

impl Analyzer {
    /// Rewrite every identifier's carried type to its variable's settled
    /// type. A constraint discovered after a use becomes visible on the
    /// use itself this way.
    pub(super) fn finalize(&self, stmts: Vec<Stmt>) -> Vec<Stmt> {
        stmts
            .into_iter()
            .map(|stmt| self.finalize_stmt(stmt))
            .collect()
    }

    fn finalize_stmt(&self, stmt: Stmt) -> Stmt {
        match stmt.node {
            StmtNode::Do(ex) => Stmt {
                node: StmtNode::Do(self.finalize_expr(ex)),
                span: stmt.span,
            },
        }
    }

    fn finalize_expr(&self, ex: Expr) -> Expr {
        let Expr { node, span, ty } = ex;

        let (node, ty) = match node {
            ExprNode::Name(uname) => {
                let ty = match self.names.get(&uname) {
                    Some(var) if !var.borrow().ty.is_unconst() => var.borrow().ty.clone(),
                    _ => ty,
                };
                (ExprNode::Name(uname), ty)
            }

            ExprNode::Unop(op, inner) => (
                ExprNode::Unop(op, Box::new(self.finalize_expr(*inner))),
                ty,
            ),

            ExprNode::Binop(lhs, op, rhs) => (
                ExprNode::Binop(
                    Box::new(self.finalize_expr(*lhs)),
                    op,
                    Box::new(self.finalize_expr(*rhs)),
                ),
                ty,
            ),

            ExprNode::Assign(uname, rhs) => (
                ExprNode::Assign(uname, Box::new(self.finalize_expr(*rhs))),
                ty,
            ),

            ExprNode::Call(fun, args) => (
                ExprNode::Call(
                    Box::new(self.finalize_expr(*fun)),
                    args.into_iter()
                        .map(|arg| self.finalize_expr(arg))
                        .collect(),
                ),
                ty,
            ),

            ExprNode::List(items) => (
                ExprNode::List(
                    items
                        .into_iter()
                        .map(|item| self.finalize_expr(item))
                        .collect(),
                ),
                ty,
            ),

            ExprNode::Fdecl(fdecl) => (
                ExprNode::Fdecl(Fdecl {
                    uname: fdecl.uname,
                    params: fdecl.params,
                    body: fdecl
                        .body
                        .into_iter()
                        .map(|stmt| self.finalize_stmt(stmt))
                        .collect(),
                    ret: Box::new(self.finalize_expr(*fdecl.ret)),
                    is_anon: fdecl.is_anon,
                }),
                ty,
            ),

            ExprNode::If {
                cond,
                then,
                otherwise,
            } => (
                ExprNode::If {
                    cond: Box::new(self.finalize_expr(*cond)),
                    then: Box::new(self.finalize_expr(*then)),
                    otherwise: Box::new(self.finalize_expr(*otherwise)),
                },
                ty,
            ),

            node => (node, ty),
        };

        Expr { node, span, ty }
    }
}
