use super::{meet, Analyzer, Env, Expr, ExprNode, Type};
use crate::ast::{self, Binop, Unop};
use crate::message::SemanticError;

impl Analyzer {
    /// Check a single expression, threading the environment through.
    pub(super) fn expr(&mut self, env: Env, ex: ast::Expr) -> Result<(Env, Expr), SemanticError> {
        let span = ex.span;

        match ex.node {
            ast::ExprNode::Int(v) => Ok((
                env,
                Expr {
                    node: ExprNode::Int(v),
                    span,
                    ty: Type::Num,
                },
            )),

            ast::ExprNode::Float(v) => Ok((
                env,
                Expr {
                    node: ExprNode::Float(v),
                    span,
                    ty: Type::Num,
                },
            )),

            ast::ExprNode::Str(v) => Ok((
                env,
                Expr {
                    node: ExprNode::Str(v),
                    span,
                    ty: Type::String,
                },
            )),

            ast::ExprNode::Bool(v) => Ok((
                env,
                Expr {
                    node: ExprNode::Bool(v),
                    span,
                    ty: Type::Bool,
                },
            )),

            ast::ExprNode::Void => Ok((
                env,
                Expr {
                    node: ExprNode::Void,
                    span,
                    ty: Type::Void,
                },
            )),

            ast::ExprNode::Name(id) => {
                let var = match env.lookup(&id) {
                    Some(var) => var,
                    None => return Err(SemanticError::at(span).undefined_variable(id)),
                };
                let (uname, ty) = {
                    let var = var.borrow();
                    (var.uname.clone(), var.ty.clone())
                };

                Ok((
                    env,
                    Expr {
                        node: ExprNode::Name(uname),
                        span,
                        ty,
                    },
                ))
            }

            ast::ExprNode::Unop(op, inner) => {
                let (env, inner) = self.expr(env, *inner)?;

                let want = match op {
                    Unop::Not => Type::Bool,
                    Unop::Neg => Type::Num,
                };
                let inner = if inner.ty == want {
                    inner
                } else if inner.ty.is_unconst() {
                    self.constrain(&env, inner, want.clone())?
                } else {
                    return Err(SemanticError::at(inner.span)
                        .unop_type(op.to_string(), inner.ty.to_string()));
                };

                Ok((
                    env,
                    Expr {
                        node: ExprNode::Unop(op, Box::new(inner)),
                        span,
                        ty: want,
                    },
                ))
            }

            ast::ExprNode::Binop(lhs, op, rhs) => {
                let (env, lhs) = self.expr(env, *lhs)?;
                let (env, rhs) = self.expr(env, *rhs)?;

                let (operand, result) = match op {
                    Binop::Add | Binop::Sub | Binop::Mul | Binop::Div | Binop::Mod | Binop::Pow => {
                        (Some(Type::Num), Type::Num)
                    }
                    Binop::Lt | Binop::Le | Binop::Gt | Binop::Ge => (Some(Type::Num), Type::Bool),
                    // Equality is deliberately heterogeneous; the
                    // operands stay whatever they are.
                    Binop::Eq | Binop::Neq => (None, Type::Bool),
                    Binop::And | Binop::Or => (Some(Type::Bool), Type::Bool),
                };

                let (lhs, rhs) = match operand {
                    Some(want) => (
                        self.operand(&env, lhs, want.clone(), op)?,
                        self.operand(&env, rhs, want, op)?,
                    ),
                    None => (lhs, rhs),
                };

                Ok((
                    env,
                    Expr {
                        node: ExprNode::Binop(Box::new(lhs), op, Box::new(rhs)),
                        span,
                        ty: result,
                    },
                ))
            }

            ast::ExprNode::Assign(id, rhs) => {
                let ast::Expr {
                    node,
                    span: rhs_span,
                } = *rhs;
                match node {
                    // A named function goes through declaration checking
                    // so the body can refer to its own name.
                    ast::ExprNode::Fdecl(fdecl) => self.fdecl(env, span, &id, fdecl, false),

                    node => {
                        let rhs = ast::Expr {
                            node,
                            span: rhs_span,
                        };
                        let (env, rhs) = self.expr(env, rhs)?;

                        if rhs.ty == Type::Void {
                            return Err(SemanticError::at(span).assign_to_void(id));
                        }

                        let ty = rhs.ty.clone();
                        let (env, uname) = env.add_to_scope(&mut self.names, &id, ty.clone());

                        Ok((
                            env,
                            Expr {
                                node: ExprNode::Assign(uname, Box::new(rhs)),
                                span,
                                ty,
                            },
                        ))
                    }
                }
            }

            ast::ExprNode::List(elems) => {
                let mut env = env;
                let mut items = Vec::with_capacity(elems.len());
                for elem in elems {
                    let (next, item) = self.expr(env, elem)?;
                    env = next;
                    items.push(item);
                }

                // The first constrained element pins the element type;
                // everything else either matches it or gives in to it.
                let pinned = items
                    .iter()
                    .find(|item| !item.ty.is_unconst())
                    .map(|item| item.ty.clone());

                let (items, ty) = match pinned {
                    Some(want) => {
                        let mut constrained = Vec::with_capacity(items.len());
                        for item in items {
                            if item.ty == want {
                                constrained.push(item);
                            } else if item.ty.is_unconst() {
                                constrained.push(self.constrain(&env, item, want.clone())?);
                            } else {
                                return Err(SemanticError::at(item.span)
                                    .list_element(want.to_string(), item.ty.to_string()));
                            }
                        }
                        (constrained, Type::list(want))
                    }
                    None => (items, Type::list(Type::Unconst)),
                };

                Ok((
                    env,
                    Expr {
                        node: ExprNode::List(items),
                        span,
                        ty,
                    },
                ))
            }

            ast::ExprNode::If(cond, then, otherwise) => {
                let (env, cond) = self.expr(env, *cond)?;
                let cond = if cond.ty == Type::Bool {
                    cond
                } else if cond.ty.is_unconst() {
                    self.constrain(&env, cond, Type::Bool)?
                } else {
                    return Err(SemanticError::at(cond.span).expected_bool(cond.ty.to_string()));
                };

                let (env, then) = self.expr(env, *then)?;
                let (env, otherwise) = self.expr(env, *otherwise)?;

                if then.ty.is_unconst() && otherwise.ty.is_unconst() {
                    return Err(SemanticError::at(span).unconstrained_if());
                }
                let ty = match meet(&then.ty, &otherwise.ty) {
                    Some(ty) => ty,
                    None => {
                        return Err(SemanticError::at(span)
                            .if_branch_mismatch(then.ty.to_string(), otherwise.ty.to_string()))
                    }
                };

                let then = self.constrain(&env, then, ty.clone())?;
                let otherwise = self.constrain(&env, otherwise, ty.clone())?;

                Ok((
                    env,
                    Expr {
                        node: ExprNode::If {
                            cond: Box::new(cond),
                            then: Box::new(then),
                            otherwise: Box::new(otherwise),
                        },
                        span,
                        ty,
                    },
                ))
            }

            ast::ExprNode::Call(fun, args) => self.call(env, span, *fun, args),

            ast::ExprNode::Fdecl(fdecl) => self.fdecl(env, span, "anon", fdecl, true),
        }
    }

    /// Admit an operand of the requested type, constraining it if it is
    /// still open.
    fn operand(&self, env: &Env, ex: Expr, want: Type, op: Binop) -> Result<Expr, SemanticError> {
        if ex.ty == want {
            Ok(ex)
        } else if ex.ty.is_unconst() {
            self.constrain(env, ex, want)
        } else {
            Err(SemanticError::at(ex.span).binop_type(op.to_string(), ex.ty.to_string()))
        }
    }
}
