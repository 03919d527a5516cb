use super::{meet, Analyzer, Env, Expr, ExprNode, Type};
use crate::ast;
use crate::message::{SemanticError, Span};

impl Analyzer {
    pub(super) fn call(
        &mut self,
        env: Env,
        span: Span,
        callee: ast::Expr,
        args: Vec<ast::Expr>,
    ) -> Result<(Env, Expr), SemanticError> {
        let recheck = match &callee.node {
            ast::ExprNode::Name(_) => Some(callee.clone()),
            _ => None,
        };

        let (env, mut fun) = self.expr(env, callee)?;

        if fun.ty.is_unconst() {
            // An unconstrained callee must at least be some function of
            // this arity.
            let assumed = Type::Func {
                params: vec![Type::Unconst; args.len()],
                ret: Box::new(Type::Unconst),
            };
            fun = self.constrain(&env, fun, assumed)?;
        }

        let (params, ret) = match fun.ty.clone() {
            Type::Func { params, ret } => (params, *ret),
            ty => return Err(SemanticError::at(fun.span).call_non_function(ty.to_string())),
        };

        if args.len() != params.len() {
            return Err(SemanticError::at(span).call_arity(params.len(), args.len()));
        }

        let mut env = env;
        let mut refined = Vec::with_capacity(params.len());
        let mut checked = Vec::with_capacity(params.len());
        let mut narrowed = false;
        for (arg, formal) in args.into_iter().zip(params.iter()) {
            let (next, mut arg) = self.expr(env, arg)?;
            env = next;

            if arg.ty == *formal || *formal == Type::Any {
                arg.ty = formal.clone();
                refined.push(formal.clone());
            } else {
                let met = match meet(&arg.ty, formal) {
                    Some(met) => met,
                    None => {
                        return Err(SemanticError::at(arg.span)
                            .call_arg_type(formal.to_string(), arg.ty.to_string()))
                    }
                };
                if arg.ty != met {
                    arg = self.constrain(&env, arg, met.clone())?;
                }
                if met != *formal {
                    narrowed = true;
                }
                refined.push(met);
            }

            checked.push(arg);
        }

        // Anything learned from the arguments flows back into the
        // callee's stored signature.
        if narrowed {
            let signature = Type::Func {
                params: refined,
                ret: Box::new(ret.clone()),
            };
            match &fun.node {
                ExprNode::Name(uname) => {
                    env.update_type(uname, signature);
                }
                ExprNode::Fdecl(fdecl) => {
                    env.update_type(&fdecl.uname, signature);
                }
                _ => {}
            }
        }

        // An identifier callee may have picked up refinements while the
        // arguments were checked; look it up once more so the emitted
        // node carries them.
        let fun = match recheck {
            Some(source) => {
                let (next, fun) = self.expr(env, source)?;
                env = next;
                fun
            }
            None => fun,
        };

        Ok((
            env,
            Expr {
                node: ExprNode::Call(Box::new(fun), checked),
                span,
                ty: ret,
            },
        ))
    }
}
