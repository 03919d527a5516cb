use log::trace;

use super::{generalize, meet, Analyzer, Env, Expr, ExprNode, Fdecl, Type};
use crate::ast;
use crate::message::{SemanticError, Span};

impl Analyzer {
    /// Check a function declaration bound to `name` (or `"anon"` for a
    /// bare function literal). The name is registered with a fully
    /// unconstrained signature before the body is entered, which is
    /// what makes direct recursion resolve.
    pub(super) fn fdecl(
        &mut self,
        env: Env,
        span: Span,
        name: &str,
        fdecl: ast::Fdecl,
        is_anon: bool,
    ) -> Result<(Env, Expr), SemanticError> {
        trace!("checking function declaration '{name}'");

        if let Some(var) = env.lookup_scope(name) {
            if let Type::Func { ret, .. } = &var.borrow().ty {
                if ret.is_unconst() {
                    return Err(SemanticError::at(span).fdecl_reassign(name));
                }
            }
        }

        let pre = Type::Func {
            params: vec![Type::Unconst; fdecl.params.len()],
            ret: Box::new(Type::Unconst),
        };
        let (env, uname) = env.add_to_scope(&mut self.names, name, pre);
        let fvar = env.lookup(name).unwrap(); // just inserted

        let mut local = env.clone();
        let mut param_unames = Vec::with_capacity(fdecl.params.len());
        let mut param_vars = Vec::with_capacity(fdecl.params.len());
        for param in &fdecl.params {
            let (next, puname) = local.add_to_param(&mut self.names, param);
            local = next;
            param_vars.push(local.lookup(param).unwrap()); // just inserted
            param_unames.push(puname);
        }

        let mut body = Vec::with_capacity(fdecl.body.len());
        for stmt in fdecl.body {
            let (next, stmt) = self.stmt(local, stmt)?;
            local = next;
            body.push(stmt);
        }

        // First pass over the return expression, purely for its side
        // effects on the parameter and signature slots.
        self.expr(local.clone(), (*fdecl.ret).clone())?;

        // Square each formal's body-inferred type with whatever the
        // recursive call sites put into the registered signature, then
        // generalize whatever is still open.
        for (index, pvar) in param_vars.iter().enumerate() {
            let registered = match fvar.borrow().ty.clone() {
                Type::Func { params, .. } => params[index].clone(),
                // The scope entry only ever holds a function signature
                // while the body is in flight.
                _ => Type::Unconst,
            };
            let current = pvar.borrow().ty.clone();

            let squared = match meet(&current, &registered) {
                Some(ty) => generalize(ty),
                None => {
                    return Err(SemanticError::at(span).recursive_type_mismatch(
                        &fdecl.params[index],
                        current.to_string(),
                        registered.to_string(),
                    ))
                }
            };
            if squared != current {
                pvar.borrow_mut().ty = squared;
            }
        }

        // Second pass, now that the parameters are pinned down.
        let (_, ret) = self.expr(local, *fdecl.ret)?;

        if ret.ty == Type::Any || ret.ty.contains_unconst() {
            return Err(SemanticError::at(ret.span).unconstrained_return(ret.ty.to_string()));
        }

        let signature = Type::Func {
            params: param_vars
                .iter()
                .map(|var| var.borrow().ty.clone())
                .collect(),
            ret: Box::new(ret.ty.clone()),
        };

        // Publish through the ordinary constraining path; the synthetic
        // node starts out open so the constraint always lands.
        let declared = Expr {
            node: ExprNode::Fdecl(Fdecl {
                uname,
                params: param_unames,
                body,
                ret: Box::new(ret),
                is_anon,
            }),
            span,
            ty: Type::Unconst,
        };
        let declared = self.constrain(&env, declared, signature)?;

        Ok((env, declared))
    }
}
