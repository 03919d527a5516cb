use super::{Analyzer, Env, Expr, ExprNode, Names, Type};
use crate::message::{SemanticError, Span};

impl Analyzer {
    /// Push a required type onto an already-checked expression. This is
    /// deliberately one level deep: identifiers, function declarations
    /// and direct calls pick up the refinement; anything else just has
    /// its carried type replaced.
    pub(super) fn constrain(
        &self,
        env: &Env,
        ex: Expr,
        want: Type,
    ) -> Result<Expr, SemanticError> {
        if !ex.ty.is_unconst() && ex.ty != want {
            return Err(SemanticError::at(ex.span)
                .constrain_conflict(ex.ty.to_string(), want.to_string()));
        }

        match &ex.node {
            ExprNode::Name(uname) => {
                if !env.update_type(uname, want.clone()) {
                    let source = Names::source_of(uname).unwrap_or(uname);
                    return Err(SemanticError::at(ex.span).undefined_variable(source));
                }
            }

            ExprNode::Fdecl(fdecl) => {
                if !env.update_type(&fdecl.uname, want.clone()) {
                    let source = Names::source_of(&fdecl.uname).unwrap_or(&fdecl.uname);
                    return Err(SemanticError::at(ex.span).undefined_variable(source));
                }
            }

            ExprNode::Call(fun, _) => {
                if let ExprNode::Name(uname) = &fun.node {
                    self.constrain_callee(env, ex.span, uname, &want)?;
                }
            }

            _ => {}
        }

        Ok(Expr { ty: want, ..ex })
    }

    /// A call being constrained means its callee's return slot is being
    /// constrained. Formals still unconstrained from pre-registration
    /// share the return slot's refinement.
    fn constrain_callee(
        &self,
        env: &Env,
        span: Span,
        uname: &str,
        want: &Type,
    ) -> Result<(), SemanticError> {
        let var = match env.find(uname) {
            Some(var) => var,
            None => return Ok(()),
        };

        let (params, ret) = match var.borrow().ty.clone() {
            Type::Func { params, ret } => (params, *ret),
            _ => return Ok(()),
        };

        if !ret.is_unconst() && ret != *want {
            return Err(
                SemanticError::at(span).constrain_conflict(ret.to_string(), want.to_string())
            );
        }

        let params = if ret.is_unconst() {
            params
                .into_iter()
                .map(|param| if param.is_unconst() { want.clone() } else { param })
                .collect()
        } else {
            params
        };

        var.borrow_mut().ty = Type::Func {
            params,
            ret: Box::new(want.clone()),
        };

        Ok(())
    }
}
