use std::cell::RefCell;
use std::rc::Rc;

use im::HashMap;

use super::names::Names;
use super::types::Type;

/// A named binding. The type slot is mutated in place as constraints
/// come in, which is what lets every environment sharing the binding
/// observe the refinement.
#[derive(Debug)]
pub struct Var {
    pub uname: String,
    pub ty: Type,
}

pub type VarRef = Rc<RefCell<Var>>;

/// The two-scope checking environment: `scope` holds ordinary bindings,
/// `params` the formals of the function body currently being checked.
/// Values are threaded checker to checker; clones share their `Var`s.
#[derive(Clone, Debug, Default)]
pub struct Env {
    scope: HashMap<String, VarRef>,
    params: HashMap<String, VarRef>,
}

impl Env {
    /// The environment every program starts in: the numeric constants
    /// and the `print` builtin.
    pub fn root(names: &mut Names) -> Env {
        let env = Env::default();
        let (env, _) = env.add_to_scope(names, "EUL", Type::Num);
        let (env, _) = env.add_to_scope(names, "PI", Type::Num);
        let (env, _) = env.add_to_scope(names, "print", Type::func(vec![Type::Any], Type::Void));
        env
    }

    /// Look `id` up in the ordinary scope first, then in the params.
    pub fn lookup(&self, id: &str) -> Option<VarRef> {
        self.scope
            .get(id)
            .or_else(|| self.params.get(id))
            .cloned()
    }

    /// The scope half only. Function pre-registration uses this to spot
    /// an in-progress declaration being clobbered.
    pub fn lookup_scope(&self, id: &str) -> Option<VarRef> {
        self.scope.get(id).cloned()
    }

    /// Bind `id` in the ordinary scope under a fresh uname. An existing
    /// binding of the same source name is shadowed. Params are left
    /// alone; `lookup` prefers scope, so the new binding wins anyway.
    pub fn add_to_scope(&self, names: &mut Names, id: &str, ty: Type) -> (Env, String) {
        let uname = names.fresh(id);
        let var = Rc::new(RefCell::new(Var {
            uname: uname.clone(),
            ty,
        }));
        names.register(var.clone());

        let env = Env {
            scope: self.scope.update(id.to_string(), var),
            params: self.params.clone(),
        };
        (env, uname)
    }

    /// Bind `id` as an unconstrained formal. The name disappears from
    /// the ordinary scope so the formal is what lookups find.
    pub fn add_to_param(&self, names: &mut Names, id: &str) -> (Env, String) {
        let uname = names.fresh(id);
        let var = Rc::new(RefCell::new(Var {
            uname: uname.clone(),
            ty: Type::Unconst,
        }));
        names.register(var.clone());

        let env = Env {
            scope: self.scope.without(id),
            params: self.params.update(id.to_string(), var),
        };
        (env, uname)
    }

    /// Find the variable a minted name refers to by recovering its
    /// source spelling. Scope wins over params, mirroring `lookup`.
    pub fn find(&self, uname: &str) -> Option<VarRef> {
        let source = Names::source_of(uname)?;
        self.lookup(source)
    }

    /// Point-fix the type of the variable behind `uname`. Returns false
    /// when no binding with that source spelling exists.
    pub fn update_type(&self, uname: &str, ty: Type) -> bool {
        match self.find(uname) {
            Some(var) => {
                var.borrow_mut().ty = ty;
                true
            }
            None => false,
        }
    }
}
