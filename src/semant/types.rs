use std::fmt;

/// The Odds type language. `Unconst` is a checking-time placeholder and
/// must not survive into externally visible positions; `Any` is the top
/// type used by builtins and by formals that never picked up a
/// constraint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Type {
    Num,
    String,
    Bool,
    Void,
    List(Box<Type>),
    Func { params: Vec<Type>, ret: Box<Type> },
    Any,
    Unconst,
}

impl Type {
    pub fn func(params: Vec<Type>, ret: Type) -> Self {
        Type::Func {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn is_unconst(&self) -> bool {
        matches!(self, Type::Unconst)
    }

    /// Whether an `Unconst` hides anywhere inside this type.
    pub fn contains_unconst(&self) -> bool {
        match self {
            Type::Unconst => true,
            Type::List(elem) => elem.contains_unconst(),
            Type::Func { params, ret } => {
                params.iter().any(Type::contains_unconst) || ret.contains_unconst()
            }
            _ => false,
        }
    }
}

/// Compute the most constrained type compatible with both sides, or
/// `None` when they contradict each other. `Unconst` gives way to
/// anything; function types meet element-wise.
pub fn meet(t1: &Type, t2: &Type) -> Option<Type> {
    match (t1, t2) {
        (Type::Unconst, ty) | (ty, Type::Unconst) => Some(ty.clone()),

        (
            Type::Func {
                params: p1,
                ret: r1,
            },
            Type::Func {
                params: p2,
                ret: r2,
            },
        ) => {
            if p1.len() != p2.len() {
                return None;
            }

            let params = p1
                .iter()
                .zip(p2)
                .map(|(a, b)| meet(a, b))
                .collect::<Option<Vec<_>>>()?;
            let ret = meet(r1, r2)?;

            Some(Type::Func {
                params,
                ret: Box::new(ret),
            })
        }

        (t1, t2) if t1 == t2 => Some(t1.clone()),

        _ => None,
    }
}

/// Replace every `Unconst` with `Any`. Closing a function declaration
/// applies this to formals the body never constrained.
pub fn generalize(ty: Type) -> Type {
    match ty {
        Type::Unconst => Type::Any,
        Type::List(elem) => Type::List(Box::new(generalize(*elem))),
        Type::Func { params, ret } => Type::Func {
            params: params.into_iter().map(generalize).collect(),
            ret: Box::new(generalize(*ret)),
        },
        ty => ty,
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Num => write!(f, "Num"),
            Type::String => write!(f, "String"),
            Type::Bool => write!(f, "Bool"),
            Type::Void => write!(f, "Void"),
            Type::Any => write!(f, "Any"),
            Type::Unconst => write!(f, "?"),
            Type::List(elem) => write!(f, "[{elem}]"),
            Type::Func { params, ret } => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {ret}")
            }
        }
    }
}
