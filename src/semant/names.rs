use std::collections::HashMap;

use super::env::VarRef;

/// Mints globally unique names of the form `<source>_<counter>` and
/// remembers which variable each minted name backs. The counter is
/// strictly monotonic for one analysis run, so source order and uname
/// order agree.
#[derive(Debug, Default)]
pub struct Names {
    vars: HashMap<String, VarRef>,
    curr: usize,
}

impl Names {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            curr: 0,
        }
    }

    pub fn fresh(&mut self, source: &str) -> String {
        let id = self.curr;
        self.curr += 1;
        format!("{source}_{id}")
    }

    pub fn register(&mut self, var: VarRef) {
        let uname = var.borrow().uname.clone();
        // Minted names are unique, so this can never displace anything.
        assert!(self.vars.insert(uname, var).is_none());
    }

    pub fn get(&self, uname: &str) -> Option<&VarRef> {
        self.vars.get(uname)
    }

    /// Recover the source identifier a minted name was derived from:
    /// everything before the final underscore.
    pub fn source_of(uname: &str) -> Option<&str> {
        uname.rsplit_once('_').map(|(source, _)| source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_names_are_monotonic() {
        let mut names = Names::new();
        assert_eq!(names.fresh("x"), "x_0");
        assert_eq!(names.fresh("y"), "y_1");
        assert_eq!(names.fresh("x"), "x_2");
    }

    #[test]
    fn source_recovery_keeps_inner_underscores() {
        assert_eq!(Names::source_of("x_0"), Some("x"));
        assert_eq!(Names::source_of("my_var_17"), Some("my_var"));
        assert_eq!(Names::source_of("plain"), None);
    }
}
