use codespan_reporting::diagnostic::{Diagnostic, Label};

use super::{ErrorAt, SemanticError};

pub(crate) const UNDEFINED_VARIABLE: &str = "ES00";
pub(crate) const UNOP_TYPE: &str = "ES01";
pub(crate) const BINOP_TYPE: &str = "ES02";
pub(crate) const EXPECTED_BOOL: &str = "ES03";
pub(crate) const ASSIGN_TO_VOID: &str = "ES04";
pub(crate) const LIST_ELEMENT: &str = "ES05";
pub(crate) const CALL_NON_FUNCTION: &str = "ES06";
pub(crate) const CALL_ARITY: &str = "ES07";
pub(crate) const CALL_ARG_TYPE: &str = "ES08";
pub(crate) const RECURSIVE_TYPE: &str = "ES09";
pub(crate) const UNCONSTRAINED_RETURN: &str = "ES10";
pub(crate) const FDECL_REASSIGN: &str = "ES11";
pub(crate) const CONSTRAIN_CONFLICT: &str = "ES12";
pub(crate) const UNCONSTRAINED_IF: &str = "ES13";
pub(crate) const IF_BRANCH_MISMATCH: &str = "ES14";

impl ErrorAt {
    pub fn undefined_variable(self, name: impl Into<String>) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at).with_message("not in scope")];

        self.build(
            UNDEFINED_VARIABLE,
            Diagnostic::error()
                .with_message(format!("undefined variable '{}'", name.into()))
                .with_labels(labels),
        )
    }

    pub fn unop_type(self, op: impl Into<String>, found: impl Into<String>) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("this has type '{}'", found.into()))];

        self.build(
            UNOP_TYPE,
            Diagnostic::error()
                .with_message(format!("invalid operand for '{}'", op.into()))
                .with_labels(labels),
        )
    }

    pub fn binop_type(self, op: impl Into<String>, found: impl Into<String>) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("this has type '{}'", found.into()))];

        self.build(
            BINOP_TYPE,
            Diagnostic::error()
                .with_message(format!("invalid operand for '{}'", op.into()))
                .with_labels(labels),
        )
    }

    pub fn expected_bool(self, found: impl Into<String>) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("this has type '{}'", found.into()))];

        self.build(
            EXPECTED_BOOL,
            Diagnostic::error()
                .with_message("condition must be a boolean")
                .with_labels(labels),
        )
    }

    pub fn assign_to_void(self, name: impl Into<String>) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message("the right-hand side has type 'Void'")];

        self.build(
            ASSIGN_TO_VOID,
            Diagnostic::error()
                .with_message(format!("cannot bind '{}' to a void expression", name.into()))
                .with_labels(labels),
        )
    }

    pub fn list_element(
        self,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(format!(
            "expected '{}', got '{}'",
            expected.into(),
            found.into()
        ))];

        self.build(
            LIST_ELEMENT,
            Diagnostic::error()
                .with_message("list elements must all have the same type")
                .with_labels(labels),
        )
    }

    pub fn call_non_function(self, found: impl Into<String>) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("this has type '{}'", found.into()))];

        self.build(
            CALL_NON_FUNCTION,
            Diagnostic::error()
                .with_message("only functions can be called")
                .with_labels(labels),
        )
    }

    pub fn call_arity(self, expected: usize, found: usize) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(format!(
            "expected {expected} argument(s), got {found}"
        ))];

        self.build(
            CALL_ARITY,
            Diagnostic::error()
                .with_message("wrong number of arguments")
                .with_labels(labels),
        )
    }

    pub fn call_arg_type(
        self,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(format!(
            "expected '{}', got '{}'",
            expected.into(),
            found.into()
        ))];

        self.build(
            CALL_ARG_TYPE,
            Diagnostic::error()
                .with_message("argument type mismatch")
                .with_labels(labels),
        )
    }

    pub fn recursive_type_mismatch(
        self,
        param: impl Into<String>,
        body: impl Into<String>,
        declared: impl Into<String>,
    ) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)];
        let notes = vec![format!(
            "the body uses '{}' as '{}', but its recursive call sites use it as '{}'",
            param.into(),
            body.into(),
            declared.into()
        )];

        self.build(
            RECURSIVE_TYPE,
            Diagnostic::error()
                .with_message("parameter type conflicts with recursive use")
                .with_labels(labels)
                .with_notes(notes),
        )
    }

    pub fn unconstrained_return(self, found: impl Into<String>) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message(format!("the return type stayed '{}'", found.into()))];

        self.build(
            UNCONSTRAINED_RETURN,
            Diagnostic::error()
                .with_message("function return type is unconstrained")
                .with_labels(labels),
        )
    }

    pub fn fdecl_reassign(self, name: impl Into<String>) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)];

        self.build(
            FDECL_REASSIGN,
            Diagnostic::error()
                .with_message(format!(
                    "cannot redefine '{}' while its declaration is being checked",
                    name.into()
                ))
                .with_labels(labels),
        )
    }

    pub fn constrain_conflict(
        self,
        have: impl Into<String>,
        want: impl Into<String>,
    ) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(format!(
            "already has type '{}', needed as '{}'",
            have.into(),
            want.into()
        ))];

        self.build(
            CONSTRAIN_CONFLICT,
            Diagnostic::error()
                .with_message("conflicting type constraints")
                .with_labels(labels),
        )
    }

    pub fn unconstrained_if(self) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at)
            .with_message("neither branch has a known type")];

        self.build(
            UNCONSTRAINED_IF,
            Diagnostic::error()
                .with_message("conditional is unconstrained")
                .with_labels(labels),
        )
    }

    pub fn if_branch_mismatch(
        self,
        then: impl Into<String>,
        otherwise: impl Into<String>,
    ) -> SemanticError {
        let labels = vec![Label::primary(self.at.file, self.at).with_message(format!(
            "the branches have types '{}' and '{}'",
            then.into(),
            otherwise.into()
        ))];

        self.build(
            IF_BRANCH_MISMATCH,
            Diagnostic::error()
                .with_message("conditional branches disagree")
                .with_labels(labels),
        )
    }

    fn build(self, code: &'static str, diag: Diagnostic<usize>) -> SemanticError {
        SemanticError {
            code,
            diag: diag.with_code(code),
        }
    }
}
