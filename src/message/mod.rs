mod source;

pub(crate) mod semant;

pub use source::Span;

use std::fmt;

use codespan_reporting::diagnostic::Diagnostic;

/// A fatal analysis error. Checking stops at the first one.
#[derive(Debug)]
pub struct SemanticError {
    code: &'static str,
    diag: Diagnostic<usize>,
}

impl SemanticError {
    /// Start building an error anchored at `span`. The actual
    /// constructors live in [`semant`].
    #[must_use]
    pub fn at(span: Span) -> ErrorAt {
        ErrorAt { at: span }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.diag.message
    }

    pub fn into_diagnostic(self) -> Diagnostic<usize> {
        self.diag
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.diag.message)
    }
}

impl std::error::Error for SemanticError {}

/// Ties a span to the error being built.
#[derive(Debug)]
pub struct ErrorAt {
    at: Span,
}
