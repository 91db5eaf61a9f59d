//! Resolution errors

use crate::diagnostics::{error_codes, Diagnostic, Note, Span};
use crate::types::Type;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Why an expression's type could not be resolved
///
/// Every error is recorded as a `Diagnostic` before it is returned.
#[derive(Debug, Clone, PartialEq, Error, MietteDiagnostic)]
pub enum ResolveError {
    /// The name has no declaration, or resolves to something other than a variable
    #[error("cannot resolve `{name}` to a variable declaration")]
    #[diagnostic(code(E1002))]
    UnresolvedName {
        name: String,
        span: Span,
        /// Kind of the non-variable declaration the name resolved to
        found: Option<&'static str>,
        /// The node was never bound to a scope
        unbound: bool,
    },

    #[error("the function call receiver should be a lambda, found `{found}`")]
    #[diagnostic(code(E1013))]
    NotCallable { found: Type, span: Span },

    /// Recognised but not implemented yet; not a semantic error in the input
    #[error("{feature} is not supported yet")]
    #[diagnostic(code(E1900))]
    Unsupported { feature: &'static str, span: Span },
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::UnresolvedName { .. } => error_codes::types::UNRESOLVED_NAME,
            ResolveError::NotCallable { .. } => error_codes::types::NOT_CALLABLE,
            ResolveError::Unsupported { .. } => error_codes::unsupported::NOT_IMPLEMENTED,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            ResolveError::UnresolvedName { span, .. }
            | ResolveError::NotCallable { span, .. }
            | ResolveError::Unsupported { span, .. } => span,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, ResolveError::Unsupported { .. })
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut builder = Diagnostic::error(self.code())
            .message(self.to_string())
            .span(self.span().clone());

        match self {
            ResolveError::UnresolvedName {
                name,
                found: Some(kind),
                ..
            } => {
                builder = builder.note(Note::new(format!("`{}` is declared as a {}", name, kind)));
            }
            ResolveError::UnresolvedName { unbound: true, .. } => {
                builder = builder.note(Note::new("expression was never bound to a scope"));
            }
            ResolveError::UnresolvedName { name, .. } => {
                builder = builder.note(Note::new(format!("no declaration of `{}` is in scope", name)));
            }
            ResolveError::NotCallable { .. } => {
                builder = builder.note(Note::new("only values of a lambda type can be called"));
            }
            ResolveError::Unsupported { .. } => {}
        }

        builder.build()
    }
}
