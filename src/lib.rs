//! bCC semantic layer
//!
//! Types, scoped declarations and expression nodes of the bCC compiler, with
//! the two analyses run over them: dependency extraction and static type
//! resolution.

pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod env;
pub mod typechecker;
pub mod types;
pub mod unit;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ast::{Expr, LiteralValue, NodeId, Stmt};
    pub use crate::diagnostics::{Diagnostic, DiagnosticBag, Severity, Span};
    pub use crate::env::{Declaration, DeclarationKind, Environment, ScopeId};
    pub use crate::typechecker::{ResolveError, TypeChecker};
    pub use crate::types::Type;
    pub use crate::unit::{BoundUnit, CompilationUnit};
}
