//! Dependency extraction
//!
//! Pure structural traversal: the environment is never consulted and nothing
//! can fail. The result is the ordered list of names an expression needs in
//! scope, as `Query` declarations to be resolved later.

use super::{Expr, Stmt};
use crate::env::Declaration;

impl Expr {
    /// Declarations this expression needs in scope to be well-formed
    pub fn dependencies(&self) -> Vec<Declaration> {
        let deps = match self {
            Expr::Literal { .. } => Vec::new(),
            // No dedup, and names bound by the lambda's own statements are not
            // filtered out: parameters are not modeled here.
            Expr::Lambda { body, .. } => body.iter().flat_map(Stmt::dependencies).collect(),
            Expr::Variable { span, name, .. } => vec![Declaration::query(span.clone(), name)],
            // The receiver's dependencies are not included. Calling a named
            // function therefore drops that name; kept as-is for compatibility.
            Expr::Call { args, .. } => args.iter().flat_map(Expr::dependencies).collect(),
        };
        tracing::trace!(node = self.id().0, count = deps.len(), "extracted dependencies");
        deps
    }
}

impl Stmt {
    pub fn dependencies(&self) -> Vec<Declaration> {
        self.exprs().flat_map(Expr::dependencies).collect()
    }
}
