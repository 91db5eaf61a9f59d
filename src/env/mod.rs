//! Lexical environment
//!
//! Scopes live in an arena owned by `Environment` and are addressed by
//! `ScopeId`. AST nodes hold a `ScopeId`, never the scope itself, so the
//! environment outlives every expression that refers to it.

use crate::diagnostics::Span;
use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Handle to a scope in an `Environment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(pub u32);

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named binding visible in some scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    #[serde(default)]
    pub span: Span,
    pub name: String,
    #[serde(flatten)]
    pub kind: DeclarationKind,
}

/// What a declaration binds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationKind {
    /// A dependency token: "this name must be resolvable". Never registered.
    Query,
    /// A variable (functions are variables of a lambda type)
    Variable { ty: Type },
    /// A type name
    TypeName { ty: Type },
}

impl Declaration {
    /// Build the dependency token for a name reference
    pub fn query(span: Span, name: impl Into<String>) -> Self {
        Self {
            span,
            name: name.into(),
            kind: DeclarationKind::Query,
        }
    }

    pub fn variable(span: Span, name: impl Into<String>, ty: Type) -> Self {
        Self {
            span,
            name: name.into(),
            kind: DeclarationKind::Variable { ty },
        }
    }

    pub fn type_name(span: Span, name: impl Into<String>, ty: Type) -> Self {
        Self {
            span,
            name: name.into(),
            kind: DeclarationKind::TypeName { ty },
        }
    }

    /// The declared type if this is a variable declaration
    pub fn as_variable(&self) -> Option<&Type> {
        match &self.kind {
            DeclarationKind::Variable { ty } => Some(ty),
            _ => None,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self.kind, DeclarationKind::Query)
    }

    /// Human-readable kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            DeclarationKind::Query => "unresolved reference",
            DeclarationKind::Variable { .. } => "variable",
            DeclarationKind::TypeName { .. } => "type name",
        }
    }
}

/// Errors raised while populating an environment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScopeError {
    #[error("scope {0} does not exist")]
    UnknownScope(ScopeId),

    #[error("`{name}` is already declared in this scope")]
    Duplicate {
        name: String,
        span: Span,
        previous: Span,
    },

    #[error("`{0}` is a dependency token and cannot be declared")]
    QueryDeclaration(String),
}

#[derive(Debug, Clone, Default)]
struct Scope {
    parent: Option<ScopeId>,
    declarations: HashMap<String, Declaration>,
}

/// Arena of lexical scopes
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an environment with a single root scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Open a child scope of `parent`
    pub fn child(&mut self, parent: ScopeId) -> Result<ScopeId, ScopeError> {
        self.scope(parent)?;
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(parent),
            declarations: HashMap::new(),
        });
        Ok(id)
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.0 as usize).and_then(|s| s.parent)
    }

    pub fn contains(&self, scope: ScopeId) -> bool {
        (scope.0 as usize) < self.scopes.len()
    }

    /// Number of scopes, root included. Never zero.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Register a declaration in `scope`
    pub fn declare(&mut self, scope: ScopeId, declaration: Declaration) -> Result<(), ScopeError> {
        if declaration.is_query() {
            return Err(ScopeError::QueryDeclaration(declaration.name));
        }
        let scope = self
            .scopes
            .get_mut(scope.0 as usize)
            .ok_or(ScopeError::UnknownScope(scope))?;
        if let Some(previous) = scope.declarations.get(&declaration.name) {
            return Err(ScopeError::Duplicate {
                name: declaration.name,
                span: declaration.span,
                previous: previous.span.clone(),
            });
        }
        scope
            .declarations
            .insert(declaration.name.clone(), declaration);
        Ok(())
    }

    /// Look up a name, innermost scope first
    pub fn find_declaration_by_name(&self, scope: ScopeId, name: &str) -> Option<&Declaration> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scopes.get(id.0 as usize)?;
            if let Some(declaration) = scope.declarations.get(name) {
                return Some(declaration);
            }
            current = scope.parent;
        }
        None
    }

    /// The declaration of `name` in a scope enclosing `scope`, if any
    pub fn shadows(&self, scope: ScopeId, name: &str) -> Option<&Declaration> {
        self.parent(scope)
            .and_then(|parent| self.find_declaration_by_name(parent, name))
    }

    fn scope(&self, id: ScopeId) -> Result<&Scope, ScopeError> {
        self.scopes
            .get(id.0 as usize)
            .ok_or(ScopeError::UnknownScope(id))
    }
}

#[cfg(test)]
mod tests;
