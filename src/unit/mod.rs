//! Compilation units
//!
//! A unit is the driver-facing input of the semantic layer: its scopes, the
//! declarations registered in them, and the expressions to analyse, each
//! bound to one scope. Units are read from JSON documents such as
//!
//! ```json
//! {
//!   "declarations": [{ "name": "x", "kind": "variable", "ty": { "type": "Secondary", "name": "i32" } }],
//!   "scopes": [{ "parent": 0, "declarations": [] }],
//!   "expressions": [{ "scope": 1, "expr": { "type": "Variable", "name": "x" } }]
//! }
//! ```
//!
//! The root scope is `0`; `scopes[i]` becomes scope `i + 1` and may only name
//! an earlier scope as its parent.

use crate::ast::Expr;
use crate::config::CheckConfig;
use crate::diagnostics::{error_codes, Diagnostic, DiagnosticBag, Note, Span};
use crate::env::{Declaration, Environment, ScopeError, ScopeId};
use crate::typechecker::{ResolveError, TypeChecker};
use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A compilation unit as read from disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Source file the unit was produced from
    #[serde(default)]
    pub file: PathBuf,

    /// Source text, used to show context in diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Declarations of the root scope
    #[serde(default)]
    pub declarations: Vec<Declaration>,

    /// Nested scopes
    #[serde(default)]
    pub scopes: Vec<ScopeSpec>,

    /// Expressions to analyse
    #[serde(default)]
    pub expressions: Vec<ExprEntry>,
}

/// A nested scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeSpec {
    #[serde(default)]
    pub parent: u32,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// An expression and the scope it is evaluated in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExprEntry {
    #[serde(default)]
    pub scope: u32,
    pub expr: Expr,
}

/// Unit loading errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("could not read {path}: {message}")]
    Io { path: String, message: String },

    #[error("malformed unit: {0}")]
    Parse(String),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl UnitError {
    pub fn code(&self) -> &'static str {
        match self {
            UnitError::Io { .. } => error_codes::unit::UNREADABLE_UNIT,
            UnitError::Parse(_) => error_codes::unit::MALFORMED_UNIT,
            UnitError::Scope(ScopeError::UnknownScope(_)) => error_codes::unit::UNKNOWN_SCOPE,
            UnitError::Scope(ScopeError::Duplicate { .. }) => {
                error_codes::unit::DUPLICATE_DECLARATION
            }
            UnitError::Scope(ScopeError::QueryDeclaration(_)) => {
                error_codes::unit::QUERY_DECLARATION
            }
        }
    }

    /// Diagnostic for this error. Spans that name no file point at `file`.
    pub fn to_diagnostic(&self, file: &Path) -> Diagnostic {
        let builder = Diagnostic::error(self.code()).message(self.to_string());
        match self {
            UnitError::Scope(ScopeError::Duplicate { span, previous, .. }) => builder
                .span(span_in(span, file))
                .note(Note::new("previous declaration is here").with_span(span_in(previous, file)))
                .build(),
            _ => builder.span(Span::file(file)).build(),
        }
    }
}

fn span_in(span: &Span, file: &Path) -> Span {
    if span.file.as_os_str().is_empty() {
        Span::file(file)
    } else {
        span.clone()
    }
}

impl CompilationUnit {
    /// Read a unit from a JSON file
    pub fn load(path: &Path) -> Result<Self, UnitError> {
        let content = std::fs::read_to_string(path).map_err(|e| UnitError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    /// Parse a unit from JSON. `path` is used when the document names no file.
    pub fn parse(content: &str, path: &Path) -> Result<Self, UnitError> {
        let mut unit: CompilationUnit =
            serde_json::from_str(content).map_err(|e| UnitError::Parse(e.to_string()))?;
        if unit.file.as_os_str().is_empty() {
            unit.file = path.to_path_buf();
        }
        Ok(unit)
    }

    /// Register all declarations and bind every expression to its scope
    pub fn build(self) -> Result<BoundUnit, UnitError> {
        let mut env = Environment::new();
        let mut diagnostics = DiagnosticBag::new();

        let root = env.root();
        declare_all(&mut env, &mut diagnostics, root, self.declarations)?;
        for spec in self.scopes {
            let scope = env.child(ScopeId(spec.parent))?;
            declare_all(&mut env, &mut diagnostics, scope, spec.declarations)?;
        }

        let mut expressions = Vec::with_capacity(self.expressions.len());
        for entry in self.expressions {
            let scope = ScopeId(entry.scope);
            if !env.contains(scope) {
                return Err(ScopeError::UnknownScope(scope).into());
            }
            let mut expr = entry.expr;
            expr.bind(scope);
            expressions.push(expr);
        }

        tracing::debug!(
            file = %self.file.display(),
            scopes = env.scope_count(),
            expressions = expressions.len(),
            "built compilation unit"
        );

        Ok(BoundUnit {
            file: self.file,
            source: self.source,
            env,
            expressions,
            diagnostics,
        })
    }
}

fn declare_all(
    env: &mut Environment,
    diagnostics: &mut DiagnosticBag,
    scope: ScopeId,
    declarations: Vec<Declaration>,
) -> Result<(), UnitError> {
    for declaration in declarations {
        if let Some(outer) = env.shadows(scope, &declaration.name) {
            diagnostics.push(
                Diagnostic::warning(error_codes::warnings::SHADOWED_BINDING)
                    .message(format!(
                        "`{}` shadows a declaration in an outer scope",
                        declaration.name
                    ))
                    .span(declaration.span.clone())
                    .note(Note::new("previous declaration is here").with_span(outer.span.clone()))
                    .build(),
            );
        }
        env.declare(scope, declaration)?;
    }
    Ok(())
}

/// A unit whose environment is populated and whose expressions are bound
#[derive(Debug)]
pub struct BoundUnit {
    pub file: PathBuf,
    pub source: Option<String>,
    pub env: Environment,
    pub expressions: Vec<Expr>,
    /// Diagnostics raised while building (shadowing warnings)
    pub diagnostics: DiagnosticBag,
}

/// Outcome of checking one unit
#[derive(Debug)]
pub struct UnitReport {
    pub file: PathBuf,
    /// One entry per resolved expression; shorter than the unit with `fail_fast`
    pub results: Vec<Result<Type, ResolveError>>,
    pub diagnostics: DiagnosticBag,
}

/// JSON view of a single expression result
#[derive(Debug, Serialize)]
struct ResultJson {
    index: usize,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

impl BoundUnit {
    /// Resolve the type of every expression
    pub fn check(&self, config: &CheckConfig) -> UnitReport {
        let mut checker = TypeChecker::with_config(&self.env, config);
        let results = checker.resolve_all(&self.expressions);

        let mut diagnostics = self.diagnostics.clone();
        diagnostics.merge(checker.into_diagnostics());

        UnitReport {
            file: self.file.clone(),
            results,
            diagnostics: self.with_file(diagnostics),
        }
    }

    /// Dependency tokens of every expression, in order
    pub fn dependencies(&self) -> Vec<Vec<Declaration>> {
        self.expressions.iter().map(Expr::dependencies).collect()
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }

    /// Point spans that name no file at this unit's file
    fn with_file(&self, bag: DiagnosticBag) -> DiagnosticBag {
        let mut out = DiagnosticBag::new();
        for mut diagnostic in bag.take() {
            if diagnostic.span.file.as_os_str().is_empty() {
                diagnostic.span.file = self.file.clone();
            }
            out.push(diagnostic);
        }
        out
    }
}

impl UnitReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Format results and diagnostics as JSON
    pub fn to_json(&self) -> String {
        let results: Vec<ResultJson> = self
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(ty) => ResultJson {
                    index,
                    ty: Some(ty.to_string()),
                    error: None,
                },
                Err(e) => ResultJson {
                    index,
                    ty: None,
                    error: Some(e.code()),
                },
            })
            .collect();

        serde_json::json!({
            "file": self.file.display().to_string(),
            "results": results,
            "diagnostics": self.diagnostics.diagnostics(),
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests;
