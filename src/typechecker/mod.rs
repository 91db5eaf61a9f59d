//! Type resolution for expressions
//!
//! Single pass, no inference: each node's type is either fixed by the node
//! itself or looked up directly through the environment. A failure is pushed
//! to the caller's `DiagnosticBag` and returned; enclosing nodes propagate it
//! unchanged and never substitute a default type.

mod error;

pub use error::ResolveError;

use crate::ast::Expr;
use crate::config::CheckConfig;
use crate::diagnostics::DiagnosticBag;
use crate::env::Environment;
use crate::types::Type;

/// Record `error` in `diagnostics` and return it
fn fail<T>(diagnostics: &mut DiagnosticBag, error: ResolveError) -> Result<T, ResolveError> {
    diagnostics.push(error.to_diagnostic());
    Err(error)
}

impl Expr {
    /// Compute the static type of this expression
    pub fn expression_type(
        &self,
        env: &Environment,
        diagnostics: &mut DiagnosticBag,
    ) -> Result<Type, ResolveError> {
        match self {
            Expr::Literal { literal, .. } => Ok(literal.ty()),

            // Needs the lambda's parameter declarations, which are not modeled.
            Expr::Lambda { span, .. } => fail(
                diagnostics,
                ResolveError::Unsupported {
                    feature: "inferring the type of a lambda",
                    span: span.clone(),
                },
            ),

            Expr::Variable {
                span, scope, name, ..
            } => {
                let Some(scope) = scope else {
                    return fail(
                        diagnostics,
                        ResolveError::UnresolvedName {
                            name: name.clone(),
                            span: span.clone(),
                            found: None,
                            unbound: true,
                        },
                    );
                };

                let declaration = env.find_declaration_by_name(*scope, name);
                tracing::debug!(
                    name = name.as_str(),
                    %scope,
                    found = declaration.map(|d| d.kind_name()),
                    "name lookup"
                );

                match declaration {
                    Some(declaration) => match declaration.as_variable() {
                        Some(ty) => Ok(ty.clone()),
                        None => fail(
                            diagnostics,
                            ResolveError::UnresolvedName {
                                name: name.clone(),
                                span: span.clone(),
                                found: Some(declaration.kind_name()),
                                unbound: false,
                            },
                        ),
                    },
                    None => fail(
                        diagnostics,
                        ResolveError::UnresolvedName {
                            name: name.clone(),
                            span: span.clone(),
                            found: None,
                            unbound: false,
                        },
                    ),
                }
            }

            Expr::Call { span, receiver, .. } => {
                let receiver_type = receiver.expression_type(env, diagnostics)?;
                tracing::debug!(receiver = %receiver_type, "call resolution");

                match receiver_type.return_type() {
                    Some(ret) => Ok(ret.clone()),
                    None => fail(
                        diagnostics,
                        ResolveError::NotCallable {
                            found: receiver_type,
                            span: span.clone(),
                        },
                    ),
                }
            }
        }
    }
}

/// Resolves expression types for one compilation unit
pub struct TypeChecker<'env> {
    env: &'env Environment,
    /// Diagnostics collected during checking
    diagnostics: DiagnosticBag,
    /// Stop at the first failure instead of collecting all of them
    fail_fast: bool,
}

impl<'env> TypeChecker<'env> {
    pub fn new(env: &'env Environment) -> Self {
        Self {
            env,
            diagnostics: DiagnosticBag::new(),
            fail_fast: false,
        }
    }

    pub fn with_config(env: &'env Environment, config: &CheckConfig) -> Self {
        Self {
            fail_fast: config.fail_fast,
            ..Self::new(env)
        }
    }

    /// Resolve a single expression
    pub fn expr_type(&mut self, expr: &Expr) -> Result<Type, ResolveError> {
        expr.expression_type(self.env, &mut self.diagnostics)
    }

    /// Resolve every expression in order.
    ///
    /// With `fail_fast` the result stops after the first failure, otherwise
    /// there is one entry per expression.
    pub fn resolve_all(&mut self, exprs: &[Expr]) -> Vec<Result<Type, ResolveError>> {
        let mut results = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let result = self.expr_type(expr);
            let failed = result.is_err();
            results.push(result);
            if failed && self.fail_fast {
                tracing::debug!(
                    resolved = results.len(),
                    total = exprs.len(),
                    "stopping at first failure"
                );
                break;
            }
        }
        results
    }

    /// Resolve every expression, returning all types or the collected diagnostics
    pub fn check_exprs(&mut self, exprs: &[Expr]) -> Result<Vec<Type>, DiagnosticBag> {
        let results = self.resolve_all(exprs);
        if results.iter().any(Result::is_err) {
            return Err(self.diagnostics.clone());
        }
        Ok(results.into_iter().flatten().collect())
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticBag {
        self.diagnostics
    }
}
