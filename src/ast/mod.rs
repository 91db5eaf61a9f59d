//! Expression and statement nodes
//!
//! All nodes include:
//! - Unique node ID
//! - Source span
//! - The scope they were bound to (expressions only, assigned once)

mod deps;

use crate::diagnostics::Span;
use crate::env::ScopeId;
use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Bit length of an integer literal when none is given
pub const DEFAULT_INT_LENGTH: u32 = 32;

fn default_int_length() -> u32 {
    DEFAULT_INT_LENGTH
}

/// Unique identifier for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Generate a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// The value of a literal expression, which fixes its type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LiteralValue {
    /// Integer literal, kept as source text. Parsing to a sized value happens later.
    Int {
        value: String,
        signed: bool,
        #[serde(default = "default_int_length")]
        length: u32,
    },
    /// Any other literal with an explicitly given type
    Typed { value: String, ty: Type },
}

impl LiteralValue {
    pub fn ty(&self) -> Type {
        match self {
            LiteralValue::Int { signed, length, .. } => Type::int(*signed, *length),
            LiteralValue::Typed { ty, .. } => ty.clone(),
        }
    }

    /// Source text of the literal
    pub fn text(&self) -> &str {
        match self {
            LiteralValue::Int { value, .. } | LiteralValue::Typed { value, .. } => value,
        }
    }
}

/// Expression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Literal {
        #[serde(default)]
        id: NodeId,
        #[serde(default)]
        span: Span,
        #[serde(skip)]
        scope: Option<ScopeId>,
        literal: LiteralValue,
    },
    /// Anonymous function value
    Lambda {
        #[serde(default)]
        id: NodeId,
        #[serde(default)]
        span: Span,
        #[serde(skip)]
        scope: Option<ScopeId>,
        body: Vec<Stmt>,
    },
    /// Bare name reference
    Variable {
        #[serde(default)]
        id: NodeId,
        #[serde(default)]
        span: Span,
        #[serde(skip)]
        scope: Option<ScopeId>,
        name: String,
    },
    Call {
        #[serde(default)]
        id: NodeId,
        #[serde(default)]
        span: Span,
        #[serde(skip)]
        scope: Option<ScopeId>,
        receiver: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

/// Statement inside a lambda body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stmt {
    /// Local binding
    Let {
        #[serde(default)]
        id: NodeId,
        #[serde(default)]
        span: Span,
        name: String,
        #[serde(default)]
        ty: Option<Type>,
        #[serde(default)]
        value: Option<Box<Expr>>,
    },
    /// Expression statement
    Expr {
        #[serde(default)]
        id: NodeId,
        #[serde(default)]
        span: Span,
        expr: Box<Expr>,
    },
    Return {
        #[serde(default)]
        id: NodeId,
        #[serde(default)]
        span: Span,
        #[serde(default)]
        value: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn literal(span: Span, value: impl Into<String>, ty: Type) -> Self {
        Expr::Literal {
            id: NodeId::new(),
            span,
            scope: None,
            literal: LiteralValue::Typed {
                value: value.into(),
                ty,
            },
        }
    }

    pub fn int_literal(span: Span, value: impl Into<String>, signed: bool, length: u32) -> Self {
        Expr::Literal {
            id: NodeId::new(),
            span,
            scope: None,
            literal: LiteralValue::Int {
                value: value.into(),
                signed,
                length,
            },
        }
    }

    /// Integer literal of the default bit length
    pub fn int_literal_default(span: Span, value: impl Into<String>, signed: bool) -> Self {
        Self::int_literal(span, value, signed, DEFAULT_INT_LENGTH)
    }

    pub fn lambda(span: Span, body: Vec<Stmt>) -> Self {
        Expr::Lambda {
            id: NodeId::new(),
            span,
            scope: None,
            body,
        }
    }

    pub fn variable(span: Span, name: impl Into<String>) -> Self {
        Expr::Variable {
            id: NodeId::new(),
            span,
            scope: None,
            name: name.into(),
        }
    }

    pub fn call(span: Span, receiver: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            id: NodeId::new(),
            span,
            scope: None,
            receiver: Box::new(receiver),
            args,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Expr::Literal { id, .. }
            | Expr::Lambda { id, .. }
            | Expr::Variable { id, .. }
            | Expr::Call { id, .. } => *id,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::Lambda { span, .. }
            | Expr::Variable { span, .. }
            | Expr::Call { span, .. } => span,
        }
    }

    /// The scope this node was bound to, if binding has happened
    pub fn scope(&self) -> Option<ScopeId> {
        match self {
            Expr::Literal { scope, .. }
            | Expr::Lambda { scope, .. }
            | Expr::Variable { scope, .. }
            | Expr::Call { scope, .. } => *scope,
        }
    }

    /// Whether statement-level analysis treats this node as indivisible.
    /// Every expression kind in this front end is.
    pub fn is_atomic(&self) -> bool {
        match self {
            Expr::Literal { .. } | Expr::Lambda { .. } | Expr::Variable { .. } | Expr::Call { .. } => {
                true
            }
        }
    }

    /// Bind this expression and all its children to `target`.
    ///
    /// A node that already has a scope keeps it.
    pub fn bind(&mut self, target: ScopeId) {
        match self {
            Expr::Literal { scope, .. } | Expr::Variable { scope, .. } => {
                scope.get_or_insert(target);
            }
            Expr::Lambda { scope, body, .. } => {
                scope.get_or_insert(target);
                for stmt in body {
                    stmt.bind(target);
                }
            }
            Expr::Call {
                scope,
                receiver,
                args,
                ..
            } => {
                scope.get_or_insert(target);
                receiver.bind(target);
                for arg in args {
                    arg.bind(target);
                }
            }
        }
    }
}

impl Stmt {
    pub fn expr(span: Span, expr: Expr) -> Self {
        Stmt::Expr {
            id: NodeId::new(),
            span,
            expr: Box::new(expr),
        }
    }

    pub fn let_(span: Span, name: impl Into<String>, ty: Option<Type>, value: Option<Expr>) -> Self {
        Stmt::Let {
            id: NodeId::new(),
            span,
            name: name.into(),
            ty,
            value: value.map(Box::new),
        }
    }

    pub fn return_(span: Span, value: Option<Expr>) -> Self {
        Stmt::Return {
            id: NodeId::new(),
            span,
            value: value.map(Box::new),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Stmt::Let { span, .. } | Stmt::Expr { span, .. } | Stmt::Return { span, .. } => span,
        }
    }

    /// Expressions directly contained in this statement
    pub fn exprs(&self) -> impl Iterator<Item = &Expr> {
        let expr = match self {
            Stmt::Let { value, .. } | Stmt::Return { value, .. } => value.as_deref(),
            Stmt::Expr { expr, .. } => Some(&**expr),
        };
        expr.into_iter()
    }

    pub fn bind(&mut self, target: ScopeId) {
        match self {
            Stmt::Let { value, .. } | Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    value.bind(target);
                }
            }
            Stmt::Expr { expr, .. } => expr.bind(target),
        }
    }
}
