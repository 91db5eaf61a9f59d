//! Type model
//!
//! Every type renders to a canonical name. Composite names are recomputed from
//! their children on each call, so printing and comparison stay structural.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Type {
    /// Named leaf type (e.g., `i32`, `bool`, a user-declared simple type)
    Secondary { name: String },
    /// Container parametrized by one other type, printed `container<parameter>`
    ThirdLevel {
        container: Box<Type>,
        parameter: Box<Type>,
    },
    /// Function type, printed `p1,p2->ret`
    Lambda { params: Vec<Type>, ret: Box<Type> },
}

impl Type {
    pub fn secondary(name: impl Into<String>) -> Self {
        Type::Secondary { name: name.into() }
    }

    pub fn third_level(container: Type, parameter: Type) -> Self {
        Type::ThirdLevel {
            container: Box::new(container),
            parameter: Box::new(parameter),
        }
    }

    pub fn lambda(params: Vec<Type>, ret: Type) -> Self {
        Type::Lambda {
            params,
            ret: Box::new(ret),
        }
    }

    /// Integer type named by signedness and bit length (`i32`, `u64`, ...)
    pub fn int(signed: bool, length: u32) -> Self {
        Type::secondary(format!("{}{}", if signed { "i" } else { "u" }, length))
    }

    /// The canonical name of this type
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Parameter and return types if this is a lambda type
    pub fn as_lambda(&self) -> Option<(&[Type], &Type)> {
        match self {
            Type::Lambda { params, ret } => Some((params, ret)),
            _ => None,
        }
    }

    pub fn return_type(&self) -> Option<&Type> {
        self.as_lambda().map(|(_, ret)| ret)
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self, Type::Lambda { .. })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Secondary { name } => write!(f, "{}", name),
            Type::ThirdLevel {
                container,
                parameter,
            } => write!(f, "{}<{}>", container, parameter),
            Type::Lambda { params, ret } => {
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, "->{}", ret)
            }
        }
    }
}
