//! Handler for the `bcc explain` subcommand.

use crate::diagnostics::error_codes;

use super::CliError;

pub(crate) fn run_explain(code: &str) -> Result<(), CliError> {
    let text = get_error_explanation(code).ok_or_else(|| CliError::UnknownCode(code.to_string()))?;
    println!("{}", text);
    Ok(())
}

/// Get a detailed explanation for an error or warning code.
pub(crate) fn get_error_explanation(code: &str) -> Option<&'static str> {
    let explanation = match code.to_ascii_uppercase().as_str() {
        error_codes::unit::UNREADABLE_UNIT => {
            r#"E0100: Unreadable unit

The unit file could not be read from disk.

Fix: Check that the path exists and is readable.
"#
        }
        error_codes::unit::MALFORMED_UNIT => {
            r#"E0101: Malformed unit

The unit file is not a valid JSON compilation unit. Expressions need a
"type" tag (Literal, Lambda, Variable or Call) and declarations need a
"kind" tag (variable or type_name).
"#
        }
        error_codes::unit::UNKNOWN_SCOPE => {
            r#"E0102: Unknown scope

A scope or expression refers to a scope that does not exist. Scope 0 is
the root; the nth entry of "scopes" is scope n and may only name an
earlier scope as its parent.
"#
        }
        error_codes::unit::DUPLICATE_DECLARATION => {
            r#"E0103: Duplicate declaration

The same name is declared twice in one scope. Declaring it again in a
nested scope is allowed and shadows the outer declaration (see W0006).
"#
        }
        error_codes::unit::QUERY_DECLARATION => {
            r#"E0104: Query declaration

A unit declares an entry of kind "query". Query declarations are the
dependency tokens produced by `bcc deps`; they name what an expression
needs in scope and cannot themselves be declared.

Fix: Declare the name as a variable or type_name.
"#
        }
        error_codes::types::UNRESOLVED_NAME => {
            r#"E1002: Unresolved name

A variable reference could not be resolved to a variable declaration.
Either no enclosing scope declares the name, the innermost declaration
is not a variable (for example a type name), or the expression was
never bound to a scope.

Example:
  x + 1    # no `x` in scope

Fix: Declare the variable in the expression's scope or an enclosing one.
"#
        }
        error_codes::types::NOT_CALLABLE => {
            r#"E1013: Receiver is not callable

The receiver of a function call does not have a lambda type.

Example:
  let x: i32
  x()      # i32 is not a lambda

Fix: Call a value whose type is a lambda (params->ret).
"#
        }
        error_codes::unsupported::NOT_IMPLEMENTED => {
            r#"E1900: Not supported yet

The construct is recognised but its type cannot be computed yet. This
currently applies to lambda expressions, including lambdas used as the
receiver of a call.
"#
        }
        error_codes::warnings::SHADOWED_BINDING => {
            r#"W0006: Shadowed declaration

A declaration in a nested scope hides a declaration of the same name in
an enclosing scope. Lookups from the nested scope see the inner one.
"#
        }
        _ => return None,
    };
    Some(explanation)
}
