//! Checked constructors for the public expression-building API.

use miette::Diagnostic;
use thiserror::Error;

use crate::expression::{Expression, Properties, Symbol};
use crate::kron::JoinRule;
use crate::support::Support;
use crate::value::Value;

/// Identifiers reserved by the engine. `E` denotes Euler's number inside
/// [`exp`](crate::functions::exp) expressions.
pub const PROTECTED_IDENTIFIERS: &[&str] = &["E"];

/// A symbol was requested under a reserved identifier.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
#[error("'{0}' is a protected identifier")]
pub struct ProtectedIdentifierError(pub String);

/// Promote a numeric value to an expression.
pub fn value(x: impl Into<Value>) -> Expression {
    Expression::value(x)
}

/// Create a symbol from the identifier if it is not protected.
pub fn symbol(identifier: &str) -> Result<Expression, ProtectedIdentifierError> {
    checked(Symbol::new(identifier))
}

/// A non-trainable scalar input.
pub fn parameter(name: &str) -> Result<Expression, ProtectedIdentifierError> {
    symbol(name)
}

/// A trainable scalar input.
pub fn variable(name: &str) -> Result<Expression, ProtectedIdentifierError> {
    checked(Symbol {
        trainable: true,
        ..Symbol::new(name)
    })
}

/// A non-trainable array input of the given size.
pub fn array_parameter(name: &str, size: u32) -> Result<Expression, ProtectedIdentifierError> {
    checked(Symbol {
        size,
        ..Symbol::new(name)
    })
}

/// A trainable array input of the given size.
pub fn array_variable(name: &str, size: u32) -> Result<Expression, ProtectedIdentifierError> {
    checked(Symbol {
        trainable: true,
        size,
        ..Symbol::new(name)
    })
}

fn checked(symbol: Symbol) -> Result<Expression, ProtectedIdentifierError> {
    if PROTECTED_IDENTIFIERS.contains(&symbol.name.as_str()) {
        return Err(ProtectedIdentifierError(symbol.name));
    }
    Ok(Expression::Symbol(symbol))
}

/// Symbolic representation of a function applied to the given arguments.
pub fn function(name: &str, args: Vec<Expression>) -> Expression {
    Expression::function(name, args)
}

/// A self-adjoint, self-inverse operator on the given support: applying
/// it twice on the same support yields the identity.
pub fn unitary_hermitian_operator(name: &str, support: impl Into<Support>) -> Expression {
    Expression::quantum_operator(
        Expression::symbol(name),
        support.into(),
        Properties {
            is_hermitian: true,
            is_unitary: true,
            ..Properties::default()
        },
    )
}

/// A projector onto `index` of the given basis. Projectors are
/// idempotent, and distinct projectors of one basis multiply to zero on
/// the same support.
pub fn projector(base: &str, index: &str, support: impl Into<Support>) -> Expression {
    Expression::quantum_operator(
        Expression::symbol(format!("{base}{{{index}}}")),
        support.into(),
        Properties {
            base: Some(base.to_owned()),
            is_projector: true,
            is_hermitian: true,
            ..Properties::default()
        },
    )
}

/// A parametric operator: a function wrapped in a quantum operator. The
/// `join` rule, if any, fuses two same-kind applications meeting on an
/// identical support.
pub fn parametric_operator(
    name: &str,
    args: Vec<Expression>,
    join: Option<JoinRule>,
    support: impl Into<Support>,
) -> Expression {
    Expression::quantum_operator(
        Expression::function(name, args),
        support.into(),
        Properties {
            join,
            ..Properties::default()
        },
    )
}
