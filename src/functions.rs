//! Symbolic classical functions.

use crate::expression::Expression;

pub fn sin(x: impl Into<Expression>) -> Expression {
    Expression::function("sin", vec![x.into()])
}

pub fn cos(x: impl Into<Expression>) -> Expression {
    Expression::function("cos", vec![x.into()])
}

pub fn log(x: impl Into<Expression>) -> Expression {
    Expression::function("log", vec![x.into()])
}

/// The exponential, expressed as a power of the protected Euler symbol
/// so that exponents combine: `exp(2) * exp(3) == exp(5)`. An exponent
/// with operator content promotes the whole power to a quantum operator
/// over its joined support.
pub fn exp(x: impl Into<Expression>) -> Expression {
    Expression::symbol("E").pow(x.into())
}
