//! Structural substitution over normalised expressions.

use indexmap::IndexMap;

use crate::expression::{Expression, QuantumOperator};

/// Multiply out an iterator of expressions.
pub fn prod(exprs: impl IntoIterator<Item = Expression>) -> Expression {
    exprs
        .into_iter()
        .fold(Expression::one(), |acc, expr| acc * expr)
}

/// Replace exact structural matches of the rule keys, then re-normalise
/// the rebuilt tree through the ordinary arithmetic operators.
///
/// Matching is by structural equality only: a rule keyed on `a + b` will
/// not rewrite a sub-expression that is merely algebraically equal.
/// Replacement values are inserted as-is; they are not themselves
/// searched again within the same pass.
pub fn replace(
    expr: &Expression,
    rules: &IndexMap<Expression, Expression>,
) -> Expression {
    renormalize(&substitute(expr, rules))
}

fn substitute(expr: &Expression, rules: &IndexMap<Expression, Expression>) -> Expression {
    if let Some(replacement) = rules.get(expr) {
        return replacement.clone();
    }
    match expr {
        Expression::Value(_) | Expression::Symbol(_) => expr.clone(),
        Expression::Function(f) => Expression::function(
            &*f.name,
            f.args.iter().map(|arg| substitute(arg, rules)).collect(),
        ),
        Expression::QuantumOperator(op) => Expression::QuantumOperator(QuantumOperator {
            expr: Box::new(substitute(&op.expr, rules)),
            support: op.support.clone(),
            properties: op.properties.clone(),
        }),
        Expression::Add(args) => {
            Expression::Add(args.iter().map(|arg| substitute(arg, rules)).collect())
        }
        Expression::Mul(args) => {
            Expression::Mul(args.iter().map(|arg| substitute(arg, rules)).collect())
        }
        Expression::Kron(args) => {
            Expression::Kron(args.iter().map(|arg| substitute(arg, rules)).collect())
        }
        Expression::Pow(base, exponent) => Expression::power(
            substitute(base, rules),
            substitute(exponent, rules),
        ),
    }
}

/// Re-run the arithmetic operators over a rebuilt tree so equivalences
/// introduced by substitution fold in.
fn renormalize(expr: &Expression) -> Expression {
    match expr {
        Expression::Mul(args) | Expression::Kron(args) => {
            prod(args.iter().map(renormalize))
        }
        Expression::Add(args) => args
            .iter()
            .map(renormalize)
            .fold(Expression::zero(), |acc, term| acc + term),
        Expression::Pow(base, exponent) => renormalize(base).pow(renormalize(exponent)),
        Expression::QuantumOperator(op)
            if !(op.expr.is_symbol() || op.expr.is_function()) =>
        {
            Expression::QuantumOperator(QuantumOperator {
                expr: Box::new(renormalize(&op.expr)),
                support: op.support.clone(),
                properties: op.properties.clone(),
            })
        }
        _ => expr.clone(),
    }
}
