//! Coefficient collection over additive operator polynomials.

use indexmap::IndexMap;

use crate::algebra::accumulate;
use crate::expression::Expression;

/// Collect the coefficients of the non-commuting terms of a polynomial.
///
/// Each distinct quantum operator or Kronecker product becomes a key; a
/// bare operator term contributes `1`, a product ending in an operator
/// term contributes the product of its preceding factors. Terms without
/// operator content are ignored. Two Hamiltonian-style expressions agree
/// physically exactly when every operator key carries the same collected
/// coefficient in both.
pub fn collect_operators(polynomial: &Expression) -> IndexMap<Expression, Expression> {
    let mut acc = IndexMap::new();
    collect_into(polynomial, &mut acc);
    acc
}

fn collect_into(expr: &Expression, acc: &mut IndexMap<Expression, Expression>) {
    match expr {
        Expression::Add(terms) => {
            for term in terms {
                collect_into(term, acc);
            }
        }
        Expression::QuantumOperator(_) | Expression::Kron(_) => {
            accumulate(acc, expr.clone(), Expression::one());
        }
        Expression::Mul(factors) => {
            let Some((term, scale)) = factors.split_last() else {
                return;
            };
            if !(term.is_quantum_operator() || term.is_kronecker_product()) {
                return;
            }
            let coefficient = if scale.len() == 1 {
                scale[0].clone()
            } else {
                Expression::Mul(scale.to_vec())
            };
            accumulate(acc, term.clone(), coefficient);
        }
        _ => {}
    }
}
