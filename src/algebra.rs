//! The arithmetic operators and the normalisation they maintain.
//!
//! Every operator is total over already-normalised inputs and returns a
//! normalised result; there is no separate simplification pass. Addition
//! folds numeric literals and collects structurally-equal terms into
//! summed coefficients. Multiplication distributes over sums, folds
//! repeated commutative factors into powers, and routes quantum-operator
//! factors through the Kronecker normaliser, which applies its own
//! non-commutative rules.

use std::ops::{Add, Div, Mul, Neg, Sub};

use indexmap::IndexMap;
use num_complex::Complex64;

use crate::expression::Expression;
use crate::kron;
use crate::value::Value;

impl Expression {
    /// Raise the expression to a power.
    ///
    /// Zero and one exponents short-circuit, numeric bases fold, a power
    /// of a power multiplies exponents, and an integral power of a
    /// hermitian-unitary operator reduces modulo two. Any power whose
    /// base carries operator content is promoted to a quantum operator,
    /// so powers of sums are deliberately never expanded.
    pub fn pow(self, exponent: impl Into<Expression>) -> Expression {
        let exponent = exponent.into();
        if let (Expression::Value(a), Expression::Value(b)) = (&self, &exponent) {
            return Expression::Value(a.pow(b));
        }
        if exponent.is_zero() {
            return Expression::one();
        }
        if exponent.is_one() {
            return self;
        }
        if let Expression::QuantumOperator(op) = &self {
            if op.properties.is_hermitian && op.properties.is_unitary {
                if let Expression::Value(v) = &exponent {
                    if let Some(n) = v.as_integer() {
                        return if n.rem_euclid(2) == 1 {
                            self
                        } else {
                            Expression::one()
                        };
                    }
                }
            }
        }
        if let Expression::Pow(base, inner) = self {
            return (*base).pow(*inner * exponent);
        }
        Expression::power(self, exponent).as_quantum_operator()
    }
}

impl Add for Expression {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Expression {
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }
        if let (Expression::Value(a), Expression::Value(b)) = (&self, &rhs) {
            return Expression::Value(*a + *b);
        }
        let args = match (self, rhs) {
            (Expression::Add(mut a), Expression::Add(b)) => {
                a.extend(b);
                a
            }
            (Expression::Add(mut a), other) => {
                a.push(other);
                a
            }
            (other, Expression::Add(mut b)) => {
                b.insert(0, other);
                b
            }
            (a, b) => vec![a, b],
        };
        fold_addition(args)
    }
}

impl Mul for Expression {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Expression {
        if self.is_zero() || rhs.is_zero() {
            return Expression::zero();
        }
        if self.is_one() {
            return rhs;
        }
        if rhs.is_one() {
            return self;
        }
        if let (Expression::Value(a), Expression::Value(b)) = (&self, &rhs) {
            return Expression::Value(*a * *b);
        }
        // Products of sums expand eagerly, except a sum against a power
        // of itself, which folds through the exponent map instead.
        if self.is_addition() && !matches!(&rhs, Expression::Pow(base, _) if **base == self) {
            let Expression::Add(terms) = self else {
                unreachable!()
            };
            return terms
                .into_iter()
                .map(|term| term * rhs.clone())
                .fold(Expression::zero(), |acc, term| acc + term);
        }
        if rhs.is_addition() && !matches!(&self, Expression::Pow(base, _) if **base == rhs) {
            let Expression::Add(terms) = rhs else {
                unreachable!()
            };
            return terms
                .into_iter()
                .map(|term| self.clone() * term)
                .fold(Expression::zero(), |acc, term| acc + term);
        }
        let args = match (self, rhs) {
            (Expression::Mul(mut a), Expression::Mul(b)) => {
                a.extend(b);
                a
            }
            (Expression::Mul(mut a), other) => {
                a.push(other);
                a
            }
            (other, Expression::Mul(mut b)) => {
                b.insert(0, other);
                b
            }
            (a, b) => vec![a, b],
        };
        fold_multiplication(args)
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::value(-1.0) * self
    }
}

impl Sub for Expression {
    type Output = Expression;

    fn sub(self, rhs: Expression) -> Expression {
        self + (-rhs)
    }
}

impl Div for Expression {
    type Output = Expression;

    fn div(self, rhs: Expression) -> Expression {
        self * rhs.pow(-1.0)
    }
}

/// Fold a flattened argument list into a normalised sum: numeric terms
/// accumulate into a single literal, the rest are grouped by their
/// non-numeric part with summed coefficients, and zero-coefficient groups
/// are dropped.
fn fold_addition(args: Vec<Expression>) -> Expression {
    let mut numeric = Value::ZERO;
    let mut terms: IndexMap<Expression, Expression> = IndexMap::new();
    for term in args {
        match term {
            Expression::Value(v) => numeric = numeric + v,
            Expression::Mul(factors) if factors[0].is_value() => {
                let coefficient = factors[0].clone();
                let element = if factors.len() == 2 {
                    factors[1].clone()
                } else {
                    Expression::Mul(factors[1..].to_vec())
                };
                accumulate(&mut terms, element, coefficient);
            }
            other => accumulate(&mut terms, other, Expression::one()),
        }
    }
    let mut out = Vec::with_capacity(terms.len() + 1);
    if !numeric.is_zero() {
        out.push(Expression::Value(numeric));
    }
    for (element, coefficient) in terms {
        if coefficient.is_zero() {
            continue;
        }
        out.push(element * coefficient);
    }
    match out.len() {
        0 => Expression::zero(),
        1 => out.pop().unwrap(),
        _ => Expression::Add(out),
    }
}

/// Fold a flattened factor list into a normalised product. Factors
/// separate into a numeric coefficient, a base-to-exponent map for
/// commutative factors, and a Kronecker accumulator for quantum
/// operators, whose combination is order-sensitive.
fn fold_multiplication(args: Vec<Expression>) -> Expression {
    let mut numeric = Value::ONE;
    let mut quantum = Expression::one();
    let mut powers: IndexMap<Expression, Expression> = IndexMap::new();
    for factor in args {
        match factor {
            Expression::Value(v) => numeric = numeric * v,
            Expression::QuantumOperator(_) | Expression::Kron(_) => {
                quantum = kron::merge(quantum, factor);
            }
            Expression::Pow(base, exponent) => accumulate(&mut powers, *base, *exponent),
            other => accumulate(&mut powers, other, Expression::one()),
        }
    }
    if numeric.is_zero() || quantum.is_zero() {
        return Expression::zero();
    }
    let mut out = Vec::with_capacity(powers.len() + 2);
    for (base, exponent) in powers {
        if exponent.is_zero() {
            continue;
        }
        out.push(base.pow(exponent));
    }
    if !quantum.is_one() {
        out.push(quantum);
    }
    if !numeric.is_one() || out.is_empty() {
        out.insert(0, Expression::Value(numeric));
    }
    match out.len() {
        1 => out.pop().unwrap(),
        _ => Expression::Mul(out),
    }
}

pub(crate) fn accumulate(
    map: &mut IndexMap<Expression, Expression>,
    key: Expression,
    amount: Expression,
) {
    let entry = map.entry(key).or_insert_with(Expression::zero);
    let current = std::mem::replace(entry, Expression::zero());
    *entry = current + amount;
}

macro_rules! impl_scalar_ops {
    ($($scalar:ty),*) => {$(
        impl Add<$scalar> for Expression {
            type Output = Expression;

            fn add(self, rhs: $scalar) -> Expression {
                self + Expression::from(rhs)
            }
        }

        impl Add<Expression> for $scalar {
            type Output = Expression;

            fn add(self, rhs: Expression) -> Expression {
                Expression::from(self) + rhs
            }
        }

        impl Sub<$scalar> for Expression {
            type Output = Expression;

            fn sub(self, rhs: $scalar) -> Expression {
                self - Expression::from(rhs)
            }
        }

        impl Sub<Expression> for $scalar {
            type Output = Expression;

            fn sub(self, rhs: Expression) -> Expression {
                Expression::from(self) - rhs
            }
        }

        impl Mul<$scalar> for Expression {
            type Output = Expression;

            fn mul(self, rhs: $scalar) -> Expression {
                self * Expression::from(rhs)
            }
        }

        impl Mul<Expression> for $scalar {
            type Output = Expression;

            fn mul(self, rhs: Expression) -> Expression {
                Expression::from(self) * rhs
            }
        }

        impl Div<$scalar> for Expression {
            type Output = Expression;

            fn div(self, rhs: $scalar) -> Expression {
                self / Expression::from(rhs)
            }
        }

        impl Div<Expression> for $scalar {
            type Output = Expression;

            fn div(self, rhs: Expression) -> Expression {
                Expression::from(self) / rhs
            }
        }
    )*};
}

impl_scalar_ops!(f64, i64, i32, Complex64);
