//! Kronecker-product normalisation: ordered merging of quantum-operator
//! sequences with pairwise cancellation and fusion rules.
//!
//! A Kronecker sequence keeps its factors totally ordered by qubit
//! support; wherever two supports overlap the original application order
//! is preserved, since operators generally do not commute there. Merging
//! a factor into a sequence is an insertion-sort-like scan that combines
//! same-support pairs through [`combine_pair`].

use crate::expression::{Expression, Function, Properties, QuantumOperator};

/// Strategy applied when two parametric operators of the same kind meet
/// on the same support, replacing embedded combiner callbacks with a
/// closed set of rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinRule {
    /// Sum the parameters pairwise, counting a daggered side negatively.
    /// Rotations fuse this way: `RX(a) * RX(b) == RX(a + b)`, and a sum
    /// of zero cancels to the identity.
    AngleSum,
}

impl JoinRule {
    pub fn combine(
        &self,
        lhs: &Function,
        rhs: &Function,
        lhs_dagger: bool,
        rhs_dagger: bool,
    ) -> Expression {
        match self {
            JoinRule::AngleSum => {
                let signed = |arg: &Expression, dagger: bool| {
                    if dagger {
                        -arg.clone()
                    } else {
                        arg.clone()
                    }
                };
                let args: Vec<Expression> = lhs
                    .args
                    .iter()
                    .zip(&rhs.args)
                    .map(|(a, b)| signed(a, lhs_dagger) + signed(b, rhs_dagger))
                    .collect();
                if args.iter().all(Expression::is_zero) {
                    Expression::one()
                } else {
                    Expression::function(&*lhs.name, args)
                }
            }
        }
    }
}

/// Merge two operator-valued expressions into one ordered Kronecker
/// product. Operands must be quantum operators, Kronecker products, or
/// the scalar identities; anything else is a programming error.
pub(crate) fn merge(lhs: Expression, rhs: Expression) -> Expression {
    assert!(
        operator_like(&lhs) && operator_like(&rhs),
        "Kronecker merge is only defined for quantum operators"
    );
    if lhs.is_zero() || rhs.is_zero() {
        return Expression::zero();
    }
    if lhs.is_one() {
        return rhs;
    }
    if rhs.is_one() {
        return lhs;
    }
    match (lhs, rhs) {
        (Expression::QuantumOperator(l), Expression::QuantumOperator(r)) => combine_pair(l, r),
        (Expression::QuantumOperator(l), Expression::Kron(r)) => insert_left(l, r),
        (Expression::Kron(l), Expression::QuantumOperator(r)) => insert_right(l, r),
        (Expression::Kron(l), Expression::Kron(r)) => r
            .into_iter()
            .fold(Expression::Kron(l), merge),
        _ => unreachable!(),
    }
}

fn operator_like(expr: &Expression) -> bool {
    expr.is_zero() || expr.is_one() || expr.is_quantum_operator() || expr.is_kronecker_product()
}

/// Combine two quantum operators.
///
/// On the same support: hermitian-unitary self-cancellation, projector
/// idempotence and orthogonality, named-kind parametric fusion through
/// the registered join rule, and exponent addition for fractional powers
/// of the same hermitian-unitary base. On distinct supports the pair is
/// ordered by support, keeping application order when they overlap.
fn combine_pair(lhs: QuantumOperator, rhs: QuantumOperator) -> Expression {
    if lhs == rhs && lhs.properties.is_hermitian && lhs.properties.is_unitary {
        return Expression::one();
    }
    if lhs.support == rhs.support {
        if lhs.properties.is_projector && rhs.properties.is_projector {
            return if lhs.expr == rhs.expr {
                Expression::QuantumOperator(lhs)
            } else {
                Expression::zero()
            };
        }
        if let (Expression::Function(lf), Expression::Function(rf)) =
            (lhs.expr.as_ref(), rhs.expr.as_ref())
        {
            if lf.name == rf.name {
                if let Some(rule) = lhs.properties.join {
                    let fused = rule.combine(
                        lf,
                        rf,
                        lhs.properties.is_dagger,
                        rhs.properties.is_dagger,
                    );
                    if fused.is_zero() || fused.is_one() {
                        return fused;
                    }
                    // Dagger signs are already folded into the fused
                    // parameters.
                    let properties = Properties {
                        is_dagger: false,
                        ..lhs.properties.clone()
                    };
                    return Expression::quantum_operator(fused, lhs.support, properties);
                }
            }
        }
        if let (Expression::Pow(lb, le), Expression::Pow(rb, re)) =
            (lhs.expr.as_ref(), rhs.expr.as_ref())
        {
            if lb == rb {
                if let Expression::QuantumOperator(base) = lb.as_ref() {
                    if base.properties.is_hermitian && base.properties.is_unitary {
                        return lb
                            .as_ref()
                            .clone()
                            .pow(le.as_ref().clone() + re.as_ref().clone());
                    }
                }
            }
        }
    }
    if lhs.support < rhs.support || lhs.support.overlap_with(&rhs.support) {
        Expression::Kron(vec![
            Expression::QuantumOperator(lhs),
            Expression::QuantumOperator(rhs),
        ])
    } else {
        Expression::Kron(vec![
            Expression::QuantumOperator(rhs),
            Expression::QuantumOperator(lhs),
        ])
    }
}

/// Insert an operator arriving from the left into an ordered sequence.
fn insert_left(op: QuantumOperator, args: Vec<Expression>) -> Expression {
    let mut out = args;
    let mut pending = Some(op);
    for i in 0..out.len() {
        let op = pending.take().unwrap();
        let slot = slot_support(&out[i]);
        if slot == op.support {
            let Expression::QuantumOperator(existing) = out.remove(i) else {
                unreachable!()
            };
            match splice(&mut out, i, combine_pair(op, existing)) {
                Spliced::Done => break,
                Spliced::Annihilated => return Expression::zero(),
            }
        }
        if slot > op.support || slot.overlap_with(&op.support) {
            out.insert(i, Expression::QuantumOperator(op));
            break;
        }
        pending = Some(op);
    }
    if let Some(op) = pending {
        out.push(Expression::QuantumOperator(op));
    }
    rebuild(out)
}

/// Insert an operator arriving from the right into an ordered sequence.
fn insert_right(args: Vec<Expression>, op: QuantumOperator) -> Expression {
    let mut out = args;
    let mut pending = Some(op);
    for i in (0..out.len()).rev() {
        let op = pending.take().unwrap();
        let slot = slot_support(&out[i]);
        if slot == op.support {
            let Expression::QuantumOperator(existing) = out.remove(i) else {
                unreachable!()
            };
            match splice(&mut out, i, combine_pair(existing, op)) {
                Spliced::Done => break,
                Spliced::Annihilated => return Expression::zero(),
            }
        }
        if slot < op.support || slot.overlap_with(&op.support) {
            out.insert(i + 1, Expression::QuantumOperator(op));
            break;
        }
        if i == 0 {
            out.insert(0, Expression::QuantumOperator(op));
            break;
        }
        pending = Some(op);
    }
    rebuild(out)
}

enum Spliced {
    Done,
    /// The combination produced the null operator; the whole product is
    /// zero.
    Annihilated,
}

fn splice(out: &mut Vec<Expression>, at: usize, combined: Expression) -> Spliced {
    if combined.is_zero() {
        return Spliced::Annihilated;
    }
    if combined.is_one() {
        return Spliced::Done;
    }
    match combined {
        Expression::Kron(parts) => {
            for (offset, part) in parts.into_iter().enumerate() {
                out.insert(at + offset, part);
            }
        }
        other => out.insert(at, other),
    }
    Spliced::Done
}

fn slot_support(expr: &Expression) -> crate::support::Support {
    match expr {
        Expression::QuantumOperator(op) => op.support.clone(),
        _ => unreachable!("Kronecker products only hold quantum operators"),
    }
}

fn rebuild(mut args: Vec<Expression>) -> Expression {
    match args.len() {
        0 => Expression::one(),
        1 => args.pop().unwrap(),
        _ => Expression::Kron(args),
    }
}
