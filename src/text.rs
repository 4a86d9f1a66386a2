//! Pretty printing for expressions and supports.

use std::fmt;

use float_pretty_print::PrettyPrintFloat;
use pretty::RcDoc;

use crate::expression::Expression;
use crate::support::Support;
use crate::value::Value;

/// Trait for types which can be pretty-printed.
pub trait ToDoc {
    /// Produce an `RcDoc` for pretty-printing.
    fn to_doc(&self) -> RcDoc;
}

impl ToDoc for Value {
    fn to_doc(&self) -> RcDoc {
        match self {
            Value::Real(x) => RcDoc::text(format!("{}", PrettyPrintFloat(*x))),
            Value::Complex(z) => {
                let re = PrettyPrintFloat(z.re);
                if z.im < 0.0 {
                    RcDoc::text(format!("({} - {}i)", re, PrettyPrintFloat(-z.im)))
                } else {
                    RcDoc::text(format!("({} + {}i)", re, PrettyPrintFloat(z.im)))
                }
            }
        }
    }
}

impl ToDoc for Support {
    fn to_doc(&self) -> RcDoc {
        let targets = if self.is_all() {
            "*".to_owned()
        } else {
            join_indices(self.target())
        };
        if self.control().is_empty() {
            RcDoc::text(format!("[{targets}]"))
        } else {
            RcDoc::text(format!("[{targets}|{}]", join_indices(self.control())))
        }
    }
}

fn join_indices(indices: &[u32]) -> String {
    indices
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl ToDoc for Expression {
    fn to_doc(&self) -> RcDoc {
        match self {
            Expression::Value(v) => v.to_doc(),
            Expression::Symbol(s) => RcDoc::text(s.name.clone()),
            Expression::Function(f) => RcDoc::text(f.name.clone())
                .append("(")
                .append(RcDoc::intersperse(
                    f.args.iter().map(Expression::to_doc),
                    RcDoc::text(", "),
                ))
                .append(")"),
            Expression::QuantumOperator(op) => match op.expr.as_ref() {
                Expression::Symbol(_) | Expression::Function(_) => {
                    let dagger = if op.properties.is_dagger { "\u{2020}" } else { "" };
                    op.expr.to_doc().append(dagger).append(op.support.to_doc())
                }
                inner => inner.to_doc(),
            },
            Expression::Add(args) => {
                let mut doc = args[0].to_doc();
                for term in &args[1..] {
                    doc = match as_negated(term) {
                        Some(positive) => doc
                            .append(" - ")
                            .append(RcDoc::text(positive.to_string())),
                        None => doc.append(" + ").append(term.to_doc()),
                    };
                }
                doc
            }
            Expression::Mul(args) | Expression::Kron(args) => {
                RcDoc::intersperse(args.iter().map(bracketed), RcDoc::text(" * "))
            }
            Expression::Pow(base, exponent) => {
                bracketed(base).append("^").append(bracketed(exponent))
            }
        }
    }
}

// Sums and products are bracketed when nested inside another sequence.
fn bracketed(expr: &Expression) -> RcDoc {
    if expr.is_addition() || expr.is_multiplication() {
        RcDoc::text("(").append(expr.to_doc()).append(")")
    } else {
        expr.to_doc()
    }
}

/// The positive counterpart of a term with a negative leading
/// coefficient, used to render `a + (-1 * b)` as `a - b`.
fn as_negated(term: &Expression) -> Option<Expression> {
    match term {
        Expression::Value(Value::Real(x)) if *x < 0.0 => Some(Expression::value(-x)),
        Expression::Mul(factors) => match &factors[0] {
            Expression::Value(Value::Real(x)) if *x < 0.0 => {
                if *x == -1.0 {
                    if factors.len() == 2 {
                        Some(factors[1].clone())
                    } else {
                        Some(Expression::Mul(factors[1..].to_vec()))
                    }
                } else {
                    let mut positive = factors.clone();
                    positive[0] = Expression::value(-x);
                    Some(Expression::Mul(positive))
                }
            }
            _ => None,
        },
        _ => None,
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(80))
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(80))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty(80))
    }
}
