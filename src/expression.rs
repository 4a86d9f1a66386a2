//! The expression tree: a closed tagged union over numeric values,
//! symbols, classical functions, and quantum operators.
//!
//! Expressions are immutable values. Every instance is in normal form:
//! the arithmetic operators in [`crate::algebra`] are the only way
//! composite nodes are produced, and they normalise as they build.
//! Products of quantum operators are stored as Kronecker sequences
//! ordered by qubit support, preserving the application order wherever
//! two supports overlap, so that operators acting on the same subspace
//! stay adjacent.

use std::hash::{DefaultHasher, Hash, Hasher};

use num_complex::Complex64;

use crate::kron::JoinRule;
use crate::support::Support;
use crate::value::Value;

/// A named input symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    /// Trainable inputs are adjusted by optimisation loops downstream.
    pub trainable: bool,
    /// Number of scalar slots the input occupies; 1 for plain scalars.
    pub size: u32,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            trainable: false,
            size: 1,
        }
    }
}

/// A symbolic function call such as `sin(x)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Function {
    pub name: String,
    pub args: Vec<Expression>,
}

/// Evaluation-relevant flags of a quantum operator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Properties {
    pub is_hermitian: bool,
    pub is_unitary: bool,
    pub is_projector: bool,
    pub is_dagger: bool,
    /// Basis identifier for projectors.
    pub base: Option<String>,
    /// Rule used to fuse two same-kind parametric operators acting on an
    /// identical support.
    pub join: Option<JoinRule>,
    /// Overrides the instruction name emitted at lowering time.
    pub instruction_name: Option<String>,
}

/// An operator applied to a qubit support.
///
/// The wrapped expression describes the operator: a symbol for generic
/// gates, a function for parametric operators, a power for evolution
/// operators promoted from classical expressions with operator content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuantumOperator {
    pub expr: Box<Expression>,
    pub support: Support,
    pub properties: Properties,
}

/// A symbolic expression.
#[derive(Clone, Debug)]
pub enum Expression {
    Value(Value),
    Symbol(Symbol),
    Function(Function),
    QuantumOperator(QuantumOperator),
    Add(Vec<Expression>),
    Mul(Vec<Expression>),
    Kron(Vec<Expression>),
    Pow(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Promote a numeric value to an expression.
    pub fn value(x: impl Into<Value>) -> Self {
        Expression::Value(x.into())
    }

    /// The numeric value `0`, doubling as the null operator.
    pub fn zero() -> Self {
        Expression::Value(Value::ZERO)
    }

    /// The numeric value `1`, doubling as the identity operator.
    pub fn one() -> Self {
        Expression::Value(Value::ONE)
    }

    /// A plain (non-trainable, scalar) symbol. No protected-name check is
    /// performed here; see [`crate::constructors::symbol`].
    pub fn symbol(name: impl Into<String>) -> Self {
        Expression::Symbol(Symbol::new(name))
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function(Function {
            name: name.into(),
            args,
        })
    }

    pub fn quantum_operator(expr: Expression, support: Support, properties: Properties) -> Self {
        Expression::QuantumOperator(QuantumOperator {
            expr: Box::new(expr),
            support,
            properties,
        })
    }

    /// A raw power node. Use [`Expression::pow`] for the normalising
    /// operation.
    pub fn power(base: Expression, exponent: Expression) -> Self {
        Expression::Pow(Box::new(base), Box::new(exponent))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Expression::Value(_))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expression::Value(v) if v.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expression::Value(v) if v.is_one())
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Expression::Symbol(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Expression::Function(_))
    }

    pub fn is_quantum_operator(&self) -> bool {
        matches!(self, Expression::QuantumOperator(_))
    }

    pub fn is_addition(&self) -> bool {
        matches!(self, Expression::Add(_))
    }

    pub fn is_multiplication(&self) -> bool {
        matches!(self, Expression::Mul(_))
    }

    pub fn is_kronecker_product(&self) -> bool {
        matches!(self, Expression::Kron(_))
    }

    pub fn is_power(&self) -> bool {
        matches!(self, Expression::Pow(_, _))
    }

    /// The total subspace covered by the quantum operators of the
    /// expression, or `None` when there are none. Overlapping target and
    /// control sets collapse into targets, per [`Support::join`].
    pub fn subspace(&self) -> Option<Support> {
        match self {
            Expression::Value(_) | Expression::Symbol(_) => None,
            Expression::QuantumOperator(op) => Some(op.support.clone()),
            Expression::Function(f) => join_subspaces(&f.args),
            Expression::Add(args) | Expression::Mul(args) | Expression::Kron(args) => {
                join_subspaces(args)
            }
            Expression::Pow(base, exponent) => {
                join_subspaces([base.as_ref(), exponent.as_ref()])
            }
        }
    }

    /// The largest qubit index referenced by the expression. `None` when
    /// no quantum operator is present or every operator covers all
    /// qubits.
    pub fn max_index(&self) -> Option<u32> {
        match self {
            Expression::Value(_) | Expression::Symbol(_) => None,
            Expression::QuantumOperator(op) => op.support.max_index(),
            Expression::Function(f) => f.args.iter().filter_map(Expression::max_index).max(),
            Expression::Add(args) | Expression::Mul(args) | Expression::Kron(args) => {
                args.iter().filter_map(Expression::max_index).max()
            }
            Expression::Pow(base, exponent) => base.max_index().max(exponent.max_index()),
        }
    }

    /// Promote an expression with operator content to a quantum operator
    /// over the joined support of everything inside it. Expressions
    /// without operator content are returned unchanged.
    ///
    /// This is what keeps `exp(X(1) + X(2))` behaving as a proper
    /// non-commuting operator under further multiplication.
    pub fn as_quantum_operator(self) -> Expression {
        match self.subspace() {
            Some(support) => {
                Expression::quantum_operator(self, support, Properties::default())
            }
            None => self,
        }
    }

    /// The conjugated (adjoint) expression.
    ///
    /// Distributes over every variant, reverses the order of Kronecker
    /// factors, conjugates numeric literals, and is the identity on
    /// hermitian operators. On a non-hermitian quantum operator it
    /// toggles the dagger flag.
    pub fn dag(&self) -> Expression {
        match self {
            Expression::Symbol(_) | Expression::Function(_) => self.clone(),
            Expression::Value(v) => Expression::Value(v.conjugate()),
            Expression::QuantumOperator(op) => {
                if op.properties.is_hermitian {
                    return self.clone();
                }
                let properties = Properties {
                    is_dagger: !op.properties.is_dagger,
                    ..op.properties.clone()
                };
                Expression::quantum_operator(op.expr.dag(), op.support.clone(), properties)
            }
            Expression::Kron(args) => args
                .iter()
                .rev()
                .fold(Expression::one(), |acc, arg| acc * arg.dag()),
            Expression::Add(args) => {
                Expression::Add(args.iter().map(Expression::dag).collect())
            }
            Expression::Mul(args) => {
                Expression::Mul(args.iter().map(Expression::dag).collect())
            }
            Expression::Pow(base, exponent) => {
                Expression::power(base.dag(), exponent.dag())
            }
        }
    }
}

fn join_subspaces<'a>(args: impl IntoIterator<Item = &'a Expression>) -> Option<Support> {
    let mut acc: Option<Support> = None;
    for arg in args {
        if let Some(subspace) = arg.subspace() {
            acc = Some(match acc {
                None => subspace,
                Some(joined) => joined.join(&subspace),
            });
        }
    }
    acc
}

// Addition and multiplication are commutative, so their argument lists
// compare as multisets; every other variant compares structurally.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expression::Value(a), Expression::Value(b)) => a == b,
            (Expression::Symbol(a), Expression::Symbol(b)) => a == b,
            (Expression::Function(a), Expression::Function(b)) => a == b,
            (Expression::QuantumOperator(a), Expression::QuantumOperator(b)) => a == b,
            (Expression::Add(a), Expression::Add(b))
            | (Expression::Mul(a), Expression::Mul(b)) => multiset_eq(a, b),
            (Expression::Kron(a), Expression::Kron(b)) => a == b,
            (Expression::Pow(a, b), Expression::Pow(c, d)) => a == c && b == d,
            _ => false,
        }
    }
}

impl Eq for Expression {}

fn multiset_eq(lhs: &[Expression], rhs: &[Expression]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut used = vec![false; rhs.len()];
    'terms: for l in lhs {
        for (i, r) in rhs.iter().enumerate() {
            if !used[i] && l == r {
                used[i] = true;
                continue 'terms;
            }
        }
        return false;
    }
    true
}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Expression::Value(v) => v.hash(state),
            Expression::Symbol(s) => s.hash(state),
            Expression::Function(f) => f.hash(state),
            Expression::QuantumOperator(op) => op.hash(state),
            // Order-independent, to agree with multiset equality.
            Expression::Add(args) | Expression::Mul(args) => {
                state.write_u64(unordered_hash(args));
            }
            Expression::Kron(args) => args.hash(state),
            Expression::Pow(base, exponent) => {
                base.hash(state);
                exponent.hash(state);
            }
        }
    }
}

fn unordered_hash(args: &[Expression]) -> u64 {
    args.iter()
        .map(|arg| {
            let mut hasher = DefaultHasher::new();
            arg.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0, u64::wrapping_add)
}

impl From<Value> for Expression {
    fn from(v: Value) -> Self {
        Expression::Value(v)
    }
}

impl From<f64> for Expression {
    fn from(x: f64) -> Self {
        Expression::value(x)
    }
}

impl From<i64> for Expression {
    fn from(x: i64) -> Self {
        Expression::value(x)
    }
}

impl From<i32> for Expression {
    fn from(x: i32) -> Self {
        Expression::value(x)
    }
}

impl From<Complex64> for Expression {
    fn from(z: Complex64) -> Self {
        Expression::value(z)
    }
}
