//! Symbolic expression engine for algebraic and quantum-operator
//! expressions.
//!
//! Expressions are immutable values kept in a unique normal form by the
//! arithmetic operators themselves:
//! - addition and multiplication flatten, fold numeric literals, and
//!   collect structurally-equal terms,
//! - products of quantum operators normalise into Kronecker sequences
//!   ordered by qubit support, preserving application order where
//!   supports overlap,
//! - hermitian-unitary operators cancel pairwise and reduce under
//!   integral powers; projectors and parametric operators apply their
//!   own fusion rules.
//!
//! A normalised expression can be lowered to a flat instruction model
//! for a quantum-execution backend with [`compiler::compile_to_model`].
//!
//! ```
//! use qexpr_rs::constructors::parameter;
//! use qexpr_rs::operators::rx;
//! use qexpr_rs::{Environment, compile_to_model};
//!
//! let theta = parameter("theta").unwrap();
//! let expr = rx(theta / 2, 0);
//! let model = compile_to_model(&expr, &Environment::new()).unwrap();
//! assert_eq!(model.register.num_qubits, 1);
//! ```

mod algebra;
pub mod collect;
pub mod compiler;
pub mod constructors;
pub mod environment;
pub mod expression;
pub mod functions;
pub mod ir;
pub mod kron;
pub mod operators;
pub mod replace;
pub mod support;
pub mod text;
pub mod value;

pub use collect::collect_operators;
pub use compiler::{CompileError, compile_to_model};
pub use environment::Environment;
pub use expression::Expression;
pub use replace::{prod, replace};
pub use support::Support;
pub use value::Value;
