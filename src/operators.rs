//! The built-in operator library: Pauli and Clifford gates, projectors,
//! rotations, and analog operations.

use crate::constructors::{parametric_operator, projector, unitary_hermitian_operator};
use crate::expression::{Expression, Properties};
use crate::kron::JoinRule;
use crate::support::Support;

/// Pauli X.
pub fn x(support: impl Into<Support>) -> Expression {
    unitary_hermitian_operator("X", support)
}

/// Pauli Y.
pub fn y(support: impl Into<Support>) -> Expression {
    unitary_hermitian_operator("Y", support)
}

/// Pauli Z.
pub fn z(support: impl Into<Support>) -> Expression {
    unitary_hermitian_operator("Z", support)
}

/// Hadamard.
pub fn h(support: impl Into<Support>) -> Expression {
    unitary_hermitian_operator("H", support)
}

/// Controlled-Z.
pub fn cz(support: impl Into<Support>) -> Expression {
    unitary_hermitian_operator("CZ", support)
}

/// Swap.
pub fn swap(support: impl Into<Support>) -> Expression {
    unitary_hermitian_operator("SWAP", support)
}

/// Logical NOT.
pub fn not(support: impl Into<Support>) -> Expression {
    unitary_hermitian_operator("NOT", support)
}

/// Projector onto the Z-basis 0 state.
pub fn z0(support: impl Into<Support>) -> Expression {
    projector("Z", "0", support)
}

/// Projector onto the Z-basis 1 state.
pub fn z1(support: impl Into<Support>) -> Expression {
    projector("Z", "1", support)
}

/// Projector onto the X-basis plus state.
pub fn xp(support: impl Into<Support>) -> Expression {
    projector("X", "+", support)
}

/// Projector onto the X-basis minus state.
pub fn xm(support: impl Into<Support>) -> Expression {
    projector("X", "-", support)
}

/// Rotation around X by `angle`.
pub fn rx(angle: impl Into<Expression>, support: impl Into<Support>) -> Expression {
    rotation("RX", angle.into(), support.into())
}

/// Rotation around Y by `angle`.
pub fn ry(angle: impl Into<Expression>, support: impl Into<Support>) -> Expression {
    rotation("RY", angle.into(), support.into())
}

/// Rotation around Z by `angle`.
pub fn rz(angle: impl Into<Expression>, support: impl Into<Support>) -> Expression {
    rotation("RZ", angle.into(), support.into())
}

fn rotation(name: &str, angle: Expression, support: Support) -> Expression {
    parametric_operator(name, vec![angle], Some(JoinRule::AngleSum), support)
}

/// Hardware drive pulse; lowers to the `dyn_pulse` instruction.
pub fn native_drive(
    duration: impl Into<Expression>,
    amplitude: impl Into<Expression>,
    detuning: impl Into<Expression>,
    phase: impl Into<Expression>,
    support: impl Into<Support>,
) -> Expression {
    Expression::quantum_operator(
        Expression::function(
            "NativeDrive",
            vec![
                duration.into(),
                amplitude.into(),
                detuning.into(),
                phase.into(),
            ],
        ),
        support.into(),
        Properties {
            instruction_name: Some("dyn_pulse".to_owned()),
            ..Properties::default()
        },
    )
}

/// Idle evolution for the given duration; lowers to the `dyn_wait`
/// instruction.
pub fn free_evolution(
    duration: impl Into<Expression>,
    support: impl Into<Support>,
) -> Expression {
    Expression::quantum_operator(
        Expression::function("FreeEvolution", vec![duration.into()]),
        support.into(),
        Properties {
            instruction_name: Some("dyn_wait".to_owned()),
            ..Properties::default()
        },
    )
}
