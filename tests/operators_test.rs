use qexpr_rs::Support;
use qexpr_rs::constructors::{unitary_hermitian_operator, value, variable};
use qexpr_rs::operators::{cz, h, not, rx, ry, swap, x, xm, xp, y, z, z0, z1};

#[test]
fn unitary_hermitian_operators_square_to_identity() {
    assert_eq!(h(Support::all()) * h(Support::all()), value(1));
    assert_eq!(x(Support::all()) * x(Support::all()), value(1));
    assert_eq!(y(Support::all()) * y(Support::all()), value(1));
    assert_eq!(z(Support::all()) * z(Support::all()), value(1));
    assert_eq!(cz(Support::all()) * cz(Support::all()), value(1));
    assert_eq!(not(Support::all()) * not(Support::all()), value(1));
    assert_eq!(swap(Support::all()) * swap(Support::all()), value(1));
}

#[test]
fn user_defined_hermitian_operator() {
    let a = unitary_hermitian_operator("A", 1);
    assert_eq!(a.clone() * a.clone(), value(1));
    let b = unitary_hermitian_operator("A", 2);
    assert_ne!(a.clone() * b.clone(), value(1));
    assert!((a * b).is_kronecker_product());
}

#[test]
fn integral_powers_reduce_modulo_two() {
    assert_eq!(x(0).pow(2), value(1));
    assert_eq!(x(0).pow(3), x(0));
    assert_eq!(x(0).pow(-1), x(0));
    assert_eq!(x(0).pow(-2), value(1));
}

#[test]
fn fractional_powers_fuse_on_matching_support() {
    assert_eq!(x(0).pow(0.5) * x(0).pow(0.5), x(0));
    let split = x(0).pow(0.5) * x(1).pow(0.5);
    assert!(split.is_kronecker_product());
    assert_ne!(split, (x(0) * x(1)).pow(0.5));
}

#[test]
fn projector_idempotence_and_orthogonality() {
    assert_eq!(z0(0) * z0(0), z0(0));
    assert_eq!(z1(0) * z1(0), z1(0));
    assert_eq!(z0(0) * z1(0), value(0));
    assert_eq!(xp(0) * xm(0), value(0));
}

#[test]
fn projectors_on_distinct_supports_stay_apart() {
    let product = z0(0) * z1(1);
    assert!(product.is_kronecker_product());
    assert_eq!(product, z1(1) * z0(0));
}

#[test]
fn projector_annihilation_propagates_through_sequences() {
    // Once two orthogonal projectors meet inside a longer product the
    // whole term is null.
    assert_eq!(x(1) * z0(0) * z1(0), value(0));
}

#[test]
fn disjoint_supports_order_canonically() {
    assert_eq!(x(1) * x(0), x(0) * x(1));
    assert_eq!(x(2) * (x(0) * x(1)), x(0) * (x(1) * x(2)));
    assert!((x(0) * x(1)).is_kronecker_product());
}

#[test]
fn overlapping_supports_preserve_application_order() {
    let controlled = x(Support::with_control([1], [0]).unwrap());
    assert_ne!(z(0) * controlled.clone(), controlled * z(0));
}

#[test]
fn same_support_operators_do_not_commute() {
    assert_ne!(x(0) * y(0), y(0) * x(0));
}

#[test]
fn rotations_fuse_by_angle_addition() {
    let theta = variable("theta").unwrap();
    assert_eq!(
        rx(theta.clone() / 2, 0) * rx(theta.clone() / 2, 0),
        rx(theta.clone(), 0)
    );
    assert_eq!(rx(theta.clone(), 0) * rx(-theta.clone(), 0), value(1));
    // Distinct kinds on one support stay a product.
    assert_ne!(rx(theta.clone(), 0) * ry(theta.clone(), 0), rx(2 * theta, 0));
}

#[test]
fn rotations_only_fuse_on_matching_support() {
    let theta = variable("theta").unwrap();
    let product = rx(theta.clone() / 2, 0) * rx(theta.clone() / 2, 1);
    assert!(product.is_kronecker_product());
    assert_ne!(product, rx(theta, 0));
}

#[test]
fn daggered_rotation_cancels_its_partner() {
    let theta = variable("theta").unwrap();
    let gate = rx(theta.clone(), 0);
    assert_eq!(gate.clone() * gate.dag(), value(1));
}

#[test]
fn dag_is_an_involution_on_rotations() {
    let theta = variable("theta").unwrap();
    let gate = rx(theta, 0);
    assert_ne!(gate.dag(), gate);
    assert_eq!(gate.dag().dag(), gate);
}

#[test]
fn dag_fixes_hermitian_operators() {
    assert_eq!(x(0).dag(), x(0));
    let sequence = x(0) * z(1);
    assert_eq!(sequence.dag(), sequence);
}

#[test]
fn hermitian_conjugation_distributes_over_sums() {
    let theta = variable("theta").unwrap();
    let sum = x(0) + rx(theta.clone(), 1);
    assert_eq!(sum.dag(), x(0) + rx(theta, 1).dag());
}
