use qexpr_rs::support::{Support, SupportError};

#[test]
fn single_qubit_initialization() {
    assert_eq!(Support::new([1]), Support::with_control([1], []).unwrap());
    assert_eq!(Support::from(1), Support::new([1]));
}

#[test]
fn multiple_qubit_initialization() {
    assert_eq!(Support::new([3, 1, 2]), Support::with_control([1, 2, 3], []).unwrap());
    assert_eq!(Support::from([1, 2, 3]), Support::new([1, 2, 3]));
}

#[test]
fn all_qubit_initialization() {
    assert_eq!(Support::all(), Support::new([]));
    assert!(Support::all().is_all());
    assert_eq!(Support::all().max_index(), None);
}

#[test]
fn controlled_initialization_sorts_indices() {
    let support = Support::with_control([3, 1], [2, 0]).unwrap();
    assert_eq!(support.target(), &[1, 3]);
    assert_eq!(support.control(), &[0, 2]);
}

#[test]
fn control_without_target_is_rejected() {
    assert_eq!(
        Support::with_control([], [2]),
        Err(SupportError::ControlWithoutTarget)
    );
}

#[test]
fn overlapping_target_control_is_rejected() {
    assert_eq!(
        Support::with_control([2, 3], [1, 2]),
        Err(SupportError::OverlappingTargetControl)
    );
}

#[test]
fn order_by_target() {
    assert!(Support::new([1, 2, 3]) < Support::new([3, 4]));
}

#[test]
fn order_interleaves_target_and_control() {
    let s1 = Support::with_control([1, 2], [3]).unwrap();
    let s2 = Support::new([3, 4]);
    assert!(s1 < s2);
}

#[test]
fn order_on_same_target_falls_to_control() {
    let s1 = Support::with_control([1, 3], [4]).unwrap();
    let s2 = Support::with_control([1, 3], [2, 5]).unwrap();
    assert!(s1 > s2);
}

#[test]
fn overlap_ignores_target_control_distinction() {
    let s1 = Support::new([1, 2]);
    let s2 = Support::with_control([2, 1], [3]).unwrap();
    let s3 = Support::new([3]);
    assert!(s1.overlap_with(&s2));
    assert!(!s1.overlap_with(&s3));
}

#[test]
fn all_overlaps_with_everything() {
    assert!(Support::all().overlap_with(&Support::new([1])));
    assert!(Support::new([1]).overlap_with(&Support::all()));
    assert!(Support::all().overlap_with(&Support::all()));
}

#[test]
fn join_is_idempotent() {
    let support = Support::with_control([3], [1, 2]).unwrap();
    assert_eq!(support.join(&support), support);
}

#[test]
fn join_with_all_covers_all() {
    let s1 = Support::new([1]);
    let s2 = Support::with_control([2, 3], [1]).unwrap();
    assert_eq!(s1.join(&Support::all()), Support::all());
    assert_eq!(s2.join(&Support::all()), Support::all());
}

#[test]
fn join_collapses_ambiguous_controls_into_targets() {
    let s1 = Support::new([1, 3]);
    let s2 = Support::with_control([3], [1, 2]).unwrap();
    assert_eq!(s1.join(&s2), Support::new([1, 2, 3]));
}

#[test]
fn join_merges_targets_and_controls_separately() {
    let s1 = Support::with_control([3], [1, 2]).unwrap();
    let s2 = Support::with_control([0], [1]).unwrap();
    assert_eq!(s1.join(&s2), Support::with_control([0, 3], [1, 2]).unwrap());
}

#[test]
fn max_index_spans_targets_and_controls() {
    assert_eq!(Support::new([0, 2]).max_index(), Some(2));
    assert_eq!(Support::with_control([1], [4]).unwrap().max_index(), Some(4));
}
