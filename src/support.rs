//! Qubit supports: the target and control index sets an operator acts on.

use std::cmp::Ordering;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from checked [`Support`] construction.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum SupportError {
    /// A control set was given without a target set.
    #[error("a controlled operation needs both control and target")]
    ControlWithoutTarget,
    /// The target and control sets share an index.
    #[error("target and control indices cannot overlap")]
    OverlappingTargetControl,
}

/// The qubit indices an operation is applied to, split into target and
/// control indices. Both sets are kept sorted and duplicate-free and are
/// disjoint.
///
/// A support with no indices at all is the distinguished all-qubits
/// support: it applies to every qubit regardless of register size and
/// overlaps with every other support.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Support {
    target: Vec<u32>,
    control: Vec<u32>,
}

impl Support {
    /// Build a target-only support from the given indices.
    pub fn new(indices: impl IntoIterator<Item = u32>) -> Self {
        Support {
            target: sorted(indices),
            control: Vec::new(),
        }
    }

    /// Build a controlled support. The control set must come with a
    /// target set, and the two may not share indices.
    pub fn with_control(
        target: impl IntoIterator<Item = u32>,
        control: impl IntoIterator<Item = u32>,
    ) -> Result<Self, SupportError> {
        let target = sorted(target);
        let control = sorted(control);
        if target.is_empty() && !control.is_empty() {
            return Err(SupportError::ControlWithoutTarget);
        }
        if control.iter().any(|i| target.binary_search(i).is_ok()) {
            return Err(SupportError::OverlappingTargetControl);
        }
        Ok(Support { target, control })
    }

    /// The support covering every qubit.
    pub fn all() -> Self {
        Support {
            target: Vec::new(),
            control: Vec::new(),
        }
    }

    /// True for the all-qubits support.
    pub fn is_all(&self) -> bool {
        self.target.is_empty()
    }

    /// The indices a given operation is applied to.
    pub fn target(&self) -> &[u32] {
        &self.target
    }

    /// The indices used to control a given operation.
    pub fn control(&self) -> &[u32] {
        &self.control
    }

    /// Every index covered by the support, targets first.
    pub fn subspace(&self) -> impl Iterator<Item = u32> + '_ {
        self.target.iter().chain(&self.control).copied()
    }

    /// The largest covered index, or `None` for the all-qubits support.
    pub fn max_index(&self) -> Option<u32> {
        self.subspace().max()
    }

    /// True if both supports cover a common index, without distinguishing
    /// targets from controls.
    pub fn overlap_with(&self, other: &Support) -> bool {
        if self.is_all() || other.is_all() {
            return true;
        }
        self.subspace().any(|i| other.subspace().any(|j| i == j))
    }

    /// Merge two supports. Joining with the all-qubits support covers all
    /// qubits again; if the merged target and control sets would overlap,
    /// target/control identity can no longer be resolved and every index
    /// collapses into the target set.
    pub fn join(&self, other: &Support) -> Support {
        if self.is_all() || other.is_all() {
            return Support::all();
        }
        let target = sorted(self.target.iter().chain(&other.target).copied());
        let control = sorted(self.control.iter().chain(&other.control).copied());
        if control.iter().any(|i| target.binary_search(i).is_ok()) {
            return Support::new(target.into_iter().chain(control));
        }
        Support { target, control }
    }
}

fn sorted(indices: impl IntoIterator<Item = u32>) -> Vec<u32> {
    let mut indices: Vec<u32> = indices.into_iter().collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

impl PartialOrd for Support {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Support {
    /// Supports are totally ordered lexicographically over their
    /// concatenated target-then-control sequence.
    fn cmp(&self, other: &Self) -> Ordering {
        self.subspace().cmp(other.subspace())
    }
}

impl From<u32> for Support {
    fn from(index: u32) -> Self {
        Support::new([index])
    }
}

impl From<i32> for Support {
    fn from(index: i32) -> Self {
        assert!(index >= 0, "qubit indices must be non-negative");
        Support::new([index as u32])
    }
}

impl<const N: usize> From<[u32; N]> for Support {
    fn from(indices: [u32; N]) -> Self {
        Support::new(indices)
    }
}

impl<const N: usize> From<[i32; N]> for Support {
    fn from(indices: [i32; N]) -> Self {
        Support::new(indices.into_iter().map(|i| {
            assert!(i >= 0, "qubit indices must be non-negative");
            i as u32
        }))
    }
}

impl From<&[u32]> for Support {
    fn from(indices: &[u32]) -> Self {
        Support::new(indices.iter().copied())
    }
}

impl From<Vec<u32>> for Support {
    fn from(indices: Vec<u32>) -> Self {
        Support::new(indices)
    }
}
