//! Adapter from opaque ordered containers to the sequence comparator.
//!
//! A container may live in any backing representation (contiguous, ring buffer,
//! linked nodes, or memory owned by an external subsystem). The adapter checks the
//! size precondition, materializes both sides into host `Vec`s, and delegates to
//! [`SequenceComparator`].

use std::collections::{LinkedList, VecDeque};
use std::fmt::Debug;

use num_traits::AsPrimitive;

use crate::config;
use crate::outcome::{AssertResult, FailureOutcome, LocationTag};
use crate::sequence::{DIFFERENT_SIZES, ElementPredicate, ExactEquality, SequenceComparator};
use crate::tolerance::{ComparisonTolerance, TolerancePredicate};

/// A finite, order-preserving collection that can be copied into host memory.
pub trait OrderedContainer {
    type Item;

    /// Declared number of elements.
    fn size(&self) -> usize;

    /// Copy the elements, in order, into a locally iterable buffer.
    fn materialize(&self) -> Vec<Self::Item>;
}

impl<T: Clone> OrderedContainer for [T] {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn materialize(&self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T: Clone, const N: usize> OrderedContainer for [T; N] {
    type Item = T;

    fn size(&self) -> usize {
        N
    }

    fn materialize(&self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T: Clone> OrderedContainer for Vec<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn materialize(&self) -> Vec<T> {
        self.clone()
    }
}

impl<T: Clone> OrderedContainer for VecDeque<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn materialize(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone> OrderedContainer for LinkedList<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn materialize(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<C: OrderedContainer + ?Sized> OrderedContainer for &C {
    type Item = C::Item;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn materialize(&self) -> Vec<C::Item> {
        (**self).materialize()
    }
}

/// Reject containers whose declared sizes differ.
pub fn ensure_same_size<CA, CB>(a: &CA, b: &CB, location: &LocationTag) -> AssertResult
where
    CA: OrderedContainer + ?Sized,
    CB: OrderedContainer + ?Sized,
{
    if a.size() != b.size() {
        return Err(FailureOutcome::precondition(location, DIFFERENT_SIZES));
    }
    Ok(())
}

impl SequenceComparator {
    /// Size check, materialization, then [`compare`](Self::compare) on the host copies.
    pub fn compare_containers<CA, CB, P>(
        &self,
        a: &CA,
        b: &CB,
        predicate: &P,
        location: &LocationTag,
    ) -> AssertResult
    where
        CA: OrderedContainer + ?Sized,
        CB: OrderedContainer + ?Sized,
        CA::Item: Debug,
        CB::Item: Debug,
        P: ElementPredicate<CA::Item, CB::Item> + ?Sized,
    {
        ensure_same_size(a, b, location)?;
        let host_a = a.materialize();
        let host_b = b.materialize();
        self.compare(&host_a, &host_b, predicate, location)
    }
}

/// Exact element-wise comparison of two containers.
///
/// Unequal sizes raise a precondition error regardless of content.
pub fn assert_equal_containers<CA, CB>(a: &CA, b: &CB, location: &LocationTag) -> AssertResult
where
    CA: OrderedContainer + ?Sized,
    CB: OrderedContainer + ?Sized,
    CA::Item: PartialEq<CB::Item> + Debug,
    CB::Item: Debug,
{
    SequenceComparator::from_config(config::config()).compare_containers(
        a,
        b,
        &ExactEquality,
        location,
    )
}

/// Tolerance-based comparison of two numeric containers under the default tolerance.
pub fn assert_almost_equal_containers<CA, CB>(
    a: &CA,
    b: &CB,
    location: &LocationTag,
) -> AssertResult
where
    CA: OrderedContainer + ?Sized,
    CB: OrderedContainer + ?Sized,
    CA::Item: AsPrimitive<f64> + Debug,
    CB::Item: AsPrimitive<f64> + Debug,
{
    assert_almost_equal_containers_tol(a, b, location, &config::config().tolerance)
}

/// Tolerance-based comparison of two numeric containers under an explicit tolerance.
pub fn assert_almost_equal_containers_tol<CA, CB>(
    a: &CA,
    b: &CB,
    location: &LocationTag,
    tol: &ComparisonTolerance,
) -> AssertResult
where
    CA: OrderedContainer + ?Sized,
    CB: OrderedContainer + ?Sized,
    CA::Item: AsPrimitive<f64> + Debug,
    CB::Item: AsPrimitive<f64> + Debug,
{
    SequenceComparator::from_config(config::config()).compare_containers(
        a,
        b,
        &TolerancePredicate::new(*tol),
        location,
    )
}
