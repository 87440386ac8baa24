// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # **GroupedView Module** - *Per-Unit Window over a Grouped Container*
//!
//! `GroupedView` borrows a `GroupedVector` or `GroupedMatrix` and presents it
//! as a sequence of units. Indexing yields the unit's zero-copy slice:
//! `&[T]` for vectors, [`MatrixV`](crate::MatrixV) for matrices.
//!
//! ## Behaviour
//! - Creation is O(1) and copies nothing.
//! - The view cannot outlive its container.
//! - [`into_flat`](GroupedView::into_flat) drops the grouping and returns the
//!   container's storage; [`regroup`](GroupedView::regroup) re-pairs a copy of it
//!   with another partition.
//! - With the `parallel_proc` feature, [`par_map`](GroupedView::par_map) runs a
//!   closure per unit on the rayon pool.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

#[cfg(feature = "parallel_proc")]
use rayon::prelude::*;

use crate::enums::error::PanelError;
use crate::enums::shape_dim::ShapeDim;
use crate::structs::partition::Partition;
use crate::traits::grouped::{Grouped, GroupedArray, Regroup};
use crate::traits::shape::Shape;

/// # GroupedView
///
/// Borrowed, sequence-like view over a grouped container, one element per unit.
///
/// ### Example
/// ```rust
/// use panelarrow::{GroupedVector, GroupedArray, Vec64};
///
/// let data: Vec64<i64> = (1..=5).collect();
/// let y = GroupedVector::from_counts(data, &[2, 3]);
/// let v = y.view();
/// assert_eq!(v.len(), 2);
/// assert_eq!(v.get(1), &[3, 4, 5]);
/// assert_eq!(v.into_flat().as_slice(), &[1, 2, 3, 4, 5]);
/// ```
pub struct GroupedView<'a, G> {
    inner: &'a G,
}

impl<'a, G> Clone for GroupedView<'a, G> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, G> Copy for GroupedView<'a, G> {}

impl<'a, G: GroupedArray> GroupedView<'a, G> {
    #[inline]
    pub fn new(inner: &'a G) -> Self {
        log::trace!("GroupedView::new: {} units", inner.n_units());
        Self { inner }
    }

    /// Number of units.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.n_units()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice of unit `i`.
    ///
    /// # Panics
    /// When `i >= len()` or the unit's range runs past the data.
    #[inline]
    pub fn get(&self, i: usize) -> G::Unit<'a> {
        self.inner.unit(i)
    }

    /// Checked variant of [`get`](Self::get).
    ///
    /// # Errors
    /// - `UnitOutOfBounds` when `i >= len()`.
    /// - `NonContiguousRanges` when the unit's range ends before it starts.
    /// - `RangeOutOfBounds` when the range runs past the data.
    pub fn try_get(&self, i: usize) -> Result<G::Unit<'a>, PanelError> {
        let range = self
            .inner
            .partition()
            .get(i)
            .ok_or(PanelError::UnitOutOfBounds { unit: i, n_units: self.len() })?;
        if range.start > range.end {
            return Err(PanelError::NonContiguousRanges {
                unit: i,
                expected_start: range.end,
                found_start: range.start,
            });
        }
        let n_rows = self.inner.n_rows();
        if range.end > n_rows {
            return Err(PanelError::RangeOutOfBounds { unit: i, end: range.end, len: n_rows });
        }
        Ok(self.inner.unit(i))
    }

    /// Iterator over unit slices in partition order.
    #[inline]
    pub fn iter(&self) -> GroupedViewIter<'a, G> {
        GroupedViewIter { inner: self.inner, front: 0, back: self.len() }
    }

    /// Applies `f` to each unit and collects the results in unit order.
    pub fn map<R, F>(&self, f: F) -> Vec<R>
    where
        F: FnMut(G::Unit<'a>) -> R,
    {
        self.iter().map(f).collect()
    }

    /// The wrapped flat data, grouping discarded. Same storage, no copy.
    #[inline]
    pub fn into_flat(self) -> &'a G::Flat {
        self.inner.flat()
    }

    /// The container this view borrows.
    #[inline]
    pub fn container(&self) -> &'a G {
        self.inner
    }

    /// Pairs a copy of the viewed data with `partition`.
    pub fn regroup(&self, partition: impl Into<Arc<Partition>>) -> G
    where
        G::Flat: Clone,
    {
        let partition = partition.into();
        log::debug!(
            "GroupedView::regroup: {} units -> {} units",
            self.len(),
            partition.len()
        );
        self.inner.flat().clone().regroup(partition)
    }
}

#[cfg(feature = "parallel_proc")]
impl<'a, G> GroupedView<'a, G>
where
    G: GroupedArray + Sync,
{
    /// Parallel [`map`](Self::map) over units on the rayon pool.
    ///
    /// Unit ranges are disjoint and the backing data is only read.
    pub fn par_map<R, F>(&self, f: F) -> Vec<R>
    where
        F: Fn(G::Unit<'a>) -> R + Sync + Send,
        R: Send,
    {
        let inner = self.inner;
        (0..self.len()).into_par_iter().map(|i| f(inner.unit(i))).collect()
    }
}

impl<'a, G> Grouped for GroupedView<'a, G>
where
    G: Grouped,
{
    #[inline]
    fn partition(&self) -> &Partition {
        self.inner.partition()
    }
}

impl<'a, G: GroupedArray> Shape for GroupedView<'a, G> {
    /// One shape per unit.
    fn shape(&self) -> ShapeDim {
        let outer = self.inner.shape();
        let units = self
            .inner
            .partition()
            .iter()
            .map(|r| match &outer {
                ShapeDim::Rank2 { cols, .. } => ShapeDim::Rank2 { rows: r.len(), cols: *cols },
                _ => ShapeDim::Rank1(r.len()),
            })
            .collect();
        ShapeDim::Collection(units)
    }
}

impl<'a, G: GroupedArray> fmt::Debug for GroupedView<'a, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedView")
            .field("n_units", &self.len())
            .field("n_rows", &self.inner.n_rows())
            .finish()
    }
}

/// Iterator over the units of a [`GroupedView`].
pub struct GroupedViewIter<'a, G> {
    inner: &'a G,
    front: usize,
    back: usize,
}

impl<'a, G: GroupedArray> Iterator for GroupedViewIter<'a, G> {
    type Item = G::Unit<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let unit = self.inner.unit(self.front);
        self.front += 1;
        Some(unit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, G: GroupedArray> DoubleEndedIterator for GroupedViewIter<'a, G> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.inner.unit(self.back))
    }
}

impl<'a, G: GroupedArray> ExactSizeIterator for GroupedViewIter<'a, G> {}

impl<'a, G: GroupedArray> FusedIterator for GroupedViewIter<'a, G> {}

impl<'a, G: GroupedArray> IntoIterator for GroupedView<'a, G> {
    type Item = G::Unit<'a>;
    type IntoIter = GroupedViewIter<'a, G>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'v, G: GroupedArray> IntoIterator for &'v GroupedView<'a, G> {
    type Item = G::Unit<'a>;
    type IntoIter = GroupedViewIter<'a, G>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
