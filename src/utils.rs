//! # Utilities - *Free-Function Entry Points*
//!
//! Thin free-function forms of the partition builder, the view and regroup
//! operations, and the unit queries. Each forwards to the corresponding
//! method so either style can be used.

use std::sync::Arc;

use crate::structs::partition::Partition;
use crate::structs::views::grouped_view::GroupedView;
use crate::traits::grouped::{Grouped, GroupedArray, Regroup};

/// Builds a partition where range `i` holds `counts[i]` consecutive indices,
/// starting at 0.
///
/// ```rust
/// let p = panelarrow::make_partition(&[3, 2]);
/// assert_eq!(p.as_slice(), &[0..3, 3..5]);
/// ```
#[inline]
pub fn make_partition(counts: &[usize]) -> Partition {
    Partition::from_counts(counts)
}

/// Number of units in a container or view.
#[inline]
pub fn unit_count<G: Grouped + ?Sized>(x: &G) -> usize {
    x.n_units()
}

/// Periods per unit of a container or view, in unit order.
#[inline]
pub fn period_counts<G: Grouped + ?Sized>(x: &G) -> Vec<usize> {
    x.period_counts()
}

/// Zero-copy per-unit view of `container`.
#[inline]
pub fn view<G: GroupedArray>(container: &G) -> GroupedView<'_, G> {
    container.view()
}

/// Pairs flat `data` with `partition`. No validation is performed.
#[inline]
pub fn regroup<D: Regroup>(data: D, partition: impl Into<Arc<Partition>>) -> D::Output {
    let partition = partition.into();
    log::debug!("regroup: {} units", partition.len());
    data.regroup(partition)
}
