// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Grouped Traits Module
//!
//! The shared interface over the closed set of grouped containers
//! (`GroupedVector`, `GroupedMatrix`) and their views.
//!
//! - [`Grouped`]: anything carrying a `Partition` – containers and views.
//!   Query utilities such as [`crate::unit_count`] accept any `Grouped`.
//! - [`GroupedArray`]: a container owning flat data, able to hand out the
//!   borrowed slice for one unit. `GroupedView` is generic over this.
//! - [`Regroup`]: pairs flat data with a partition to build a container.

use std::sync::Arc;

use crate::structs::partition::Partition;
use crate::structs::views::grouped_view::GroupedView;
use crate::traits::shape::Shape;
use crate::traits::type_unions::Numeric;

/// Carries a per-unit partition of its rows.
pub trait Grouped {
    /// The partition over the leading dimension.
    fn partition(&self) -> &Partition;

    /// Number of units.
    #[inline]
    fn n_units(&self) -> usize {
        self.partition().len()
    }

    /// Periods per unit, in unit order.
    #[inline]
    fn period_counts(&self) -> Vec<usize> {
        self.partition().period_counts()
    }
}

/// Flat data plus a partition, sliceable per unit.
///
/// `Unit<'a>` is the zero-copy per-unit slice:
/// `&'a [T]` for vectors, `MatrixV<'a, T>` for matrices.
pub trait GroupedArray: Grouped + Shape + Sized {
    /// Element type.
    type Elem: Numeric;

    /// The ungrouped flat storage.
    type Flat: Regroup<Output = Self>;

    /// Borrowed slice of one unit.
    type Unit<'a>
    where
        Self: 'a;

    /// The flat storage, grouping discarded.
    fn flat(&self) -> &Self::Flat;

    /// The shared partition handle.
    fn partition_arc(&self) -> &Arc<Partition>;

    /// Rows of `unit`. Panics when `unit` or its range is out of bounds.
    fn unit(&self, unit: usize) -> Self::Unit<'_>;

    /// Row count of the flat storage.
    fn n_rows(&self) -> usize;

    /// Returns a zero-copy grouped view.
    #[inline]
    fn view(&self) -> GroupedView<'_, Self> {
        GroupedView::new(self)
    }
}

/// Pairs flat data with a partition.
///
/// Used to rebuild a grouped container after computing on the flat data,
/// e.g. per-unit aggregates expanded back across each unit's periods.
pub trait Regroup: Sized {
    type Output;

    /// Wraps `self` with `partition`. No validation is performed.
    fn regroup(self, partition: impl Into<Arc<Partition>>) -> Self::Output;
}
