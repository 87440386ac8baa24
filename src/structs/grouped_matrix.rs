// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # **GroupedMatrix Module** - *Rank-2 Panel Data*
//!
//! A column-major [`Matrix`] whose rows are grouped into per-unit runs by a
//! shared [`Partition`]. Rows are observations (unit × period), columns are
//! variables.
//!
//! - Global operations (`+`, `-`, scalar `*`, matrix-vector `*`) work on the
//!   whole stacked matrix and carry the partition through.
//! - [`GroupedArray::view`] yields one [`MatrixV`] row window per unit.

use std::fmt::{self, Display, Formatter};
use std::hash::Hash;
use std::ops::Index;
use std::sync::Arc;

use vec64::Vec64;

use crate::enums::error::PanelError;
use crate::enums::shape_dim::ShapeDim;
use crate::structs::grouped_vector::GroupedVector;
use crate::structs::matrix::{Matrix, write_rows};
use crate::structs::partition::Partition;
use crate::structs::views::matrix_view::MatrixV;
use crate::traits::grouped::{Grouped, GroupedArray, Regroup};
use crate::traits::print::MAX_PREVIEW_ROWS;
use crate::traits::shape::Shape;
use crate::traits::type_unions::Numeric;

/// # GroupedMatrix
///
/// Dense column-major matrix plus a per-unit partition of its rows.
///
/// ### Example
/// ```rust
/// use panelarrow::{GroupedMatrix, GroupedArray, Matrix};
///
/// let x = Matrix::from_rows(&[[3.0, 5.0], [4.0, 7.0], [5.0, 9.0], [8.0, 2.0], [3.0, 2.0]]).unwrap();
/// let x = GroupedMatrix::from_counts(x, &[3, 2]);
///
/// let y = &x * &[1.0, 1.0][..];
/// assert_eq!(y.unwrap().as_slice(), &[8.0, 11.0, 14.0, 10.0, 5.0]);
///
/// let first_unit = x.view().get(0);
/// assert_eq!(first_unit.col(0), &[3.0, 4.0, 5.0]);
/// ```
#[derive(Clone, PartialEq)]
pub struct GroupedMatrix<T> {
    data: Matrix<T>,
    partition: Arc<Partition>,
}

impl<T: Numeric> GroupedMatrix<T> {
    /// Pairs `data` with `partition` as given.
    ///
    /// The partition is not checked against `data.nrows`; a bad range
    /// surfaces as an out-of-bounds access when its unit is read.
    pub fn new(data: Matrix<T>, partition: impl Into<Arc<Partition>>) -> Self {
        let partition = partition.into();
        log::trace!(
            "GroupedMatrix::new: {} × {}, {} units",
            data.nrows,
            data.ncols,
            partition.len()
        );
        Self { data, partition }
    }

    /// Builds the partition from per-unit row counts, then pairs it with `data`.
    pub fn from_counts(data: Matrix<T>, counts: &[usize]) -> Self {
        Self::new(data, Partition::from_counts(counts))
    }

    /// Validated constructor.
    ///
    /// # Errors
    /// Any partition consistency error from [`Partition::validate`]
    /// against `data.nrows`.
    pub fn try_new(data: Matrix<T>, partition: impl Into<Arc<Partition>>) -> Result<Self, PanelError> {
        let partition = partition.into();
        partition.validate(data.nrows)?;
        Ok(Self::new(data, partition))
    }

    /// Builds the partition from a sorted unit id column with one id per row.
    ///
    /// # Errors
    /// `NonContiguousUnit` for unsorted ids, or a partition error if
    /// `ids.len() != data.nrows`.
    pub fn from_unit_ids<K: Eq + Hash>(data: Matrix<T>, ids: &[K]) -> Result<Self, PanelError> {
        let partition = Partition::from_unit_ids(ids)?;
        Self::try_new(data, partition)
    }

    /// Element at `(row, col)` of the flat matrix. Grouping plays no part.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data.get(row, col)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &Matrix<T> {
        &self.data
    }

    /// Column `col` across all units.
    #[inline]
    pub fn col(&self, col: usize) -> &[T] {
        self.data.col(col)
    }

    /// Column `col` as a grouped vector sharing this partition.
    pub fn column(&self, col: usize) -> GroupedVector<T> {
        let data: Vec64<T> = self.data.col(col).iter().copied().collect();
        GroupedVector::new(data, Arc::clone(&self.partition))
    }

    /// Consumes the container and returns the flat matrix.
    #[inline]
    pub fn into_inner(self) -> Matrix<T> {
        self.data
    }

    /// Splits into flat matrix and partition handle.
    #[inline]
    pub fn into_parts(self) -> (Matrix<T>, Arc<Partition>) {
        (self.data, self.partition)
    }

    /// Same partition, new data. Used by the kernels to carry grouping through.
    #[inline]
    pub(crate) fn with_data<U: Numeric>(&self, data: Matrix<U>) -> GroupedMatrix<U> {
        GroupedMatrix { data, partition: Arc::clone(&self.partition) }
    }
}

impl<T> Grouped for GroupedMatrix<T> {
    #[inline]
    fn partition(&self) -> &Partition {
        &self.partition
    }
}

impl<T: Numeric> GroupedArray for GroupedMatrix<T> {
    type Elem = T;
    type Flat = Matrix<T>;
    type Unit<'a>
        = MatrixV<'a, T>
    where
        Self: 'a;

    #[inline]
    fn flat(&self) -> &Matrix<T> {
        &self.data
    }

    #[inline]
    fn partition_arc(&self) -> &Arc<Partition> {
        &self.partition
    }

    #[inline]
    fn unit(&self, unit: usize) -> MatrixV<'_, T> {
        let r = self.partition.range(unit);
        assert!(r.start <= r.end, "unit range inverted");
        assert!(r.end <= self.data.nrows, "unit range out of bounds");
        MatrixV::new(&self.data, r.start, r.len())
    }

    #[inline]
    fn n_rows(&self) -> usize {
        self.data.nrows
    }
}

impl<T: Numeric> Regroup for Matrix<T> {
    type Output = GroupedMatrix<T>;

    fn regroup(self, partition: impl Into<Arc<Partition>>) -> GroupedMatrix<T> {
        GroupedMatrix::new(self, partition)
    }
}

impl<T: Numeric> Shape for GroupedMatrix<T> {
    fn shape(&self) -> ShapeDim {
        self.data.shape()
    }
}

impl<T: Numeric> Index<(usize, usize)> for GroupedMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &T {
        &self.data[index]
    }
}

impl<T: Numeric> fmt::Debug for GroupedMatrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedMatrix")
            .field("data", &self.data)
            .field("partition", &self.partition)
            .finish()
    }
}

impl<T: Numeric> Display for GroupedMatrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GroupedMatrix: {} × {}, {} units",
            self.data.nrows,
            self.data.ncols,
            self.partition.len()
        )?;
        for (unit, range) in self.partition.iter().take(MAX_PREVIEW_ROWS).enumerate() {
            let end = range.end.min(self.data.nrows);
            write!(f, "\n-- unit {} ({} periods)", unit, range.len())?;
            write_rows(f, &self.data, range.start.min(end)..end)?;
        }
        if self.partition.len() > MAX_PREVIEW_ROWS {
            write!(f, "\n... ({} units total)", self.partition.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use super::*;

    fn panel() -> GroupedMatrix<f64> {
        let x = Matrix::from_rows(&[[3.0, 5.0], [4.0, 7.0], [5.0, 9.0], [8.0, 2.0], [3.0, 2.0]])
            .unwrap();
        GroupedMatrix::from_counts(x, &[3, 2])
    }

    #[test]
    fn test_shape_ignores_grouping() {
        let x = panel();
        assert_eq!(x.shape(), ShapeDim::Rank2 { rows: 5, cols: 2 });
        assert_eq!(x.n_units(), 2);
        assert_eq!(x.period_counts(), vec![3, 2]);
        assert_eq!(x.get(3, 0), 8.0);
        assert_eq!(x[(4, 1)], 2.0);
    }

    #[test]
    fn test_unit_windows() {
        let x = panel();
        let u1 = x.unit(1);
        assert_eq!(u1.nrows(), 2);
        assert_eq!(u1.col(0), &[8.0, 3.0]);
        assert_eq!(u1.row(0), vec![8.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "unit range out of bounds")]
    fn test_unit_past_data_panics() {
        let x = GroupedMatrix::new(panel().into_inner(), Partition::from_counts(&[3, 3]));
        let _ = x.unit(1);
    }

    #[test]
    #[should_panic(expected = "unit range inverted")]
    fn test_inverted_unit_range_panics() {
        let inverted = Partition::new(vec![0..3, Range { start: 4, end: 3 }]);
        let x = GroupedMatrix::new(panel().into_inner(), inverted);
        let _ = x.unit(1);
    }

    #[test]
    fn test_column_keeps_partition() {
        let x = panel();
        let c = x.column(1);
        assert_eq!(c.as_slice(), &[5.0, 7.0, 9.0, 2.0, 2.0]);
        assert!(Arc::ptr_eq(c.partition_arc(), x.partition_arc()));
    }

    #[test]
    fn test_from_unit_ids_and_try_new() {
        let x = panel();
        let by_id = GroupedMatrix::from_unit_ids(x.data().clone(), &[1, 1, 1, 2, 2]).unwrap();
        assert_eq!(by_id.partition(), x.partition());

        let err = GroupedMatrix::try_new(x.into_inner(), Partition::from_counts(&[3, 1])).unwrap_err();
        assert_eq!(err, PanelError::CoverageMismatch { covered: 4, len: 5 });
    }

    #[test]
    fn test_display_lists_units() {
        let s = panel().to_string();
        assert!(s.starts_with("GroupedMatrix: 5 × 2, 2 units"));
        assert!(s.contains("-- unit 1 (2 periods)"));
    }
}
