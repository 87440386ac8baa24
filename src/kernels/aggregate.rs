// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Aggregate Module
//!
//! Per-unit reductions and their expansion back to full panel shape.
//!
//! - `group_sums` / `group_means`: one value (vector) or one row (matrix) per unit.
//! - [`expand`] / [`expand_rows`]: repeat aggregate `i` over every row of unit `i`.
//! - `between` / `within`: per-unit means at full shape, and the data demeaned by them.
//!
//! ```rust
//! use panelarrow::{GroupedArray, GroupedMatrix, Matrix, expand_rows};
//!
//! let x = Matrix::from_rows(&[[3.0, 5.0], [4.0, 7.0], [5.0, 9.0], [8.0, 2.0], [3.0, 2.0]]).unwrap();
//! let x = GroupedMatrix::from_unit_ids(x, &[1, 1, 1, 2, 2]).unwrap();
//!
//! let means = x.group_means();
//! assert_eq!(means.row(0), vec![4.0, 7.0]);
//! assert_eq!(means.row(1), vec![5.5, 2.0]);
//!
//! let expanded = expand_rows(&means, x.partition_arc().clone()).unwrap();
//! assert_eq!(expanded.data().row(2), vec![4.0, 7.0]);
//! assert_eq!(expanded.data().row(3), vec![5.5, 2.0]);
//! ```

use std::sync::Arc;

use vec64::Vec64;

use crate::enums::error::PanelError;
use crate::kernels::arithmetic::zip_with;
use crate::structs::grouped_matrix::GroupedMatrix;
use crate::structs::grouped_vector::GroupedVector;
use crate::structs::matrix::Matrix;
use crate::structs::partition::Partition;
use crate::traits::grouped::{Grouped, GroupedArray};
use crate::traits::type_unions::{Float, Numeric};

#[inline]
fn sum<T: Numeric>(values: &[T]) -> T {
    values.iter().fold(T::zero(), |acc, &v| acc + v)
}

#[inline]
fn mean<T: Float>(values: &[T]) -> T {
    let n = T::from(values.len()).unwrap_or_else(T::nan);
    sum(values) / n
}

impl<T: Numeric> GroupedVector<T> {
    /// Sum of each unit's values, in unit order.
    pub fn group_sums(&self) -> Vec64<T> {
        self.view().iter().map(sum).collect()
    }
}

impl<T: Float> GroupedVector<T> {
    /// Mean of each unit's values, in unit order.
    pub fn group_means(&self) -> Vec64<T> {
        self.view().iter().map(mean).collect()
    }

    /// Unit means repeated over each unit's periods. Same partition.
    ///
    /// # Errors
    /// Propagates [`expand`] errors.
    pub fn between(&self) -> Result<GroupedVector<T>, PanelError> {
        expand(&self.group_means(), Arc::clone(self.partition_arc()))
    }

    /// Data minus [`between`](Self::between). Each unit's values sum to zero.
    ///
    /// # Errors
    /// `LengthMismatch` if the partition does not cover the data.
    pub fn within(&self) -> Result<GroupedVector<T>, PanelError> {
        let between = self.between()?;
        let data = zip_with(self.as_slice(), between.as_slice(), "within", |a, b| a - b)?;
        Ok(self.with_data(data))
    }
}

impl<T: Numeric> GroupedMatrix<T> {
    /// Column sums per unit, as an `n_units × ncols` matrix.
    pub fn group_sums(&self) -> Matrix<T> {
        self.reduce_units(sum)
    }

    fn reduce_units<F: Fn(&[T]) -> T>(&self, f: F) -> Matrix<T> {
        let n_units = self.n_units();
        let mut data = Vec64::with_capacity(n_units * self.ncols());
        for col in 0..self.ncols() {
            for unit in self.view() {
                data.push(f(unit.col(col)));
            }
        }
        Matrix { nrows: n_units, ncols: self.ncols(), data }
    }
}

impl<T: Float> GroupedMatrix<T> {
    /// Column means per unit, as an `n_units × ncols` matrix.
    pub fn group_means(&self) -> Matrix<T> {
        self.reduce_units(mean)
    }

    /// Unit means repeated over each unit's rows. Same partition.
    ///
    /// # Errors
    /// Propagates [`expand_rows`] errors.
    pub fn between(&self) -> Result<GroupedMatrix<T>, PanelError> {
        expand_rows(&self.group_means(), Arc::clone(self.partition_arc()))
    }

    /// Data minus [`between`](Self::between). Per unit, every column sums to zero.
    ///
    /// # Errors
    /// `LengthMismatch` if the partition does not cover the data.
    pub fn within(&self) -> Result<GroupedMatrix<T>, PanelError> {
        let between = self.between()?;
        let data = self.data().zip_map(between.data(), "within", |a, b| a - b)?;
        Ok(self.with_data(data))
    }
}

fn check_units(op: &'static str, found: usize, partition: &Partition) -> Result<(), PanelError> {
    if found != partition.len() {
        log::warn!("{}: {} aggregates for {} units", op, found, partition.len());
        return Err(PanelError::ShapeMismatch {
            op,
            expected: format!("{} values (one per unit)", partition.len()),
            found: format!("{} values", found),
        });
    }
    Ok(())
}

/// Repeats `agg[i]` over every period of unit `i`.
///
/// # Errors
/// `PanelError::ShapeMismatch` if `agg.len()` is not the unit count.
pub fn expand<T: Numeric>(
    agg: &[T],
    partition: impl Into<Arc<Partition>>,
) -> Result<GroupedVector<T>, PanelError> {
    let partition = partition.into();
    check_units("expand", agg.len(), &partition)?;
    let mut data = Vec64::with_capacity(partition.n_rows());
    for (&v, range) in agg.iter().zip(partition.iter()) {
        for _ in range.clone() {
            data.push(v);
        }
    }
    log::debug!("expand: {} units -> {} rows", agg.len(), data.len());
    Ok(GroupedVector::new(data, partition))
}

/// Repeats row `i` of `agg` over every row of unit `i`.
///
/// # Errors
/// `PanelError::ShapeMismatch` if `agg.nrows` is not the unit count.
pub fn expand_rows<T: Numeric>(
    agg: &Matrix<T>,
    partition: impl Into<Arc<Partition>>,
) -> Result<GroupedMatrix<T>, PanelError> {
    let partition = partition.into();
    check_units("expand_rows", agg.nrows, &partition)?;
    let data = agg.repeat_rows(&partition.period_counts())?;
    log::debug!("expand_rows: {} units -> {} rows", agg.nrows, data.nrows);
    Ok(GroupedMatrix::new(data, partition))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> GroupedMatrix<f64> {
        let x = Matrix::from_rows(&[[3.0, 5.0], [4.0, 7.0], [5.0, 9.0], [8.0, 2.0], [3.0, 2.0]])
            .unwrap();
        GroupedMatrix::from_unit_ids(x, &[1, 1, 1, 2, 2]).unwrap()
    }

    #[test]
    fn test_matrix_group_means_and_expand() {
        let x = panel();
        let means = x.group_means();
        assert_eq!((means.nrows, means.ncols), (2, 2));
        assert_eq!(means.row(0), vec![4.0, 7.0]);
        assert_eq!(means.row(1), vec![5.5, 2.0]);

        let expanded = expand_rows(&means, Arc::clone(x.partition_arc())).unwrap();
        let expected = Matrix::from_rows(&[[4.0, 7.0], [4.0, 7.0], [4.0, 7.0], [5.5, 2.0], [5.5, 2.0]])
            .unwrap();
        assert_eq!(expanded.data(), &expected);
        assert_eq!(expanded.partition(), x.partition());
        assert_eq!(x.between().unwrap(), expanded);
    }

    #[test]
    fn test_group_sums() {
        let x = panel();
        assert_eq!(x.group_sums().col(0), &[12.0, 11.0]);

        let y = x.column(1);
        assert_eq!(y.group_sums().as_slice(), &[21.0, 4.0]);
        assert_eq!(y.group_means().as_slice(), &[7.0, 2.0]);
    }

    #[test]
    fn test_within_sums_to_zero_per_unit() {
        let x = panel();
        let w = x.within().unwrap();
        for unit in w.view() {
            for s in unit.col_sums().iter() {
                assert!(s.abs() < 1e-12);
            }
        }
        assert_eq!(w.data().row(0), vec![-1.0, -2.0]);

        let y = x.column(0).within().unwrap();
        assert_eq!(y.as_slice(), &[-1.0, 0.0, 1.0, 2.5, -2.5]);
    }

    #[test]
    fn test_expand_vector() {
        let p = Partition::from_counts(&[2, 1, 3]);
        let y = expand(&[1i64, 2, 3], p).unwrap();
        assert_eq!(y.as_slice(), &[1, 1, 2, 3, 3, 3]);
        assert_eq!(y.period_counts(), vec![2, 1, 3]);
    }

    #[test]
    fn test_expand_wrong_unit_count() {
        let err = expand(&[1.0, 2.0], Partition::from_counts(&[1, 1, 1])).unwrap_err();
        assert_eq!(
            err,
            PanelError::ShapeMismatch {
                op: "expand",
                expected: "3 values (one per unit)".to_string(),
                found: "2 values".to_string(),
            }
        );
        let m = Matrix::<f64>::new(1, 2);
        assert!(matches!(
            expand_rows(&m, Partition::from_counts(&[1, 1])),
            Err(PanelError::ShapeMismatch { op: "expand_rows", .. })
        ));
    }
}
