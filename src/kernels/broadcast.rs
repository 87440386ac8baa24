// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Broadcast Module
//!
//! Elementwise function application over grouped containers, with scalar and
//! array broadcasting. Results always keep the grouped operand's partition.
//!
//! ## Broadcasting rules
//! An [`Operand::Array`] of length `k` combines with a container of flat length `n`
//! when:
//! - `k == 1`: treated as a scalar;
//! - `k == n`: elementwise, in flat (column-major for matrices) order;
//! - `k == nrows` (matrices only): a column vector, value `r` applied across row `r`;
//! - `k == ncols` (matrices only): row-wise, value `c` applied down column `c`.
//!
//! On a square matrix the column-vector reading wins.
//!
//! Anything else is a `PanelError::ShapeMismatch`.
//!
//! ```rust
//! use panelarrow::{GroupedMatrix, Matrix, broadcast_rhs};
//!
//! let x = Matrix::from_rows(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]).unwrap();
//! let x = GroupedMatrix::from_counts(x, &[2, 1]);
//! let shifted = broadcast_rhs(|a, b| a - b, &x, &[1.0, 10.0][..]).unwrap();
//! assert_eq!(shifted.data().row(2), vec![2.0, 20.0]);
//!
//! let weighted = broadcast_rhs(|a, w| a * w, &x, &[1.0, 0.5, 2.0][..]).unwrap();
//! assert_eq!(weighted.data().row(1), vec![1.0, 10.0]);
//! ```

use vec64::Vec64;

use crate::enums::error::PanelError;
use crate::kernels::arithmetic::zip_with;
use crate::structs::grouped_matrix::GroupedMatrix;
use crate::structs::grouped_vector::GroupedVector;
use crate::structs::matrix::Matrix;
use crate::traits::grouped::GroupedArray;
use crate::traits::type_unions::Numeric;

/// Right- or left-hand side of a broadcast operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a, T> {
    Scalar(T),
    Array(&'a [T]),
}

impl<'a, T> From<&'a [T]> for Operand<'a, T> {
    #[inline]
    fn from(values: &'a [T]) -> Self {
        Operand::Array(values)
    }
}

impl<'a, T> From<&'a Vec64<T>> for Operand<'a, T> {
    #[inline]
    fn from(values: &'a Vec64<T>) -> Self {
        Operand::Array(values.as_slice())
    }
}

impl<'a, T> From<&'a Vec<T>> for Operand<'a, T> {
    #[inline]
    fn from(values: &'a Vec<T>) -> Self {
        Operand::Array(values.as_slice())
    }
}

macro_rules! impl_scalar_operand {
    ($($t:ty),*) => {
        $(
            impl<'a> From<$t> for Operand<'a, $t> {
                #[inline]
                fn from(value: $t) -> Self {
                    Operand::Scalar(value)
                }
            }
        )*
    };
}

impl_scalar_operand!(f32, f64, i32, i64, u32, u64);

/// Elementwise mapping and broadcasting for grouped containers.
///
/// Implemented by `GroupedVector` and `GroupedMatrix`. The free functions
/// [`broadcast_map`], [`broadcast_rhs`], [`broadcast_lhs`] and [`broadcast_zip`]
/// route through this trait.
pub trait Broadcast: GroupedArray {
    /// Applies `f` to every element.
    fn map_elems<F>(&self, f: F) -> Self
    where
        F: Fn(Self::Elem) -> Self::Elem;

    /// Combines each element `x` with the broadcast operand value `o` as `f(x, o)`.
    fn combine<F>(&self, other: Operand<'_, Self::Elem>, f: F) -> Result<Self, PanelError>
    where
        F: Fn(Self::Elem, Self::Elem) -> Self::Elem;

    /// Elementwise over two containers of identical shape. Keeps `self`'s partition.
    fn zip_elems<F>(&self, other: &Self, f: F) -> Result<Self, PanelError>
    where
        F: Fn(Self::Elem, Self::Elem) -> Self::Elem;
}

impl<T: Numeric> Broadcast for GroupedVector<T> {
    fn map_elems<F: Fn(T) -> T>(&self, f: F) -> Self {
        self.with_data(self.data().iter().map(|&v| f(v)).collect())
    }

    fn combine<F: Fn(T, T) -> T>(&self, other: Operand<'_, T>, f: F) -> Result<Self, PanelError> {
        match other {
            Operand::Scalar(s) => Ok(self.map_elems(|v| f(v, s))),
            Operand::Array(a) if a.len() == 1 => Ok(self.map_elems(|v| f(v, a[0]))),
            Operand::Array(a) if a.len() == self.len() => {
                Ok(self.with_data(zip_with(self.as_slice(), a, "broadcast", f)?))
            }
            Operand::Array(a) => Err(shape_mismatch(format!("1 or {} values", self.len()), a.len())),
        }
    }

    fn zip_elems<F: Fn(T, T) -> T>(&self, other: &Self, f: F) -> Result<Self, PanelError> {
        Ok(self.with_data(zip_with(self.as_slice(), other.as_slice(), "broadcast_zip", f)?))
    }
}

impl<T: Numeric> Broadcast for GroupedMatrix<T> {
    fn map_elems<F: Fn(T) -> T>(&self, f: F) -> Self {
        self.with_data(self.data().map(f))
    }

    fn combine<F: Fn(T, T) -> T>(&self, other: Operand<'_, T>, f: F) -> Result<Self, PanelError> {
        let m = self.data();
        match other {
            Operand::Scalar(s) => Ok(self.map_elems(|v| f(v, s))),
            Operand::Array(a) if a.len() == 1 => Ok(self.map_elems(|v| f(v, a[0]))),
            Operand::Array(a) if a.len() == m.len() => {
                let data = zip_with(m.as_slice(), a, "broadcast", f)?;
                Ok(self.with_data(Matrix { nrows: m.nrows, ncols: m.ncols, data }))
            }
            Operand::Array(a) if a.len() == m.nrows => {
                let mut data = Vec64::with_capacity(m.len());
                for col in 0..m.ncols {
                    for (&v, &o) in m.col(col).iter().zip(a) {
                        data.push(f(v, o));
                    }
                }
                Ok(self.with_data(Matrix { nrows: m.nrows, ncols: m.ncols, data }))
            }
            Operand::Array(a) if a.len() == m.ncols => {
                let mut data = Vec64::with_capacity(m.len());
                for (col, &o) in a.iter().enumerate() {
                    for &v in m.col(col) {
                        data.push(f(v, o));
                    }
                }
                Ok(self.with_data(Matrix { nrows: m.nrows, ncols: m.ncols, data }))
            }
            Operand::Array(a) => Err(shape_mismatch(
                format!("1, {}, {} or {} values", m.nrows, m.ncols, m.len()),
                a.len(),
            )),
        }
    }

    fn zip_elems<F: Fn(T, T) -> T>(&self, other: &Self, f: F) -> Result<Self, PanelError> {
        Ok(self.with_data(self.data().zip_map(other.data(), "broadcast_zip", f)?))
    }
}

impl<T: Numeric> GroupedVector<T> {
    /// Applies `f` to every element, allowing the element type to change.
    /// Same partition.
    pub fn map_into<U: Numeric, F: Fn(T) -> U>(&self, f: F) -> GroupedVector<U> {
        self.with_data(self.data().iter().map(|&v| f(v)).collect())
    }
}

impl<T: Numeric> GroupedMatrix<T> {
    /// Applies `f` to every element, allowing the element type to change.
    /// Same partition.
    pub fn map_into<U: Numeric, F: Fn(T) -> U>(&self, f: F) -> GroupedMatrix<U> {
        self.with_data(self.data().map(f))
    }
}

#[inline]
fn shape_mismatch(expected: String, found: usize) -> PanelError {
    log::warn!("broadcast: cannot broadcast {} values, expected {}", found, expected);
    PanelError::ShapeMismatch { op: "broadcast", expected, found: format!("{} values", found) }
}

/// New container with `f` applied to every element. Same partition.
#[inline]
pub fn broadcast_map<C, F>(f: F, c: &C) -> C
where
    C: Broadcast,
    F: Fn(C::Elem) -> C::Elem,
{
    c.map_elems(f)
}

/// `f(c_i, other_i)` with `other` broadcast over `c`.
///
/// # Errors
/// `PanelError::ShapeMismatch` when an array operand cannot be broadcast.
#[inline]
pub fn broadcast_rhs<'o, C, O, F>(f: F, c: &C, other: O) -> Result<C, PanelError>
where
    C: Broadcast,
    C::Elem: 'o,
    O: Into<Operand<'o, C::Elem>>,
    F: Fn(C::Elem, C::Elem) -> C::Elem,
{
    c.combine(other.into(), f)
}

/// `f(other_i, c_i)` with `other` broadcast over `c`.
///
/// # Errors
/// `PanelError::ShapeMismatch` when an array operand cannot be broadcast.
#[inline]
pub fn broadcast_lhs<'o, C, O, F>(f: F, other: O, c: &C) -> Result<C, PanelError>
where
    C: Broadcast,
    C::Elem: 'o,
    O: Into<Operand<'o, C::Elem>>,
    F: Fn(C::Elem, C::Elem) -> C::Elem,
{
    c.combine(other.into(), |x, o| f(o, x))
}

/// `f(a_i, b_i)` over two containers of the same shape. Keeps `a`'s partition.
///
/// # Errors
/// `PanelError::LengthMismatch` when the flat shapes differ.
#[inline]
pub fn broadcast_zip<C, F>(f: F, a: &C, b: &C) -> Result<C, PanelError>
where
    C: Broadcast,
    F: Fn(C::Elem, C::Elem) -> C::Elem,
{
    a.zip_elems(b, f)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::traits::grouped::Grouped;

    fn vector() -> GroupedVector<f64> {
        GroupedVector::from_counts([1.0, 2.0, 3.0, 4.0].into_iter().collect(), &[1, 3])
    }

    fn matrix() -> GroupedMatrix<i64> {
        let x = Matrix::from_rows(&[[1, 10], [2, 20], [3, 30]]).unwrap();
        GroupedMatrix::from_counts(x, &[2, 1])
    }

    #[test]
    fn test_map_keeps_partition() {
        let y = vector();
        let z = broadcast_map(|v| v * v, &y);
        assert_eq!(z.as_slice(), &[1.0, 4.0, 9.0, 16.0]);
        assert!(Arc::ptr_eq(z.partition_arc(), y.partition_arc()));
    }

    #[test]
    fn test_scalar_and_unit_length_operands() {
        let y = vector();
        let a = broadcast_rhs(|x, o| x + o, &y, 1.0).unwrap();
        let b = broadcast_rhs(|x, o| x + o, &y, &[1.0][..]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_slice(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_lhs_argument_order() {
        let y = vector();
        let z = broadcast_lhs(|o, x| o - x, 10.0, &y).unwrap();
        assert_eq!(z.as_slice(), &[9.0, 8.0, 7.0, 6.0]);

        let w = broadcast_lhs(|o, x| o - x, &vec![0.0, 0.0, 0.0, 1.0], &y).unwrap();
        assert_eq!(w.as_slice(), &[-1.0, -2.0, -3.0, -3.0]);
    }

    #[test]
    fn test_vector_shape_mismatch() {
        let y = vector();
        let err = broadcast_rhs(|x, o| x * o, &y, &[1.0, 2.0][..]).unwrap_err();
        assert_eq!(
            err,
            PanelError::ShapeMismatch {
                op: "broadcast",
                expected: "1 or 4 values".to_string(),
                found: "2 values".to_string(),
            }
        );
    }

    #[test]
    fn test_matrix_row_wise_and_full() {
        let x = matrix();
        let rows = broadcast_rhs(|v, o| v * o, &x, &[2i64, -1][..]).unwrap();
        assert_eq!(rows.data().row(1), vec![4, -20]);
        assert_eq!(rows.period_counts(), vec![2, 1]);

        let full: Vec64<i64> = (0..6).collect();
        let shifted = broadcast_rhs(|v, o| v + o, &x, &full).unwrap();
        assert_eq!(shifted.data().col(1), &[13, 24, 35]);

        let err = broadcast_rhs(|v, o| v + o, &x, &[1i64, 2, 3, 4][..]).unwrap_err();
        assert_eq!(
            err,
            PanelError::ShapeMismatch {
                op: "broadcast",
                expected: "1, 3, 2 or 6 values".to_string(),
                found: "4 values".to_string(),
            }
        );
    }

    #[test]
    fn test_matrix_column_vector_operand() {
        let x = Matrix::from_rows(&[[3.0, 5.0], [4.0, 7.0], [5.0, 9.0], [8.0, 2.0], [3.0, 2.0]])
            .unwrap();
        let x = GroupedMatrix::from_counts(x, &[3, 2]);
        let weights = [1.0, 2.0, 0.0, 1.0, 0.5];
        let w = broadcast_rhs(|v, o| v * o, &x, &weights[..]).unwrap();
        assert_eq!(w.data().col(0), &[3.0, 8.0, 0.0, 8.0, 1.5]);
        assert_eq!(w.data().col(1), &[5.0, 14.0, 0.0, 2.0, 1.0]);
        assert!(Arc::ptr_eq(w.partition_arc(), x.partition_arc()));
    }

    #[test]
    fn test_square_matrix_prefers_column_vector() {
        let x = Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
        let x = GroupedMatrix::from_counts(x, &[1, 1]);
        let y = broadcast_rhs(|v, o| v * o, &x, &[10i64, 100][..]).unwrap();
        assert_eq!(y.data().row(0), vec![10, 20]);
        assert_eq!(y.data().row(1), vec![300, 400]);
    }

    #[test]
    fn test_matrix_lhs_argument_order() {
        let x = matrix();
        let per_col = broadcast_lhs(|o, v| o - v, &[0i64, 100][..], &x).unwrap();
        assert_eq!(per_col.data().col(0), &[-1, -2, -3]);
        assert_eq!(per_col.data().col(1), &[90, 80, 70]);

        let per_row = broadcast_lhs(|o, v| o - v, &[0i64, 10, 100][..], &x).unwrap();
        assert_eq!(per_row.data().row(0), vec![-1, -10]);
        assert_eq!(per_row.data().row(2), vec![97, 70]);

        let full: Vec64<i64> = (0..6).collect();
        let z = broadcast_lhs(|o, v| o - v, &full, &x).unwrap();
        assert_eq!(z.data().col(0), &[-1, -1, -1]);
        assert_eq!(z.data().col(1), &[-7, -16, -25]);
        assert_eq!(z.period_counts(), vec![2, 1]);
    }

    #[test]
    fn test_map_into_changes_element_type() {
        let x = Matrix::from_rows(&[[1i64, 10], [3, 20], [5, 30]]).unwrap();
        let x = GroupedMatrix::from_counts(x, &[2, 1]);
        let xf = x.map_into(|v| v as f64);
        assert!(Arc::ptr_eq(xf.partition_arc(), x.partition_arc()));
        assert_eq!(xf.group_means().row(0), vec![2.0, 15.0]);

        let y = GroupedVector::from_counts([1i64, 2, 4].into_iter().collect(), &[2, 1]);
        assert_eq!(y.map_into(|v| v as f64 / 2.0).group_means().as_slice(), &[0.75, 2.0]);
    }

    #[test]
    fn test_zip_two_containers() {
        let x = matrix();
        let sq = broadcast_zip(|a, b| a * b, &x, &x).unwrap();
        assert_eq!(sq.data().col(0), &[1, 4, 9]);

        let y = vector();
        let short = GroupedVector::from_counts([1.0].into_iter().collect(), &[1]);
        assert!(matches!(
            broadcast_zip(|a, b| a + b, &y, &short),
            Err(PanelError::LengthMismatch { op: "broadcast_zip", .. })
        ));
    }
}
