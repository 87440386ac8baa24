// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Matrix Module - *Dense Column-Major Storage for Grouped Panels*
//!
//! Dense column-major matrix over a 64-byte aligned `Vec64` buffer.
//! This is the flat rank-2 storage behind `GroupedMatrix`, plus the
//! kernels the grouping layer delegates to (matrix-vector product,
//! elementwise combine, row gathers).
//!
//! Column-major layout means the rows of one unit form one contiguous
//! segment per column, which is what `MatrixV` hands out.

use std::fmt;
use std::ops::{Index, Range};

use vec64::Vec64;

use crate::enums::error::PanelError;
use crate::enums::shape_dim::ShapeDim;
use crate::kernels::arithmetic::zip_with;
use crate::traits::print::{MAX_PREVIEW_COLS, MAX_PREVIEW_ROWS, format_value};
use crate::traits::shape::Shape;
use crate::traits::type_unions::Numeric;

/// # Matrix
///
/// Column-major dense matrix.
///
/// ### Description
/// Compatible with BLAS/LAPACK style column-major routines.
/// Element `(row, col)` lives at `data[col * nrows + row]`.
///
/// ### Properties
/// - `nrows`: Number of rows (observations).
/// - `ncols`: Number of columns (variables).
/// - `data`: Flat buffer in column-major order.
#[derive(Clone, PartialEq)]
pub struct Matrix<T> {
    pub nrows: usize,
    pub ncols: usize,
    pub data: Vec64<T>,
}

impl<T: Numeric> Matrix<T> {
    /// Constructs a new dense Matrix with shape.
    /// Data buffer is zeroed.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        let len = nrows * ncols;
        let mut data = Vec64::with_capacity(len);
        for _ in 0..len {
            data.push(T::zero());
        }
        Matrix { nrows, ncols, data }
    }

    /// Constructs a Matrix from a flat buffer (must be column-major order).
    ///
    /// # Errors
    /// `PanelError::ShapeError` if data length does not match shape.
    pub fn from_flat(data: Vec64<T>, nrows: usize, ncols: usize) -> Result<Self, PanelError> {
        if data.len() != nrows * ncols {
            return Err(PanelError::ShapeError { rows: nrows, cols: ncols, len: data.len() });
        }
        Ok(Matrix { nrows, ncols, data })
    }

    /// Constructs a Matrix from row slices, e.g. `&[[3.0, 5.0], [4.0, 7.0]]`.
    ///
    /// # Errors
    /// `PanelError::ShapeError` if the rows have differing lengths.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, PanelError> {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        for row in rows {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(PanelError::ShapeError {
                    rows: nrows,
                    cols: ncols,
                    len: row.len(),
                });
            }
        }
        let mut data = Vec64::with_capacity(nrows * ncols);
        for col in 0..ncols {
            for row in rows {
                data.push(row.as_ref()[col]);
            }
        }
        Ok(Matrix { nrows, ncols, data })
    }

    /// Constructs a Matrix from column slices.
    ///
    /// # Errors
    /// `PanelError::ShapeError` if the columns have differing lengths.
    pub fn from_columns<C: AsRef<[T]>>(columns: &[C]) -> Result<Self, PanelError> {
        let ncols = columns.len();
        let nrows = columns.first().map(|c| c.as_ref().len()).unwrap_or(0);
        let mut data = Vec64::with_capacity(nrows * ncols);
        for col in columns {
            let col = col.as_ref();
            if col.len() != nrows {
                return Err(PanelError::ShapeError { rows: nrows, cols: ncols, len: col.len() });
            }
            data.extend_from_slice(col);
        }
        Ok(Matrix { nrows, ncols, data })
    }

    /// Returns the value at (row, col) (0-based). Panics if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.nrows, "Row out of bounds");
        assert!(col < self.ncols, "Col out of bounds");
        self.data[col * self.nrows + row]
    }

    /// Returns true if the matrix is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0 || self.ncols == 0
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an immutable reference to the flat buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns a view of the matrix as a slice of columns.
    pub fn columns(&self) -> Vec<&[T]> {
        (0..self.ncols).map(|col| self.col(col)).collect()
    }

    /// Returns a single column as a slice, panics if col out of bounds.
    #[inline]
    pub fn col(&self, col: usize) -> &[T] {
        assert!(col < self.ncols, "Col out of bounds");
        &self.data[(col * self.nrows)..((col + 1) * self.nrows)]
    }

    /// Returns a single row as an owned Vec.
    #[inline]
    pub fn row(&self, row: usize) -> Vec<T> {
        (0..self.ncols).map(|col| self.get(row, col)).collect()
    }

    /// Applies `f` to every element, keeping the shape.
    pub fn map<U: Numeric, F: Fn(T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix {
            nrows: self.nrows,
            ncols: self.ncols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Elementwise combine with a matrix of identical shape.
    ///
    /// # Errors
    /// `PanelError::LengthMismatch` when the shapes differ.
    pub fn zip_map<F: Fn(T, T) -> T>(
        &self,
        other: &Matrix<T>,
        op: &'static str,
        f: F,
    ) -> Result<Matrix<T>, PanelError> {
        if self.nrows != other.nrows || self.ncols != other.ncols {
            return Err(PanelError::LengthMismatch {
                op,
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(Matrix {
            nrows: self.nrows,
            ncols: self.ncols,
            data: zip_with(&self.data, &other.data, op, f)?,
        })
    }

    /// Multiplies every element by `k`.
    pub fn scale(&self, k: T) -> Matrix<T> {
        self.map(|v| v * k)
    }

    /// Matrix-vector product `self · v`, one value per row.
    ///
    /// # Errors
    /// `PanelError::DimensionMismatch` if `v.len() != ncols`.
    pub fn matvec(&self, v: &[T]) -> Result<Vec64<T>, PanelError> {
        if v.len() != self.ncols {
            return Err(PanelError::DimensionMismatch {
                op: "matvec",
                expected: self.ncols,
                found: v.len(),
            });
        }
        let mut out = Vec64::with_capacity(self.nrows);
        for _ in 0..self.nrows {
            out.push(T::zero());
        }
        // Column sweep keeps reads contiguous
        for (col, &w) in v.iter().enumerate() {
            for (acc, &x) in out.iter_mut().zip(self.col(col)) {
                *acc = *acc + x * w;
            }
        }
        Ok(out)
    }

    /// Copies the rows in `rows` into a new matrix.
    pub fn select_rows(&self, rows: Range<usize>) -> Matrix<T> {
        assert!(rows.start <= rows.end && rows.end <= self.nrows, "row range out of bounds");
        let mut data = Vec64::with_capacity(rows.len() * self.ncols);
        for col in 0..self.ncols {
            data.extend_from_slice(&self.col(col)[rows.clone()]);
        }
        Matrix { nrows: rows.len(), ncols: self.ncols, data }
    }

    /// Repeats row `i` `counts[i]` times, producing `sum(counts)` rows.
    ///
    /// # Errors
    /// `PanelError::ShapeMismatch` if `counts.len() != nrows`.
    pub fn repeat_rows(&self, counts: &[usize]) -> Result<Matrix<T>, PanelError> {
        if counts.len() != self.nrows {
            return Err(PanelError::ShapeMismatch {
                op: "repeat_rows",
                expected: format!("{} rows", counts.len()),
                found: format!("{} rows", self.nrows),
            });
        }
        let total: usize = counts.iter().sum();
        let mut data = Vec64::with_capacity(total * self.ncols);
        for col in 0..self.ncols {
            let column = self.col(col);
            for (&v, &n) in column.iter().zip(counts) {
                for _ in 0..n {
                    data.push(v);
                }
            }
        }
        Ok(Matrix { nrows: total, ncols: self.ncols, data })
    }

    /// Appends the rows of `other` below `self`.
    ///
    /// # Errors
    /// `PanelError::DimensionMismatch` if column counts differ.
    pub fn vstack(&self, other: &Matrix<T>) -> Result<Matrix<T>, PanelError> {
        if self.ncols != other.ncols {
            return Err(PanelError::DimensionMismatch {
                op: "vstack",
                expected: self.ncols,
                found: other.ncols,
            });
        }
        let nrows = self.nrows + other.nrows;
        let mut data = Vec64::with_capacity(nrows * self.ncols);
        for col in 0..self.ncols {
            data.extend_from_slice(self.col(col));
            data.extend_from_slice(other.col(col));
        }
        Ok(Matrix { nrows, ncols: self.ncols, data })
    }
}

impl<T: Numeric> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.nrows, "Row out of bounds");
        &self.data[col * self.nrows + row]
    }
}

impl<T: Numeric> Shape for Matrix<T> {
    fn shape(&self) -> ShapeDim {
        ShapeDim::Rank2 { rows: self.nrows, cols: self.ncols }
    }
}

// Pretty print
impl<T: Numeric> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix: {} × {} [col-major]", self.nrows, self.ncols)?;
        write_rows(f, self, 0..self.nrows)?;
        Ok(())
    }
}

impl<T: Numeric> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Writes up to `MAX_PREVIEW_ROWS` rows of `rows`, one per line.
pub(crate) fn write_rows<T: Numeric>(
    f: &mut fmt::Formatter<'_>,
    m: &Matrix<T>,
    rows: Range<usize>,
) -> fmt::Result {
    let shown = rows.len().min(MAX_PREVIEW_ROWS);
    for row in rows.clone().take(shown) {
        write!(f, "\n[")?;
        for col in 0..m.ncols.min(MAX_PREVIEW_COLS) {
            write!(f, " {:>8}", format_value(m.get(row, col)))?;
            if col != m.ncols - 1 {
                write!(f, ",")?;
            }
        }
        if m.ncols > MAX_PREVIEW_COLS {
            write!(f, " ...")?;
        }
        write!(f, " ]")?;
    }
    if rows.len() > shown {
        write!(f, "\n...")?;
    }
    Ok(())
}

// ===================== Iterators ======================

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
