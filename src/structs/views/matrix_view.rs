// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # **MatrixView Module** - *Windowed Row View over a Column-Major Matrix*
//!
//! `MatrixV` is a borrowed `[offset .. offset + len)` row window of a
//! [`Matrix`]. It is what a grouped view yields for one unit of a
//! `GroupedMatrix`.
//!
//! ## Layout
//! Because the backing matrix is column-major, each column of the window is
//! one contiguous `&[T]` run, so [`col`](MatrixV::col) is zero-copy.
//!
//! ## Bounds
//! Construction does not check the window against the matrix. Out-of-range
//! windows panic on first element access, the same as slicing would.

use std::fmt;

use vec64::Vec64;

use crate::enums::shape_dim::ShapeDim;
use crate::structs::matrix::{Matrix, write_rows};
use crate::traits::shape::Shape;
use crate::traits::type_unions::{Float, Numeric};

/// # MatrixView
///
/// Borrowed row window of a column-major matrix.
///
/// ## Fields
/// - `matrix`: the backing matrix.
/// - `offset`: first row of the window.
/// - `len`: number of rows in the window.
#[derive(Clone, Copy, PartialEq)]
pub struct MatrixV<'a, T> {
    pub matrix: &'a Matrix<T>,
    pub offset: usize,
    pub len: usize,
}

impl<'a, T: Numeric> MatrixV<'a, T> {
    #[inline]
    pub fn new(matrix: &'a Matrix<T>, offset: usize, len: usize) -> Self {
        Self { matrix, offset, len }
    }

    /// Number of rows in the window.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.matrix.ncols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0 || self.matrix.ncols == 0
    }

    /// Value at window-relative `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.len, "row out of bounds");
        self.matrix.get(self.offset + row, col)
    }

    /// Column `col` restricted to the window. Zero-copy.
    #[inline]
    pub fn col(&self, col: usize) -> &'a [T] {
        &self.matrix.col(col)[self.offset..self.offset + self.len]
    }

    /// Window-relative row as an owned Vec.
    #[inline]
    pub fn row(&self, row: usize) -> Vec<T> {
        (0..self.ncols()).map(|col| self.get(row, col)).collect()
    }

    /// Iterator over the window's column slices.
    #[inline]
    pub fn iter_cols(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.ncols()).map(move |c| self.col(c))
    }

    /// Per-column sums over the window's rows.
    pub fn col_sums(&self) -> Vec64<T> {
        self.iter_cols()
            .map(|c| c.iter().fold(T::zero(), |acc, &x| acc + x))
            .collect()
    }

    /// Returns a sub-window of `len` rows starting `offset` rows into this one.
    pub fn slice(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len, "slice out of bounds");
        Self::new(self.matrix, self.offset + offset, len)
    }

    /// Materialises the window into an owned matrix.
    pub fn to_matrix(&self) -> Matrix<T> {
        self.matrix.select_rows(self.offset..self.offset + self.len)
    }

    /// Returns `(&Matrix, offset, len)`.
    #[inline]
    pub fn as_tuple(&self) -> (&'a Matrix<T>, usize, usize) {
        (self.matrix, self.offset, self.len)
    }
}

impl<'a, T: Float> MatrixV<'a, T> {
    /// Per-column means over the window's rows. `NaN` for an empty window.
    pub fn col_means(&self) -> Vec64<T> {
        let n = T::from(self.len).unwrap_or_else(T::nan);
        self.col_sums().iter().map(|&s| s / n).collect()
    }
}

impl<'a, T: Numeric> Shape for MatrixV<'a, T> {
    fn shape(&self) -> ShapeDim {
        ShapeDim::Rank2 { rows: self.len, cols: self.matrix.ncols }
    }
}

impl<'a, T: Numeric> fmt::Debug for MatrixV<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MatrixV: rows {}..{} of {} × {}",
            self.offset,
            self.offset + self.len,
            self.matrix.nrows,
            self.matrix.ncols
        )?;
        let end = (self.offset + self.len).min(self.matrix.nrows);
        write_rows(f, self.matrix, self.offset.min(end)..end)
    }
}

impl<'a, T: Numeric> From<&'a Matrix<T>> for MatrixV<'a, T> {
    fn from(matrix: &'a Matrix<T>) -> Self {
        MatrixV::new(matrix, 0, matrix.nrows)
    }
}
