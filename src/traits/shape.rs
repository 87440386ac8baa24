// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Shape Trait Module
//!
//! Unified way to describe the dimensionality “shape” of flat buffers,
//! grouped containers and their per-unit views.
//!
//! Grouping never changes the reported shape: a `GroupedMatrix` reports
//! the rows × cols of its flat matrix. Views report a `Collection`
//! of unit shapes which stacks back to the container's shape.

use crate::enums::shape_dim::ShapeDim;

/// Reports the dimensions of flat storage, grouped containers and views.
///
/// Implementors provide `shape`; `shape_1d` and `shape_2d` derive from it.
pub trait Shape {
    fn shape(&self) -> ShapeDim;

    /// Row count. Collections report their stacked row count.
    fn shape_1d(&self) -> usize {
        match self.shape() {
            ShapeDim::Rank1(n) => n,
            ShapeDim::Rank2 { rows, .. } => rows,
            ShapeDim::Collection(items) => items.iter().map(|x| x.shape_1d()).sum(),
        }
    }

    /// `(rows, cols)`. Rank-1 shapes report a single column.
    fn shape_2d(&self) -> (usize, usize) {
        match self.shape() {
            ShapeDim::Rank1(n) => (n, 1),
            ShapeDim::Rank2 { rows, cols } => (rows, cols),
            ShapeDim::Collection(items) => {
                let dims: Vec<(usize, usize)> = items.iter().map(|x| x.shape_2d()).collect();
                let cols = dims.first().map_or(1, |&(_, c)| c);
                if let Some(&(_, other)) = dims.iter().find(|&&(_, c)| c != cols) {
                    panic!("shape_2d: column mismatch in Collection: {} vs {}", cols, other);
                }
                (dims.iter().map(|&(rows, _)| rows).sum(), cols)
            }
        }
    }
}
