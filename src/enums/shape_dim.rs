// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # ShapeDim Enum Module
//!
//! Companion to [crate::traits::shape::Shape];
//!
//! Contains all supported `Shape` variants.

use crate::traits::shape::Shape;

/// Describable dimensional rank for flat data, grouped containers and views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeDim {
    /// Vector length
    Rank1(usize),

    /// Matrix row/column counts.
    Rank2 { rows: usize, cols: usize },

    /// Ordered collection of per-unit shapes.
    /// Used by grouped views, where each item is one unit's slice.
    ///
    /// The order is significant and matches the partition order.
    Collection(Vec<ShapeDim>),
}

/// Implement `Shape` for `ShapeDim` so recursive calls like `item.shape_2d()`
/// compile when iterating `Collection(Vec<ShapeDim>)`.
impl Shape for ShapeDim {
    fn shape(&self) -> ShapeDim {
        self.clone()
    }
}
