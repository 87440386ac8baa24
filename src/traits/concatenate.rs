// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Concatenate Trait Module
//!
//! Stacks two panels so the units of the second follow the units of the first.
//!
//! ## Consuming Semantics
//! **`concat` consumes both inputs.** The first container's buffer is reused and
//! the second's data is appended. Clone first to keep an input:
//! ```rust
//! # use panelarrow::{Concatenate, Grouped, GroupedVector, Vec64};
//! let a = GroupedVector::from_counts(Vec64::from_iter([1, 2, 3]), &[2, 1]);
//! let b = GroupedVector::from_counts(Vec64::from_iter([4, 5]), &[2]);
//!
//! let ab = a.clone().concat(b).unwrap();
//! assert_eq!(ab.as_slice(), &[1, 2, 3, 4, 5]);
//! assert_eq!(ab.period_counts(), vec![2, 1, 2]);
//! assert_eq!(a.len(), 3);
//! ```
//!
//! ## Rules
//! 1. `other`'s ranges are shifted by `self`'s row count.
//! 2. Matrices must agree on column count.

use vec64::Vec64;

use crate::enums::error::PanelError;
use crate::structs::grouped_matrix::GroupedMatrix;
use crate::structs::grouped_vector::GroupedVector;
use crate::structs::partition::Partition;
use crate::traits::grouped::Grouped;
use crate::traits::type_unions::Numeric;

/// Concatenate trait for stacking two instances of the same type.
pub trait Concatenate {
    /// Concatenates `self` with `other`, **consuming both**.
    ///
    /// # Errors
    /// `DimensionMismatch` when matrix column counts differ.
    fn concat(self, other: Self) -> Result<Self, PanelError>
    where
        Self: Sized;
}

impl Concatenate for Partition {
    fn concat(self, other: Self) -> Result<Self, PanelError> {
        Ok(stacked(&self, &other, self.n_rows()))
    }
}

impl<T: Numeric> Concatenate for GroupedVector<T> {
    fn concat(self, other: Self) -> Result<Self, PanelError> {
        let offset = self.len();
        let partition = stacked(self.partition(), other.partition(), offset);
        let (mut data, _) = self.into_parts();
        let other: Vec64<T> = other.into_inner();
        data.extend(other.into_iter());
        log::debug!("concat: {} units, {} values", partition.len(), data.len());
        Ok(GroupedVector::new(data, partition))
    }
}

impl<T: Numeric> Concatenate for GroupedMatrix<T> {
    fn concat(self, other: Self) -> Result<Self, PanelError> {
        let offset = self.nrows();
        let partition = stacked(self.partition(), other.partition(), offset);
        let data = self.data().vstack(other.data())?;
        log::debug!("concat: {} units, {} rows", partition.len(), data.nrows);
        Ok(GroupedMatrix::new(data, partition))
    }
}

/// `lhs` followed by `rhs` shifted by `offset` rows.
fn stacked(lhs: &Partition, rhs: &Partition, offset: usize) -> Partition {
    let mut ranges = lhs.as_slice().to_vec();
    ranges.extend(rhs.shifted(offset).iter().cloned());
    Partition::new(ranges)
}
