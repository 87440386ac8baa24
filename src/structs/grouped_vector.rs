// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # **GroupedVector Module** - *Rank-1 Panel Data*
//!
//! A flat `Vec64<T>` whose elements are grouped into per-unit runs by a
//! shared [`Partition`]. Global arithmetic works on the flat buffer,
//! while [`GroupedArray::view`] exposes one `&[T]` per unit.

use std::fmt::{self, Display, Formatter};
use std::hash::Hash;
use std::ops::Index;
use std::sync::Arc;

use vec64::Vec64;

use crate::enums::error::PanelError;
use crate::enums::shape_dim::ShapeDim;
use crate::structs::partition::Partition;
use crate::traits::grouped::{Grouped, GroupedArray, Regroup};
use crate::traits::print::{MAX_PREVIEW, format_value};
use crate::traits::shape::Shape;
use crate::traits::type_unions::Numeric;

/// # GroupedVector
///
/// Flat vector data plus a per-unit partition of its indices.
///
/// ### Fields
/// - `data`: Flat 64-byte aligned buffer, stacked unit by unit.
/// - `partition`: Shared per-unit index ranges.
///
/// ### Example
/// ```rust
/// use panelarrow::{GroupedVector, GroupedArray, Vec64};
///
/// let data: Vec64<f64> = [1.0, 2.0, 3.0, 10.0, 20.0].into_iter().collect();
/// let y = GroupedVector::from_counts(data, &[3, 2]);
/// let means: Vec<f64> = y.view().map(|unit| unit.iter().sum::<f64>() / unit.len() as f64);
/// assert_eq!(means, vec![2.0, 15.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedVector<T> {
    data: Vec64<T>,
    partition: Arc<Partition>,
}

impl<T: Numeric> GroupedVector<T> {
    /// Pairs `data` with `partition` as given.
    ///
    /// The partition is not checked against `data.len()`; a bad range
    /// surfaces as an out-of-bounds slice on first access.
    pub fn new(data: Vec64<T>, partition: impl Into<Arc<Partition>>) -> Self {
        let partition = partition.into();
        log::trace!(
            "GroupedVector::new: {} elements, {} units",
            data.len(),
            partition.len()
        );
        Self { data, partition }
    }

    /// Builds the partition from per-unit counts, then pairs it with `data`.
    pub fn from_counts(data: Vec64<T>, counts: &[usize]) -> Self {
        Self::new(data, Partition::from_counts(counts))
    }

    /// Validated constructor.
    ///
    /// # Errors
    /// Any partition consistency error from [`Partition::validate`].
    pub fn try_new(data: Vec64<T>, partition: impl Into<Arc<Partition>>) -> Result<Self, PanelError> {
        let partition = partition.into();
        partition.validate(data.len())?;
        Ok(Self::new(data, partition))
    }

    /// Builds the partition from a sorted unit id column with one id per element.
    ///
    /// # Errors
    /// `NonContiguousUnit` for unsorted ids, or a partition error if
    /// `ids.len() != data.len()`.
    pub fn from_unit_ids<K: Eq + Hash>(data: Vec64<T>, ids: &[K]) -> Result<Self, PanelError> {
        let partition = Partition::from_unit_ids(ids)?;
        Self::try_new(data, partition)
    }

    /// Element at `i` in the flat buffer. Grouping plays no part.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.data[i]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &Vec64<T> {
        &self.data
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the container and returns the flat buffer.
    #[inline]
    pub fn into_inner(self) -> Vec64<T> {
        self.data
    }

    /// Splits into flat buffer and partition handle.
    #[inline]
    pub fn into_parts(self) -> (Vec64<T>, Arc<Partition>) {
        (self.data, self.partition)
    }

    /// Same partition, new data. Used by the kernels to carry grouping through.
    #[inline]
    pub(crate) fn with_data<U: Numeric>(&self, data: Vec64<U>) -> GroupedVector<U> {
        GroupedVector { data, partition: Arc::clone(&self.partition) }
    }
}

impl<T> Grouped for GroupedVector<T> {
    #[inline]
    fn partition(&self) -> &Partition {
        &self.partition
    }
}

impl<T: Numeric> GroupedArray for GroupedVector<T> {
    type Elem = T;
    type Flat = Vec64<T>;
    type Unit<'a>
        = &'a [T]
    where
        Self: 'a;

    #[inline]
    fn flat(&self) -> &Vec64<T> {
        &self.data
    }

    #[inline]
    fn partition_arc(&self) -> &Arc<Partition> {
        &self.partition
    }

    #[inline]
    fn unit(&self, unit: usize) -> &[T] {
        &self.data[self.partition.range(unit)]
    }

    #[inline]
    fn n_rows(&self) -> usize {
        self.data.len()
    }
}

impl<T: Numeric> Regroup for Vec64<T> {
    type Output = GroupedVector<T>;

    fn regroup(self, partition: impl Into<Arc<Partition>>) -> GroupedVector<T> {
        GroupedVector::new(self, partition)
    }
}

impl<T: Numeric> Shape for GroupedVector<T> {
    fn shape(&self) -> ShapeDim {
        ShapeDim::Rank1(self.data.len())
    }
}

impl<T: Numeric> Index<usize> for GroupedVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: Numeric> Display for GroupedVector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "GroupedVector [{} values, {} units]",
            self.data.len(),
            self.partition.len()
        )?;
        write!(f, "[")?;
        let mut shown = 0usize;
        for (unit, range) in self.partition.iter().enumerate() {
            if shown >= MAX_PREVIEW {
                break;
            }
            if unit > 0 {
                write!(f, " |")?;
            }
            for i in range.clone() {
                if shown >= MAX_PREVIEW || i >= self.data.len() {
                    break;
                }
                write!(f, " {}", format_value(self.data[i]))?;
                shown += 1;
            }
        }
        if self.data.len() > shown {
            write!(f, " … ({} total)", self.data.len())?;
        }
        write!(f, " ]")
    }
}

impl<'a, T> IntoIterator for &'a GroupedVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v64(values: &[f64]) -> Vec64<f64> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_from_counts_and_queries() {
        let y = GroupedVector::from_counts(v64(&[1.0, 2.0, 3.0, 4.0, 5.0]), &[3, 2]);
        assert_eq!(y.len(), 5);
        assert_eq!(y.n_units(), 2);
        assert_eq!(y.period_counts(), vec![3, 2]);
        assert_eq!(y.shape(), ShapeDim::Rank1(5));
        assert_eq!(y.get(3), 4.0);
        assert_eq!(y[4], 5.0);
        assert_eq!(y.unit(1), &[4.0, 5.0]);
    }

    #[test]
    fn test_new_is_lazy() {
        // Partition runs past the data; construction still succeeds
        let y = GroupedVector::new(v64(&[1.0, 2.0]), Partition::from_counts(&[1, 3]));
        assert_eq!(y.unit(0), &[1.0]);
        assert_eq!(y.len(), 2);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_unit_panics_on_access() {
        let y = GroupedVector::new(v64(&[1.0, 2.0]), Partition::from_counts(&[1, 3]));
        let _ = y.unit(1);
    }

    #[test]
    fn test_try_new_validates() {
        let err = GroupedVector::try_new(v64(&[1.0, 2.0]), Partition::from_counts(&[1, 3]))
            .unwrap_err();
        assert_eq!(err, PanelError::RangeOutOfBounds { unit: 1, end: 4, len: 2 });
        assert!(GroupedVector::try_new(v64(&[1.0, 2.0]), Partition::from_counts(&[1, 1])).is_ok());
    }

    #[test]
    fn test_from_unit_ids() {
        let y = GroupedVector::from_unit_ids(v64(&[1.0, 2.0, 3.0]), &["a", "a", "b"]).unwrap();
        assert_eq!(y.period_counts(), vec![2, 1]);

        let err = GroupedVector::from_unit_ids(v64(&[1.0, 2.0]), &["a", "a", "b"]).unwrap_err();
        assert_eq!(err, PanelError::RangeOutOfBounds { unit: 1, end: 3, len: 2 });
    }

    #[test]
    fn test_regroup_flat_buffer() {
        let p = Arc::new(Partition::from_counts(&[1, 1]));
        let y = v64(&[7.0, 8.0]).regroup(Arc::clone(&p));
        assert!(Arc::ptr_eq(y.partition_arc(), &p));
        assert_eq!(y.into_inner().as_slice(), &[7.0, 8.0]);
    }

    #[test]
    fn test_display_marks_units() {
        let y = GroupedVector::from_counts(v64(&[1.0, 2.5, 3.0]), &[2, 1]);
        let s = y.to_string();
        assert!(s.starts_with("GroupedVector [3 values, 2 units]"));
        assert!(s.contains("[ 1 2.5 | 3 ]"));
    }
}
