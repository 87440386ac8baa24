// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # **Partition Module** - *Per-Unit Row Ranges for Panel Data*
//!
//! A `Partition` splits the leading dimension of a flat buffer into one
//! contiguous row range per unit (firm, person, country, ...).
//!
//! ## Role
//! - Shared by `GroupedVector` and `GroupedMatrix` through an `Arc`, so derived
//!   containers carry the same grouping without copying it.
//! - Drives `GroupedView`, which hands out one slice per range.
//!
//! ## Invariants
//! For a well-formed partition over `n` rows:
//! - ranges are ordered, non-empty, and each starts where the previous one ends;
//! - the first range starts at `0` and the last one ends at `n`.
//!
//! These are **not** enforced on construction. Call [`Partition::validate`]
//! (or use the containers' `try_new`) to check them explicitly; otherwise a bad
//! partition surfaces as an out-of-range slice at access time.

use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Range;

use crate::enums::error::PanelError;

/// # Partition
///
/// Ordered, contiguous row ranges, one per unit.
///
/// ### Construction
/// - [`Partition::from_counts`]: per-unit period counts, laid out from row 0.
/// - [`Partition::from_unit_ids`]: a sorted unit id column.
/// - [`Partition::new`]: explicit ranges, stored as given.
///
/// ### Example
/// ```rust
/// use panelarrow::Partition;
///
/// let p = Partition::from_counts(&[3, 2]);
/// assert_eq!(p.range(0), 0..3);
/// assert_eq!(p.range(1), 3..5);
/// assert_eq!(p.period_counts(), vec![3, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    ranges: Vec<Range<usize>>,
}

impl Partition {
    /// Wraps explicit ranges. No validation is performed.
    pub fn new(ranges: Vec<Range<usize>>) -> Self {
        Self { ranges }
    }

    /// Lays out one range per count, starting at row 0 with no gaps.
    ///
    /// Zero counts produce empty ranges. They are accepted here but
    /// rejected by [`validate`](Self::validate), as per-unit indexing
    /// assumes every unit has at least one period.
    pub fn from_counts(counts: &[usize]) -> Self {
        let mut ranges = Vec::with_capacity(counts.len());
        let mut start = 0usize;
        for &count in counts {
            ranges.push(start..start + count);
            start += count;
        }
        log::debug!("built partition of {} units over {} rows", ranges.len(), start);
        Self { ranges }
    }

    /// Builds a partition from a unit id column, one id per row.
    ///
    /// Each maximal run of equal ids becomes one unit, in order of appearance.
    /// Rows must already be sorted so each unit's rows are adjacent.
    ///
    /// # Errors
    /// `PanelError::NonContiguousUnit` when an id reappears after a
    /// different id, pointing at the first offending row.
    pub fn from_unit_ids<K>(ids: &[K]) -> Result<Self, PanelError>
    where
        K: Eq + Hash,
    {
        let mut ranges = Vec::new();
        let mut seen: HashSet<&K> = HashSet::new();
        let mut start = 0usize;

        for row in 1..=ids.len() {
            if row < ids.len() && ids[row] == ids[start] {
                continue;
            }
            if !seen.insert(&ids[start]) {
                log::warn!("unit id at row {} is not contiguous", start);
                return Err(PanelError::NonContiguousUnit { row: start });
            }
            ranges.push(start..row);
            start = row;
        }

        log::debug!("built partition of {} units from {} unit ids", ranges.len(), ids.len());
        Ok(Self { ranges })
    }

    /// Number of units.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Row range for unit `unit`. Panics if `unit >= len()`.
    #[inline]
    pub fn range(&self, unit: usize) -> Range<usize> {
        self.ranges[unit].clone()
    }

    #[inline]
    pub fn get(&self, unit: usize) -> Option<&Range<usize>> {
        self.ranges.get(unit)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Range<usize>> {
        self.ranges.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Number of periods per unit, in unit order.
    pub fn period_counts(&self) -> Vec<usize> {
        self.ranges.iter().map(|r| r.len()).collect()
    }

    /// Row count spanned by the partition, i.e. the end of the last range.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.ranges.last().map(|r| r.end).unwrap_or(0)
    }

    /// Unit owning `row`, if any. Assumes ordered ranges.
    pub fn unit_of_row(&self, row: usize) -> Option<usize> {
        let unit = self.ranges.partition_point(|r| r.end <= row);
        match self.ranges.get(unit) {
            Some(r) if r.contains(&row) => Some(unit),
            _ => None,
        }
    }

    /// Returns a copy with every range moved forward by `offset` rows.
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            ranges: self
                .ranges
                .iter()
                .map(|r| r.start + offset..r.end + offset)
                .collect(),
        }
    }

    /// True when both partitions have the same unit count and range lengths.
    ///
    /// Operators never call this; it is available to callers who
    /// want to guard binary operations between containers.
    pub fn is_compatible(&self, other: &Partition) -> bool {
        self.ranges.len() == other.ranges.len()
            && self
                .ranges
                .iter()
                .zip(other.ranges.iter())
                .all(|(a, b)| a.len() == b.len())
    }

    /// Checks that the ranges tile `0..n_rows` exactly once, in order, with no empty unit.
    ///
    /// # Errors
    /// - `EmptyUnit` for a zero-length range.
    /// - `NonContiguousRanges` when a range does not start where the previous ended.
    /// - `RangeOutOfBounds` when a range ends past `n_rows`.
    /// - `CoverageMismatch` when the last range ends before `n_rows`.
    pub fn validate(&self, n_rows: usize) -> Result<(), PanelError> {
        let mut expected_start = 0usize;
        for (unit, r) in self.ranges.iter().enumerate() {
            if r.start != expected_start {
                log::warn!("partition unit {} starts at {}, expected {}", unit, r.start, expected_start);
                return Err(PanelError::NonContiguousRanges {
                    unit,
                    expected_start,
                    found_start: r.start,
                });
            }
            if r.is_empty() {
                log::warn!("partition unit {} is empty", unit);
                return Err(PanelError::EmptyUnit { unit });
            }
            if r.end > n_rows {
                log::warn!("partition unit {} ends at {} past {} rows", unit, r.end, n_rows);
                return Err(PanelError::RangeOutOfBounds { unit, end: r.end, len: n_rows });
            }
            expected_start = r.end;
        }
        if expected_start != n_rows {
            log::warn!("partition covers {} of {} rows", expected_start, n_rows);
            return Err(PanelError::CoverageMismatch { covered: expected_start, len: n_rows });
        }
        Ok(())
    }
}

impl From<Vec<Range<usize>>> for Partition {
    fn from(ranges: Vec<Range<usize>>) -> Self {
        Partition::new(ranges)
    }
}

impl From<&[usize]> for Partition {
    fn from(counts: &[usize]) -> Self {
        Partition::from_counts(counts)
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a Range<usize>;
    type IntoIter = std::slice::Iter<'a, Range<usize>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counts_layout() {
        let p = Partition::from_counts(&[3, 1, 2]);
        assert_eq!(p.as_slice(), &[0..3, 3..4, 4..6]);
        assert_eq!(p.len(), 3);
        assert_eq!(p.n_rows(), 6);
        assert_eq!(p.period_counts(), vec![3, 1, 2]);
        assert!(p.validate(6).is_ok());
    }

    #[test]
    fn test_from_counts_empty() {
        let p = Partition::from_counts(&[]);
        assert!(p.is_empty());
        assert_eq!(p.n_rows(), 0);
        assert!(p.validate(0).is_ok());
    }

    #[test]
    fn test_zero_count_is_accepted_but_invalid() {
        let p = Partition::from_counts(&[2, 0, 1]);
        assert_eq!(p.range(1), 2..2);
        assert_eq!(p.validate(3), Err(PanelError::EmptyUnit { unit: 1 }));
    }

    #[test]
    fn test_validate_detects_gaps_and_coverage() {
        let gap = Partition::new(vec![0..2, 3..5]);
        assert_eq!(
            gap.validate(5),
            Err(PanelError::NonContiguousRanges { unit: 1, expected_start: 2, found_start: 3 })
        );

        let short = Partition::from_counts(&[2, 2]);
        assert_eq!(short.validate(5), Err(PanelError::CoverageMismatch { covered: 4, len: 5 }));
        assert_eq!(
            short.validate(3),
            Err(PanelError::RangeOutOfBounds { unit: 1, end: 4, len: 3 })
        );
    }

    #[test]
    fn test_from_unit_ids_runs() {
        let p = Partition::from_unit_ids(&[1, 1, 1, 2, 2]).unwrap();
        assert_eq!(p.as_slice(), &[0..3, 3..5]);

        let p = Partition::from_unit_ids(&["a", "b", "b", "c"]).unwrap();
        assert_eq!(p.period_counts(), vec![1, 2, 1]);

        let empty: [u32; 0] = [];
        assert!(Partition::from_unit_ids(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_from_unit_ids_rejects_unsorted() {
        let err = Partition::from_unit_ids(&[1, 1, 2, 1]).unwrap_err();
        assert_eq!(err, PanelError::NonContiguousUnit { row: 3 });
    }

    #[test]
    fn test_unit_of_row() {
        let p = Partition::from_counts(&[3, 2]);
        assert_eq!(p.unit_of_row(0), Some(0));
        assert_eq!(p.unit_of_row(2), Some(0));
        assert_eq!(p.unit_of_row(3), Some(1));
        assert_eq!(p.unit_of_row(5), None);
    }

    #[test]
    fn test_shifted_and_compatible() {
        let p = Partition::from_counts(&[2, 3]);
        let s = p.shifted(4);
        assert_eq!(s.as_slice(), &[4..6, 6..9]);
        assert!(p.is_compatible(&s));
        assert!(!p.is_compatible(&Partition::from_counts(&[3, 2])));
    }
}
