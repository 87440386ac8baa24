// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Error Module - Custom *Panelarrow* Error Type
//!
//! Defines the unified error type for Panelarrow.
//!
//! ## Features
//! - Covers buffer shape mismatches, elementwise length mismatches, matrix-vector
//! dimension mismatches, and the partition consistency checks that run
//! when a partition is explicitly validated.
//! - Implements `Display` for readable output and `Error` for integration
//! with standard Rust error handling.

use std::error::Error;
use std::fmt;

/// Catch all error type for `Panelarrow`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// Flat buffer length does not match the requested matrix shape.
    ShapeError {
        rows: usize,
        cols: usize,
        len: usize,
    },
    /// Elementwise kernel given operands of different lengths.
    LengthMismatch {
        op: &'static str,
        left: usize,
        right: usize,
    },
    /// Matrix-vector product where the vector length differs from the column count.
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        found: usize,
    },
    /// Operand cannot be broadcast, or aggregates do not match the unit count.
    ShapeMismatch {
        op: &'static str,
        expected: String,
        found: String,
    },
    UnitOutOfBounds {
        unit: usize,
        n_units: usize,
    },
    RangeOutOfBounds {
        unit: usize,
        end: usize,
        len: usize,
    },
    EmptyUnit {
        unit: usize,
    },
    NonContiguousRanges {
        unit: usize,
        expected_start: usize,
        found_start: usize,
    },
    CoverageMismatch {
        covered: usize,
        len: usize,
    },
    /// A unit id reappears after rows of a different unit.
    NonContiguousUnit {
        row: usize,
    },
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::ShapeError { rows, cols, len } => {
                write!(
                    f,
                    "Shape error: invalid shape ({}, {}) for buffer of length {}.",
                    rows, cols, len
                )
            }
            PanelError::LengthMismatch { op, left, right } => {
                write!(
                    f,
                    "Length mismatch in '{}': left has {} elements, right has {}.",
                    op, left, right
                )
            }
            PanelError::DimensionMismatch { op, expected, found } => {
                write!(
                    f,
                    "Dimension mismatch in '{}': expected {}, found {}.",
                    op, expected, found
                )
            }
            PanelError::ShapeMismatch { op, expected, found } => {
                write!(
                    f,
                    "Shape mismatch in '{}': cannot broadcast {} against {}.",
                    op, found, expected
                )
            }
            PanelError::UnitOutOfBounds { unit, n_units } => {
                write!(f, "Unit {} out of bounds for partition of {} units.", unit, n_units)
            }
            PanelError::RangeOutOfBounds { unit, end, len } => {
                write!(
                    f,
                    "Partition range for unit {} ends at {}, past data length {}.",
                    unit, end, len
                )
            }
            PanelError::EmptyUnit { unit } => {
                write!(f, "Partition error: unit {} has no periods.", unit)
            }
            PanelError::NonContiguousRanges { unit, expected_start, found_start } => {
                write!(
                    f,
                    "Partition error: unit {} starts at {}, expected {}.",
                    unit, found_start, expected_start
                )
            }
            PanelError::CoverageMismatch { covered, len } => {
                write!(
                    f,
                    "Partition error: ranges cover {} rows but data has {}.",
                    covered, len
                )
            }
            PanelError::NonContiguousUnit { row } => {
                write!(
                    f,
                    "Unit id at row {} was already seen before a different unit; rows must be sorted by unit.",
                    row
                )
            }
        }
    }
}

impl Error for PanelError {}
