//! Copyright © 2025 Peter Garfield Bower. All rights reserved.
//!
//! # **panelarrow** - *Grouped Arrays for Panel Data*
//!
//! Panel (longitudinal) data stacks several observations per unit: households
//! over years, firms over quarters. `panelarrow` keeps that data in one flat,
//! 64-byte aligned buffer or one column-major [`Matrix`], and pairs it with a
//! [`Partition`]: one contiguous row range per unit.
//!
//! ## Containers
//! - [`GroupedVector`]: `Vec64<T>` + partition.
//! - [`GroupedMatrix`]: `Matrix<T>` + partition, rows are observations.
//!
//! The partition is shared behind an `Arc`, so containers derived through
//! arithmetic or broadcasting carry the same grouping at no copy cost.
//!
//! ## Views
//! [`GroupedArray::view`] returns a [`GroupedView`], a borrowed sequence with one
//! element per unit: `&[T]` for vectors, a [`MatrixV`] row window for matrices.
//! Views copy nothing and cannot outlive their container.
//!
//! ## Operations
//! - Arithmetic: `+`, `-` between containers, scalar `*`, matrix × vector, negation.
//! - Broadcasting: [`broadcast_map`], [`broadcast_rhs`], [`broadcast_lhs`], [`broadcast_zip`].
//! - Per-unit aggregation: `group_sums`, `group_means`, `between`, `within`,
//!   with [`expand`] / [`expand_rows`] to go back to full shape.
//! - [`Concatenate`] to stack panels.
//!
//! ## Validation
//! Construction through `new` and `from_counts` is lazy: the partition is
//! trusted, and a range that runs past the data panics when that unit is read.
//! `try_new`, `from_unit_ids` and [`Partition::validate`] check it up front.
//!
//! ## Example
//! ```rust
//! use panelarrow::{GroupedArray, GroupedMatrix, Matrix, unit_count};
//!
//! let x = Matrix::from_rows(&[[3.0, 5.0], [4.0, 7.0], [5.0, 9.0], [8.0, 2.0], [3.0, 2.0]]).unwrap();
//! let x = GroupedMatrix::from_unit_ids(x, &["a", "a", "a", "b", "b"]).unwrap();
//! assert_eq!(unit_count(&x), 2);
//!
//! let demeaned = x.within().unwrap();
//! assert_eq!(demeaned.view().get(1).col(0), &[2.5, -2.5]);
//! ```
//!
//! ## Features
//! - `parallel_proc`: `GroupedView::par_map` on the rayon pool.

pub mod enums {
    pub mod error;
    pub mod shape_dim;
}

pub mod structs {
    pub mod views {
        pub mod grouped_view;
        pub mod matrix_view;
    }
    pub mod grouped_matrix;
    pub mod grouped_vector;
    pub mod matrix;
    pub mod partition;
}

pub mod kernels {
    pub mod aggregate;
    pub mod arithmetic;
    pub mod broadcast;
}

pub mod traits {
    pub mod concatenate;
    pub mod grouped;
    pub mod print;
    pub mod shape;
    pub mod type_unions;
}

pub mod utils;

pub use vec64::Vec64;

pub use enums::error::PanelError;
pub use enums::shape_dim::ShapeDim;

pub use structs::grouped_matrix::GroupedMatrix;
pub use structs::grouped_vector::GroupedVector;
pub use structs::matrix::Matrix;
pub use structs::partition::Partition;
pub use structs::views::grouped_view::{GroupedView, GroupedViewIter};
pub use structs::views::matrix_view::MatrixV;

pub use kernels::aggregate::{expand, expand_rows};
pub use kernels::arithmetic::zip_with;
pub use kernels::broadcast::{
    Broadcast, Operand, broadcast_lhs, broadcast_map, broadcast_rhs, broadcast_zip,
};

pub use traits::concatenate::Concatenate;
pub use traits::grouped::{Grouped, GroupedArray, Regroup};
pub use traits::print::Print;
pub use traits::shape::Shape;
pub use traits::type_unions::{Float, Numeric};

pub use utils::{make_partition, period_counts, regroup, unit_count, view};
