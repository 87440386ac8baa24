// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Arithmetic Operators
//!
//! Standard Rust operators for the grouped containers. Every operation runs on
//! the flat storage and carries the partition of the grouped operand through to
//! the result, sharing the same `Arc<Partition>`.
//!
//! | Expression                          | Output                                  |
//! |-------------------------------------|-----------------------------------------|
//! | `&a + &b`, `&a - &b`                | `Result<Container, PanelError>`         |
//! | `k * &a`, `&a * k`                  | `Container`                             |
//! | `&m * &v[..]`                       | `Result<GroupedVector<T>, PanelError>`  |
//! | `-&a`                               | `Container` (signed types)              |
//!
//! Container ± container uses the left operand's partition. Partitions are not
//! compared; see [`Partition::is_compatible`](crate::Partition::is_compatible).
//!
//! ```rust
//! use panelarrow::{GroupedVector, Grouped, Vec64};
//!
//! let a = GroupedVector::from_counts(Vec64::from_iter([1.0, 2.0, 3.0]), &[2, 1]);
//! let b = 2.0 * &a;
//! let c = (&b - &a).unwrap();
//! assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0]);
//! assert_eq!(c.period_counts(), vec![2, 1]);
//! ```

use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use vec64::Vec64;

use crate::enums::error::PanelError;
use crate::structs::grouped_matrix::GroupedMatrix;
use crate::structs::grouped_vector::GroupedVector;
use crate::traits::grouped::GroupedArray;
use crate::traits::type_unions::Numeric;

/// Applies `f` pairwise over two equal-length slices.
///
/// # Errors
/// `PanelError::LengthMismatch` tagged with `op` when lengths differ.
#[inline]
pub fn zip_with<T, F>(lhs: &[T], rhs: &[T], op: &'static str, f: F) -> Result<Vec64<T>, PanelError>
where
    T: Numeric,
    F: Fn(T, T) -> T,
{
    if lhs.len() != rhs.len() {
        return Err(PanelError::LengthMismatch { op, left: lhs.len(), right: rhs.len() });
    }
    Ok(lhs.iter().zip(rhs).map(|(&a, &b)| f(a, b)).collect())
}

impl<T: Numeric> GroupedVector<T> {
    /// Multiplies every element by `k`, keeping the partition.
    pub fn scale(&self, k: T) -> GroupedVector<T> {
        self.with_data(self.data().iter().map(|&v| v * k).collect())
    }
}

impl<T: Numeric> GroupedMatrix<T> {
    /// Multiplies every element by `k`, keeping the partition.
    pub fn scale(&self, k: T) -> GroupedMatrix<T> {
        self.with_data(self.data().scale(k))
    }

    /// Matrix-vector product. The result is grouped by this matrix's partition.
    ///
    /// # Errors
    /// `PanelError::DimensionMismatch` if `v.len() != ncols`.
    pub fn matvec(&self, v: &[T]) -> Result<GroupedVector<T>, PanelError> {
        let out = self.data().matvec(v)?;
        log::trace!("GroupedMatrix::matvec: {} × {} · {}", self.nrows(), self.ncols(), v.len());
        Ok(GroupedVector::new(out, Arc::clone(self.partition_arc())))
    }
}

// Container ± container

macro_rules! impl_elementwise {
    ($trait:ident, $method:ident, $op:literal, $f:expr) => {
        impl<'a, T: Numeric> $trait<&'a GroupedVector<T>> for &'a GroupedVector<T> {
            type Output = Result<GroupedVector<T>, PanelError>;

            fn $method(self, rhs: &'a GroupedVector<T>) -> Self::Output {
                let data = zip_with(self.as_slice(), rhs.as_slice(), $op, $f)?;
                Ok(self.with_data(data))
            }
        }

        impl<T: Numeric> $trait for GroupedVector<T> {
            type Output = Result<GroupedVector<T>, PanelError>;

            #[inline]
            fn $method(self, rhs: GroupedVector<T>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl<'a, T: Numeric> $trait<&'a GroupedMatrix<T>> for &'a GroupedMatrix<T> {
            type Output = Result<GroupedMatrix<T>, PanelError>;

            fn $method(self, rhs: &'a GroupedMatrix<T>) -> Self::Output {
                let data = self.data().zip_map(rhs.data(), $op, $f)?;
                Ok(self.with_data(data))
            }
        }

        impl<T: Numeric> $trait for GroupedMatrix<T> {
            type Output = Result<GroupedMatrix<T>, PanelError>;

            #[inline]
            fn $method(self, rhs: GroupedMatrix<T>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_elementwise!(Add, add, "add", |a, b| a + b);
impl_elementwise!(Sub, sub, "sub", |a, b| a - b);

// Scalar × container, both sides. Concrete types so the scalar can sit on the left.

macro_rules! impl_scalar_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<$t> for &GroupedVector<$t> {
                type Output = GroupedVector<$t>;
                #[inline]
                fn mul(self, k: $t) -> GroupedVector<$t> {
                    self.scale(k)
                }
            }

            impl Mul<$t> for GroupedVector<$t> {
                type Output = GroupedVector<$t>;
                #[inline]
                fn mul(self, k: $t) -> GroupedVector<$t> {
                    self.scale(k)
                }
            }

            impl Mul<&GroupedVector<$t>> for $t {
                type Output = GroupedVector<$t>;
                #[inline]
                fn mul(self, rhs: &GroupedVector<$t>) -> GroupedVector<$t> {
                    rhs.scale(self)
                }
            }

            impl Mul<GroupedVector<$t>> for $t {
                type Output = GroupedVector<$t>;
                #[inline]
                fn mul(self, rhs: GroupedVector<$t>) -> GroupedVector<$t> {
                    rhs.scale(self)
                }
            }

            impl Mul<$t> for &GroupedMatrix<$t> {
                type Output = GroupedMatrix<$t>;
                #[inline]
                fn mul(self, k: $t) -> GroupedMatrix<$t> {
                    self.scale(k)
                }
            }

            impl Mul<$t> for GroupedMatrix<$t> {
                type Output = GroupedMatrix<$t>;
                #[inline]
                fn mul(self, k: $t) -> GroupedMatrix<$t> {
                    self.scale(k)
                }
            }

            impl Mul<&GroupedMatrix<$t>> for $t {
                type Output = GroupedMatrix<$t>;
                #[inline]
                fn mul(self, rhs: &GroupedMatrix<$t>) -> GroupedMatrix<$t> {
                    rhs.scale(self)
                }
            }

            impl Mul<GroupedMatrix<$t>> for $t {
                type Output = GroupedMatrix<$t>;
                #[inline]
                fn mul(self, rhs: GroupedMatrix<$t>) -> GroupedMatrix<$t> {
                    rhs.scale(self)
                }
            }
        )*
    };
}

impl_scalar_mul!(f32, f64, i32, i64, u32, u64);

// Matrix × vector

impl<'a, T: Numeric> Mul<&'a [T]> for &'a GroupedMatrix<T> {
    type Output = Result<GroupedVector<T>, PanelError>;

    #[inline]
    fn mul(self, v: &'a [T]) -> Self::Output {
        self.matvec(v)
    }
}

impl<'a, T: Numeric> Mul<&'a Vec64<T>> for &'a GroupedMatrix<T> {
    type Output = Result<GroupedVector<T>, PanelError>;

    #[inline]
    fn mul(self, v: &'a Vec64<T>) -> Self::Output {
        self.matvec(v.as_slice())
    }
}

// Negation

impl<T: Numeric + Neg<Output = T>> Neg for &GroupedVector<T> {
    type Output = GroupedVector<T>;

    fn neg(self) -> GroupedVector<T> {
        self.with_data(self.data().iter().map(|&v| -v).collect())
    }
}

impl<T: Numeric + Neg<Output = T>> Neg for GroupedVector<T> {
    type Output = GroupedVector<T>;

    #[inline]
    fn neg(self) -> GroupedVector<T> {
        -&self
    }
}

impl<T: Numeric + Neg<Output = T>> Neg for &GroupedMatrix<T> {
    type Output = GroupedMatrix<T>;

    fn neg(self) -> GroupedMatrix<T> {
        self.with_data(self.data().map(|v| -v))
    }
}

impl<T: Numeric + Neg<Output = T>> Neg for GroupedMatrix<T> {
    type Output = GroupedMatrix<T>;

    #[inline]
    fn neg(self) -> GroupedMatrix<T> {
        -&self
    }
}
