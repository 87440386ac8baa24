use std::fmt::{Debug, Display};

use num_traits::{Float as NumFloat, Num, NumCast, ToPrimitive};

/// Trait for types valid as float elements in grouped arrays.
///
/// Useful when specifying `my_fn::<T: Float>() {}`, e.g., for per-unit means.
///
/// Extends and constrains the *num-traits* `Float` implementation to fit the crate's type universe.
pub trait Float: Numeric + NumFloat {}
impl Float for f32 {}
impl Float for f64 {}

/// Trait for types valid as numerical.
///
/// Useful when specifying `my_fn::<T: Numeric>() {}`.
///
/// Extends and constrains the *num-traits* `Num` implementation to fit the crate's type universe.
pub trait Numeric:
    Num + NumCast + Copy + Default + ToPrimitive + PartialEq + Debug + Display + 'static
{
}
impl Numeric for f32 {}
impl Numeric for f64 {}
impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for u32 {}
impl Numeric for u64 {}
