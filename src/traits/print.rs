//! # **Print Module** - *Pretty Printing for Panels*
//!
//! Contains the shared preview limits and number formatting used by the
//! `Display` implementations, and an additional `Print` trait which wraps it to
//! provide `mypanel.print()` for any object that implements it.
use std::fmt::Display;

use crate::traits::type_unions::Numeric;

pub(crate) const MAX_PREVIEW: usize = 50;
pub(crate) const MAX_PREVIEW_ROWS: usize = 6;
pub(crate) const MAX_PREVIEW_COLS: usize = 8;

/// # Print
///
/// Loaded print trait for pretty printing panels
///
/// Provides a more convenient way to activate `Display`
/// for grouped containers and matrices via `mypanel.print()`,
/// avoiding the need to write `println!("{}", mypanel);`
pub trait Print {
    #[inline]
    fn print(&self)
    where
        Self: Display,
    {
        println!("{}", self);
    }
}

impl<T: Display> Print for T where T: Display {}

/// Formats a value with at most 6 decimals and no trailing zeros.
/// Integers ignore the precision and print as-is.
pub(crate) fn format_value<T: Numeric>(v: T) -> String {
    let s = format!("{:.6}", v);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0f64), "3");
        assert_eq!(format_value(5.5f64), "5.5");
        assert_eq!(format_value(0.1f32), "0.1");
        assert_eq!(format_value(42i64), "42");
        assert_eq!(format_value(1.0e-9f64), "0");
    }
}
