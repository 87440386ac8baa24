//! ---------------------------------------------------------
//! Within-transformation of a small household panel.
//!
//! Builds a grouped matrix from a sorted household id column,
//! prints per-household means, the demeaned data, and fitted
//! values for a fixed coefficient vector.
//!
//! Run with:
//!     RUST_LOG=debug cargo run --example panel_demean
//! ---------------------------------------------------------

use panelarrow::{Grouped, GroupedArray, GroupedMatrix, Matrix, PanelError, Print, unit_count};

fn main() -> Result<(), PanelError> {
    env_logger::init();

    // household id, [income, hours]
    let ids = ["h01", "h01", "h01", "h02", "h02", "h03", "h03", "h03", "h03"];
    let x = Matrix::from_rows(&[
        [31.0, 40.0],
        [33.5, 38.0],
        [35.0, 41.0],
        [22.0, 20.0],
        [24.0, 25.0],
        [51.0, 45.0],
        [49.5, 44.0],
        [53.0, 47.0],
        [55.5, 48.0],
    ])?;
    let x = GroupedMatrix::from_unit_ids(x, &ids)?;
    println!("{} households", unit_count(&x));
    x.print();

    println!("\nPer-household means:");
    x.group_means().print();

    println!("\nWithin (demeaned):");
    let within = x.within()?;
    within.print();

    let beta = [0.8, 0.1];
    let fitted = (&within * &beta[..])?;
    println!("\nFitted on demeaned data:");
    fitted.print();

    for (unit, rows) in x.view().iter().enumerate() {
        println!("household {}: {} periods", ids[rows.offset], rows.nrows());
        debug_assert_eq!(rows.nrows(), x.period_counts()[unit]);
    }

    Ok(())
}
