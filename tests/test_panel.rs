//! Integration tests for grouped panel containers through the public API

use std::sync::Arc;

use panelarrow::{
    Concatenate, Grouped, GroupedArray, GroupedMatrix, GroupedVector, Matrix, PanelError,
    Partition, Regroup, Shape, ShapeDim, Vec64, broadcast_map, broadcast_rhs, expand_rows,
    make_partition, period_counts, regroup, unit_count, view,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn create_test_panel() -> GroupedMatrix<f64> {
    let x = Matrix::from_rows(&[[3.0, 5.0], [4.0, 7.0], [5.0, 9.0], [8.0, 2.0], [3.0, 2.0]])
        .unwrap();
    GroupedMatrix::from_unit_ids(x, &[1, 1, 1, 2, 2]).unwrap()
}

#[test]
fn test_partition_from_counts_covers_rows() {
    init_logging();
    for counts in [vec![1], vec![3, 2], vec![1, 1, 1, 1], vec![5, 1, 7]] {
        let p = make_partition(&counts);
        let total: usize = counts.iter().sum();
        assert_eq!(p.period_counts(), counts);
        assert_eq!(p.range(0).start, 0);
        assert_eq!(p.n_rows(), total);
        for pair in p.as_slice().windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!(p.validate(total).is_ok());
    }
}

#[test]
fn test_unit_queries_round_trip_counts() {
    init_logging();
    let counts = [2, 4, 1];
    let y = GroupedVector::from_counts((0..7).map(|v| v as f64).collect(), &counts);
    assert_eq!(unit_count(&y), counts.len());
    assert_eq!(period_counts(&y), counts.to_vec());
    assert_eq!(y.shape(), ShapeDim::Rank1(7));
}

#[test]
fn test_view_units_match_partition_ranges() {
    init_logging();
    let x = create_test_panel();
    let v = view(&x);
    assert_eq!(v.len(), 2);
    for (i, unit) in v.iter().enumerate() {
        let range = x.partition().range(i);
        assert_eq!(unit.nrows(), range.len());
        for c in 0..x.ncols() {
            assert_eq!(unit.col(c), &x.col(c)[range.clone()]);
        }
    }
    assert!(std::ptr::eq(v.into_flat(), x.data()));
}

#[test]
fn test_matrix_vector_product_is_grouped() {
    init_logging();
    let x = create_test_panel();
    let beta = [0.5, 2.0];
    let y = (&x * &beta[..]).unwrap();
    assert_eq!(y.as_slice(), &[11.5, 16.0, 20.5, 8.0, 5.5]);
    assert!(Arc::ptr_eq(y.partition_arc(), x.partition_arc()));
    assert_eq!(y.view().get(1), &[8.0, 5.5]);
}

#[test]
fn test_scalar_product_preserves_partition() {
    init_logging();
    let x = create_test_panel();
    let k = 3.0;
    let y = k * &x;
    for (a, b) in y.data().as_slice().iter().zip(x.data().as_slice()) {
        assert_eq!(*a, k * *b);
    }
    assert_eq!(y.partition(), x.partition());
}

#[test]
fn test_group_means_regroup_example() {
    init_logging();
    let x = create_test_panel();
    let means = x.group_means();
    assert_eq!(means.row(0), vec![4.0, 7.0]);
    assert_eq!(means.row(1), vec![5.5, 2.0]);

    let expanded = expand_rows(&means, Arc::clone(x.partition_arc())).unwrap();
    let rows: Vec<Vec<f64>> = (0..expanded.nrows()).map(|r| expanded.data().row(r)).collect();
    assert_eq!(
        rows,
        vec![vec![4.0, 7.0], vec![4.0, 7.0], vec![4.0, 7.0], vec![5.5, 2.0], vec![5.5, 2.0]]
    );
}

#[test]
fn test_regroup_flat_data_with_new_partition() {
    init_logging();
    let x = create_test_panel();
    let flat = x.view().into_flat().clone();
    let pooled: GroupedMatrix<f64> = regroup(flat, make_partition(&[5]));
    assert_eq!(unit_count(&pooled), 1);
    assert_eq!(pooled.view().get(0).nrows(), 5);

    let again = pooled.into_inner().regroup(Arc::clone(x.partition_arc()));
    assert_eq!(again, x);
}

#[test]
fn test_broadcast_keeps_grouping() {
    init_logging();
    let x = create_test_panel();
    let logs = broadcast_map(|v: f64| v.ln(), &x);
    assert_eq!(logs.partition(), x.partition());
    assert!((logs.get(0, 0) - 3.0f64.ln()).abs() < 1e-12);

    let centred = broadcast_rhs(|v, m| v - m, &x, &[4.6, 5.0][..]).unwrap();
    assert_eq!(centred.period_counts(), vec![3, 2]);
    assert!((centred.col(0).iter().sum::<f64>()).abs() < 1e-12);
}

#[test]
fn test_within_rows_sum_to_zero_per_unit() {
    init_logging();
    let w = create_test_panel().within().unwrap();
    for unit in w.view() {
        for s in unit.col_sums().iter() {
            assert!(s.abs() < 1e-12);
        }
    }
}

#[test]
fn test_lazy_construction_defers_errors() {
    init_logging();
    let data: Vec64<f64> = [1.0, 2.0, 3.0].into_iter().collect();
    let y = GroupedVector::new(data.clone(), Partition::from_counts(&[2, 2]));
    assert_eq!(y.view().get(0), &[1.0, 2.0]);
    assert_eq!(
        y.view().try_get(1).unwrap_err(),
        PanelError::RangeOutOfBounds { unit: 1, end: 4, len: 3 }
    );
    assert!(GroupedVector::try_new(data, Partition::from_counts(&[2, 2])).is_err());
}

#[test]
fn test_unsorted_unit_ids_rejected() {
    init_logging();
    let data: Vec64<f64> = [1.0, 2.0, 3.0].into_iter().collect();
    let err = GroupedVector::from_unit_ids(data, &["a", "b", "a"]).unwrap_err();
    assert_eq!(err, PanelError::NonContiguousUnit { row: 2 });
}

#[test]
fn test_concat_panels() {
    init_logging();
    let x = create_test_panel();
    let xx = x.clone().concat(x.clone()).unwrap();
    assert_eq!(period_counts(&xx), vec![3, 2, 3, 2]);
    assert_eq!(xx.partition().range(2), 5..8);
    assert_eq!(xx.view().get(3).to_matrix(), x.view().get(1).to_matrix());
}
