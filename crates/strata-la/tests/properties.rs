//! Property tests over random vectors and matrices.

use proptest::prelude::*;
use strata_la::{DMat, DVec};

fn vec_strategy(n: usize) -> impl Strategy<Value = DVec<f64>> {
    proptest::collection::vec(-100.0f64..100.0, n).prop_map(DVec::from_vec)
}

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = DMat<f64>> {
    proptest::collection::vec(-100.0f64..100.0, rows * cols)
        .prop_map(move |data| DMat::from_raw(rows, cols, data))
}

/// Strictly diagonally dominant, hence invertible and well conditioned.
fn invertible_strategy(n: usize) -> impl Strategy<Value = DMat<f64>> {
    proptest::collection::vec(-1.0f64..1.0, n * n).prop_map(move |data| {
        let mut m = DMat::from_raw(n, n, data);
        for i in 0..n {
            let v = m.get(i, i) + n as f64 + 1.0;
            m.set(i, i, v);
        }
        m
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn add_then_sub_restores(
        (u, v) in (1usize..16).prop_flat_map(|n| (vec_strategy(n), vec_strategy(n)))
    ) {
        let w = &(&u + &v) - &v;
        prop_assert!(w.approx_eq(&u, 1e-9));
    }

    #[test]
    fn shift_round_trip(v in (1usize..16).prop_flat_map(vec_strategy), m in -40isize..40) {
        let mut w = v.clone();
        w.shift(m).shift(-m);
        prop_assert_eq!(w.as_slice(), v.as_slice());
    }

    #[test]
    fn transpose_is_involution(
        m in (1usize..6, 1usize..6).prop_flat_map(|(r, c)| matrix_strategy(r, c))
    ) {
        prop_assert_eq!(m.transposed().transposed(), m);
    }

    #[test]
    fn solve_inverts_product(
        (m, v) in (1usize..6).prop_flat_map(|n| (invertible_strategy(n), vec_strategy(n)))
    ) {
        let x = m.solve(&(&m * &v)).unwrap();
        prop_assert!(x.approx_eq(&v, 1e-8));
    }

    #[test]
    fn inverse_is_two_sided(m in (1usize..6).prop_flat_map(invertible_strategy)) {
        let inv = m.inverse().unwrap();
        let n = m.nrows();
        prop_assert!((&m * &inv).approx_eq(&DMat::identity(n), 1e-10));
        prop_assert!((&inv * &m).approx_eq(&DMat::identity(n), 1e-10));
    }

    #[test]
    fn square_power_matches_product(m in (1usize..5).prop_flat_map(|n| matrix_strategy(n, n))) {
        prop_assert_eq!(m.pow(0).unwrap(), DMat::identity(m.nrows()));
        prop_assert!(m.pow(2).unwrap().approx_eq(&(&m * &m), 1e-9));
    }

    #[test]
    fn det_of_product_is_product_of_dets(
        (a, b) in (1usize..5).prop_flat_map(|n| (invertible_strategy(n), invertible_strategy(n)))
    ) {
        let lhs = (&a * &b).det();
        let rhs = a.det() * b.det();
        prop_assert!((lhs - rhs).abs() <= 1e-9 * rhs.abs().max(1.0));
    }
}
