//! End-to-end checks for the vector and matrix engines.

use strata::{Gf256, Pixel};
use strata_la::{DMat, DVec, LinalgError, Lu};

const TOL: f64 = 1e-12;

fn m2() -> DMat<f64> {
    DMat::from_rows(&[[1.0, 2.0], [3.0, 4.0]])
}

#[test]
fn windowed_fill_leaves_outside_untouched() {
    let mut v = DVec::<f64>::zeros(5);
    v.view_mut(1, 3).fill(7.0);
    assert_eq!(v.as_slice(), &[0.0, 7.0, 7.0, 7.0, 0.0]);
}

#[test]
fn two_by_two_determinant_and_inverse() {
    let m = m2();
    assert!((m.det() - (-2.0)).abs() < TOL);

    let inv = m.inverse().unwrap();
    assert!(inv.approx_eq(&DMat::from_rows(&[[-2.0, 1.0], [1.5, -0.5]]), TOL));
    assert!((&m * &inv).approx_eq(&DMat::identity(2), TOL));
}

#[test]
fn scalar_matrix_inverse() {
    let m = DMat::scalar_matrix(2.0, 2);
    assert_eq!(m.inverse().unwrap(), DMat::identity(2).scale(0.5));
}

#[test]
fn power_identities() {
    let m = DMat::from_rows(&[[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]]);
    assert_eq!(m.pow(0).unwrap(), DMat::identity(3));
    assert!(m.pow(2).unwrap().approx_eq(&(&m * &m), TOL));
    assert!(m.pow(-1).unwrap().approx_eq(&m.inverse().unwrap(), TOL));
    assert!(m.pow(-3).unwrap().approx_eq(&m.pow(3).unwrap().inverse().unwrap(), 1e-10));
}

#[test]
fn pow_assign_replaces_self() {
    let mut m = m2();
    m.pow_assign(2).unwrap();
    assert_eq!(m, DMat::from_rows(&[[7.0, 10.0], [15.0, 22.0]]));
}

#[test]
fn solve_recovers_vector() {
    let m = DMat::from_rows(&[[4.0, -2.0, 1.0], [3.0, 6.0, -4.0], [2.0, 1.0, 8.0]]);
    let v = DVec::from_slice(&[1.0, -2.0, 0.5]);
    let b = &m * &v;
    let x = m.solve(&b).unwrap();
    assert!(x.approx_eq(&v, TOL));

    let mut y = b.clone();
    m.solve_in_place(&mut y).unwrap();
    assert!(y.approx_eq(&v, TOL));
}

#[test]
fn zeros_and_ones() {
    let z = DMat::<f64>::zeros(3, 4);
    assert_eq!(z.as_slice().len(), 12);
    assert!(z.as_slice().iter().all(|&x| x == 0.0));
    let o = DMat::<Gf256>::ones(2, 3);
    assert!(o.as_slice().iter().all(|&x| x == Gf256(1)));
}

#[test]
fn singular_matrix_is_left_unchanged() {
    let mut m = DMat::from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
    let before = m.clone();
    assert_eq!(m.det(), 0.0);
    assert_eq!(m.try_det(), Err(LinalgError::Singular { column: 1 }));
    assert!(m.invert().is_err());
    assert_eq!(m, before);

    let mut b = DVec::from_slice(&[1.0, 1.0]);
    assert!(m.solve_in_place(&mut b).is_err());
    assert_eq!(b.as_slice(), &[1.0, 1.0]);
}

#[test]
fn invert_in_place() {
    let mut m = m2();
    m.invert().unwrap();
    assert!(m.approx_eq(&DMat::from_rows(&[[-2.0, 1.0], [1.5, -0.5]]), TOL));
    m.invert().unwrap();
    assert!(m.approx_eq(&m2(), TOL));
}

#[test]
fn cached_factors_survive_reads_only() {
    let mut m = DMat::from_rows(&[[0.0, 1.0], [2.0, 3.0]]);
    let l = m.lu_l().unwrap();
    let u = m.lu_u().unwrap();
    assert_eq!(m.lu_perm().unwrap(), vec![1, 0]);
    assert!(m.has_cached_lu());
    assert_eq!(&l * &u, DMat::from_rows(&[[2.0, 3.0], [0.0, 1.0]]));

    m.set(0, 0, 1.0);
    assert!(!m.has_cached_lu());
    m.det();
    m.swap_rows(0, 1);
    assert!(!m.has_cached_lu());
}

#[test]
fn explicit_factorization_reuse() {
    let m = m2();
    let lu = Lu::new(&m).unwrap();
    assert_eq!(lu.swaps(), 1);
    assert!((lu.det() - m.det()).abs() < TOL);
    let x = lu.solve(&DVec::from_slice(&[5.0, 11.0]));
    assert!(x.approx_eq(&DVec::from_slice(&[1.0, 2.0]), TOL));
}

#[test]
fn window_algebra_is_local() {
    let m = DMat::from_rows(&[[5.0, 5.0, 5.0], [5.0, 1.0, 2.0], [5.0, 3.0, 4.0]]);
    let w = m.view(1, 1, 2, 2);
    assert!(w.inverse().unwrap().approx_eq(&DMat::from_rows(&[[-2.0, 1.0], [1.5, -0.5]]), TOL));
    let x = w.solve(&DVec::from_slice(&[5.0, 11.0])).unwrap();
    assert!(x.approx_eq(&DVec::from_slice(&[1.0, 2.0]), TOL));
    assert_eq!(DMat::from(w), m.sub_matrix(1, 1, 2, 2));
}

#[test]
fn gauss_jordan_and_lu_agree() {
    let m = DMat::from_rows(&[[0.0, 2.0, 1.0], [1.0, -1.0, 0.0], [3.0, 0.0, 1.0]]);
    let a = m.inverse().unwrap();
    let b = m.inverse_gauss_jordan().unwrap();
    assert!(a.approx_eq(&b, 1e-10));
}

#[test]
fn negative_index_reads_from_window_end() {
    let v = DVec::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(v.at(-1), 5.0);
    assert_eq!(v.view(1, 3).at(-1), 4.0);
    assert_eq!(v.view(1, 3).at(0), 2.0);
}

#[test]
fn band_generators() {
    let m = DMat::<f64>::n_scalar(&[-1.0, 2.0], 4);
    assert!((m.det() - 5.0).abs() < 1e-10);
    assert_eq!(m.row(1).as_slice(), &[-1.0, 2.0, -1.0, 0.0]);
}

#[test]
fn pixel_matrices_stay_integral() {
    let m = DMat::from_fn(2, 2, |i, j| Pixel::grey((i * 2 + j) as i32 * 100).limited());
    let sum = &m + &m;
    assert_eq!(sum.get(1, 1), Pixel::grey(255));
    assert_eq!((&m / Pixel::grey(3)).get(0, 1), Pixel::grey(33));
}

#[test]
fn from_nested_vectors() {
    let m: DMat<f64> = vec![vec![1.0, 2.0], vec![3.0, 4.0]].into();
    assert_eq!(m, m2());
    assert_eq!(DMat::from_row_vectors(&m.rows_all()), m);
    assert_eq!(DMat::from_dvec(&DVec::from_slice(&[1.0, 2.0, 3.0, 4.0]), 2), m);
    assert_eq!(m.cols_all()[1].as_slice(), &[2.0, 4.0]);
}

#[test]
#[should_panic(expected = "DMat mul_mat: dimension mismatch")]
fn mismatched_product_panics() {
    let _ = &DMat::<f64>::zeros(2, 3) * &DMat::<f64>::zeros(2, 3);
}
