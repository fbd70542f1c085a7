//! Band matrix generators.

use crate::{DMat, DVec};
use alloc::vec::Vec;
use strata::Scalar;

impl<S: Scalar> DMat<S> {
    /// Square matrix built from an odd number of diagonal bands.
    ///
    /// `bands[len / 2]` is the main diagonal and sets the dimension; band
    /// `l` positions away from it lies at offset `l` (negative below) and
    /// must have `dim - |l|` entries. `bands[0]` is therefore the lowest band.
    pub fn n_diagonal(bands: &[DVec<S>]) -> Self {
        assert!(bands.len() % 2 == 1, "DMat n_diagonal: band count must be odd, got {}", bands.len());
        let middle = bands.len() / 2;
        let dim = bands[middle].len();
        assert!(middle < dim.max(1), "DMat n_diagonal: {} bands do not fit in dimension {dim}", bands.len());

        let mut m = Self::zeros(dim, dim);
        for (b, band) in bands.iter().enumerate() {
            let offset = b as isize - middle as isize;
            let len = dim - offset.unsigned_abs();
            assert_eq!(band.len(), len, "DMat n_diagonal: band at offset {offset} needs {len} entries");
            for k in 0..len {
                if offset < 0 {
                    m.set(k + offset.unsigned_abs(), k, band[k]);
                } else {
                    m.set(k, k + offset as usize, band[k]);
                }
            }
        }
        m
    }

    /// Symmetric band matrix of dimension `n` with constant bands.
    ///
    /// The last scalar fills the main diagonal, the one before it the first
    /// diagonals above and below, and so on outward.
    pub fn n_scalar(scalars: &[S], n: usize) -> Self {
        let s = scalars.len();
        assert!(s >= 1 && s <= n, "DMat n_scalar: {s} scalars do not fit in dimension {n}");
        let bands: Vec<DVec<S>> = (0..2 * s - 1)
            .map(|b| {
                let d = (b as isize - (s as isize - 1)).unsigned_abs();
                DVec::scalar(scalars[s - 1 - d], n - d)
            })
            .collect();
        Self::n_diagonal(&bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tridiagonal_from_bands() {
        let lo = DVec::from_slice(&[1.0, 2.0]);
        let mid = DVec::from_slice(&[3.0, 4.0, 5.0]);
        let hi = DVec::from_slice(&[6.0, 7.0]);
        let m = DMat::n_diagonal(&[lo, mid, hi]);
        assert_eq!(
            m,
            DMat::from_rows(&[[3.0, 6.0, 0.0], [1.0, 4.0, 7.0], [0.0, 2.0, 5.0]])
        );
    }

    #[test]
    fn single_band_is_diagonal() {
        let m = DMat::n_diagonal(&[DVec::from_slice(&[1.0, 2.0])]);
        assert!(m.is_diagonal());
        assert_eq!(m.trace(), 3.0);
    }

    #[test]
    fn symmetric_constant_bands() {
        let m = DMat::n_scalar(&[2.0, 1.0], 3);
        assert_eq!(
            m,
            DMat::from_rows(&[[1.0, 2.0, 0.0], [2.0, 1.0, 2.0], [0.0, 2.0, 1.0]])
        );
        assert_eq!(m, m.transposed());
        assert_eq!(DMat::n_scalar(&[5.0], 2), DMat::scalar_matrix(5.0, 2));
    }

    #[test]
    #[should_panic(expected = "band count must be odd")]
    fn even_band_count_panics() {
        DMat::n_diagonal(&[DVec::<f64>::zeros(2), DVec::zeros(2)]);
    }
}
