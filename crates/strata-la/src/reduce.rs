//! Gauss-Jordan elimination on augmented matrices.

use crate::{DMat, LinalgError};
use strata::{Field, Scalar};
use tracing::debug;

impl<S: Scalar> DMat<S> {
    /// Horizontal concatenation `[self | other]`.
    pub fn shifted_with(&self, other: &DMat<S>) -> DMat<S> {
        assert_eq!(self.nrows(), other.nrows(), "DMat shifted_with: row count mismatch");
        let (p, q) = (self.ncols(), other.ncols());
        DMat::from_fn(self.nrows(), p + q, |i, j| if j < p { self.get(i, j) } else { other.get(i, j - p) })
    }

    /// Row of the largest `|A[k, j]|` for `k >= from`, first occurrence on ties.
    fn max_abs_row(&self, j: usize, from: usize) -> usize {
        let mut best = from;
        for k in (from + 1)..self.nrows() {
            if self.get(k, j).abs() > self.get(best, j).abs() {
                best = k;
            }
        }
        best
    }
}

impl<S: Field> DMat<S> {
    /// Reduce the left half of an augmented matrix `[A | B]` to reduced row
    /// echelon form, applying the same row operations to the right half.
    ///
    /// Only the first `ncols / 2` columns are used as pivot columns. Columns
    /// without a pivot above epsilon are skipped.
    pub fn reduce(&mut self) -> &mut Self {
        self.clear_lu();
        let (n, p) = self.shape();
        let mut r = 0;
        for j in 0..p / 2 {
            if r == n {
                break;
            }
            let k = self.max_abs_row(j, r);
            let pivot = self.get(k, j);
            if pivot.abs() <= S::EPSILON {
                debug!(column = j, "Gauss-Jordan: no pivot, column skipped");
                continue;
            }

            let mut row = self.as_view_mut();
            for c in 0..p {
                let v = row.get(k, c) / pivot;
                row.set(k, c, v);
            }
            row.swap_rows(k, r);

            let spin = self.row(r);
            for i in (0..n).filter(|&i| i != r) {
                let f = self.get(i, j);
                if f.is_negligible() {
                    continue;
                }
                for c in 0..p {
                    let v = self.get(i, c) - f * spin[c];
                    self.set(i, c, v);
                }
            }
            r += 1;
        }
        self
    }

    /// Inverse through Gauss-Jordan on `[A | I]`.
    ///
    /// Independent from the cached LU factorization.
    pub fn inverse_gauss_jordan(&self) -> Result<DMat<S>, LinalgError> {
        assert!(self.is_square(), "DMat inverse_gauss_jordan: matrix must be square");
        let n = self.nrows();
        if n == 0 {
            return Ok(DMat::zeros(0, 0));
        }
        let mut aug = self.shifted_with(&DMat::identity(n));
        aug.reduce();

        let left = aug.view(0, 0, n - 1, n - 1);
        if left != DMat::<S>::identity(n).as_view() {
            let rank = (0..n).filter(|&i| !left.row(i).is_null()).count();
            return Err(LinalgError::RankDeficient { rank, expected: n });
        }
        Ok(aug.sub_matrix(0, n, n - 1, 2 * n - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation() {
        let a = DMat::from_rows(&[[1.0], [2.0]]);
        let b = DMat::from_rows(&[[3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(a.shifted_with(&b), DMat::from_rows(&[[1.0, 3.0, 4.0], [2.0, 5.0, 6.0]]));
    }

    #[test]
    fn reduce_solves_augmented_system() {
        // x + y = 3, x - y = 1
        let mut m = DMat::from_rows(&[[1.0, 1.0, 3.0, 0.0], [1.0, -1.0, 1.0, 0.0]]);
        m.reduce();
        assert!(m.approx_eq(&DMat::from_rows(&[[1.0, 0.0, 2.0, 0.0], [0.0, 1.0, 1.0, 0.0]]), 1e-12));
    }

    #[test]
    fn gauss_jordan_matches_lu() {
        let a = DMat::from_rows(&[[2.0, 1.0, 1.0], [1.0, 3.0, 2.0], [1.0, 0.0, 0.0]]);
        let gj = a.inverse_gauss_jordan().unwrap();
        assert!(gj.approx_eq(&a.inverse().unwrap(), 1e-10));
    }

    #[test]
    fn rank_deficient_reports_rank() {
        let a = DMat::from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(a.inverse_gauss_jordan().unwrap_err(), LinalgError::RankDeficient { rank: 1, expected: 2 });
    }

    #[test]
    fn gauss_jordan_on_empty_matrix() {
        let inv = DMat::<f64>::zeros(0, 0).inverse_gauss_jordan().unwrap();
        assert_eq!(inv.shape(), (0, 0));
    }

    #[test]
    fn reduce_clears_cache() {
        let mut a = DMat::from_rows(&[[2.0, 0.0], [0.0, 2.0]]);
        a.det();
        assert!(a.has_cached_lu());
        a.reduce();
        assert!(!a.has_cached_lu());
        assert_eq!(a, DMat::from_rows(&[[1.0, 0.0], [0.0, 2.0]]));
    }
}
