use crate::mat_view::MatView;
use crate::{DMat, DVec, LinalgError};
use alloc::boxed::Box;
use alloc::vec::Vec;
use strata::Field;
use tracing::{debug, trace};

/// LU decomposition with partial pivoting: PA = LU
#[derive(Clone, Debug)]
pub struct Lu<S> {
    /// Combined L (lower, unit diagonal) and U (upper) in one matrix.
    lu: DMat<S>,
    /// Row `i` of the factorization is row `perm[i]` of the input.
    perm: Vec<usize>,
    /// Number of row swaps (for determinant sign).
    swaps: usize,
}

impl<S: Field> Lu<S> {
    /// Factorize a square matrix.
    pub fn new(a: &DMat<S>) -> Result<Self, LinalgError> {
        Self::from_view(a.as_view())
    }

    /// Factorize a square window.
    pub fn from_view(a: MatView<'_, S>) -> Result<Self, LinalgError> {
        assert!(a.is_square(), "LU: matrix must be square");
        let n = a.nrows();
        let mut lu = a.to_dmat();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut swaps = 0;
        let data = lu.as_mut_slice();

        for k in 0..n {
            // Find pivot: largest |a[i][k]| for i >= k
            let mut max_val = data[k * n + k].abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let v = data[i * n + k].abs();
                if v > max_val {
                    max_val = v;
                    max_row = i;
                }
            }

            if max_val <= S::EPSILON {
                debug!(column = k, "LU: no usable pivot, matrix is singular");
                return Err(LinalgError::Singular { column: k });
            }

            if max_row != k {
                for j in 0..n {
                    data.swap(k * n + j, max_row * n + j);
                }
                perm.swap(k, max_row);
                swaps += 1;
            }

            let pivot_inv = data[k * n + k].recip();
            for i in (k + 1)..n {
                let factor = data[i * n + k] * pivot_inv;
                data[i * n + k] = factor;
                for j in (k + 1)..n {
                    let u_kj = data[k * n + j];
                    data[i * n + j] -= factor * u_kj;
                }
            }
        }

        trace!(n, swaps, "LU factorization computed");
        Ok(Self { lu, perm, swaps })
    }

    #[inline]
    pub fn dim(&self) -> usize { self.lu.nrows() }

    /// Row permutation applied to the input.
    #[inline]
    pub fn perm(&self) -> &[usize] { &self.perm }

    #[inline]
    pub fn swaps(&self) -> usize { self.swaps }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> DMat<S> {
        let n = self.dim();
        DMat::from_fn(n, n, |i, j| match i.cmp(&j) {
            core::cmp::Ordering::Greater => self.lu.get(i, j),
            core::cmp::Ordering::Equal => S::ONE,
            core::cmp::Ordering::Less => S::ZERO,
        })
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> DMat<S> {
        self.lu.upper()
    }

    /// Permutation matrix P with PA = LU.
    pub fn p(&self) -> DMat<S> {
        let n = self.dim();
        DMat::from_fn(n, n, |i, j| if self.perm[i] == j { S::ONE } else { S::ZERO })
    }

    /// Solve Ax = b.
    pub fn solve(&self, b: &DVec<S>) -> DVec<S> {
        let n = self.dim();
        assert_eq!(b.len(), n, "LU solve: dimension mismatch");
        let mut x = DVec::from_fn(n, |i| b[self.perm[i]]);
        self.substitute(&mut x);
        x
    }

    /// Solve Ax = b, overwriting `b` with x.
    pub fn solve_in_place(&self, b: &mut DVec<S>) {
        *b = self.solve(b);
    }

    // Forward then back substitution on an already permuted right-hand side.
    fn substitute(&self, x: &mut DVec<S>) {
        let n = self.dim();
        let a = self.lu.as_slice();

        // L * y = Pb
        for i in 1..n {
            let mut sum = x[i];
            for j in 0..i {
                sum -= a[i * n + j] * x[j];
            }
            x[i] = sum;
        }

        // U * x = y
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in (i + 1)..n {
                sum -= a[i * n + j] * x[j];
            }
            x[i] = sum / a[i * n + i];
        }
    }

    /// Solve AX = B (multiple right-hand sides).
    pub fn solve_mat(&self, b: &DMat<S>) -> DMat<S> {
        assert_eq!(b.nrows(), self.dim(), "LU solve_mat: dimension mismatch");
        let mut result = DMat::zeros(b.nrows(), b.ncols());
        for j in 0..b.ncols() {
            result.set_col(j, &self.solve(&b.col(j)));
        }
        result
    }

    /// Determinant.
    pub fn det(&self) -> S {
        let mut d = if self.swaps % 2 == 0 { S::ONE } else { -S::ONE };
        for i in 0..self.dim() {
            d *= self.lu.get(i, i);
        }
        d
    }

    /// Inverse (via solving A * A^-1 = I).
    pub fn inverse(&self) -> DMat<S> {
        self.solve_mat(&DMat::identity(self.dim()))
    }
}

impl<S: Field> DMat<S> {
    /// Cached factorization, computed on first use.
    pub fn lu(&self) -> Result<&Lu<S>, LinalgError> {
        if let Some(lu) = self.lu.get() {
            trace!(n = self.nrows(), "LU cache hit");
            return Ok(&**lu);
        }
        let lu = Lu::new(self)?;
        Ok(&**self.lu.get_or_init(|| Box::new(lu)))
    }

    /// Determinant; zero when the matrix is singular.
    pub fn det(&self) -> S {
        self.try_det().unwrap_or(S::ZERO)
    }

    /// Determinant, reporting singularity as an error.
    pub fn try_det(&self) -> Result<S, LinalgError> {
        Ok(self.lu()?.det())
    }

    pub fn inverse(&self) -> Result<DMat<S>, LinalgError> {
        Ok(self.lu()?.inverse())
    }

    /// Replace `self` with its inverse. On error `self` is left untouched.
    pub fn invert(&mut self) -> Result<(), LinalgError> {
        *self = self.inverse()?;
        Ok(())
    }

    /// Solve `self * x = b`.
    pub fn solve(&self, b: &DVec<S>) -> Result<DVec<S>, LinalgError> {
        Ok(self.lu()?.solve(b))
    }

    /// Solve `self * x = b`, overwriting `b`. On error `b` is left untouched.
    pub fn solve_in_place(&self, b: &mut DVec<S>) -> Result<(), LinalgError> {
        self.lu()?.solve_in_place(b);
        Ok(())
    }

    pub fn lu_l(&self) -> Result<DMat<S>, LinalgError> {
        Ok(self.lu()?.l())
    }

    pub fn lu_u(&self) -> Result<DMat<S>, LinalgError> {
        Ok(self.lu()?.u())
    }

    pub fn lu_perm(&self) -> Result<Vec<usize>, LinalgError> {
        Ok(self.lu()?.perm().to_vec())
    }

    /// Integer power. `e < 0` inverts first.
    pub fn pow(&self, e: i64) -> Result<DMat<S>, LinalgError> {
        if e < 0 {
            Ok(self.inverse()?.pow_unsigned(e.unsigned_abs()))
        } else {
            Ok(self.pow_unsigned(e.unsigned_abs()))
        }
    }

    /// In-place [`pow`](Self::pow). On error `self` is left untouched.
    pub fn pow_assign(&mut self, e: i64) -> Result<(), LinalgError> {
        *self = self.pow(e)?;
        Ok(())
    }
}

/// Window algebra factorizes afresh on every call.
impl<S: Field> MatView<'_, S> {
    pub fn det(&self) -> S {
        self.try_det().unwrap_or(S::ZERO)
    }

    pub fn try_det(&self) -> Result<S, LinalgError> {
        Ok(Lu::from_view(*self)?.det())
    }

    pub fn inverse(&self) -> Result<DMat<S>, LinalgError> {
        Ok(Lu::from_view(*self)?.inverse())
    }

    pub fn solve(&self, b: &DVec<S>) -> Result<DVec<S>, LinalgError> {
        Ok(Lu::from_view(*self)?.solve(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_factorization() {
        let e = DMat::<f64>::identity(0);
        assert_eq!(e.det(), 1.0);
        assert_eq!(e.try_det(), Ok(1.0));
        assert_eq!(e.inverse().unwrap().shape(), (0, 0));
        assert_eq!(e.solve(&DVec::zeros(0)).unwrap().len(), 0);
        assert_eq!(e.lu().unwrap().dim(), 0);
    }

    #[test]
    fn solve_simple() {
        // [2 1] [x]   [5]    x=2, y=1
        // [1 3] [y] = [5]
        let a = DMat::<f64>::from_rows(&[[2.0, 1.0], [1.0, 3.0]]);
        let b = DVec::from_slice(&[5.0, 5.0]);
        let x = a.solve(&b).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-10);
        assert!((x[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn determinant() {
        let a = DMat::<f64>::from_rows(&[[3.0, 7.0], [1.0, -4.0]]);
        assert!((a.det() - (-19.0)).abs() < 1e-10);
        let b = DMat::<f64>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        assert!((b.det() - (-2.0)).abs() < 1e-12);
    }

    #[test]
    fn inverse_roundtrip() {
        let a = DMat::<f64>::from_rows(&[[2.0, 1.0, 1.0], [1.0, 3.0, 2.0], [1.0, 0.0, 0.0]]);
        let ainv = a.inverse().unwrap();
        let prod = &a * &ainv;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (prod.get(i, j) - expected).abs() < 1e-10,
                    "mismatch at ({}, {}): {}",
                    i,
                    j,
                    prod.get(i, j)
                );
            }
        }
    }

    #[test]
    fn factors_reassemble() {
        let a = DMat::from_rows(&[[1.0, 2.0, 0.0], [4.0, 1.0, 3.0], [2.0, 5.0, 1.0]]);
        let lu = Lu::new(&a).unwrap();
        assert!(lu.l().is_lower());
        assert!(lu.u().is_upper());
        assert_eq!(lu.perm()[0], 1);
        assert!((&lu.p() * &a).approx_eq(&(&lu.l() * &lu.u()), 1e-12));
    }

    #[test]
    fn singular_is_an_error() {
        let a = DMat::from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(Lu::new(&a).unwrap_err(), LinalgError::Singular { column: 1 });
        assert_eq!(a.det(), 0.0);
        assert!(a.inverse().is_err());
        assert!(!a.has_cached_lu());
    }

    #[test]
    fn cache_fills_and_clears() {
        let mut a = DMat::<f64>::from_rows(&[[4.0, 3.0], [6.0, 3.0]]);
        assert!(!a.has_cached_lu());
        let d = a.det();
        assert!(a.has_cached_lu());
        assert_eq!(a.det(), d);

        a[(0, 0)] = 5.0;
        assert!(!a.has_cached_lu());
        assert!((a.det() - (-3.0)).abs() < 1e-12);

        a.view_mut(0, 0, 0, 0).fill(4.0);
        assert!(!a.has_cached_lu());
    }

    #[test]
    fn window_det_ignores_rest() {
        let a = DMat::<f64>::from_rows(&[[9.0, 9.0, 9.0], [9.0, 1.0, 2.0], [9.0, 3.0, 4.0]]);
        assert!((a.view(1, 1, 2, 2).det() - (-2.0)).abs() < 1e-12);
        assert!(!a.has_cached_lu());
    }

    #[test]
    fn negative_power_inverts() {
        let a = DMat::from_rows(&[[2.0, 0.0], [0.0, 4.0]]);
        let p = a.pow(-2).unwrap();
        assert!(p.approx_eq(&DMat::from_rows(&[[0.25, 0.0], [0.0, 0.0625]]), 1e-12));
        assert!(DMat::from_rows(&[[1.0, 1.0], [1.0, 1.0]]).pow(-1).is_err());
    }
}
