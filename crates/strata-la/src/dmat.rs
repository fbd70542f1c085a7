use crate::mat_view::{MatView, MatViewMut};
use crate::{DVec, Lu};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use strata::Scalar;

/// Heap-allocated row-major matrix.
///
/// Element (row, col) is stored at `data[row * ncols + col]`.
///
/// The matrix owns an optional LU factorization of itself. It is computed
/// the first time an LU-backed query runs (determinant, inverse, solve) and
/// reused until the matrix is next borrowed mutably: every `&mut self`
/// method, [`IndexMut`], and [`view_mut`](Self::view_mut) drop it.
/// Singular matrices are never cached.
pub struct DMat<S> {
    data: Vec<S>,
    nrows: usize,
    ncols: usize,
    pub(crate) lu: OnceCell<Box<Lu<S>>>,
}

impl<S: Scalar> DMat<S> {
    /// Create from raw row-major data.
    pub fn from_raw(nrows: usize, ncols: usize, data: Vec<S>) -> Self {
        assert_eq!(data.len(), nrows * ncols, "DMat: data length mismatch");
        Self { data, nrows, ncols, lu: OnceCell::new() }
    }

    /// Create from a function.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> S) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self::from_raw(nrows, ncols, data)
    }

    /// Create from nested row data. All rows must have the same length.
    pub fn from_rows<R: AsRef<[S]>>(rows: &[R]) -> Self {
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (i, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            assert_eq!(r.len(), ncols, "DMat from_rows: row {i} has length {}, expected {ncols}", r.len());
            data.extend_from_slice(r);
        }
        Self::from_raw(rows.len(), ncols, data)
    }

    /// Stack row vectors of equal length.
    pub fn from_row_vectors(rows: &[DVec<S>]) -> Self {
        let slices: Vec<&[S]> = rows.iter().map(DVec::as_slice).collect();
        Self::from_rows(&slices)
    }

    /// Split a flat vector into `nrows` consecutive rows.
    pub fn from_dvec(v: &DVec<S>, nrows: usize) -> Self {
        assert!(nrows > 0 && v.len() % nrows == 0, "DMat from_dvec: {} elements do not split into {nrows} rows", v.len());
        Self::from_raw(nrows, v.len() / nrows, v.as_slice().to_vec())
    }

    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_raw(nrows, ncols, alloc::vec![S::ZERO; nrows * ncols])
    }

    pub fn ones(nrows: usize, ncols: usize) -> Self {
        Self::from_raw(nrows, ncols, alloc::vec![S::ONE; nrows * ncols])
    }

    pub fn identity(n: usize) -> Self {
        Self::scalar_matrix(S::ONE, n)
    }

    /// `s` on the diagonal, zero elsewhere.
    pub fn scalar_matrix(s: S, n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { s } else { S::ZERO })
    }

    /// Diagonal matrix from a vector.
    pub fn from_diagonal(diag: &DVec<S>) -> Self {
        let n = diag.len();
        Self::from_fn(n, n, |i, j| if i == j { diag[i] } else { S::ZERO })
    }

    /// `n x p` matrix with a single one at (i, j).
    pub fn canonical(i: usize, j: usize, n: usize, p: usize) -> Self {
        assert!(i < n && j < p, "DMat canonical: ({i}, {j}) out of range for {n}x{p}");
        let mut m = Self::zeros(n, p);
        m.data[i * p + j] = S::ONE;
        m
    }

    #[inline]
    pub fn nrows(&self) -> usize { self.nrows }

    #[inline]
    pub fn ncols(&self) -> usize { self.ncols }

    #[inline]
    pub fn shape(&self) -> (usize, usize) { (self.nrows, self.ncols) }

    #[inline]
    pub fn is_square(&self) -> bool { self.nrows == self.ncols }

    #[inline]
    pub(crate) fn index_of(&self, row: usize, col: usize) -> usize {
        assert!(row < self.nrows && col < self.ncols, "DMat: ({row}, {col}) out of range for {}x{}", self.nrows, self.ncols);
        row * self.ncols + col
    }

    /// Element access (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> S {
        self.data[self.index_of(row, col)]
    }

    /// Mutable element access. Drops the cached factorization.
    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut S {
        self.clear_lu();
        let k = self.index_of(row, col);
        &mut self.data[k]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: S) -> &mut Self {
        *self.get_mut(row, col) = val;
        self
    }

    /// Raw row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[S] { &self.data }

    pub fn as_mut_slice(&mut self) -> &mut [S] {
        self.clear_lu();
        &mut self.data
    }

    /// Flatten into a row-major vector.
    pub fn to_dvec(&self) -> DVec<S> {
        DVec::from_slice(&self.data)
    }

    /// Forget the cached factorization.
    #[inline]
    pub fn clear_lu(&mut self) {
        self.lu.take();
    }

    /// Whether a factorization is currently cached.
    #[inline]
    pub fn has_cached_lu(&self) -> bool {
        self.lu.get().is_some()
    }

    /// Whole matrix as a view. Empty when the matrix is.
    pub fn as_view(&self) -> MatView<'_, S> {
        MatView::whole(self)
    }

    pub fn as_view_mut(&mut self) -> MatViewMut<'_, S> {
        MatViewMut::whole(self)
    }

    /// Shared view of the inclusive window `(i1, j1) ..= (i2, j2)`.
    pub fn view(&self, i1: usize, j1: usize, i2: usize, j2: usize) -> MatView<'_, S> {
        MatView::new(self, i1, j1, i2, j2)
    }

    /// Exclusive view of the inclusive window `(i1, j1) ..= (i2, j2)`.
    pub fn view_mut(&mut self, i1: usize, j1: usize, i2: usize, j2: usize) -> MatViewMut<'_, S> {
        MatViewMut::new(self, i1, j1, i2, j2)
    }

    pub fn row(&self, i: usize) -> DVec<S> {
        assert!(i < self.nrows, "DMat row: index {i} out of range");
        DVec::from_slice(&self.data[i * self.ncols..(i + 1) * self.ncols])
    }

    pub fn col(&self, j: usize) -> DVec<S> {
        assert!(j < self.ncols, "DMat col: index {j} out of range");
        DVec::from_fn(self.nrows, |i| self.get(i, j))
    }

    /// Rows `i1..=i2` as vectors.
    pub fn rows(&self, i1: usize, i2: usize) -> Vec<DVec<S>> {
        (i1..=i2).map(|i| self.row(i)).collect()
    }

    /// Columns `j1..=j2` as vectors.
    pub fn cols(&self, j1: usize, j2: usize) -> Vec<DVec<S>> {
        (j1..=j2).map(|j| self.col(j)).collect()
    }

    /// Every row, as vectors.
    pub fn rows_all(&self) -> Vec<DVec<S>> {
        (0..self.nrows).map(|i| self.row(i)).collect()
    }

    /// Every column, as vectors.
    pub fn cols_all(&self) -> Vec<DVec<S>> {
        (0..self.ncols).map(|j| self.col(j)).collect()
    }

    /// Extract diagonal.
    pub fn diagonal(&self) -> DVec<S> {
        let n = self.nrows.min(self.ncols);
        DVec::from_fn(n, |i| self.get(i, i))
    }

    pub fn is_upper(&self) -> bool { self.as_view().is_upper() }

    pub fn is_lower(&self) -> bool { self.as_view().is_lower() }

    pub fn is_diagonal(&self) -> bool { self.as_view().is_diagonal() }

    /// Overwrite the start of row `i` with `v`.
    pub fn set_row(&mut self, i: usize, v: &DVec<S>) -> &mut Self {
        assert!(v.len() <= self.ncols, "DMat set_row: vector of length {} exceeds {} columns", v.len(), self.ncols);
        let start = self.index_of(i, 0);
        self.as_mut_slice()[start..start + v.len()].copy_from_slice(v.as_slice());
        self
    }

    /// Overwrite the start of column `j` with `v`.
    pub fn set_col(&mut self, j: usize, v: &DVec<S>) -> &mut Self {
        assert!(v.len() <= self.nrows, "DMat set_col: vector of length {} exceeds {} rows", v.len(), self.nrows);
        for (i, &x) in v.iter().enumerate() {
            self.set(i, j, x);
        }
        self
    }

    /// Write consecutive rows starting at `i1`; vectors past the last row are ignored.
    pub fn set_rows(&mut self, i1: usize, rows: &[DVec<S>]) -> &mut Self {
        let room = self.nrows.saturating_sub(i1);
        for (k, r) in rows.iter().take(room).enumerate() {
            self.set_row(i1 + k, r);
        }
        self
    }

    /// Write consecutive columns starting at `j1`; vectors past the last column are ignored.
    pub fn set_cols(&mut self, j1: usize, cols: &[DVec<S>]) -> &mut Self {
        let room = self.ncols.saturating_sub(j1);
        for (k, c) in cols.iter().take(room).enumerate() {
            self.set_col(j1 + k, c);
        }
        self
    }

    /// Swap two rows.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> &mut Self {
        assert!(a < self.nrows && b < self.nrows, "DMat swap_rows: index out of range");
        self.clear_lu();
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
        self
    }

    /// Swap two columns.
    pub fn swap_cols(&mut self, a: usize, b: usize) -> &mut Self {
        assert!(a < self.ncols && b < self.ncols, "DMat swap_cols: index out of range");
        self.clear_lu();
        if a != b {
            let n = self.ncols;
            for i in 0..self.nrows {
                self.data.swap(i * n + a, i * n + b);
            }
        }
        self
    }

    pub fn swap_elements(&mut self, (i1, j1): (usize, usize), (i2, j2): (usize, usize)) -> &mut Self {
        let (a, b) = (self.index_of(i1, j1), self.index_of(i2, j2));
        self.as_mut_slice().swap(a, b);
        self
    }

    /// Rotate row `i` left by `m` (right when negative).
    pub fn shift_row(&mut self, i: usize, m: isize) -> &mut Self {
        let last = self.ncols.saturating_sub(1);
        self.view_mut(i, 0, i, last).shift_row(0, m);
        self
    }

    /// Rotate column `j` up by `m` (down when negative).
    pub fn shift_col(&mut self, j: usize, m: isize) -> &mut Self {
        let last = self.nrows.saturating_sub(1);
        self.view_mut(0, j, last, j).shift_col(0, m);
        self
    }

    pub fn upper(&self) -> Self { self.as_view().upper() }

    pub fn lower(&self) -> Self { self.as_view().lower() }

    pub fn transposed(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self.get(j, i))
    }

    /// Independent copy of the inclusive window `(i1, j1) ..= (i2, j2)`.
    pub fn sub_matrix(&self, i1: usize, j1: usize, i2: usize, j2: usize) -> Self {
        self.view(i1, j1, i2, j2).to_dmat()
    }

    /// Paste `m` with its top-left corner at (i1, j1).
    pub fn set_sub_matrix(&mut self, i1: usize, j1: usize, m: &DMat<S>) -> &mut Self {
        if m.nrows == 0 || m.ncols == 0 {
            return self;
        }
        self.view_mut(i1, j1, i1 + m.nrows - 1, j1 + m.ncols - 1).copy_from(m.as_view());
        self
    }

    /// Trace (sum of diagonal).
    pub fn trace(&self) -> S {
        self.as_view().trace()
    }

    /// Matrix-vector product: y = A * x.
    pub fn mul_vec(&self, x: &DVec<S>) -> DVec<S> {
        assert_eq!(self.ncols, x.len(), "DMat mul_vec: dimension mismatch");
        let mut y = DVec::zeros(self.nrows);
        for i in 0..self.nrows {
            let row = &self.data[i * self.ncols..(i + 1) * self.ncols];
            for (j, &a_ij) in row.iter().enumerate() {
                y[i] += a_ij * x[j];
            }
        }
        y
    }

    /// Matrix-matrix product: C = A * B.
    pub fn mul_mat(&self, rhs: &DMat<S>) -> DMat<S> {
        assert_eq!(self.ncols, rhs.nrows, "DMat mul_mat: dimension mismatch");
        let mut c = DMat::zeros(self.nrows, rhs.ncols);
        let p = rhs.ncols;
        for i in 0..self.nrows {
            for k in 0..self.ncols {
                let a_ik = self.data[i * self.ncols + k];
                for j in 0..p {
                    c.data[i * p + j] += a_ik * rhs.data[k * p + j];
                }
            }
        }
        c
    }

    /// Scale all elements.
    pub fn scale(&self, s: S) -> Self {
        Self::from_raw(self.nrows, self.ncols, self.data.iter().map(|&x| x * s).collect())
    }

    /// Frobenius inner product: sum of element-wise products.
    pub fn frobenius_dot(&self, rhs: &DMat<S>) -> S {
        assert_eq!(self.shape(), rhs.shape(), "DMat frobenius_dot: shape mismatch");
        let mut s = S::ZERO;
        for (&a, &b) in self.data.iter().zip(&rhs.data) {
            s += a * b;
        }
        s
    }

    /// Frobenius norm squared.
    pub fn norm_sq(&self) -> S {
        self.frobenius_dot(self)
    }

    /// Frobenius norm.
    pub fn norm(&self) -> S {
        self.norm_sq().sqrt()
    }

    pub fn distance(&self, rhs: &DMat<S>) -> S {
        (self - rhs).norm()
    }

    /// Same shape and every element within `tol`.
    pub fn approx_eq(&self, rhs: &DMat<S>, tol: S) -> bool {
        self.shape() == rhs.shape() && self.data.iter().zip(&rhs.data).all(|(&a, &b)| (a - b).abs() <= tol)
    }

    /// `self^e` by repeated squaring. `e = 0` gives the identity.
    pub fn pow_unsigned(&self, mut e: u64) -> Self {
        assert!(self.is_square(), "DMat pow: matrix must be square");
        let mut base = self.clone();
        let mut acc = Self::identity(self.nrows);
        while e > 0 {
            if e & 1 == 1 {
                acc = acc.mul_mat(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.mul_mat(&base);
            }
        }
        acc
    }
}

impl<S: Clone> Clone for DMat<S> {
    /// The clone shares no state with the original; its factorization
    /// cache is carried over when one exists.
    fn clone(&self) -> Self {
        Self { data: self.data.clone(), nrows: self.nrows, ncols: self.ncols, lu: self.lu.clone() }
    }
}

impl<S: fmt::Debug> fmt::Debug for DMat<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DMat")
            .field("nrows", &self.nrows)
            .field("ncols", &self.ncols)
            .field("data", &self.data)
            .finish()
    }
}

/// Same shape and every element within epsilon.
impl<S: Scalar> PartialEq for DMat<S> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, S::EPSILON)
    }
}

impl<S: Scalar> From<Vec<Vec<S>>> for DMat<S> {
    fn from(rows: Vec<Vec<S>>) -> Self {
        Self::from_rows(&rows)
    }
}

impl<S: Scalar> From<MatView<'_, S>> for DMat<S> {
    fn from(v: MatView<'_, S>) -> Self {
        v.to_dmat()
    }
}

impl<S: Scalar> fmt::Display for DMat<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_view(), f)
    }
}

impl<S: Scalar> Index<(usize, usize)> for DMat<S> {
    type Output = S;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &S {
        &self.data[self.index_of(row, col)]
    }
}

impl<S: Scalar> IndexMut<(usize, usize)> for DMat<S> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut S {
        self.get_mut(row, col)
    }
}

impl<S: Scalar> Add for &DMat<S> {
    type Output = DMat<S>;
    fn add(self, rhs: &DMat<S>) -> DMat<S> {
        assert_eq!(self.shape(), rhs.shape(), "DMat add: shape mismatch");
        DMat::from_raw(self.nrows, self.ncols, self.data.iter().zip(&rhs.data).map(|(&a, &b)| a + b).collect())
    }
}

impl<S: Scalar> Sub for &DMat<S> {
    type Output = DMat<S>;
    fn sub(self, rhs: &DMat<S>) -> DMat<S> {
        assert_eq!(self.shape(), rhs.shape(), "DMat sub: shape mismatch");
        DMat::from_raw(self.nrows, self.ncols, self.data.iter().zip(&rhs.data).map(|(&a, &b)| a - b).collect())
    }
}

impl<S: Scalar> Neg for &DMat<S> {
    type Output = DMat<S>;
    fn neg(self) -> DMat<S> {
        DMat::from_raw(self.nrows, self.ncols, self.data.iter().map(|&x| -x).collect())
    }
}

impl<S: Scalar> Mul<&DVec<S>> for &DMat<S> {
    type Output = DVec<S>;
    fn mul(self, rhs: &DVec<S>) -> DVec<S> { self.mul_vec(rhs) }
}

impl<S: Scalar> Mul for &DMat<S> {
    type Output = DMat<S>;
    fn mul(self, rhs: &DMat<S>) -> DMat<S> { self.mul_mat(rhs) }
}

impl<S: Scalar> Mul<S> for &DMat<S> {
    type Output = DMat<S>;
    fn mul(self, s: S) -> DMat<S> { self.scale(s) }
}

impl<S: Scalar + Div<Output = S>> Div<S> for &DMat<S> {
    type Output = DMat<S>;
    fn div(self, s: S) -> DMat<S> {
        DMat::from_raw(self.nrows, self.ncols, self.data.iter().map(|&x| x / s).collect())
    }
}

impl<S: Scalar> AddAssign<&DMat<S>> for DMat<S> {
    fn add_assign(&mut self, rhs: &DMat<S>) {
        self.as_view_mut().add_from(rhs.as_view());
    }
}

impl<S: Scalar> SubAssign<&DMat<S>> for DMat<S> {
    fn sub_assign(&mut self, rhs: &DMat<S>) {
        self.as_view_mut().sub_from(rhs.as_view());
    }
}

impl<S: Scalar> MulAssign<&DMat<S>> for DMat<S> {
    fn mul_assign(&mut self, rhs: &DMat<S>) {
        *self = self.mul_mat(rhs);
    }
}

impl<S: Scalar> MulAssign<S> for DMat<S> {
    fn mul_assign(&mut self, s: S) {
        self.as_view_mut().scale(s);
    }
}

impl<S: Scalar + Div<Output = S>> DivAssign<S> for DMat<S> {
    fn div_assign(&mut self, s: S) {
        for x in self.as_mut_slice() {
            *x = *x / s;
        }
    }
}
