use crate::{DMat, DVec};
use core::fmt;
use strata::Scalar;

/// Shared view of the inclusive window `[i1, j1] ..= [i2, j2]` of a matrix.
///
/// Indices taken by view methods are relative to the window's top-left
/// corner. Shape queries report the window extent. A whole-matrix view of an
/// empty matrix is itself empty.
#[derive(Clone, Copy)]
pub struct MatView<'a, S> {
    mat: &'a DMat<S>,
    i1: usize,
    j1: usize,
    // exclusive ends
    i_end: usize,
    j_end: usize,
}

/// Exclusive view of a matrix window. Creating one clears the owner's
/// cached factorization.
pub struct MatViewMut<'a, S> {
    mat: &'a mut DMat<S>,
    i1: usize,
    j1: usize,
    i_end: usize,
    j_end: usize,
}

#[inline]
pub(crate) fn check_window(nrows: usize, ncols: usize, i1: usize, j1: usize, i2: usize, j2: usize) {
    assert!(i1 <= i2 && j1 <= j2, "window ({i1}, {j1})..=({i2}, {j2}) is inverted");
    assert!(
        i2 < nrows && j2 < ncols,
        "window ({i1}, {j1})..=({i2}, {j2}) out of range for {nrows}x{ncols} matrix"
    );
}

impl<'a, S: Scalar> MatView<'a, S> {
    pub(crate) fn new(mat: &'a DMat<S>, i1: usize, j1: usize, i2: usize, j2: usize) -> Self {
        check_window(mat.nrows(), mat.ncols(), i1, j1, i2, j2);
        Self { mat, i1, j1, i_end: i2 + 1, j_end: j2 + 1 }
    }

    /// The whole matrix, including an empty one.
    pub(crate) fn whole(mat: &'a DMat<S>) -> Self {
        let (i_end, j_end) = mat.shape();
        Self { mat, i1: 0, j1: 0, i_end, j_end }
    }

    #[inline]
    pub fn nrows(&self) -> usize { self.i_end - self.i1 }

    #[inline]
    pub fn ncols(&self) -> usize { self.j_end - self.j1 }

    #[inline]
    pub fn shape(&self) -> (usize, usize) { (self.nrows(), self.ncols()) }

    #[inline]
    pub fn is_square(&self) -> bool { self.nrows() == self.ncols() }

    /// Window-relative element access.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> S {
        assert!(i < self.nrows() && j < self.ncols(), "MatView get: ({i}, {j}) out of range");
        self.mat.get(self.i1 + i, self.j1 + j)
    }

    /// Narrow further (window-relative corners).
    pub fn view(&self, i1: usize, j1: usize, i2: usize, j2: usize) -> MatView<'a, S> {
        check_window(self.nrows(), self.ncols(), i1, j1, i2, j2);
        MatView { mat: self.mat, i1: self.i1 + i1, j1: self.j1 + j1, i_end: self.i1 + i2 + 1, j_end: self.j1 + j2 + 1 }
    }

    /// Row `i` of the window as an independent vector.
    pub fn row(&self, i: usize) -> DVec<S> {
        assert!(i < self.nrows(), "MatView row: index {i} out of range");
        let start = (self.i1 + i) * self.mat.ncols() + self.j1;
        DVec::from_slice(&self.mat.as_slice()[start..start + self.ncols()])
    }

    /// Column `j` of the window as an independent vector.
    pub fn col(&self, j: usize) -> DVec<S> {
        assert!(j < self.ncols(), "MatView col: index {j} out of range");
        DVec::from_fn(self.nrows(), |i| self.get(i, j))
    }

    /// Independent copy of the window.
    pub fn to_dmat(&self) -> DMat<S> {
        DMat::from_fn(self.nrows(), self.ncols(), |i, j| self.get(i, j))
    }

    /// No entry strictly below the diagonal exceeds epsilon.
    pub fn is_upper(&self) -> bool {
        (0..self.nrows()).all(|i| (0..i.min(self.ncols())).all(|j| self.get(i, j).is_negligible()))
    }

    /// No entry strictly above the diagonal exceeds epsilon.
    pub fn is_lower(&self) -> bool {
        (0..self.nrows()).all(|i| ((i + 1)..self.ncols()).all(|j| self.get(i, j).is_negligible()))
    }

    pub fn is_diagonal(&self) -> bool {
        self.is_upper() && self.is_lower()
    }

    /// Copy keeping `j >= i`, zeros elsewhere.
    pub fn upper(&self) -> DMat<S> {
        DMat::from_fn(self.nrows(), self.ncols(), |i, j| if j >= i { self.get(i, j) } else { S::ZERO })
    }

    /// Copy keeping `j <= i`, zeros elsewhere.
    pub fn lower(&self) -> DMat<S> {
        DMat::from_fn(self.nrows(), self.ncols(), |i, j| if j <= i { self.get(i, j) } else { S::ZERO })
    }

    pub fn transposed(&self) -> DMat<S> {
        DMat::from_fn(self.ncols(), self.nrows(), |i, j| self.get(j, i))
    }

    /// Sum of the window's diagonal.
    pub fn trace(&self) -> S {
        let mut s = S::ZERO;
        for k in 0..self.nrows().min(self.ncols()) {
            s += self.get(k, k);
        }
        s
    }

    /// Window × window product.
    pub fn mul_mat(&self, rhs: MatView<'_, S>) -> DMat<S> {
        assert_eq!(self.ncols(), rhs.nrows(), "MatView mul_mat: dimension mismatch");
        let mut c = DMat::zeros(self.nrows(), rhs.ncols());
        for i in 0..self.nrows() {
            for k in 0..self.ncols() {
                let a_ik = self.get(i, k);
                for j in 0..rhs.ncols() {
                    c[(i, j)] += a_ik * rhs.get(k, j);
                }
            }
        }
        c
    }

    /// Linear map: y = A * x over the window.
    pub fn mul_vec(&self, x: &DVec<S>) -> DVec<S> {
        assert_eq!(self.ncols(), x.len(), "MatView mul_vec: dimension mismatch");
        DVec::from_fn(self.nrows(), |i| {
            let mut s = S::ZERO;
            for j in 0..self.ncols() {
                s += self.get(i, j) * x[j];
            }
            s
        })
    }

    /// Frobenius inner product.
    pub fn frobenius_dot(&self, rhs: MatView<'_, S>) -> S {
        assert_eq!(self.shape(), rhs.shape(), "MatView frobenius_dot: shape mismatch");
        let mut s = S::ZERO;
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                s += self.get(i, j) * rhs.get(i, j);
            }
        }
        s
    }

    pub fn approx_eq(&self, rhs: MatView<'_, S>, tol: S) -> bool {
        self.shape() == rhs.shape()
            && (0..self.nrows())
                .all(|i| (0..self.ncols()).all(|j| (self.get(i, j) - rhs.get(i, j)).abs() <= tol))
    }
}

impl<S: Scalar> PartialEq for MatView<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other, S::EPSILON)
    }
}

impl<S: Scalar> fmt::Debug for MatView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatView")
            .field("corner", &(self.i1, self.j1))
            .field("shape", &self.shape())
            .finish()
    }
}

impl<S: Scalar> fmt::Display for MatView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.row(i))?;
        }
        Ok(())
    }
}

impl<'a, S: Scalar> MatViewMut<'a, S> {
    pub(crate) fn new(mat: &'a mut DMat<S>, i1: usize, j1: usize, i2: usize, j2: usize) -> Self {
        check_window(mat.nrows(), mat.ncols(), i1, j1, i2, j2);
        mat.clear_lu();
        Self { mat, i1, j1, i_end: i2 + 1, j_end: j2 + 1 }
    }

    pub(crate) fn whole(mat: &'a mut DMat<S>) -> Self {
        mat.clear_lu();
        let (i_end, j_end) = mat.shape();
        Self { mat, i1: 0, j1: 0, i_end, j_end }
    }

    #[inline]
    pub fn nrows(&self) -> usize { self.i_end - self.i1 }

    #[inline]
    pub fn ncols(&self) -> usize { self.j_end - self.j1 }

    pub fn as_view(&self) -> MatView<'_, S> {
        MatView { mat: self.mat, i1: self.i1, j1: self.j1, i_end: self.i_end, j_end: self.j_end }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> S {
        self.as_view().get(i, j)
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: S) -> &mut Self {
        assert!(i < self.nrows() && j < self.ncols(), "MatViewMut set: ({i}, {j}) out of range");
        self.mat.set(self.i1 + i, self.j1 + j, v);
        self
    }

    fn update(&mut self, f: impl Fn(usize, usize, S) -> S) -> &mut Self {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                let v = f(i, j, self.get(i, j));
                self.set(i, j, v);
            }
        }
        self
    }

    pub fn fill(&mut self, s: S) -> &mut Self {
        self.update(|_, _, _| s)
    }

    pub fn scale(&mut self, s: S) -> &mut Self {
        self.update(|_, _, x| x * s)
    }

    pub fn negate(&mut self) -> &mut Self {
        self.update(|_, _, x| -x)
    }

    pub fn add_from(&mut self, rhs: MatView<'_, S>) -> &mut Self {
        assert_eq!((self.nrows(), self.ncols()), rhs.shape(), "MatViewMut add: shape mismatch");
        self.update(|i, j, x| x + rhs.get(i, j))
    }

    pub fn sub_from(&mut self, rhs: MatView<'_, S>) -> &mut Self {
        assert_eq!((self.nrows(), self.ncols()), rhs.shape(), "MatViewMut sub: shape mismatch");
        self.update(|i, j, x| x - rhs.get(i, j))
    }

    /// Overwrite the window with `rhs` (same shape).
    pub fn copy_from(&mut self, rhs: MatView<'_, S>) -> &mut Self {
        assert_eq!((self.nrows(), self.ncols()), rhs.shape(), "MatViewMut copy: shape mismatch");
        self.update(|i, j, _| rhs.get(i, j))
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) -> &mut Self {
        assert!(a < self.nrows() && b < self.nrows(), "MatViewMut swap_rows: index out of range");
        if a != b {
            for j in 0..self.ncols() {
                let (va, vb) = (self.get(a, j), self.get(b, j));
                self.set(a, j, vb);
                self.set(b, j, va);
            }
        }
        self
    }

    pub fn swap_cols(&mut self, a: usize, b: usize) -> &mut Self {
        assert!(a < self.ncols() && b < self.ncols(), "MatViewMut swap_cols: index out of range");
        if a != b {
            for i in 0..self.nrows() {
                let (va, vb) = (self.get(i, a), self.get(i, b));
                self.set(i, a, vb);
                self.set(i, b, va);
            }
        }
        self
    }

    /// Rotate row `i` within the window's columns.
    pub fn shift_row(&mut self, i: usize, m: isize) -> &mut Self {
        let mut row = self.as_view().row(i);
        row.shift(m);
        for j in 0..self.ncols() {
            self.set(i, j, row[j]);
        }
        self
    }

    /// Rotate column `j` within the window's rows.
    pub fn shift_col(&mut self, j: usize, m: isize) -> &mut Self {
        let mut col = self.as_view().col(j);
        col.shift(m);
        for i in 0..self.nrows() {
            self.set(i, j, col[i]);
        }
        self
    }
}
