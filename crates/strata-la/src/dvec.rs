use crate::view::{check_range, resolve_index, VecView, VecViewMut};
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use strata::Scalar;

/// Heap-allocated vector of scalars.
///
/// Whole-vector operations act on every element. To act on a sub-range,
/// take a [`VecView`] or [`VecViewMut`] with [`view`](Self::view) /
/// [`view_mut`](Self::view_mut).
#[derive(Clone, Debug)]
pub struct DVec<S> {
    data: Vec<S>,
}

impl<S: Scalar> DVec<S> {
    /// Create from raw data.
    #[inline]
    pub fn from_vec(data: Vec<S>) -> Self {
        Self { data }
    }

    /// Create from a slice.
    pub fn from_slice(s: &[S]) -> Self {
        Self { data: s.to_vec() }
    }

    /// Create from a function.
    pub fn from_fn(n: usize, f: impl Fn(usize) -> S) -> Self {
        Self { data: (0..n).map(f).collect() }
    }

    /// Zero vector of given length.
    pub fn zeros(n: usize) -> Self {
        Self::scalar(S::ZERO, n)
    }

    pub fn ones(n: usize) -> Self {
        Self::scalar(S::ONE, n)
    }

    /// Every element equal to `s`.
    pub fn scalar(s: S, n: usize) -> Self {
        Self { data: alloc::vec![s; n] }
    }

    /// One-hot vector `e_k`.
    pub fn canonical(k: usize, n: usize) -> Self {
        assert!(k < n, "DVec::canonical: index {k} out of range for dimension {n}");
        let mut e = Self::zeros(n);
        e.data[k] = S::ONE;
        e
    }

    /// Sum of a non-empty list of vectors of equal dimension.
    pub fn sum(vectors: &[DVec<S>]) -> Self {
        assert!(!vectors.is_empty(), "DVec::sum: empty list");
        let mut acc = Self::zeros(vectors[0].len());
        for v in vectors {
            acc += v;
        }
        acc
    }

    /// `Σ coeffs[k] · vectors[k]`.
    pub fn linear_combination(coeffs: &[S], vectors: &[DVec<S>]) -> Self {
        assert!(!vectors.is_empty(), "DVec::linear_combination: empty list");
        assert_eq!(
            coeffs.len(),
            vectors.len(),
            "DVec::linear_combination: {} coefficients for {} vectors",
            coeffs.len(),
            vectors.len()
        );
        let mut acc = Self::zeros(vectors[0].len());
        for (&c, v) in coeffs.iter().zip(vectors) {
            acc.axpy(c, v);
        }
        acc
    }

    #[inline]
    pub fn len(&self) -> usize { self.data.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    #[inline]
    pub fn as_slice(&self) -> &[S] { &self.data }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S] { &mut self.data }

    #[inline]
    pub fn into_vec(self) -> Vec<S> { self.data }

    /// Iterator over elements.
    pub fn iter(&self) -> core::slice::Iter<'_, S> {
        self.data.iter()
    }

    /// Element `k`; negative `k` counts from the end (`-1` is the last).
    #[inline]
    pub fn at(&self, k: isize) -> S {
        self.data[resolve_index(self.len(), k)]
    }

    #[inline]
    pub fn at_mut(&mut self, k: isize) -> &mut S {
        let index = resolve_index(self.len(), k);
        &mut self.data[index]
    }

    /// Whole vector as a view.
    #[inline]
    pub fn as_view(&self) -> VecView<'_, S> {
        VecView::new(&self.data)
    }

    #[inline]
    pub fn as_view_mut(&mut self) -> VecViewMut<'_, S> {
        VecViewMut::new(&mut self.data)
    }

    /// Shared view of `k1..=k2`.
    pub fn view(&self, k1: usize, k2: usize) -> VecView<'_, S> {
        check_range(self.len(), k1, k2);
        VecView::new(&self.data[k1..=k2])
    }

    /// Exclusive view of `k1..=k2`.
    pub fn view_mut(&mut self, k1: usize, k2: usize) -> VecViewMut<'_, S> {
        check_range(self.len(), k1, k2);
        VecViewMut::new(&mut self.data[k1..=k2])
    }

    /// Independent copy of `k1..=k2`.
    pub fn sub_vector(&self, k1: usize, k2: usize) -> Self {
        self.view(k1, k2).to_dvec()
    }

    pub fn max(&self) -> S { self.as_view().max() }

    pub fn min(&self) -> S { self.as_view().min() }

    pub fn max_index(&self) -> usize { self.as_view().max_index() }

    pub fn min_index(&self) -> usize { self.as_view().min_index() }

    pub fn max_abs(&self) -> S { self.as_view().max_abs() }

    pub fn min_abs(&self) -> S { self.as_view().min_abs() }

    pub fn max_abs_index(&self) -> usize { self.as_view().max_abs_index() }

    pub fn min_abs_index(&self) -> usize { self.as_view().min_abs_index() }

    /// Dot product.
    pub fn dot(&self, other: &DVec<S>) -> S {
        assert_eq!(self.len(), other.len(), "DVec dot: length mismatch");
        self.as_view().dot(other.as_view())
    }

    /// Euclidean norm.
    pub fn norm(&self) -> S {
        self.as_view().norm()
    }

    /// Squared norm.
    pub fn norm_sq(&self) -> S {
        self.as_view().norm_sq()
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &DVec<S>) -> S {
        self.as_view().distance(other.as_view())
    }

    pub fn is_null(&self) -> bool {
        self.as_view().is_null()
    }

    /// A vector equals a scalar only when both are (epsilon) zero.
    pub fn eq_scalar(&self, s: S) -> bool {
        self.as_view().eq_scalar(s)
    }

    /// Element-wise comparison with an explicit tolerance.
    pub fn approx_eq(&self, other: &DVec<S>, tol: S) -> bool {
        self.as_view().approx_eq(other.as_view(), tol)
    }

    pub fn swap(&mut self, k1: usize, k2: usize) -> &mut Self {
        self.as_view_mut().swap(k1, k2);
        self
    }

    /// Rotate left by `m mod len` (right when `m < 0`).
    pub fn shift(&mut self, m: isize) -> &mut Self {
        self.as_view_mut().shift(m);
        self
    }

    pub fn fill(&mut self, s: S) -> &mut Self {
        self.data.fill(s);
        self
    }

    /// Scale all elements.
    pub fn scale(&mut self, s: S) {
        for x in &mut self.data {
            *x *= s;
        }
    }

    /// Axpy: self += a * x
    pub fn axpy(&mut self, a: S, x: &DVec<S>) {
        assert_eq!(self.len(), x.len(), "DVec axpy: length mismatch");
        for (y, &xi) in self.data.iter_mut().zip(&x.data) {
            *y += a * xi;
        }
    }

    /// Sum of all elements.
    pub fn total(&self) -> S {
        let mut s = S::ZERO;
        for &x in &self.data {
            s += x;
        }
        s
    }
}

impl<S: Scalar> PartialEq for DVec<S> {
    /// Same length and `distance <= EPSILON` (element-wise without a definite norm).
    fn eq(&self, other: &Self) -> bool {
        self.as_view() == other.as_view()
    }
}

impl<S: Scalar> From<Vec<S>> for DVec<S> {
    fn from(data: Vec<S>) -> Self {
        Self::from_vec(data)
    }
}

impl<S: Scalar> From<VecView<'_, S>> for DVec<S> {
    fn from(view: VecView<'_, S>) -> Self {
        view.to_dvec()
    }
}

impl<S: Scalar> fmt::Display for DVec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_view(), f)
    }
}

impl<S: Scalar> Index<usize> for DVec<S> {
    type Output = S;
    #[inline]
    fn index(&self, i: usize) -> &S { &self.data[i] }
}

impl<S: Scalar> IndexMut<usize> for DVec<S> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut S { &mut self.data[i] }
}

impl<S: Scalar> Add for &DVec<S> {
    type Output = DVec<S>;
    fn add(self, rhs: &DVec<S>) -> DVec<S> {
        assert_eq!(self.len(), rhs.len(), "DVec add: length mismatch");
        DVec::from_fn(self.len(), |i| self[i] + rhs[i])
    }
}

impl<S: Scalar> Add<&DVec<S>> for DVec<S> {
    type Output = DVec<S>;
    fn add(mut self, rhs: &DVec<S>) -> DVec<S> {
        self += rhs;
        self
    }
}

impl<S: Scalar> Sub for &DVec<S> {
    type Output = DVec<S>;
    fn sub(self, rhs: &DVec<S>) -> DVec<S> {
        assert_eq!(self.len(), rhs.len(), "DVec sub: length mismatch");
        DVec::from_fn(self.len(), |i| self[i] - rhs[i])
    }
}

impl<S: Scalar> Sub<&DVec<S>> for DVec<S> {
    type Output = DVec<S>;
    fn sub(mut self, rhs: &DVec<S>) -> DVec<S> {
        self -= rhs;
        self
    }
}

impl<S: Scalar> Neg for &DVec<S> {
    type Output = DVec<S>;
    fn neg(self) -> DVec<S> {
        DVec::from_fn(self.len(), |i| -self[i])
    }
}

impl<S: Scalar> Mul<S> for &DVec<S> {
    type Output = DVec<S>;
    fn mul(self, rhs: S) -> DVec<S> {
        DVec::from_fn(self.len(), |i| self[i] * rhs)
    }
}

impl<S: Scalar + Div<Output = S>> Div<S> for &DVec<S> {
    type Output = DVec<S>;
    fn div(self, rhs: S) -> DVec<S> {
        DVec::from_fn(self.len(), |i| self[i] / rhs)
    }
}

impl<S: Scalar> AddAssign<&DVec<S>> for DVec<S> {
    fn add_assign(&mut self, rhs: &DVec<S>) {
        self.as_view_mut().add_from(rhs.as_view());
    }
}

impl<S: Scalar> SubAssign<&DVec<S>> for DVec<S> {
    fn sub_assign(&mut self, rhs: &DVec<S>) {
        self.as_view_mut().sub_from(rhs.as_view());
    }
}

impl<S: Scalar> MulAssign<S> for DVec<S> {
    fn mul_assign(&mut self, rhs: S) {
        self.scale(rhs);
    }
}

impl<S: Scalar + Div<Output = S>> DivAssign<S> for DVec<S> {
    fn div_assign(&mut self, rhs: S) {
        self.as_view_mut().div_scalar(rhs);
    }
}
