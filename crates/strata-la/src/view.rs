use crate::DVec;
use core::fmt;
use core::ops::{AddAssign, Index, IndexMut, MulAssign, SubAssign};
use strata::Scalar;

/// Resolve a window-relative index. Negative indices count from the end,
/// `-1` being the last element.
#[inline]
pub(crate) fn resolve_index(len: usize, k: isize) -> usize {
    let index = if k >= 0 {
        k as usize
    } else {
        let back = k.unsigned_abs();
        assert!(back <= len, "index {k} out of range for window of length {len}");
        len - back
    };
    assert!(index < len, "index {k} out of range for window of length {len}");
    index
}

#[inline]
pub(crate) fn check_range(len: usize, k1: usize, k2: usize) {
    assert!(k1 <= k2, "window start {k1} after end {k2}");
    assert!(k2 < len, "window end {k2} out of range for length {len}");
}

/// Shared view of the inclusive window `k1..=k2` of a vector.
///
/// Reading operations live here; taking a view never mutates the owner, and
/// the window disappears with the view.
#[derive(Clone, Copy)]
pub struct VecView<'a, S> {
    data: &'a [S],
}

/// Exclusive view of the inclusive window `k1..=k2` of a vector.
///
/// Mutating methods return `&mut Self` so calls chain:
/// `v.view_mut(1, 3).fill(2.0).shift(1);`
pub struct VecViewMut<'a, S> {
    data: &'a mut [S],
}

impl<'a, S: Scalar> VecView<'a, S> {
    #[inline]
    pub(crate) fn new(data: &'a [S]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize { self.data.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    #[inline]
    pub fn as_slice(&self) -> &'a [S] { self.data }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'a, S> { self.data.iter() }

    /// Element `k` of the window; negative `k` counts from the end.
    #[inline]
    pub fn at(&self, k: isize) -> S {
        self.data[resolve_index(self.len(), k)]
    }

    /// Narrow this window further (indices relative to this window).
    pub fn view(&self, k1: usize, k2: usize) -> VecView<'a, S> {
        check_range(self.len(), k1, k2);
        VecView::new(&self.data[k1..=k2])
    }

    /// Copy the viewed elements into an independent vector.
    pub fn to_dvec(&self) -> DVec<S> {
        DVec::from_slice(self.data)
    }

    fn first(&self) -> S {
        assert!(!self.is_empty(), "reduction over an empty window");
        self.data[0]
    }

    /// Largest element (first occurrence wins).
    pub fn max(&self) -> S {
        self.data[self.max_index()]
    }

    /// Smallest element (first occurrence wins).
    pub fn min(&self) -> S {
        self.data[self.min_index()]
    }

    pub fn max_index(&self) -> usize {
        let mut best = self.first();
        let mut idx = 0;
        for (k, &x) in self.data.iter().enumerate().skip(1) {
            if x > best {
                best = x;
                idx = k;
            }
        }
        idx
    }

    pub fn min_index(&self) -> usize {
        let mut best = self.first();
        let mut idx = 0;
        for (k, &x) in self.data.iter().enumerate().skip(1) {
            if x < best {
                best = x;
                idx = k;
            }
        }
        idx
    }

    /// Largest magnitude. Compares only the signed extremes, so on a tie the
    /// signed maximum is the one reported.
    pub fn max_abs(&self) -> S {
        self.data[self.max_abs_index()].abs()
    }

    /// Smallest magnitude among the signed extremes; on a tie the signed
    /// minimum is reported.
    pub fn min_abs(&self) -> S {
        self.data[self.min_abs_index()].abs()
    }

    pub fn max_abs_index(&self) -> usize {
        let (lo, hi) = (self.min_index(), self.max_index());
        if self.data[lo].abs() > self.data[hi].abs() { lo } else { hi }
    }

    pub fn min_abs_index(&self) -> usize {
        let (lo, hi) = (self.min_index(), self.max_index());
        if self.data[lo].abs() <= self.data[hi].abs() { lo } else { hi }
    }

    /// Dot product.
    pub fn dot(&self, other: VecView<'_, S>) -> S {
        assert_eq!(self.len(), other.len(), "VecView dot: length mismatch");
        let mut sum = S::ZERO;
        for (&a, &b) in self.data.iter().zip(other.data) {
            sum += a * b;
        }
        sum
    }

    /// Squared norm.
    pub fn norm_sq(&self) -> S {
        self.dot(*self)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> S {
        self.norm_sq().sqrt()
    }

    /// `norm(self - other)`.
    pub fn distance(&self, other: VecView<'_, S>) -> S {
        assert_eq!(self.len(), other.len(), "VecView distance: length mismatch");
        let mut sum = S::ZERO;
        for (&a, &b) in self.data.iter().zip(other.data) {
            let d = a - b;
            sum += d * d;
        }
        sum.sqrt()
    }

    /// Norm within epsilon of zero, or every element negligible when the
    /// scalar's norm is not definite.
    pub fn is_null(&self) -> bool {
        if S::DEFINITE_NORM {
            self.norm().is_negligible()
        } else {
            self.data.iter().all(|&x| x.is_negligible())
        }
    }

    /// A vector equals a scalar only when both are (epsilon) zero.
    pub fn eq_scalar(&self, s: S) -> bool {
        s.is_negligible() && self.is_null()
    }

    /// Element-wise comparison with an explicit tolerance.
    pub fn approx_eq(&self, other: VecView<'_, S>, tol: S) -> bool {
        self.len() == other.len()
            && self.data.iter().zip(other.data).all(|(&a, &b)| (a - b).abs() <= tol)
    }
}

impl<S: Scalar> PartialEq for VecView<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if S::DEFINITE_NORM {
            self.distance(*other) <= S::EPSILON
        } else {
            self.approx_eq(*other, S::EPSILON)
        }
    }
}

impl<S: Scalar> Index<usize> for VecView<'_, S> {
    type Output = S;
    #[inline]
    fn index(&self, k: usize) -> &S { &self.data[k] }
}

impl<S: Scalar> fmt::Debug for VecView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<S: Scalar> fmt::Display for VecView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for &x in self.data {
            if x >= S::ZERO {
                write!(f, " {}", x)?;
            } else {
                write!(f, "-{}", x.abs())?;
            }
        }
        f.write_str(" )")
    }
}

impl<'a, S: Scalar> VecViewMut<'a, S> {
    #[inline]
    pub(crate) fn new(data: &'a mut [S]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize { self.data.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    #[inline]
    pub fn as_view(&self) -> VecView<'_, S> { VecView::new(self.data) }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S] { self.data }

    #[inline]
    pub fn at(&self, k: isize) -> S {
        self.data[resolve_index(self.len(), k)]
    }

    #[inline]
    pub fn at_mut(&mut self, k: isize) -> &mut S {
        let index = resolve_index(self.len(), k);
        &mut self.data[index]
    }

    /// Overwrite every element of the window with `s`.
    pub fn fill(&mut self, s: S) -> &mut Self {
        self.data.fill(s);
        self
    }

    /// Exchange two window-relative elements.
    pub fn swap(&mut self, k1: usize, k2: usize) -> &mut Self {
        assert!(k1 < self.len() && k2 < self.len(), "VecViewMut swap: index out of range");
        self.data.swap(k1, k2);
        self
    }

    /// Rotate left by `m mod len` when `m >= 0`, right by `|m| mod len` otherwise.
    pub fn shift(&mut self, m: isize) -> &mut Self {
        let len = self.len();
        assert!(len > 0, "VecViewMut shift: empty window");
        let r = m.unsigned_abs() % len;
        if m >= 0 {
            self.data.rotate_left(r);
        } else {
            self.data.rotate_right(r);
        }
        self
    }

    pub fn add_from(&mut self, rhs: VecView<'_, S>) -> &mut Self {
        assert_eq!(self.len(), rhs.len(), "VecViewMut add: length mismatch");
        for (x, &y) in self.data.iter_mut().zip(rhs.as_slice()) {
            *x += y;
        }
        self
    }

    pub fn sub_from(&mut self, rhs: VecView<'_, S>) -> &mut Self {
        assert_eq!(self.len(), rhs.len(), "VecViewMut sub: length mismatch");
        for (x, &y) in self.data.iter_mut().zip(rhs.as_slice()) {
            *x -= y;
        }
        self
    }

    /// Copy `rhs` into the window (lengths must match).
    pub fn copy_from(&mut self, rhs: VecView<'_, S>) -> &mut Self {
        assert_eq!(self.len(), rhs.len(), "VecViewMut copy: length mismatch");
        self.data.copy_from_slice(rhs.as_slice());
        self
    }

    pub fn scale(&mut self, s: S) -> &mut Self {
        for x in self.data.iter_mut() {
            *x *= s;
        }
        self
    }

    pub fn negate(&mut self) -> &mut Self {
        for x in self.data.iter_mut() {
            *x = -*x;
        }
        self
    }

    pub fn div_scalar(&mut self, s: S) -> &mut Self
    where
        S: core::ops::Div<Output = S>,
    {
        for x in self.data.iter_mut() {
            *x = *x / s;
        }
        self
    }

    pub fn map_in_place(&mut self, f: impl Fn(S) -> S) -> &mut Self {
        for x in self.data.iter_mut() {
            *x = f(*x);
        }
        self
    }
}

impl<S: Scalar> Index<usize> for VecViewMut<'_, S> {
    type Output = S;
    #[inline]
    fn index(&self, k: usize) -> &S { &self.data[k] }
}

impl<S: Scalar> IndexMut<usize> for VecViewMut<'_, S> {
    #[inline]
    fn index_mut(&mut self, k: usize) -> &mut S { &mut self.data[k] }
}

impl<S: Scalar> AddAssign<VecView<'_, S>> for VecViewMut<'_, S> {
    fn add_assign(&mut self, rhs: VecView<'_, S>) {
        self.add_from(rhs);
    }
}

impl<S: Scalar> SubAssign<VecView<'_, S>> for VecViewMut<'_, S> {
    fn sub_assign(&mut self, rhs: VecView<'_, S>) {
        self.sub_from(rhs);
    }
}

impl<S: Scalar> MulAssign<S> for VecViewMut<'_, S> {
    fn mul_assign(&mut self, rhs: S) {
        self.scale(rhs);
    }
}
