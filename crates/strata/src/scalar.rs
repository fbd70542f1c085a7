use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Element type contract for the vector and matrix engines.
///
/// Implemented for f32, f64, [`Gf256`](crate::Gf256) and [`Pixel`](crate::Pixel).
/// Only ring operations are required here; types with a usable division
/// additionally implement [`Field`].
pub trait Scalar:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    /// Largest magnitude still treated as zero.
    const EPSILON: Self;
    /// Whether a sum of squares vanishes only when every term does. False in
    /// characteristic 2, where norms cannot decide equality.
    const DEFINITE_NORM: bool = true;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn from_i32(v: i32) -> Self;

    /// `|self| <= EPSILON`.
    #[inline]
    fn is_negligible(self) -> bool {
        self.abs() <= Self::EPSILON
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }
}

/// Scalars with a true multiplicative inverse.
///
/// Required by everything that pivots and divides: LU, determinant, inverse,
/// solve, Gauss-Jordan, negative matrix powers.
pub trait Field: Scalar + Div<Output = Self> + DivAssign {
    #[inline]
    fn recip(self) -> Self {
        Self::ONE / self
    }
}

// In std mode, use inherent float methods. In no_std, use libm.
#[cfg(feature = "std")]
pub(crate) mod float_ops {
    #[inline(always)]
    pub fn sqrt_f32(x: f32) -> f32 {
        x.sqrt()
    }
    #[inline(always)]
    pub fn sqrt_f64(x: f64) -> f64 {
        x.sqrt()
    }
    #[inline(always)]
    pub fn abs_f32(x: f32) -> f32 {
        x.abs()
    }
    #[inline(always)]
    pub fn abs_f64(x: f64) -> f64 {
        x.abs()
    }
    #[inline(always)]
    pub fn floor_f64(x: f64) -> f64 {
        x.floor()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) mod float_ops {
    #[inline(always)]
    pub fn sqrt_f32(x: f32) -> f32 {
        libm::sqrtf(x)
    }
    #[inline(always)]
    pub fn sqrt_f64(x: f64) -> f64 {
        libm::sqrt(x)
    }
    #[inline(always)]
    pub fn abs_f32(x: f32) -> f32 {
        libm::fabsf(x)
    }
    #[inline(always)]
    pub fn abs_f64(x: f64) -> f64 {
        libm::fabs(x)
    }
    #[inline(always)]
    pub fn floor_f64(x: f64) -> f64 {
        libm::floor(x)
    }
}

macro_rules! impl_scalar_float {
    ($t:ty, $suffix:ident, $eps:expr) => {
        ::paste::paste! {
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const EPSILON: Self = $eps;

            #[inline] fn abs(self) -> Self { float_ops::[<abs_ $suffix>](self) }
            #[inline] fn sqrt(self) -> Self { float_ops::[<sqrt_ $suffix>](self) }
            #[inline] fn from_i32(v: i32) -> Self { v as $t }
        }

        impl Field for $t {}
        }
    };
}

impl_scalar_float!(f32, f32, f32::EPSILON);
impl_scalar_float!(f64, f64, f64::EPSILON);
