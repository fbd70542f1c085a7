use crate::Scalar;
use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// AES reduction polynomial x⁸ + x⁴ + x³ + x + 1 without the x⁸ term.
const REDUCTION: u8 = 0x1b;

/// A byte of the AES state seen as an element of GF(2⁸).
///
/// Addition is XOR (so subtraction and negation are the same operation) and
/// multiplication is polynomial multiplication modulo the AES polynomial,
/// as in FIPS-197 §4.
///
/// `Gf256` is a [`Scalar`] but deliberately not a [`Field`](crate::Field):
/// matrices over it support sums, products and powers, not LU-based algebra.
/// Ordering compares the raw byte value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Gf256(pub u8);

impl Gf256 {
    #[inline]
    pub const fn new(v: u8) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Multiply by x (the `xtime` of FIPS-197).
    #[inline]
    pub const fn xtime(self) -> Self {
        let shifted = self.0 << 1;
        if self.0 & 0x80 != 0 {
            Self(shifted ^ REDUCTION)
        } else {
            Self(shifted)
        }
    }

    /// Square root in GF(2⁸): squaring is a field automorphism of order 8,
    /// so √a = a^(2⁷).
    pub fn field_sqrt(self) -> Self {
        let mut r = self;
        for _ in 0..7 {
            r = r * r;
        }
        r
    }
}

impl From<u8> for Gf256 {
    #[inline]
    fn from(v: u8) -> Self {
        Self(v)
    }
}

impl From<Gf256> for u8 {
    #[inline]
    fn from(b: Gf256) -> u8 {
        b.0
    }
}

impl fmt::Display for Gf256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

impl Add for Gf256 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Sub for Gf256 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Neg for Gf256 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Mul for Gf256 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // shift-and-add over the bits of `self`
        let mut a = self.0;
        let mut b = rhs;
        let mut acc = 0u8;
        while a != 0 {
            if a & 0x01 != 0 {
                acc ^= b.0;
            }
            b = b.xtime();
            a >>= 1;
        }
        Self(acc)
    }
}

impl AddAssign for Gf256 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl SubAssign for Gf256 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl MulAssign for Gf256 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Scalar for Gf256 {
    const ZERO: Self = Gf256(0x00);
    const ONE: Self = Gf256(0x01);
    const EPSILON: Self = Gf256(0x00);
    const DEFINITE_NORM: bool = false;

    #[inline]
    fn abs(self) -> Self {
        self
    }

    #[inline]
    fn sqrt(self) -> Self {
        self.field_sqrt()
    }

    /// Keeps the low byte, like a `char` conversion.
    #[inline]
    fn from_i32(v: i32) -> Self {
        Self(v as u8)
    }
}
