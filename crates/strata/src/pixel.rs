use crate::scalar::float_ops;
use crate::Scalar;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Upper bound of a component when the pixel is limited.
pub const MAX_COMPONENT: i32 = 255;

/// Colour layout of a [`Pixel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Single grey level, replicated in the three stored components.
    Grey,
    Rgb,
}

/// A colour sample usable as a matrix element.
///
/// Components are stored as `i32` so that sums over large windows (integral
/// images) do not overflow. A *limited* pixel saturates every component to
/// `0..=255` after each operation; the result of a binary operation is
/// limited if either operand is, and RGB if either operand is.
///
/// Ordering compares the grey level first, then the raw components, so it
/// stays consistent with equality.
#[derive(Clone, Copy, Debug)]
pub struct Pixel {
    red: i32,
    green: i32,
    blue: i32,
    format: Format,
    limited: bool,
}

impl Pixel {
    pub const fn grey(level: i32) -> Self {
        Self { red: level, green: level, blue: level, format: Format::Grey, limited: false }
    }

    pub const fn rgb(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue, format: Format::Rgb, limited: false }
    }

    /// Same pixel with saturation switched on (components clamped now).
    pub fn limited(mut self) -> Self {
        self.limited = true;
        self.saturate();
        self
    }

    /// Same pixel with saturation switched off. Components are kept as is.
    pub fn unlimited(mut self) -> Self {
        self.limited = false;
        self
    }

    #[inline]
    pub fn red(&self) -> i32 { self.red }

    #[inline]
    pub fn green(&self) -> i32 { self.green }

    #[inline]
    pub fn blue(&self) -> i32 { self.blue }

    #[inline]
    pub fn format(&self) -> Format { self.format }

    #[inline]
    pub fn is_limited(&self) -> bool { self.limited }

    /// Grey level: the stored level for grey pixels, the component mean for RGB.
    pub fn grey_level(&self) -> i32 {
        match self.format {
            Format::Grey => self.red,
            Format::Rgb => (self.red + self.green + self.blue) / 3,
        }
    }

    pub fn set_grey(&mut self, level: i32) -> &mut Self {
        self.red = level;
        self.green = level;
        self.blue = level;
        self.format = Format::Grey;
        self.saturate();
        self
    }

    pub fn set_rgb(&mut self, red: i32, green: i32, blue: i32) -> &mut Self {
        self.red = red;
        self.green = green;
        self.blue = blue;
        self.format = Format::Rgb;
        self.saturate();
        self
    }

    /// Grey pixel with the same grey level.
    pub fn to_grey(self) -> Self {
        let mut p = self;
        p.set_grey(self.grey_level());
        p
    }

    /// RGB pixel with the same components.
    pub fn to_rgb(self) -> Self {
        Self { format: Format::Rgb, ..self }
    }

    fn saturate(&mut self) {
        if self.limited {
            self.red = self.red.clamp(0, MAX_COMPONENT);
            self.green = self.green.clamp(0, MAX_COMPONENT);
            self.blue = self.blue.clamp(0, MAX_COMPONENT);
        }
    }

    fn zip_with(self, rhs: Self, f: impl Fn(i32, i32) -> i32) -> Self {
        let format = if self.format == Format::Rgb || rhs.format == Format::Rgb {
            Format::Rgb
        } else {
            Format::Grey
        };
        let mut p = Self {
            red: f(self.red, rhs.red),
            green: f(self.green, rhs.green),
            blue: f(self.blue, rhs.blue),
            format,
            limited: self.limited || rhs.limited,
        };
        p.saturate();
        p
    }

    fn map(self, f: impl Fn(i32) -> i32) -> Self {
        let mut p = Self {
            red: f(self.red),
            green: f(self.green),
            blue: f(self.blue),
            ..self
        };
        p.saturate();
        p
    }

    fn key(&self) -> (i32, i32, i32, i32) {
        (self.grey_level(), self.red, self.green, self.blue)
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::grey(0)
    }
}

impl From<i32> for Pixel {
    fn from(level: i32) -> Self {
        Self::grey(level)
    }
}

impl PartialEq for Pixel {
    fn eq(&self, other: &Self) -> bool {
        self.red == other.red && self.green == other.green && self.blue == other.blue
    }
}

impl PartialOrd for Pixel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.key().cmp(&other.key()))
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.format {
            Format::Grey => write!(f, "{}", self.red),
            Format::Rgb => write!(f, "RGB : ({}, {}, {})", self.red, self.green, self.blue),
        }
    }
}

impl Add for Pixel {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, i32::saturating_add)
    }
}

impl Sub for Pixel {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, i32::saturating_sub)
    }
}

impl Mul for Pixel {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.zip_with(rhs, i32::saturating_mul)
    }
}

/// Component-wise integer division; a zero divisor component yields 0.
impl Div for Pixel {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a.checked_div(b).unwrap_or(0))
    }
}

impl Neg for Pixel {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(i32::saturating_neg)
    }
}

impl AddAssign for Pixel {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Pixel {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Pixel {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Pixel {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Scalar for Pixel {
    const ZERO: Self = Pixel::grey(0);
    const ONE: Self = Pixel::grey(1);
    const EPSILON: Self = Pixel::grey(0);

    #[inline]
    fn abs(self) -> Self {
        self.map(i32::saturating_abs)
    }

    /// Component-wise floor of the square root; negative components map to 0.
    fn sqrt(self) -> Self {
        self.map(|c| float_ops::floor_f64(float_ops::sqrt_f64(c.max(0) as f64)) as i32)
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        Self::grey(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grey_arithmetic_is_integer() {
        let a = Pixel::grey(10);
        let b = Pixel::grey(4);
        assert_eq!(a + b, Pixel::grey(14));
        assert_eq!(a - b, Pixel::grey(6));
        assert_eq!(a * b, Pixel::grey(40));
        assert_eq!(a / b, Pixel::grey(2));
        assert_eq!((a + b).format(), Format::Grey);
    }

    #[test]
    fn limited_pixels_saturate() {
        let a = Pixel::grey(200).limited();
        assert_eq!(a + Pixel::grey(100), Pixel::grey(255));
        assert_eq!(Pixel::grey(10) - a, Pixel::grey(0));
        assert_eq!((-a).grey_level(), 0);
        assert_eq!(Pixel::rgb(300, -5, 12).limited(), Pixel::rgb(255, 0, 12));
    }

    #[test]
    fn rgb_wins_format() {
        let p = Pixel::grey(1) + Pixel::rgb(1, 2, 3);
        assert_eq!(p.format(), Format::Rgb);
        assert_eq!(p, Pixel::rgb(2, 3, 4));
        assert_eq!(p.grey_level(), 3);
    }

    #[test]
    fn ordering_by_grey_level() {
        assert!(Pixel::grey(3) > Pixel::grey(2));
        assert!(Pixel::rgb(9, 9, 9) > Pixel::grey(8));
        assert_eq!(Scalar::max(Pixel::grey(-4), Pixel::grey(1)), Pixel::grey(1));
    }

    #[test]
    fn epsilon_only_admits_black() {
        assert!(Pixel::grey(0).is_negligible());
        assert!(Pixel::rgb(0, 0, 0).is_negligible());
        assert!(!Pixel::rgb(1, 1, 0).is_negligible());
        assert!(!Pixel::grey(-1).is_negligible());
    }

    #[test]
    fn sqrt_and_abs() {
        assert_eq!(Pixel::grey(17).sqrt(), Pixel::grey(4));
        assert_eq!(Pixel::rgb(-3, 4, -5).abs(), Pixel::rgb(3, 4, 5));
        assert_eq!(Pixel::grey(-9).sqrt(), Pixel::grey(0));
    }

    #[test]
    fn divide_by_zero_component() {
        assert_eq!(Pixel::rgb(4, 6, 8) / Pixel::rgb(2, 0, 4), Pixel::rgb(2, 0, 2));
    }

    #[test]
    fn display_by_format() {
        assert_eq!(alloc::format!("{}", Pixel::grey(7)), "7");
        assert_eq!(alloc::format!("{}", Pixel::rgb(1, 2, 3)), "RGB : (1, 2, 3)");
    }
}
