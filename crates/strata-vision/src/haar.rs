use crate::IntegralImage;
use strata::{Pixel, Scalar};

/// Scalars whose magnitude can be read as a real-valued feature response.
pub trait Intensity: Scalar {
    fn intensity(self) -> f64;
}

impl Intensity for f64 {
    #[inline]
    fn intensity(self) -> f64 { self }
}

impl Intensity for f32 {
    #[inline]
    fn intensity(self) -> f64 { self as f64 }
}

impl Intensity for Pixel {
    /// Grey level of the pixel.
    #[inline]
    fn intensity(self) -> f64 { self.grey_level() as f64 }
}

/// Rectangle layout of a Haar-like feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HaarKind {
    /// First half along `x` minus second half.
    TwoRectW,
    /// Second half along `y` minus first half.
    TwoRectH,
    /// Outer thirds along `x` minus the middle third.
    ThreeRect,
    /// Diagonal quadrants minus anti-diagonal quadrants.
    FourRect,
}

/// Haar-like feature anchored at `(x, y)` covering `w x h` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Haar {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
    pub kind: HaarKind,
}

impl Haar {
    /// Side of the detection window the features were designed for.
    pub const DEFAULT_SIZE: usize = 24;

    pub fn new(x: usize, y: usize, kind: HaarKind) -> Self {
        Self::with_size(x, y, Self::DEFAULT_SIZE, Self::DEFAULT_SIZE, kind)
    }

    pub fn with_size(x: usize, y: usize, w: usize, h: usize, kind: HaarKind) -> Self {
        let (min_w, min_h) = match kind {
            HaarKind::TwoRectW => (2, 1),
            HaarKind::TwoRectH => (1, 2),
            HaarKind::ThreeRect => (3, 1),
            HaarKind::FourRect => (2, 2),
        };
        assert!(w >= min_w && h >= min_h, "Haar: {w}x{h} too small for {kind:?}");
        Self { x, y, w, h, kind }
    }

    /// Feature response on an integral image.
    pub fn eval<S: Scalar>(&self, img: &IntegralImage<S>) -> S {
        let Self { x, y, w, h, .. } = *self;
        assert!(
            x + w <= img.width() && y + h <= img.height(),
            "Haar eval: {w}x{h} at ({x}, {y}) exceeds {}x{} image",
            img.width(),
            img.height()
        );
        let (x2, y2) = (x + w - 1, y + h - 1);
        match self.kind {
            HaarKind::TwoRectW => {
                let mid = x + w / 2;
                img.rect_sum(x, y, mid - 1, y2) - img.rect_sum(mid, y, x2, y2)
            }
            HaarKind::TwoRectH => {
                let mid = y + h / 2;
                img.rect_sum(x, mid, x2, y2) - img.rect_sum(x, y, x2, mid - 1)
            }
            HaarKind::ThreeRect => {
                let (a, b) = (x + w / 3, x + 2 * w / 3);
                img.rect_sum(x, y, a - 1, y2) - img.rect_sum(a, y, b - 1, y2) + img.rect_sum(b, y, x2, y2)
            }
            HaarKind::FourRect => {
                let (mx, my) = (x + w / 2, y + h / 2);
                img.rect_sum(x, y, mx - 1, my - 1) - img.rect_sum(mx, y, x2, my - 1)
                    - img.rect_sum(x, my, mx - 1, y2)
                    + img.rect_sum(mx, my, x2, y2)
            }
        }
    }

    /// [`eval`](Self::eval) read as a real number.
    pub fn response<S: Intensity>(&self, img: &IntegralImage<S>) -> f64 {
        self.eval(img).intensity()
    }
}
