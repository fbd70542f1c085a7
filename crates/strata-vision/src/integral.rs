use strata::Scalar;
use strata_la::DMat;

/// Summed-area table of a matrix.
///
/// `sums[x][y]` is the sum of every element at or above-left of `(x, y)`.
/// Rows are the `x` axis and columns the `y` axis, so an image of width `w`
/// and height `h` is a `w x h` matrix.
///
/// Saturating scalars clamp the running sums, so limited pixels should be
/// converted with [`Pixel::unlimited`](strata::Pixel::unlimited) first.
#[derive(Clone, Debug)]
pub struct IntegralImage<S> {
    sums: DMat<S>,
}

impl<S: Scalar> IntegralImage<S> {
    /// Build the table with cumulative row sums, one pass over the image.
    pub fn new(image: &DMat<S>) -> Self {
        let (w, h) = image.shape();
        let mut sums = DMat::zeros(w, h);
        for x in 0..w {
            let mut row = S::ZERO;
            for y in 0..h {
                row += image.get(x, y);
                let above = if x > 0 { sums.get(x - 1, y) } else { S::ZERO };
                sums.set(x, y, above + row);
            }
        }
        Self { sums }
    }

    #[inline]
    pub fn width(&self) -> usize { self.sums.nrows() }

    #[inline]
    pub fn height(&self) -> usize { self.sums.ncols() }

    /// The underlying table.
    #[inline]
    pub fn sums(&self) -> &DMat<S> { &self.sums }

    // Table lookup where a coordinate of -1 reads as zero.
    fn at(&self, x: Option<usize>, y: Option<usize>) -> S {
        match (x, y) {
            (Some(x), Some(y)) => self.sums.get(x, y),
            _ => S::ZERO,
        }
    }

    /// Sum over the inclusive rectangle `(x1, y1) ..= (x2, y2)` in four lookups.
    pub fn rect_sum(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> S {
        assert!(x1 <= x2 && y1 <= y2, "IntegralImage rect_sum: corners ({x1}, {y1}) and ({x2}, {y2}) are inverted");
        assert!(
            x2 < self.width() && y2 < self.height(),
            "IntegralImage rect_sum: ({x2}, {y2}) out of range for {}x{}",
            self.width(),
            self.height()
        );
        let (xa, ya) = (x1.checked_sub(1), y1.checked_sub(1));
        self.at(Some(x2), Some(y2)) - self.at(xa, Some(y2)) - self.at(Some(x2), ya) + self.at(xa, ya)
    }
}
