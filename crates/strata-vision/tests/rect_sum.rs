//! Rectangle sums against brute force, and an end-to-end stump fit.

use proptest::prelude::*;
use strata::Pixel;
use strata_la::{DMat, DVec};
use strata_vision::{Haar, HaarKind, IntegralImage, Polarity, Stump};

#[test]
fn ten_by_ten_ones() {
    let img = IntegralImage::new(&DMat::<f64>::ones(10, 10));
    assert_eq!(img.rect_sum(0, 0, 1, 1), 4.0);
}

#[test]
fn pixel_image_pipeline() {
    // bright band in the first rows of the positive images
    let make = |bright: bool| {
        let m = DMat::from_fn(24, 24, |x, _| Pixel::grey(if bright && x < 12 { 200 } else { 50 }));
        IntegralImage::new(&m)
    };
    let samples: Vec<_> = [true, true, false, false, true, false].iter().map(|&b| make(b)).collect();
    let labels = [true, true, false, false, true, false];

    let mut stump = Stump::new(Haar::new(0, 0, HaarKind::TwoRectW));
    let err = stump.train(&DVec::scalar(1.0 / 6.0, 6), &samples, &labels);
    assert_eq!(err, 0.0);
    assert_eq!(stump.polarity(), Polarity::Above);
    assert_eq!(stump.false_negative_rate(&samples, &labels), 0.0);
}

fn brute(m: &DMat<f64>, x1: usize, y1: usize, x2: usize, y2: usize) -> f64 {
    let mut s = 0.0;
    for x in x1..=x2 {
        for y in y1..=y2 {
            s += m.get(x, y);
        }
    }
    s
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn rect_sum_matches_brute_force(
        (m, x1, x2, y1, y2) in (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
            (
                proptest::collection::vec(-50i32..50, w * h)
                    .prop_map(move |d| DMat::from_raw(w, h, d.into_iter().map(f64::from).collect())),
                0..w,
                0..w,
                0..h,
                0..h,
            )
        })
    ) {
        let (x1, x2) = (x1.min(x2), x1.max(x2));
        let (y1, y2) = (y1.min(y2), y1.max(y2));
        let img = IntegralImage::new(&m);
        prop_assert_eq!(img.rect_sum(x1, y1, x2, y2), brute(&m, x1, y1, x2, y2));
    }
}
