use crate::{Haar, Intensity, IntegralImage};
use alloc::vec::Vec;
use strata_la::DVec;
use tracing::trace;

/// Which side of the threshold is classified positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Positive when the response exceeds the threshold.
    #[default]
    Above,
    /// Positive when the response is below the threshold.
    Below,
}

/// Decision stump: one Haar feature and a threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stump {
    pub feature: Haar,
    theta: f64,
    polarity: Polarity,
}

impl Stump {
    /// Untrained stump, threshold 0.
    pub fn new(feature: Haar) -> Self {
        Self::with_threshold(feature, 0.0, Polarity::default())
    }

    pub fn with_threshold(feature: Haar, theta: f64, polarity: Polarity) -> Self {
        Self { feature, theta, polarity }
    }

    #[inline]
    pub fn theta(&self) -> f64 { self.theta }

    #[inline]
    pub fn polarity(&self) -> Polarity { self.polarity }

    fn classify(&self, response: f64, polarity: Polarity) -> bool {
        match polarity {
            Polarity::Above => response > self.theta,
            Polarity::Below => response < self.theta,
        }
    }

    pub fn predict<S: Intensity>(&self, img: &IntegralImage<S>) -> bool {
        self.classify(self.feature.response(img), self.polarity)
    }

    /// Fit threshold and polarity to weighted, labelled samples and return
    /// the weighted error of the result.
    ///
    /// The threshold is the midpoint of the weighted mean responses of the
    /// positive and the negative samples. The polarity is whichever gives the
    /// lower weighted error, [`Polarity::Above`] on ties.
    pub fn train<S: Intensity>(&mut self, weights: &DVec<f64>, samples: &[IntegralImage<S>], labels: &[bool]) -> f64 {
        assert!(!samples.is_empty(), "Stump train: no samples");
        assert!(
            weights.len() == samples.len() && labels.len() == samples.len(),
            "Stump train: {} weights and {} labels for {} samples",
            weights.len(),
            labels.len(),
            samples.len()
        );

        let responses: Vec<f64> = samples.iter().map(|s| self.feature.response(s)).collect();

        let (mut sum_p, mut w_p, mut sum_n, mut w_n) = (0.0, 0.0, 0.0, 0.0);
        for ((&r, &w), &label) in responses.iter().zip(weights.iter()).zip(labels) {
            if label {
                sum_p += w * r;
                w_p += w;
            } else {
                sum_n += w * r;
                w_n += w;
            }
        }
        let mean = |sum: f64, w: f64| if w > 0.0 { sum / w } else { 0.0 };
        self.theta = 0.5 * (mean(sum_p, w_p) + mean(sum_n, w_n));

        let error_of = |polarity| {
            let mut error = 0.0;
            for ((&r, &w), &label) in responses.iter().zip(weights.iter()).zip(labels) {
                if self.classify(r, polarity) != label {
                    error += w;
                }
            }
            error
        };
        let (above, below) = (error_of(Polarity::Above), error_of(Polarity::Below));
        let (polarity, error) = if below < above { (Polarity::Below, below) } else { (Polarity::Above, above) };
        self.polarity = polarity;

        trace!(theta = self.theta, ?polarity, error, samples = samples.len(), "stump trained");
        error
    }

    /// Share of samples that are positive but predicted negative.
    pub fn false_negative_rate<S: Intensity>(&self, samples: &[IntegralImage<S>], labels: &[bool]) -> f64 {
        self.rate(samples, labels, |predicted, label| !predicted && label)
    }

    /// Share of samples that are negative but predicted positive.
    pub fn false_positive_rate<S: Intensity>(&self, samples: &[IntegralImage<S>], labels: &[bool]) -> f64 {
        self.rate(samples, labels, |predicted, label| predicted && !label)
    }

    fn rate<S: Intensity>(
        &self,
        samples: &[IntegralImage<S>],
        labels: &[bool],
        counts: impl Fn(bool, bool) -> bool,
    ) -> f64 {
        assert_eq!(samples.len(), labels.len(), "Stump rate: sample and label counts differ");
        if samples.is_empty() {
            return 0.0;
        }
        let hits = samples.iter().zip(labels).filter(|(s, label)| counts(self.predict(*s), **label)).count();
        hits as f64 / samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HaarKind;
    use strata_la::DMat;

    fn sample(bright_top: bool) -> IntegralImage<f64> {
        IntegralImage::new(&DMat::from_fn(4, 4, |x, _| match (bright_top, x < 2) {
            (true, true) => 10.0,
            (true, false) => 0.0,
            (false, _) => 5.0,
        }))
    }

    fn feature() -> Haar {
        Haar::with_size(0, 0, 4, 4, HaarKind::TwoRectW)
    }

    fn data(positive_bright: bool) -> (Vec<IntegralImage<f64>>, Vec<bool>, DVec<f64>) {
        let samples: Vec<_> = (0..6).map(|k| sample(k % 2 == 0)).collect();
        let labels: Vec<_> = (0..6).map(|k| (k % 2 == 0) == positive_bright).collect();
        (samples, labels, DVec::scalar(1.0 / 6.0, 6))
    }

    #[test]
    fn separable_data_trains_to_zero_error() {
        let (samples, labels, w) = data(true);
        let mut stump = Stump::new(feature());
        let err = stump.train(&w, &samples, &labels);
        assert_eq!(err, 0.0);
        assert!((stump.theta() - 40.0).abs() < 1e-9);
        assert_eq!(stump.polarity(), Polarity::Above);
        assert_eq!(stump.false_negative_rate(&samples, &labels), 0.0);
        assert_eq!(stump.false_positive_rate(&samples, &labels), 0.0);
    }

    #[test]
    fn inverted_labels_flip_polarity() {
        let (samples, labels, w) = data(false);
        let mut stump = Stump::new(feature());
        assert_eq!(stump.train(&w, &samples, &labels), 0.0);
        assert_eq!(stump.polarity(), Polarity::Below);
        assert!(stump.predict(&sample(false)));
        assert!(!stump.predict(&sample(true)));
    }

    #[test]
    fn rates_count_over_all_samples() {
        let (samples, labels, _) = data(true);
        // threshold above every response: nothing predicted positive
        let stump = Stump::with_threshold(feature(), 1e6, Polarity::Above);
        assert_eq!(stump.false_negative_rate(&samples, &labels), 0.5);
        assert_eq!(stump.false_positive_rate(&samples, &labels), 0.0);
    }

    #[test]
    fn single_class_uses_zero_mean_for_the_other() {
        let samples = [sample(true), sample(true)];
        let mut stump = Stump::new(feature());
        let err = stump.train(&DVec::scalar(0.5, 2), &samples, &[true, true]);
        assert_eq!(stump.theta(), 40.0);
        assert_eq!(err, 0.0);
    }
}
