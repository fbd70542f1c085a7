//! Image-processing consumers of the strata matrix engine.
//!
//! An [`IntegralImage`] answers rectangle sums in constant time, [`Haar`]
//! features combine a few of those sums, and a [`Stump`] thresholds one
//! feature into a weak yes/no classifier.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod integral;
mod haar;
mod stump;

pub use integral::IntegralImage;
pub use haar::{Haar, HaarKind, Intensity};
pub use stump::{Polarity, Stump};
