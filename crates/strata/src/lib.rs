//! strata: scalar contract for the dense linear-algebra engine
//!
//! Every element type the vector and matrix engines accept implements
//! [`Scalar`]: ring arithmetic, ordering, `abs`, `sqrt` and an epsilon used
//! for every "is it zero" test. Types that can divide also implement
//! [`Field`], which unlocks LU-based algebra in `strata-la`.
//!
//! Provided scalars:
//! - `f32`, `f64`: [`Scalar`] + [`Field`], epsilon = machine epsilon
//! - [`Gf256`]: AES bytes in GF(2⁸), [`Scalar`] only, epsilon = 0
//! - [`Pixel`]: grey/RGB samples with optional saturation, [`Scalar`] +
//!   `Div`, epsilon = black

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod scalar;
mod gf256;
mod pixel;

pub use scalar::{Field, Scalar};
pub use gf256::Gf256;
pub use pixel::{Format, Pixel, MAX_COMPONENT};
