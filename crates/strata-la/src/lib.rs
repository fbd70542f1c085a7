//! Dense linear algebra over any [`strata::Scalar`]: DVec, DMat, views, LU.
//!
//! Sub-ranges are explicit borrows ([`VecView`], [`MatView`] and their
//! `Mut` twins) rather than state on the container. A [`DMat`] caches its
//! own LU factorization and drops it whenever it is borrowed mutably.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod error;
mod view;
mod dvec;
mod mat_view;
mod dmat;
mod lu;
mod reduce;
mod band;

pub use error::LinalgError;
pub use view::{VecView, VecViewMut};
pub use dvec::DVec;
pub use mat_view::{MatView, MatViewMut};
pub use dmat::DMat;
pub use lu::Lu;
