//! Shared helpers for strata benchmarks: seeded RNG, input generators.

use strata::{Gf256, Pixel};
use strata_la::{DMat, DVec};

/// xoshiro256** PRNG so every run sees the same inputs.
pub struct Rng {
    s: [u64; 4],
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        // SplitMix64 to expand seed into state
        let mut z = seed;
        let mut s = [0u64; 4];
        for slot in &mut s {
            z = z.wrapping_add(0x9e3779b97f4a7c15);
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
            *slot = z ^ (z >> 31);
        }
        Self { s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
        result
    }

    /// Uniform f64 in [-1, 1]
    pub fn f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64) * 2.0 - 1.0
    }

    pub fn byte(&mut self) -> u8 {
        (self.next_u64() >> 56) as u8
    }
}

pub fn make_rng() -> Rng {
    Rng::new(0x5EED_0F_57_7A7A)
}

/// Row-major random data in [-1, 1].
pub fn random_f64_flat(size: usize) -> Vec<f64> {
    let mut rng = make_rng();
    (0..size).map(|_| rng.f64()).collect()
}

pub fn random_dmat(size: usize) -> DMat<f64> {
    DMat::from_raw(size, size, random_f64_flat(size * size))
}

pub fn random_dvec(size: usize) -> DVec<f64> {
    DVec::from_vec(random_f64_flat(size))
}

/// Random matrix pushed to strict diagonal dominance, so it is invertible.
pub fn random_dominant_dmat(size: usize) -> DMat<f64> {
    let mut m = random_dmat(size);
    for i in 0..size {
        let v = m.get(i, i) + size as f64;
        m.set(i, i, v);
    }
    m
}

pub fn random_gf_dmat(size: usize) -> DMat<Gf256> {
    let mut rng = make_rng();
    let bytes: Vec<Gf256> = (0..size * size).map(|_| Gf256(rng.byte())).collect();
    DMat::from_raw(size, size, bytes)
}

/// Grey image with levels in 0..=255.
pub fn random_grey_image(width: usize, height: usize) -> DMat<Pixel> {
    let mut rng = make_rng();
    let levels: Vec<Pixel> = (0..width * height).map(|_| Pixel::grey(rng.byte() as i32)).collect();
    DMat::from_raw(width, height, levels)
}
