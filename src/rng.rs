//! Seeded random fill.
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;

use crate::math::Mat;

/// The random source behind `randu`/`randn`.
///
/// Each instance carries its own state, so two generators built from the same
/// seed produce the same values.
#[derive(Debug, Clone)]
pub struct MatRng {
    rng: StdRng,
    normal: Normal,
}

impl MatRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            normal: Normal::standard(),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            normal: Normal::standard(),
        }
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        log::debug!("reseeding generator with {}", seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// An `n_rows x n_cols` matrix drawn uniformly from [0, 1).
    pub fn randu(&mut self, n_rows: usize, n_cols: usize) -> Mat {
        let mut mat = Mat::zeros(n_rows, n_cols);
        self.fill_randu(&mut mat);
        mat
    }

    /// An `n_rows x n_cols` matrix drawn from the standard normal distribution.
    pub fn randn(&mut self, n_rows: usize, n_cols: usize) -> Mat {
        let mut mat = Mat::zeros(n_rows, n_cols);
        self.fill_randn(&mut mat);
        mat
    }

    pub fn fill_randu(&mut self, mat: &mut Mat) {
        for value in mat.as_mut_slice() {
            *value = self.rng.gen::<f64>();
        }
    }

    pub fn fill_randn(&mut self, mat: &mut Mat) {
        for value in mat.as_mut_slice() {
            *value = self.normal.sample(&mut self.rng);
        }
    }
}
