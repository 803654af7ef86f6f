use serde::{Deserialize, Serialize};

use crate::rng::MatRng;

/// Settings shared by the random generator and the text writer.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MatConfig {
    /// Seed for [`MatRng`]. `None` seeds from system entropy.
    pub seed: Option<u64>,
    pub text: TextFormat,
}

impl MatConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Build the generator described by this configuration.
    pub fn rng(&self) -> MatRng {
        match self.seed {
            Some(seed) => MatRng::seeded(seed),
            None => MatRng::from_entropy(),
        }
    }
}

/// Layout of saved values: each one right-justified in `width` columns with
/// `precision` digits after the decimal point.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TextFormat {
    pub width: usize,
    pub precision: usize,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            width: 30,
            precision: 16,
        }
    }
}
