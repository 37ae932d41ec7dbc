//! Review ordering policies.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The order rows are visited in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMode {
    /// Table order.
    Sequential,
    /// Every row once, uniformly shuffled.
    RandomFull,
    /// The first `n` rows of a uniform shuffle.
    RandomPartial(usize),
}

impl OrderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::RandomFull => "random_full",
            Self::RandomPartial(_) => "random_partial",
        }
    }

    /// Row indices to present for a table of `len` rows.
    pub fn visit_order<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        match *self {
            Self::Sequential => {}
            Self::RandomFull => indices.shuffle(rng),
            Self::RandomPartial(count) => {
                indices.shuffle(rng);
                indices.truncate(count);
            }
        }
        indices
    }
}
