//! Seedable RNG for spawn variation.
//!
//! ChaCha8 keeps runs reproducible: the same seed and the same input
//! sequence produce the same smoke, which is what the tests lean on.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SpawnRange;

/// Deterministic random source owned by one engine or adapter.
#[derive(Debug, Clone)]
pub struct SmokeRng {
    inner: ChaCha8Rng,
}

impl SmokeRng {
    /// Creates an RNG from a 64-bit seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Derives an independent stream, e.g. one per adapter.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.inner.gen())
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Uniform value in `[range.min, range.max)`.
    #[inline]
    pub fn in_range(&mut self, range: SpawnRange) -> f32 {
        range.lerp(self.unit())
    }

    /// Uniform value in `[-span / 2, span / 2)`.
    #[inline]
    pub fn centered(&mut self, span: f32) -> f32 {
        (self.unit() - 0.5) * span
    }

    /// Uniform index in `[0, len)`. Returns 0 for an empty collection.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.inner.gen_range(0..len)
        }
    }
}
