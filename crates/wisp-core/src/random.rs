//! Seeded random stream shared by the generation pipeline.
//!
//! A single stateful, order-dependent sequence: identical seed and
//! identical call order reproduce identical events. Concurrent access is
//! unsupported; the stream is threaded through the pipeline by `&mut`.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic random stream backed by a seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct RandomStream {
    rng: ChaCha8Rng,
}

impl RandomStream {
    /// Create a stream from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Sample uniformly from `[min, max)`.
    ///
    /// Reversed bounds are swapped rather than rejected.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        (max - min) * self.rng.random::<f64>() + min
    }

    /// Sample from a power-law distribution with index `n` on `[min, max]`.
    ///
    /// Index -1 takes the log-uniform limit of the inversion formula.
    pub fn power_law(&mut self, min: f64, max: f64, n: f64) -> f64 {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        let unif = self.rng.random::<f64>();
        let value = if (n + 1.0).abs() < 1e-12 {
            (min.ln() + (max.ln() - min.ln()) * unif).exp()
        } else {
            let base = (max.powf(n + 1.0) - min.powf(n + 1.0)) * unif + min.powf(n + 1.0);
            base.powf(1.0 / (n + 1.0))
        };
        // powf rounding can land one ulp outside the bounds.
        value.clamp(min, max)
    }

    /// Sample an index uniformly from `0..len`.
    ///
    /// Returns 0 for `len <= 1` so callers can index single-element
    /// collections without a special case.
    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            0
        } else {
            self.rng.random_range(0..len)
        }
    }

    /// Reconfigure the stream with a new seed, restarting the sequence.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}
