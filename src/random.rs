//! Random sources driving the walk.
//!
//! The walker never uses a global random number generator: it draws from
//! whatever [RandomSource] it is handed, so that a walk can be replayed
//! exactly, or scripted in tests.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed numbers.
pub trait RandomSource {
    /// Return the next number, in `[0, 1)`.
    fn next_f32(&mut self) -> f32;
}

/// A deterministic [RandomSource], seeded from a single integer.
///
/// Two `SeededRandom` created with the same seed yield the same numbers.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a new random source from `seed`.
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}
