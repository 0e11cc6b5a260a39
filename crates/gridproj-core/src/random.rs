//! Random deviate capability used to build projections.

use rand::Rng;
use rand_distr::StandardNormal;

/// Source of standard normal deviates.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng` gives
/// reproducible projections and `rand::thread_rng()` gives fresh ones.
pub trait GaussianSource {
    /// Draw one sample from N(0, 1).
    fn gaussian01(&mut self) -> f64;
}

impl<R: Rng + ?Sized> GaussianSource for R {
    fn gaussian01(&mut self) -> f64 {
        self.sample(StandardNormal)
    }
}
