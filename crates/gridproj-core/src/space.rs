//! State-space collaborators
//!
//! The evaluator only needs three things from a state space: a name for
//! diagnostics, a scratch state, and a uniform sampler. [`RealVectorStateSpace`]
//! is a box-bounded implementation used by the inspector and the tests.

use crate::error::{ProjectionError, ProjectionResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Draws states uniformly from a state space.
pub trait StateSampler<S> {
    /// Overwrite `state` with a uniform random sample.
    fn sample_uniform(&mut self, state: &mut S);
}

/// The pieces of a state space needed to infer projection extents.
///
/// States are released by `Drop`; there is no explicit free.
pub trait StateSpace {
    type State;
    type Sampler: StateSampler<Self::State>;

    /// Human-readable name, used in warnings
    fn name(&self) -> &str;

    fn alloc_state(&self) -> Self::State;

    fn alloc_sampler(&self) -> Self::Sampler;
}

/// Per-dimension lower and upper bounds of a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealVectorBounds {
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl RealVectorBounds {
    /// Same `[low, high]` interval on every axis
    pub fn uniform(dimension: usize, low: f64, high: f64) -> Self {
        Self {
            low: vec![low; dimension],
            high: vec![high; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.low.len()
    }

    /// Bounds must agree in length, be finite with a finite width, and
    /// satisfy `low <= high` per axis.
    pub fn check(&self) -> ProjectionResult<()> {
        if self.low.len() != self.high.len() {
            return Err(ProjectionError::Config(format!(
                "bounds have {} lower and {} upper values",
                self.low.len(),
                self.high.len()
            )));
        }
        for (i, (&lo, &hi)) in self.low.iter().zip(&self.high).enumerate() {
            // gen_range overflows on an infinite width
            if !lo.is_finite() || !hi.is_finite() || !(hi - lo).is_finite() {
                return Err(ProjectionError::Config(format!(
                    "bounds [{}, {}] on axis {} are not a finite interval",
                    lo, hi, i
                )));
            }
            if lo > hi {
                return Err(ProjectionError::Config(format!(
                    "lower bound {} exceeds upper bound {} on axis {}",
                    lo, hi, i
                )));
            }
        }
        Ok(())
    }
}

/// Axis-aligned box of real vectors.
#[derive(Debug, Clone)]
pub struct RealVectorStateSpace {
    name: String,
    bounds: RealVectorBounds,
    seed: Option<u64>,
}

impl RealVectorStateSpace {
    pub fn new(bounds: RealVectorBounds) -> ProjectionResult<Self> {
        bounds.check()?;
        Ok(Self {
            name: format!("RealVectorSpace{}", bounds.dimension()),
            bounds,
            seed: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Seed every sampler allocated from this space. Without a seed samplers
    /// draw from OS entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn bounds(&self) -> &RealVectorBounds {
        &self.bounds
    }

    pub fn dimension(&self) -> usize {
        self.bounds.dimension()
    }
}

impl StateSpace for RealVectorStateSpace {
    type State = Vec<f64>;
    type Sampler = RealVectorSampler;

    fn name(&self) -> &str {
        &self.name
    }

    fn alloc_state(&self) -> Vec<f64> {
        vec![0.0; self.dimension()]
    }

    fn alloc_sampler(&self) -> RealVectorSampler {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RealVectorSampler {
            bounds: self.bounds.clone(),
            rng,
        }
    }
}

/// Uniform sampler over a [`RealVectorBounds`] box.
pub struct RealVectorSampler {
    bounds: RealVectorBounds,
    rng: StdRng,
}

impl StateSampler<Vec<f64>> for RealVectorSampler {
    fn sample_uniform(&mut self, state: &mut Vec<f64>) {
        state.resize(self.bounds.dimension(), 0.0);
        for (i, v) in state.iter_mut().enumerate() {
            let (lo, hi) = (self.bounds.low[i], self.bounds.high[i]);
            // gen_range panics on an empty range
            *v = if lo < hi { self.rng.gen_range(lo..hi) } else { lo };
        }
    }
}
