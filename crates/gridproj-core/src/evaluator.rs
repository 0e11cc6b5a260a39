//! ProjectionEvaluator - projector plus grid-cell sizing
//!
//! Lifecycle:
//!
//! 1. Build with a state space and a [`Projector`]
//! 2. Optionally [`set_cell_dimensions`](ProjectionEvaluator::set_cell_dimensions)
//! 3. [`setup`](ProjectionEvaluator::setup) once; cell sizes are inferred from
//!    sampled extents if none were given
//! 4. Call [`project`](ProjectionEvaluator::project) and
//!    [`compute_coordinates`](ProjectionEvaluator::compute_coordinates) freely
//!
//! Evaluation calls are unchecked. Calling them before `setup` is a logic
//! error and may panic on a short cell vector.

use crate::error::{ProjectionError, ProjectionResult};
use crate::projection::{EuclideanProjection, ProjectionCoordinates, Projector};
use crate::space::{StateSampler, StateSpace};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, warn};

/// Parameters of cell-size inference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Uniform samples drawn to estimate projected extents (default: 1000)
    pub extent_samples: usize,
    /// Cells per projected axis across the observed extent (default: 2.0)
    pub dimension_splits: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            extent_samples: 1000,
            dimension_splits: 2.0,
        }
    }
}

impl InferenceConfig {
    /// `dimension_splits` must be a finite positive number.
    pub fn check(&self) -> ProjectionResult<()> {
        if !(self.dimension_splits > 0.0 && self.dimension_splits.is_finite()) {
            return Err(ProjectionError::Config(format!(
                "dimension_splits must be positive and finite, got {}",
                self.dimension_splits
            )));
        }
        Ok(())
    }
}

/// Discretizes states of `Sp` into grid cells through projector `P`.
pub struct ProjectionEvaluator<Sp, P> {
    space: Arc<Sp>,
    projector: P,
    cell_dimensions: Vec<f64>,
    config: InferenceConfig,
}

impl<Sp, P> ProjectionEvaluator<Sp, P>
where
    Sp: StateSpace,
    P: Projector<Sp::State>,
{
    pub fn new(space: Arc<Sp>, projector: P) -> Self {
        Self::with_config(space, projector, InferenceConfig::default())
    }

    pub fn with_config(space: Arc<Sp>, projector: P, config: InferenceConfig) -> Self {
        Self {
            space,
            projector,
            cell_dimensions: Vec::new(),
            config,
        }
    }

    pub fn space(&self) -> &Arc<Sp> {
        &self.space
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    /// Mutable access to the projector. Changing its dimension requires
    /// new cell dimensions and another `setup`.
    pub fn projector_mut(&mut self) -> &mut P {
        &mut self.projector
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Replace the inference parameters. An invalid config is not stored.
    pub fn set_config(&mut self, config: InferenceConfig) -> ProjectionResult<()> {
        config.check()?;
        self.config = config;
        Ok(())
    }

    /// Output dimension of the projector (M)
    pub fn dimension(&self) -> usize {
        self.projector.dimension()
    }

    pub fn project(&self, state: &Sp::State, projection: &mut EuclideanProjection) {
        self.projector.project(state, projection);
    }

    /// Allocating form of [`project`](Self::project)
    pub fn projection_of(&self, state: &Sp::State) -> EuclideanProjection {
        let mut projection = EuclideanProjection::new(self.dimension());
        self.project(state, &mut projection);
        projection
    }

    pub fn cell_dimensions(&self) -> &[f64] {
        &self.cell_dimensions
    }

    /// Replace the cell sizes, then validate them.
    ///
    /// The new sizes are stored even when validation fails, so a later
    /// `setup` reports the same error.
    pub fn set_cell_dimensions(&mut self, cell_dimensions: Vec<f64>) -> ProjectionResult<()> {
        self.cell_dimensions = cell_dimensions;
        self.check_cell_dimensions()
    }

    /// Forget configured sizes; the next `setup` infers them again.
    pub fn clear_cell_dimensions(&mut self) {
        self.cell_dimensions.clear();
    }

    pub fn check_cell_dimensions(&self) -> ProjectionResult<()> {
        let dim = self.dimension();
        if dim == 0 {
            return Err(ProjectionError::ZeroDimension);
        }
        if self.cell_dimensions.len() != dim {
            return Err(ProjectionError::CellDimensionMismatch {
                expected: dim,
                actual: self.cell_dimensions.len(),
            });
        }
        Ok(())
    }

    /// Estimate cell sizes from the projected extent of uniform samples.
    ///
    /// Each axis gets `(max - min) / dimension_splits`. An axis whose width
    /// comes out below machine epsilon gets a width of 1.0 and a warning.
    /// Returns the indices of those collapsed axes. Does nothing when the
    /// projection has no dimensions.
    pub fn infer_cell_dimensions(&mut self) -> Vec<usize> {
        let dim = self.dimension();
        if dim == 0 {
            return Vec::new();
        }

        let mut sampler = self.space.alloc_sampler();
        let mut state = self.space.alloc_state();
        let mut projection = EuclideanProjection::new(dim);

        let mut low = vec![f64::INFINITY; dim];
        let mut high = vec![f64::NEG_INFINITY; dim];

        for _ in 0..self.config.extent_samples {
            sampler.sample_uniform(&mut state);
            self.projector.project(&state, &mut projection);
            for j in 0..dim {
                low[j] = low[j].min(projection[j]);
                high[j] = high[j].max(projection[j]);
            }
        }
        drop(state);

        debug!(
            "Projected extents for {} over {} samples: low={:?} high={:?}",
            self.space.name(),
            self.config.extent_samples,
            low,
            high
        );

        let mut collapsed = Vec::new();
        self.cell_dimensions = (0..dim)
            .map(|j| {
                let width = (high[j] - low[j]) / self.config.dimension_splits;
                // also catches NaN and the -inf left by zero samples
                if width >= f64::EPSILON {
                    width
                } else {
                    warn!(
                        "Inferred cell size for dimension {} of a projection for state space {} \
                         is 0. Setting arbitrary value of 1 instead.",
                        j,
                        self.space.name()
                    );
                    collapsed.push(j);
                    1.0
                }
            })
            .collect();

        collapsed
    }

    /// Infer cell sizes if none are configured, then validate.
    pub fn setup(&mut self) -> ProjectionResult<()> {
        if self.cell_dimensions.is_empty() && self.dimension() > 0 {
            self.config.check()?;
            self.infer_cell_dimensions();
        }
        self.check_cell_dimensions()
    }

    /// `floor(projection[i] / cell_dimensions[i])` for every axis.
    pub fn compute_coordinates(&self, projection: &[f64]) -> ProjectionCoordinates {
        projection
            .iter()
            .zip(&self.cell_dimensions)
            .take(self.dimension())
            .map(|(p, w)| (p / w).floor() as i32)
            .collect::<Vec<i32>>()
            .into()
    }

    /// Project a state and return the cell it falls in.
    pub fn coordinates_of(&self, state: &Sp::State) -> ProjectionCoordinates {
        let projection = self.projection_of(state);
        self.compute_coordinates(&projection)
    }

    pub fn print_settings<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Projection of dimension {}", self.dimension())?;
        write!(out, "Cell dimensions: [")?;
        for (i, w) in self.cell_dimensions.iter().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            write!(out, "{}", w)?;
        }
        writeln!(out, "]")
    }

    pub fn print_projection<W: Write + ?Sized>(
        &self,
        projection: &[f64],
        out: &mut W,
    ) -> io::Result<()> {
        let dim = self.dimension();
        if dim == 0 {
            return writeln!(out, "NULL");
        }
        for (i, v) in projection.iter().take(dim).enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            write!(out, "{}", v)?;
        }
        writeln!(out)
    }
}
