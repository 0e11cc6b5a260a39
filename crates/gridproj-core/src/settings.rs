//! Serializable projection settings
//!
//! Settings are plain JSON so they can live in a config file next to a
//! planner configuration:
//!
//! ```json
//! {
//!   "output_dimension": 2,
//!   "cell_dimensions": [0.5, 0.5],
//!   "seed": 42,
//!   "inference": { "extent_samples": 2000, "dimension_splits": 4.0 }
//! }
//! ```

use crate::error::{ProjectionError, ProjectionResult};
use crate::evaluator::{InferenceConfig, ProjectionEvaluator};
use crate::projection::Projector;
use crate::space::StateSpace;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Projected dimension (M) for random linear projections
    pub output_dimension: Option<usize>,
    /// Fixed cell sizes; inferred during setup when absent
    pub cell_dimensions: Option<Vec<f64>>,
    /// Per-row divisors for random linear projections
    pub scale: Option<Vec<f64>>,
    /// Seed for the projection matrix draw
    pub seed: Option<u64>,
    pub inference: InferenceConfig,
}

impl ProjectionSettings {
    pub fn from_json(json: &str) -> ProjectionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> ProjectionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ProjectionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ProjectionError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Push inference parameters and any fixed cell sizes into `evaluator`.
    pub fn apply<Sp, P>(&self, evaluator: &mut ProjectionEvaluator<Sp, P>) -> ProjectionResult<()>
    where
        Sp: StateSpace,
        P: Projector<Sp::State>,
    {
        evaluator.set_config(self.inference)?;
        if let Some(cells) = &self.cell_dimensions {
            evaluator.set_cell_dimensions(cells.clone())?;
        }
        Ok(())
    }

    /// Capture the evaluator's current inference parameters and cell sizes.
    pub fn snapshot<Sp, P>(evaluator: &ProjectionEvaluator<Sp, P>) -> Self
    where
        Sp: StateSpace,
        P: Projector<Sp::State>,
    {
        let cells = evaluator.cell_dimensions();
        Self {
            output_dimension: Some(evaluator.dimension()),
            cell_dimensions: (!cells.is_empty()).then(|| cells.to_vec()),
            inference: *evaluator.config(),
            ..Default::default()
        }
    }
}
