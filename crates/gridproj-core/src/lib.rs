//! gridproj core
//!
//! Low-dimensional projections of planner state spaces, and the grid cells
//! they induce. Coverage-driven planners use the cell of a state as a key
//! for exploration bookkeeping.
//!
//! - [`matrix`] - random orthonormal projection matrices (Gram-Schmidt)
//! - [`projection`] - the [`Projector`] capability and its variants
//! - [`evaluator`] - cell sizing (fixed or inferred) and cell coordinates
//! - [`space`] - state-space collaborators and a box-bounded reference space
//! - [`settings`] - JSON settings for the above
//!
//! # Example
//!
//! ```rust
//! use gridproj_core::{
//!     LinearProjection, ProjectionEvaluator, RealVectorBounds, RealVectorStateSpace,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::sync::Arc;
//!
//! let space = RealVectorStateSpace::new(RealVectorBounds::uniform(6, -1.0, 1.0))
//!     .unwrap()
//!     .with_seed(3);
//! let mut rng = StdRng::seed_from_u64(42);
//! let projector = LinearProjection::random(6, 2, &[], &mut rng).unwrap();
//!
//! let mut evaluator = ProjectionEvaluator::new(Arc::new(space), projector);
//! evaluator.setup().unwrap();
//!
//! let cell = evaluator.coordinates_of(&vec![0.1, 0.2, 0.3, -0.4, 0.5, -0.6]);
//! assert_eq!(cell.len(), 2);
//! ```

pub mod error;
pub mod evaluator;
pub mod matrix;
pub mod projection;
pub mod random;
pub mod settings;
pub mod space;

// Re-export main types at crate root
pub use error::{ProjectionError, ProjectionResult};
pub use evaluator::{InferenceConfig, ProjectionEvaluator};
pub use matrix::{Matrix, ProjectionMatrix};
pub use projection::{
    EuclideanProjection, FnProjection, LinearProjection, OrthogonalProjection,
    ProjectionCoordinates, Projector,
};
pub use random::GaussianSource;
pub use settings::ProjectionSettings;
pub use space::{
    RealVectorBounds, RealVectorSampler, RealVectorStateSpace, StateSampler, StateSpace,
};
