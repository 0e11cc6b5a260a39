//! Projection through a random orthonormal matrix

use super::{EuclideanProjection, Projector};
use crate::error::ProjectionResult;
use crate::matrix::ProjectionMatrix;
use crate::random::GaussianSource;

/// Applies a [`ProjectionMatrix`] to any state that exposes its components
/// as a real slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearProjection {
    matrix: ProjectionMatrix,
}

impl LinearProjection {
    pub fn new(matrix: ProjectionMatrix) -> Self {
        Self { matrix }
    }

    /// Random `to`-dimensional projection of a `from`-dimensional space.
    /// See [`ProjectionMatrix::random_matrix`] for how `scale` is applied.
    pub fn random<G>(from: usize, to: usize, scale: &[f64], rng: &mut G) -> ProjectionResult<Self>
    where
        G: GaussianSource + ?Sized,
    {
        let mut matrix = ProjectionMatrix::new();
        matrix.compute_random(from, to, scale, rng)?;
        Ok(Self { matrix })
    }

    /// Draw a new matrix in place of the current one.
    pub fn recompute<G>(
        &mut self,
        from: usize,
        to: usize,
        scale: &[f64],
        rng: &mut G,
    ) -> ProjectionResult<()>
    where
        G: GaussianSource + ?Sized,
    {
        self.matrix.compute_random(from, to, scale, rng)
    }

    pub fn matrix(&self) -> &ProjectionMatrix {
        &self.matrix
    }
}

impl<S> Projector<S> for LinearProjection
where
    S: AsRef<[f64]> + ?Sized,
{
    fn dimension(&self) -> usize {
        self.matrix.output_dimension()
    }

    fn project(&self, state: &S, projection: &mut EuclideanProjection) {
        self.matrix.project(state.as_ref(), projection.values_mut());
    }
}
