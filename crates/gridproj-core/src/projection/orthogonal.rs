//! Projection onto a subset of coordinate axes

use super::{EuclideanProjection, Projector};

/// Keeps the listed components of a real-vector state, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrthogonalProjection {
    components: Vec<usize>,
}

impl OrthogonalProjection {
    pub fn new(components: Vec<usize>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[usize] {
        &self.components
    }
}

impl<S> Projector<S> for OrthogonalProjection
where
    S: AsRef<[f64]> + ?Sized,
{
    fn dimension(&self) -> usize {
        self.components.len()
    }

    fn project(&self, state: &S, projection: &mut EuclideanProjection) {
        let values = state.as_ref();
        for (out, &c) in projection.values_mut().iter_mut().zip(&self.components) {
            *out = values[c];
        }
    }
}
