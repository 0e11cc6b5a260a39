//! Projectors: maps from states to a small Euclidean space
//!
//! A [`Projector`] turns a state into `dimension()` real numbers. Three
//! variants ship with the crate:
//!
//! - [`LinearProjection`] - random orthonormal matrix applied to a real vector
//! - [`OrthogonalProjection`] - picks a fixed subset of state components
//! - [`FnProjection`] - wraps a user closure
//!
//! The cell-size lifecycle that sits on top of a projector lives in
//! [`crate::evaluator::ProjectionEvaluator`].

mod linear;
mod orthogonal;

pub use linear::LinearProjection;
pub use orthogonal::OrthogonalProjection;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Maps a state of type `S` to `dimension()` real values.
pub trait Projector<S: ?Sized> {
    /// Number of output values (M)
    fn dimension(&self) -> usize;

    /// Write the image of `state` into `projection`.
    ///
    /// `projection` is expected to already hold `dimension()` values.
    fn project(&self, state: &S, projection: &mut EuclideanProjection);
}

impl<S: ?Sized, P: Projector<S> + ?Sized> Projector<S> for Box<P> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn project(&self, state: &S, projection: &mut EuclideanProjection) {
        (**self).project(state, projection)
    }
}

/// Image of one state under a projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EuclideanProjection(Vec<f64>);

impl EuclideanProjection {
    /// Zero vector of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for EuclideanProjection {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl Deref for EuclideanProjection {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl DerefMut for EuclideanProjection {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

/// Integer key of the grid cell containing a projection.
///
/// Two states fall in the same cell exactly when their coordinates are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectionCoordinates(Vec<i32>);

impl ProjectionCoordinates {
    pub fn values(&self) -> &[i32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<i32> {
        self.0
    }
}

impl From<Vec<i32>> for ProjectionCoordinates {
    fn from(values: Vec<i32>) -> Self {
        Self(values)
    }
}

impl Deref for ProjectionCoordinates {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.0
    }
}

impl fmt::Display for ProjectionCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str(")")
    }
}

/// Projector backed by a closure.
///
/// ```rust
/// use gridproj_core::projection::{EuclideanProjection, FnProjection, Projector};
///
/// // distance from the origin of a planar point
/// let radius = FnProjection::new(1, |p: &[f64; 2], out: &mut [f64]| {
///     out[0] = (p[0] * p[0] + p[1] * p[1]).sqrt();
/// });
///
/// let mut proj = EuclideanProjection::new(1);
/// radius.project(&[3.0, 4.0], &mut proj);
/// assert_eq!(proj.values(), &[5.0]);
/// ```
pub struct FnProjection<F> {
    dimension: usize,
    f: F,
}

impl<F> FnProjection<F> {
    pub fn new(dimension: usize, f: F) -> Self {
        Self { dimension, f }
    }
}

impl<S: ?Sized, F> Projector<S> for FnProjection<F>
where
    F: Fn(&S, &mut [f64]),
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn project(&self, state: &S, projection: &mut EuclideanProjection) {
        (self.f)(state, projection.values_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn coordinates_key_cells() {
        let mut cells = HashSet::new();
        cells.insert(ProjectionCoordinates::from(vec![0, 1]));
        cells.insert(ProjectionCoordinates::from(vec![0, 1]));
        cells.insert(ProjectionCoordinates::from(vec![1, 0]));
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn coordinates_display() {
        let c = ProjectionCoordinates::from(vec![-1, 0, 7]);
        assert_eq!(c.to_string(), "(-1, 0, 7)");
    }

    #[test]
    fn boxed_projector_delegates() {
        let swap = FnProjection::new(2, |s: &[f64], out: &mut [f64]| {
            out[0] = s[1];
            out[1] = s[0];
        });
        let p: Box<dyn Projector<[f64]>> = Box::new(swap);
        let mut proj = EuclideanProjection::new(Projector::<[f64]>::dimension(&p));
        p.project(&[1.0, 2.0][..], &mut proj);
        assert_eq!(proj.values(), &[2.0, 1.0]);
    }
}
