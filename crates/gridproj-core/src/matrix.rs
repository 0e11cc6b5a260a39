//! Random orthonormal projection matrices
//!
//! A [`ProjectionMatrix`] maps an N-dimensional vector to M dimensions
//! (M ≤ N) by taking its inner product with M orthonormal rows. Rows are
//! drawn from a Gaussian source and orthonormalized with Gram-Schmidt, then
//! optionally divided by a per-row scale factor.
//!
//! # Example
//!
//! ```rust
//! use gridproj_core::matrix::ProjectionMatrix;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut matrix = ProjectionMatrix::new();
//! matrix.compute_random(6, 2, &[], &mut rng).unwrap();
//!
//! let mut out = [0.0; 2];
//! matrix.project(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0], &mut out);
//! ```

use crate::error::{ProjectionError, ProjectionResult};
use crate::random::GaussianSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::debug;

/// Row-major dense matrix, one `Vec` per output dimension.
pub type Matrix = Vec<Vec<f64>>;

/// Linear map from `input_dimension()` to `output_dimension()` reals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionMatrix {
    mat: Matrix,
}

impl ProjectionMatrix {
    /// Create an empty matrix (projects to zero dimensions)
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing rows. All rows must have the same length.
    pub fn from_rows(rows: Matrix) -> ProjectionResult<Self> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
                return Err(ProjectionError::RaggedMatrix {
                    line: i + 1,
                    expected,
                    actual: row.len(),
                });
            }
        }
        Ok(Self { mat: rows })
    }

    /// Build a `to` × `from` matrix with orthonormal rows.
    ///
    /// When `scale.len() == from`, row `i` is divided by `scale[i]`. The
    /// divisor is indexed by output row, so only the first `to` entries of
    /// `scale` are read. Pass an empty slice for no scaling.
    ///
    /// Rows are only orthonormal when `to <= from`; beyond that Gram-Schmidt
    /// runs out of independent directions and the result is degenerate.
    pub fn random_matrix<G>(
        from: usize,
        to: usize,
        scale: &[f64],
        rng: &mut G,
    ) -> ProjectionResult<Matrix>
    where
        G: GaussianSource + ?Sized,
    {
        let mut mat: Matrix = (0..to)
            .map(|_| (0..from).map(|_| rng.gaussian01()).collect())
            .collect();

        for i in 0..to {
            let (done, rest) = mat.split_at_mut(i);
            let row = &mut rest[0];
            for prev in done.iter() {
                let d = dot(row, prev);
                for (r, p) in row.iter_mut().zip(prev) {
                    *r -= d * p;
                }
            }
            let norm = dot(row, row).sqrt();
            for r in row.iter_mut() {
                *r /= norm;
            }
        }

        if from > 0 && scale.len() == from {
            for (i, row) in mat.iter_mut().enumerate() {
                let factor = *scale.get(i).ok_or(ProjectionError::ScaleLength {
                    index: i,
                    len: scale.len(),
                })?;
                if factor.abs() < f64::EPSILON {
                    return Err(ProjectionError::ZeroScaleFactor { index: i });
                }
                for v in row.iter_mut() {
                    *v /= factor;
                }
            }
        }

        debug!(from, to, scaled = scale.len() == from, "generated random projection");
        Ok(mat)
    }

    /// Replace this matrix with a fresh random one.
    ///
    /// On error the previous matrix is left untouched.
    pub fn compute_random<G>(
        &mut self,
        from: usize,
        to: usize,
        scale: &[f64],
        rng: &mut G,
    ) -> ProjectionResult<()>
    where
        G: GaussianSource + ?Sized,
    {
        self.mat = Self::random_matrix(from, to, scale, rng)?;
        Ok(())
    }

    /// Apply the matrix: `to[i] = <from, row i>`.
    ///
    /// `from` must have `input_dimension()` entries and `to` at least
    /// `output_dimension()`; neither is checked.
    pub fn project(&self, from: &[f64], to: &mut [f64]) {
        for (out, row) in to.iter_mut().zip(&self.mat) {
            *out = dot(from, row);
        }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.mat
    }

    /// Number of rows (M)
    pub fn output_dimension(&self) -> usize {
        self.mat.len()
    }

    /// Number of columns (N), zero for an empty matrix
    pub fn input_dimension(&self) -> usize {
        self.mat.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.mat.is_empty()
    }

    /// Write the matrix, one row per line, values separated by spaces.
    pub fn print<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl fmt::Display for ProjectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.mat {
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the text written by [`ProjectionMatrix::print`]. Blank lines are
/// skipped.
impl FromStr for ProjectionMatrix {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Matrix::new();
        for (i, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row: Vec<f64> = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>().map_err(|e| ProjectionError::Parse {
                        line: i + 1,
                        message: format!("invalid value '{}': {}", tok, e),
                    })
                })
                .collect::<ProjectionResult<_>>()?;
            // report ragged rows by source line, not row index
            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(ProjectionError::RaggedMatrix {
                        line: i + 1,
                        expected: first.len(),
                        actual: row.len(),
                    });
                }
            }
            rows.push(row);
        }
        Ok(Self { mat: rows })
    }
}
