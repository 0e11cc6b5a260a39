//! Inspection report: matrix, cell sizes, and per-point cells

use gridproj_core::{LinearProjection, ProjectionEvaluator, StateSpace};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointReport {
    pub state: Vec<f64>,
    pub projection: Vec<f64>,
    pub cell: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub space: String,
    pub matrix: Vec<Vec<f64>>,
    pub cell_dimensions: Vec<f64>,
    pub points: Vec<PointReport>,
}

/// Project and discretize every point. `evaluator` must be set up.
pub fn build<Sp>(
    evaluator: &ProjectionEvaluator<Sp, LinearProjection>,
    points: &[Vec<f64>],
) -> Report
where
    Sp: StateSpace<State = Vec<f64>>,
{
    let points = points
        .iter()
        .map(|state| {
            let projection = evaluator.projection_of(state);
            let cell = evaluator.compute_coordinates(&projection);
            PointReport {
                state: state.clone(),
                projection: projection.into_inner(),
                cell: cell.into_inner(),
            }
        })
        .collect();

    Report {
        space: evaluator.space().name().to_string(),
        matrix: evaluator.projector().matrix().rows().to_vec(),
        cell_dimensions: evaluator.cell_dimensions().to_vec(),
        points,
    }
}

/// Human-readable rendering using the evaluator's own diagnostics.
pub fn write_text<Sp, W>(
    evaluator: &ProjectionEvaluator<Sp, LinearProjection>,
    report: &Report,
    out: &mut W,
) -> io::Result<()>
where
    Sp: StateSpace<State = Vec<f64>>,
    W: Write,
{
    writeln!(out, "State space: {}", report.space)?;
    writeln!(out, "Projection matrix:")?;
    evaluator.projector().matrix().print(out)?;
    evaluator.print_settings(out)?;
    for point in &report.points {
        write!(out, "{:?} -> ", point.state)?;
        evaluator.print_projection(&point.projection, out)?;
        writeln!(out, "  cell {:?}", point.cell)?;
    }
    Ok(())
}
