//! End-to-end tests: random or fixed projections feeding grid coordinates

use gridproj_core::{
    LinearProjection, ProjectionError, ProjectionEvaluator, ProjectionMatrix, Projector,
    RealVectorBounds, RealVectorStateSpace, StateSampler, StateSpace,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;

fn box_space(dim: usize, seed: u64) -> Arc<RealVectorStateSpace> {
    Arc::new(
        RealVectorStateSpace::new(RealVectorBounds::uniform(dim, -1.0, 1.0))
            .unwrap()
            .with_seed(seed),
    )
}

/// First two rows of the 4x4 identity
fn identity_like() -> LinearProjection {
    LinearProjection::new(
        ProjectionMatrix::from_rows(vec![vec![1.0, 0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0, 0.0]])
            .unwrap(),
    )
}

#[test]
fn fixed_matrix_unit_cells() {
    let mut eval = ProjectionEvaluator::new(box_space(4, 1), identity_like());
    eval.set_cell_dimensions(vec![1.0, 1.0]).unwrap();
    eval.setup().unwrap();

    let cell = eval.coordinates_of(&vec![0.4, 0.0, 0.0, 0.0]);
    assert_eq!(cell.values(), &[0, 0]);

    let cell = eval.coordinates_of(&vec![1.6, 0.0, 0.0, 0.0]);
    assert_eq!(cell[0], 1);

    let cell = eval.coordinates_of(&vec![-0.2, -1.0, 9.0, 9.0]);
    assert_eq!(cell.values(), &[-1, -1]);
}

#[test]
fn random_projection_setup_infers_cells() {
    let mut rng = StdRng::seed_from_u64(2024);
    let projector = LinearProjection::random(10, 3, &[], &mut rng).unwrap();
    let mut eval = ProjectionEvaluator::new(box_space(10, 8), projector);
    eval.setup().unwrap();

    assert_eq!(eval.dimension(), 3);
    assert_eq!(eval.cell_dimensions().len(), 3);
    for &w in eval.cell_dimensions() {
        assert!(w > 0.0 && w.is_finite());
    }
}

#[test]
fn inferred_grid_has_few_cells_per_axis() {
    let mut rng = StdRng::seed_from_u64(77);
    let projector = LinearProjection::random(5, 2, &[], &mut rng).unwrap();
    let space = box_space(5, 12);
    let mut eval = ProjectionEvaluator::new(space.clone(), projector);
    eval.setup().unwrap();

    // the sampled extent spans about dimension_splits cells per axis
    let mut sampler = space.alloc_sampler();
    let mut state = space.alloc_state();
    let mut seen = vec![HashSet::new(); 2];
    for _ in 0..2000 {
        sampler.sample_uniform(&mut state);
        let cell = eval.coordinates_of(&state);
        for (axis, c) in cell.iter().enumerate() {
            seen[axis].insert(*c);
        }
    }
    for axis in &seen {
        assert!(axis.len() >= 2 && axis.len() <= 4, "cells on axis: {:?}", axis);
    }
}

#[test]
fn scaled_projection_stretches_cells() {
    let plain = LinearProjection::random(4, 2, &[], &mut StdRng::seed_from_u64(5)).unwrap();
    let scale = [0.5, 0.5, 1.0, 1.0];
    let scaled = LinearProjection::random(4, 2, &scale, &mut StdRng::seed_from_u64(5)).unwrap();

    let mut a = ProjectionEvaluator::new(box_space(4, 3), plain);
    let mut b = ProjectionEvaluator::new(box_space(4, 3), scaled);
    a.setup().unwrap();
    b.setup().unwrap();

    // same samples, every projection doubled
    for (wa, wb) in a.cell_dimensions().iter().zip(b.cell_dimensions()) {
        assert!((wb - 2.0 * wa).abs() < 1e-9, "{} vs {}", wa, wb);
    }
}

#[test]
fn zero_scale_factor_is_rejected() {
    let mut rng = StdRng::seed_from_u64(5);
    let err = LinearProjection::random(3, 2, &[1.0, 1e-20, 1.0], &mut rng).unwrap_err();
    assert_eq!(err, ProjectionError::ZeroScaleFactor { index: 1 });
}

#[test]
fn setup_rejects_mismatched_cells() {
    let mut eval = ProjectionEvaluator::new(box_space(4, 1), identity_like());
    assert!(eval.set_cell_dimensions(vec![1.0, 1.0, 1.0]).is_err());
    assert_eq!(
        eval.setup(),
        Err(ProjectionError::CellDimensionMismatch {
            expected: 2,
            actual: 3
        })
    );
}

#[test]
fn evaluator_is_shareable_after_setup() {
    let mut rng = StdRng::seed_from_u64(31);
    let projector = LinearProjection::random(6, 2, &[], &mut rng).unwrap();
    let mut eval = ProjectionEvaluator::new(box_space(6, 4), projector);
    eval.setup().unwrap();

    let state = vec![0.1, -0.2, 0.3, -0.4, 0.5, -0.6];
    let expected = eval.coordinates_of(&state);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| eval.coordinates_of(&state)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn projector_trait_object_in_evaluator() {
    let boxed: Box<dyn Projector<Vec<f64>> + Send + Sync> = Box::new(identity_like());
    let mut eval = ProjectionEvaluator::new(box_space(4, 9), boxed);
    eval.set_cell_dimensions(vec![0.5, 0.5]).unwrap();
    let cell = eval.coordinates_of(&vec![0.75, -0.25, 0.0, 0.0]);
    assert_eq!(cell.values(), &[1, -1]);
}
