//! Fixture types shared by the property suites.

use proptest::test_runner::TestCaseError;

use crate::{ExecutionStrategy, LevelSetTree};

/// Shape of the density function assigned to generated points.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum DensityProfile {
    /// Independent densities drawn from a continuous range.
    Uniform,
    /// Several peaks along a chain, so components split as levels rise.
    Peaked,
    /// Densities drawn from a handful of values, forcing many ties.
    Plateau,
    /// Disjoint groups of points with no edges between them.
    Disconnected,
}

/// Inputs for one construction run, with the profile kept for diagnostics.
#[derive(Clone, Debug)]
pub(super) struct TreeFixture {
    /// Symmetric adjacency lists.
    pub adjacency: Vec<Vec<usize>>,
    /// Strictly positive density per point.
    pub density: Vec<f64>,
    /// Strictly ascending levels whose last entry covers every density.
    pub levels: Vec<f64>,
    /// Profile used during generation.
    pub profile: DensityProfile,
}

impl TreeFixture {
    /// Number of generated points.
    pub(super) fn point_count(&self) -> usize {
        self.density.len()
    }

    /// Constructs the tree with `strategy`, mapping failures to a test error
    /// that names the fixture.
    pub(super) fn build(&self, strategy: ExecutionStrategy) -> Result<LevelSetTree, TestCaseError> {
        LevelSetTree::builder()
            .with_execution_strategy(strategy)
            .build()
            .and_then(|builder| builder.construct(&self.adjacency, &self.density, &self.levels))
            .map_err(|err| {
                TestCaseError::fail(format!(
                    "construction failed: {err} (profile={:?}, points={}, levels={})",
                    self.profile,
                    self.point_count(),
                    self.levels.len(),
                ))
            })
    }
}
