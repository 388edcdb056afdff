//! Shared test utilities for `lstree-core`.

use lstree_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{ExecutionStrategy, LevelSetTree};

/// Default cap on generated point counts for property suites.
pub(crate) const DEFAULT_MAX_POINTS: usize = 40;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `LSTREE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false, DEFAULT_MAX_POINTS);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Upper bound on generated point counts, honouring `LSTREE_PBT_MAX_POINTS`.
#[must_use]
pub(crate) fn max_points() -> usize {
    ProptestRunProfile::load(0, false, DEFAULT_MAX_POINTS).max_points()
}

/// Symmetric adjacency list of the path `0 - 1 - ... - (n - 1)`.
#[must_use]
pub(crate) fn path_adjacency(n: usize) -> Vec<Vec<usize>> {
    (0..n)
        .map(|point| {
            [point.checked_sub(1), (point + 1 < n).then_some(point + 1)]
                .into_iter()
                .flatten()
                .collect()
        })
        .collect()
}

/// Constructs a tree on the calling thread, panicking on invalid input.
#[must_use]
pub(crate) fn build_sequential(
    adjacency: &[Vec<usize>],
    density: &[f64],
    levels: &[f64],
) -> LevelSetTree {
    LevelSetTree::builder()
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("sequential strategy is always available")
        .construct(adjacency, density, levels)
        .expect("fixture input must be valid")
}

/// The path `0 - ... - 6` with densities that carve out nested splits:
///
/// ```text
/// 0 [0..=6] ──┬── 1 [0, 1, 2]
///             └── 2 [4, 5, 6] ──┬── 3 [4]
///                               └── 4 [6]
/// ```
#[must_use]
pub(crate) fn nested_tree() -> LevelSetTree {
    build_sequential(
        &path_adjacency(7),
        &[5.0, 4.0, 3.0, 1.0, 3.0, 2.0, 5.0],
        &[1.0, 2.0, 3.0, 4.0, 5.0],
    )
}
