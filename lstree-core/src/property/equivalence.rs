//! Equivalence of construction paths.
//!
//! The sequential sweep is the oracle. The default strategy, the provider
//! entry point, and a JSON round trip must all reproduce its tree exactly.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ExecutionStrategy, InMemoryGraph, InputError, LevelGridGenerator, LevelSetTree};

use super::types::TreeFixture;

/// Runs the construction equivalence property for the given fixture.
pub(super) fn run_equivalence_property(fixture: &TreeFixture) -> TestCaseResult {
    let oracle = fixture.build(ExecutionStrategy::Sequential)?;

    let auto = fixture.build(ExecutionStrategy::Auto)?;
    expect_same("auto strategy", fixture, &oracle, &auto)?;

    #[cfg(feature = "parallel")]
    {
        let parallel = fixture.build(ExecutionStrategy::Parallel)?;
        expect_same("parallel strategy", fixture, &oracle, &parallel)?;
    }

    let provider = InMemoryGraph::new(
        "fixture",
        fixture.adjacency.clone(),
        fixture.density.clone(),
    );
    let from_provider = LevelSetTree::builder()
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .and_then(|builder| builder.construct_from(&provider, &GivenLevels(&fixture.levels)))
        .map_err(|err| TestCaseError::fail(format!("construct_from failed: {err}")))?;
    expect_same("provider entry point", fixture, &oracle, &from_provider)?;

    let mut buffer = Vec::new();
    oracle
        .to_writer(&mut buffer)
        .map_err(|err| TestCaseError::fail(format!("serialisation failed: {err}")))?;
    let restored = LevelSetTree::from_reader(buffer.as_slice())
        .map_err(|err| TestCaseError::fail(format!("deserialisation failed: {err}")))?;
    expect_same("JSON round trip", fixture, &oracle, &restored)?;

    Ok(())
}

/// Level grid that replays the fixture's precomputed levels.
struct GivenLevels<'a>(&'a [f64]);

impl LevelGridGenerator for GivenLevels<'_> {
    fn levels(&self, _density: &[f64]) -> Result<Vec<f64>, InputError> {
        Ok(self.0.to_vec())
    }
}

fn expect_same(
    label: &str,
    fixture: &TreeFixture,
    oracle: &LevelSetTree,
    candidate: &LevelSetTree,
) -> TestCaseResult {
    if candidate == oracle {
        return Ok(());
    }
    Err(TestCaseError::fail(format!(
        "{label} diverged from the sequential sweep (profile={:?}, points={}, \
         oracle nodes={}, candidate nodes={})",
        fixture.profile,
        fixture.point_count(),
        oracle.len(),
        candidate.len(),
    )))
}
