//! Strategy builders for level set tree property tests.
//!
//! Each generator draws a symmetric neighbour graph and a strictly positive
//! density per point from a seeded [`SmallRng`], then derives a level grid
//! with [`DensityGrid`] so every density is covered by the final level.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{
    provider::{DensityGrid, LevelGridGenerator},
    test_utils::{max_points, path_adjacency},
};

use super::types::{DensityProfile, TreeFixture};

/// Smallest generated point count.
const MIN_POINTS: usize = 2;
/// Upper bound on the level count drawn for quantile grids.
const MAX_LEVELS: usize = 12;
/// Values available to the plateau profile.
const PLATEAU_VALUES: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Generates fixtures across every density profile.
pub(super) fn tree_fixture_strategy() -> impl Strategy<Value = TreeFixture> {
    (any::<DensityProfile>(), any::<u64>()).prop_map(|(profile, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(profile, &mut rng)
    })
}

/// Generates a fixture for a specific profile.
pub(super) fn generate_fixture(profile: DensityProfile, rng: &mut SmallRng) -> TreeFixture {
    let point_count = rng.gen_range(MIN_POINTS..=max_points().max(MIN_POINTS));
    let (adjacency, density): (Vec<Vec<usize>>, Vec<f64>) = match profile {
        DensityProfile::Uniform => (
            random_graph(point_count, rng),
            (0..point_count).map(|_| rng.gen_range(0.1..10.0)).collect(),
        ),
        DensityProfile::Peaked => peaked_chain(point_count, rng),
        DensityProfile::Plateau => (
            random_graph(point_count, rng),
            (0..point_count)
                .map(|_| PLATEAU_VALUES[rng.gen_range(0..PLATEAU_VALUES.len())])
                .collect(),
        ),
        DensityProfile::Disconnected => disconnected_groups(point_count, rng),
    };
    let levels = level_grid(&density, rng);
    TreeFixture {
        adjacency,
        density,
        levels,
        profile,
    }
}

/// Either one level per distinct density or a random number of quantile
/// levels.
fn level_grid(density: &[f64], rng: &mut SmallRng) -> Vec<f64> {
    let grid = if rng.gen_bool(0.5) {
        DensityGrid::distinct()
    } else {
        let count = NonZeroUsize::new(rng.gen_range(1..=MAX_LEVELS)).unwrap_or(NonZeroUsize::MIN);
        DensityGrid::with_levels(count)
    };
    grid.levels(density)
        .expect("generated densities are finite and positive")
}

/// Random graph where each pair is linked with one shared probability.
fn random_graph(point_count: usize, rng: &mut SmallRng) -> Vec<Vec<usize>> {
    let probability = rng.gen_range(0.05..=0.5);
    let mut adjacency = vec![Vec::new(); point_count];
    for left in 0..point_count {
        for right in (left + 1)..point_count {
            if rng.gen_bool(probability) {
                adjacency[left].push(right);
                adjacency[right].push(left);
            }
        }
    }
    adjacency
}

/// A chain with a few shortcut edges whose density peaks at random centres.
fn peaked_chain(point_count: usize, rng: &mut SmallRng) -> (Vec<Vec<usize>>, Vec<f64>) {
    let mut adjacency = path_adjacency(point_count);
    for _ in 0..rng.gen_range(0..=point_count / 4) {
        let left = rng.gen_range(0..point_count);
        let right = rng.gen_range(0..point_count);
        if left != right && !adjacency[left].contains(&right) {
            adjacency[left].push(right);
            adjacency[right].push(left);
        }
    }

    let centres: Vec<(usize, f64)> = (0..rng.gen_range(1..=4))
        .map(|_| (rng.gen_range(0..point_count), rng.gen_range(2.0..8.0)))
        .collect();
    let density = (0..point_count)
        .map(|point| {
            centres
                .iter()
                .map(|&(centre, height)| height - 0.5 * point.abs_diff(centre) as f64)
                .fold(0.1, f64::max)
        })
        .collect();
    (adjacency, density)
}

/// Splits the points into up to four groups, each a random graph of its own.
fn disconnected_groups(point_count: usize, rng: &mut SmallRng) -> (Vec<Vec<usize>>, Vec<f64>) {
    let groups = rng.gen_range(2..=4).min(point_count);
    let group_of: Vec<usize> = (0..point_count).map(|point| point % groups).collect();
    let mut adjacency = vec![Vec::new(); point_count];
    for left in 0..point_count {
        for right in (left + 1)..point_count {
            if group_of[left] == group_of[right] && rng.gen_bool(0.4) {
                adjacency[left].push(right);
                adjacency[right].push(left);
            }
        }
    }
    let density = (0..point_count).map(|_| rng.gen_range(0.1..5.0)).collect();
    (adjacency, density)
}

// Biased towards the profiles that produce the richest split structure.
impl proptest::arbitrary::Arbitrary for DensityProfile {
    type Parameters = ();
    type Strategy = proptest::strategy::TupleUnion<(
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
    )>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            2 => Just(Self::Uniform),
            3 => Just(Self::Peaked),
            2 => Just(Self::Plateau),
            2 => Just(Self::Disconnected),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::uniform(DensityProfile::Uniform)]
    #[case::peaked(DensityProfile::Peaked)]
    #[case::plateau(DensityProfile::Plateau)]
    #[case::disconnected(DensityProfile::Disconnected)]
    fn fixtures_are_valid_construction_inputs(#[case] profile: DensityProfile) {
        let mut rng = SmallRng::seed_from_u64(7);
        let fixture = generate_fixture(profile, &mut rng);
        assert!(fixture.point_count() >= MIN_POINTS);
        assert_eq!(fixture.adjacency.len(), fixture.point_count());
        for (point, neighbours) in fixture.adjacency.iter().enumerate() {
            for &neighbour in neighbours {
                assert_ne!(point, neighbour);
                assert!(fixture.adjacency[neighbour].contains(&point));
            }
        }
        assert!(fixture.density.iter().all(|&value| value > 0.0));
        assert!(fixture.levels.windows(2).all(|pair| pair[0] < pair[1]));
        let max_density = fixture.density.iter().copied().fold(0.0, f64::max);
        assert_eq!(fixture.levels.last().copied(), Some(max_density));
    }
}
