//! Synthetic neighbour graphs for benchmarking.
//!
//! Provides [`SyntheticGraph`], a [`NeighborGraphProvider`] over points laid
//! out along a line in a few dense blobs separated by sparse gaps. Each
//! point links to its nearest successors in position order, so the graph is
//! connected but breaks apart blob by blob as the density level rises.

use lstree_core::NeighborGraphProvider;
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Spacing between blob centres along the line.
const BLOB_SPACING: f64 = 4.0;

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested blob count was zero.
    #[error("blob count must be greater than zero")]
    ZeroBlobs,
    /// The requested neighbour count was zero.
    #[error("neighbour count must be greater than zero")]
    ZeroNeighbours,
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Number of dense blobs.
    pub blobs: usize,
    /// Successors each point links to in position order.
    pub neighbours: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A [`NeighborGraphProvider`] of seeded blobs on a line.
///
/// # Examples
///
/// ```
/// use lstree_benches::source::{SyntheticConfig, SyntheticGraph};
/// use lstree_core::NeighborGraphProvider;
///
/// let config = SyntheticConfig { point_count: 12, blobs: 3, neighbours: 2, seed: 7 };
/// let graph = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(graph.len(), 12);
/// assert!(graph.density().iter().all(|&value| value >= 1.0));
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    adjacency: Vec<Vec<usize>>,
    density: Vec<f64>,
}

impl SyntheticGraph {
    /// Generates the graph eagerly from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroPoints`], [`SyntheticError::ZeroBlobs`],
    /// or [`SyntheticError::ZeroNeighbours`] when the matching count is zero.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::integer_division_remainder_used,
        reason = "blob placement mixes integer blob indices with f64 offsets"
    )]
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.point_count == 0 {
            return Err(SyntheticError::ZeroPoints);
        }
        if config.blobs == 0 {
            return Err(SyntheticError::ZeroBlobs);
        }
        if config.neighbours == 0 {
            return Err(SyntheticError::ZeroNeighbours);
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let heights: Vec<f64> = (0..config.blobs).map(|_| rng.gen_range(1.0..3.0)).collect();
        let mut placed: Vec<(usize, f64)> = Vec::with_capacity(config.point_count);
        let mut density = Vec::with_capacity(config.point_count);
        for point in 0..config.point_count {
            let blob = point % config.blobs;
            let offset: f64 = rng.gen_range(-1.0..=1.0);
            let height = heights.get(blob).copied().unwrap_or(1.0);
            placed.push((point, blob as f64 * BLOB_SPACING + offset));
            density.push(1.0 + height * (1.0 - offset.abs()));
        }
        placed.sort_by(|left, right| left.1.total_cmp(&right.1));

        let mut adjacency = vec![Vec::new(); config.point_count];
        for (rank, &(point, _)) in placed.iter().enumerate() {
            for &(other, _) in placed.iter().skip(rank.saturating_add(1)).take(config.neighbours) {
                if let Some(row) = adjacency.get_mut(point) {
                    row.push(other);
                }
                if let Some(row) = adjacency.get_mut(other) {
                    row.push(point);
                }
            }
        }

        Ok(Self { adjacency, density })
    }
}

impl NeighborGraphProvider for SyntheticGraph {
    #[expect(
        clippy::unnecessary_literal_bound,
        reason = "NeighborGraphProvider constrains the return type to &str"
    )]
    fn name(&self) -> &str {
        "synthetic"
    }

    fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    fn density(&self) -> &[f64] {
        &self.density
    }
}
