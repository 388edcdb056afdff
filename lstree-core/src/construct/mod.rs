//! Level set tree construction.
//!
//! [`TreeBuilder`] validates the inputs, compresses the neighbour graph, runs
//! the level sweep, and optionally prunes the result.

mod connectivity;
mod graph;
mod sweep;
mod validate;

use tracing::{instrument, warn};

use self::{graph::NeighbourGraph, sweep::LevelSweep, validate::validate_inputs};
use crate::{
    Result,
    builder::LevelSetTreeConfig,
    provider::{LevelGridGenerator, NeighborGraphProvider},
    tree::{LevelSetTree, PruneMethod},
};

/// Runs construction with a validated [`LevelSetTreeConfig`].
///
/// Obtain one from [`crate::LevelSetTreeBuilder::build`] or
/// [`LevelSetTree::builder`].
///
/// # Examples
/// ```
/// use lstree_core::LevelSetTree;
///
/// let builder = LevelSetTree::builder().build()?;
/// // Two triangles that only lose points at the last level.
/// let adjacency = vec![
///     vec![1, 2], vec![0, 2], vec![0, 1],
///     vec![4, 5], vec![3, 5], vec![3, 4],
/// ];
/// let tree = builder.construct(&adjacency, &[1.0; 6], &[0.5, 1.0])?;
/// assert_eq!(tree.roots().count(), 2);
/// assert!(tree.nodes().all(|node| node.end_level() == 1.0));
/// # Ok::<(), lstree_core::LevelSetTreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    config: LevelSetTreeConfig,
}

impl TreeBuilder {
    pub(crate) const fn new(config: LevelSetTreeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration applied by this builder.
    #[must_use]
    pub const fn config(&self) -> &LevelSetTreeConfig {
        &self.config
    }

    /// Builds a tree from an adjacency list, a density per point, and an
    /// ascending level grid.
    ///
    /// # Errors
    /// Returns [`crate::LevelSetTreeError::Input`] when the inputs fail
    /// validation and [`crate::LevelSetTreeError::Cancelled`] when the
    /// configured cancellation token fires during the sweep.
    #[instrument(
        name = "core.construct",
        err,
        skip(self, adjacency, density, levels),
        fields(
            points = density.len(),
            levels = levels.len(),
            strategy = ?self.config.execution_strategy,
            nodes = tracing::field::Empty,
        ),
    )]
    pub fn construct(
        &self,
        adjacency: &[Vec<usize>],
        density: &[f64],
        levels: &[f64],
    ) -> Result<LevelSetTree> {
        validate_inputs(adjacency, density, levels)?;
        let graph = NeighbourGraph::from_adjacency(adjacency, self.config.adjacency_mode)?;
        if density.is_empty() {
            warn!("constructing a level set tree from an empty point set");
        }

        let output = LevelSweep::new(&graph, density, levels, &self.config).run()?;
        let mut tree = LevelSetTree::from_parts(
            output.nodes,
            density.to_vec(),
            levels.to_vec(),
            output.background_sets,
        );
        if let Some(threshold) = self.config.prune_threshold {
            tree = tree.prune(PruneMethod::SizeMerge { threshold });
        }

        tracing::Span::current().record("nodes", tree.len());
        Ok(tree)
    }

    /// Builds a tree from a [`NeighborGraphProvider`], deriving the level grid
    /// with `grid`.
    ///
    /// # Errors
    /// Returns [`crate::LevelSetTreeError::Input`] when the grid generator or
    /// validation rejects the inputs, and the errors of [`Self::construct`].
    #[instrument(
        name = "core.construct_from",
        err,
        skip(self, provider, grid),
        fields(provider = %provider.name(), points = provider.len()),
    )]
    pub fn construct_from<P, G>(&self, provider: &P, grid: &G) -> Result<LevelSetTree>
    where
        P: NeighborGraphProvider + ?Sized,
        G: LevelGridGenerator + ?Sized,
    {
        let levels = grid.levels(provider.density())?;
        self.construct(provider.adjacency(), provider.density(), &levels)
    }
}
