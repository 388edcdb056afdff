//! Input collaborators for level set tree construction.
//!
//! A [`NeighborGraphProvider`] supplies the neighbour graph and per-point
//! density estimate; a [`LevelGridGenerator`] turns the density estimate into
//! the ascending thresholds swept by the builder.

use std::num::NonZeroUsize;

use crate::error::InputError;

/// Source of a neighbour graph plus a density value per point.
///
/// # Examples
/// ```
/// use lstree_core::{InMemoryGraph, NeighborGraphProvider};
///
/// let graph = InMemoryGraph::new("pair", vec![vec![1], vec![0]], vec![1.0, 2.0]);
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.name(), "pair");
/// assert_eq!(graph.density(), [1.0, 2.0]);
/// ```
pub trait NeighborGraphProvider {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Neighbour lists, one row per point.
    fn adjacency(&self) -> &[Vec<usize>];

    /// Density estimate, one value per point.
    fn density(&self) -> &[f64];

    /// Returns the number of points.
    fn len(&self) -> usize {
        self.density().len()
    }

    /// Returns whether the provider holds no points.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Produces the ascending density thresholds swept during construction.
///
/// The background buckets of the returned grid must partition the points,
/// so every density has to lie in `[0, last_level]`. The first bucket is
/// `[0, levels[0]]` and each later one is `(previous, level]`.
pub trait LevelGridGenerator {
    /// Builds the level grid for `density`.
    ///
    /// # Errors
    /// Implementations return an [`InputError`] when `density` cannot be
    /// covered by a grid.
    fn levels(&self, density: &[f64]) -> Result<Vec<f64>, InputError>;
}

/// [`NeighborGraphProvider`] backed by owned vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct InMemoryGraph {
    name: String,
    adjacency: Vec<Vec<usize>>,
    density: Vec<f64>,
}

impl InMemoryGraph {
    /// Wraps an adjacency list and density vector.
    #[must_use]
    pub fn new(name: impl Into<String>, adjacency: Vec<Vec<usize>>, density: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            adjacency,
            density,
        }
    }
}

impl NeighborGraphProvider for InMemoryGraph {
    fn name(&self) -> &str {
        &self.name
    }

    fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    fn density(&self) -> &[f64] {
        &self.density
    }
}

/// Level grid derived from the density values themselves.
///
/// Without a level count every distinct density becomes a level. With one,
/// the grid holds the densities at evenly spaced mass quantiles of the sorted
/// estimate. Either way the last level is the maximum density.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use lstree_core::{DensityGrid, LevelGridGenerator};
///
/// let density = [0.4, 0.1, 0.4, 0.3];
/// let every = DensityGrid::distinct().levels(&density)?;
/// assert_eq!(every, [0.1, 0.3, 0.4]);
///
/// let halves = DensityGrid::with_levels(NonZeroUsize::MIN.saturating_add(1));
/// assert_eq!(halves.levels(&density)?, [0.3, 0.4]);
/// # Ok::<(), lstree_core::InputError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DensityGrid {
    num_levels: Option<NonZeroUsize>,
}

impl DensityGrid {
    /// One level per distinct density value.
    #[must_use]
    pub const fn distinct() -> Self {
        Self { num_levels: None }
    }

    /// At most `num_levels` levels placed at mass quantiles.
    #[must_use]
    pub const fn with_levels(num_levels: NonZeroUsize) -> Self {
        Self {
            num_levels: Some(num_levels),
        }
    }

    /// Requested level count, if any.
    #[must_use]
    pub const fn num_levels(&self) -> Option<NonZeroUsize> {
        self.num_levels
    }
}

impl LevelGridGenerator for DensityGrid {
    fn levels(&self, density: &[f64]) -> Result<Vec<f64>, InputError> {
        if let Some((index, &value)) = density
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite() || **value < 0.0)
        {
            return Err(InputError::InvalidDensity { index, value });
        }

        let mut sorted = density.to_vec();
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len();

        let mut levels: Vec<f64> = match self.num_levels {
            Some(num_levels) if num_levels.get() < count => {
                let steps = num_levels.get();
                (1..=steps)
                    .map(|step| {
                        let rank = (step * count).div_ceil(steps);
                        sorted[rank - 1]
                    })
                    .collect()
            }
            _ => sorted,
        };
        levels.dedup();
        Ok(levels)
    }
}
