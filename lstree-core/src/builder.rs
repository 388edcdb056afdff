//! Builder utilities for configuring level set tree construction.
//!
//! Exposes the execution strategy and adjacency handling surface, and the
//! validation applied before a [`TreeBuilder`] is handed out.

use crate::{
    Result, cancel::CancellationToken, construct::TreeBuilder, error::LevelSetTreeError,
};

/// Indicates how the level sweep evaluates live components within a level.
///
/// `Auto` resolves deterministically at [`LevelSetTreeBuilder::build`]: it
/// selects `Parallel` when the `parallel` feature is compiled in and
/// `Sequential` otherwise. Both strategies produce identical trees.
///
/// # Examples
/// ```
/// use lstree_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Let the library pick the strategy available in this build.
    Auto,
    /// Evaluate live components one after another on the calling thread.
    Sequential,
    /// Evaluate live components on the rayon thread pool.
    Parallel,
}

/// How construction treats neighbour lists that are not symmetric.
///
/// # Examples
/// ```
/// use lstree_core::AdjacencyMode;
///
/// assert_eq!(AdjacencyMode::default(), AdjacencyMode::Strict);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdjacencyMode {
    /// Reject any edge that lacks its reverse entry.
    #[default]
    Strict,
    /// Treat every listed edge as undirected.
    Symmetrize,
}

/// Validated construction settings carried by a [`TreeBuilder`].
#[derive(Debug, Clone)]
pub struct LevelSetTreeConfig {
    pub(crate) prune_threshold: Option<usize>,
    pub(crate) execution_strategy: ExecutionStrategy,
    pub(crate) adjacency_mode: AdjacencyMode,
    pub(crate) verbose: bool,
    pub(crate) cancellation: Option<CancellationToken>,
}

impl LevelSetTreeConfig {
    /// Size-merge threshold applied to freshly built trees, if any.
    #[must_use]
    pub const fn prune_threshold(&self) -> Option<usize> {
        self.prune_threshold
    }

    /// Resolved execution strategy; never [`ExecutionStrategy::Auto`].
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Adjacency handling applied at construction entry.
    #[must_use]
    pub const fn adjacency_mode(&self) -> AdjacencyMode {
        self.adjacency_mode
    }

    /// Whether progress is reported at `info` level.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Configures and constructs [`TreeBuilder`] instances.
///
/// # Examples
/// ```
/// use lstree_core::{ExecutionStrategy, LevelSetTreeBuilder};
///
/// let builder = LevelSetTreeBuilder::new()
///     .with_prune_threshold(4)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(builder.config().prune_threshold(), Some(4));
/// assert_eq!(
///     builder.config().execution_strategy(),
///     ExecutionStrategy::Sequential
/// );
/// ```
#[derive(Debug, Clone)]
pub struct LevelSetTreeBuilder {
    prune_threshold: Option<usize>,
    execution_strategy: ExecutionStrategy,
    adjacency_mode: AdjacencyMode,
    verbose: bool,
    cancellation: Option<CancellationToken>,
}

impl Default for LevelSetTreeBuilder {
    fn default() -> Self {
        Self {
            prune_threshold: None,
            execution_strategy: ExecutionStrategy::Auto,
            adjacency_mode: AdjacencyMode::Strict,
            verbose: false,
            cancellation: None,
        }
    }
}

impl LevelSetTreeBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::{AdjacencyMode, ExecutionStrategy, LevelSetTreeBuilder};
    ///
    /// let builder = LevelSetTreeBuilder::new();
    /// assert_eq!(builder.prune_threshold(), None);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.adjacency_mode(), AdjacencyMode::Strict);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a size-merge prune with `threshold` on every constructed tree.
    #[must_use]
    pub const fn with_prune_threshold(mut self, threshold: usize) -> Self {
        self.prune_threshold = Some(threshold);
        self
    }

    /// Returns the configured prune threshold.
    #[must_use]
    pub const fn prune_threshold(&self) -> Option<usize> {
        self.prune_threshold
    }

    /// Sets the execution strategy used by the level sweep.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::{ExecutionStrategy, LevelSetTreeBuilder};
    ///
    /// let builder = LevelSetTreeBuilder::new().with_execution_strategy(ExecutionStrategy::Sequential);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Sequential);
    /// ```
    #[must_use]
    pub const fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Chooses how asymmetric neighbour lists are handled.
    #[must_use]
    pub const fn with_adjacency_mode(mut self, mode: AdjacencyMode) -> Self {
        self.adjacency_mode = mode;
        self
    }

    /// Returns the configured adjacency mode.
    #[must_use]
    pub const fn adjacency_mode(&self) -> AdjacencyMode {
        self.adjacency_mode
    }

    /// Enables `info` progress reports every hundred levels.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Attaches a token the sweep polls once per level.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Validates the configuration and constructs a [`TreeBuilder`].
    ///
    /// # Errors
    /// Returns [`LevelSetTreeError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested in a build without the
    /// `parallel` feature.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::{ExecutionStrategy, LevelSetTreeBuilder};
    ///
    /// let builder = LevelSetTreeBuilder::new().build().expect("configuration is valid");
    /// assert_ne!(builder.config().execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    pub fn build(self) -> Result<TreeBuilder> {
        let execution_strategy = resolve_strategy(self.execution_strategy)?;
        Ok(TreeBuilder::new(LevelSetTreeConfig {
            prune_threshold: self.prune_threshold,
            execution_strategy,
            adjacency_mode: self.adjacency_mode,
            verbose: self.verbose,
            cancellation: self.cancellation,
        }))
    }
}

fn resolve_strategy(requested: ExecutionStrategy) -> Result<ExecutionStrategy> {
    match requested {
        ExecutionStrategy::Auto if cfg!(feature = "parallel") => Ok(ExecutionStrategy::Parallel),
        ExecutionStrategy::Auto => Ok(ExecutionStrategy::Sequential),
        ExecutionStrategy::Parallel if !cfg!(feature = "parallel") => {
            Err(LevelSetTreeError::BackendUnavailable { requested })
        }
        strategy => Ok(strategy),
    }
}
