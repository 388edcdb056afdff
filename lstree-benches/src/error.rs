//! Benchmark setup error type.
//!
//! Aggregates the failures that may arise while preparing benchmark inputs
//! so that setup functions can propagate them with `?`.

use lstree_core::{InputError, LevelSetTreeError};

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The level grid could not be derived from the density estimate.
    #[error("level grid generation failed: {0}")]
    Grid(#[from] InputError),
    /// Tree construction failed.
    #[error("tree construction failed: {0}")]
    Tree(#[from] LevelSetTreeError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
