//! Level set tree core library.
//!
//! Builds a hierarchy of connected components from a neighbour graph and a
//! per-point density estimate by sweeping ascending density levels, then
//! simplifies it with size-merge pruning and labels foreground clusters with
//! one of four policies.
//!
//! ```
//! use lstree_core::{ClusterMethod, LevelSetTree, PruneMethod};
//!
//! // Two dense tips joined through a sparse midpoint.
//! let adjacency = [vec![1], vec![0, 2], vec![1, 3], vec![2, 4], vec![3]];
//! let density = [3.0, 2.0, 1.0, 2.0, 3.0];
//! let tree = LevelSetTree::builder()
//!     .build()?
//!     .construct(&adjacency, &density, &[1.0, 2.0, 3.0])?;
//! assert_eq!(tree.leaves().count(), 2);
//!
//! let clusters = tree
//!     .prune(PruneMethod::SizeMerge { threshold: 1 })
//!     .cluster_labels(ClusterMethod::Leaf);
//! assert_eq!(clusters.cluster_count(), 2);
//! # Ok::<(), lstree_core::LevelSetTreeError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod cancel;
mod construct;
mod error;
mod extract;
mod provider;
mod result;
mod telemetry;
mod tree;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{AdjacencyMode, ExecutionStrategy, LevelSetTreeBuilder, LevelSetTreeConfig},
    cancel::CancellationToken,
    construct::TreeBuilder,
    error::{
        InputError, InputErrorCode, LevelSetTreeError, LevelSetTreeErrorCode, PersistenceError,
        PersistenceErrorCode, Result,
    },
    extract::{ClusterMethod, MethodParams, Scale},
    provider::{DensityGrid, InMemoryGraph, LevelGridGenerator, NeighborGraphProvider},
    result::{ClusterId, ForegroundClusters, LabelledPoint},
    tree::{LevelSetTree, Node, NodeId, PruneMethod, load_tree, render_summary},
};
