//! The level set tree model and its value-copy transformations.
//!
//! A [`LevelSetTree`] owns every [`Node`] in a single id-keyed map; parents
//! and children refer to each other by [`NodeId`]. Pruning, subtree
//! extraction, and leaf collapsing never mutate `self` and return a new tree.

mod node;
mod persist;
mod prune;
mod subtree;
mod summary;

use std::collections::BTreeMap;

pub use self::{
    node::{Node, NodeId},
    persist::load_tree,
    prune::PruneMethod,
    summary::render_summary,
};
use crate::{builder::LevelSetTreeBuilder, error::LevelSetTreeError};

/// Hierarchy of connected components swept over ascending density levels.
///
/// # Examples
/// ```
/// use lstree_core::LevelSetTree;
///
/// let tree = LevelSetTree::builder()
///     .build()?
///     .construct(&[vec![1], vec![0]], &[1.0, 1.0], &[1.0])?;
/// assert_eq!(tree.len(), 1);
/// assert_eq!(tree.point_count(), 2);
/// assert_eq!(tree.background_sets(), [vec![0, 1]]);
/// # Ok::<(), lstree_core::LevelSetTreeError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelSetTree {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) density: Vec<f64>,
    pub(crate) levels: Vec<f64>,
    pub(crate) background_sets: Vec<Vec<usize>>,
}

impl LevelSetTree {
    /// Starts configuring a construction run.
    #[must_use]
    pub fn builder() -> LevelSetTreeBuilder {
        LevelSetTreeBuilder::new()
    }

    pub(crate) const fn from_parts(
        nodes: BTreeMap<NodeId, Node>,
        density: Vec<f64>,
        levels: Vec<f64>,
        background_sets: Vec<Vec<usize>>,
    ) -> Self {
        Self {
            nodes,
            density,
            levels,
            background_sets,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of points the tree was built over.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.density.len()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn require(&self, id: NodeId) -> Result<&Node, LevelSetTreeError> {
        self.nodes
            .get(&id)
            .ok_or(LevelSetTreeError::NodeNotFound { id })
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes without a parent, in ascending id order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| node.is_root())
    }

    /// Nodes without children, in ascending id order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| node.is_leaf())
    }

    /// Nodes with at least one child, in ascending id order.
    pub fn internal_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| !node.is_leaf())
    }

    /// Density estimate the tree was built from.
    #[must_use]
    #[rustfmt::skip]
    pub fn density(&self) -> &[f64] { &self.density }

    /// Ascending density levels swept during construction.
    #[must_use]
    #[rustfmt::skip]
    pub fn levels(&self) -> &[f64] { &self.levels }

    /// Points removed at each level, aligned with [`Self::levels`].
    #[must_use]
    pub fn background_sets(&self) -> &[Vec<usize>] {
        &self.background_sets
    }

    /// Cumulative background mass after each level, aligned with
    /// [`Self::levels`].
    #[must_use]
    pub fn level_masses(&self) -> Vec<f64> {
        let total = self.point_count();
        if total == 0 {
            return vec![0.0; self.background_sets.len()];
        }
        let mut removed = 0_usize;
        self.background_sets
            .iter()
            .map(|background| {
                removed += background.len();
                removed as f64 / total as f64
            })
            .collect()
    }

    /// Returns the first level whose cumulative background mass exceeds
    /// `alpha`, or `None` when no level does.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::LevelSetTree;
    ///
    /// let tree = LevelSetTree::builder()
    ///     .build()?
    ///     .construct(&[vec![], vec![], vec![], vec![]], &[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0])?;
    /// assert_eq!(tree.mass_to_level(0.3), Some(2.0));
    /// assert_eq!(tree.mass_to_level(1.0), None);
    /// # Ok::<(), lstree_core::LevelSetTreeError>(())
    /// ```
    #[must_use]
    pub fn mass_to_level(&self, alpha: f64) -> Option<f64> {
        self.level_masses()
            .into_iter()
            .zip(self.levels.iter().copied())
            .find_map(|(mass, level)| (mass > alpha).then_some(level))
    }

    /// Node ids with every descendant listed before its ancestor.
    ///
    /// Roots are visited in ascending id order and children in stored order,
    /// so the traversal follows the tree's structure rather than id values.
    pub(crate) fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, bool)> = self.roots().map(|root| (root.id, false)).collect();
        stack.reverse();
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().map(|&child| (child, false)));
            }
        }
        order
    }

    /// Removes `id` and every descendant from the node map.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children);
            }
        }
    }
}
