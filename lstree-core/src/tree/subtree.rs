//! Subtree extraction and leaf collapsing.

use std::collections::BTreeMap;

use tracing::instrument;

use super::{LevelSetTree, Node, NodeId};
use crate::Result;

impl LevelSetTree {
    /// Ids of `id` and all of its descendants, `id` first.
    pub(crate) fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.get(&current) {
                ids.push(current);
                pending.extend(node.children.iter().rev().copied());
            }
        }
        ids
    }

    /// Returns an independent tree rooted at `id`.
    ///
    /// The copy keeps the original ids, clears the new root's parent, and
    /// carries the density, level grid, and background sets along.
    ///
    /// # Errors
    /// Returns [`crate::LevelSetTreeError::NodeNotFound`] when `id` is not in
    /// the tree.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::{LevelSetTree, NodeId};
    ///
    /// let tree = LevelSetTree::builder()
    ///     .build()?
    ///     .construct(&[vec![1], vec![0, 2], vec![1]], &[2.0, 1.0, 2.0], &[1.0, 2.0])?;
    /// let branch = tree.make_subtree(NodeId::new(2))?;
    /// assert_eq!(branch.len(), 1);
    /// assert_eq!(branch.roots().next().map(|root| root.members()), Some(&[2][..]));
    /// assert_eq!(branch.levels(), tree.levels());
    /// # Ok::<(), lstree_core::LevelSetTreeError>(())
    /// ```
    #[instrument(name = "core.make_subtree", err, skip(self), fields(root = %id))]
    pub fn make_subtree(&self, id: NodeId) -> Result<Self> {
        self.require(id)?;
        let mut nodes: BTreeMap<NodeId, Node> = self
            .subtree_ids(id)
            .into_iter()
            .filter_map(|member| self.nodes.get(&member).map(|node| (member, node.clone())))
            .collect();
        if let Some(root) = nodes.get_mut(&id) {
            root.parent = None;
        }
        Ok(Self::from_parts(
            nodes,
            self.density.clone(),
            self.levels.clone(),
            self.background_sets.clone(),
        ))
    }

    /// Returns a copy in which every node in `active` becomes a leaf.
    ///
    /// Each listed node takes the latest end level and end mass found in its
    /// subtree, and its descendants are removed. A node already removed as the
    /// descendant of an earlier entry is skipped.
    ///
    /// # Errors
    /// Returns [`crate::LevelSetTreeError::NodeNotFound`] when an id in
    /// `active` is not in the tree.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::{LevelSetTree, NodeId};
    ///
    /// let tree = LevelSetTree::builder()
    ///     .build()?
    ///     .construct(&[vec![1], vec![0, 2], vec![1]], &[2.0, 1.0, 2.0], &[1.0, 2.0])?;
    /// let collapsed = tree.collapse_leaves(&[NodeId::new(0)])?;
    /// assert_eq!(collapsed.len(), 1);
    /// assert_eq!(collapsed.node(NodeId::new(0)).map(|root| root.end_level()), Some(2.0));
    /// # Ok::<(), lstree_core::LevelSetTreeError>(())
    /// ```
    #[instrument(name = "core.collapse_leaves", err, skip(self, active), fields(active = active.len()))]
    pub fn collapse_leaves(&self, active: &[NodeId]) -> Result<Self> {
        for &id in active {
            self.require(id)?;
        }

        let mut tree = self.clone();
        for &id in active {
            if !tree.nodes.contains_key(&id) {
                continue;
            }
            let descendants = tree.subtree_ids(id);
            let (end_level, end_mass) = descendants
                .iter()
                .filter_map(|member| tree.nodes.get(member))
                .fold((f64::NEG_INFINITY, f64::NEG_INFINITY), |(level, mass), node| {
                    (level.max(node.end_level), mass.max(node.end_mass))
                });
            for descendant in descendants.iter().skip(1) {
                tree.nodes.remove(descendant);
            }
            if let Some(node) = tree.nodes.get_mut(&id) {
                node.children.clear();
                node.close(end_level, end_mass);
            }
        }
        Ok(tree)
    }
}
