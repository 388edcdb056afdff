//! Size-based simplification of a completed tree.

use std::sync::Arc;

use tracing::instrument;

use super::{LevelSetTree, NodeId};
use crate::{Result, error::LevelSetTreeError};

/// Pruning strategy applied by [`LevelSetTree::prune`].
///
/// # Examples
/// ```
/// use lstree_core::PruneMethod;
///
/// let method = PruneMethod::from_name("size-merge", Some(5))?;
/// assert_eq!(method, PruneMethod::SizeMerge { threshold: 5 });
/// # Ok::<(), lstree_core::LevelSetTreeError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PruneMethod {
    /// Merge splits whose children hold fewer than `threshold` points, and
    /// drop roots with at most `threshold` points.
    SizeMerge {
        /// Minimum member count for a child to count as a real branch.
        threshold: usize,
    },
}

impl PruneMethod {
    const SIZE_MERGE: &'static str = "size-merge";

    /// Builds a method from its configuration name.
    ///
    /// Accepts `size-merge` and `size_merge`.
    ///
    /// # Errors
    /// Returns [`LevelSetTreeError::UnknownMethod`] for other names and
    /// [`LevelSetTreeError::MissingParameter`] when `threshold` is absent.
    pub fn from_name(name: &str, threshold: Option<usize>) -> Result<Self> {
        match name {
            "size-merge" | "size_merge" => {
                let threshold = threshold.ok_or(LevelSetTreeError::MissingParameter {
                    method: Self::SIZE_MERGE,
                    parameter: "threshold",
                })?;
                Ok(Self::SizeMerge { threshold })
            }
            other => Err(LevelSetTreeError::UnknownMethod {
                kind: "pruning",
                name: Arc::from(other),
            }),
        }
    }
}

impl LevelSetTree {
    /// Returns a simplified copy of the tree; `self` is left untouched.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::{LevelSetTree, PruneMethod};
    ///
    /// // A path whose midpoint drops first, leaving two single-point tips.
    /// let tree = LevelSetTree::builder()
    ///     .build()?
    ///     .construct(&[vec![1], vec![0, 2], vec![1]], &[2.0, 1.0, 2.0], &[1.0, 2.0])?;
    /// assert_eq!(tree.len(), 3);
    ///
    /// let pruned = tree.prune(PruneMethod::SizeMerge { threshold: 2 });
    /// assert_eq!(pruned.len(), 1);
    /// assert_eq!(pruned.roots().next().map(|root| root.end_level()), Some(2.0));
    /// # Ok::<(), lstree_core::LevelSetTreeError>(())
    /// ```
    #[must_use]
    #[instrument(
        name = "core.prune",
        skip(self),
        fields(nodes_before = self.len(), nodes_after = tracing::field::Empty),
    )]
    pub fn prune(&self, method: PruneMethod) -> Self {
        let pruned = match method {
            PruneMethod::SizeMerge { threshold } => self.merge_by_size(threshold),
        };
        tracing::Span::current().record("nodes_after", pruned.len());
        pruned
    }

    fn merge_by_size(&self, threshold: usize) -> Self {
        let mut tree = self.clone();

        let small_roots: Vec<NodeId> = tree
            .roots()
            .filter(|root| root.size() <= threshold)
            .map(|root| root.id)
            .collect();
        for root in small_roots {
            tree.remove_subtree(root);
        }

        for id in tree.post_order() {
            let Some(children) = tree.nodes.get(&id).map(|node| node.children.clone()) else {
                continue;
            };
            if children.is_empty() {
                continue;
            }

            let big: Vec<NodeId> = children
                .iter()
                .copied()
                .filter(|child| {
                    tree.nodes
                        .get(child)
                        .is_some_and(|node| node.size() >= threshold)
                })
                .collect();

            match big.as_slice() {
                [] => tree.absorb_children(id, &children),
                [only] => tree.splice_single_child(id, *only, &children),
                _ => {}
            }
        }
        tree
    }

    /// Drops every child of `id` and extends its lifetime to the latest end
    /// among them.
    fn absorb_children(&mut self, id: NodeId, children: &[NodeId]) {
        let (end_level, end_mass) = children
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .fold((f64::NEG_INFINITY, f64::NEG_INFINITY), |(level, mass), child| {
                (level.max(child.end_level), mass.max(child.end_mass))
            });
        for &child in children {
            self.remove_subtree(child);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.children.clear();
            node.close(end_level, end_mass);
        }
    }

    /// Replaces `id`'s children with the children of `keep`, removing `keep`
    /// and every other child.
    fn splice_single_child(&mut self, id: NodeId, keep: NodeId, children: &[NodeId]) {
        for &child in children.iter().filter(|&&child| child != keep) {
            self.remove_subtree(child);
        }
        let Some(kept) = self.nodes.remove(&keep) else {
            return;
        };
        for grandchild in &kept.children {
            if let Some(node) = self.nodes.get_mut(grandchild) {
                node.parent = Some(id);
            }
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.close(kept.end_level, kept.end_mass);
            node.children = kept.children;
        }
    }
}
