//! The four labelling policies.

use std::{collections::HashSet, num::NonZeroUsize};

use super::Scale;
use crate::{
    result::ForegroundClusters,
    tree::{LevelSetTree, Node, NodeId},
};

pub(super) fn leaf(tree: &LevelSetTree) -> ForegroundClusters {
    ForegroundClusters::from_members(tree.leaves().map(|node| (node.id(), node.members())))
}

pub(super) fn first_k(tree: &LevelSetTree, k: NonZeroUsize) -> ForegroundClusters {
    let mut candidates: Vec<NodeId> = tree.roots().map(Node::id).collect();
    let active_splits = k.get().saturating_sub(candidates.len());

    let mut splits: Vec<&Node> = tree.internal_nodes().collect();
    splits.sort_by(|a, b| {
        a.end_level()
            .total_cmp(&b.end_level())
            .then(a.id().cmp(&b.id()))
    });
    for split in splits.into_iter().take(active_splits) {
        candidates.extend_from_slice(split.children());
    }

    let lookup: HashSet<NodeId> = candidates.iter().copied().collect();
    ForegroundClusters::from_members(
        candidates
            .iter()
            .filter_map(|&id| tree.node(id))
            .filter(|node| !node.children().iter().any(|child| lookup.contains(child)))
            .map(|node| (node.id(), node.members())),
    )
}

pub(super) fn upper_set(tree: &LevelSetTree, threshold: f64, scale: Scale) -> ForegroundClusters {
    let positions = match scale {
        Scale::Level => tree.levels().to_vec(),
        Scale::Mass => tree.level_masses(),
    };
    let spans = |node: &Node| match scale {
        Scale::Level => node.spans_level(threshold),
        Scale::Mass => node.spans_mass(threshold),
    };

    let upper: Vec<usize> = positions
        .iter()
        .zip(tree.background_sets())
        .filter(|(position, _)| **position > threshold)
        .flat_map(|(_, background)| background.iter().copied())
        .collect();

    let clusters: Vec<(NodeId, Vec<usize>)> = tree
        .nodes()
        .filter(|node| spans(node))
        .map(|node| {
            let points = upper
                .iter()
                .copied()
                .filter(|point| node.members().binary_search(point).is_ok())
                .collect();
            (node.id(), points)
        })
        .collect();

    ForegroundClusters::from_members(
        clusters
            .iter()
            .map(|(id, points)| (*id, points.as_slice())),
    )
}

pub(super) fn k_level(tree: &LevelSetTree, k: NonZeroUsize) -> ForegroundClusters {
    let Some(cut) = tree.find_k_cut(k) else {
        return ForegroundClusters::default();
    };
    ForegroundClusters::from_members(
        tree.nodes()
            .filter(|node| node.spans_level(cut))
            .map(|node| (node.id(), node.members())),
    )
}
